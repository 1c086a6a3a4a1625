//! Configuration management for gv

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::outline::BulletStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeVariant,
    pub layout: LayoutConfig,
    pub editor: EditorConfig,
    pub state: StateConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left margin before top-level headlines
    pub base_indent: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Bullet style for new outlines
    pub bullets: BulletStyle,
    /// Where new outlines are created; the working directory when unset
    pub outlines_dir: Option<PathBuf>,
}

/// Values gv writes back on its own
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub last_opened: Option<PathBuf>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { base_indent: 1 }
    }
}

impl Config {
    /// Get the platform-specific config directory
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "gv").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("gv.toml"))
    }

    /// Load configuration from file, falling back to defaults if missing
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path (for testing)
    pub fn load_from(path: &Path) -> Result<Self> {
        check_permissions(path)?;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write configuration to the platform config path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("No config directory on this platform")?;
        self.save_to(&path)
    }

    /// Write configuration to a specific path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }
        let content = toml::to_string(self).context("Failed to encode config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Directory new outlines are created in
    pub fn outlines_dir(&self) -> PathBuf {
        self.editor
            .outlines_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Reject config files anyone can write to (Unix only)
fn check_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat config file: {}", path.display()))?;
        if metadata.permissions().mode() & 0o002 != 0 {
            anyhow::bail!(
                "Config file {} is world-writable (insecure permissions)",
                path.display()
            );
        }
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeVariant::Dark);
        assert_eq!(config.layout.base_indent, 1);
        assert_eq!(config.editor.bullets, BulletStyle::Glyph);
        assert!(config.state.last_opened.is_none());
        assert_eq!(config.outlines_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_load_valid_toml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(
            b"theme = \"Light\"\n\
\n\
[layout]\n\
base_indent = 4\n\
\n\
[editor]\n\
bullets = \"Plain\"\n\
outlines_dir = \"/home/me/outlines\"\n\
\n\
[state]\n\
last_opened = \"/home/me/outlines/todo.gv\"\n",
        )?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Light);
        assert_eq!(config.layout.base_indent, 4);
        assert_eq!(config.editor.bullets, BulletStyle::Plain);
        assert_eq!(config.outlines_dir(), PathBuf::from("/home/me/outlines"));
        assert_eq!(
            config.state.last_opened,
            Some(PathBuf::from("/home/me/outlines/todo.gv"))
        );
        Ok(())
    }

    #[test]
    fn test_load_partial_toml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"[layout]\nbase_indent = 0\n")?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Dark);
        assert_eq!(config.layout.base_indent, 0);
        assert_eq!(config.editor.bullets, BulletStyle::Glyph);
        Ok(())
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"invalid toml [[[syntax").unwrap();

        let result = Config::load_from(file.path());
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_world_writable_config_is_rejected() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let file = NamedTempFile::new()?;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o666))?;

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("world-writable"));
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("gv.toml");

        let mut config = Config::default();
        config.theme = ThemeVariant::Light;
        config.state.last_opened = Some(PathBuf::from("/tmp/notes.gv"));
        config.save_to(&path)?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded.theme, ThemeVariant::Light);
        assert_eq!(loaded.state.last_opened, Some(PathBuf::from("/tmp/notes.gv")));
        Ok(())
    }

    #[test]
    fn test_config_path_returns_some() {
        let path = Config::config_path();
        assert!(path.is_some());
        if let Some(p) = path {
            assert!(p.to_string_lossy().contains("gv"));
            assert!(p.to_string_lossy().ends_with("gv.toml"));
        }
    }
}
