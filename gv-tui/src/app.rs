//! Application state

use crate::prompt::{AfterSave, Prompt, PromptKind};
use crate::theme::Theme;
use anyhow::{Context, Result};
use gv_core::config::ThemeVariant;
use gv_core::persist::EXTENSION;
use gv_core::{filename, Config, EditSession};
use log::{info, warn};
use std::path::{Path, PathBuf};

pub struct App {
    pub session: EditSession,
    pub config: Config,
    pub theme: Theme,
    pub theme_variant: ThemeVariant,
    pub should_quit: bool,
    pub show_help: bool,
    pub prompt: Option<Prompt>,
    pub status_message: Option<String>,
    /// Where `config.state` is written back; None leaves the config alone
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(session: EditSession, config: Config) -> Self {
        let theme_variant = config.theme;
        Self {
            session,
            theme: Theme::for_variant(theme_variant),
            theme_variant,
            config,
            should_quit: false,
            show_help: false,
            prompt: None,
            status_message: None,
            config_path: None,
        }
    }

    /// Persist the last opened outline to this config file
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    // ----- documents -----

    /// Open an outline file and remember it for next time
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.session
            .open(path)
            .with_context(|| format!("Failed to open outline {}", path.display()))?;
        self.remember(path);
        Ok(())
    }

    /// Create a new outline in the outlines directory and save it right away
    pub fn new_outline(&mut self, title: &str) {
        self.session.new_document(title);
        let path = self.config.outlines_dir().join(filename::generate(title));
        self.save_to(&path);
    }

    /// Ctrl+S: save, asking for a file name when the outline has none
    pub fn request_save(&mut self, then: AfterSave) {
        match self.session.path().map(Path::to_path_buf) {
            Some(path) => {
                if self.save_to(&path) {
                    self.finish(then);
                }
            }
            None => {
                self.prompt = Some(Prompt::new(PromptKind::SaveAs(then), "Filename: "));
            }
        }
    }

    /// Ctrl+Q: quit, offering to save a dirty outline first
    pub fn request_quit(&mut self) {
        if self.session.is_dirty() {
            self.prompt = Some(Prompt::new(
                PromptKind::SaveFirst(AfterSave::Quit),
                "Save first (Y/N)? ",
            ));
        } else {
            self.quit();
        }
    }

    /// Ctrl+N: start a new outline, offering to save a dirty one first
    pub fn request_new_outline(&mut self) {
        if self.session.is_dirty() {
            self.prompt = Some(Prompt::new(
                PromptKind::SaveFirst(AfterSave::NewOutline),
                "Save first (Y/N)? ",
            ));
        } else {
            self.finish(AfterSave::NewOutline);
        }
    }

    /// Ctrl+T: edit the outline title
    pub fn request_title(&mut self) {
        let title = self.session.outline().title.clone();
        self.prompt = Some(Prompt::new(PromptKind::Title, "Title: ").with_input(&title));
    }

    /// Enter in the prompt line
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let value = prompt.value();
        let value = value.trim();

        match prompt.kind {
            PromptKind::SaveAs(then) => {
                if value.is_empty() {
                    return;
                }
                let path = self.outline_path(value);
                if self.save_to(&path) {
                    self.finish(then);
                }
            }
            PromptKind::SaveFirst(then) => match value.to_ascii_lowercase().as_str() {
                "y" | "yes" => self.request_save(then),
                "n" | "no" => self.finish(then),
                _ => {}
            },
            PromptKind::Title => {
                if !value.is_empty() {
                    self.session.set_title(value);
                }
            }
            PromptKind::NewOutline => {
                if !value.is_empty() {
                    self.new_outline(value);
                }
            }
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    fn finish(&mut self, then: AfterSave) {
        match then {
            AfterSave::Nothing => {}
            AfterSave::Quit => self.quit(),
            AfterSave::NewOutline => {
                self.prompt = Some(Prompt::new(PromptKind::NewOutline, "New outline title: "));
            }
        }
    }

    /// Save and report the outcome in the status bar
    fn save_to(&mut self, path: &Path) -> bool {
        match self.session.save(path) {
            Ok(()) => {
                self.set_status_message(format!("Saved {}", path.display()));
                self.remember(path);
                true
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                self.set_status_message(format!("Error saving file: {}", e));
                false
            }
        }
    }

    /// Resolve a typed file name inside the outlines directory
    fn outline_path(&self, name: &str) -> PathBuf {
        let mut path = self.config.outlines_dir().join(name);
        if path.extension().is_none() {
            path.set_extension(EXTENSION);
        }
        path
    }

    /// Record `path` as the last opened outline
    fn remember(&mut self, path: &Path) {
        let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.config.state.last_opened = Some(path);
        if let Some(config_path) = &self.config_path {
            if let Err(e) = self.config.save_to(config_path) {
                warn!("Failed to remember last outline: {:#}", e);
            }
        }
    }

    // ----- clipboard -----

    pub fn copy(&mut self) {
        if let Some(text) = self.session.copy_selection() {
            copy_to_system_clipboard(&text);
            self.set_status_message(format!("Copied {} characters", text.chars().count()));
        }
    }

    pub fn cut(&mut self) {
        if let Some(text) = self.session.cut_selection() {
            copy_to_system_clipboard(&text);
        }
    }

    /// Paste the selection clipboard, falling back to the system clipboard
    pub fn paste(&mut self) {
        if self.session.paste_selection() {
            return;
        }
        if let Some(text) = paste_from_system_clipboard() {
            info!(
                "Pasting {} characters from system clipboard",
                text.chars().count()
            );
            self.session.paste_text(&text);
        }
    }
}

#[cfg(feature = "clipboard")]
fn copy_to_system_clipboard(text: &str) {
    let result = arboard::Clipboard::new().and_then(|mut clip| clip.set_text(text.to_string()));
    if let Err(e) = result {
        warn!("Failed to copy to system clipboard: {}", e);
    }
}

#[cfg(not(feature = "clipboard"))]
fn copy_to_system_clipboard(_text: &str) {}

#[cfg(feature = "clipboard")]
fn paste_from_system_clipboard() -> Option<String> {
    arboard::Clipboard::new().ok()?.get_text().ok()
}

#[cfg(not(feature = "clipboard"))]
fn paste_from_system_clipboard() -> Option<String> {
    None
}
