//! GV - A terminal outliner for hierarchical notes

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use gv_core::{Config, EditSession, Outline};
use gv_tui::App;
use log::{info, warn};
use std::fs::OpenOptions;
use std::path::PathBuf;

const DEFAULT_TITLE: &str = "New Outline";

/// A terminal outliner
#[derive(Parser, Debug)]
#[command(name = "gv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Outline file to open (created on first save if missing)
    #[arg(value_name = "FILE", conflicts_with = "new")]
    file: Option<PathBuf>,

    /// Start a new outline with this title
    #[arg(long, value_name = "TITLE")]
    new: Option<String>,
}

/// Log to a file in the config directory; the terminal belongs to the UI
fn init_logging() {
    let Some(dir) = Config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("gv.log"))
    else {
        return;
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;
    let last_opened = config.state.last_opened.clone();

    let session = EditSession::new(Outline::new(DEFAULT_TITLE))
        .with_base_indent(config.layout.base_indent)
        .with_default_bullets(config.editor.bullets);
    let mut app = App::new(session, config);
    if let Some(path) = Config::config_path() {
        app = app.with_config_path(path);
    }

    if let Some(title) = &args.new {
        app.new_outline(title);
    } else if let Some(file) = &args.file {
        if file.exists() {
            app.open(file)?;
        } else {
            let title = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string());
            info!("{} does not exist, starting a new outline", file.display());
            app.session.new_document(&title);
            app.session.set_path(file);
        }
    } else {
        match last_opened.filter(|p| p.exists()) {
            Some(path) => {
                if let Err(e) = app.open(&path) {
                    warn!("{:#}", e);
                    app.new_outline(DEFAULT_TITLE);
                }
            }
            None => app.new_outline(DEFAULT_TITLE),
        }
    }

    // Run TUI
    gv_tui::run(app).context("TUI application error")?;

    Ok(())
}
