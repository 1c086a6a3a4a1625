//! Reading and writing `.gv` outline files
//!
//! Outlines are stored as JSON. Each headline carries its materialized text
//! (marker stripped) and its children nested in document order; parent links
//! are rebuilt from the nesting on load. Tombstoned headlines are never
//! written.

use crate::error::{OutlineError, OutlineResult};
use crate::outline::{BulletStyle, HeadlineId, Outline, APPEND_MARKER};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File extension for outline documents
pub const EXTENSION: &str = "gv";

#[derive(Debug, Serialize, Deserialize)]
struct StoredHeadline {
    #[serde(alias = "ID")]
    id: HeadlineId,
    // Informational only; older files use -1 for roots
    #[serde(default, alias = "ParentID")]
    parent_id: Option<i64>,
    #[serde(default = "default_expanded", alias = "Expanded")]
    expanded: bool,
    #[serde(default)]
    text: String,
    #[serde(default, alias = "Children")]
    children: Vec<StoredHeadline>,
}

fn default_expanded() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredOutline {
    #[serde(default)]
    title: String,
    #[serde(default)]
    bullets: BulletStyle,
    #[serde(default)]
    multi_list: bool,
    headlines: Vec<StoredHeadline>,
}

/// Accepted on-disk shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredForm {
    Document(StoredOutline),
    /// Bare array of root headlines
    Legacy(Vec<StoredHeadline>),
}

/// Serialize an outline to its JSON form
pub fn to_json(outline: &Outline) -> OutlineResult<String> {
    let stored = StoredOutline {
        title: outline.title.clone(),
        bullets: outline.bullets,
        multi_list: outline.multi_list,
        headlines: outline
            .roots()
            .iter()
            .map(|&id| store(outline, id))
            .collect(),
    };
    serde_json::to_string_pretty(&stored)
        .map_err(|e| OutlineError::structural(format!("failed to encode outline: {}", e)))
}

/// Parse an outline from JSON. `default_title` is used when the document
/// does not carry one.
pub fn from_json(json: &str, default_title: &str) -> OutlineResult<Outline> {
    let form: StoredForm = serde_json::from_str(json)
        .map_err(|e| OutlineError::structural(format!("not an outline file: {}", e)))?;

    let stored = match form {
        StoredForm::Document(doc) => doc,
        StoredForm::Legacy(headlines) => StoredOutline {
            title: String::new(),
            bullets: BulletStyle::default(),
            multi_list: false,
            headlines,
        },
    };

    if stored.headlines.is_empty() {
        return Err(OutlineError::structural("no headlines found"));
    }

    let title = if stored.title.is_empty() {
        default_title.to_string()
    } else {
        stored.title
    };
    let mut outline = Outline::empty(title);
    outline.bullets = stored.bullets;
    outline.multi_list = stored.multi_list;

    for headline in &stored.headlines {
        restore(&mut outline, headline, None)?;
    }

    Ok(outline)
}

/// Write an outline to `path`
pub fn save(outline: &Outline, path: &Path) -> OutlineResult<()> {
    let json = to_json(outline)?;
    fs::write(path, json).map_err(|e| OutlineError::io(path, e))?;
    info!("Saved outline '{}' to {}", outline.title, path.display());
    Ok(())
}

/// Read an outline from `path`. The file stem is the fallback title.
pub fn load(path: &Path) -> OutlineResult<Outline> {
    let json = fs::read_to_string(path).map_err(|e| OutlineError::io(path, e))?;
    let default_title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let outline = from_json(&json, &default_title)?;
    info!(
        "Loaded outline '{}' ({} headlines) from {}",
        outline.title,
        outline.len(),
        path.display()
    );
    Ok(outline)
}

fn store(outline: &Outline, id: HeadlineId) -> StoredHeadline {
    let headline = outline.headline(id);
    StoredHeadline {
        id,
        parent_id: headline.parent().map(|p| p as i64),
        expanded: headline.is_expanded(),
        text: headline.text(),
        children: headline
            .children()
            .iter()
            .map(|&child| store(outline, child))
            .collect(),
    }
}

fn restore(
    outline: &mut Outline,
    stored: &StoredHeadline,
    parent: Option<HeadlineId>,
) -> OutlineResult<()> {
    let text: String = stored.text.chars().filter(|&c| c != APPEND_MARKER).collect();
    if !outline.attach_loaded(stored.id, parent, stored.expanded, &text) {
        return Err(OutlineError::structural(format!(
            "duplicate headline id {}",
            stored.id
        )));
    }
    if stored.parent_id.is_some_and(|p| Some(p) != parent.map(|p| p as i64)) {
        debug!("Ignoring stale parent id on headline {}", stored.id);
    }
    for child in &stored.children {
        restore(outline, child, Some(stored.id))?;
    }
    Ok(())
}
