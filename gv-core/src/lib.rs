//! GV Core - Outline model, layout, editing session and configuration
//!
//! This crate contains the core logic for gv, independent of terminal UI concerns:
//! - Piece-table text buffers
//! - Hierarchical outline document with structural edits
//! - Word-wrapped line layout
//! - Editing session (cursor, selection, scrolling, dirty tracking)
//! - JSON persistence and configuration management

pub mod config;
pub mod error;
pub mod filename;
pub mod layout;
pub mod outline;
pub mod persist;
pub mod piece_table;
pub mod selection;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{OutlineError, OutlineResult};
pub use layout::{LineLayout, VisualLine};
pub use outline::{BulletStyle, Headline, HeadlineId, Outline, APPEND_MARKER};
pub use piece_table::PieceTable;
pub use selection::Selection;
pub use session::{Direction, EditSession, Motion};
