//! Business logic services.
//!
//! Services compose context resolution, path derivation and git operations
//! into the operations the CLI exposes.

pub mod editor;
mod notes;
mod path_manager;

pub use notes::NotesService;
pub use path_manager::{PathManager, note_path};
