//! Core module - application infrastructure around the board engine
//!
//! # Module Structure
//!
//! - `error` - Error types for settings handling
//! - `settings` - User settings and their JSON persistence

pub mod error;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use settings::{load_settings, save_settings, settings_path, Settings};
