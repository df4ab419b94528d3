//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `catalog`: The static album/song catalog
//! - `types`: Core type definitions (UI state)
//! - `playback`: Playback-related state (timing, render snapshot)
//! - `app_model`: Main application model with state management methods

mod app_model;
mod catalog;
mod playback;
mod types;

// Re-export all public types for convenient access
pub use catalog::{Album, Catalog, Song, SourceRef};

pub use playback::{PlaybackInfo, PlaybackTiming};

pub use types::UiState;

pub use app_model::AppModel;
