//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and manages playback operations.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Playback control methods
//! - `navigation`: Album/song list navigation
//! - `player_events`: Audio engine event listener

mod input;
mod navigation;
mod playback;
mod player_events;

pub use playback::AdvanceError;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::audio::EngineHandle;
use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) engine: EngineHandle,
    /// Identity of the active playback resource. Engine events carrying any
    /// other generation are stale and get discarded.
    generation: Arc<AtomicU64>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, engine: EngineHandle) -> Self {
        Self {
            model,
            engine,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Generation of the most recent load; 0 before the first one.
    pub(crate) fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub(crate) fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}
