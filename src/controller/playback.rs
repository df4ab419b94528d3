//! Playback control methods

use thiserror::Error;

use crate::audio::EngineCommand;
use crate::model::Song;

use super::AppController;

/// Why `play_next`/`play_previous` could not advance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvanceError {
    #[error("no album is selected")]
    NoAlbumSelected,

    #[error("no song is playing")]
    NothingPlaying,

    #[error("the current song is not in the selected album")]
    SongNotInAlbum,
}

impl AppController {
    /// Load and start a song. The displayed "now playing" metadata updates
    /// before the engine has finished loading.
    pub async fn play(&self, song: Song) {
        let generation = self.next_generation();
        tracing::info!(song = %song.title, generation, "Loading song");

        let model = self.model.lock().await;
        model.set_current_song(song.clone()).await;
        model.begin_load().await;
        drop(model);

        self.engine.send(EngineCommand::Load {
            source: song.source.clone(),
            generation,
            autoplay: true,
        });
    }

    /// No-op until a song has been loaded; otherwise issues the command
    /// complementary to the last reported playing state.
    pub async fn toggle_play_pause(&self) {
        let model = self.model.lock().await;
        if model.current_song().await.is_none() {
            return;
        }
        let is_playing = model.is_playing().await;
        drop(model);

        tracing::debug!(is_playing, "Toggling playback");
        if is_playing {
            self.engine.send(EngineCommand::Pause);
        } else {
            self.engine.send(EngineCommand::Resume);
        }
    }

    /// No-op while nothing is loaded or the duration is still unknown.
    pub async fn seek(&self, target_ms: u64) {
        let model = self.model.lock().await;
        if model.current_song().await.is_none() {
            return;
        }
        let duration_ms = model.duration_ms().await;
        if duration_ms == 0 {
            return;
        }
        drop(model);

        let position_ms = target_ms.min(duration_ms);
        tracing::debug!(position_ms, "Seeking");
        self.engine.send(EngineCommand::Seek { position_ms });
    }

    /// Finish a scrub gesture: one seek for the final target, nothing for the
    /// intermediate positions.
    pub async fn commit_seek(&self) {
        let target = {
            let model = self.model.lock().await;
            model.take_pending_seek().await
        };
        if let Some(target_ms) = target {
            self.seek(target_ms).await;
        }
    }

    pub async fn play_next(&self) -> Result<(), AdvanceError> {
        self.advance(1).await
    }

    pub async fn play_previous(&self) -> Result<(), AdvanceError> {
        self.advance(-1).await
    }

    /// Step through the selected album's song list with wraparound.
    async fn advance(&self, step: i64) -> Result<(), AdvanceError> {
        let song = {
            let model = self.model.lock().await;
            let album = model
                .selected_album()
                .await
                .ok_or(AdvanceError::NoAlbumSelected)?;
            let current = model
                .current_song()
                .await
                .ok_or(AdvanceError::NothingPlaying)?;

            let index = album
                .songs
                .iter()
                .position(|s| s.id == current.id)
                .ok_or(AdvanceError::SongNotInAlbum)?;

            let len = album.songs.len() as i64;
            let next = (index as i64 + step).rem_euclid(len) as usize;
            album.songs[next].clone()
        };

        self.play(song).await;
        Ok(())
    }
}
