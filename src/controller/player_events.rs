//! Audio engine event listener

use tokio::sync::mpsc::UnboundedReceiver;

use crate::audio::PlayerEvent;

use super::AppController;

impl AppController {
    /// Drain engine events for the lifetime of the app. The engine pushes at
    /// its own cadence; nothing here polls it.
    pub fn start_player_event_listener(&self, mut events: UnboundedReceiver<PlayerEvent>) {
        let controller = self.clone();
        tracing::info!("Starting audio engine event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let should_quit = {
                    let model = controller.model.lock().await;
                    model.should_quit().await
                };
                if should_quit {
                    tracing::debug!("Player event listener shutting down");
                    break;
                }

                controller.apply_player_event(event).await;
            }
        });
    }

    /// Sole writer of position/duration. Events from a superseded resource
    /// (generation mismatch) are discarded so a stale report cannot corrupt
    /// what the player bar shows for the replacement song.
    pub(crate) async fn apply_player_event(&self, event: PlayerEvent) {
        let current = self.current_generation();

        match event {
            PlayerEvent::Status(status) => {
                if status.generation != current {
                    tracing::trace!(
                        stale = status.generation,
                        current,
                        "Discarding status from superseded resource"
                    );
                    return;
                }
                if !status.is_loaded {
                    return;
                }
                tracing::trace!(
                    position_ms = status.position_ms,
                    duration_ms = status.duration_ms,
                    is_playing = status.is_playing,
                    "Status update"
                );
                let model = self.model.lock().await;
                model
                    .apply_status(status.position_ms, status.duration_ms, status.is_playing)
                    .await;
            }
            PlayerEvent::Finished { generation } => {
                if generation != current {
                    return;
                }
                tracing::debug!(generation, "Track finished");
                let model = self.model.lock().await;
                model.set_playing(false).await;
            }
            PlayerEvent::Error {
                generation,
                message,
            } => {
                // Generation 0 is an engine-level failure, tied to no load.
                if generation != current && generation != 0 {
                    tracing::debug!(generation, current, %message, "Ignoring error from superseded load");
                    return;
                }
                tracing::error!(generation, %message, "Audio engine error");
                let model = self.model.lock().await;
                model.set_error(message).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use crate::audio::{EngineHandle, PlayerEvent, StatusUpdate};
    use crate::model::{AppModel, Catalog};

    use super::super::AppController;

    fn controller() -> AppController {
        let (engine, _cmd_rx) = EngineHandle::for_tests();
        let model = Arc::new(Mutex::new(AppModel::new(Arc::new(Catalog::builtin()))));
        AppController::new(model, engine)
    }

    fn status(generation: u64, position_ms: u64, duration_ms: u64) -> PlayerEvent {
        PlayerEvent::Status(StatusUpdate {
            generation,
            is_loaded: true,
            duration_ms,
            position_ms,
            is_playing: true,
        })
    }

    #[tokio::test]
    async fn stale_status_reports_are_discarded() {
        let controller = controller();
        let song1 = {
            let model = controller.model.lock().await;
            model.catalog().song_by_id(1).unwrap().clone()
        };
        controller.play(song1).await;
        let song2 = {
            let model = controller.model.lock().await;
            model.catalog().song_by_id(2).unwrap().clone()
        };
        controller.play(song2).await;

        // A late report from the first, superseded resource.
        controller.apply_player_event(status(1, 99_000, 180_000)).await;

        let model = controller.model.lock().await;
        let info = model.get_playback_info().await;
        assert_eq!(info.position_ms, 0);
        assert_eq!(info.duration_ms, 0);
    }

    #[tokio::test]
    async fn matching_status_reports_update_timing() {
        let controller = controller();
        let song = {
            let model = controller.model.lock().await;
            model.catalog().song_by_id(1).unwrap().clone()
        };
        controller.play(song).await;

        controller.apply_player_event(status(1, 4_000, 180_000)).await;

        let model = controller.model.lock().await;
        let info = model.get_playback_info().await;
        assert!(info.position_ms >= 4_000);
        assert_eq!(info.duration_ms, 180_000);
        assert!(info.is_playing);
    }

    #[tokio::test]
    async fn engine_errors_surface_unless_superseded() {
        let controller = controller();

        // Init failure, before any load.
        controller
            .apply_player_event(PlayerEvent::Error {
                generation: 0,
                message: "no device".to_string(),
            })
            .await;
        {
            let model = controller.model.lock().await;
            assert!(model.has_error().await);
            model.clear_error().await;
        }

        let song = {
            let model = controller.model.lock().await;
            model.catalog().song_by_id(1).unwrap().clone()
        };
        controller.play(song.clone()).await;
        controller.play(song).await;

        // A failure from the superseded load stays quiet.
        controller
            .apply_player_event(PlayerEvent::Error {
                generation: 1,
                message: "unreachable url".to_string(),
            })
            .await;
        let model = controller.model.lock().await;
        assert!(!model.has_error().await);
    }

    #[tokio::test]
    async fn finish_event_only_clears_the_playing_flag() {
        let controller = controller();
        let song = {
            let model = controller.model.lock().await;
            model.catalog().song_by_id(1).unwrap().clone()
        };
        controller.play(song).await;
        controller.apply_player_event(status(1, 10_000, 10_000)).await;

        controller
            .apply_player_event(PlayerEvent::Finished { generation: 1 })
            .await;

        let model = controller.model.lock().await;
        assert!(!model.is_playing().await);
        // The song stays current: no auto-advance at end of track.
        assert!(model.current_song().await.is_some());
    }
}
