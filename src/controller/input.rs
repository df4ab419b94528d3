//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::AppController;

/// How far one scrub keypress moves the pending seek target.
const SEEK_STEP_MS: i64 = 5_000;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Scrub layer: arrow keys only move the pending target. The single
        // seek request goes out on Enter.
        if model.has_pending_seek().await {
            return match key.code {
                KeyCode::Left => {
                    model.adjust_pending_seek(-SEEK_STEP_MS).await;
                    Ok(())
                }
                KeyCode::Right => {
                    model.adjust_pending_seek(SEEK_STEP_MS).await;
                    Ok(())
                }
                KeyCode::Enter => {
                    drop(model);
                    self.commit_seek().await;
                    Ok(())
                }
                KeyCode::Esc => {
                    model.cancel_pending_seek().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Enter => {
                drop(model);
                self.activate_selection().await;
            }
            KeyCode::Esc | KeyCode::Backspace => {
                model.clear_album().await;
            }
            // Play/Pause toggle
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_play_pause().await;
            }
            // Next song
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                if let Err(e) = self.play_next().await {
                    tracing::debug!(error = %e, "Next unavailable");
                }
            }
            // Previous song
            KeyCode::Char('p') | KeyCode::Char('P') => {
                drop(model);
                if let Err(e) = self.play_previous().await {
                    tracing::debug!(error = %e, "Previous unavailable");
                }
            }
            // Start scrubbing from the current position
            KeyCode::Left => {
                model.begin_seek().await;
                model.adjust_pending_seek(-SEEK_STEP_MS).await;
            }
            KeyCode::Right => {
                model.begin_seek().await;
                model.adjust_pending_seek(SEEK_STEP_MS).await;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crossterm::event::{KeyCode, KeyEvent};
    use tokio::sync::Mutex;

    use crate::audio::{EngineCommand, EngineHandle, PlayerEvent, StatusUpdate};
    use crate::model::{AppModel, Catalog};

    use super::super::AppController;

    async fn playing_controller() -> (AppController, std::sync::mpsc::Receiver<EngineCommand>) {
        let (engine, cmd_rx) = EngineHandle::for_tests();
        let model = Arc::new(Mutex::new(AppModel::new(Arc::new(Catalog::builtin()))));
        let controller = AppController::new(model, engine);

        let song = {
            let model = controller.model.lock().await;
            model.catalog().song_by_id(1).unwrap().clone()
        };
        controller.play(song).await;
        controller
            .apply_player_event(PlayerEvent::Status(StatusUpdate {
                generation: 1,
                is_loaded: true,
                duration_ms: 60_000,
                position_ms: 0,
                // Paused keeps the interpolated position at exactly zero.
                is_playing: false,
            }))
            .await;
        let _ = cmd_rx.try_recv();
        (controller, cmd_rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[tokio::test]
    async fn a_scrub_gesture_issues_a_single_seek_on_enter() {
        let (controller, cmd_rx) = playing_controller().await;

        for _ in 0..3 {
            controller.handle_key_event(press(KeyCode::Right)).await.unwrap();
        }
        assert!(cmd_rx.try_recv().is_err());

        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();

        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(EngineCommand::Seek { position_ms: 15_000 })
        ));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn escape_abandons_a_scrub_without_seeking() {
        let (controller, cmd_rx) = playing_controller().await;

        controller.handle_key_event(press(KeyCode::Right)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();

        // Enter after the cancel re-activates the list, never seeks.
        assert!(!matches!(cmd_rx.try_recv(), Ok(EngineCommand::Seek { .. })));
    }

    #[tokio::test]
    async fn scrub_keys_do_nothing_before_a_song_is_loaded() {
        let (engine, cmd_rx) = EngineHandle::for_tests();
        let model = Arc::new(Mutex::new(AppModel::new(Arc::new(Catalog::builtin()))));
        let controller = AppController::new(model, engine);

        controller.handle_key_event(press(KeyCode::Right)).await.unwrap();
        let model = controller.model.lock().await;
        assert!(!model.has_pending_seek().await);
        drop(model);
        assert!(cmd_rx.try_recv().is_err());
    }
}
