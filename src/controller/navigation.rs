//! Album and song list navigation

use super::AppController;

impl AppController {
    /// Enter on a list row: open the album under the cursor, or play the song
    /// under the cursor. Opening and closing albums never touches playback.
    pub async fn activate_selection(&self) {
        let model = self.model.lock().await;

        if model.selected_album_index().await.is_none() {
            if let Some(index) = model.album_under_cursor().await {
                model.select_album(index).await;
                tracing::debug!(index, "Album opened");
            }
            return;
        }

        let song = model.song_under_cursor().await;
        drop(model);
        if let Some(song) = song {
            self.play(song).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use crate::audio::{EngineCommand, EngineHandle};
    use crate::model::{AppModel, Catalog};

    use super::super::AppController;

    #[tokio::test]
    async fn activation_opens_albums_then_plays_songs() {
        let (engine, cmd_rx) = EngineHandle::for_tests();
        let model = Arc::new(Mutex::new(AppModel::new(Arc::new(Catalog::builtin()))));
        let controller = AppController::new(model, engine);

        // Album grid: Enter opens the album under the cursor, no playback.
        controller.activate_selection().await;
        {
            let model = controller.model.lock().await;
            assert_eq!(model.selected_album_index().await, Some(0));
            assert!(model.current_song().await.is_none());
        }
        assert!(cmd_rx.try_recv().is_err());

        // Song grid: Enter plays the song under the cursor.
        controller.activate_selection().await;
        {
            let model = controller.model.lock().await;
            assert_eq!(model.current_song().await.map(|s| s.id), Some(1));
        }
        assert!(matches!(cmd_rx.try_recv(), Ok(EngineCommand::Load { .. })));
    }
}
