//! Playback-related types and state management

use std::time::Instant;

use super::catalog::Song;

/// Internal timing state for smooth progress updates between status reports
#[derive(Clone)]
pub struct PlaybackTiming {
    pub position_ms: u64,
    pub last_update: Instant,
    pub is_playing: bool,
    pub duration_ms: u64,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_ms: 0,
            last_update: Instant::now(),
            is_playing: false,
            duration_ms: 0,
        }
    }
}

impl PlaybackTiming {
    /// Position as of now, interpolated from the last engine report.
    /// Never exceeds the duration once the duration is known.
    pub fn current_position_ms(&self) -> u64 {
        let position = if self.is_playing {
            let elapsed = self.last_update.elapsed().as_millis() as u64;
            self.position_ms.saturating_add(elapsed)
        } else {
            self.position_ms
        };

        if self.duration_ms > 0 {
            position.min(self.duration_ms)
        } else {
            position
        }
    }

    pub fn apply_status(&mut self, position_ms: u64, duration_ms: u64, is_playing: bool) {
        self.position_ms = position_ms;
        self.duration_ms = duration_ms;
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    pub fn set_playing(&mut self, is_playing: bool) {
        self.position_ms = self.current_position_ms();
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    /// Back to the pre-first-report state: position and duration both zero.
    pub fn reset_for_load(&mut self) {
        self.position_ms = 0;
        self.duration_ms = 0;
        self.is_playing = false;
        self.last_update = Instant::now();
    }
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub song: Option<Song>,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub is_playing: bool,
    pub pending_seek_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn position_is_zero_before_first_report() {
        let timing = PlaybackTiming::default();
        assert_eq!(timing.current_position_ms(), 0);
        assert_eq!(timing.duration_ms, 0);
    }

    #[test]
    fn paused_position_does_not_advance() {
        let mut timing = PlaybackTiming::default();
        timing.apply_status(12_000, 60_000, false);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(timing.current_position_ms(), 12_000);
    }

    #[test]
    fn interpolated_position_is_clamped_to_duration() {
        let mut timing = PlaybackTiming::default();
        timing.apply_status(59_990, 60_000, true);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(timing.current_position_ms(), 60_000);
    }

    #[test]
    fn reset_for_load_clears_position_and_duration() {
        let mut timing = PlaybackTiming::default();
        timing.apply_status(5_000, 60_000, true);
        timing.reset_for_load();
        assert_eq!(timing.current_position_ms(), 0);
        assert_eq!(timing.duration_ms, 0);
        assert!(!timing.is_playing);
    }
}
