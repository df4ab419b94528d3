//! Rodio-backed playback engine.
//!
//! The audio output stream is thread-bound, so the engine runs on its own OS
//! thread: commands arrive over a channel, status reports and errors flow back
//! over another. The controller never touches the sink directly.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::model::SourceRef;

/// Cadence of unsolicited status reports.
const STATUS_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub enum EngineCommand {
    Load {
        source: SourceRef,
        generation: u64,
        autoplay: bool,
    },
    Pause,
    Resume,
    Seek {
        position_ms: u64,
    },
    Shutdown,
}

/// An asynchronous report describing the resource identified by `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub generation: u64,
    pub is_loaded: bool,
    pub duration_ms: u64,
    pub position_ms: u64,
    pub is_playing: bool,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Status(StatusUpdate),
    Finished { generation: u64 },
    /// Generation 0 marks an engine-level failure with no load in flight.
    Error { generation: u64, message: String },
}

/// Clonable handle for issuing commands to the engine thread.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: Sender<EngineCommand>,
}

impl EngineHandle {
    /// Fire-and-forget. If the engine thread has exited (no output device),
    /// commands go nowhere.
    pub fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }

    #[cfg(test)]
    pub fn for_tests() -> (Self, Receiver<EngineCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        (Self { cmd_tx }, cmd_rx)
    }
}

/// Start the engine thread and hand back its command and event endpoints.
pub fn spawn_engine() -> (EngineHandle, UnboundedReceiver<PlayerEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();

    thread::spawn(move || engine_thread(cmd_rx, event_tx));

    (EngineHandle { cmd_tx }, event_rx)
}

fn engine_thread(cmd_rx: Receiver<EngineCommand>, event_tx: UnboundedSender<PlayerEvent>) {
    // Must be created on the thread that keeps it alive.
    let (_stream, stream_handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "No audio output device available");
            let _ = event_tx.send(PlayerEvent::Error {
                generation: 0,
                message: format!("Audio output unavailable: {e}"),
            });
            return;
        }
    };

    let mut engine = Engine {
        stream_handle,
        sink: None,
        generation: 0,
        duration_ms: 0,
        finished_sent: false,
        event_tx,
    };

    tracing::info!("Audio engine ready");

    loop {
        match cmd_rx.recv_timeout(STATUS_INTERVAL) {
            Ok(EngineCommand::Shutdown) => break,
            Ok(command) => engine.handle_command(command),
            Err(RecvTimeoutError::Timeout) => engine.tick(),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::info!("Audio engine shutting down");
}

struct Engine {
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
    generation: u64,
    duration_ms: u64,
    finished_sent: bool,
    event_tx: UnboundedSender<PlayerEvent>,
}

impl Engine {
    fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Load {
                source,
                generation,
                autoplay,
            } => self.load(source, generation, autoplay),
            EngineCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.emit_status();
                }
            }
            EngineCommand::Resume => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    self.emit_status();
                }
            }
            EngineCommand::Seek { position_ms } => {
                if let Some(sink) = &self.sink {
                    if let Err(e) = sink.try_seek(Duration::from_millis(position_ms)) {
                        tracing::warn!(position_ms, error = %e, "Seek rejected by decoder");
                    }
                    self.emit_status();
                }
            }
            EngineCommand::Shutdown => {}
        }
    }

    /// Release first, then load: at most one sink is ever alive.
    fn load(&mut self, source: SourceRef, generation: u64, autoplay: bool) {
        self.release();
        self.generation = generation;

        match self.open_sink(&source) {
            Ok((sink, duration_ms)) => {
                if !autoplay {
                    sink.pause();
                }
                self.duration_ms = duration_ms;
                self.finished_sent = false;
                self.sink = Some(sink);
                tracing::debug!(generation, duration_ms, "Source loaded");
                self.emit_status();
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Failed to load source");
                let _ = self.event_tx.send(PlayerEvent::Error {
                    generation,
                    message: format!("{e:#}"),
                });
            }
        }
    }

    fn open_sink(&self, source: &SourceRef) -> Result<(Sink, u64)> {
        let sink = Sink::try_new(&self.stream_handle).context("creating audio sink")?;

        let duration = match source {
            SourceRef::Bundled(path) => {
                let file = File::open(path).with_context(|| format!("opening {path}"))?;
                let decoder =
                    Decoder::new(BufReader::new(file)).with_context(|| format!("decoding {path}"))?;
                let duration = decoder.total_duration();
                sink.append(decoder);
                duration
            }
            SourceRef::Remote(url) => {
                let response = reqwest::blocking::get(url)
                    .and_then(|r| r.error_for_status())
                    .with_context(|| format!("fetching {url}"))?;
                let bytes = response.bytes().context("reading audio body")?;
                let decoder = Decoder::new(Cursor::new(bytes.to_vec()))
                    .with_context(|| format!("decoding {url}"))?;
                let duration = decoder.total_duration();
                sink.append(decoder);
                duration
            }
        };

        Ok((sink, duration.map(|d| d.as_millis() as u64).unwrap_or(0)))
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.duration_ms = 0;
        self.finished_sent = false;
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else { return };

        if sink.empty() && !self.finished_sent {
            self.finished_sent = true;
            let _ = self.event_tx.send(PlayerEvent::Finished {
                generation: self.generation,
            });
        }
        self.emit_status();
    }

    fn emit_status(&self) {
        let Some(sink) = &self.sink else { return };

        let mut position_ms = sink.get_pos().as_millis() as u64;
        if self.duration_ms > 0 {
            position_ms = position_ms.min(self.duration_ms);
        }

        let _ = self.event_tx.send(PlayerEvent::Status(StatusUpdate {
            generation: self.generation,
            is_loaded: true,
            duration_ms: self.duration_ms,
            position_ms,
            is_playing: !sink.is_paused() && !sink.empty(),
        }));
    }
}
