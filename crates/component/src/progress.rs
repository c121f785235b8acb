use async_channel::{Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressLevel {
    /// Routine progress.
    Info,
    /// Something degraded but the scan continues.
    Warn,
    /// Something failed; the scan may still produce partial results.
    Error,
}

/// One advisory progress event.
///
/// Advisory only: observers use it for live display, never for
/// correctness. Events may be dropped under pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Human-readable progress message.
    pub message: String,
    /// Severity.
    pub level: ProgressLevel,
    /// Optional structured payload (counts, current target, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProgressUpdate {
    /// An info-level event.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ProgressLevel::Info,
            data: None,
        }
    }

    /// A warn-level event.
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ProgressLevel::Warn,
            data: None,
        }
    }

    /// An error-level event.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ProgressLevel::Error,
            data: None,
        }
    }

    /// Attach a structured payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Bounded, non-blocking progress queue.
///
/// [`emit`](Self::emit) never blocks and never fails: when the queue is
/// full the **oldest** buffered event is dropped in favor of the new one,
/// so a slow or absent observer can never stall a scan.
#[derive(Clone)]
pub struct ProgressEmitter {
    tx: Sender<ProgressUpdate>,
    rx: Receiver<ProgressUpdate>,
}

impl ProgressEmitter {
    /// Default queue capacity.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create an emitter with the given queue capacity (floored at 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = async_channel::bounded(capacity.max(1));
        Self { tx, rx }
    }

    /// A receiver for the observer side.
    ///
    /// One consumer is expected; the emitter keeps its own receiver handle
    /// purely to implement drop-oldest.
    pub fn subscribe(&self) -> Receiver<ProgressUpdate> {
        self.rx.clone()
    }

    /// Emit an event. Fire-and-forget.
    pub fn emit(&self, update: ProgressUpdate) {
        if let Err(TrySendError::Full(update)) = self.tx.try_send(update) {
            // Advisory queue is full: age out the oldest event. If another
            // producer raced us into the freed slot, the new event is
            // dropped instead — either way nobody blocks.
            let _ = self.rx.try_recv();
            let _ = self.tx.try_send(update);
        }
    }

    /// Number of buffered, unconsumed events.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Default for ProgressEmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for ProgressEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressEmitter")
            .field("capacity", &self.tx.capacity())
            .field("pending", &self.rx.len())
            .finish()
    }
}
