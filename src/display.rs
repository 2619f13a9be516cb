//! Score readout and its hand-off to the UI context
//!
//! Contact and tap handlers run on the frame/physics context. They post the
//! new readout through a channel and return; the UI side drains it when it
//! next draws, so a label refresh never stalls a physics callback.

use std::fmt;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

/// Text shown in the score label, rendered as "`<made> / <thrown>`"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReadout {
    pub made: u32,
    pub thrown: u32,
}

impl fmt::Display for ScoreReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.made, self.thrown)
    }
}

/// Receiver of score refreshes
pub trait ScoreDisplay {
    /// Queue a new readout; must not block
    fn post(&self, readout: ScoreReadout);
}

/// Producer half, owned by the session controller
#[derive(Debug, Clone)]
pub struct ScoreChannel {
    sender: mpsc::Sender<ScoreReadout>,
}

impl ScoreChannel {
    /// Create a connected channel/label pair
    pub fn new() -> (Self, ScoreLabel) {
        let (sender, receiver) = mpsc::channel();
        (
            Self { sender },
            ScoreLabel {
                receiver,
                text: ScoreReadout::default().to_string(),
                refreshes: 0,
            },
        )
    }
}

impl ScoreDisplay for ScoreChannel {
    fn post(&self, readout: ScoreReadout) {
        // Label dropped means the UI is gone; nothing left to refresh
        if self.sender.send(readout).is_err() {
            log::trace!("score label gone, dropping {}", readout);
        }
    }
}

/// Consumer half, owned by the UI context
#[derive(Debug)]
pub struct ScoreLabel {
    receiver: mpsc::Receiver<ScoreReadout>,
    text: String,
    refreshes: u64,
}

impl ScoreLabel {
    /// Apply every queued readout, keeping the newest; returns true if the text changed
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        while let Ok(readout) = self.receiver.try_recv() {
            let text = readout.to_string();
            if text != self.text {
                self.text = text;
                changed = true;
            }
            self.refreshes += 1;
        }
        changed
    }

    /// Current label text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Total readouts applied
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}
