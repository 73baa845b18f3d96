//! Audio-cue stand-in: prints cues (with a terminal bell) unless muted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use kumite_core::SinkError;
use kumite_core::domain::EventRecord;
use kumite_core::ports::EventSink;
use tracing::debug;

use crate::render;

/// Shared mute switch between the input loop and the sink.
#[derive(Debug, Clone)]
pub struct SoundSwitch(Arc<AtomicBool>);

impl SoundSwitch {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Flips the switch and returns the new setting.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::Relaxed)
    }
}

pub struct ConsoleCueSink {
    sound: SoundSwitch,
}

impl ConsoleCueSink {
    pub fn new(sound: SoundSwitch) -> Self {
        Self { sound }
    }
}

#[async_trait]
impl EventSink for ConsoleCueSink {
    async fn emit(&self, record: EventRecord) -> Result<(), SinkError> {
        if !self.sound.is_enabled() {
            debug!(match_id = %record.match_id, event = ?record.event, "cue muted");
            return Ok(());
        }
        println!("\x07>> {}", render::cue(&record));
        Ok(())
    }
}
