//! Pre-recorded input, delivered on a timeline.

use super::{Input, InputSource};
use anyhow::Result;
use std::collections::VecDeque;
use tokio::time::{sleep_until, Duration, Instant};

/// Replays inputs, each at a fixed offset from creation.
///
/// Used for demos and tests; with a paused tokio clock the timeline is
/// deterministic.
pub struct ScriptedHuman {
    start: Instant,
    script: VecDeque<(Duration, Input)>,
}

impl ScriptedHuman {
    /// Creates a script of `(offset, input)` pairs in delivery order.
    pub fn new(script: impl IntoIterator<Item = (Duration, Input)>) -> Self {
        Self {
            start: Instant::now(),
            script: script.into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl InputSource for ScriptedHuman {
    async fn next_input(&mut self) -> Result<Option<Input>> {
        let Some(offset) = self.script.front().map(|(offset, _)| *offset) else {
            return Ok(None);
        };
        // Wait before popping so a dropped future loses nothing.
        sleep_until(self.start + offset).await;
        Ok(self.script.pop_front().map(|(_, input)| input))
    }
}
