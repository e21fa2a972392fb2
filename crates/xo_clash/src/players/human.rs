//! Human player reading commands from stdin.

use super::{Input, InputSource};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

/// Human at the terminal.
pub struct StdinHuman {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinHuman {
    /// Creates a reader over the process's stdin.
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinHuman {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InputSource for StdinHuman {
    async fn next_input(&mut self) -> Result<Option<Input>> {
        loop {
            let Some(line) = self.lines.next_line().await.context("Failed to read stdin")? else {
                debug!("Stdin closed");
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            return Ok(Some(Input::parse(&line)));
        }
    }
}
