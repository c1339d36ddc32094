//! Tracing initialization and command span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Map the `-v` count to a default filter directive.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize `tracing` on stderr; `RUST_LOG` wins over the verbosity flag.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span recording start and finish of one command invocation.
pub struct CommandSpan {
    span: Span,
    started_at: Instant,
    command: &'static str,
}

impl CommandSpan {
    pub fn start(command: &'static str) -> Self {
        let span = info_span!(target: "descarga_masiva::command", "command", command);
        Self {
            span,
            started_at: Instant::now(),
            command,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording the outcome.
    pub fn finish(self, status: &'static str) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "descarga_masiva::command",
            command = self.command,
            status = status,
            elapsed_ms = elapsed_ms,
            "Completed command"
        );
    }
}
