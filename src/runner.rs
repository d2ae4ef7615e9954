//! Command stream driver
//!
//! Reads lines from any async buffered reader, feeds them to a
//! `CommandRouter` and writes one rendered outcome per line.

use crate::command::{CommandKind, CommandRouter, Failure, FailureKind, Outcome};
use crate::config::{OutputFormat, RunConfig};
use crate::error::{Error, Result};
use crate::lot::LotStats;
use serde::Serialize;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

const MISSING_CREATE: &str = "Command to create parking lot is missing in input file";

/// Totals for one processed stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Lines read, blank ones included
    pub lines: usize,
    /// Lines that produced a failure outcome
    pub failures: usize,
    /// Processing ended before the input did
    pub stopped_early: bool,
    /// Final lot state, if one was created
    pub stats: Option<LotStats>,
}

/// Drive `router` with every line of `reader`, writing outcomes to `writer`
pub async fn run<R, W>(
    reader: R,
    writer: &mut W,
    router: &mut CommandRouter,
    config: &RunConfig,
) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = RunSummary::default();
    let mut seen_command = false;

    while let Some(line) = lines.next_line().await? {
        summary.lines += 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        // Blank lines go to the router but never count as the first command
        if !seen_command && !tokens.is_empty() {
            seen_command = true;
            let first = tokens.first().copied();
            if config.require_create_first
                && first != Some(CommandKind::CreateParkingLot.keyword())
            {
                warn!(first = ?first, "Stream does not start with a create command");
                let failure = Failure {
                    command: first.and_then(CommandKind::from_keyword),
                    kind: FailureKind::NotCreated,
                    message: MISSING_CREATE.to_string(),
                    detail: Error::NotCreated.to_string(),
                };
                emit(writer, &Outcome::Failed(failure), config.output).await?;
                summary.failures += 1;
                summary.stopped_early = true;
                break;
            }
        }

        let outcome = router.dispatch(&tokens);
        emit(writer, &outcome, config.output).await?;

        if outcome.is_failure() {
            summary.failures += 1;
            if config.stop_on_error {
                debug!(line = summary.lines, "Stopping at first failure");
                summary.stopped_early = true;
                break;
            }
        }
    }

    writer.flush().await?;
    summary.stats = router.stats();
    info!(
        lines = summary.lines,
        failures = summary.failures,
        stopped_early = summary.stopped_early,
        "Command stream processed"
    );
    Ok(summary)
}

/// Run the commands in the file at `path`
pub async fn run_file<W>(
    path: &Path,
    writer: &mut W,
    router: &mut CommandRouter,
    config: &RunConfig,
) -> Result<RunSummary>
where
    W: AsyncWrite + Unpin,
{
    let file = tokio::fs::File::open(path).await.map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Input file {} not found: {}", path.display(), e),
        ))
    })?;
    info!(path = %path.display(), "Reading commands from file");
    run(BufReader::new(file), writer, router, config).await
}

async fn emit<W>(writer: &mut W, outcome: &Outcome, format: OutputFormat) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut rendered = match format {
        OutputFormat::Text => outcome.to_string(),
        OutputFormat::Json => outcome.to_json()?,
    };
    rendered.push('\n');
    writer.write_all(rendered.as_bytes()).await?;
    Ok(())
}
