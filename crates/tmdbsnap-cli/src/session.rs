//! Interactive prompt loop.
//!
//! Reads choices line by line and drives one capture per accepted
//! reference. Prompts and validation messages go to the output stream;
//! capture results are reported through `tracing`.

use std::num::NonZeroU64;

use anyhow::{Context, Result};
use tmdbsnap_api::tmdb::LocalMetadataGateway;
use tmdbsnap_snapshot::{MediaKind, MediaReference, SnapshotOrchestrator};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::instrument;

use crate::report::report_outcome;

/// Kind menu shown before every capture.
const KIND_MENU: &str = "\nSelect media type:\n  1. Movie\n  2. TV Show\n  q. Quit\nChoice: ";

/// Answer to the kind menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindChoice {
    /// Capture this kind next.
    Kind(MediaKind),
    /// End the session.
    Quit,
}

/// Answer to the ID prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdChoice {
    /// A usable identifier.
    Id(NonZeroU64),
    /// End the session.
    Quit,
    /// Rejected input with the message to show before re-prompting.
    Invalid(&'static str),
}

/// Parses a kind menu answer. Returns `None` for anything unrecognized.
pub fn parse_kind_choice(input: &str) -> Option<KindChoice> {
    match input.trim() {
        "1" => Some(KindChoice::Kind(MediaKind::Movie)),
        "2" => Some(KindChoice::Kind(MediaKind::Tv)),
        q if q.eq_ignore_ascii_case("q") => Some(KindChoice::Quit),
        other => other.parse().ok().map(KindChoice::Kind),
    }
}

/// Parses an ID prompt answer.
pub fn parse_id_choice(input: &str) -> IdChoice {
    let input = input.trim();
    if input.is_empty() {
        return IdChoice::Invalid("ID cannot be empty");
    }
    if input.eq_ignore_ascii_case("q") {
        return IdChoice::Quit;
    }
    let Ok(value) = input.parse::<i128>() else {
        return IdChoice::Invalid("ID must be a number");
    };
    if value <= 0 {
        return IdChoice::Invalid("ID must be a positive integer");
    }
    u64::try_from(value)
        .ok()
        .and_then(NonZeroU64::new)
        .map_or(IdChoice::Invalid("ID is out of range"), IdChoice::Id)
}

/// Returns `true` for `y` / `yes` in any case.
pub fn is_yes(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("y") || input.eq_ignore_ascii_case("yes")
}

/// Prompt loop over an input and output stream.
pub struct Session<'a, G, R, W> {
    /// Capture engine shared across the whole session.
    orchestrator: &'a SnapshotOrchestrator<G>,
    /// Operator answers, one per line.
    input: R,
    /// Prompts and validation messages.
    output: W,
}

impl<'a, G, R, W> Session<'a, G, R, W>
where
    G: LocalMetadataGateway,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a session.
    pub const fn new(orchestrator: &'a SnapshotOrchestrator<G>, input: R, output: W) -> Self {
        Self {
            orchestrator,
            input,
            output,
        }
    }

    /// Runs until the operator quits, declines to continue, or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    /// Capture failures are reported and offered for retry.
    #[instrument(skip_all)]
    pub async fn run(&mut self) -> Result<()> {
        let banner = format!(
            "TMDB snapshot capture\nSnapshots are written to: {}\n",
            self.orchestrator.root().display()
        );
        self.write(&banner).await?;

        'session: loop {
            let Some(kind) = self.read_kind().await? else {
                break;
            };
            let Some(id) = self.read_id(kind).await? else {
                break;
            };
            let reference = MediaReference::new(kind, id);

            loop {
                match self.orchestrator.capture(&reference).await {
                    Ok(outcome) => {
                        report_outcome(&outcome);
                        match self.prompt("\nContinue? (y/n): ").await? {
                            Some(answer) if is_yes(&answer) => continue 'session,
                            _ => break 'session,
                        }
                    }
                    Err(err) => {
                        tracing::error!("{:#}", anyhow::Error::new(err));
                        match self.prompt("Retry? (y/n): ").await? {
                            Some(answer) if is_yes(&answer) => {}
                            Some(_) => continue 'session,
                            None => break 'session,
                        }
                    }
                }
            }
        }

        self.write("Bye\n").await
    }

    /// Asks for a media kind until a valid answer arrives.
    /// `None` means quit or end of input.
    async fn read_kind(&mut self) -> Result<Option<MediaKind>> {
        loop {
            let Some(answer) = self.prompt(KIND_MENU).await? else {
                return Ok(None);
            };
            match parse_kind_choice(&answer) {
                Some(KindChoice::Kind(kind)) => return Ok(Some(kind)),
                Some(KindChoice::Quit) => return Ok(None),
                None => self.write("Invalid choice, enter 1, 2 or q\n").await?,
            }
        }
    }

    /// Asks for an identifier until a valid answer arrives.
    /// `None` means quit or end of input.
    async fn read_id(&mut self, kind: MediaKind) -> Result<Option<NonZeroU64>> {
        let question = format!("Enter {} ID (q to quit): ", kind.label());
        loop {
            let Some(answer) = self.prompt(&question).await? else {
                return Ok(None);
            };
            match parse_id_choice(&answer) {
                IdChoice::Id(id) => return Ok(Some(id)),
                IdChoice::Quit => return Ok(None),
                IdChoice::Invalid(message) => self.write(&format!("{message}\n")).await?,
            }
        }
    }

    /// Writes `question` and reads one line. `None` on end of input.
    async fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        self.write(question).await?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .await
            .context("failed to write output")?;
        self.output.flush().await.context("failed to flush output")
    }
}
