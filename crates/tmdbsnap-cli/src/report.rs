//! Operator-facing summary of a capture outcome.

use tmdbsnap_snapshot::{CaptureOutcome, removal_hint};

/// Logs the result of one capture.
///
/// Shared by the prompt loop and the one-shot `capture` subcommand.
pub fn report_outcome(outcome: &CaptureOutcome) {
    match outcome {
        CaptureOutcome::Captured(report) => {
            tracing::info!("{} data captured", report.reference.kind.label());
            tracing::info!("  Title: {}", report.title);
            tracing::info!("  Directory: {}", report.path.display());
        }
        CaptureOutcome::AlreadyCaptured { reference, path } => {
            tracing::warn!("{reference} has already been captured");
            tracing::warn!("Directory already exists: {}", path.display());
            tracing::warn!("To capture it again, remove the directory first:");
            tracing::warn!("  {}", removal_hint(path));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::num::NonZeroU64;
    use std::path::PathBuf;

    use tmdbsnap_snapshot::{CaptureReport, MediaKind, MediaReference};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn reference(kind: MediaKind, id: u64) -> MediaReference {
        MediaReference::new(kind, NonZeroU64::new(id).unwrap())
    }

    #[test]
    fn test_report_captured() {
        // Arrange
        let outcome = CaptureOutcome::Captured(CaptureReport {
            reference: reference(MediaKind::Movie, 550),
            title: String::from("搏击俱乐部"),
            path: PathBuf::from("/data/movie/550"),
            files: vec![
                PathBuf::from("/data/movie/550/details.json"),
                PathBuf::from("/data/movie/550/release_dates.json"),
            ],
        });
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("Movie data captured")))
            .event(expect::event().with_fields(expect::msg("  Title: 搏击俱乐部")))
            .event(expect::event().with_fields(expect::msg("  Directory: /data/movie/550")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || report_outcome(&outcome));

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_report_already_captured() {
        // Arrange
        let path = PathBuf::from("/data/tv/1399");
        let outcome = CaptureOutcome::AlreadyCaptured {
            reference: reference(MediaKind::Tv, 1399),
            path: path.clone(),
        };
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .at_level(Level::WARN)
                    .with_fields(expect::msg("tv/1399 has already been captured")),
            )
            .event(
                expect::event()
                    .at_level(Level::WARN)
                    .with_fields(expect::msg("Directory already exists: /data/tv/1399")),
            )
            .event(expect::event().at_level(Level::WARN))
            .event(
                expect::event()
                    .at_level(Level::WARN)
                    .with_fields(expect::msg(format!("  {}", removal_hint(&path)))),
            )
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || report_outcome(&outcome));

        // Assert
        handle.assert_finished();
    }
}
