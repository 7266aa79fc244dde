//! Consumer control loop: fetch, draw, commit, sleep, repeat.

use rand::Rng;
use std::time::Duration;

use eink_quant::render::{DisplaySurface, FrameRenderer, RenderReport};
use eink_quant::wire::{FrameFormat, WireError};

use crate::error::FetchError;
use crate::models::ClientConfig;
use crate::services::Transport;

/// How one refresh cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every pixel position received a byte. Excess bytes may have been
    /// dropped; see [`RenderReport::ignored_bytes`].
    Success(RenderReport),
    /// The stream ended early. The surface was still committed.
    Partial(RenderReport),
    /// The artifact could not be produced from its source.
    InputError(String),
    /// Fetching failed. `report` is set when drawing had already started.
    TransportError {
        error: String,
        report: Option<RenderReport>,
    },
}

impl CycleOutcome {
    /// Success or Partial: the panel shows a new frame.
    pub fn is_rendered(&self) -> bool {
        matches!(self, CycleOutcome::Success(_) | CycleOutcome::Partial(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Success(_))
    }

    pub fn report(&self) -> Option<&RenderReport> {
        match self {
            CycleOutcome::Success(report) | CycleOutcome::Partial(report) => Some(report),
            CycleOutcome::TransportError { report, .. } => report.as_ref(),
            CycleOutcome::InputError(_) => None,
        }
    }

    /// The surface was committed during this cycle.
    pub fn committed(&self) -> bool {
        self.report().is_some()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CycleOutcome::Success(_) => "success",
            CycleOutcome::Partial(_) => "partial",
            CycleOutcome::InputError(_) => "input-error",
            CycleOutcome::TransportError { .. } => "transport-error",
        }
    }
}

/// Run one cycle: open the transport, then clear, stream and commit.
///
/// A failure to open leaves the surface untouched. Once drawing has
/// started the surface is committed exactly once, whatever happens to
/// the stream.
///
/// # Errors
///
/// Only configuration faults are errors: a surface whose bounds differ
/// from `format` or a background pen outside the palette.
pub async fn run_cycle<T, S>(
    transport: &T,
    surface: &mut S,
    format: &FrameFormat,
    background: u8,
) -> Result<CycleOutcome, WireError>
where
    T: Transport + ?Sized,
    S: DisplaySurface + ?Sized,
{
    let expected = format.dimensions();
    let actual = surface.bounds();
    if actual != expected {
        return Err(WireError::SurfaceMismatch { expected, actual });
    }
    let palette_len = format.palette().len();
    if background as usize >= palette_len {
        return Err(WireError::InvalidPen {
            pen: background,
            palette_len,
        });
    }

    tracing::info!(source = %transport.describe(), "Starting refresh cycle");

    let mut stream = match transport.open().await {
        Ok(stream) => stream,
        Err(FetchError::Prepare(e)) => {
            tracing::warn!(error = %e, "Frame source unusable");
            return Ok(CycleOutcome::InputError(e.to_string()));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Fetch failed");
            return Ok(CycleOutcome::TransportError {
                error: e.to_string(),
                report: None,
            });
        }
    };

    let mut renderer = FrameRenderer::begin(surface, format, background)?;
    let failure = loop {
        match stream.next_chunk().await {
            Ok(Some(chunk)) => renderer.feed(&chunk),
            Ok(None) => break None,
            Err(e) => break Some(e),
        }
    };
    let report = renderer.finish();

    if report.invalid_indices > 0 {
        tracing::warn!(
            count = report.invalid_indices,
            "Stream contained indices outside the palette"
        );
    }

    if let Some(error) = failure {
        tracing::warn!(error = %error, drawn = report.consumed, "Stream interrupted");
        return Ok(CycleOutcome::TransportError {
            error: error.to_string(),
            report: Some(report),
        });
    }

    if report.length_mismatch() {
        tracing::warn!(
            expected = report.expected,
            actual = report.received(),
            "Stream length does not match frame size"
        );
    }

    if report.is_complete() {
        tracing::info!(pixels = report.pixels_drawn(), "Frame committed");
        Ok(CycleOutcome::Success(report))
    } else {
        Ok(CycleOutcome::Partial(report))
    }
}

/// Timing of the display loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOptions {
    /// Pause after a rendered frame.
    pub refresh_interval: Duration,
    /// First pause after a failed cycle.
    pub retry_delay: Duration,
    /// Upper bound for the growing failure pause.
    pub max_retry_delay: Duration,
    /// Stop after this many cycles; `None` runs forever.
    pub max_cycles: Option<usize>,
}

impl From<&ClientConfig> for LoopOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            refresh_interval: config.refresh_interval(),
            retry_delay: config.retry_delay(),
            max_retry_delay: config.max_retry_delay(),
            max_cycles: None,
        }
    }
}

/// Exponential backoff with up to 20% added jitter.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    failures: u32,
}

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max: max.max(base),
            failures: 0,
        }
    }

    /// Delay before the next attempt after another failure.
    pub fn next_delay(&mut self) -> Duration {
        let factor = 1u32 << self.failures.min(16);
        self.failures = self.failures.saturating_add(1);

        let delay = self.base.saturating_mul(factor).min(self.max);
        let jitter = rand::thread_rng().gen_range(0.0..=0.2);
        Duration::try_from_secs_f64(delay.as_secs_f64() * (1.0 + jitter))
            .map_or(self.max, |jittered| jittered.min(self.max))
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

/// Counters over a finished loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub cycles: usize,
    pub rendered: usize,
    pub failed: usize,
    pub last: Option<CycleOutcome>,
}

/// Repeat [`run_cycle`] until `options.max_cycles` is reached.
///
/// `on_commit` sees the surface after every cycle that committed it.
pub async fn run_display_loop<T, S, F>(
    transport: &T,
    surface: &mut S,
    format: &FrameFormat,
    background: u8,
    options: &LoopOptions,
    mut on_commit: F,
) -> Result<LoopSummary, WireError>
where
    T: Transport + ?Sized,
    S: DisplaySurface + ?Sized,
    F: FnMut(&S, &CycleOutcome),
{
    let mut backoff = Backoff::new(options.retry_delay, options.max_retry_delay);
    let mut summary = LoopSummary::default();

    loop {
        let outcome = run_cycle(transport, surface, format, background).await?;
        summary.cycles += 1;

        if outcome.committed() {
            on_commit(&*surface, &outcome);
        }

        let delay = if outcome.is_rendered() {
            summary.rendered += 1;
            backoff.reset();
            options.refresh_interval
        } else {
            summary.failed += 1;
            backoff.next_delay()
        };
        let failed = !outcome.is_rendered();
        summary.last = Some(outcome);

        if options.max_cycles.is_some_and(|max| summary.cycles >= max) {
            return Ok(summary);
        }

        if failed {
            tracing::info!(
                delay_ms = delay.as_millis() as u64,
                attempt = backoff.failures(),
                "Retrying after failure"
            );
        } else {
            tracing::debug!(delay_secs = delay.as_secs(), "Next refresh scheduled");
        }
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_and_caps() {
        let mut backoff = Backoff::new(Duration::from_secs(5), Duration::from_secs(30));

        let first = backoff.next_delay();
        assert!(first >= Duration::from_secs(5) && first <= Duration::from_secs(6));

        let second = backoff.next_delay();
        assert!(second >= Duration::from_secs(10) && second <= Duration::from_secs(12));

        for _ in 0..10 {
            assert!(backoff.next_delay() <= Duration::from_secs(30));
        }
        assert_eq!(backoff.next_delay(), Duration::from_secs(30));
    }

    #[test]
    fn test_backoff_with_huge_delays_saturates() {
        let base = Duration::from_secs(u64::MAX / 2);
        let mut backoff = Backoff::new(base, Duration::MAX);

        for _ in 0..40 {
            let delay = backoff.next_delay();
            assert!(delay >= base);
        }
    }

    #[test]
    fn test_backoff_reset() {
        let mut backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(10));
        backoff.next_delay();
        backoff.next_delay();
        assert_eq!(backoff.failures(), 2);

        backoff.reset();
        assert!(backoff.next_delay() <= Duration::from_millis(120));
    }

    #[test]
    fn test_outcome_helpers() {
        let report = RenderReport {
            expected: 4,
            consumed: 2,
            ..RenderReport::default()
        };

        let partial = CycleOutcome::Partial(report);
        assert!(partial.is_rendered());
        assert!(!partial.is_success());
        assert_eq!(partial.label(), "partial");

        let failed = CycleOutcome::TransportError {
            error: "reset".into(),
            report: Some(report),
        };
        assert!(!failed.is_rendered());
        assert!(failed.committed());

        let input = CycleOutcome::InputError("missing".into());
        assert!(!input.committed());
        assert_eq!(input.report(), None);
    }

    #[test]
    fn test_loop_options_from_client_config() {
        let options = LoopOptions::from(&ClientConfig::default());
        assert_eq!(options.refresh_interval, Duration::from_secs(3600));
        assert_eq!(options.retry_delay, Duration::from_secs(5));
        assert_eq!(options.max_cycles, None);
    }
}
