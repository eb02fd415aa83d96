//! Drives the ordered backend attempt sequence for one request.
//!
//! Analysis and screenshot are independent fallback chains: analysis is the
//! hard feature (all backends failing fails the request), the screenshot is
//! soft (worst case the report simply has no image). Fallback is triggered by
//! failure only, never by slowness — a slow-but-successful primary backend
//! still wins, so this is a sequential loop, not a race.

use chrono::Utc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{info, warn};
use url::Url;

use crate::backend::{AnalysisBackend, ScreenshotBackend};
use crate::config::{AnalyzerConfig, ANALYSIS_TIMEOUT_SECS, SCREENSHOT_TIMEOUT_SECS};
use crate::error::AnalyzerError;
use crate::report::{self, AnalysisReport, RawAnalysisResult};

/// One try against one backend. Retained for observability and tests,
/// never serialized to external callers.
#[derive(Debug, Clone)]
pub struct BackendAttempt {
    pub backend: &'static str,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Success,
    /// The backend answered but had nothing to give (screenshot soft miss).
    Miss,
    Failed(String),
    TimedOut,
}

/// A completed orchestration: the canonical report plus the attempt log
/// that produced it.
#[derive(Debug)]
pub struct Orchestration {
    pub report: AnalysisReport,
    pub attempts: Vec<BackendAttempt>,
}

pub struct Orchestrator {
    analysis: Vec<Box<dyn AnalysisBackend>>,
    screenshots: Vec<Box<dyn ScreenshotBackend>>,
    analysis_timeout: Duration,
    screenshot_timeout: Duration,
}

impl Orchestrator {
    pub fn new(
        analysis: Vec<Box<dyn AnalysisBackend>>,
        screenshots: Vec<Box<dyn ScreenshotBackend>>,
        analysis_timeout: Duration,
        screenshot_timeout: Duration,
    ) -> Self {
        Self {
            analysis,
            screenshots,
            analysis_timeout,
            screenshot_timeout,
        }
    }

    /// Build the production backend chains: loopback Lighthouse engine before
    /// PageSpeed for analysis, local Chrome capture before PageSpeed-embedded
    /// for screenshots.
    pub fn from_config(config: &AnalyzerConfig, client: reqwest::Client) -> Self {
        use crate::backend::capture::LocalCapture;
        use crate::backend::engine::EngineBackend;
        use crate::backend::pagespeed::PageSpeedBackend;

        let analysis: Vec<Box<dyn AnalysisBackend>> = vec![
            Box::new(EngineBackend::new(client.clone(), config.engine_url.clone())),
            Box::new(PageSpeedBackend::new(
                client.clone(),
                config.pagespeed_url.clone(),
                config.pagespeed_api_key.clone(),
            )),
        ];

        let mut screenshots: Vec<Box<dyn ScreenshotBackend>> = Vec::new();
        if config.local_capture {
            screenshots.push(Box::new(LocalCapture::new(config.chrome_path.clone())));
        }
        screenshots.push(Box::new(PageSpeedBackend::new(
            client,
            config.pagespeed_url.clone(),
            config.pagespeed_api_key.clone(),
        )));

        Self::new(
            analysis,
            screenshots,
            Duration::from_secs(ANALYSIS_TIMEOUT_SECS),
            Duration::from_secs(SCREENSHOT_TIMEOUT_SECS),
        )
    }

    /// Produce one canonical report for a validated URL. Both chains run
    /// concurrently; a screenshot failure never taints the analysis path.
    pub async fn analyze(&self, url: &Url) -> Result<Orchestration, AnalyzerError> {
        let (analysis, screenshot) =
            tokio::join!(self.run_analysis(url), self.run_screenshot(url));

        let (raw, backend, mut attempts) = analysis?;
        let (screenshot, screenshot_attempts) = screenshot;
        attempts.extend(screenshot_attempts);

        let (scores, metrics) = report::normalize(&raw);
        let report = AnalysisReport {
            url: url.to_string(),
            scores,
            metrics,
            timestamp: Utc::now(),
            screenshot,
        };

        info!(backend, url = %report.url, "analysis complete");
        Ok(Orchestration { report, attempts })
    }

    /// Screenshot-only operation. Total failure is still a soft result.
    pub async fn screenshot(&self, url: &Url) -> (Option<String>, Vec<BackendAttempt>) {
        self.run_screenshot(url).await
    }

    async fn run_analysis(
        &self,
        url: &Url,
    ) -> Result<(RawAnalysisResult, &'static str, Vec<BackendAttempt>), AnalyzerError> {
        let mut attempts = Vec::new();

        for backend in &self.analysis {
            let name = backend.name();
            let start = Instant::now();

            match timeout(self.analysis_timeout, backend.analyze(url)).await {
                Ok(Ok(raw)) => {
                    let elapsed = start.elapsed();
                    info!(backend = name, ?elapsed, "analysis backend succeeded");
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::Success,
                        elapsed,
                    });
                    // First success wins; no later backend is consulted.
                    return Ok((raw, name, attempts));
                }
                Ok(Err(e)) => {
                    warn!(backend = name, error = %e, "analysis backend failed, trying next");
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::Failed(e.to_string()),
                        elapsed: start.elapsed(),
                    });
                }
                Err(_) => {
                    warn!(
                        backend = name,
                        timeout = ?self.analysis_timeout,
                        "analysis backend timed out, trying next"
                    );
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::TimedOut,
                        elapsed: start.elapsed(),
                    });
                }
            }
        }

        warn!(
            attempted = attempts.len(),
            "all analysis backends exhausted"
        );
        Err(AnalyzerError::AllBackendsExhausted)
    }

    async fn run_screenshot(&self, url: &Url) -> (Option<String>, Vec<BackendAttempt>) {
        let mut attempts = Vec::new();

        for backend in &self.screenshots {
            let name = backend.name();
            let start = Instant::now();

            match timeout(self.screenshot_timeout, backend.capture(url)).await {
                Ok(Ok(Some(image))) => {
                    let elapsed = start.elapsed();
                    info!(backend = name, ?elapsed, "screenshot backend succeeded");
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::Success,
                        elapsed,
                    });
                    return (Some(image), attempts);
                }
                Ok(Ok(None)) => {
                    info!(backend = name, "screenshot unavailable, trying next");
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::Miss,
                        elapsed: start.elapsed(),
                    });
                }
                Ok(Err(e)) => {
                    warn!(backend = name, error = %e, "screenshot backend failed, trying next");
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::Failed(e.to_string()),
                        elapsed: start.elapsed(),
                    });
                }
                Err(_) => {
                    warn!(
                        backend = name,
                        timeout = ?self.screenshot_timeout,
                        "screenshot backend timed out, trying next"
                    );
                    attempts.push(BackendAttempt {
                        backend: name,
                        outcome: AttemptOutcome::TimedOut,
                        elapsed: start.elapsed(),
                    });
                }
            }
        }

        // Soft failure by design: the report ships without an image.
        info!("no screenshot backend produced an image");
        (None, attempts)
    }
}
