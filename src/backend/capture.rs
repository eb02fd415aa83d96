//! Local screenshot backend: headless Chrome over CDP.
//!
//! Every capture runs inside its own scoped `BrowserSession`. The guard owns
//! the Chrome process: `close()` tears it down on the normal paths, and
//! `Drop` kills it when the future is cancelled mid-flight (attempt timeout,
//! client disconnect). An orphaned Chrome process is the worst operational
//! fault this backend can produce, so release is structural, not best-effort.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::backend::{BackendError, ScreenshotBackend};
use crate::config::{
    NAVIGATION_TIMEOUT_SECS, SCREENSHOT_JPEG_QUALITY, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};

pub struct LocalCapture {
    chrome_path: Option<PathBuf>,
}

impl LocalCapture {
    pub fn new(chrome_path: Option<PathBuf>) -> Self {
        Self { chrome_path }
    }
}

#[async_trait]
impl ScreenshotBackend for LocalCapture {
    fn name(&self) -> &'static str {
        "local-capture"
    }

    async fn capture(&self, url: &Url) -> Result<Option<String>, BackendError> {
        let session = BrowserSession::launch(self.chrome_path.as_deref()).await?;
        let result = session.capture(url).await;
        session.close().await;

        let bytes = result?;
        Ok(Some(format!(
            "data:image/jpeg;base64,{}",
            BASE64.encode(&bytes)
        )))
    }
}

/// One isolated headless Chrome instance, alive for a single capture.
pub struct BrowserSession {
    browser: Option<Browser>,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    pub async fn launch(chrome_path: Option<&Path>) -> Result<Self, BackendError> {
        let mut builder = BrowserConfig::builder()
            .viewport(Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
                device_scale_factor: Some(1.0),
                emulating_mobile: false,
                is_landscape: true,
                has_touch: false,
            })
            .request_timeout(Duration::from_secs(NAVIGATION_TIMEOUT_SECS))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox");

        if let Some(path) = chrome_path {
            builder = builder.chrome_executable(path);
        }

        let config = builder.build().map_err(BackendError::Launch)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BackendError::Launch(e.to_string()))?;

        // Drive CDP events until the connection closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!(?event, "browser event");
            }
        });

        Ok(Self {
            browser: Some(browser),
            handler_task,
        })
    }

    /// Navigate and capture a JPEG of the viewport.
    pub async fn capture(&self, url: &Url) -> Result<Vec<u8>, BackendError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| BackendError::Capture("session already closed".to_string()))?;

        let page = browser
            .new_page(url.as_str())
            .await
            .map_err(|e| BackendError::Navigation(e.to_string()))?;

        // Best-effort settle; the CDP request timeout bounds the wait.
        let _ = page.wait_for_navigation().await;

        page.screenshot(
            ScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Jpeg)
                .quality(SCREENSHOT_JPEG_QUALITY)
                .build(),
        )
        .await
        .map_err(|e| BackendError::Capture(e.to_string()))
    }

    /// Graceful teardown: close over CDP while the handler is still
    /// running, then reap the process.
    pub async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            let _ = browser.close().await;
            let _ = browser.kill().await;
        }
        self.handler_task.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler_task.abort();
        if let Some(mut browser) = self.browser.take() {
            warn!("browser session dropped without close, killing process");
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        let _ = browser.kill().await;
                    });
                }
                // Outside a runtime the Browser's own Drop reaps the child.
                Err(_) => drop(browser),
            }
        }
    }
}
