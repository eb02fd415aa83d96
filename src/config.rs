use clap::Parser;
use std::path::PathBuf;

/// Sitelens — website performance analysis service with backend fallback.
#[derive(Parser, Debug, Clone)]
#[command(name = "sitelens")]
pub struct CliArgs {
    /// HTTP port to listen on
    #[arg(long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Lighthouse engine endpoint (overrides LIGHTHOUSE_ENGINE_URL)
    #[arg(long = "engine-url")]
    pub engine_url: Option<String>,

    /// PageSpeed Insights API key (overrides PAGESPEED_API_KEY)
    #[arg(long = "pagespeed-api-key")]
    pub pagespeed_api_key: Option<String>,

    /// Path to a Chrome/Chromium executable for local capture
    #[arg(long = "chrome-path")]
    pub chrome_path: Option<PathBuf>,

    /// Disable the local headless-Chrome screenshot backend
    #[arg(long = "no-local-capture")]
    pub no_local_capture: bool,
}

pub struct AnalyzerConfig {
    pub port: u16,
    pub engine_url: String,
    pub pagespeed_url: String,
    pub pagespeed_api_key: Option<String>,
    pub chrome_path: Option<PathBuf>,
    pub local_capture: bool,
}

// Port constants
pub const DEFAULT_PORT: u16 = 8080;
pub const ENGINE_PORT: u16 = 3001;

// Backend endpoints
pub const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:3001/run-lighthouse";
pub const PAGESPEED_API_URL: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

// Lighthouse categories requested from the remote API, in request order.
pub const CATEGORIES: &[&str] = &["performance", "accessibility", "best-practices", "seo"];

// Timeout constants
pub const ANALYSIS_TIMEOUT_SECS: u64 = 120;
pub const SCREENSHOT_TIMEOUT_SECS: u64 = 45;
pub const NAVIGATION_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

// Local capture constants
pub const VIEWPORT_WIDTH: u32 = 1920;
pub const VIEWPORT_HEIGHT: u32 = 1080;
pub const SCREENSHOT_JPEG_QUALITY: i64 = 85;

impl AnalyzerConfig {
    /// Fold CLI arguments and environment fallbacks into one immutable
    /// configuration value. The environment is only consulted here; backends
    /// never read it themselves.
    pub fn from_args(args: CliArgs) -> Self {
        let engine_url = args
            .engine_url
            .or_else(|| std::env::var("LIGHTHOUSE_ENGINE_URL").ok())
            .unwrap_or_else(|| DEFAULT_ENGINE_URL.to_string());

        let pagespeed_api_key = args
            .pagespeed_api_key
            .or_else(|| std::env::var("PAGESPEED_API_KEY").ok())
            .filter(|k| !k.is_empty());

        let chrome_path = args
            .chrome_path
            .or_else(|| std::env::var("CHROME_PATH").ok().map(PathBuf::from));

        AnalyzerConfig {
            port: args.port,
            engine_url,
            pagespeed_url: PAGESPEED_API_URL.to_string(),
            pagespeed_api_key,
            chrome_path,
            local_capture: !args.no_local_capture,
        }
    }
}
