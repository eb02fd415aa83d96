use sitelens::config::*;

#[test]
fn test_default_ports() {
    assert_eq!(DEFAULT_PORT, 8080);
    assert_eq!(ENGINE_PORT, 3001);
}

#[test]
fn test_default_endpoints() {
    assert_eq!(DEFAULT_ENGINE_URL, "http://127.0.0.1:3001/run-lighthouse");
    assert!(PAGESPEED_API_URL.starts_with("https://www.googleapis.com/"));
}

#[test]
fn test_requested_categories() {
    assert_eq!(
        CATEGORIES,
        &["performance", "accessibility", "best-practices", "seo"]
    );
}

#[test]
fn test_timeout_ordering() {
    // Navigation is bounded tighter than a full screenshot attempt, which in
    // turn is tighter than a full analysis attempt.
    assert!(NAVIGATION_TIMEOUT_SECS < SCREENSHOT_TIMEOUT_SECS);
    assert!(SCREENSHOT_TIMEOUT_SECS < ANALYSIS_TIMEOUT_SECS);
}

#[test]
fn test_capture_constants() {
    assert_eq!(VIEWPORT_WIDTH, 1920);
    assert_eq!(VIEWPORT_HEIGHT, 1080);
    assert_eq!(SCREENSHOT_JPEG_QUALITY, 85);
}

#[test]
fn test_from_args_explicit_values_win() {
    use std::path::PathBuf;

    let args = CliArgs {
        port: 9000,
        engine_url: Some("http://127.0.0.1:4000/run-lighthouse".to_string()),
        pagespeed_api_key: Some("test-key".to_string()),
        chrome_path: Some(PathBuf::from("/usr/bin/chromium")),
        no_local_capture: false,
    };

    let config = AnalyzerConfig::from_args(args);
    assert_eq!(config.port, 9000);
    assert_eq!(config.engine_url, "http://127.0.0.1:4000/run-lighthouse");
    assert_eq!(config.pagespeed_api_key.as_deref(), Some("test-key"));
    assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    assert!(config.local_capture);
    assert_eq!(config.pagespeed_url, PAGESPEED_API_URL);
}

#[test]
fn test_from_args_empty_api_key_treated_as_absent() {
    let args = CliArgs {
        port: DEFAULT_PORT,
        engine_url: Some(DEFAULT_ENGINE_URL.to_string()),
        pagespeed_api_key: Some(String::new()),
        chrome_path: None,
        no_local_capture: true,
    };

    let config = AnalyzerConfig::from_args(args);
    assert!(config.pagespeed_api_key.is_none());
    assert!(!config.local_capture);
}
