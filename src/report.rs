//! Canonical report shape and the backend-agnostic normalizer.
//!
//! Both backends speak Lighthouse's native schema (kebab-case category and
//! audit ids); the normalizer maps those onto the fixed camelCase contract.
//! Using structs rather than maps makes "exactly the canonical key set,
//! never partial, never extra" hold by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw, backend-native analysis payload. Category scores are fractional
/// [0,1] values under Lighthouse category ids; audits hold preformatted
/// display strings under Lighthouse audit ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAnalysisResult {
    pub categories: HashMap<String, f64>,
    pub audits: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub performance: f64,
    pub accessibility: f64,
    pub best_practices: f64,
    pub seo: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoreWebVitals {
    pub first_contentful_paint: String,
    pub speed_index: String,
    pub largest_contentful_paint: String,
    pub time_to_interactive: String,
    pub total_blocking_time: String,
    pub cumulative_layout_shift: String,
}

/// The canonical report returned to all callers regardless of which backend
/// answered. Constructed fresh per request, immutable once returned.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub url: String,
    pub scores: CategoryScores,
    pub metrics: CoreWebVitals,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

const MISSING_METRIC: &str = "N/A";

/// Map a raw backend payload onto the canonical scores and metrics.
///
/// Pure: no I/O, deterministic, no rescaling — scores are already [0,1].
/// Missing categories default to 0.0, missing metrics to "N/A".
pub fn normalize(raw: &RawAnalysisResult) -> (CategoryScores, CoreWebVitals) {
    let score = |id: &str| raw.categories.get(id).copied().unwrap_or(0.0);
    let metric = |id: &str| {
        raw.audits
            .get(id)
            .cloned()
            .unwrap_or_else(|| MISSING_METRIC.to_string())
    };

    let scores = CategoryScores {
        performance: score("performance"),
        accessibility: score("accessibility"),
        best_practices: score("best-practices"),
        seo: score("seo"),
    };

    let metrics = CoreWebVitals {
        first_contentful_paint: metric("first-contentful-paint"),
        speed_index: metric("speed-index"),
        largest_contentful_paint: metric("largest-contentful-paint"),
        time_to_interactive: metric("interactive"),
        total_blocking_time: metric("total-blocking-time"),
        cumulative_layout_shift: metric("cumulative-layout-shift"),
    };

    (scores, metrics)
}
