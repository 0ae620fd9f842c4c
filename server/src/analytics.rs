//! PostHog browser analytics bootstrap.
//!
//! Pages only load PostHog when a project key is configured.

use serde::Serialize;

const DEFAULT_HOST: &str = "/ingest";
const UI_HOST: &str = "https://us.posthog.com";
const DEFAULTS_VERSION: &str = "2025-05-24";

#[derive(Debug, Clone, Default)]
pub struct AnalyticsConfig {
    pub key: Option<String>,
    pub host: String,
}

#[derive(Serialize)]
struct InitOptions<'a> {
    api_host: &'a str,
    ui_host: &'a str,
    defaults: &'a str,
    capture_exceptions: bool,
    debug: bool,
}

impl AnalyticsConfig {
    pub fn new(key: Option<String>, host: Option<String>) -> Self {
        Self {
            key,
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Origin scripts and beacons go to, if it lives off-site
    pub fn external_origin(&self) -> Option<&str> {
        if self.host.starts_with("https://") || self.host.starts_with("http://") {
            Some(self.host.trim_end_matches('/'))
        } else {
            None
        }
    }

    /// `<script>` tags loading and initialising PostHog, empty when disabled
    pub fn snippet(&self) -> String {
        let Some(key) = &self.key else {
            return String::new();
        };

        let host = self.host.trim_end_matches('/');
        let options = InitOptions {
            api_host: host,
            ui_host: UI_HOST,
            defaults: DEFAULTS_VERSION,
            capture_exceptions: true,
            debug: cfg!(debug_assertions),
        };

        // JSON string/object literals are valid JavaScript; `</` is escaped so
        // nothing can close the script element early.
        let key = serde_json::to_string(key)
            .unwrap_or_default()
            .replace("</", "<\\/");
        let options = serde_json::to_string(&options)
            .unwrap_or_default()
            .replace("</", "<\\/");
        let src = crate::views::escape(&format!("{host}/static/array.js"));

        format!(
            "<script async src=\"{src}\" onload=\"window.posthog &amp;&amp; window.posthog.init({key_attr}, {options_attr})\"></script>",
            key_attr = crate::views::escape(&key),
            options_attr = crate::views::escape(&options),
        )
    }
}
