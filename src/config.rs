use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    /// `None` leaves the request bounded only by the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl Settings {
    pub fn generate_url(&self) -> String {
        format!("{}/generate", self.service_url.trim_end_matches('/'))
    }

    pub fn with_service_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) { self.service_url = url; }
        self
    }

    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs { self.request_timeout = timeout_from_secs(secs); }
        self
    }
}

/// Reads `.env` (if any) and the process environment on top of the defaults.
pub fn load_settings() -> Settings {
    dotenv::dotenv().ok();
    let mut settings = Settings::default();

    if let Ok(v) = std::env::var("MARKETING_KIT_SERVICE_URL") {
        settings = settings.with_service_url(Some(v));
    }
    if let Ok(v) = std::env::var("MARKETING_KIT_TIMEOUT_SECS") {
        match parse_timeout_secs(&v) {
            Some(timeout) => settings.request_timeout = timeout,
            None => tracing::warn!(value = %v, "ignoring unparseable MARKETING_KIT_TIMEOUT_SECS"),
        }
    }

    tracing::debug!(?settings, "settings loaded");
    settings
}

/// `"0"` disables the timeout. Returns `None` when the value is not a number.
pub fn parse_timeout_secs(raw: &str) -> Option<Option<Duration>> {
    raw.trim().parse::<u64>().ok().map(timeout_from_secs)
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
