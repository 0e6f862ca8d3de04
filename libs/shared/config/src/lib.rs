use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Signed-in user id, as the login page would have stored it.
    pub session_user_id: Option<i64>,
    pub session_role: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("CLINIC_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_URL not set, using default");
                    DEFAULT_API_URL.to_string()
                }),
            request_timeout_secs: match env::var("CLINIC_REQUEST_TIMEOUT_SECS") {
                Ok(raw) => parse_timeout(&raw).unwrap_or_else(|| {
                    warn!("CLINIC_REQUEST_TIMEOUT_SECS is not a positive integer ({}), using default", raw);
                    DEFAULT_REQUEST_TIMEOUT_SECS
                }),
                Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            session_user_id: match env::var("CLINIC_USER_ID") {
                Ok(raw) => raw.trim().parse().map(Some).unwrap_or_else(|_| {
                    warn!("CLINIC_USER_ID is not numeric ({}), ignoring it", raw);
                    None
                }),
                Err(_) => {
                    warn!("CLINIC_USER_ID not set, no patient is signed in");
                    None
                }
            },
            session_role: env::var("CLINIC_USER_ROLE").ok(),
        };

        if !config.is_configured() {
            warn!("Client not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty() && self.session_user_id.is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_user_id: None,
            session_role: None,
        }
    }
}

fn parse_timeout(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}
