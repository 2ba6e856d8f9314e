use std::env;
use std::time::Duration;

use crate::response::FailurePolicy;

// Address of a Moku when connected to its own WiFi access point
pub const DEFAULT_HOST:&str = "192.168.73.1";
pub const DEFAULT_TIMEOUT_SEC:u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub timeout: Option<Duration>,
    pub force_connect: bool,
    pub failure_policy: FailurePolicy,
    pub relinquish_on_drop: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SEC)),
            force_connect: false,
            failure_policy: FailurePolicy::default(),
            relinquish_on_drop: true,
        }
    }
}

impl Config {

    /// Defaults overridden by `MOKU_IP`, `MOKU_TIMEOUT_SECS` (0 disables the timeout) and
    /// `MOKU_FORCE_CONNECT`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup:F) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("MOKU_IP").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_owned();
        }

        if let Some(secs) = lookup("MOKU_TIMEOUT_SECS").and_then(|s| s.trim().parse::<u64>().ok()) {
            config.timeout = if secs == 0 { None } else { Some(Duration::from_secs(secs)) };
        }

        if let Some(force) = lookup("MOKU_FORCE_CONNECT") {
            config.force_connect = matches!(force.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }

    pub fn with_host(mut self, host:&str) -> Self { self.host = host.to_owned(); self }
    pub fn with_timeout(mut self, timeout:Option<Duration>) -> Self { self.timeout = timeout; self }
    pub fn with_force_connect(mut self, force:bool) -> Self { self.force_connect = force; self }
    pub fn with_failure_policy(mut self, policy:FailurePolicy) -> Self { self.failure_policy = policy; self }
    pub fn with_relinquish_on_drop(mut self, relinquish:bool) -> Self { self.relinquish_on_drop = relinquish; self }

    /// Root of the REST API. A host given with a scheme (as a mock server URI would be) is used verbatim.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/api/", host)
        } else {
            format!("http://{}/api/", host)
        }
    }

}
