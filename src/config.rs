//! Configuration types.

use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

/// HTTP host configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct GuideConfig {
    /// Address the HTTP host binds to.
    pub bind_address: String,
    pub port: u16,
    /// Header an upstream authenticating proxy sets for signed-in viewers.
    pub identity_header: String,
    /// Sessions untouched for this long are dropped.
    pub session_idle_timeout: Duration,
    /// Upper bound on concurrent traversals.
    pub max_sessions: usize,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            identity_header: "x-authenticated-user".to_string(),
            session_idle_timeout: Duration::from_secs(30 * 60), // 30 minutes
            max_sessions: 1000,
        }
    }
}

impl GuideConfig {
    /// Build config from environment variables, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_address =
            std::env::var("OUTBOUND_GUIDE_BIND").unwrap_or(defaults.bind_address);

        let port: u16 = parse_env("OUTBOUND_GUIDE_PORT").unwrap_or(defaults.port);

        let identity_header = std::env::var("OUTBOUND_GUIDE_IDENTITY_HEADER")
            .unwrap_or(defaults.identity_header);

        let session_idle_timeout = parse_env::<u64>("OUTBOUND_GUIDE_SESSION_IDLE_MIN")
            .and_then(|m| {
                let timeout = minutes(m);
                if timeout.is_none() {
                    warn!(
                        key = "OUTBOUND_GUIDE_SESSION_IDLE_MIN",
                        value = m,
                        "Idle timeout out of range, using default"
                    );
                }
                timeout
            })
            .unwrap_or(defaults.session_idle_timeout);

        let max_sessions: usize =
            parse_env("OUTBOUND_GUIDE_MAX_SESSIONS").unwrap_or(defaults.max_sessions);

        Self {
            bind_address,
            port,
            identity_header,
            session_idle_timeout,
            max_sessions,
        }
    }

    /// Reject values the host cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_idle_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "OUTBOUND_GUIDE_SESSION_IDLE_MIN".to_string(),
                message: "must be at least 1 minute".to_string(),
            });
        }
        if self.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                key: "OUTBOUND_GUIDE_MAX_SESSIONS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.identity_header.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "OUTBOUND_GUIDE_IDENTITY_HEADER".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Minutes as a `Duration`, `None` if the seconds overflow.
fn minutes(m: u64) -> Option<Duration> {
    m.checked_mul(60).map(Duration::from_secs)
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable config value, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GuideConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.session_idle_timeout, Duration::from_secs(1800));
    }

    #[test]
    fn zero_idle_timeout_is_rejected() {
        let config = GuideConfig {
            session_idle_timeout: Duration::ZERO,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OUTBOUND_GUIDE_SESSION_IDLE_MIN"));
    }

    #[test]
    fn zero_max_sessions_is_rejected() {
        let config = GuideConfig {
            max_sessions: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn parse_env_ignores_missing_keys() {
        assert_eq!(parse_env::<u16>("OUTBOUND_GUIDE_TEST_SURELY_UNSET"), None);
    }

    #[test]
    fn minutes_overflow_is_none() {
        assert_eq!(minutes(30), Some(Duration::from_secs(1800)));
        assert_eq!(minutes(u64::MAX), None);
    }

    #[test]
    fn huge_idle_timeout_falls_back_to_default() {
        // Only this test touches the variable.
        unsafe { std::env::set_var("OUTBOUND_GUIDE_SESSION_IDLE_MIN", u64::MAX.to_string()) };
        let config = GuideConfig::from_env();
        unsafe { std::env::remove_var("OUTBOUND_GUIDE_SESSION_IDLE_MIN") };

        assert_eq!(
            config.session_idle_timeout,
            GuideConfig::default().session_idle_timeout
        );
    }
}
