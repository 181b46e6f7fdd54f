//! Bootstrap configuration: where the controller is and how the loops pace
//! themselves before the first `configure` task arrives.

use std::fmt;
use std::time::Duration;

use crate::domain::Configuration;
use crate::domain::config::DEFAULT_MEAN_DWELL_SECS;
use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_SERVICE: &str = "http";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Controller address resolved from a host and a service.
///
/// `service` is either a well-known name (`http` → 80, `https` → 443) or a
/// port number, which is spoken to over plain http.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
    scheme: Scheme,
}

impl Endpoint {
    pub fn resolve(host: &str, service: &str) -> Result<Self, ConfigError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        let service = service.trim();
        if service.is_empty() {
            return Err(ConfigError::EmptyService);
        }

        let (scheme, port) = match service.to_ascii_lowercase().as_str() {
            "http" => (Scheme::Http, 80),
            "https" => (Scheme::Https, 443),
            other => match other.parse::<u16>() {
                Ok(port) if port != 0 => (Scheme::Http, port),
                _ => return Err(ConfigError::UnknownService(service.to_string())),
            },
        };

        Ok(Self {
            host: host.to_string(),
            port,
            scheme,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// URL the beacon posts to.
    pub fn url(&self) -> String {
        format!("{}://{}/", self.scheme.as_str(), self)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // bare IPv6 literals need brackets before the port
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Everything the agent needs at startup.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub endpoint: Endpoint,

    /// Mean dwell (seconds) until a `configure` task replaces it.
    pub initial_mean_dwell: f64,

    /// How often the execution loop looks at the queue when nothing wakes it.
    pub poll_interval: Duration,

    /// Upper bound for `execute` tasks; `None` means wait indefinitely.
    pub execute_timeout: Option<Duration>,

    /// Upper bound for one controller exchange.
    pub request_timeout: Duration,
}

impl AgentConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            initial_mean_dwell: DEFAULT_MEAN_DWELL_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            execute_timeout: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_initial_mean_dwell(mut self, seconds: f64) -> Self {
        self.initial_mean_dwell = seconds;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_execute_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.execute_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// The configuration the beacon starts with (always running).
    pub fn initial_configuration(&self) -> Result<Configuration, ConfigError> {
        Configuration::new(self.initial_mean_dwell, true)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial_configuration()?;
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Endpoint {
            host: DEFAULT_HOST.to_string(),
            port: 80,
            scheme: Scheme::Http,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("localhost", "http", "http://localhost:80/")]
    #[case("controller.example", "HTTPS", "https://controller.example:443/")]
    #[case("10.0.0.5", "8000", "http://10.0.0.5:8000/")]
    #[case("::1", "8080", "http://[::1]:8080/")]
    #[case("  padded  ", " http ", "http://padded:80/")]
    fn resolves_services(#[case] host: &str, #[case] service: &str, #[case] url: &str) {
        assert_eq!(Endpoint::resolve(host, service).unwrap().url(), url);
    }

    #[rstest]
    #[case("", "http", ConfigError::EmptyHost)]
    #[case("   ", "http", ConfigError::EmptyHost)]
    #[case("localhost", "", ConfigError::EmptyService)]
    #[case("localhost", "gopher", ConfigError::UnknownService("gopher".into()))]
    #[case("localhost", "0", ConfigError::UnknownService("0".into()))]
    #[case("localhost", "70000", ConfigError::UnknownService("70000".into()))]
    fn rejects_bad_endpoints(#[case] host: &str, #[case] service: &str, #[case] err: ConfigError) {
        assert_eq!(Endpoint::resolve(host, service).unwrap_err(), err);
    }

    #[test]
    fn defaults_match_cli_defaults() {
        let config = AgentConfig::default();
        assert_eq!(
            config.endpoint,
            Endpoint::resolve(DEFAULT_HOST, DEFAULT_SERVICE).unwrap()
        );
        assert_eq!(config.initial_mean_dwell, 1.0);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.execute_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_pacing() {
        let config = AgentConfig::default().with_initial_mean_dwell(0.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidDwell(0.0)));

        let config = AgentConfig::default().with_poll_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPollInterval));
    }
}
