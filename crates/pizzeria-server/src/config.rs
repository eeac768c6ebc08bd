//! Server configuration
//!
//! Every setting resolves from a command-line flag, then an environment
//! variable, then a built-in default.

use clap::builder::FalseyValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::net::{AddrParseError, IpAddr, SocketAddr};

/// Secret used when none is configured; fine for development only
pub const DEFAULT_SESSION_SECRET: &str = "@@@###";

/// Session cookie lifetime: 7 days
pub const DEFAULT_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 7;

/// Runtime settings for the storefront server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// HMAC key for the session cookie
    pub session_secret: String,
    /// Session cookie `Max-Age` in seconds
    pub cookie_max_age: u64,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Seed the registry with the built-in voucher rules
    pub sample_rules: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            cookie_max_age: DEFAULT_COOKIE_MAX_AGE,
            log_json: false,
            sample_rules: true,
        }
    }
}

impl ServerConfig {
    /// Command-line definition
    #[must_use]
    pub fn command() -> Command {
        Command::new("pizzeria")
            .version(crate::VERSION)
            .about("Pizza storefront with voucher promotions")
            .arg(
                Arg::new("host")
                    .long("host")
                    .env("PIZZERIA_HOST")
                    .default_value("0.0.0.0")
                    .help("Address to listen on"),
            )
            .arg(
                Arg::new("port")
                    .long("port")
                    .env("PIZZERIA_PORT")
                    .default_value("3000")
                    .value_parser(value_parser!(u16))
                    .help("Port to listen on"),
            )
            .arg(
                Arg::new("session-secret")
                    .long("session-secret")
                    .env("SESSION_SECRET")
                    .hide_env_values(true)
                    .help("Key used to sign the session cookie"),
            )
            .arg(
                Arg::new("cookie-max-age")
                    .long("cookie-max-age")
                    .env("PIZZERIA_COOKIE_MAX_AGE")
                    .default_value("604800")
                    .value_parser(value_parser!(u64))
                    .help("Session cookie lifetime in seconds"),
            )
            .arg(
                Arg::new("log-json")
                    .long("log-json")
                    .env("PIZZERIA_LOG_JSON")
                    .action(ArgAction::SetTrue)
                    .value_parser(FalseyValueParser::new())
                    .help("Emit logs as JSON"),
            )
            .arg(
                Arg::new("no-sample-rules")
                    .long("no-sample-rules")
                    .action(ArgAction::SetTrue)
                    .help("Start with an empty rule registry"),
            )
    }

    /// Parse the process arguments, exiting on `--help` or bad input
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    /// Parse an explicit argument list
    ///
    /// # Errors
    /// The clap error for unknown flags or unparsable values.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&Self::command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            host: matches
                .get_one::<String>("host")
                .cloned()
                .unwrap_or(defaults.host),
            port: matches.get_one::<u16>("port").copied().unwrap_or(defaults.port),
            session_secret: matches
                .get_one::<String>("session-secret")
                .cloned()
                .unwrap_or(defaults.session_secret),
            cookie_max_age: matches
                .get_one::<u64>("cookie-max-age")
                .copied()
                .unwrap_or(defaults.cookie_max_age),
            log_json: matches.get_flag("log-json"),
            sample_rules: !matches.get_flag("no-sample-rules"),
        }
    }

    /// Set listen address
    #[inline]
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set listen port
    #[inline]
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set cookie signing key
    #[inline]
    #[must_use]
    pub fn with_session_secret(mut self, secret: impl Into<String>) -> Self {
        self.session_secret = secret.into();
        self
    }

    /// Set cookie lifetime
    #[inline]
    #[must_use]
    pub fn with_cookie_max_age(mut self, seconds: u64) -> Self {
        self.cookie_max_age = seconds;
        self
    }

    /// Enable or disable the built-in voucher rules
    #[inline]
    #[must_use]
    pub fn with_sample_rules(mut self, enabled: bool) -> Self {
        self.sample_rules = enabled;
        self
    }

    /// Check if the development secret is in use
    #[inline]
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.session_secret == DEFAULT_SESSION_SECRET
    }

    /// Socket address to bind
    ///
    /// # Errors
    /// [`AddrParseError`] if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_from_args([
            "pizzeria",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--session-secret",
            "s3cret",
            "--cookie-max-age",
            "60",
            "--no-sample-rules",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.session_secret, "s3cret");
        assert_eq!(config.cookie_max_age, 60);
        assert!(!config.sample_rules);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(ServerConfig::try_from_args(["pizzeria", "--port", "pizza"]).is_err());
    }

    #[test]
    fn default_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
        assert!(config.uses_default_secret());
        assert_eq!(config.cookie_max_age, 604_800);
    }

    #[test]
    fn hostname_is_not_an_ip() {
        let config = ServerConfig::default().with_host("localhost");
        assert!(config.socket_addr().is_err());
    }
}
