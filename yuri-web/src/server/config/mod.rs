use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Configuration {
    pub server: ServerConfiguration,
    pub oauth: OAuthConfiguration,
}

#[derive(Debug, Clone)]
pub struct ServerConfiguration {
    pub host: String,
    pub port: u16,
    /// Directory served for `/`, `/login` and every unmatched path
    pub static_dir: PathBuf,
    /// Add the `Secure` attribute to cookies; enable behind HTTPS
    pub secure_cookies: bool,
    pub session_ttl_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct OAuthConfiguration {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Discord API root, `https://discord.com/api` unless pointed at a stand-in
    pub api_base_url: String,
}

/// Flat view of the configuration sources.
///
/// Keys are the lowercased environment variable names (`DISCORD_CLIENT_ID`,
/// `PORT`, ...) so the same names work in `config.toml`.
#[derive(Debug, Deserialize)]
struct Settings {
    discord_client_id: String,
    discord_client_secret: String,
    discord_redirect_uri: String,

    #[serde(default = "default_api_base_url")]
    discord_api_base: String,

    #[serde(default = "default_host")]
    host: String,

    #[serde(default = "default_port")]
    port: u16,

    #[serde(default = "default_static_dir")]
    static_dir: PathBuf,

    #[serde(default)]
    secure_cookies: bool,

    #[serde(default = "default_session_ttl")]
    session_ttl_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_api_base_url() -> String {
    "https://discord.com/api".to_string()
}

fn default_session_ttl() -> u64 {
    7 * 24 * 60 * 60
}

/// Longest session lifetime accepted; browsers cap cookie `Max-Age` at 400 days
pub const MAX_SESSION_TTL_SECONDS: u64 = 400 * 24 * 60 * 60;

impl Settings {
    fn validate(&self) -> Result<(), String> {
        if self.session_ttl_seconds == 0 || self.session_ttl_seconds > MAX_SESSION_TTL_SECONDS {
            return Err(format!(
                "session_ttl_seconds must be between 1 and {}, got {}",
                MAX_SESSION_TTL_SECONDS, self.session_ttl_seconds
            ));
        }
        Ok(())
    }
}

impl ServerConfiguration {
    /// Session lifetime as a signed duration, saturating for unvalidated values
    pub fn session_ttl(&self) -> chrono::Duration {
        i64::try_from(self.session_ttl_seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl From<Settings> for Configuration {
    fn from(settings: Settings) -> Self {
        Self {
            server: ServerConfiguration {
                host: settings.host,
                port: settings.port,
                static_dir: settings.static_dir,
                secure_cookies: settings.secure_cookies,
                session_ttl_seconds: settings.session_ttl_seconds,
            },
            oauth: OAuthConfiguration {
                client_id: settings.discord_client_id,
                client_secret: settings.discord_client_secret,
                redirect_uri: settings.discord_redirect_uri,
                api_base_url: settings.discord_api_base.trim_end_matches('/').to_string(),
            },
        }
    }
}

impl Configuration {
    pub fn new() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(config::File::with_name("config"));
        }

        builder = builder.add_source(config::Environment::default());

        Self::from_config(builder.build()?)
    }

    fn from_config(config: config::Config) -> Result<Self, config::ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate().map_err(config::ConfigError::Message)?;
        Ok(settings.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(toml: &str) -> Result<Configuration, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Configuration::from_config(config)
    }

    #[test]
    fn applies_defaults() {
        let configuration = load(
            r#"
            discord_client_id = "1234"
            discord_client_secret = "shh"
            discord_redirect_uri = "http://localhost:3000/auth/discord/callback"
            "#,
        )
        .unwrap();

        assert_eq!(configuration.server.port, 3000);
        assert_eq!(configuration.server.host, "0.0.0.0");
        assert_eq!(configuration.server.static_dir, PathBuf::from("public"));
        assert!(!configuration.server.secure_cookies);
        assert_eq!(configuration.server.session_ttl_seconds, 604_800);
        assert_eq!(configuration.oauth.api_base_url, "https://discord.com/api");
        assert_eq!(configuration.oauth.client_id, "1234");
    }

    #[test]
    fn overrides_and_trims_api_base() {
        let configuration = load(
            r#"
            discord_client_id = "1234"
            discord_client_secret = "shh"
            discord_redirect_uri = "https://yuri.example/auth/discord/callback"
            discord_api_base = "http://127.0.0.1:9999/"
            port = 8080
            secure_cookies = true
            "#,
        )
        .unwrap();

        assert_eq!(configuration.server.port, 8080);
        assert!(configuration.server.secure_cookies);
        assert_eq!(configuration.oauth.api_base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn rejects_session_ttl_out_of_range() {
        for ttl in ["0", "34560001", "10000000000000000"] {
            let result = load(&format!(
                r#"
                discord_client_id = "1234"
                discord_client_secret = "shh"
                discord_redirect_uri = "http://localhost:3000/auth/discord/callback"
                session_ttl_seconds = {}
                "#,
                ttl
            ));
            assert!(
                matches!(result, Err(config::ConfigError::Message(_))),
                "ttl {} accepted",
                ttl
            );
        }
    }

    #[test]
    fn session_ttl_saturates_instead_of_panicking() {
        let mut configuration = load(
            r#"
            discord_client_id = "1234"
            discord_client_secret = "shh"
            discord_redirect_uri = "http://localhost:3000/auth/discord/callback"
            session_ttl_seconds = 34560000
            "#,
        )
        .unwrap();
        assert_eq!(
            configuration.server.session_ttl(),
            chrono::Duration::days(400)
        );

        configuration.server.session_ttl_seconds = u64::MAX;
        assert_eq!(configuration.server.session_ttl(), chrono::Duration::MAX);

        configuration.server.session_ttl_seconds = 10_000_000_000_000_000;
        assert_eq!(configuration.server.session_ttl(), chrono::Duration::MAX);
    }

    #[test]
    fn requires_discord_credentials() {
        assert!(load(r#"port = 3000"#).is_err());
    }
}
