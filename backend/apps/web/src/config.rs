//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;

const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
pub struct WebConfig {
    /// `ADDR`, default `0.0.0.0:4000`
    pub addr: SocketAddr,
    /// `DATABASE_URL`; in-memory stores when unset
    pub database_url: Option<String>,
    /// `DB_MAX_CONNECTIONS`, default 5
    pub db_max_connections: u32,
    /// `STATIC_DIR`, default `ui/static`
    pub static_dir: PathBuf,
    /// `SESSION_CLEANUP_SECS`, default 30 minutes
    pub session_cleanup_interval: Duration,
    pub auth: AuthConfig,
}

impl WebConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut auth = AuthConfig::default();

        if let Some(secs) = parse_var::<u64>("SESSION_LIFETIME_SECS")? {
            auth.session_lifetime = Duration::from_secs(secs);
        }
        if let Some(secure) = parse_var::<bool>("COOKIE_SECURE")? {
            auth.cookie.secure = secure;
        }

        Ok(Self {
            addr: parse_var("ADDR")?.unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 4000))),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS")?.unwrap_or(5),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ui/static")),
            session_cleanup_interval: parse_var::<u64>("SESSION_CLEANUP_SECS")?
                .filter(|&secs| secs > 0)
                .map_or(DEFAULT_CLEANUP_INTERVAL, Duration::from_secs),
            auth,
        })
    }
}

fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(None),
    }
}
