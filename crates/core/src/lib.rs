pub mod curated;
pub mod diagnostics;
pub mod domain;
pub mod storage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: u16,
        pub database_url: Option<String>,
        pub database_max_connections: u32,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from an arbitrary key lookup; `from_env` passes the
        /// process environment.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            Ok(Self {
                port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?,
                database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
                database_max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    lookup("DATABASE_MAX_CONNECTIONS"),
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                )?,
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
            })
        }

        pub fn require_database_url(&self) -> anyhow::Result<&str> {
            self.database_url
                .as_deref()
                .context("DATABASE_URL is required")
        }
    }

    fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match raw {
            None => Ok(default),
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("{key} must be a number (got {v:?})")),
        }
    }

}
