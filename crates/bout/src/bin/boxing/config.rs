use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use bout::random::DEFAULT_TIMEOUT;

const DEFAULT_DATABASE_URL: &str = "sqlite://boxing.db?mode=rwc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomSourceKind {
    RandomOrg,
    Local,
}

impl FromStr for RandomSourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "random-org" | "random_org" | "randomorg" => Ok(Self::RandomOrg),
            "local" => Ok(Self::Local),
            other => bail!("Unknown RANDOM_SOURCE '{}', expected 'random-org' or 'local'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub random_source: RandomSourceKind,
    pub random_org_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let random_source = match std::env::var("RANDOM_SOURCE") {
            Ok(value) => value.parse()?,
            Err(_) => RandomSourceKind::RandomOrg,
        };

        let random_org_timeout = match std::env::var("RANDOM_ORG_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(
                value
                    .parse()
                    .context("RANDOM_ORG_TIMEOUT_SECS must be a number")?,
            ),
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            random_source,
            random_org_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_source_kind_parsing() {
        assert_eq!(
            "random-org".parse::<RandomSourceKind>().unwrap(),
            RandomSourceKind::RandomOrg
        );
        assert_eq!(
            " Local ".parse::<RandomSourceKind>().unwrap(),
            RandomSourceKind::Local
        );
        assert!("dice".parse::<RandomSourceKind>().is_err());
    }
}
