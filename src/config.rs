use std::net::SocketAddr;

use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

use crate::group::RandomAssigner;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} should be set.")]
    Missing(&'static str),
    #[error("{name} can't be parsed: '{value}'.")]
    Invalid { name: &'static str, value: String },
    #[error("NGROK_URL and NGROK_ADDR must be set together.")]
    PartialWebhook,
}

/// Where Telegram should push updates instead of being polled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub url: Url,
    pub addr: SocketAddr,
}

pub struct Config {
    pub token: String,
    pub log_level: String,
    pub webhook: Option<Webhook>,
    pub seed: Option<u64>,
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("TELOXIDE_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("TELOXIDE_TOKEN"))?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "error".into());

        let webhook = match (lookup("NGROK_URL"), lookup("NGROK_ADDR")) {
            (Some(url), Some(addr)) => Some(Webhook {
                url: parse("NGROK_URL", url)?,
                addr: parse("NGROK_ADDR", addr)?,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialWebhook),
        };

        let seed = lookup("STUDY_SEED")
            .map(|seed| parse("STUDY_SEED", seed))
            .transpose()?;

        Ok(Self {
            token,
            log_level,
            webhook,
            seed,
        })
    }

    pub fn assigner(&self) -> RandomAssigner {
        match self.seed {
            Some(seed) => RandomAssigner::seeded(seed),
            None => RandomAssigner::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn token_is_required() {
        assert_eq!(
            config(&[]).err(),
            Some(ConfigError::Missing("TELOXIDE_TOKEN"))
        );
    }

    #[test]
    fn defaults_to_polling() {
        let config = config(&[("TELOXIDE_TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.log_level, "error");
        assert_eq!(config.webhook, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn webhook_needs_both_halves() {
        assert_eq!(
            config(&[
                ("TELOXIDE_TOKEN", "123:abc"),
                ("NGROK_URL", "https://example.ngrok.app")
            ])
            .err(),
            Some(ConfigError::PartialWebhook)
        );

        let config = config(&[
            ("TELOXIDE_TOKEN", "123:abc"),
            ("NGROK_URL", "https://example.ngrok.app"),
            ("NGROK_ADDR", "127.0.0.1:8443"),
        ])
        .unwrap();
        let webhook = config.webhook.unwrap();
        assert_eq!(webhook.addr.port(), 8443);
        assert_eq!(webhook.url.host_str(), Some("example.ngrok.app"));
    }

    #[test]
    fn bad_values_are_named() {
        assert_eq!(
            config(&[("TELOXIDE_TOKEN", "123:abc"), ("STUDY_SEED", "lucky")]).err(),
            Some(ConfigError::Invalid {
                name: "STUDY_SEED",
                value: "lucky".into()
            })
        );
    }

    #[test]
    fn seed_makes_assignment_reproducible() {
        use crate::group::AssignGroup;

        let config = config(&[("TELOXIDE_TOKEN", "123:abc"), ("STUDY_SEED", "99")]).unwrap();
        let (a, b) = (config.assigner(), config.assigner());
        for _ in 0..16 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
