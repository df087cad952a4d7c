use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{CONFIG_ENV, find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
pub struct Config {
    service: Service,
    #[serde(default)]
    voice: Voice,
    #[serde(default)]
    player: Player,
}

#[derive(Debug, Deserialize)]
pub struct Service {
    base_url: String,
    #[serde(default = "Service::default_timeout_secs")]
    timeout_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct Voice {
    language: Option<String>,
    speaker_wav: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Player {
    command: Option<String>,
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let raw = read_config(use_local)?;
                    let config: Self = toml::from_str(&raw)?;
                    Ok(config)
                };

                let config = match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                };

                config
            })
            .await
    }

    #[inline]
    pub fn service(&self) -> &Service {
        &self.service
    }

    #[inline]
    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }
}

impl Service {
    fn default_timeout_secs() -> u64 {
        30
    }

    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[inline]
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Voice {
    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[inline]
    pub fn speaker_wav(&self) -> Option<&str> {
        self.speaker_wav.as_deref()
    }
}

impl Player {
    #[inline]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn local_config_parses() {
        // the config.toml shipped in the repo, read without env lookups
        let raw = std::fs::read_to_string("./config.toml").unwrap();
        let config: Config = toml::from_str(&raw).unwrap();

        assert_eq!(config.service().base_url(), "http://127.0.0.1:5000");
        assert_eq!(config.service().timeout(), std::time::Duration::from_secs(30));
        assert_eq!(config.voice().language(), Some("es"));
        assert_eq!(config.voice().speaker_wav(), Some("esp1.wav"));
    }

    #[test]
    fn minimal_config_parses() {
        let config: Config = toml::from_str(
            r#"
            [service]
            base_url = "http://localhost:5000"
            "#,
        )
        .unwrap();

        assert_eq!(config.service().timeout_secs, 30);
        assert!(config.voice().language().is_none());
        assert!(config.player().command().is_none());
    }
}
