use serde::Deserialize;
use std::fs::File;
use webhook::config::{Config as WebhookConfig, ValidationError};

#[derive(Deserialize, Debug, PartialEq)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
    pub prefix: Option<String>,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct LoggingConfig {
    pub sentry_dsn: String,
    pub environment: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CommonConfig {
    pub metrics: Option<MetricsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(flatten)]
    pub common: CommonConfig,
    pub webhook: Option<WebhookConfig>,
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }

    pub fn webhook(&self) -> Result<&WebhookConfig, ConfigError> {
        let webhook = self
            .webhook
            .as_ref()
            .ok_or(ConfigError::MissingSection("webhook"))?;
        webhook.validate()?;
        Ok(webhook)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("config has no {0} section")]
    MissingSection(&'static str),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use webhook::config::StoreConfig;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn full_config() {
        let yaml = r#"
            metrics:
                statsd_host: 127.0.0.1
                statsd_port: 8125
                prefix: bot
            logging:
                sentry_dsn: https://public@sentry.example.com/1
            webhook:
                listener:
                    host: 0.0.0.0
                    port: 8080
                store:
                    type: postgres
                    url: postgres://bot@db.internal/bot
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(
            config.common.metrics,
            Some(MetricsConfig {
                statsd_host: "127.0.0.1".into(),
                statsd_port: 8125,
                prefix: Some("bot".into()),
            })
        );
        assert_eq!(
            config.common.logging,
            Some(LoggingConfig {
                sentry_dsn: "https://public@sentry.example.com/1".into(),
                environment: None,
            })
        );

        let webhook = config.webhook().expect("webhook config");
        assert_eq!(webhook.listener.port, 8080);
        assert_eq!(webhook.admin_listener.port, 3001);
        assert!(matches!(webhook.store, StoreConfig::Postgres { .. }));
    }

    #[test]
    fn minimal_config() {
        let tmp = write_tmp_file("webhook: {}\n");
        let config = Config::from_file(tmp.path()).expect("load config");
        assert!(config.common.metrics.is_none());
        assert!(config.common.logging.is_none());
        assert_eq!(config.webhook().unwrap().store, StoreConfig::Memory);
    }

    #[test]
    fn missing_webhook_section() {
        let tmp = write_tmp_file("metrics:\n  statsd_host: localhost\n  statsd_port: 8125\n");
        let config = Config::from_file(tmp.path()).expect("load config");
        assert!(matches!(
            config.webhook(),
            Err(ConfigError::MissingSection("webhook"))
        ));
    }

    #[test]
    fn invalid_webhook_section() {
        let yaml = r#"
            webhook:
                listener:
                    host: 127.0.0.1
                    port: 0
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");
        assert!(matches!(
            config.webhook(),
            Err(ConfigError::Invalid(ValidationError::InvalidPort))
        ));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(matches!(
            Config::from_file(&dir.path().join("missing.yaml")),
            Err(ConfigError::LoadError(_))
        ));
    }
}
