//! Handles settings for the application.
//!
//! Values are read from an optional `settings.toml` in the working
//! directory and then from the environment, which wins. Nested keys use a
//! double underscore, e.g. `AUTH__USERNAME`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind: String,
    pub port: u16,
    pub level: String,
    pub auth: Auth,
}

/// Environment values stay strings until deserialization.
fn environment() -> Environment {
    Environment::default().separator("__")
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(
            Config::builder()
                .add_source(File::with_name("settings").required(false))
                .add_source(environment()),
        )
    }

    fn from_config(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings = builder
            .set_default("bind", "0.0.0.0")?
            .set_default("port", 2565)?
            .set_default("level", "info")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listening on {}, log level {}", self.addr(), self.level)
    }
}
