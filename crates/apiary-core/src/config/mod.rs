use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_AUTH_HEADER, DEFAULT_PRIVATE_GROUP_LABEL};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub groups: GroupsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    SingleUser,
    Header,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub single_user: Option<SingleUserAuthConfig>,
    pub header: Option<HeaderAuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub uid: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeaderAuthConfig {
    pub name: String,
}

impl AuthConfig {
    /// ## Summary
    /// Returns the header that carries the caller uid, falling back to the default name.
    #[must_use]
    pub fn header_name(&self) -> &str {
        self.header
            .as_ref()
            .map_or(DEFAULT_AUTH_HEADER, |header| header.name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// How `group/del` removes the interfaces, cases and collections of a group's projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeMode {
    /// Await every child deletion before the projects are removed.
    #[default]
    Sequenced,
    /// Spawn child deletions and remove the projects without waiting for them.
    Detached,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupsConfig {
    pub private_label: String,
    pub cascade: CascadeMode,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            private_label: DEFAULT_PRIVATE_GROUP_LABEL.to_string(),
            cascade: CascadeMode::default(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "debug")?
            .set_default("auth.method", "single_user")?
            .set_default("groups.private_label", DEFAULT_PRIVATE_GROUP_LABEL)?
            .set_default("groups.cascade", "sequenced")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests;
