//! Configuration lifecycle events.
//!
//! # Responsibilities
//! - Describe what happened to the configuration (change, reload, error)
//! - Name the deployment environment the process runs in
//!
//! # Design Decisions
//! - Events are plain data; emitting them is the formatter sink's job
//! - Environment names are lowercase on the wire and accept common aliases

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::access::{Reflect, Scalar};

/// Environment variable consulted by [`Environment::detect`].
pub const ENV_VAR: &str = "APP_ENV";

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Uat,
    Production,
    Local,
    Debug,
    Demo,
    Integration,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Uat => "uat",
            Environment::Production => "production",
            Environment::Local => "local",
            Environment::Debug => "debug",
            Environment::Demo => "demo",
            Environment::Integration => "integration",
        }
    }

    /// Environment named by `APP_ENV`, or the default when unset or unknown.
    pub fn detect() -> Self {
        std::env::var(ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown environment: {0}")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let env = match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "develop" => Environment::Development,
            "test" | "testing" | "qa" => Environment::Test,
            "staging" | "stage" | "stg" | "preprod" => Environment::Staging,
            "uat" | "acceptance" | "beta" => Environment::Uat,
            "production" | "prod" | "prd" | "live" => Environment::Production,
            "local" | "localhost" => Environment::Local,
            "debug" | "dbg" => Environment::Debug,
            "demo" | "sandbox" | "preview" => Environment::Demo,
            "integration" | "int" | "ci" => Environment::Integration,
            _ => return Err(UnknownEnvironment(s.to_string())),
        };
        Ok(env)
    }
}

impl Reflect for Environment {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(self.as_str()))
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Kind of configuration event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ConfigChanged,
    Reloaded,
    Error,
    Started,
    Stopped,
    Environment,
    Validation,
    FileChanged,
    EnvVarChanged,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ConfigChanged => "config_changed",
            EventKind::Reloaded => "reloaded",
            EventKind::Error => "error",
            EventKind::Started => "started",
            EventKind::Stopped => "stopped",
            EventKind::Environment => "environment",
            EventKind::Validation => "validation",
            EventKind::FileChanged => "file_changed",
            EventKind::EnvVarChanged => "envvar_changed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened to the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub kind: EventKind,
    pub timestamp: SystemTime,

    /// Where the change came from (file path, variable name, caller).
    pub source: String,
    pub environment: Environment,

    /// Error description, set on error events only.
    pub error: Option<String>,
    pub config_path: String,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ChangeEvent {
    pub fn new(kind: EventKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp: SystemTime::now(),
            source: source.into(),
            environment: Environment::default(),
            error: None,
            config_path: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// An error event carrying the error's display text.
    pub fn error(source: impl Into<String>, err: &dyn std::error::Error) -> Self {
        let mut event = Self::new(EventKind::Error, source);
        event.error = Some(err.to_string());
        event
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Seconds since the Unix epoch, 0 for clocks set before it.
    pub fn unix_timestamp(&self) -> u64 {
        self.timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
