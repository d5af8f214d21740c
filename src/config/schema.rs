//! Configuration schema definitions.
//!
//! This module defines the complete configuration tree for the messaging
//! server. All types derive Serde traits for deserialization from config
//! files. Every record starts zero-valued; optional sections stay `None`
//! until the loader or a builder fills them in.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::observability::Environment;

/// Module name reported by the i18n section.
pub const I18N_MODULE_NAME: &str = "i18n";

/// Root configuration for the messaging server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Service name.
    pub name: String,

    /// Service version.
    pub version: String,

    /// Debug mode.
    pub debug: bool,

    /// Deployment environment.
    pub environment: Environment,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<Http>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub middleware: Option<Middleware>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<Monitoring>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub i18n: Option<I18n>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms: Option<Sms>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<Queue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqtt: Option<Mqtt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<Captcha>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<Database>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Jobs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_processing: Option<BatchProcessing>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_buffers: Option<ChannelBuffers>,
}

/// Service instance settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Server {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub version: String,
    pub debug: bool,

    /// Request timeout, in milliseconds on the wire.
    #[serde(with = "duration_ms")]
    pub timeout: Duration,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Http {
    pub host: String,
    pub port: u16,

    #[serde(with = "duration_ms")]
    pub timeout: Duration,
}

/// Health check settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Health {
    pub enabled: bool,

    /// Path to serve the aggregate health report on.
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<HealthProbe>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql: Option<HealthProbe>,
}

/// A single dependency probe inside the health section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthProbe {
    pub enabled: bool,
    pub path: String,

    #[serde(with = "duration_ms")]
    pub timeout: Duration,
}

/// HTTP middleware switches.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Middleware {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<Cors>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pprof: Option<PProf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Cors {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimit {
    pub enabled: bool,

    /// Maximum requests per second per client.
    pub requests_per_second: u32,

    /// Burst capacity.
    pub burst_size: u32,
}

/// Profiling endpoint settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PProf {
    pub enabled: bool,
    pub path_prefix: String,
    pub port: u16,
}

/// Monitoring settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Monitoring {
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaeger: Option<Jaeger>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Metrics {
    pub enabled: bool,

    /// Scrape endpoint path (e.g., "/metrics").
    pub endpoint: String,
}

/// Distributed tracing exporter settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Jaeger {
    pub enabled: bool,
    pub service_name: String,
    pub endpoint: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<Sampling>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Sampling {
    /// Sampler kind (const, probabilistic, ratelimiting).
    #[serde(rename = "type")]
    pub kind: String,
    pub param: f64,
}

/// Internationalisation settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct I18n {
    pub module_name: String,
    pub enabled: bool,
    pub default_language: String,

    /// Legacy spelling of `default_language`, still honoured on read.
    pub default_lang: String,

    pub supported_languages: Vec<String>,
    pub locale_dir: String,

    /// Where the request language is negotiated from.
    pub header_name: String,
    pub query_param: String,
    pub cookie_name: String,
}

/// SMS gateway credentials.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Sms {
    pub enabled: bool,
    pub access_key_id: String,
    pub access_key_secret: String,
    pub sign_name: String,
    pub template_code: String,
    pub endpoint: String,
    pub region: String,
}

/// Background queue settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Queue {
    pub enabled: bool,

    /// Queue backend (memory, redis, mqtt).
    pub driver: String,
    pub workers: u32,
    pub capacity: usize,
}

/// MQTT broker connection settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Mqtt {
    pub enabled: bool,

    /// Broker URL (e.g., "tcp://localhost:1883").
    pub broker: String,
    pub client_id: String,
    pub username: String,
    pub password: String,
    pub clean_session: bool,
    pub qos: u8,

    #[serde(with = "duration_ms")]
    pub keep_alive: Duration,
}

/// Captcha generation settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Captcha {
    pub enabled: bool,

    /// Captcha flavour (digit, string, math, audio).
    #[serde(rename = "type")]
    pub kind: String,
    pub key_len: u32,
    pub img_width: u32,
    pub img_height: u32,

    /// Maximum skew, 0.5 - 1.0.
    pub max_skew: f64,
    pub dot_count: u32,

    #[serde(with = "duration_ms")]
    pub expire: Duration,
}

/// Database connection and ORM behaviour.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Database {
    pub enabled: bool,
    pub driver: String,
    pub dsn: String,
    pub auto_migrate: bool,
    pub table_prefix: String,

    /// ORM log level (silent, error, warn, info).
    pub log_level: String,

    /// Queries slower than this are logged.
    #[serde(with = "duration_ms")]
    pub slow_threshold: Duration,

    pub max_open_conns: u32,
    pub max_idle_conns: u32,
}

/// Scheduled job settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Jobs {
    pub enabled: bool,

    /// IANA time zone name (e.g., "Asia/Shanghai").
    pub time_zone: String,

    /// Graceful shutdown timeout in seconds.
    pub graceful_shutdown_secs: u64,

    /// Global failure retry count.
    pub max_retries: u32,

    /// Global retry interval in seconds.
    pub retry_interval_secs: u64,

    /// Retry interval jitter as a fraction (0..=1).
    pub retry_jitter: f64,

    /// Upper bound on concurrently running tasks, 0 means unlimited.
    pub max_concurrent_jobs: u32,

    /// Coordinate runs across nodes.
    pub distribute: bool,

    /// Task definitions keyed by task name. Stays `None` until the first insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<BTreeMap<String, JobTask>>,
}

/// A single scheduled task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JobTask {
    pub enabled: bool,

    /// Six-field cron expression (seconds first).
    pub cron_spec: String,

    /// Run once on startup.
    pub immediate_start: bool,

    /// Task timeout in seconds, 0 means unlimited.
    pub timeout_secs: u64,

    /// Skip a run while the previous one is still active.
    pub overlap_prevent: bool,

    /// Task level retry count, 0 uses the global setting.
    pub max_retries: u32,

    /// Task level retry interval in seconds, 0 uses the global setting.
    pub retry_interval_secs: u64,

    /// Task level retry jitter, 0 uses the global setting.
    pub retry_jitter: f64,

    /// Priority (0 = lowest).
    pub priority: u32,

    /// Tasks that must run first (workflow mode).
    pub dependencies: Vec<DependencyTask>,

    /// Concurrent runs of this task, 0 means unlimited.
    pub max_concurrent: u32,

    pub tags: Vec<String>,
    pub description: String,
    pub breaker: BreakerCfg,
}

/// A task dependency: either a reference to a named task or an inline task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DependencyTask {
    pub task_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<JobTask>,
}

/// Circuit breaker protecting a task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BreakerCfg {
    pub enabled: bool,

    /// Consecutive failures that open the breaker.
    pub max_failures: u32,

    /// Seconds before an open breaker lets a trial run through.
    pub reset_timeout_secs: u64,

    /// Successful trial runs needed to close the breaker again.
    pub half_open_successes: u32,
}

/// Batch sizes used by the message pipeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchProcessing {
    pub offline_message_batch_size: usize,
    pub message_pool_buffer_size: usize,
    pub connection_batch_size: usize,
}

/// Channel capacity multipliers applied to the base buffer size.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelBuffers {
    pub broadcast_buffer_multiplier: usize,
    pub node_message_buffer_multiplier: usize,
}

/// Durations travel as integer milliseconds. Values that are not a whole
/// number of milliseconds (or overflow `u64` ms) use `{ secs, nanos }`, so
/// a serialize/deserialize round trip is exact.
pub mod duration_ms {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Millis(u64),
        Exact { secs: u64, nanos: u32 },
    }

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let whole_millis = value.subsec_nanos() % 1_000_000 == 0;
        let repr = match u64::try_from(value.as_millis()) {
            Ok(millis) if whole_millis => Repr::Millis(millis),
            _ => Repr::Exact {
                secs: value.as_secs(),
                nanos: value.subsec_nanos(),
            },
        };
        repr.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Millis(millis) => Ok(Duration::from_millis(millis)),
            Repr::Exact { secs, nanos } => Duration::from_secs(secs)
                .checked_add(Duration::from_nanos(u64::from(nanos)))
                .ok_or_else(|| D::Error::custom("duration overflows")),
        }
    }
}
