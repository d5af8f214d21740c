//! Formatter sink for configuration events.
//!
//! # Responsibilities
//! - Define the sink contract (`FormatterSink`) that records change/error events
//! - Provide the default sink that writes structured `tracing` records
//! - Hold the process-wide sink and the automatic-logging switch
//! - Forward events: `log_*` honour the switch, `force_log_*` bypass it
//!
//! # Design Decisions
//! - Sinks are injectable; the global exists for call sites without a handle
//! - The sink is swapped atomically, readers never lock
//! - Sinks absorb their own failures; forwarders return nothing

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use arc_swap::ArcSwap;

use crate::config::{AppConfig, ValidationError};
use crate::observability::events::{ChangeEvent, Environment};

/// Destination for configuration events.
pub trait FormatterSink: Send + Sync {
    /// A new configuration took effect.
    fn log_config_changed(&self, event: &ChangeEvent, new_config: &dyn Any);

    /// The process moved from one environment to another.
    fn log_environment_changed(&self, old_env: Environment, new_env: Environment);

    /// Loading, validating or applying configuration failed.
    fn log_error(&self, event: &ChangeEvent);

    /// Outcome of a validation pass and how long it took.
    fn log_validation(&self, result: &Result<(), Vec<ValidationError>>, elapsed: Duration) {
        match result {
            Ok(()) => tracing::info!(elapsed = ?elapsed, "Configuration valid"),
            Err(errors) => {
                for error in errors {
                    tracing::error!(elapsed = ?elapsed, "Configuration invalid: {}", error);
                }
            }
        }
    }

    /// A service came up with this configuration.
    fn log_service_startup(
        &self,
        service: &str,
        endpoint: &str,
        environment: Environment,
        version: &str,
    ) {
        tracing::info!(service, endpoint, environment = %environment, version, "Service started");
    }
}

/// Default sink: structured `tracing` records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFormatter;

impl TracingFormatter {
    fn log_app_config(&self, config: &AppConfig) {
        tracing::info!(
            name = %config.name,
            version = %config.version,
            environment = %config.environment,
            debug = config.debug,
            "New configuration"
        );

        let safe = config.safe();
        if safe.server().is_present() {
            tracing::info!(
                host = safe.server().host(""),
                port = safe.get_server_port(0),
                "  server"
            );
        }
        if safe.database().is_present() {
            tracing::info!(
                enabled = safe.is_database_enabled(),
                auto_migrate = safe.is_auto_migrate_enabled(),
                table_prefix = safe.get_table_prefix(""),
                "  database"
            );
        }
        if safe.jobs().is_present() {
            let tasks = config
                .jobs
                .as_ref()
                .and_then(|jobs| jobs.tasks.as_ref())
                .map_or(0, |tasks| tasks.len());
            tracing::info!(enabled = safe.is_jobs_enabled(), tasks, "  jobs");
        }
        tracing::info!(
            monitoring = safe.is_monitoring_enabled(),
            metrics = safe.is_metrics_enabled(),
            i18n = safe.is_i18n_enabled(),
            sms = safe.is_sms_enabled(),
            mqtt = safe.is_mqtt_enabled(),
            captcha = safe.is_captcha_enabled(),
            "  subsystems"
        );
    }
}

impl FormatterSink for TracingFormatter {
    fn log_config_changed(&self, event: &ChangeEvent, new_config: &dyn Any) {
        tracing::info!(
            source = %event.source,
            timestamp = event.unix_timestamp(),
            environment = %event.environment,
            kind = %event.kind,
            config_path = %event.config_path,
            "Configuration changed"
        );

        match new_config.downcast_ref::<AppConfig>() {
            Some(config) => self.log_app_config(config),
            None => tracing::info!("Configuration updated"),
        }
    }

    fn log_environment_changed(&self, old_env: Environment, new_env: Environment) {
        tracing::info!(old = %old_env, new = %new_env, "Environment changed");

        let mode = match new_env {
            Environment::Development => "development mode",
            Environment::Production => "production mode",
            Environment::Test => "test mode",
            Environment::Staging => "staging mode",
            _ => "custom environment mode",
        };
        tracing::info!(environment = %new_env, "Switched to {}", mode);
    }

    fn log_error(&self, event: &ChangeEvent) {
        tracing::error!(
            error = event.error.as_deref().unwrap_or("unknown error"),
            source = %event.source,
            timestamp = event.unix_timestamp(),
            "Configuration error"
        );
    }
}

/// A sink plus the automatic-logging switch.
pub struct ChangeLogger {
    sink: ArcSwap<Box<dyn FormatterSink>>,
    auto_log: AtomicBool,
}

impl ChangeLogger {
    /// Automatic logging starts enabled.
    pub fn new(sink: Box<dyn FormatterSink>) -> Self {
        Self {
            sink: ArcSwap::from_pointee(sink),
            auto_log: AtomicBool::new(true),
        }
    }

    pub fn sink(&self) -> Arc<Box<dyn FormatterSink>> {
        self.sink.load_full()
    }

    pub fn set_sink(&self, sink: Box<dyn FormatterSink>) {
        self.sink.store(Arc::new(sink));
    }

    pub fn set_auto_log_enabled(&self, enabled: bool) {
        self.auto_log.store(enabled, Ordering::SeqCst);
        tracing::info!(enabled, "Automatic configuration logging toggled");
    }

    pub fn is_auto_log_enabled(&self) -> bool {
        self.auto_log.load(Ordering::SeqCst)
    }

    pub fn log_config_change(&self, event: &ChangeEvent, new_config: &dyn Any) {
        if self.is_auto_log_enabled() {
            self.force_log_config_change(event, new_config);
        }
    }

    pub fn log_env_change(&self, old_env: Environment, new_env: Environment) {
        if self.is_auto_log_enabled() {
            self.force_log_env_change(old_env, new_env);
        }
    }

    pub fn log_config_error(&self, event: &ChangeEvent) {
        if self.is_auto_log_enabled() {
            self.force_log_config_error(event);
        }
    }

    pub fn force_log_config_change(&self, event: &ChangeEvent, new_config: &dyn Any) {
        self.sink.load().log_config_changed(event, new_config);
    }

    pub fn force_log_env_change(&self, old_env: Environment, new_env: Environment) {
        self.sink.load().log_environment_changed(old_env, new_env);
    }

    pub fn force_log_config_error(&self, event: &ChangeEvent) {
        self.sink.load().log_error(event);
    }
}

impl Default for ChangeLogger {
    fn default() -> Self {
        Self::new(Box::new(TracingFormatter))
    }
}

static GLOBAL: OnceLock<ChangeLogger> = OnceLock::new();

/// The process-wide logger, created with the tracing sink on first use.
pub fn global() -> &'static ChangeLogger {
    GLOBAL.get_or_init(ChangeLogger::default)
}

pub fn global_formatter() -> Arc<Box<dyn FormatterSink>> {
    global().sink()
}

pub fn set_global_formatter(sink: Box<dyn FormatterSink>) {
    global().set_sink(sink);
}

pub fn set_auto_log_enabled(enabled: bool) {
    global().set_auto_log_enabled(enabled);
}

pub fn enable_auto_log() {
    set_auto_log_enabled(true);
}

pub fn disable_auto_log() {
    set_auto_log_enabled(false);
}

pub fn is_auto_log_enabled() -> bool {
    global().is_auto_log_enabled()
}

pub fn log_config_change(event: &ChangeEvent, new_config: &dyn Any) {
    global().log_config_change(event, new_config);
}

pub fn log_env_change(old_env: Environment, new_env: Environment) {
    global().log_env_change(old_env, new_env);
}

pub fn log_config_error(event: &ChangeEvent) {
    global().log_config_error(event);
}

/// Emit a config-changed record even when automatic logging is off.
pub fn force_log_config_change(event: &ChangeEvent, new_config: &dyn Any) {
    global().force_log_config_change(event, new_config);
}

/// Emit an environment-transition record even when automatic logging is off.
pub fn force_log_env_change(old_env: Environment, new_env: Environment) {
    global().force_log_env_change(old_env, new_env);
}

/// Emit an error record even when automatic logging is off.
pub fn force_log_config_error(event: &ChangeEvent) {
    global().force_log_config_error(event);
}
