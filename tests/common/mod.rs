//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use safe_config::config::{Database, I18n, JobTask, Jobs, Monitoring, ValidationError};
use safe_config::observability::{ChangeEvent, Environment, FormatterSink};
use safe_config::AppConfig;

/// `{Monitoring: {Enabled: true, Metrics: {Enabled: true, Endpoint: "/m"}}}`
pub fn monitored_config() -> AppConfig {
    let mut monitoring = Monitoring::default();
    monitoring.enable().with_metrics(true, "/m");

    let mut config = AppConfig::default();
    config.with_monitoring(monitoring);
    config
}

pub fn i18n_config(default_language: &str, default_lang: &str) -> AppConfig {
    let i18n = I18n {
        default_language: default_language.to_string(),
        default_lang: default_lang.to_string(),
        ..I18n::default()
    };

    let mut config = AppConfig::default();
    config.with_i18n(i18n);
    config
}

/// A fully populated tree touching every section the tests read.
pub fn full_config() -> AppConfig {
    let mut database = Database::default();
    database
        .enable()
        .with_driver("mysql")
        .with_migration(true, "app_")
        .with_logging("warn", Duration::from_millis(200));

    let mut jobs = Jobs::default();
    let mut report = JobTask::new("0 0 2 * * *");
    report.with_priority(5).with_tags(vec!["daily".into()]);
    jobs.enable()
        .with_time_zone("UTC")
        .with_graceful_shutdown(30)
        .with_task("report", report);

    let mut config = monitored_config();
    config
        .with_name("gateway")
        .with_version("1.2.0")
        .with_environment(Environment::Staging)
        .with_database(database)
        .with_jobs(jobs);
    config
}

/// Sink that records one line per emission.
#[derive(Default, Clone)]
pub struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }

    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl FormatterSink for Recorder {
    fn log_config_changed(&self, event: &ChangeEvent, new_config: &dyn std::any::Any) {
        let name = new_config
            .downcast_ref::<AppConfig>()
            .map_or("?", |config| config.name.as_str());
        self.push(format!("changed:{}:{}", event.source, name));
    }

    fn log_environment_changed(&self, old_env: Environment, new_env: Environment) {
        self.push(format!("env:{}->{}", old_env, new_env));
    }

    fn log_error(&self, event: &ChangeEvent) {
        self.push(format!("error:{}", event.source));
    }

    fn log_validation(&self, result: &Result<(), Vec<ValidationError>>, _: Duration) {
        match result {
            Ok(()) => self.push("valid".to_string()),
            Err(errors) => self.push(format!("invalid:{}", errors.len())),
        }
    }
}
