//! Loading configuration files from disk.

use std::io::Write;
use std::time::Duration;

use safe_config::config::{load_config, ConfigError, ValidationError};
use safe_config::Environment;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
name = "im-gateway"
environment = "production"

[monitoring]
enabled = true

[monitoring.metrics]
enabled = true
endpoint = "/metrics"

[i18n]
enabled = true
default_lang = "zh-CN"

[database]
enabled = true
log_level = "warn"
slow_threshold = 250

[jobs]
enabled = true
time_zone = "Asia/Shanghai"
graceful_shutdown_secs = 30

[jobs.tasks.cleanup]
enabled = true
cron_spec = "0 */10 * * * *"
tags = ["maintenance"]
"#,
    );

    let config = load_config(file.path()).unwrap();
    let safe = config.safe();

    assert_eq!(config.environment, Environment::Production);
    assert!(safe.is_metrics_enabled());
    assert_eq!(safe.get_metrics_endpoint("/m"), "/metrics");
    assert_eq!(safe.get_i18n_default_lang("en"), "zh-CN");
    assert_eq!(safe.get_slow_threshold(Duration::ZERO), Duration::from_millis(250));
    assert!(safe.is_job_task_enabled("cleanup"));
    assert!(safe.mqtt().is_absent());
    assert_eq!(safe.get_mqtt_broker("tcp://localhost:1883"), "tcp://localhost:1883");
}

#[test]
fn test_load_rejects_invalid_file() {
    let file = write_config(
        "[jobs]\nenabled = true\ntime_zone = \"UTC\"\ngraceful_shutdown_secs = 0\n",
    );

    match load_config(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert_eq!(
                errors,
                vec![ValidationError::NotPositive("jobs.graceful_shutdown_secs".into())]
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_load_rejects_unknown_environment() {
    let file = write_config("environment = \"mars\"\n");
    assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
}
