//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (sizes > 0, known log levels)
//! - Check scheduled tasks are runnable and their breakers usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Absent sections are never an error; only present ones are checked

use thiserror::Error;

use crate::config::schema::{AppConfig, BreakerCfg, JobTask, Jobs};

/// Database log levels understood by the ORM.
pub const DATABASE_LOG_LEVELS: &[&str] = &["silent", "error", "warn", "info"];

/// Highest accepted task priority.
pub const MAX_TASK_PRIORITY: u32 = 99_999;

/// A single semantic violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(String),

    #[error("{0} must be greater than zero")]
    NotPositive(String),

    #[error("{field} has unsupported value `{value}`")]
    Unsupported { field: String, value: String },

    #[error("{0} must start with '/'")]
    NotAPath(String),

    #[error("{field} must be within {range}")]
    OutOfRange { field: String, range: &'static str },
}

/// Validate a whole configuration tree.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(metrics) = config.monitoring.as_ref().and_then(|m| m.metrics.as_ref()) {
        check_path("monitoring.metrics.endpoint", &metrics.endpoint, &mut errors);
    }

    if let Some(pprof) = config.middleware.as_ref().and_then(|m| m.pprof.as_ref()) {
        if pprof.enabled {
            check_path("middleware.pprof.path_prefix", &pprof.path_prefix, &mut errors);
        }
    }

    if let Some(mqtt) = &config.mqtt {
        if mqtt.enabled && mqtt.broker.is_empty() {
            errors.push(ValidationError::Empty("mqtt.broker".into()));
        }
    }

    if let Some(captcha) = &config.captcha {
        if captcha.enabled && captcha.key_len == 0 {
            errors.push(ValidationError::NotPositive("captcha.key_len".into()));
        }
    }

    if let Some(db) = &config.database {
        if !db.log_level.is_empty() && !DATABASE_LOG_LEVELS.contains(&db.log_level.as_str()) {
            errors.push(ValidationError::Unsupported {
                field: "database.log_level".into(),
                value: db.log_level.clone(),
            });
        }
    }

    if let Some(jobs) = &config.jobs {
        validate_jobs(jobs, &mut errors);
    }

    if let Some(batch) = &config.batch_processing {
        let sizes = [
            ("offline_message_batch_size", batch.offline_message_batch_size),
            ("message_pool_buffer_size", batch.message_pool_buffer_size),
            ("connection_batch_size", batch.connection_batch_size),
        ];
        for (name, value) in sizes {
            check_positive(&format!("batch_processing.{}", name), value, &mut errors);
        }
    }

    if let Some(buffers) = &config.channel_buffers {
        let multipliers = [
            ("broadcast_buffer_multiplier", buffers.broadcast_buffer_multiplier),
            ("node_message_buffer_multiplier", buffers.node_message_buffer_multiplier),
        ];
        for (name, value) in multipliers {
            check_positive(&format!("channel_buffers.{}", name), value, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Jobs are only checked when the scheduler is enabled; disabled tasks are skipped.
pub fn validate_jobs(jobs: &Jobs, errors: &mut Vec<ValidationError>) {
    if !jobs.enabled {
        return;
    }

    if jobs.time_zone.is_empty() {
        errors.push(ValidationError::Empty("jobs.time_zone".into()));
    }
    if jobs.graceful_shutdown_secs == 0 {
        errors.push(ValidationError::NotPositive("jobs.graceful_shutdown_secs".into()));
    }
    check_jitter("jobs.retry_jitter", jobs.retry_jitter, errors);

    for (name, task) in jobs.tasks.iter().flatten() {
        validate_task(&format!("jobs.tasks.{}", name), task, errors);
    }
}

fn validate_task(prefix: &str, task: &JobTask, errors: &mut Vec<ValidationError>) {
    if !task.enabled {
        return;
    }

    if task.cron_spec.trim().is_empty() {
        errors.push(ValidationError::Empty(format!("{}.cron_spec", prefix)));
    }
    if task.priority > MAX_TASK_PRIORITY {
        errors.push(ValidationError::OutOfRange {
            field: format!("{}.priority", prefix),
            range: "0..=99999",
        });
    }
    check_jitter(&format!("{}.retry_jitter", prefix), task.retry_jitter, errors);
    validate_breaker(&format!("{}.breaker", prefix), &task.breaker, errors);
}

fn validate_breaker(prefix: &str, breaker: &BreakerCfg, errors: &mut Vec<ValidationError>) {
    if !breaker.enabled {
        return;
    }

    if breaker.max_failures == 0 {
        errors.push(ValidationError::NotPositive(format!("{}.max_failures", prefix)));
    }
    if breaker.reset_timeout_secs == 0 {
        errors.push(ValidationError::NotPositive(format!("{}.reset_timeout_secs", prefix)));
    }
    if breaker.half_open_successes == 0 {
        errors.push(ValidationError::NotPositive(format!("{}.half_open_successes", prefix)));
    }
}

fn check_jitter(field: &str, value: f64, errors: &mut Vec<ValidationError>) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ValidationError::OutOfRange {
            field: field.to_string(),
            range: "0.0..=1.0",
        });
    }
}

fn check_positive(field: &str, value: usize, errors: &mut Vec<ValidationError>) {
    if value == 0 {
        errors.push(ValidationError::NotPositive(field.to_string()));
    }
}

fn check_path(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if !value.is_empty() && !value.starts_with('/') {
        errors.push(ValidationError::NotAPath(field.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{BatchProcessing, Database, Monitoring};

    #[test]
    fn test_empty_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();

        let mut monitoring = Monitoring::default();
        monitoring.with_metrics(true, "metrics");
        let mut db = Database::default();
        db.with_logging("verbose", std::time::Duration::ZERO);

        config
            .with_monitoring(monitoring)
            .with_database(db)
            .with_batch_processing(BatchProcessing::default());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::NotAPath("monitoring.metrics.endpoint".into())));
        assert!(errors.contains(&ValidationError::Unsupported {
            field: "database.log_level".into(),
            value: "verbose".into(),
        }));
    }

    #[test]
    fn test_jobs_rules() {
        let mut jobs = Jobs::default();
        let mut blank = JobTask::new("");
        blank.with_description("no schedule");
        jobs.with_task("blank", blank)
            .with_task("off", JobTask::default());

        let mut errors = Vec::new();
        validate_jobs(&jobs, &mut errors);
        assert!(errors.is_empty()); // Disabled scheduler is not checked

        jobs.enable().with_time_zone("Asia/Shanghai").with_graceful_shutdown(30);
        validate_jobs(&jobs, &mut errors);
        assert_eq!(errors, vec![ValidationError::Empty("jobs.tasks.blank.cron_spec".into())]);
    }

    #[test]
    fn test_task_limits_and_breaker() {
        let mut task = JobTask::new("0 0 * * * *");
        task.with_priority(MAX_TASK_PRIORITY + 1)
            .with_retry_jitter(1.5)
            .with_breaker(BreakerCfg::new(0, 30, 2));

        let mut jobs = Jobs::default();
        jobs.enable()
            .with_time_zone("UTC")
            .with_graceful_shutdown(10)
            .with_retry_jitter(f64::NAN)
            .with_task("sync", task);

        let mut errors = Vec::new();
        validate_jobs(&jobs, &mut errors);
        assert_eq!(
            errors,
            vec![
                ValidationError::OutOfRange {
                    field: "jobs.retry_jitter".into(),
                    range: "0.0..=1.0",
                },
                ValidationError::OutOfRange {
                    field: "jobs.tasks.sync.priority".into(),
                    range: "0..=99999",
                },
                ValidationError::OutOfRange {
                    field: "jobs.tasks.sync.retry_jitter".into(),
                    range: "0.0..=1.0",
                },
                ValidationError::NotPositive("jobs.tasks.sync.breaker.max_failures".into()),
            ]
        );

        // A disabled breaker is not checked.
        jobs.with_retry_jitter(0.2);
        let mut fixed = JobTask::new("0 0 * * * *");
        fixed.with_priority(MAX_TASK_PRIORITY).with_breaker(BreakerCfg::default());
        jobs.with_task("sync", fixed);

        let mut errors = Vec::new();
        validate_jobs(&jobs, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::NotPositive("queue.workers".into()).to_string(),
            "queue.workers must be greater than zero"
        );
        assert_eq!(
            ValidationError::Unsupported { field: "a".into(), value: "b".into() }.to_string(),
            "a has unsupported value `b`"
        );
    }
}
