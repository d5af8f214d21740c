//! Builders and the Configurable contract.

mod common;

use std::time::Duration;

use safe_config::config::{Database, JobTask, Jobs, Monitoring};
use safe_config::{AppConfig, Configurable};

#[test]
fn test_database_builder_chain() {
    let mut db = Database::default();
    db.enable()
        .with_migration(true, "app_")
        .with_logging("warn", Duration::from_millis(200));

    let expected = Database {
        enabled: true,
        auto_migrate: true,
        table_prefix: "app_".into(),
        log_level: "warn".into(),
        slow_threshold: Duration::from_millis(200),
        ..Database::default()
    };
    assert_eq!(db, expected);
}

#[test]
fn test_jobs_keyed_mutation() {
    let mut jobs = Jobs::default();
    jobs.with_task("daily", JobTask::new("0 0 0 * * *"))
        .disable_task("daily");
    assert_eq!(jobs.task("daily").map(|t| t.enabled), Some(false));

    let mut empty = Jobs::default();
    empty.disable_task("daily");
    assert!(empty.tasks.is_none());
    assert_eq!(empty, Jobs::default());
}

#[test]
fn test_enable_unknown_task_leaves_record_unchanged() {
    let mut jobs = Jobs::default();
    jobs.with_task("hourly", JobTask::default());
    let before = jobs.clone();

    jobs.enable_task("weekly")
        .add_tag_to_task("weekly", "x")
        .set_task_cron_spec("weekly", "* * * * * *");
    assert_eq!(jobs, before);
}

#[test]
fn test_setters_return_receiver() {
    let mut config = AppConfig::default();
    let addr: *const AppConfig = &config;

    assert!(std::ptr::eq(addr, config.with_name("svc")));
    assert!(std::ptr::eq(addr, config.with_debug(true)));
    assert!(std::ptr::eq(addr, config.with_monitoring(Monitoring::default())));
    assert_eq!(config.name, "svc");
    assert!(config.debug);
    assert_eq!(config.monitoring, Some(Monitoring::default()));
}

#[test]
fn test_clone_is_independent() {
    let original = common::full_config();
    let mut copy = original.clone_config();

    let mut changed = common::full_config();
    changed.with_name("changed");
    changed.jobs.as_mut().unwrap().disable_task("report");
    assert!(copy.set(Box::new(changed)));

    let copied = copy.get().downcast_ref::<AppConfig>().unwrap();
    assert_eq!(copied.name, "changed");
    assert_eq!(original.name, "gateway");
    assert!(original.safe().is_job_task_enabled("report"));
    assert!(!copied.safe().is_job_task_enabled("report"));
}

#[test]
fn test_set_with_foreign_type_is_noop() {
    let mut config = common::full_config();
    let before = config.clone();

    assert!(!config.set(Box::new(Jobs::default())));
    assert!(!config.set(Box::new("gateway".to_string())));
    assert_eq!(config, before);
}

#[test]
fn test_validate_is_pure() {
    let mut config = common::full_config();
    config.with_channel_buffers(Default::default());
    let before = config.clone();

    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(config, before);
    assert!(common::full_config().validate().is_ok());
}
