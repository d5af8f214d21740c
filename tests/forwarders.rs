//! Process-wide formatter and forwarders.
//!
//! Everything touching the global sink lives in one test so that parallel
//! test threads never observe each other's switch state.

mod common;

use std::io::Write;
use std::time::Duration;

use safe_config::observability::formatter;
use safe_config::observability::{ChangeEvent, Environment, EventKind};
use safe_config::ConfigStore;

#[test]
fn test_global_forwarders() {
    let recorder = common::Recorder::default();
    formatter::set_global_formatter(Box::new(recorder.clone()));
    assert!(formatter::is_auto_log_enabled());

    // The getter hands back the installed sink.
    let sink = formatter::global_formatter();
    sink.log_environment_changed(Environment::Test, Environment::Uat);
    sink.log_validation(&Ok(()), Duration::from_micros(40));
    assert_eq!(recorder.lines(), vec!["env:test->uat", "valid"]);
    recorder.clear();

    // Implicit emissions flow while the switch is on.
    let store = ConfigStore::default();
    let mut next = common::full_config();
    next.with_name("v1");
    store.replace(next, "bootstrap");
    assert_eq!(
        recorder.lines(),
        vec!["changed:bootstrap:v1", "env:development->staging"]
    );

    // Switched off: the store stays silent, forced emissions still land.
    formatter::disable_auto_log();
    assert!(!formatter::is_auto_log_enabled());
    let mut next = common::full_config();
    next.with_name("v2").with_environment(Environment::Production);
    store.replace(next, "silent");

    let event = ChangeEvent::new(EventKind::ConfigChanged, "manual");
    formatter::force_log_config_change(&event, store.current().as_ref());
    formatter::force_log_env_change(Environment::Staging, Environment::Production);
    let err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad");
    formatter::force_log_config_error(&ChangeEvent::error("loader", &err));

    assert_eq!(
        recorder.lines(),
        vec![
            "changed:bootstrap:v1",
            "env:development->staging",
            "changed:manual:v2",
            "env:staging->production",
            "error:loader",
        ]
    );

    // Back on: a failed reload is reported and the current root kept.
    formatter::enable_auto_log();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name = ").unwrap();
    assert!(store.reload_from(file.path()).is_err());
    assert_eq!(store.current().name, "v2");
    assert_eq!(
        recorder.lines().last().cloned(),
        Some(format!("error:{}", file.path().display()))
    );
}
