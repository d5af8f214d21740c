//! Ready-made module settings.
//!
//! `Default` stays zero-valued everywhere; presets are the opinionated
//! starting points a deployment usually edits rather than writes from scratch.

use crate::config::schema::*;

impl Jobs {
    /// Enabled scheduler with a cleanup task and a data sync task that
    /// depends on it.
    pub fn preset() -> Self {
        let mut cleanup = JobTask::new("0 */5 * * * *");
        cleanup
            .with_timeout(300)
            .with_overlap_prevent(true)
            .with_max_retries(3)
            .with_retry_interval(10)
            .with_description("Purge expired data and stale cache entries")
            .with_breaker(BreakerCfg::new(5, 30, 2));

        let mut validate = JobTask::new("0 */30 * * * *");
        validate
            .with_timeout(60)
            .with_overlap_prevent(true)
            .with_description("Verify data before syncing");

        let mut sync = JobTask::new("0 0 * * * *");
        sync.with_timeout(600)
            .with_overlap_prevent(true)
            .with_max_retries(3)
            .with_retry_interval(15)
            .with_description("Push data to the remote store")
            .with_dependencies(vec![
                DependencyTask::named("cleanup"),
                DependencyTask::inline(validate),
            ])
            .with_breaker(BreakerCfg::new(3, 60, 2));

        let mut jobs = Jobs::default();
        jobs.enable()
            .with_time_zone("Asia/Shanghai")
            .with_graceful_shutdown(30)
            .with_max_retries(3)
            .with_retry_interval(5)
            .with_task("cleanup", cleanup)
            .with_task("data-sync", sync);
        jobs
    }
}

impl I18n {
    /// Disabled, English by default, negotiated from header, query or cookie.
    pub fn preset() -> Self {
        Self {
            module_name: I18N_MODULE_NAME.to_string(),
            enabled: false,
            default_language: "en".to_string(),
            default_lang: String::new(),
            supported_languages: ["en", "zh", "ja", "ko"].map(String::from).to_vec(),
            locale_dir: "./locales".to_string(),
            header_name: "Accept-Language".to_string(),
            query_param: "lang".to_string(),
            cookie_name: "language".to_string(),
        }
    }
}

impl PProf {
    /// Disabled profiler on the conventional prefix and port.
    pub fn preset() -> Self {
        Self {
            enabled: false,
            path_prefix: "/debug/pprof".to_string(),
            port: 6060,
        }
    }
}
