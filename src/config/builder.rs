//! Fluent setters for configuration records.
//!
//! # Design Decisions
//! - Every setter takes `&mut self` and returns the same receiver so calls chain
//! - Paired fields get one multi-argument setter (`with_migration`, `with_logging`)
//! - Keyed task mutations silently do nothing when the task is absent
//! - Builders never validate; that is `validate_config`'s job

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::schema::*;
use crate::observability::Environment;

impl AppConfig {
    pub fn with_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn with_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    pub fn with_debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    pub fn with_environment(&mut self, environment: Environment) -> &mut Self {
        self.environment = environment;
        self
    }

    pub fn with_server(&mut self, server: Server) -> &mut Self {
        self.server = Some(server);
        self
    }

    pub fn with_http(&mut self, http: Http) -> &mut Self {
        self.http = Some(http);
        self
    }

    pub fn with_health(&mut self, health: Health) -> &mut Self {
        self.health = Some(health);
        self
    }

    pub fn with_middleware(&mut self, middleware: Middleware) -> &mut Self {
        self.middleware = Some(middleware);
        self
    }

    pub fn with_monitoring(&mut self, monitoring: Monitoring) -> &mut Self {
        self.monitoring = Some(monitoring);
        self
    }

    pub fn with_i18n(&mut self, i18n: I18n) -> &mut Self {
        self.i18n = Some(i18n);
        self
    }

    pub fn with_sms(&mut self, sms: Sms) -> &mut Self {
        self.sms = Some(sms);
        self
    }

    pub fn with_queue(&mut self, queue: Queue) -> &mut Self {
        self.queue = Some(queue);
        self
    }

    pub fn with_mqtt(&mut self, mqtt: Mqtt) -> &mut Self {
        self.mqtt = Some(mqtt);
        self
    }

    pub fn with_captcha(&mut self, captcha: Captcha) -> &mut Self {
        self.captcha = Some(captcha);
        self
    }

    pub fn with_database(&mut self, database: Database) -> &mut Self {
        self.database = Some(database);
        self
    }

    pub fn with_jobs(&mut self, jobs: Jobs) -> &mut Self {
        self.jobs = Some(jobs);
        self
    }

    pub fn with_batch_processing(&mut self, batch: BatchProcessing) -> &mut Self {
        self.batch_processing = Some(batch);
        self
    }

    pub fn with_channel_buffers(&mut self, buffers: ChannelBuffers) -> &mut Self {
        self.channel_buffers = Some(buffers);
        self
    }
}

impl Monitoring {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_metrics(&mut self, enabled: bool, endpoint: impl Into<String>) -> &mut Self {
        self.metrics = Some(Metrics {
            enabled,
            endpoint: endpoint.into(),
        });
        self
    }

    pub fn with_jaeger(&mut self, jaeger: Jaeger) -> &mut Self {
        self.jaeger = Some(jaeger);
        self
    }
}

impl PProf {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_path_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn with_port(&mut self, port: u16) -> &mut Self {
        self.port = port;
        self
    }
}

impl I18n {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_module_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.module_name = name.into();
        self
    }

    pub fn with_default_language(&mut self, language: impl Into<String>) -> &mut Self {
        self.default_language = language.into();
        self
    }

    pub fn with_supported_languages(&mut self, languages: Vec<String>) -> &mut Self {
        self.supported_languages = languages;
        self
    }

    pub fn with_locale_dir(&mut self, dir: impl Into<String>) -> &mut Self {
        self.locale_dir = dir.into();
        self
    }
}

impl Sms {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_credentials(
        &mut self,
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> &mut Self {
        self.access_key_id = access_key_id.into();
        self.access_key_secret = access_key_secret.into();
        self
    }

    pub fn with_sign_name(&mut self, sign_name: impl Into<String>) -> &mut Self {
        self.sign_name = sign_name.into();
        self
    }

    pub fn with_template_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.template_code = code.into();
        self
    }

    pub fn with_endpoint(&mut self, endpoint: impl Into<String>) -> &mut Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_region(&mut self, region: impl Into<String>) -> &mut Self {
        self.region = region.into();
        self
    }
}

impl Queue {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_driver(&mut self, driver: impl Into<String>) -> &mut Self {
        self.driver = driver.into();
        self
    }

    pub fn with_workers(&mut self, workers: u32) -> &mut Self {
        self.workers = workers;
        self
    }

    pub fn with_capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        self
    }
}

impl Mqtt {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_broker(&mut self, broker: impl Into<String>) -> &mut Self {
        self.broker = broker.into();
        self
    }

    pub fn with_client_id(&mut self, client_id: impl Into<String>) -> &mut Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_credentials(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> &mut Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_clean_session(&mut self, clean: bool) -> &mut Self {
        self.clean_session = clean;
        self
    }

    pub fn with_qos(&mut self, qos: u8) -> &mut Self {
        self.qos = qos;
        self
    }

    pub fn with_keep_alive(&mut self, keep_alive: Duration) -> &mut Self {
        self.keep_alive = keep_alive;
        self
    }
}

impl Captcha {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_type(&mut self, kind: impl Into<String>) -> &mut Self {
        self.kind = kind.into();
        self
    }

    pub fn with_key_len(&mut self, key_len: u32) -> &mut Self {
        self.key_len = key_len;
        self
    }

    pub fn with_image_size(&mut self, width: u32, height: u32) -> &mut Self {
        self.img_width = width;
        self.img_height = height;
        self
    }

    pub fn with_max_skew(&mut self, skew: f64) -> &mut Self {
        self.max_skew = skew;
        self
    }

    pub fn with_dot_count(&mut self, count: u32) -> &mut Self {
        self.dot_count = count;
        self
    }

    pub fn with_expire(&mut self, expire: Duration) -> &mut Self {
        self.expire = expire;
        self
    }
}

impl Database {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_driver(&mut self, driver: impl Into<String>) -> &mut Self {
        self.driver = driver.into();
        self
    }

    pub fn with_dsn(&mut self, dsn: impl Into<String>) -> &mut Self {
        self.dsn = dsn.into();
        self
    }

    pub fn with_migration(
        &mut self,
        auto_migrate: bool,
        table_prefix: impl Into<String>,
    ) -> &mut Self {
        self.auto_migrate = auto_migrate;
        self.table_prefix = table_prefix.into();
        self
    }

    pub fn with_logging(
        &mut self,
        log_level: impl Into<String>,
        slow_threshold: Duration,
    ) -> &mut Self {
        self.log_level = log_level.into();
        self.slow_threshold = slow_threshold;
        self
    }

    pub fn with_pool(&mut self, max_open: u32, max_idle: u32) -> &mut Self {
        self.max_open_conns = max_open;
        self.max_idle_conns = max_idle;
        self
    }
}

impl Jobs {
    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_time_zone(&mut self, tz: impl Into<String>) -> &mut Self {
        self.time_zone = tz.into();
        self
    }

    pub fn with_graceful_shutdown(&mut self, secs: u64) -> &mut Self {
        self.graceful_shutdown_secs = secs;
        self
    }

    pub fn with_max_retries(&mut self, retries: u32) -> &mut Self {
        self.max_retries = retries;
        self
    }

    pub fn with_retry_interval(&mut self, secs: u64) -> &mut Self {
        self.retry_interval_secs = secs;
        self
    }

    pub fn with_retry_jitter(&mut self, jitter: f64) -> &mut Self {
        self.retry_jitter = jitter;
        self
    }

    pub fn with_max_concurrent_jobs(&mut self, max: u32) -> &mut Self {
        self.max_concurrent_jobs = max;
        self
    }

    pub fn enable_distribute(&mut self) -> &mut Self {
        self.distribute = true;
        self
    }

    pub fn disable_distribute(&mut self) -> &mut Self {
        self.distribute = false;
        self
    }

    /// Insert or replace a task, creating the task map on first use.
    pub fn with_task(&mut self, name: impl Into<String>, task: JobTask) -> &mut Self {
        self.tasks
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), task);
        self
    }

    pub fn remove_task(&mut self, name: &str) -> &mut Self {
        if let Some(tasks) = self.tasks.as_mut() {
            tasks.remove(name);
        }
        self
    }

    pub fn enable_task(&mut self, name: &str) -> &mut Self {
        self.update_task(name, |task| task.enabled = true)
    }

    pub fn disable_task(&mut self, name: &str) -> &mut Self {
        self.update_task(name, |task| task.enabled = false)
    }

    /// Add a tag to a task unless it already carries it.
    pub fn add_tag_to_task(&mut self, name: &str, tag: &str) -> &mut Self {
        self.update_task(name, |task| {
            if !task.tags.iter().any(|t| t == tag) {
                task.tags.push(tag.to_string());
            }
        })
    }

    pub fn set_task_priority(&mut self, name: &str, priority: u32) -> &mut Self {
        self.update_task(name, |task| task.priority = priority)
    }

    pub fn set_task_cron_spec(&mut self, name: &str, cron_spec: &str) -> &mut Self {
        self.update_task(name, |task| task.cron_spec = cron_spec.to_string())
    }

    pub fn set_task_timeout(&mut self, name: &str, secs: u64) -> &mut Self {
        self.update_task(name, |task| task.timeout_secs = secs)
    }

    pub fn set_task_max_retries(&mut self, name: &str, retries: u32) -> &mut Self {
        self.update_task(name, |task| task.max_retries = retries)
    }

    pub fn remove_tag_from_task(&mut self, name: &str, tag: &str) -> &mut Self {
        self.update_task(name, |task| task.tags.retain(|t| t != tag))
    }

    pub fn add_dependency_to_task(&mut self, name: &str, dependency: DependencyTask) -> &mut Self {
        self.update_task(name, |task| task.dependencies.push(dependency))
    }

    /// Drop every dependency that references `dependency_name`. Inline
    /// dependencies are kept.
    pub fn remove_dependency_from_task(
        &mut self,
        name: &str,
        dependency_name: &str,
    ) -> &mut Self {
        self.update_task(name, |task| {
            task.dependencies.retain(|dep| dep.task_name != dependency_name)
        })
    }

    /// Tasks carrying `tag`.
    pub fn tasks_by_tag(&self, tag: &str) -> BTreeMap<&str, &JobTask> {
        self.tasks_where(|task| task.tags.iter().any(|t| t == tag))
    }

    /// Tasks whose priority lies in `min..=max`.
    pub fn tasks_by_priority(&self, min: u32, max: u32) -> BTreeMap<&str, &JobTask> {
        self.tasks_where(|task| (min..=max).contains(&task.priority))
    }

    pub fn task(&self, name: &str) -> Option<&JobTask> {
        self.tasks.as_ref().and_then(|tasks| tasks.get(name))
    }

    /// True when the scheduler and the named task are both enabled.
    pub fn is_task_enabled(&self, name: &str) -> bool {
        self.enabled && self.task(name).is_some_and(|task| task.enabled)
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .flat_map(|tasks| tasks.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn enabled_tasks(&self) -> BTreeMap<&str, &JobTask> {
        self.tasks_where(|task| task.enabled)
    }

    fn tasks_where(&self, keep: impl Fn(&JobTask) -> bool) -> BTreeMap<&str, &JobTask> {
        self.tasks
            .iter()
            .flat_map(|tasks| tasks.iter())
            .filter(|(_, task)| keep(task))
            .map(|(name, task)| (name.as_str(), task))
            .collect()
    }

    fn update_task(&mut self, name: &str, apply: impl FnOnce(&mut JobTask)) -> &mut Self {
        if let Some(task) = self.tasks.as_mut().and_then(|tasks| tasks.get_mut(name)) {
            apply(task);
        }
        self
    }
}

impl JobTask {
    pub fn new(cron_spec: impl Into<String>) -> Self {
        Self {
            enabled: true,
            cron_spec: cron_spec.into(),
            ..Self::default()
        }
    }

    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }

    pub fn with_cron_spec(&mut self, cron_spec: impl Into<String>) -> &mut Self {
        self.cron_spec = cron_spec.into();
        self
    }

    pub fn with_immediate_start(&mut self, immediate: bool) -> &mut Self {
        self.immediate_start = immediate;
        self
    }

    pub fn with_timeout(&mut self, secs: u64) -> &mut Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_overlap_prevent(&mut self, prevent: bool) -> &mut Self {
        self.overlap_prevent = prevent;
        self
    }

    pub fn with_priority(&mut self, priority: u32) -> &mut Self {
        self.priority = priority;
        self
    }

    pub fn with_tags(&mut self, tags: Vec<String>) -> &mut Self {
        self.tags = tags;
        self
    }

    pub fn with_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    pub fn with_max_retries(&mut self, retries: u32) -> &mut Self {
        self.max_retries = retries;
        self
    }

    pub fn with_retry_interval(&mut self, secs: u64) -> &mut Self {
        self.retry_interval_secs = secs;
        self
    }

    pub fn with_retry_jitter(&mut self, jitter: f64) -> &mut Self {
        self.retry_jitter = jitter;
        self
    }

    pub fn with_max_concurrent(&mut self, max: u32) -> &mut Self {
        self.max_concurrent = max;
        self
    }

    pub fn with_dependencies(&mut self, dependencies: Vec<DependencyTask>) -> &mut Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_breaker(&mut self, breaker: BreakerCfg) -> &mut Self {
        self.breaker = breaker;
        self
    }
}

impl DependencyTask {
    /// Depend on a task defined elsewhere in the task map.
    pub fn named(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            inline: None,
        }
    }

    /// Depend on a task defined in place.
    pub fn inline(task: JobTask) -> Self {
        Self {
            task_name: String::new(),
            inline: Some(task),
        }
    }
}

impl BreakerCfg {
    /// An enabled breaker.
    pub fn new(max_failures: u32, reset_timeout_secs: u64, half_open_successes: u32) -> Self {
        Self {
            enabled: true,
            max_failures,
            reset_timeout_secs,
            half_open_successes,
        }
    }

    pub fn enable(&mut self) -> &mut Self {
        self.enabled = true;
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }
}

impl BatchProcessing {
    pub fn with_offline_message_batch_size(&mut self, size: usize) -> &mut Self {
        self.offline_message_batch_size = size;
        self
    }

    pub fn with_message_pool_buffer_size(&mut self, size: usize) -> &mut Self {
        self.message_pool_buffer_size = size;
        self
    }

    pub fn with_connection_batch_size(&mut self, size: usize) -> &mut Self {
        self.connection_batch_size = size;
        self
    }
}

impl ChannelBuffers {
    pub fn with_broadcast_buffer_multiplier(&mut self, multiplier: usize) -> &mut Self {
        self.broadcast_buffer_multiplier = multiplier;
        self
    }

    pub fn with_node_message_buffer_multiplier(&mut self, multiplier: usize) -> &mut Self {
        self.node_message_buffer_multiplier = multiplier;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setter_returns_receiver() {
        let mut db = Database::default();
        let db_ptr: *const Database = &db;
        let returned: *const Database = db.with_driver("postgres");
        assert!(std::ptr::eq(db_ptr, returned));
        assert_eq!(db.driver, "postgres");
    }

    #[test]
    fn test_task_helpers() {
        let mut jobs = Jobs::default();
        jobs.enable()
            .with_task("cleanup", JobTask::new("0 */5 * * * *"))
            .with_task("sync", JobTask::new("0 0 * * * *"))
            .disable_task("sync")
            .add_tag_to_task("cleanup", "maintenance")
            .add_tag_to_task("cleanup", "maintenance");

        assert_eq!(jobs.task_names(), vec!["cleanup", "sync"]);
        assert_eq!(jobs.enabled_tasks().keys().copied().collect::<Vec<_>>(), vec!["cleanup"]);
        assert_eq!(jobs.task("cleanup").map(|t| t.tags.len()), Some(1));
        assert!(jobs.is_task_enabled("cleanup"));
        assert!(!jobs.is_task_enabled("sync"));

        jobs.disable();
        assert!(!jobs.is_task_enabled("cleanup"));

        jobs.remove_task("cleanup");
        assert!(jobs.task("cleanup").is_none());
    }

    #[test]
    fn test_keyed_mutation_without_map_is_noop() {
        let mut jobs = Jobs::default();
        jobs.set_task_priority("ghost", 3).remove_task("ghost");
        assert!(jobs.tasks.is_none());
        assert!(jobs.task_names().is_empty());
    }

    #[test]
    fn test_task_field_setters() {
        let mut jobs = Jobs::default();
        let mut report = JobTask::new("0 0 * * * *");
        report.with_tags(vec!["nightly".into(), "io".into()]);
        jobs.with_task("report", report)
            .set_task_timeout("report", 90)
            .set_task_max_retries("report", 4)
            .remove_tag_from_task("report", "io")
            .remove_tag_from_task("report", "missing");

        let task = jobs.task("report").unwrap();
        assert_eq!(task.timeout_secs, 90);
        assert_eq!(task.max_retries, 4);
        assert_eq!(task.tags, vec!["nightly".to_string()]);
    }

    #[test]
    fn test_dependencies_keep_inline_entries() {
        let mut jobs = Jobs::default();
        jobs.with_task("sync", JobTask::new("0 0 * * * *"))
            .add_dependency_to_task("sync", DependencyTask::named("cleanup"))
            .add_dependency_to_task("sync", DependencyTask::named("warmup"))
            .add_dependency_to_task("sync", DependencyTask::inline(JobTask::new("*/5 * * * * *")))
            .remove_dependency_from_task("sync", "cleanup");

        let deps = &jobs.task("sync").unwrap().dependencies;
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0], DependencyTask::named("warmup"));
        assert!(deps[1].inline.is_some());
    }

    #[test]
    fn test_task_queries() {
        let mut jobs = Jobs::default();
        let mut low = JobTask::new("0 0 * * * *");
        low.with_priority(1).with_tags(vec!["io".into()]);
        let mut mid = JobTask::new("0 0 * * * *");
        mid.with_priority(50);
        let mut high = JobTask::new("0 0 * * * *");
        high.with_priority(900).with_tags(vec!["io".into(), "net".into()]);
        jobs.with_task("low", low)
            .with_task("mid", mid)
            .with_task("high", high);

        let io: Vec<_> = jobs.tasks_by_tag("io").into_keys().collect();
        assert_eq!(io, vec!["high", "low"]);
        assert!(jobs.tasks_by_tag("cpu").is_empty());

        let ranged: Vec<_> = jobs.tasks_by_priority(1, 50).into_keys().collect();
        assert_eq!(ranged, vec!["low", "mid"]);
        assert!(jobs.tasks_by_priority(51, 899).is_empty());
    }

    #[test]
    fn test_scheduler_switches() {
        let mut jobs = Jobs::default();
        jobs.enable_distribute()
            .with_retry_jitter(0.2)
            .with_max_concurrent_jobs(8);
        assert!(jobs.distribute);
        assert_eq!(jobs.retry_jitter, 0.2);
        assert_eq!(jobs.max_concurrent_jobs, 8);

        jobs.disable_distribute();
        assert!(!jobs.distribute);
    }

    #[test]
    fn test_absent_task_updates_are_noops() {
        let mut jobs = Jobs::default();
        jobs.with_task("only", JobTask::new("0 0 * * * *"));
        let before = jobs.clone();

        jobs.set_task_timeout("ghost", 1)
            .set_task_max_retries("ghost", 1)
            .remove_tag_from_task("ghost", "x")
            .add_dependency_to_task("ghost", DependencyTask::named("only"))
            .remove_dependency_from_task("ghost", "only");
        assert_eq!(jobs, before);
    }
}
