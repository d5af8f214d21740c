//! Named, domain-specific queries over a `SafeAccess` handle.
//!
//! # Responsibilities
//! - Subtree accessors rooted at well-known children (`mqtt()`, `sms()`, ...)
//! - Leaf accessors that read one value with the caller's default
//!
//! # Design Decisions
//! - Every accessor is total; missing configuration surfaces as the default
//! - Flag accessors without a default parameter default to `false`
//! - Only the i18n accessors know about aliases and self-identity

use std::time::Duration;

use super::safe::SafeAccess;
use crate::config::schema::I18N_MODULE_NAME;

impl<'a> SafeAccess<'a> {
    // Subtree accessors

    pub fn server(self) -> Self {
        self.field("Server")
    }

    pub fn http(self) -> Self {
        self.field("HTTP")
    }

    pub fn health(self) -> Self {
        self.field("Health")
    }

    pub fn redis(self) -> Self {
        self.field("Redis")
    }

    pub fn mysql(self) -> Self {
        self.field("MySQL")
    }

    pub fn middleware(self) -> Self {
        self.field("Middleware")
    }

    pub fn cors(self) -> Self {
        self.field("CORS")
    }

    pub fn rate_limit(self) -> Self {
        self.field("RateLimit")
    }

    pub fn pprof(self) -> Self {
        self.field("PProf")
    }

    pub fn monitoring(self) -> Self {
        self.field("Monitoring")
    }

    pub fn metrics(self) -> Self {
        self.field("Metrics")
    }

    pub fn jaeger(self) -> Self {
        self.field("Jaeger")
    }

    /// The i18n section.
    ///
    /// A handle whose own `ModuleName` is `"i18n"` is already the i18n
    /// section and is returned unchanged.
    pub fn i18n(self) -> Self {
        if self.field("ModuleName").string("") == I18N_MODULE_NAME {
            return self;
        }
        self.field("I18n")
    }

    pub fn sms(self) -> Self {
        self.field("SMS")
    }

    pub fn queue(self) -> Self {
        self.field("Queue")
    }

    pub fn mqtt(self) -> Self {
        self.field("MQTT")
    }

    pub fn captcha(self) -> Self {
        self.field("Captcha")
    }

    pub fn database(self) -> Self {
        self.field("Database")
    }

    pub fn jobs(self) -> Self {
        self.field("Jobs")
    }

    pub fn batch_processing(self) -> Self {
        self.field("BatchProcessing")
    }

    pub fn channel_buffers(self) -> Self {
        self.field("ChannelBuffers")
    }

    // Common leaves

    pub fn port(self, default: i64) -> i64 {
        self.field("Port").int(default)
    }

    pub fn host<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.field("Host").string(default)
    }

    pub fn timeout(self, default: Duration) -> Duration {
        self.field("Timeout").duration(default)
    }

    pub fn name<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.field("Name").string(default)
    }

    pub fn version<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.field("Version").string(default)
    }

    pub fn debug(self, default: bool) -> bool {
        self.field("Debug").bool(default)
    }

    // Health

    pub fn is_health_enabled(self) -> bool {
        self.health().enabled(false)
    }

    pub fn get_health_path<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.health().field("Path").string(default)
    }

    pub fn is_redis_health_enabled(self) -> bool {
        self.health().redis().enabled(false)
    }

    pub fn get_redis_health_timeout(self, default: Duration) -> Duration {
        self.health().redis().timeout(default)
    }

    pub fn get_redis_health_path<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.health().redis().field("Path").string(default)
    }

    pub fn is_mysql_health_enabled(self) -> bool {
        self.health().mysql().enabled(false)
    }

    pub fn get_mysql_health_timeout(self, default: Duration) -> Duration {
        self.health().mysql().timeout(default)
    }

    pub fn get_mysql_health_path<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.health().mysql().field("Path").string(default)
    }

    // Listeners

    pub fn get_http_port(self, default: i64) -> i64 {
        self.http().port(default)
    }

    pub fn get_server_port(self, default: i64) -> i64 {
        self.server().port(default)
    }

    // Middleware

    pub fn is_cors_enabled(self) -> bool {
        self.middleware().cors().enabled(false)
    }

    pub fn is_rate_limit_enabled(self) -> bool {
        self.middleware().rate_limit().enabled(false)
    }

    pub fn is_pprof_enabled(self) -> bool {
        self.middleware().pprof().enabled(false)
    }

    pub fn get_pprof_path_prefix<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.middleware().pprof().field("PathPrefix").string(default)
    }

    // Monitoring

    pub fn is_monitoring_enabled(self) -> bool {
        self.monitoring().enabled(false)
    }

    pub fn is_metrics_enabled(self) -> bool {
        self.monitoring().metrics().enabled(false)
    }

    pub fn get_metrics_endpoint<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.monitoring().metrics().field("Endpoint").string(default)
    }

    pub fn is_jaeger_enabled(self) -> bool {
        self.monitoring().jaeger().enabled(false)
    }

    pub fn get_jaeger_service_name<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.monitoring().jaeger().field("ServiceName").string(default)
    }

    pub fn get_jaeger_endpoint<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.monitoring().jaeger().field("Endpoint").string(default)
    }

    pub fn get_jaeger_sampling_type<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.monitoring()
            .jaeger()
            .field("Sampling")
            .field("Type")
            .string(default)
    }

    // I18n

    pub fn is_i18n_enabled(self) -> bool {
        self.i18n().enabled(false)
    }

    /// Default language, falling back to the legacy `DefaultLang` field
    /// when `DefaultLanguage` is empty.
    pub fn get_i18n_default_lang<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        let i18n = self.i18n();
        let current = i18n.field("DefaultLanguage").string_or_empty();
        if !current.is_empty() {
            return current;
        }
        let legacy = i18n.field("DefaultLang").string_or_empty();
        if !legacy.is_empty() {
            return legacy;
        }
        default
    }

    // SMS

    pub fn is_sms_enabled(self) -> bool {
        self.sms().enabled(false)
    }

    pub fn get_sms_access_key_id<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.sms().field("AccessKeyID").string(default)
    }

    pub fn get_sms_sign_name<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.sms().field("SignName").string(default)
    }

    pub fn get_sms_endpoint<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.sms().field("Endpoint").string(default)
    }

    // Queue

    pub fn is_queue_enabled(self) -> bool {
        self.queue().enabled(false)
    }

    pub fn get_queue_driver<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.queue().field("Driver").string(default)
    }

    // MQTT

    pub fn is_mqtt_enabled(self) -> bool {
        self.mqtt().enabled(false)
    }

    pub fn get_mqtt_broker<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.mqtt().field("Broker").string(default)
    }

    pub fn get_mqtt_client_id<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.mqtt().field("ClientID").string(default)
    }

    pub fn get_mqtt_keep_alive(self, default: Duration) -> Duration {
        self.mqtt().field("KeepAlive").duration(default)
    }

    // Captcha

    pub fn is_captcha_enabled(self) -> bool {
        self.captcha().enabled(false)
    }

    pub fn get_captcha_type<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.captcha().field("Type").string(default)
    }

    pub fn get_captcha_key_len(self, default: i64) -> i64 {
        self.captcha().field("KeyLen").int(default)
    }

    pub fn get_captcha_expire(self, default: Duration) -> Duration {
        self.captcha().field("Expire").duration(default)
    }

    // Database

    pub fn is_database_enabled(self) -> bool {
        self.database().enabled(false)
    }

    pub fn is_auto_migrate_enabled(self) -> bool {
        self.database().field("AutoMigrate").bool(false)
    }

    pub fn get_table_prefix<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.database().field("TablePrefix").string(default)
    }

    pub fn get_database_log_level<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.database().field("LogLevel").string(default)
    }

    pub fn get_slow_threshold(self, default: Duration) -> Duration {
        self.database().field("SlowThreshold").duration(default)
    }

    // Jobs

    pub fn is_jobs_enabled(self) -> bool {
        self.jobs().enabled(false)
    }

    pub fn is_job_task_enabled(self, name: &str) -> bool {
        self.jobs().field("Tasks").field(name).enabled(false)
    }

    // Message pipeline sizing

    pub fn get_offline_message_batch_size(self, default: u64) -> u64 {
        self.batch_processing()
            .field("OfflineMessageBatchSize")
            .uint(default)
    }

    pub fn get_message_pool_buffer_size(self, default: u64) -> u64 {
        self.batch_processing()
            .field("MessagePoolBufferSize")
            .uint(default)
    }

    pub fn get_connection_batch_size(self, default: u64) -> u64 {
        self.batch_processing()
            .field("ConnectionBatchSize")
            .uint(default)
    }

    pub fn get_broadcast_buffer_multiplier(self, default: u64) -> u64 {
        self.channel_buffers()
            .field("BroadcastBufferMultiplier")
            .uint(default)
    }

    pub fn get_node_message_buffer_multiplier(self, default: u64) -> u64 {
        self.channel_buffers()
            .field("NodeMessageBufferMultiplier")
            .uint(default)
    }
}
