//! Public field tables for the configuration records.
//!
//! Names are the PascalCase names callers pass to `SafeAccess::field`.
//! Lookup is exact and case-sensitive; aliases are handled by the
//! accessors that need them, never here.

use crate::access::SafeAccess;
use crate::config::schema::*;
use crate::reflect_record;

reflect_record!(AppConfig {
    "Name" => name,
    "Version" => version,
    "Debug" => debug,
    "Environment" => environment,
    "Server" => server,
    "HTTP" => http,
    "Health" => health,
    "Middleware" => middleware,
    "Monitoring" => monitoring,
    "I18n" => i18n,
    "SMS" => sms,
    "Queue" => queue,
    "MQTT" => mqtt,
    "Captcha" => captcha,
    "Database" => database,
    "Jobs" => jobs,
    "BatchProcessing" => batch_processing,
    "ChannelBuffers" => channel_buffers,
});

reflect_record!(Server {
    "Name" => name,
    "Host" => host,
    "Port" => port,
    "Version" => version,
    "Debug" => debug,
    "Timeout" => timeout,
});

reflect_record!(Http {
    "Host" => host,
    "Port" => port,
    "Timeout" => timeout,
});

reflect_record!(Health {
    "Enabled" => enabled,
    "Path" => path,
    "Redis" => redis,
    "MySQL" => mysql,
});

reflect_record!(HealthProbe {
    "Enabled" => enabled,
    "Path" => path,
    "Timeout" => timeout,
});

reflect_record!(Middleware {
    "CORS" => cors,
    "RateLimit" => rate_limit,
    "PProf" => pprof,
});

reflect_record!(Cors {
    "Enabled" => enabled,
    "AllowedOrigins" => allowed_origins,
});

reflect_record!(RateLimit {
    "Enabled" => enabled,
    "RequestsPerSecond" => requests_per_second,
    "BurstSize" => burst_size,
});

reflect_record!(PProf {
    "Enabled" => enabled,
    "PathPrefix" => path_prefix,
    "Port" => port,
});

reflect_record!(Monitoring {
    "Enabled" => enabled,
    "Metrics" => metrics,
    "Jaeger" => jaeger,
});

reflect_record!(Metrics {
    "Enabled" => enabled,
    "Endpoint" => endpoint,
});

reflect_record!(Jaeger {
    "Enabled" => enabled,
    "ServiceName" => service_name,
    "Endpoint" => endpoint,
    "Sampling" => sampling,
});

reflect_record!(Sampling {
    "Type" => kind,
    "Param" => param,
});

reflect_record!(I18n {
    "ModuleName" => module_name,
    "Enabled" => enabled,
    "DefaultLanguage" => default_language,
    "DefaultLang" => default_lang,
    "SupportedLanguages" => supported_languages,
    "LocaleDir" => locale_dir,
    "HeaderName" => header_name,
    "QueryParam" => query_param,
    "CookieName" => cookie_name,
});

reflect_record!(Sms {
    "Enabled" => enabled,
    "AccessKeyID" => access_key_id,
    "AccessKeySecret" => access_key_secret,
    "SignName" => sign_name,
    "TemplateCode" => template_code,
    "Endpoint" => endpoint,
    "Region" => region,
});

reflect_record!(Queue {
    "Enabled" => enabled,
    "Driver" => driver,
    "Workers" => workers,
    "Capacity" => capacity,
});

reflect_record!(Mqtt {
    "Enabled" => enabled,
    "Broker" => broker,
    "ClientID" => client_id,
    "Username" => username,
    "Password" => password,
    "CleanSession" => clean_session,
    "QoS" => qos,
    "KeepAlive" => keep_alive,
});

reflect_record!(Captcha {
    "Enabled" => enabled,
    "Type" => kind,
    "KeyLen" => key_len,
    "ImgWidth" => img_width,
    "ImgHeight" => img_height,
    "MaxSkew" => max_skew,
    "DotCount" => dot_count,
    "Expire" => expire,
});

reflect_record!(Database {
    "Enabled" => enabled,
    "Driver" => driver,
    "DSN" => dsn,
    "AutoMigrate" => auto_migrate,
    "TablePrefix" => table_prefix,
    "LogLevel" => log_level,
    "SlowThreshold" => slow_threshold,
    "MaxOpenConns" => max_open_conns,
    "MaxIdleConns" => max_idle_conns,
});

reflect_record!(Jobs {
    "Enabled" => enabled,
    "TimeZone" => time_zone,
    "GracefulShutdown" => graceful_shutdown_secs,
    "MaxRetries" => max_retries,
    "RetryInterval" => retry_interval_secs,
    "RetryJitter" => retry_jitter,
    "MaxConcurrentJobs" => max_concurrent_jobs,
    "Distribute" => distribute,
    "Tasks" => tasks,
});

reflect_record!(JobTask {
    "Enabled" => enabled,
    "CronSpec" => cron_spec,
    "ImmediateStart" => immediate_start,
    "Timeout" => timeout_secs,
    "OverlapPrevent" => overlap_prevent,
    "MaxRetries" => max_retries,
    "RetryInterval" => retry_interval_secs,
    "RetryJitter" => retry_jitter,
    "Priority" => priority,
    "Dependencies" => dependencies,
    "MaxConcurrent" => max_concurrent,
    "Tags" => tags,
    "Description" => description,
    "Breaker" => breaker,
});

reflect_record!(DependencyTask {
    "TaskName" => task_name,
    "Inline" => inline,
});

reflect_record!(BreakerCfg {
    "Enabled" => enabled,
    "MaxFailures" => max_failures,
    "ResetTimeout" => reset_timeout_secs,
    "HalfOpenSuccesses" => half_open_successes,
});

reflect_record!(BatchProcessing {
    "OfflineMessageBatchSize" => offline_message_batch_size,
    "MessagePoolBufferSize" => message_pool_buffer_size,
    "ConnectionBatchSize" => connection_batch_size,
});

reflect_record!(ChannelBuffers {
    "BroadcastBufferMultiplier" => broadcast_buffer_multiplier,
    "NodeMessageBufferMultiplier" => node_message_buffer_multiplier,
});

impl AppConfig {
    /// A present handle rooted at this configuration.
    pub fn safe(&self) -> SafeAccess<'_> {
        SafeAccess::new(self)
    }
}
