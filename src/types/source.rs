// Legacy schema tree, as parsed from the TOML input. Absent scalars decode
// to their zero values; absent sub-tables decode to None. Unknown keys are
// ignored, matching the lenient decoder the legacy format always had.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Root of a legacy configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub main: Option<Main>,
    pub frontend: Option<Frontend>,
    pub reloading: Option<Reloading>,
    #[serde(rename = "origins")]
    pub backends: BTreeMap<String, Backend>,
    pub caches: BTreeMap<String, Cache>,
    pub negative_caches: BTreeMap<String, BTreeMap<String, i64>>,
    pub logging: Option<Logging>,
    pub metrics: Option<Metrics>,
    pub tracing: BTreeMap<String, Tracing>,
    pub rules: BTreeMap<String, Rule>,
    pub request_rewriters: BTreeMap<String, Rewriter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Main {
    pub instance_id: i64,
    pub config_handler_path: String,
    pub ping_handler_path: String,
    pub reload_handler_path: String,
    pub health_handler_path: String,
    pub pprof_server: String,
    pub server_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Frontend {
    pub listen_address: String,
    pub listen_port: i64,
    pub tls_listen_address: String,
    pub tls_listen_port: i64,
    pub connections_limit: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Reloading {
    pub listen_address: String,
    pub listen_port: i64,
    pub handler_path: String,
    pub drain_timeout_ms: i64,
    pub rate_limit_ms: i64,
}

/// A named cache backend definition. `cache_type` is renamed to `provider`
/// during the upgrade; the interval fields under `index` are in seconds here
/// and milliseconds in the current schema.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Cache {
    pub cache_type: String,
    pub index: Option<Index>,
    pub redis: Option<Redis>,
    pub filesystem: Option<Filesystem>,
    pub bbolt: Option<Bbolt>,
    pub badger: Option<Badger>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Index {
    pub reap_interval_secs: i64,
    pub flush_interval_secs: i64,
    pub max_size_bytes: i64,
    pub max_size_backoff_bytes: i64,
    pub max_size_objects: i64,
    pub max_size_backoff_objects: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Redis {
    pub client_type: String,
    pub protocol: String,
    pub endpoint: String,
    pub endpoints: Vec<String>,
    pub password: String,
    pub sentinel_master: String,
    pub db: i64,
    pub max_retries: i64,
    pub min_retry_backoff_ms: i64,
    pub max_retry_backoff_ms: i64,
    pub dial_timeout_ms: i64,
    pub read_timeout_ms: i64,
    pub write_timeout_ms: i64,
    pub pool_size: i64,
    pub min_idle_conns: i64,
    pub max_conn_age_ms: i64,
    pub pool_timeout_ms: i64,
    pub idle_timeout_ms: i64,
    pub idle_check_frequency_ms: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Filesystem {
    pub cache_path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Bbolt {
    pub filename: String,
    pub bucket: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Badger {
    pub directory: String,
    pub value_directory: String,
}

/// An upstream routing target. `origin_type` is renamed to `provider`, the
/// six `*_secs` fields become `*_ms`, and the flat `health_check_*` fields
/// fold into a nested healthcheck object in the current schema.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Backend {
    pub hosts: Vec<String>,
    pub origin_type: String,
    pub origin_url: String,
    pub timeout_secs: i64,
    pub keep_alive_timeout_secs: i64,
    pub max_idle_conns: i64,
    pub cache_name: String,
    pub cache_key_prefix: String,
    pub timeseries_retention_factor: i64,
    pub timeseries_eviction_method: String,
    pub backfill_tolerance_secs: i64,
    pub paths: BTreeMap<String, Path>,
    pub negative_cache_name: String,
    pub timeseries_ttl_secs: i64,
    pub fastforward_ttl_secs: i64,
    pub max_ttl_secs: i64,
    pub revalidation_factor: f64,
    pub max_object_size_bytes: i64,
    pub compressable_types: Vec<String>,
    pub tracing_name: String,
    pub rule_name: String,
    pub req_rewriter_name: String,
    pub tls: Option<Tls>,
    pub forwarded_headers: String,
    pub is_default: bool,
    pub fast_forward_disable: bool,
    pub path_routing_disabled: bool,
    pub require_tls: bool,
    pub multipart_ranges_disabled: bool,
    pub dearticulate_upstream_ranges: bool,
    pub health_check_upstream_path: String,
    pub health_check_verb: String,
    pub health_check_query: String,
    pub health_check_headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Path {
    pub path: String,
    pub match_type: String,
    pub handler: String,
    pub methods: Vec<String>,
    pub cache_key_params: Vec<String>,
    pub cache_key_headers: Vec<String>,
    pub cache_key_form_fields: Vec<String>,
    pub request_headers: BTreeMap<String, String>,
    pub request_params: BTreeMap<String, String>,
    pub response_headers: BTreeMap<String, String>,
    pub response_code: i64,
    pub response_body: String,
    pub collapsed_forwarding: String,
    pub req_rewriter_name: String,
    pub no_metrics: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tls {
    pub full_chain_cert_path: String,
    pub private_key_path: String,
    pub insecure_skip_verify: bool,
    pub certificate_authority_paths: Vec<String>,
    pub client_cert_path: String,
    pub client_key_path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub next_route: String,
    pub ingress_req_rewriter_name: String,
    pub egress_req_rewriter_name: String,
    pub nomatch_req_rewriter_name: String,
    pub input_source: String,
    pub input_key: String,
    pub input_type: String,
    pub input_encoding: String,
    pub input_index: i64,
    pub input_delimiter: String,
    pub operation: String,
    pub operation_arg: String,
    pub cases: BTreeMap<String, RuleCase>,
    pub redirect_url: String,
    pub max_rule_executions: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleCase {
    pub matches: Vec<String>,
    pub req_rewriter_name: String,
    pub next_route: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Rewriter {
    pub instructions: Vec<Vec<String>>,
}

/// A tracing exporter definition. `tracer_type` is renamed to `provider`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tracing {
    pub tracer_type: String,
    pub service_name: String,
    pub collector_url: String,
    pub collector_user: String,
    pub collector_pass: String,
    pub sample_rate: f64,
    pub tags: BTreeMap<String, String>,
    pub omit_tags: Vec<String>,
    pub stdout: Option<Stdout>,
    pub jaeger: Option<Jaeger>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Stdout {
    pub pretty_print: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Jaeger {
    pub endpoint_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub listen_address: String,
    pub listen_port: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub log_file: String,
    pub log_level: String,
}
