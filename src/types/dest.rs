// Current schema tree, serialized to YAML. Every field carries a skip
// predicate so zero values never show up as keys in the output; the renamed
// legacy fields (`cache_type`, `origin_type`, `tracer_type`, `*_secs`, the
// flat `health_check_*` knobs) have no counterpart here at all.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{is_false, is_zero, is_zero_f64};

/// Root of a current-schema configuration document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<Main>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend: Option<Frontend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reloading: Option<Reloading>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub backends: BTreeMap<String, Backend>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub caches: BTreeMap<String, Cache>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub negative_caches: BTreeMap<String, BTreeMap<String, i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tracing: BTreeMap<String, Tracing>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, Rule>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub request_rewriters: BTreeMap<String, Rewriter>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Main {
    #[serde(skip_serializing_if = "is_zero")]
    pub instance_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub config_handler_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ping_handler_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reload_handler_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub health_handler_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pprof_server: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Frontend {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub listen_address: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub listen_port: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tls_listen_address: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub tls_listen_port: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub connections_limit: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Reloading {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub listen_address: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub listen_port: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handler_path: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub drain_timeout_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub rate_limit_ms: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cache {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Index>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<Redis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<Filesystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbolt: Option<Bbolt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badger: Option<Badger>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Index {
    #[serde(skip_serializing_if = "is_zero")]
    pub reap_interval_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub flush_interval_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_size_bytes: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_size_backoff_bytes: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_size_objects: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_size_backoff_objects: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Redis {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub endpoint: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sentinel_master: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub db: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_retries: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub min_retry_backoff_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_retry_backoff_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub dial_timeout_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub read_timeout_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub write_timeout_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub pool_size: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub min_idle_conns: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_conn_age_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub pool_timeout_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub idle_timeout_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub idle_check_frequency_ms: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Filesystem {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cache_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Bbolt {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filename: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bucket: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Badger {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub directory: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value_directory: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Backend {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub origin_url: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub timeout_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub keep_alive_timeout_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_idle_conns: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cache_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cache_key_prefix: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub timeseries_retention_factor: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeseries_eviction_method: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub backfill_tolerance_ms: i64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, Path>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub negative_cache_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub timeseries_ttl_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub fastforward_ttl_ms: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_ttl_ms: i64,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub revalidation_factor: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_object_size_bytes: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compressable_types: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tracing_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub req_rewriter_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub forwarded_headers: String,
    #[serde(skip_serializing_if = "is_false")]
    pub is_default: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub fast_forward_disable: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub path_routing_disabled: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub require_tls: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub multipart_ranges_disabled: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub dearticulate_upstream_ranges: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<HealthCheck>,
}

/// Nested health-check block, synthesized from the legacy flat fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthCheck {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub verb: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub query: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Path {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub match_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handler: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cache_key_params: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cache_key_headers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cache_key_form_fields: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub request_headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub request_params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub response_headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub response_code: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub response_body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub collapsed_forwarding: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub req_rewriter_name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub no_metrics: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Tls {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub full_chain_cert_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_key_path: String,
    #[serde(skip_serializing_if = "is_false")]
    pub insecure_skip_verify: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certificate_authority_paths: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_cert_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_key_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Rule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next_route: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ingress_req_rewriter_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub egress_req_rewriter_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nomatch_req_rewriter_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub input_source: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub input_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub input_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub input_encoding: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub input_index: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub input_delimiter: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operation: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operation_arg: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cases: BTreeMap<String, RuleCase>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect_url: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_rule_executions: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleCase {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub req_rewriter_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next_route: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect_url: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Rewriter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Tracing {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provider: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub collector_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub collector_user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub collector_pass: String,
    #[serde(skip_serializing_if = "is_zero_f64")]
    pub sample_rate: f64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omit_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<Stdout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaeger: Option<Jaeger>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stdout {
    #[serde(skip_serializing_if = "is_false")]
    pub pretty_print: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Jaeger {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub endpoint_type: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Metrics {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub listen_address: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub listen_port: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Logging {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub log_file: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub log_level: String,
}
