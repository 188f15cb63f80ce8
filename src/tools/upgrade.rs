// Upgrade a legacy TOML configuration to the current YAML schema.
//
// The pipeline is read → parse → convert → render. All schema knowledge
// lives in the per-section functions below: renames (`cache_type`,
// `origin_type`, `tracer_type` → `provider`), seconds→milliseconds unit
// conversions, and the synthesis of the nested backend healthcheck block
// from the legacy flat fields. Sections with no conversion rule are copied
// through verbatim.

use std::fs;
use std::path::Path;

use crate::error::UpgradeError;
use crate::types::{dest, source};

/// Reads a legacy TOML config from `path` and returns the upgraded document
/// rendered as YAML.
pub fn run(path: &Path) -> Result<String, UpgradeError> {
    let raw = fs::read_to_string(path)?;
    let legacy: source::Config = toml::from_str(&raw)?;
    let current = upgrade(&legacy);
    let yaml = serde_yaml::to_string(&current)?;
    Ok(yaml)
}

/// Converts a parsed legacy document into the current schema. Pure: the
/// legacy tree is never modified.
pub fn upgrade(legacy: &source::Config) -> dest::Config {
    dest::Config {
        main: legacy.main.as_ref().map(upgrade_main),
        frontend: legacy.frontend.as_ref().map(upgrade_frontend),
        reloading: legacy.reloading.as_ref().map(upgrade_reloading),
        backends: legacy
            .backends
            .iter()
            .map(|(name, b)| (name.clone(), upgrade_backend(b)))
            .collect(),
        caches: legacy
            .caches
            .iter()
            .map(|(name, c)| (name.clone(), upgrade_cache(c)))
            .collect(),
        negative_caches: legacy
            .negative_caches
            .iter()
            .map(|(name, nc)| {
                let scaled = nc
                    .iter()
                    .map(|(code, secs)| (code.clone(), secs_to_ms(*secs)))
                    .collect();
                (name.clone(), scaled)
            })
            .collect(),
        logging: legacy.logging.as_ref().map(upgrade_logging),
        metrics: legacy.metrics.as_ref().map(upgrade_metrics),
        tracing: legacy
            .tracing
            .iter()
            .map(|(name, t)| (name.clone(), upgrade_tracing(t)))
            .collect(),
        rules: legacy
            .rules
            .iter()
            .map(|(name, r)| (name.clone(), upgrade_rule(r)))
            .collect(),
        request_rewriters: legacy
            .request_rewriters
            .iter()
            .map(|(name, r)| (name.clone(), upgrade_rewriter(r)))
            .collect(),
    }
}

fn secs_to_ms(secs: i64) -> i64 {
    secs.saturating_mul(1000)
}

fn upgrade_cache(c: &source::Cache) -> dest::Cache {
    dest::Cache {
        provider: c.cache_type.clone(),
        index: c.index.as_ref().map(upgrade_index),
        redis: c.redis.as_ref().map(upgrade_redis),
        filesystem: c.filesystem.as_ref().map(|f| dest::Filesystem {
            cache_path: f.cache_path.clone(),
        }),
        bbolt: c.bbolt.as_ref().map(|b| dest::Bbolt {
            filename: b.filename.clone(),
            bucket: b.bucket.clone(),
        }),
        badger: c.badger.as_ref().map(|b| dest::Badger {
            directory: b.directory.clone(),
            value_directory: b.value_directory.clone(),
        }),
    }
}

fn upgrade_index(i: &source::Index) -> dest::Index {
    dest::Index {
        reap_interval_ms: secs_to_ms(i.reap_interval_secs),
        flush_interval_ms: secs_to_ms(i.flush_interval_secs),
        max_size_bytes: i.max_size_bytes,
        max_size_backoff_bytes: i.max_size_backoff_bytes,
        max_size_objects: i.max_size_objects,
        max_size_backoff_objects: i.max_size_backoff_objects,
    }
}

// Redis tuning knobs were already in milliseconds in the legacy schema.
fn upgrade_redis(r: &source::Redis) -> dest::Redis {
    dest::Redis {
        client_type: r.client_type.clone(),
        protocol: r.protocol.clone(),
        endpoint: r.endpoint.clone(),
        endpoints: r.endpoints.clone(),
        password: r.password.clone(),
        sentinel_master: r.sentinel_master.clone(),
        db: r.db,
        max_retries: r.max_retries,
        min_retry_backoff_ms: r.min_retry_backoff_ms,
        max_retry_backoff_ms: r.max_retry_backoff_ms,
        dial_timeout_ms: r.dial_timeout_ms,
        read_timeout_ms: r.read_timeout_ms,
        write_timeout_ms: r.write_timeout_ms,
        pool_size: r.pool_size,
        min_idle_conns: r.min_idle_conns,
        max_conn_age_ms: r.max_conn_age_ms,
        pool_timeout_ms: r.pool_timeout_ms,
        idle_timeout_ms: r.idle_timeout_ms,
        idle_check_frequency_ms: r.idle_check_frequency_ms,
    }
}

fn upgrade_backend(b: &source::Backend) -> dest::Backend {
    dest::Backend {
        hosts: b.hosts.clone(),
        provider: b.origin_type.clone(),
        origin_url: b.origin_url.clone(),
        timeout_ms: secs_to_ms(b.timeout_secs),
        keep_alive_timeout_ms: secs_to_ms(b.keep_alive_timeout_secs),
        max_idle_conns: b.max_idle_conns,
        cache_name: b.cache_name.clone(),
        cache_key_prefix: b.cache_key_prefix.clone(),
        timeseries_retention_factor: b.timeseries_retention_factor,
        timeseries_eviction_method: b.timeseries_eviction_method.clone(),
        backfill_tolerance_ms: secs_to_ms(b.backfill_tolerance_secs),
        paths: b
            .paths
            .iter()
            .map(|(name, p)| (name.clone(), upgrade_path(p)))
            .collect(),
        negative_cache_name: b.negative_cache_name.clone(),
        timeseries_ttl_ms: secs_to_ms(b.timeseries_ttl_secs),
        fastforward_ttl_ms: secs_to_ms(b.fastforward_ttl_secs),
        max_ttl_ms: secs_to_ms(b.max_ttl_secs),
        revalidation_factor: b.revalidation_factor,
        max_object_size_bytes: b.max_object_size_bytes,
        compressable_types: b.compressable_types.clone(),
        tracing_name: b.tracing_name.clone(),
        rule_name: b.rule_name.clone(),
        req_rewriter_name: b.req_rewriter_name.clone(),
        tls: b.tls.as_ref().map(upgrade_tls),
        forwarded_headers: b.forwarded_headers.clone(),
        is_default: b.is_default,
        fast_forward_disable: b.fast_forward_disable,
        path_routing_disabled: b.path_routing_disabled,
        require_tls: b.require_tls,
        multipart_ranges_disabled: b.multipart_ranges_disabled,
        dearticulate_upstream_ranges: b.dearticulate_upstream_ranges,
        healthcheck: synthesize_healthcheck(b),
    }
}

/// Folds the legacy flat health-check fields into a nested block. The block
/// exists only when at least one of the four fields is set.
fn synthesize_healthcheck(b: &source::Backend) -> Option<dest::HealthCheck> {
    if b.health_check_verb.is_empty()
        && b.health_check_upstream_path.is_empty()
        && b.health_check_query.is_empty()
        && b.health_check_headers.is_empty()
    {
        return None;
    }
    Some(dest::HealthCheck {
        verb: b.health_check_verb.clone(),
        path: b.health_check_upstream_path.clone(),
        query: b.health_check_query.clone(),
        headers: b.health_check_headers.clone(),
    })
}

fn upgrade_path(p: &source::Path) -> dest::Path {
    dest::Path {
        path: p.path.clone(),
        match_type: p.match_type.clone(),
        handler: p.handler.clone(),
        methods: p.methods.clone(),
        cache_key_params: p.cache_key_params.clone(),
        cache_key_headers: p.cache_key_headers.clone(),
        cache_key_form_fields: p.cache_key_form_fields.clone(),
        request_headers: p.request_headers.clone(),
        request_params: p.request_params.clone(),
        response_headers: p.response_headers.clone(),
        response_code: p.response_code,
        response_body: p.response_body.clone(),
        collapsed_forwarding: p.collapsed_forwarding.clone(),
        req_rewriter_name: p.req_rewriter_name.clone(),
        no_metrics: p.no_metrics,
    }
}

fn upgrade_tls(t: &source::Tls) -> dest::Tls {
    dest::Tls {
        full_chain_cert_path: t.full_chain_cert_path.clone(),
        private_key_path: t.private_key_path.clone(),
        insecure_skip_verify: t.insecure_skip_verify,
        certificate_authority_paths: t.certificate_authority_paths.clone(),
        client_cert_path: t.client_cert_path.clone(),
        client_key_path: t.client_key_path.clone(),
    }
}

fn upgrade_tracing(t: &source::Tracing) -> dest::Tracing {
    dest::Tracing {
        provider: t.tracer_type.clone(),
        service_name: t.service_name.clone(),
        collector_url: t.collector_url.clone(),
        collector_user: t.collector_user.clone(),
        collector_pass: t.collector_pass.clone(),
        sample_rate: t.sample_rate,
        tags: t.tags.clone(),
        omit_tags: t.omit_tags.clone(),
        stdout: t.stdout.as_ref().map(|s| dest::Stdout {
            pretty_print: s.pretty_print,
        }),
        jaeger: t.jaeger.as_ref().map(|j| dest::Jaeger {
            endpoint_type: j.endpoint_type.clone(),
        }),
    }
}

fn upgrade_rule(r: &source::Rule) -> dest::Rule {
    dest::Rule {
        next_route: r.next_route.clone(),
        ingress_req_rewriter_name: r.ingress_req_rewriter_name.clone(),
        egress_req_rewriter_name: r.egress_req_rewriter_name.clone(),
        nomatch_req_rewriter_name: r.nomatch_req_rewriter_name.clone(),
        input_source: r.input_source.clone(),
        input_key: r.input_key.clone(),
        input_type: r.input_type.clone(),
        input_encoding: r.input_encoding.clone(),
        input_index: r.input_index,
        input_delimiter: r.input_delimiter.clone(),
        operation: r.operation.clone(),
        operation_arg: r.operation_arg.clone(),
        cases: r
            .cases
            .iter()
            .map(|(name, c)| {
                (
                    name.clone(),
                    dest::RuleCase {
                        matches: c.matches.clone(),
                        req_rewriter_name: c.req_rewriter_name.clone(),
                        next_route: c.next_route.clone(),
                        redirect_url: c.redirect_url.clone(),
                    },
                )
            })
            .collect(),
        redirect_url: r.redirect_url.clone(),
        max_rule_executions: r.max_rule_executions,
    }
}

fn upgrade_rewriter(r: &source::Rewriter) -> dest::Rewriter {
    dest::Rewriter {
        instructions: r.instructions.clone(),
    }
}

fn upgrade_main(m: &source::Main) -> dest::Main {
    dest::Main {
        instance_id: m.instance_id,
        config_handler_path: m.config_handler_path.clone(),
        ping_handler_path: m.ping_handler_path.clone(),
        reload_handler_path: m.reload_handler_path.clone(),
        health_handler_path: m.health_handler_path.clone(),
        pprof_server: m.pprof_server.clone(),
        server_name: m.server_name.clone(),
    }
}

fn upgrade_frontend(f: &source::Frontend) -> dest::Frontend {
    dest::Frontend {
        listen_address: f.listen_address.clone(),
        listen_port: f.listen_port,
        tls_listen_address: f.tls_listen_address.clone(),
        tls_listen_port: f.tls_listen_port,
        connections_limit: f.connections_limit,
    }
}

fn upgrade_reloading(r: &source::Reloading) -> dest::Reloading {
    dest::Reloading {
        listen_address: r.listen_address.clone(),
        listen_port: r.listen_port,
        handler_path: r.handler_path.clone(),
        drain_timeout_ms: r.drain_timeout_ms,
        rate_limit_ms: r.rate_limit_ms,
    }
}

fn upgrade_logging(l: &source::Logging) -> dest::Logging {
    dest::Logging {
        log_file: l.log_file.clone(),
        log_level: l.log_level.clone(),
    }
}

fn upgrade_metrics(m: &source::Metrics) -> dest::Metrics {
    dest::Metrics {
        listen_address: m.listen_address.clone(),
        listen_port: m.listen_port,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> source::Config {
        toml::from_str(toml_str).expect("fixture should be valid TOML")
    }

    fn to_yaml(legacy: &source::Config) -> String {
        serde_yaml::to_string(&upgrade(legacy)).expect("render should succeed")
    }

    #[test]
    fn test_cache_provider_rename_and_index_intervals() {
        let legacy = parse(
            r#"
[caches.default]
cache_type = "redis"

[caches.default.index]
flush_interval_secs = 5
reap_interval_secs = 10
"#,
        );
        let current = upgrade(&legacy);
        let cache = &current.caches["default"];
        assert_eq!(cache.provider, "redis");
        let index = cache.index.as_ref().unwrap();
        assert_eq!(index.flush_interval_ms, 5000);
        assert_eq!(index.reap_interval_ms, 10000);

        let yaml = to_yaml(&legacy);
        assert!(yaml.contains("provider: redis"));
        assert!(yaml.contains("flush_interval_ms: 5000"));
        assert!(yaml.contains("reap_interval_ms: 10000"));
        assert!(!yaml.contains("cache_type"));
        assert!(!yaml.contains("_secs"));
    }

    #[test]
    fn test_negative_cache_values_scaled_to_ms() {
        let legacy = parse(
            r#"
[negative_caches.default]
400 = 3
404 = 5
500 = 10
"#,
        );
        let current = upgrade(&legacy);
        let nc = &current.negative_caches["default"];
        assert_eq!(nc["400"], 3000);
        assert_eq!(nc["404"], 5000);
        assert_eq!(nc["500"], 10000);
    }

    #[test]
    fn test_backend_rename_and_duration_conversions() {
        let legacy = parse(
            r#"
[origins.default]
origin_type = "prometheus"
origin_url = "http://prometheus:9090"
timeout_secs = 180
keep_alive_timeout_secs = 300
max_ttl_secs = 86400
backfill_tolerance_secs = 2
timeseries_ttl_secs = 21600
fastforward_ttl_secs = 15
"#,
        );
        let current = upgrade(&legacy);
        let backend = &current.backends["default"];
        assert_eq!(backend.provider, "prometheus");
        assert_eq!(backend.origin_url, "http://prometheus:9090");
        assert_eq!(backend.timeout_ms, 180_000);
        assert_eq!(backend.keep_alive_timeout_ms, 300_000);
        assert_eq!(backend.max_ttl_ms, 86_400_000);
        assert_eq!(backend.backfill_tolerance_ms, 2000);
        assert_eq!(backend.timeseries_ttl_ms, 21_600_000);
        assert_eq!(backend.fastforward_ttl_ms, 15_000);
    }

    #[test]
    fn test_origins_container_renamed_to_backends() {
        let legacy = parse(
            r#"
[origins.default]
origin_type = "rpc"
"#,
        );
        let yaml = to_yaml(&legacy);
        assert!(yaml.contains("backends:"));
        assert!(!yaml.contains("origins:"));
        assert!(!yaml.contains("origin_type"));
    }

    #[test]
    fn test_healthcheck_synthesized_from_single_field() {
        let legacy = parse(
            r#"
[origins.default]
origin_type = "rpc"
health_check_verb = "GET"
"#,
        );
        let current = upgrade(&legacy);
        let hc = current.backends["default"].healthcheck.as_ref().unwrap();
        assert_eq!(hc.verb, "GET");
        assert!(hc.path.is_empty());
        assert!(hc.query.is_empty());
        assert!(hc.headers.is_empty());

        // empty members of the block are omitted from the rendered document
        let yaml = to_yaml(&legacy);
        assert!(yaml.contains("healthcheck:"));
        assert!(yaml.contains("verb: GET"));
        assert!(!yaml.contains("query:"));
        assert!(!yaml.contains("headers:"));
    }

    #[test]
    fn test_healthcheck_absent_when_all_fields_empty() {
        let legacy = parse(
            r#"
[origins.default]
origin_type = "rpc"
timeout_secs = 5
"#,
        );
        let current = upgrade(&legacy);
        assert!(current.backends["default"].healthcheck.is_none());
        assert!(!to_yaml(&legacy).contains("healthcheck"));
    }

    #[test]
    fn test_healthcheck_headers_alone_trigger_synthesis() {
        let legacy = parse(
            r#"
[origins.default]
origin_type = "rpc"

[origins.default.health_check_headers]
Authorization = "Basic xyz"
"#,
        );
        let current = upgrade(&legacy);
        let hc = current.backends["default"].healthcheck.as_ref().unwrap();
        assert_eq!(hc.headers["Authorization"], "Basic xyz");
        assert!(hc.verb.is_empty());
    }

    #[test]
    fn test_tracing_provider_rename() {
        let legacy = parse(
            r#"
[tracing.default]
tracer_type = "jaeger"
service_name = "proxy"
sample_rate = 0.5

[tracing.default.jaeger]
endpoint_type = "agent"
"#,
        );
        let current = upgrade(&legacy);
        let tracing = &current.tracing["default"];
        assert_eq!(tracing.provider, "jaeger");
        assert_eq!(tracing.service_name, "proxy");
        assert_eq!(tracing.sample_rate, 0.5);
        assert_eq!(tracing.jaeger.as_ref().unwrap().endpoint_type, "agent");
        assert!(!to_yaml(&legacy).contains("tracer_type"));
    }

    #[test]
    fn test_rules_and_rewriters_pass_through() {
        let legacy = parse(
            r#"
[rules.example]
input_source = "header"
input_key = "Authorization"
operation = "prefix"
next_route = "default"

[rules.example.cases.one]
matches = ["Basic"]
next_route = "reader"

[request_rewriters.example]
instructions = [
  ["header", "set", "Cache-Control", "max-age=60"],
  ["path", "replace", "/cgi-bin/", "/"],
]
"#,
        );
        let current = upgrade(&legacy);
        let rule = &current.rules["example"];
        assert_eq!(rule.input_source, "header");
        assert_eq!(rule.input_key, "Authorization");
        assert_eq!(rule.operation, "prefix");
        assert_eq!(rule.cases["one"].matches, vec!["Basic"]);
        assert_eq!(rule.cases["one"].next_route, "reader");

        let rewriter = &current.request_rewriters["example"];
        assert_eq!(rewriter.instructions.len(), 2);
        assert_eq!(
            rewriter.instructions[0],
            vec!["header", "set", "Cache-Control", "max-age=60"]
        );
    }

    #[test]
    fn test_pass_through_sections_survive_unchanged() {
        let legacy = parse(
            r#"
[main]
instance_id = 1
server_name = "example"

[frontend]
listen_port = 8480

[logging]
log_level = "info"

[metrics]
listen_port = 8481
"#,
        );
        let current = upgrade(&legacy);
        assert_eq!(current.main.as_ref().unwrap().instance_id, 1);
        assert_eq!(current.main.as_ref().unwrap().server_name, "example");
        assert_eq!(current.frontend.as_ref().unwrap().listen_port, 8480);
        assert_eq!(current.logging.as_ref().unwrap().log_level, "info");
        assert_eq!(current.metrics.as_ref().unwrap().listen_port, 8481);
    }

    #[test]
    fn test_zero_values_omitted_from_output() {
        let legacy = parse(
            r#"
[origins.default]
origin_type = "rpc"
"#,
        );
        let yaml = to_yaml(&legacy);
        assert!(yaml.contains("provider: rpc"));
        assert!(!yaml.contains("timeout_ms"));
        assert!(!yaml.contains("is_default"));
        assert!(!yaml.contains("hosts"));
        assert!(!yaml.contains("revalidation_factor"));
        assert!(!yaml.contains("caches:"));
        assert!(!yaml.contains("rules:"));
    }

    #[test]
    fn test_zero_second_durations_stay_omitted() {
        let legacy = parse(
            r#"
[origins.default]
origin_type = "rpc"
timeout_secs = 0
"#,
        );
        assert_eq!(upgrade(&legacy).backends["default"].timeout_ms, 0);
        assert!(!to_yaml(&legacy).contains("timeout_ms"));
    }

    #[test]
    fn test_type_mismatch_is_a_parse_error() {
        let result: Result<source::Config, _> = toml::from_str(
            r#"
[main]
instance_id = "not-a-number"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_run_reports_missing_file() {
        let err = run(Path::new("this-file-does-not-exist.conf")).unwrap_err();
        assert!(matches!(err, UpgradeError::Read(_)));
        assert!(err.to_string().starts_with("unable to open source file"));
    }
}
