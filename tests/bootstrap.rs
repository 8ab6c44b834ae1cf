//! End-to-end tests for the document-to-directive pipeline.

use service_bootstrap::config::{self, ConfigError};
use service_bootstrap::startup::{
    self, BootstrapError, Directive, DirectiveKind, METRICS_EXPORT_PATH,
};

fn kinds(directives: &[Directive]) -> Vec<DirectiveKind> {
    directives.iter().map(Directive::kind).collect()
}

#[test]
fn full_document_loads_every_field() {
    let document = config::load("tests/fixtures/full.toml").unwrap();

    assert_eq!(document.identity.name, "svc-a");
    assert_eq!(document.identity.version, "2.3.1");
    assert_eq!(document.governance.discovery.component, "etcd");
    assert_eq!(document.governance.discovery.address, "10.0.0.3:8500");
    assert_eq!(document.governance.config_center.address, "10.0.0.4:8500");
    assert_eq!(document.observability.monitoring.component, "prometheus");
    assert_eq!(document.observability.monitoring.address, "10.0.0.5:9090");
    assert_eq!(document.observability.logging.level, "debug");
}

#[test]
fn absent_sections_default_to_empty() {
    let document = config::load("tests/fixtures/identity_only.toml").unwrap();

    assert_eq!(document.identity.name, "svc-a");
    assert!(document.governance.discovery.address.is_empty());
    assert!(document.governance.config_center.address.is_empty());
    assert!(document.observability.monitoring.address.is_empty());
    assert!(document.observability.logging.path.is_empty());
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = config::load("tests/fixtures/invalid.toml").unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(
        err.to_string().contains("invalid.toml"),
        "error should name the file: {err}"
    );
}

#[test]
fn missing_document_is_a_read_error() {
    let err = config::load("tests/fixtures/no-such-document.toml").unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn identity_only_document_composes_one_directive() {
    let directives = startup::init("tests/fixtures/identity_only.toml").unwrap();

    assert_eq!(kinds(&directives), vec![DirectiveKind::Identity]);
    match &directives[0] {
        Directive::Identity(identity) => {
            assert_eq!(identity.name, "svc-a");
            assert_eq!(identity.version, "1.0.0");
        }
        other => panic!("expected identity directive, got {:?}", other.kind()),
    }
}

#[test]
fn blank_discovery_is_skipped_while_monitoring_composes() {
    let directives = startup::init("tests/fixtures/monitoring_only.toml").unwrap();

    assert_eq!(
        kinds(&directives),
        vec![DirectiveKind::Identity, DirectiveKind::Tracer]
    );
    match &directives[1] {
        Directive::Tracer(tracer) => {
            assert_eq!(tracer.listen_addr(), "10.0.0.5:9090".parse().unwrap());
            assert_eq!(tracer.export_path(), METRICS_EXPORT_PATH);
            assert_eq!(tracer.export_path(), "/kitexserver");
        }
        other => panic!("expected tracer directive, got {:?}", other.kind()),
    }
}

#[test]
fn full_document_composes_all_four_directives_in_order() {
    let directives = startup::init("tests/fixtures/full.toml").unwrap();

    assert_eq!(
        kinds(&directives),
        vec![
            DirectiveKind::Identity,
            DirectiveKind::Registry,
            DirectiveKind::DynamicConfig,
            DirectiveKind::Tracer,
        ]
    );

    match &directives[1] {
        Directive::Registry(client) => {
            assert_eq!(client.endpoints()[0].as_str(), "http://10.0.0.3:8500/");
        }
        other => panic!("expected registry directive, got {:?}", other.kind()),
    }
    match &directives[2] {
        Directive::DynamicConfig(subscription) => {
            assert_eq!(subscription.service(), "svc-a");
        }
        other => panic!("expected dynamic config directive, got {:?}", other.kind()),
    }
}

#[test]
fn unusable_discovery_address_aborts_init() {
    let err = startup::init("tests/fixtures/bad_discovery.toml").unwrap_err();

    match err {
        BootstrapError::Compose(compose) => {
            assert!(
                compose.to_string().contains("ftp://10.0.0.3:8500"),
                "error should name the address: {compose}"
            );
        }
        other => panic!("expected compose error, got {other}"),
    }
}

#[test]
fn missing_document_fails_init_before_composition() {
    let err = startup::init("tests/fixtures/no-such-document.toml").unwrap_err();

    assert!(matches!(err, BootstrapError::Config(_)));
}
