use upset_rs::telemetry::{
    DEFAULT_FILTER_DIRECTIVE, init_default_tracing, init_tracing_with_fallback,
};

#[test]
fn default_directive_targets_this_crate() {
    assert_eq!(DEFAULT_FILTER_DIRECTIVE, "upset_rs=info");
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_setup_is_a_no_op_without_feature() {
    assert!(!init_default_tracing());
    assert!(!init_tracing_with_fallback("debug"));
}

#[cfg(feature = "telemetry")]
#[test]
fn tracing_subscriber_installs_at_most_once() {
    let first = init_default_tracing();
    let second = init_tracing_with_fallback("debug");
    assert!(!(first && second));
}
