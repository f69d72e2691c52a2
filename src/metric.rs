use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("bedav_bot_statds")
        .with_description("Hospital bot statistics")
        .with_unit("event")
        .build()
});

fn incr_statds(metric: String, value: String) {
    STATDS.add(1, &[KeyValue::new(metric, value)]);
}

pub fn incr_intent_statds(intent: &str) {
    incr_statds("intent".to_string(), intent.into())
}

pub fn incr_directory_error_statds(kind: &str) {
    incr_statds("directory_error".to_string(), kind.into())
}

pub fn incr_dispatch_statds(outcome: &str) {
    incr_statds("dispatch".to_string(), outcome.into())
}

pub fn incr_signature_statds(outcome: &str) {
    incr_statds("signed_webhook".to_string(), outcome.into())
}
