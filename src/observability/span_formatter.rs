//! OTLP JSON span formatter.
//!
//! Converts OpenTelemetry span data into OTLP/JSON documents, one per exported
//! batch, so the trace file can be replayed into any OTLP collector.

use std::time::{Duration, SystemTime};

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};

/// Formats batches of spans into complete OTLP JSON documents.
pub struct SpanFormatter {
    resource: Resource,
    /// Instrumentation scope name written into every batch.
    scope: &'static str,
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Formats a batch of spans as one OTLP document.
    ///
    /// ```json
    /// {
    ///   "resourceSpans": [{
    ///     "resource": {
    ///       "attributes": [{"key": "service.name", "value": {"stringValue": "Stockboard"}}]
    ///     },
    ///     "scopeSpans": [{
    ///       "scope": {"name": "Stockboard"},
    ///       "spans": [...]
    ///     }]
    ///   }]
    /// }
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| attribute(k.as_str(), v))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(Self::format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": spans
                }]
            }]
        })
    }

    /// IDs become lowercase hex, timestamps nanosecond strings, and a missing
    /// parent an empty string.
    fn format_span(span: &SpanData) -> JsonValue {
        let (status_code, status_message) = format_status(&span.status);
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        json!({
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent_span_id,
            "name": span.name,
            "kind": span_kind_code(&span.span_kind),
            "startTimeUnixNano": unix_nanos(span.start_time),
            "endTimeUnixNano": unix_nanos(span.end_time),
            "attributes": format_attributes(&span.attributes),
            "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
            "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
            "status": {
                "code": status_code,
                "message": status_message,
            },
        })
    }
}

/// OTLP span kind codes: internal 1, server 2, client 3, producer 4, consumer 5.
const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": format_value(value) })
}

fn format_attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| attribute(kv.key.as_str(), &kv.value))
        .collect()
}

/// Integers are strings in OTLP/JSON; arrays fall back to their debug text.
fn format_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
    }
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": format_attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": format_attributes(&link.attributes),
    })
}

/// `(code, message)`: unset 0, ok 1, error 2 with its description.
fn format_status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
