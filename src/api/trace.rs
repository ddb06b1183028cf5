//! W3C trace-context propagation for outgoing HTTP requests.
//!
//! Requests leave the plugin through the host, so the only way to join server logs
//! with plugin spans is a `traceparent` header built from the active span.

use std::collections::BTreeMap;

/// Name of the W3C propagation header.
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// Trace and span identifiers of the span a request was issued from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a 32-digit hex string.
    pub trace_id: String,

    /// Span ID of the issuing span as a 16-digit hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when tracing is not initialized or the span context is not
    /// valid, which is the case in unit tests.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Header value in the `00-<trace>-<span>-01` form.
    #[must_use]
    pub fn traceparent(&self) -> String {
        format!("00-{}-{}-01", self.trace_id, self.parent_span_id)
    }
}

/// Adds a `traceparent` header when the current span carries a valid context.
pub fn inject_traceparent(headers: &mut BTreeMap<String, String>) {
    if let Some(context) = TraceContext::from_current() {
        tracing::trace!(trace_id = %context.trace_id, "propagating trace context");
        headers.insert(TRACEPARENT_HEADER.to_string(), context.traceparent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traceparent_follows_w3c_layout() {
        let context = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };

        assert_eq!(
            context.traceparent(),
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
        );
    }

    #[test]
    fn no_header_without_active_trace() {
        let mut headers = BTreeMap::new();

        inject_traceparent(&mut headers);

        assert!(!headers.contains_key(TRACEPARENT_HEADER));
    }
}
