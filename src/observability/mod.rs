//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Traces land in `~/.local/share/zellij/stockboard/stockboard-otlp.json`,
//! rotated at 10 MB with three backups. The trace level comes from the
//! `trace_level` plugin option (default `info`). Outgoing API requests carry the
//! current trace id in a `traceparent` header (see [`crate::api::trace`]), so
//! server-side logs can be matched against these files.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: Size-rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
