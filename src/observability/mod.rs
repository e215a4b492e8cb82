//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → rotating JSON lines
//! ```
//!
//! Traces land in `~/.local/share/zellij/imagefinder/imagefinder-otlp.json`
//! (seen as `/host/...` from inside the plugin sandbox), rotated at 5 MB with
//! three backups. The level comes from the `trace_level` plugin option.
//!
//! # Modules
//!
//! - [`context`]: Trace context carried across the fetch round trip
//! - `init`: Subscriber setup
//! - `exporter`: `SpanExporter` writing to the trace file
//! - `otlp`: OTLP/JSON encoding
//! - `rotating_file`: Size-rotated line writer

pub mod context;
mod exporter;
mod init;
mod otlp;
mod rotating_file;

pub use context::TraceContext;
pub use init::init_tracing;
