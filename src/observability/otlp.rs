//! OTLP/JSON encoding of finished spans.
//!
//! Each exported batch becomes one `ExportTraceServiceRequest` document,
//! written as a single line so the trace file can be replayed into any OTLP
//! collector. IDs are lowercase hex, timestamps are nanosecond strings and
//! integers are strings, as the OTLP JSON mapping requires.

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope name written into every batch.
pub const SCOPE_NAME: &str = "imagefinder";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRequest {
    resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: OtlpResource,
    scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
struct OtlpResource {
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<OtlpSpan>,
}

#[derive(Debug, Serialize)]
struct Scope {
    name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpSpan {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<OtlpEvent>,
    status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpEvent {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct OtlpStatus {
    code: u8,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
}

#[derive(Debug, Serialize)]
struct Attribute {
    key: String,
    value: AnyValue,
}

#[derive(Debug, Serialize)]
enum AnyValue {
    #[serde(rename = "boolValue")]
    Bool(bool),
    #[serde(rename = "intValue")]
    Int(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "stringValue")]
    String(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I64(i) => Self::Int(i.to_string()),
            Value::F64(f) => Self::Double(*f),
            Value::String(s) => Self::String(s.to_string()),
            Value::Array(_) => Self::String(value.to_string()),
        }
    }
}

fn attribute(key: impl Into<String>, value: &Value) -> Attribute {
    Attribute {
        key: key.into(),
        value: AnyValue::from(value),
    }
}

fn key_values(pairs: &[KeyValue]) -> Vec<Attribute> {
    pairs.iter().map(|kv| attribute(kv.key.to_string(), &kv.value)).collect()
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos().to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> OtlpStatus {
    match status {
        Status::Unset => OtlpStatus { code: 0, message: String::new() },
        Status::Ok => OtlpStatus { code: 1, message: String::new() },
        Status::Error { description } => OtlpStatus {
            code: 2,
            message: description.to_string(),
        },
    }
}

fn events(events: &[opentelemetry::trace::Event]) -> Vec<OtlpEvent> {
    events
        .iter()
        .map(|event| OtlpEvent {
            time_unix_nano: unix_nanos(event.timestamp),
            name: event.name.to_string(),
            attributes: key_values(&event.attributes),
        })
        .collect()
}

fn span(span: &SpanData) -> OtlpSpan {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    OtlpSpan {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id,
        name: span.name.to_string(),
        kind: kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: key_values(&span.attributes),
        events: events(&span.events),
        status: status(&span.status),
    }
}

/// Encodes a batch of spans as one OTLP/JSON line.
///
/// # Errors
///
/// Returns the serializer error if the document cannot be encoded, which
/// only happens for non-finite `f64` attribute values.
pub fn encode_batch(resource: &Resource, batch: &[SpanData]) -> serde_json::Result<String> {
    let request = ExportRequest {
        resource_spans: vec![ResourceSpans {
            resource: OtlpResource {
                attributes: resource.iter().map(|(key, value)| attribute(key.to_string(), value)).collect(),
            },
            scope_spans: vec![ScopeSpans {
                scope: Scope { name: SCOPE_NAME },
                spans: batch.iter().map(span).collect(),
            }],
        }],
    };

    serde_json::to_string(&request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_value_uses_otlp_field_names() {
        let json = serde_json::to_value(AnyValue::from(&Value::I64(42))).unwrap();
        assert_eq!(json, serde_json::json!({ "intValue": "42" }));

        let json = serde_json::to_value(AnyValue::from(&Value::from("cats"))).unwrap();
        assert_eq!(json, serde_json::json!({ "stringValue": "cats" }));

        let json = serde_json::to_value(AnyValue::from(&Value::Bool(true))).unwrap();
        assert_eq!(json, serde_json::json!({ "boolValue": true }));
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "ImageFinder")]);
        let line = encode_batch(&resource, &[]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();

        let resource_spans = &json["resourceSpans"][0];
        let attributes = resource_spans["resource"]["attributes"].as_array().unwrap();
        assert!(attributes.iter().any(|a| a["key"] == "service.name"
            && a["value"]["stringValue"] == "ImageFinder"));
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], SCOPE_NAME);
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], serde_json::json!([]));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn error_status_keeps_description() {
        let encoded = status(&Status::error("search failed"));
        assert_eq!(encoded.code, 2);
        assert_eq!(encoded.message, "search failed");
    }
}
