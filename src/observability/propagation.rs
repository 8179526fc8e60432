//! W3C trace-context propagation over HTTP headers.
//!
//! # Responsibilities
//! - Extract the parent context from inbound request headers
//! - Inject the current span's context into outbound request headers
//!
//! # Design Decisions
//! - Adapters bridge `http::HeaderMap` to the OpenTelemetry
//!   propagation traits; the configured global propagator decides the
//!   wire format (W3C `traceparent`/`tracestate`)
//! - The raw trace id is also recorded on the span for log correlation

use http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::global;
use opentelemetry::propagation::{Extractor, Injector};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// W3C Trace Context header name.
pub const TRACEPARENT: &str = "traceparent";

struct HeaderExtractor<'a>(&'a HeaderMap);

impl<'a> Extractor for HeaderExtractor<'a> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

struct HeaderInjector<'a>(&'a mut HeaderMap);

impl<'a> Injector for HeaderInjector<'a> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(name) = HeaderName::from_bytes(key.as_bytes()) {
            if let Ok(val) = HeaderValue::from_str(&value) {
                self.0.insert(name, val);
            }
        }
    }
}

/// Inject a span's trace context into outbound HTTP headers.
pub fn inject_context(span: &Span, headers: &mut HeaderMap) {
    let cx = span.context();
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(&cx, &mut HeaderInjector(headers));
    });
}

/// Set a span's parent from inbound W3C trace-context headers.
///
/// Also records the trace id on the span for log correlation when the
/// header is present.
pub fn set_parent_from_headers(span: &Span, headers: &HeaderMap) {
    let parent_cx = global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor(headers))
    });
    span.set_parent(parent_cx);

    if let Some(trace_id) = traceparent(headers).and_then(parse_trace_id) {
        span.record("trace_id", trace_id);
    }
}

/// Raw `traceparent` header value, if present and valid UTF-8.
pub fn traceparent(headers: &HeaderMap) -> Option<&str> {
    headers.get(TRACEPARENT)?.to_str().ok()
}

/// Parse the trace id out of a W3C traceparent value
/// (format: `00-{trace_id}-{span_id}-{flags}`).
fn parse_trace_id(traceparent: &str) -> Option<&str> {
    let mut parts = traceparent.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some("00"), Some(trace_id), Some(_), Some(_)) => Some(trace_id),
        _ => None,
    }
}
