//! Tracer lifecycle and W3C trace-context propagation.
//!
//! The provider and propagator are built once in `main` and handed to the
//! request handlers through app state; shutdown happens when the server
//! loop returns. Nothing is reached through `opentelemetry::global`.

use http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider, Tracer};
use opentelemetry_sdk::Resource;
use tracing::Span;
use tracing_opentelemetry::{OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::Registry;

/// W3C Trace Context header name.
pub const TRACEPARENT: &str = "traceparent";

pub struct Telemetry {
    provider: SdkTracerProvider,
    propagator: TraceContextPropagator,
}

impl Telemetry {
    /// Build the tracer provider. Without an OTLP endpoint no spans are
    /// exported, but they still get valid ids so propagation keeps working.
    pub fn init(service_name: &str, otlp_endpoint: Option<&str>) -> anyhow::Result<Self> {
        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name.to_string())])
            .build();

        let mut builder = SdkTracerProvider::builder()
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .with_resource(resource);

        if let Some(endpoint) = otlp_endpoint {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .with_protocol(Protocol::HttpBinary)
                .with_endpoint(endpoint)
                .build()?;
            builder = builder.with_batch_exporter(exporter);
        }

        Ok(Self {
            provider: builder.build(),
            propagator: TraceContextPropagator::new(),
        })
    }

    /// Layer to attach to the `tracing_subscriber` registry.
    pub fn layer(&self) -> OpenTelemetryLayer<Registry, Tracer> {
        OpenTelemetryLayer::new(self.provider.tracer("cep-weather"))
    }

    /// Inject the span's trace context into outbound request headers.
    pub fn inject_context(&self, span: &Span, headers: &mut HeaderMap) {
        let cx = span.context();
        self.propagator
            .inject_context(&cx, &mut HeaderInjector(headers));
    }

    /// Continue the trace carried by inbound headers, or leave the span as a
    /// fresh root when no valid context is present. The trace id is recorded
    /// on the span for log correlation.
    pub fn extract_context(&self, span: &Span, headers: &HeaderMap) {
        let parent = self.propagator.extract(&HeaderExtractor(headers));
        let _ = span.set_parent(parent);

        if let Some(trace_id) = get_traceparent(headers).and_then(parse_trace_id) {
            span.record("trace_id", trace_id.as_str());
        }
    }

    /// Flush and drop the exporter pipeline. Called once at process exit.
    pub fn shutdown(&self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "tracer provider shutdown failed");
        }
    }
}

/// Extract the traceparent header value, if present and readable.
pub fn get_traceparent(headers: &HeaderMap) -> Option<&str> {
    headers.get(TRACEPARENT)?.to_str().ok()
}

/// Parse the trace id out of a W3C traceparent ("00-{trace_id}-{span_id}-{flags}").
pub fn parse_trace_id(traceparent: &str) -> Option<String> {
    let parts: Vec<&str> = traceparent.split('-').collect();
    if parts.len() >= 4 && parts[0] == "00" {
        Some(parts[1].to_string())
    } else {
        None
    }
}

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
