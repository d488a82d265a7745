//! Request spans and access logging.
//!
//! Every request gets an `INFO` span carrying method, URI and version. The
//! response line is logged inside that span, so redirects and shorten calls
//! can be correlated with the service events emitted while handling them.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

/// Trace layer type produced by [`layer`].
pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
    (),
    (),
    DefaultOnFailure,
>;

/// Builds the HTTP trace layer.
///
/// | Event | Level |
/// |---|---|
/// | request received | `DEBUG` |
/// | response sent (status, latency in ms) | `INFO` |
/// | 5xx or transport failure | `ERROR` |
///
/// Body chunk and end-of-stream hooks are disabled; responses here are small
/// JSON documents or empty redirects.
///
/// ```text
/// INFO request{method=GET uri=/promo1 version=HTTP/1.1}: finished processing request latency=1 ms status=302
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_body_chunk(())
        .on_eos(())
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
