use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request};
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::request_id::RequestId;
use tower_http::trace::{
	DefaultOnBodyChunk,
	DefaultOnEos,
	DefaultOnRequest,
	OnResponse,
	TraceLayer,
};
use tracing::Span;

pub(crate) type Layer = TraceLayer<
	SharedClassifier<ServerErrorsAsFailures>,
	fn(&Request) -> Span,
	DefaultOnRequest,
	RecordResponse,
	DefaultOnBodyChunk,
	DefaultOnEos,
	fn(ServerErrorsFailureClass, Duration, &Span),
>;

/// Wraps every request in a `request` span.
pub(crate) fn layer() -> Layer
{
	TraceLayer::new_for_http()
		.make_span_with(make_span as fn(&Request) -> Span)
		.on_response(RecordResponse)
		.on_failure(on_failure as fn(ServerErrorsFailureClass, Duration, &Span))
}

fn make_span(request: &Request) -> Span
{
	let span = info_span!(
		target: "crud_list::http",
		"request",
		request.id = tracing::field::Empty,
		request.peer_addr = tracing::field::Empty,
		request.method = %request.method(),
		request.uri = %request.uri(),
		response.status = tracing::field::Empty,
		latency = tracing::field::Empty,
	);

	if let Some(request_id) = request.extensions().get::<RequestId>() {
		span.record("request.id", tracing::field::debug(request_id.header_value()));
	}

	if let Some(ConnectInfo(peer_addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
		span.record("request.peer_addr", tracing::field::display(peer_addr));
	}

	span
}

/// Records the response status and latency on the request span.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordResponse;

impl<B> OnResponse<B> for RecordResponse
{
	fn on_response(self, response: &http::Response<B>, latency: Duration, span: &Span)
	{
		span.record("response.status", response.status().as_u16())
			.record("latency", tracing::field::debug(latency));

		info!(target: "crud_list::http", "finished processing request");
	}
}

fn on_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &Span)
{
	match failure {
		ServerErrorsFailureClass::StatusCode(status) => {
			error!(
				target: "crud_list::http::error",
				status = status.as_u16(),
				?latency,
				"failed to handle request",
			);
		},
		ServerErrorsFailureClass::Error(error) => {
			error!(target: "crud_list::http::error", error, ?latency, "failed to handle request");
		},
	}
}
