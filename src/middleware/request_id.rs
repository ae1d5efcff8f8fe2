use tower_http::request_id::{
	MakeRequestId,
	PropagateRequestIdLayer,
	RequestId,
	SetRequestIdLayer,
};
use uuid::Uuid;

/// Tags every request with an `x-request-id` header and copies it onto the
/// response.
pub(crate) fn layers() -> (SetRequestIdLayer<Uuidv7>, PropagateRequestIdLayer)
{
	(SetRequestIdLayer::x_request_id(Uuidv7), PropagateRequestIdLayer::x_request_id())
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Uuidv7;

impl MakeRequestId for Uuidv7
{
	fn make_request_id<B>(&mut self, _: &http::Request<B>) -> Option<RequestId>
	{
		Uuid::now_v7()
			.hyphenated()
			.to_string()
			.parse::<http::HeaderValue>()
			.inspect_err(|error| warn!(%error, "failed to generate request ID"))
			.map(RequestId::new)
			.ok()
	}
}
