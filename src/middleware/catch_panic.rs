use std::any::Any;

use axum::body::Body;
use axum::response::IntoResponse;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::http::Envelope;

/// Turns panics in handlers into a code 500 envelope.
pub(crate) fn layer() -> CatchPanicLayer<PanicHandler>
{
	CatchPanicLayer::custom(PanicHandler)
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PanicHandler;

impl ResponseForPanic for PanicHandler
{
	type ResponseBody = Body;

	fn response_for_panic(
		&mut self,
		error: Box<dyn Any + Send + 'static>,
	) -> http::Response<Self::ResponseBody>
	{
		let error = error
			.downcast_ref::<&str>()
			.copied()
			.or_else(|| error.downcast_ref::<String>().map(String::as_str));

		error!(?error, "http handler panicked");

		Envelope::internal_error().into_response()
	}
}

#[cfg(test)]
mod tests
{
	use tower::{Layer, ServiceExt, service_fn};

	use super::*;
	use crate::testing;

	#[tokio::test]
	async fn panics_become_internal_errors() -> testing::Result
	{
		let request = http::Request::builder()
			.method(http::Method::GET)
			.uri("/")
			.body(Body::empty())?;

		let response = layer()
			.layer(service_fn(|_: http::Request<Body>| async {
				if true {
					panic!("whoops");
				}

				Ok::<_, std::convert::Infallible>(http::Response::new(Body::empty()))
			}))
			.oneshot(request)
			.await?;

		testing::assert_eq!(response.status(), http::StatusCode::OK);

		let body = testing::collect_res_body::<serde_json::Value, _>(response.into_body()).await?;

		testing::assert_eq!(body["code"], 500);
		testing::assert_eq!(body["msg"], "internal error");
		testing::assert_eq!(body["data"], serde_json::json!({}));

		Ok(())
	}
}
