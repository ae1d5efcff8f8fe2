//! A JSON request body extractor.
//!
//! Unlike [`axum::Json`], this does not insist on a `Content-Type` header;
//! any body that deserializes is accepted.

use std::any::type_name;
use std::marker::PhantomData;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Debug, Display};
use http::StatusCode;
use serde::Deserialize;

use super::Envelope;

#[derive(Debug)]
pub(crate) struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
	T: for<'de> Deserialize<'de> + std::fmt::Debug,
	S: Send + Sync,
{
	type Rejection = JsonRejection<T>;

	#[instrument(level = "debug", skip_all, ret(level = "debug"), err(level = "debug"))]
	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection>
	{
		let body = Bytes::from_request(req, state).await?;

		serde_json::from_slice(&body[..])
			.map(Self)
			.map_err(JsonRejection::deserialize)
	}
}

#[derive(Debug, Display)]
#[display("failed to extract json body of type `{}`: {}", type_name::<T>(), inner)]
pub(crate) struct JsonRejection<T>
{
	inner: JsonRejectionInner,

	#[debug("{}", type_name::<T>())]
	ty: PhantomData<T>,
}

#[derive(Debug, Display)]
enum JsonRejectionInner
{
	BufferBody(BytesRejection),
	Deserialize(serde_json::Error),
}

impl<T> JsonRejection<T>
{
	fn deserialize(error: serde_json::Error) -> Self
	{
		Self { inner: JsonRejectionInner::Deserialize(error), ty: PhantomData }
	}
}

impl<T> From<BytesRejection> for JsonRejection<T>
{
	fn from(rejection: BytesRejection) -> Self
	{
		Self { inner: JsonRejectionInner::BufferBody(rejection), ty: PhantomData }
	}
}

impl<T> IntoResponse for JsonRejection<T>
{
	fn into_response(self) -> Response
	{
		Envelope::failure(StatusCode::BAD_REQUEST, "invalid request body").into_response()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[derive(std::fmt::Debug, Deserialize)]
	struct Body
	{
		name: String,
	}

	fn request(body: &'static str) -> testing::Result<Request>
	{
		let request = http::Request::builder()
			.method(http::Method::POST)
			.uri("/")
			.body(axum::body::Body::from(body))?;

		Ok(request)
	}

	#[tokio::test]
	async fn does_not_require_content_type() -> testing::Result
	{
		let Json(body) = Json::<Body>::from_request(request(r#"{"name":"alice"}"#)?, &())
			.await
			.map_err(anyhow::Error::msg)?;

		testing::assert_eq!(body.name, "alice");

		Ok(())
	}

	#[tokio::test]
	async fn rejects_malformed_bodies() -> testing::Result
	{
		let rejection = Json::<Body>::from_request(request("{")?, &()).await;

		testing::assert_matches!(
			rejection,
			Err(JsonRejection { inner: JsonRejectionInner::Deserialize(_), .. })
		);

		let rejection = Json::<Body>::from_request(request(r#""alice""#)?, &()).await;

		testing::assert!(rejection.is_err());

		Ok(())
	}
}
