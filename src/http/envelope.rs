use std::error::Error;
use std::panic::Location;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use crate::database::DatabaseError;

/// Payload of failure envelopes; serializes as `{}`.
pub(crate) type Empty = serde_json::Map<String, serde_json::Value>;

pub(crate) type HandlerResult<T> = Result<Envelope<T>, HandlerError>;

/// The `{ code, msg, data }` body every endpoint responds with.
///
/// The HTTP status is always `200 OK`; success or failure is conveyed by
/// `code`.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T>
{
	code: u16,
	msg: &'static str,
	data: T,
}

impl<T> Envelope<T>
{
	pub(crate) fn success(msg: &'static str, data: T) -> Self
	{
		Self { code: StatusCode::OK.as_u16(), msg, data }
	}
}

impl Envelope<Empty>
{
	pub(crate) fn failure(code: StatusCode, msg: &'static str) -> Self
	{
		Self { code: code.as_u16(), msg, data: Empty::new() }
	}

	/// The envelope sent when something went wrong on our side.
	pub(crate) fn internal_error() -> Self
	{
		Self::failure(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
	}
}

impl<T> IntoResponse for Envelope<T>
where
	T: Serialize,
{
	fn into_response(self) -> Response
	{
		axum::Json(self).into_response()
	}
}

#[derive(Debug)]
pub(crate) enum HandlerError
{
	/// The request could not be fulfilled; responds with code 400 and the
	/// given message.
	Rejected(&'static str),

	/// Storage failed; responds with code 500.
	Internal,
}

impl IntoResponse for HandlerError
{
	fn into_response(self) -> Response
	{
		let envelope = match self {
			HandlerError::Rejected(msg) => Envelope::failure(StatusCode::BAD_REQUEST, msg),
			HandlerError::Internal => Envelope::internal_error(),
		};

		envelope.into_response()
	}
}

impl From<DatabaseError> for HandlerError
{
	#[track_caller]
	fn from(error: DatabaseError) -> Self
	{
		error!(loc = %Location::caller(), error = &error as &dyn Error, "storage operation failed");
		Self::Internal
	}
}
