//! Utilities for unit tests.

use axum::BoxError;
use axum::body::HttpBody;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

mod macros;

#[allow(unused_imports)]
pub(crate) use macros::*;

pub type Error = anyhow::Error;
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Collects a response body and deserializes it as JSON.
pub(crate) async fn collect_res_body<T, B>(body: B) -> Result<T>
where
	T: DeserializeOwned,
	B: HttpBody,
	B::Error: Into<BoxError>,
{
	let bytes = body
		.collect()
		.await
		.map_err(|error| {
			let error: BoxError = error.into();
			anyhow::anyhow!(error)
		})?
		.to_bytes();

	let value = serde_json::from_slice(&bytes)?;

	Ok(value)
}
