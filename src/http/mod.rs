//! The HTTP interface.
//!
//! All routes live under `/user` and respond with an [`Envelope`].

use axum::{Router, routing};

use crate::records::RecordStore;

mod envelope;
pub(crate) use envelope::{Envelope, HandlerError, HandlerResult};

mod json;
pub(crate) use json::{Json, JsonRejection};

mod handlers;


/// Builds the router serving every record endpoint on top of `store`.
pub(crate) fn router<S>(store: S) -> Router
where
	S: RecordStore,
{
	Router::new()
		.route("/user/add", routing::post(handlers::create::<S>))
		.route("/user/delete/{id}", routing::delete(handlers::delete::<S>))
		.route("/user/update/{id}", routing::put(handlers::update::<S>))
		.route("/user/list/{name}", routing::get(handlers::find_by_name::<S>))
		.route("/user/list", routing::get(handlers::list::<S>))
		.with_state(store)
}
