//! Middleware wrapped around the HTTP router.

pub(crate) mod catch_panic;
pub(crate) mod request_id;
pub(crate) mod trace;
