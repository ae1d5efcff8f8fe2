//! Logging setup.
//!
//! Logs go to stderr in a human-readable format and, optionally, to
//! daily-rotated JSON files.

use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::TracingConfig;

mod files;
mod stderr;

/// Installs the global tracing subscriber.
///
/// The returned guard flushes buffered file logs when dropped, so it must be
/// kept alive for as long as the process runs.
pub fn init(config: &TracingConfig) -> io::Result<Option<WorkerGuard>>
{
	if !config.enable {
		return Ok(None);
	}

	let stderr = config.stderr.as_ref().map(stderr::layer::<Registry>);
	let (files, guard) = config
		.files
		.as_ref()
		.map(files::layer::<Registry>)
		.transpose()?
		.unzip();

	tracing_subscriber::registry()
		.with(Layer::and_then(stderr, files).with_filter(config.env_filter()))
		.try_init()
		.map_err(io::Error::other)?;

	info!("initialized tracing");

	Ok(guard)
}
