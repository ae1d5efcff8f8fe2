use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, de};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TracingConfig
{
	/// Install a tracing subscriber at all.
	pub enable: bool,

	/// Filter directives applied on top of `RUST_LOG`.
	pub filters: Vec<Filter>,

	/// Emit human-readable logs to stderr.
	pub stderr: Option<StderrConfig>,

	/// Emit JSON logs to daily-rotated files.
	pub files: Option<FilesConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct StderrConfig
{
	/// Use ANSI escape codes for colors.
	pub ansi: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilesConfig
{
	/// The directory to write log files into.
	pub directory: Box<Path>,
}

/// A filter directive, e.g. `crud_list=debug`.
#[derive(Debug)]
pub struct Filter(pub Directive);

impl TracingConfig
{
	/// Builds an [`EnvFilter`] from `RUST_LOG` and the configured directives.
	///
	/// If neither specify anything, `INFO` is used.
	pub fn env_filter(&self) -> EnvFilter
	{
		let base = EnvFilter::builder()
			.with_default_directive(default_directive())
			.from_env_lossy();

		self.filters
			.iter()
			.map(|Filter(directive)| directive.clone())
			.fold(base, EnvFilter::add_directive)
	}
}

fn default_directive() -> Directive
{
	tracing_subscriber::filter::LevelFilter::INFO.into()
}

impl Default for TracingConfig
{
	fn default() -> Self
	{
		Self {
			enable: true,
			filters: Vec::new(),
			stderr: Some(StderrConfig::default()),
			files: None,
		}
	}
}

impl Default for StderrConfig
{
	fn default() -> Self
	{
		Self { ansi: true }
	}
}

impl Default for FilesConfig
{
	fn default() -> Self
	{
		Self { directory: PathBuf::from("/var/log/crud-list").into_boxed_path() }
	}
}

impl<'de> Deserialize<'de> for Filter
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer)?
			.parse::<Directive>()
			.map(Self)
			.map_err(de::Error::custom)
	}
}
