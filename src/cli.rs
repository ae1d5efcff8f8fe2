//! CLI argument handling.

use std::net::IpAddr;
use std::path::Path;

use clap::Parser;
use crud_list::Config;
use url::Url;

/// The config file we look for if `--config` is not specified.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "./crud-list.toml";

/// A small REST service managing contact-like records.
///
/// Records are stored in a MySQL / MariaDB database unless the configuration
/// selects the in-memory backend.
#[derive(Debug, Parser)]
#[command(version)]
pub(crate) struct Args
{
	/// Path to the configuration file.
	///
	/// Defaults to `./crud-list.toml` if that file exists.
	#[arg(long = "config")]
	pub config_path: Option<Box<Path>>,

	/// The IP address to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long)]
	pub ip: Option<IpAddr>,

	/// The port to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long)]
	pub port: Option<u16>,

	/// The URL of the database server.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long, env = "DATABASE_URL")]
	pub database_url: Option<Url>,
}

/* NOTE:
 * We expose a free function here so callers don't need to have
 * `clap::Parser` in-scope.
 */

pub(crate) fn args() -> Args
{
	Args::parse()
}

impl Args
{
	/// Applies any overrides specified as CLI flags to `config`.
	pub(crate) fn apply_to_config(&self, config: &mut Config)
	{
		if let Some(ip) = self.ip {
			config.http.ip = ip;
		}

		if let Some(port) = self.port {
			config.http.port = port;
		}

		if let Some(ref url) = self.database_url {
			config.database.url = url.clone();
		}
	}
}
