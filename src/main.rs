//! crud-list - a small REST service managing contact-like records.
//! Copyright (C) 2024  crud-list contributors
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program. If not, see https://www.gnu.org/licenses.

use std::fs;

use color_eyre::Section;
use color_eyre::eyre::{self, WrapErr};
use crud_list::Config;

mod cli;

fn main() -> eyre::Result<()>
{
	color_eyre::install()?;

	match dotenvy::dotenv() {
		Ok(_) => {},
		Err(err) if err.not_found() => {},
		Err(err) => return Err(err).wrap_err("failed to load `.env` file"),
	}

	let cli_args = cli::args();
	let mut config = if let Some(path) = cli_args.config_path.as_deref() {
		Config::load_from_file(path)
			.wrap_err_with(|| format!("failed to load configuration from {path:?}"))
			.suggestion("create the file or run with `--config` to specify an alternative path")?
	} else if fs::exists(cli::DEFAULT_CONFIG_PATH)? {
		Config::load_from_file(cli::DEFAULT_CONFIG_PATH.as_ref())
			.wrap_err("failed to load configuration")?
	} else {
		Config::default()
	};

	cli_args.apply_to_config(&mut config);

	let _guard = crud_list::tracing::init(&config.tracing).wrap_err("failed to initialize tracing")?;

	let mut runtime = tokio::runtime::Builder::new_multi_thread();

	if let Some(worker_threads) = config.runtime.worker_threads {
		runtime.worker_threads(worker_threads.get());
	}

	runtime
		.enable_all()
		.build()
		.wrap_err("failed to build tokio runtime")?
		.block_on(crud_list::run(config))
		.wrap_err("failed to run service")
}
