//! A small REST service managing contact-like records.
//!
//! Records live in a single `list` table and are exposed over five HTTP
//! endpoints under `/user`. Every response is a `{ code, msg, data }`
//! envelope.

/*
 * crud-list
 *
 * Copyright (C) 2024  crud-list contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

use std::io;
use std::net::SocketAddr;

use derive_more::{Display, Error, From};

#[macro_use]
extern crate tracing as _;

#[cfg(test)]
mod testing;

mod http;
mod middleware;
mod signals;

pub mod config;
pub mod database;
pub mod records;
pub mod tracing;

pub use self::config::Config;
use self::config::StorageBackend;
use self::records::{MemoryStore, MySqlStore, RecordStore};

/// Errors that can occur while running the service.
#[derive(Debug, Display, Error, From)]
pub enum RunError
{
	#[display("failed to connect to the database: {_0}")]
	Database(database::DatabaseError),

	#[display("failed to run database migrations: {_0}")]
	Migrate(sqlx::migrate::MigrateError),

	#[display("http server error: {_0}")]
	Io(io::Error),
}

/// Runs the HTTP server until a shutdown signal is received.
#[instrument(skip_all, err)]
pub async fn run(config: Config) -> Result<(), RunError>
{
	match config.database.backend {
		StorageBackend::MySql => {
			let pool = database::connect(&config.database).await?;

			database::migrate(&pool).await?;

			let result = serve(&config, MySqlStore::new(pool.clone())).await;

			info!("closing database connections");
			pool.close().await;

			result
		},
		StorageBackend::Memory => {
			warn!("using in-memory storage; records will be lost on shutdown");
			serve(&config, MemoryStore::default()).await
		},
	}
}

async fn serve<S>(config: &Config, store: S) -> Result<(), RunError>
where
	S: RecordStore,
{
	let service = http::router(store)
		.layer(middleware::catch_panic::layer())
		.layer(middleware::trace::layer())
		.layer(middleware::request_id::layers())
		.into_make_service_with_connect_info::<SocketAddr>();

	let tcp_listener = tokio::net::TcpListener::bind(config.http.socket_addr()).await?;
	let addr = tcp_listener.local_addr()?;

	info!(%addr, "listening for http requests");

	axum::serve(tcp_listener, service)
		.with_graceful_shutdown(signals::shutdown())
		.await?;

	info!("http server shut down");

	Ok(())
}
