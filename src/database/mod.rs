//! Database access.
//!
//! The service talks to a MySQL / MariaDB server through a [`sqlx`]
//! connection pool. The schema is created by the embedded migrations on
//! startup.

mod error;
pub use error::{DatabaseError, DatabaseResult};

mod query;
pub use query::{FilteredQueryBuilder, QueryBuilderExt, UpdateQueryBuilder};

use crate::config::DatabaseConfig;

pub type Driver = sqlx::MySql;
pub type Pool = sqlx::Pool<Driver>;
pub type QueryBuilder<'args> = sqlx::QueryBuilder<'args, Driver>;

/// Opens a connection pool according to `config`.
///
/// `min_connections` connections are opened immediately and kept around even
/// when idle; the pool never opens more than `max_connections`.
#[instrument(skip_all, fields(url.host = config.url.host_str()), err)]
pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Pool>
{
	let pool = sqlx::pool::PoolOptions::<Driver>::new()
		.min_connections(config.min_connections)
		.max_connections(config.max_connections.get())
		.max_lifetime(config.max_lifetime)
		.idle_timeout(config.idle_timeout)
		.connect(config.url.as_str())
		.await?;

	info!(
		min_connections = config.min_connections,
		max_connections = config.max_connections.get(),
		"connected to database",
	);

	Ok(pool)
}

/// Runs any pending migrations.
#[instrument(skip_all, err)]
pub async fn migrate(pool: &Pool) -> Result<(), sqlx::migrate::MigrateError>
{
	sqlx::migrate!("./database/migrations").run(pool).await?;

	debug!("database schema is up to date");

	Ok(())
}
