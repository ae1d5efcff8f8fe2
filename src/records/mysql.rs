use futures_util::TryFutureExt;
use time::OffsetDateTime;

use super::{BoundedText, NewRecord, Page, Record, RecordId, RecordStore, RecordUpdate};
use crate::database::{
	self,
	DatabaseError,
	DatabaseResult,
	FilteredQueryBuilder,
	QueryBuilderExt,
	UpdateQueryBuilder,
};

const SELECT: &str = "SELECT
  id,
  name,
  state,
  phone,
  email,
  address,
  created_at,
  updated_at,
  deleted_at
FROM list";

/// A [`RecordStore`] backed by a MySQL / MariaDB connection pool.
#[derive(Debug, Clone)]
pub struct MySqlStore
{
	pool: database::Pool,
}

impl MySqlStore
{
	pub fn new(pool: database::Pool) -> Self
	{
		Self { pool }
	}
}

impl RecordStore for MySqlStore
{
	#[instrument(skip(self), ret(level = "debug"), err)]
	async fn create(&self, record: NewRecord) -> DatabaseResult<Record>
	{
		let now = OffsetDateTime::now_utc();

		// `LAST_INSERT_ID()` is per connection, so both queries have to run on
		// the same one.
		let mut conn = self.pool.acquire().await?;

		let id = sqlx::query(
			"INSERT INTO list (created_at, updated_at, name, state, phone, email, address)
			 VALUES (?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(now)
		.bind(now)
		.bind(record.name.as_str())
		.bind(record.state.as_str())
		.bind(record.phone.as_str())
		.bind(record.email.as_str())
		.bind(record.address.as_str())
		.execute(&mut *conn)
		.await?
		.last_insert_id();

		let select = format!("{SELECT} WHERE id = ?");

		sqlx::query_as::<_, Record>(&select)
			.bind(id)
			.fetch_one(&mut *conn)
			.map_err(DatabaseError::from)
			.await
	}

	#[instrument(skip(self), ret(level = "debug"), err)]
	async fn delete(&self, id: RecordId) -> DatabaseResult<u64>
	{
		sqlx::query("UPDATE list SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
			.bind(OffsetDateTime::now_utc())
			.bind(id)
			.execute(&self.pool)
			.map_ok(|result| result.rows_affected())
			.map_err(DatabaseError::from)
			.await
	}

	#[instrument(skip(self), ret(level = "debug"), err)]
	async fn exists(&self, id: RecordId) -> DatabaseResult<bool>
	{
		sqlx::query_scalar::<_, RecordId>("SELECT id FROM list WHERE id = ? AND deleted_at IS NULL")
			.bind(id)
			.fetch_optional(&self.pool)
			.map_ok(|row| row.is_some())
			.map_err(DatabaseError::from)
			.await
	}

	#[instrument(skip(self), ret(level = "debug"), err)]
	async fn update(&self, id: RecordId, update: RecordUpdate) -> DatabaseResult<u64>
	{
		let mut query = UpdateQueryBuilder::new("list");

		query
			.set("updated_at", OffsetDateTime::now_utc())
			.set_some("name", update.name.map(BoundedText::into_inner))
			.set_some("state", update.state.map(BoundedText::into_inner))
			.set_some("phone", update.phone.map(BoundedText::into_inner))
			.set_some("email", update.email.map(BoundedText::into_inner))
			.set_some("address", update.address.map(BoundedText::into_inner));

		let mut query = query.filtered();

		query.filter("id = ", id).filter_is_null("deleted_at", true);

		query
			.build()
			.execute(&self.pool)
			.map_ok(|result| result.rows_affected())
			.map_err(DatabaseError::from)
			.await
	}

	#[instrument(skip(self), err)]
	async fn find_by_name(&self, name: &str) -> DatabaseResult<Vec<Record>>
	{
		let mut query = FilteredQueryBuilder::new(SELECT);

		query.filter("name = ", name).filter_is_null("deleted_at", true);
		query.push(" ORDER BY id");

		let records = query.build_query_as::<Record>().fetch_all(&self.pool).await?;

		debug!(count = records.len(), "found records");

		Ok(records)
	}

	#[instrument(skip(self), ret(level = "debug"), err)]
	async fn count(&self) -> DatabaseResult<u64>
	{
		sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM list WHERE deleted_at IS NULL")
			.fetch_one(&self.pool)
			.map_err(DatabaseError::from)
			.and_then(async |count| u64::try_from(count).map_err(DatabaseError::convert_count))
			.await
	}

	#[instrument(skip(self), err)]
	async fn list(&self, page: Option<Page>) -> DatabaseResult<Vec<Record>>
	{
		let mut query = FilteredQueryBuilder::new(SELECT);

		query.filter_is_null("deleted_at", true);
		query.push(" ORDER BY id");

		if let Some(page) = page {
			query.push_limits(page.size, page.offset());
		}

		let records = query.build_query_as::<Record>().fetch_all(&self.pool).await?;

		debug!(count = records.len(), "fetched records");

		Ok(records)
	}
}
