//! Helpers for building SQL queries at runtime.

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::{Driver, QueryBuilder};

/// Extension trait for [`sqlx::QueryBuilder`].
pub trait QueryBuilderExt
{
	/// Pushes `LIMIT` and `OFFSET` clauses into the query.
	fn push_limits(&mut self, limit: u64, offset: u64) -> &mut Self;
}

impl QueryBuilderExt for QueryBuilder<'_>
{
	fn push_limits(&mut self, limit: u64, offset: u64) -> &mut Self
	{
		self.push(" LIMIT ")
			.push_bind(limit)
			.push(" OFFSET ")
			.push_bind(offset)
	}
}

/// A wrapper around [`sqlx::QueryBuilder`] that allows easily building queries
/// with one or more `WHERE` filters.
pub struct FilteredQueryBuilder<'args>
{
	query: QueryBuilder<'args>,

	/// Whether we already pushed `WHERE`.
	has_where: bool,
}

impl<'args> FilteredQueryBuilder<'args>
{
	pub fn new(query: impl Into<String>) -> Self
	{
		Self { query: QueryBuilder::new(query), has_where: false }
	}

	/// Adds a filter into the query.
	///
	/// # Example
	///
	/// ```rust,ignore
	/// let mut query = FilteredQueryBuilder::new("SELECT * FROM list");
	///
	/// if let Some(name) = name {
	///     query.filter("name = ", name);
	/// }
	///
	/// let result = query.build().fetch_all(&pool).await?;
	/// ```
	pub fn filter<V>(&mut self, column: impl fmt::Display, value: V) -> &mut Self
	where
		V: sqlx::Type<Driver> + sqlx::Encode<'args, Driver> + Send + 'args,
	{
		self.push_condition().push(column).push_bind(value);
		self
	}

	/// Adds an `IS (NOT) NULL` filter into the query.
	pub fn filter_is_null(&mut self, column: impl fmt::Display, is_null: bool) -> &mut Self
	{
		self.push_condition()
			.push(column)
			.push(if is_null { " IS NULL" } else { " IS NOT NULL" });

		self
	}

	fn push_condition(&mut self) -> &mut QueryBuilder<'args>
	{
		self.query.push(if self.has_where { " AND " } else { " WHERE " });
		self.has_where = true;
		&mut self.query
	}
}

impl fmt::Debug for FilteredQueryBuilder<'_>
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt.debug_struct("FilteredQueryBuilder")
			.field("sql", &self.query.sql())
			.field("has_where", &self.has_where)
			.finish()
	}
}

impl<'args> Deref for FilteredQueryBuilder<'args>
{
	type Target = QueryBuilder<'args>;

	fn deref(&self) -> &Self::Target
	{
		&self.query
	}
}

impl DerefMut for FilteredQueryBuilder<'_>
{
	fn deref_mut(&mut self) -> &mut Self::Target
	{
		&mut self.query
	}
}

/// A wrapper around [`sqlx::QueryBuilder`] that allows easily building an
/// `UPDATE` query.
pub struct UpdateQueryBuilder<'args>
{
	query: QueryBuilder<'args>,

	/// Whether we already pushed `SET`.
	has_set: bool,
}

impl<'args> UpdateQueryBuilder<'args>
{
	pub fn new(table: impl fmt::Display) -> Self
	{
		Self { query: QueryBuilder::new(format!("UPDATE {table}")), has_set: false }
	}

	/// Adds an assignment into the query.
	pub fn set<V>(&mut self, column: impl fmt::Display, value: V) -> &mut Self
	where
		V: sqlx::Type<Driver> + sqlx::Encode<'args, Driver> + Send + 'args,
	{
		self.query
			.push(if self.has_set { ", " } else { " SET " })
			.push(column)
			.push(" = ")
			.push_bind(value);

		self.has_set = true;
		self
	}

	/// Like [`set()`], but does nothing if `value` is [`None`].
	///
	/// [`set()`]: UpdateQueryBuilder::set
	pub fn set_some<V>(&mut self, column: impl fmt::Display, value: Option<V>) -> &mut Self
	where
		V: sqlx::Type<Driver> + sqlx::Encode<'args, Driver> + Send + 'args,
	{
		if let Some(value) = value {
			self.set(column, value);
		}

		self
	}

	/// Finishes the `SET` list and continues with `WHERE` filters.
	pub fn filtered(self) -> FilteredQueryBuilder<'args>
	{
		FilteredQueryBuilder { query: self.query, has_where: false }
	}
}

impl fmt::Debug for UpdateQueryBuilder<'_>
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt.debug_struct("UpdateQueryBuilder")
			.field("sql", &self.query.sql())
			.field("has_set", &self.has_set)
			.finish()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn filters_are_joined_with_and() -> testing::Result
	{
		let mut query = FilteredQueryBuilder::new("SELECT id FROM list");

		query.filter("name = ", "alice").filter_is_null("deleted_at", true);

		testing::assert_eq!(
			query.sql(),
			"SELECT id FROM list WHERE name = ? AND deleted_at IS NULL"
		);

		Ok(())
	}

	#[test]
	fn no_filters_means_no_where() -> testing::Result
	{
		let query = FilteredQueryBuilder::new("SELECT COUNT(*) FROM list");

		testing::assert_eq!(query.sql(), "SELECT COUNT(*) FROM list");

		Ok(())
	}

	#[test]
	fn limits_are_appended() -> testing::Result
	{
		let mut query = FilteredQueryBuilder::new("SELECT id FROM list");

		query.filter_is_null("deleted_at", false);
		query.push(" ORDER BY id").push_limits(2, 4);

		testing::assert_eq!(
			query.sql(),
			"SELECT id FROM list WHERE deleted_at IS NOT NULL ORDER BY id LIMIT ? OFFSET ?"
		);

		Ok(())
	}

	#[test]
	fn update_skips_missing_values() -> testing::Result
	{
		let mut query = UpdateQueryBuilder::new("list");

		query
			.set("updated_at", 1_u64)
			.set_some("name", Some("bob"))
			.set_some("state", None::<&str>)
			.set_some("phone", Some("123"));

		let mut query = query.filtered();
		query.filter("id = ", 1_u64).filter_is_null("deleted_at", true);

		testing::assert_eq!(
			query.sql(),
			"UPDATE list SET updated_at = ?, name = ?, phone = ? WHERE id = ? AND deleted_at IS NULL"
		);

		Ok(())
	}

	#[test]
	fn debug_output_shows_sql() -> testing::Result
	{
		let mut update = UpdateQueryBuilder::new("list");
		update.set("name", "bob");

		testing::assert!(format!("{update:?}").contains("UPDATE list SET name = ?"));

		let mut query = update.filtered();
		query.filter("id = ", 1_u64);

		testing::assert!(format!("{query:?}").contains("WHERE id = ?"));

		Ok(())
	}
}
