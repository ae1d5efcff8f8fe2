use std::num::TryFromIntError;

use derive_more::{Display, Error, From};

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// An error returned by the database.
#[derive(Debug, Display, Error, From)]
#[display("database error: {_0}")]
pub struct DatabaseError(sqlx::Error);

impl DatabaseError
{
	/// Helper function to construct a [`DatabaseError`] from a failed attempt to
	/// convert the result of a `SELECT COUNT(*) FROM …` query.
	pub(crate) fn convert_count(error: TryFromIntError) -> Self
	{
		Self(sqlx::Error::ColumnDecode { index: String::from("count"), source: Box::new(error) })
	}
}
