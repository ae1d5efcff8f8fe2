//! Records stored in the `list` table.
//!
//! A [`Record`] is a small contact-like entry with five business fields. Records
//! are never removed from storage; deleting one sets its `deleted_at` column,
//! and every operation of a [`RecordStore`] ignores such rows.

use std::num::ParseIntError;
use std::str::FromStr;

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::database::DatabaseResult;

mod text;
pub use text::{BoundedText, TextError};

mod memory;
pub use memory::MemoryStore;

mod mysql;
pub use mysql::MySqlStore;

pub type Name = BoundedText<20>;
pub type State = BoundedText<20>;
pub type Phone = BoundedText<20>;
pub type Email = BoundedText<40>;
pub type Address = BoundedText<200>;

/// A record's unique identifier.
#[derive(
	Debug,
	Display,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	From,
	Serialize,
	Deserialize,
	sqlx::Type
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RecordId(u64);

impl FromStr for RecordId
{
	type Err = ParseIntError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		value.parse::<u64>().map(Self)
	}
}

/// A persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Record
{
	pub id: RecordId,
	pub name: String,
	pub state: String,
	pub phone: String,
	pub email: String,
	pub address: String,

	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,

	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,

	#[serde(with = "time::serde::rfc3339::option")]
	pub deleted_at: Option<OffsetDateTime>,
}

/// A validated record that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewRecord
{
	pub name: Name,
	pub state: State,
	pub phone: Phone,
	pub email: Email,
	pub address: Address,
}

/// A validated partial update.
///
/// Fields that are [`None`] keep their current value.
#[derive(Debug, Default, Clone)]
pub struct RecordUpdate
{
	pub name: Option<Name>,
	pub state: Option<State>,
	pub phone: Option<Phone>,
	pub email: Option<Email>,
	pub address: Option<Address>,
}

/// A request body for creating a record, as sent by clients.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRecordRequest
{
	pub name: Option<String>,
	pub state: Option<String>,
	pub phone: Option<String>,
	pub email: Option<String>,
	pub address: Option<String>,
}

/// A request body for updating a record, as sent by clients.
///
/// Absent fields and empty strings are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecordRequest
{
	pub name: Option<String>,
	pub state: Option<String>,
	pub phone: Option<String>,
	pub email: Option<String>,
	pub address: Option<String>,
}

/// A field of a request body failed validation.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("invalid `{field}`: {reason}")]
pub struct InvalidRecord
{
	pub field: &'static str,

	#[error(source)]
	pub reason: TextError,
}

impl TryFrom<CreateRecordRequest> for NewRecord
{
	type Error = InvalidRecord;

	fn try_from(request: CreateRecordRequest) -> Result<Self, Self::Error>
	{
		Ok(Self {
			name: required("name", request.name)?,
			state: required("state", request.state)?,
			phone: required("phone", request.phone)?,
			email: required("email", request.email)?,
			address: required("address", request.address)?,
		})
	}
}

impl TryFrom<UpdateRecordRequest> for RecordUpdate
{
	type Error = InvalidRecord;

	fn try_from(request: UpdateRecordRequest) -> Result<Self, Self::Error>
	{
		Ok(Self {
			name: optional("name", request.name)?,
			state: optional("state", request.state)?,
			phone: optional("phone", request.phone)?,
			email: optional("email", request.email)?,
			address: optional("address", request.address)?,
		})
	}
}

fn required<const MAX: usize>(
	field: &'static str,
	value: Option<String>,
) -> Result<BoundedText<MAX>, InvalidRecord>
{
	BoundedText::new(value.unwrap_or_default()).map_err(|reason| InvalidRecord { field, reason })
}

fn optional<const MAX: usize>(
	field: &'static str,
	value: Option<String>,
) -> Result<Option<BoundedText<MAX>>, InvalidRecord>
{
	match value {
		None => Ok(None),
		Some(value) if value.is_empty() => Ok(None),
		Some(value) => required(field, Some(value)).map(Some),
	}
}

/// A page of records, as requested through `pageNum` and `pageSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page
{
	/// 1-based page number.
	pub number: u64,

	/// Maximum amount of records on the page.
	pub size: u64,
}

impl Page
{
	/// Returns [`None`] if either value is zero, which disables pagination.
	pub fn new(number: u64, size: u64) -> Option<Self>
	{
		(number > 0 && size > 0).then_some(Self { number, size })
	}

	/// The amount of records that come before this page.
	pub fn offset(&self) -> u64
	{
		(self.number - 1).saturating_mul(self.size)
	}
}

/// Persistent storage for records.
///
/// Soft-deleted records are invisible to every method.
pub trait RecordStore: Clone + Send + Sync + 'static
{
	/// Persists a new record and returns it as stored.
	fn create(&self, record: NewRecord) -> impl Future<Output = DatabaseResult<Record>> + Send;

	/// Soft-deletes the record with the given ID.
	///
	/// Returns the amount of records that were deleted.
	fn delete(&self, id: RecordId) -> impl Future<Output = DatabaseResult<u64>> + Send;

	/// Checks whether a record with the given ID exists.
	fn exists(&self, id: RecordId) -> impl Future<Output = DatabaseResult<bool>> + Send;

	/// Applies `update` to the record with the given ID and refreshes its
	/// `updated_at` timestamp.
	///
	/// Returns the amount of records that were updated.
	fn update(
		&self,
		id: RecordId,
		update: RecordUpdate,
	) -> impl Future<Output = DatabaseResult<u64>> + Send;

	/// Returns all records with exactly the given name, ordered by ID.
	fn find_by_name(&self, name: &str) -> impl Future<Output = DatabaseResult<Vec<Record>>> + Send;

	/// Counts all records.
	fn count(&self) -> impl Future<Output = DatabaseResult<u64>> + Send;

	/// Returns all records on the given page, or all records if `page` is
	/// [`None`], ordered by ID.
	fn list(&self, page: Option<Page>) -> impl Future<Output = DatabaseResult<Vec<Record>>> + Send;
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	fn create_request() -> CreateRecordRequest
	{
		CreateRecordRequest {
			name: Some(String::from("alice")),
			state: Some(String::from("active")),
			phone: Some(String::from("5550100")),
			email: Some(String::from("alice@example.com")),
			address: Some(String::from("1 Main Street")),
		}
	}

	#[test]
	fn valid_create_request() -> testing::Result
	{
		let record = NewRecord::try_from(create_request())?;

		testing::assert_eq!(record.name.as_str(), "alice");
		testing::assert_eq!(record.address.as_str(), "1 Main Street");

		Ok(())
	}

	#[test]
	fn create_request_missing_field() -> testing::Result
	{
		let request = CreateRecordRequest { phone: None, ..create_request() };

		testing::assert_eq!(
			NewRecord::try_from(request).map(drop),
			Err(InvalidRecord { field: "phone", reason: TextError::Empty })
		);

		Ok(())
	}

	#[test]
	fn create_request_empty_field() -> testing::Result
	{
		let request = CreateRecordRequest { state: Some(String::new()), ..create_request() };

		testing::assert_eq!(
			NewRecord::try_from(request).map(drop),
			Err(InvalidRecord { field: "state", reason: TextError::Empty })
		);

		Ok(())
	}

	#[test]
	fn create_request_field_too_long() -> testing::Result
	{
		let request = CreateRecordRequest { email: Some("x".repeat(41)), ..create_request() };

		testing::assert_eq!(
			NewRecord::try_from(request).map(drop),
			Err(InvalidRecord { field: "email", reason: TextError::TooLong { max: 40 } })
		);

		Ok(())
	}

	#[test]
	fn update_request_ignores_empty_fields() -> testing::Result
	{
		let update = RecordUpdate::try_from(UpdateRecordRequest {
			name: Some(String::new()),
			phone: Some(String::from("5550199")),
			..Default::default()
		})?;

		testing::assert!(update.name.is_none());
		testing::assert_eq!(update.phone.as_deref(), Some("5550199"));
		testing::assert!(update.state.is_none());

		let update = RecordUpdate::try_from(UpdateRecordRequest::default())?;

		testing::assert!(update.name.is_none() && update.address.is_none());

		Ok(())
	}

	#[test]
	fn update_request_field_too_long() -> testing::Result
	{
		let request = UpdateRecordRequest { address: Some("x".repeat(201)), ..Default::default() };

		testing::assert_eq!(
			RecordUpdate::try_from(request).map(drop),
			Err(InvalidRecord { field: "address", reason: TextError::TooLong { max: 200 } })
		);

		Ok(())
	}

	#[test]
	fn page_offsets() -> testing::Result
	{
		testing::assert_eq!(Page::new(1, 10).map(|page| page.offset()), Some(0));
		testing::assert_eq!(Page::new(2, 2).map(|page| page.offset()), Some(2));
		testing::assert_eq!(Page::new(0, 10), None);
		testing::assert_eq!(Page::new(1, 0), None);

		Ok(())
	}

	#[test]
	fn record_ids_parse_from_path_segments() -> testing::Result
	{
		testing::assert_eq!("42".parse::<RecordId>()?, RecordId::from(42));
		testing::assert!("abc".parse::<RecordId>().is_err());
		testing::assert!("-1".parse::<RecordId>().is_err());

		Ok(())
	}
}
