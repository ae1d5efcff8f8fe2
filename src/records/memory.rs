use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::{NewRecord, Page, Record, RecordId, RecordStore, RecordUpdate};
use crate::database::DatabaseResult;

/// A [`RecordStore`] that keeps everything in memory.
///
/// Clones share the same underlying storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore
{
	rows: Arc<RwLock<Rows>>,
}

#[derive(Debug, Default)]
struct Rows
{
	records: Vec<Record>,
	last_id: u64,
}

impl Rows
{
	fn alive(&self) -> impl Iterator<Item = &Record>
	{
		self.records.iter().filter(|record| record.deleted_at.is_none())
	}

	fn alive_mut(&mut self, id: RecordId) -> impl Iterator<Item = &mut Record>
	{
		self.records
			.iter_mut()
			.filter(move |record| record.id == id && record.deleted_at.is_none())
	}
}

impl RecordStore for MemoryStore
{
	#[instrument(level = "debug", skip(self), ret(level = "debug"), err)]
	async fn create(&self, record: NewRecord) -> DatabaseResult<Record>
	{
		let mut rows = self.rows.write().await;
		let now = OffsetDateTime::now_utc();

		rows.last_id += 1;

		let record = Record {
			id: RecordId::from(rows.last_id),
			name: record.name.into_inner(),
			state: record.state.into_inner(),
			phone: record.phone.into_inner(),
			email: record.email.into_inner(),
			address: record.address.into_inner(),
			created_at: now,
			updated_at: now,
			deleted_at: None,
		};

		rows.records.push(record.clone());

		Ok(record)
	}

	#[instrument(level = "debug", skip(self), ret(level = "debug"), err)]
	async fn delete(&self, id: RecordId) -> DatabaseResult<u64>
	{
		let mut rows = self.rows.write().await;
		let now = OffsetDateTime::now_utc();
		let mut deleted = 0;

		for record in rows.alive_mut(id) {
			record.deleted_at = Some(now);
			deleted += 1;
		}

		Ok(deleted)
	}

	#[instrument(level = "debug", skip(self), ret(level = "debug"), err)]
	async fn exists(&self, id: RecordId) -> DatabaseResult<bool>
	{
		Ok(self.rows.read().await.alive().any(|record| record.id == id))
	}

	#[instrument(level = "debug", skip(self), ret(level = "debug"), err)]
	async fn update(&self, id: RecordId, update: RecordUpdate) -> DatabaseResult<u64>
	{
		let mut rows = self.rows.write().await;
		let now = OffsetDateTime::now_utc();
		let mut updated = 0;

		for record in rows.alive_mut(id) {
			let update = update.clone();

			if let Some(name) = update.name {
				record.name = name.into_inner();
			}

			if let Some(state) = update.state {
				record.state = state.into_inner();
			}

			if let Some(phone) = update.phone {
				record.phone = phone.into_inner();
			}

			if let Some(email) = update.email {
				record.email = email.into_inner();
			}

			if let Some(address) = update.address {
				record.address = address.into_inner();
			}

			record.updated_at = now;
			updated += 1;
		}

		Ok(updated)
	}

	#[instrument(level = "debug", skip(self), err)]
	async fn find_by_name(&self, name: &str) -> DatabaseResult<Vec<Record>>
	{
		let rows = self.rows.read().await;

		Ok(rows.alive().filter(|record| record.name == name).cloned().collect())
	}

	#[instrument(level = "debug", skip(self), ret(level = "debug"), err)]
	async fn count(&self) -> DatabaseResult<u64>
	{
		let rows = self.rows.read().await;

		Ok(rows.alive().fold(0, |count, _| count + 1))
	}

	#[instrument(level = "debug", skip(self), err)]
	async fn list(&self, page: Option<Page>) -> DatabaseResult<Vec<Record>>
	{
		let rows = self.rows.read().await;
		let (offset, limit) = match page {
			Some(page) => (
				usize::try_from(page.offset()).unwrap_or(usize::MAX),
				usize::try_from(page.size).unwrap_or(usize::MAX),
			),
			None => (0, usize::MAX),
		};

		Ok(rows.alive().skip(offset).take(limit).cloned().collect())
	}
}
