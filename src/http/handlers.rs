use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::{Serialize, Serializer};

use super::envelope::Empty;
use super::{Envelope, HandlerError, HandlerResult, Json, JsonRejection};
use crate::records::{
	CreateRecordRequest,
	NewRecord,
	Page,
	Record,
	RecordId,
	RecordStore,
	RecordUpdate,
	UpdateRecordRequest,
};

const NO_MATCHING_DATA: &str = "no matching data found";

/// `POST /user/add`
#[instrument(skip_all)]
pub(crate) async fn create<S>(
	State(store): State<S>,
	body: Result<Json<CreateRecordRequest>, JsonRejection<CreateRecordRequest>>,
) -> HandlerResult<Record>
where
	S: RecordStore,
{
	let rejected = || HandlerError::Rejected("creation failed");

	let Json(request) = body.map_err(|rejection| {
		debug!(%rejection, "failed to bind request body");
		rejected()
	})?;

	let record = NewRecord::try_from(request).map_err(|error| {
		debug!(%error, "invalid record");
		rejected()
	})?;

	let record = store.create(record).await?;

	info!(id = %record.id, "created record");

	Ok(Envelope::success("creation succeeded", record))
}

/// `DELETE /user/delete/{id}`
#[instrument(skip(store))]
pub(crate) async fn delete<S>(
	State(store): State<S>,
	path: Result<Path<String>, PathRejection>,
) -> HandlerResult<Empty>
where
	S: RecordStore,
{
	let not_found = HandlerError::Rejected("identifier not found, deletion failed");

	let Some(id) = parse_id(path) else {
		return Err(not_found);
	};

	if store.delete(id).await? == 0 {
		return Err(not_found);
	}

	info!(%id, "deleted record");

	Ok(Envelope::success("deletion succeeded", Empty::new()))
}

/// `PUT /user/update/{id}`
///
/// The ID is checked before the body is looked at, so an unknown ID is
/// reported even if the body is malformed.
#[instrument(skip(store, body))]
pub(crate) async fn update<S>(
	State(store): State<S>,
	path: Result<Path<String>, PathRejection>,
	body: Result<Json<UpdateRecordRequest>, JsonRejection<UpdateRecordRequest>>,
) -> HandlerResult<Empty>
where
	S: RecordStore,
{
	let not_found = HandlerError::Rejected("record identifier not found");
	let rejected = || HandlerError::Rejected("update failed");

	let Some(id) = parse_id(path) else {
		return Err(not_found);
	};

	if !store.exists(id).await? {
		return Err(not_found);
	}

	let Json(request) = body.map_err(|rejection| {
		debug!(%rejection, "failed to bind request body");
		rejected()
	})?;

	let update = RecordUpdate::try_from(request).map_err(|error| {
		debug!(%error, "invalid update");
		rejected()
	})?;

	let updated = store.update(id, update).await?;

	info!(%id, updated, "updated record");

	Ok(Envelope::success("update succeeded", Empty::new()))
}

/// Extracts a record ID from the path.
///
/// Segments that are not valid UTF-8 or not an integer yield [`None`].
fn parse_id(path: Result<Path<String>, PathRejection>) -> Option<RecordId>
{
	match path {
		Ok(Path(id)) => id.parse::<RecordId>().ok(),
		Err(rejection) => {
			debug!(%rejection, "failed to bind path");
			None
		},
	}
}

/// `GET /user/list/{name}`
#[instrument(skip(store))]
pub(crate) async fn find_by_name<S>(
	State(store): State<S>,
	path: Result<Path<String>, PathRejection>,
) -> HandlerResult<Vec<Record>>
where
	S: RecordStore,
{
	let Path(name) = path.map_err(|rejection| {
		debug!(%rejection, "failed to bind path");
		HandlerError::Rejected(NO_MATCHING_DATA)
	})?;

	let records = store.find_by_name(&name).await?;

	if records.is_empty() {
		return Err(HandlerError::Rejected(NO_MATCHING_DATA));
	}

	Ok(Envelope::success("query succeeded", records))
}

#[derive(Debug, Default)]
pub(crate) struct ListQuery
{
	page_num: Option<String>,
	page_size: Option<String>,
}

impl ListQuery
{
	/// Builds the query from raw `key=value` pairs.
	///
	/// Only the first occurrence of a repeated key counts.
	fn from_pairs(pairs: Vec<(String, String)>) -> Self
	{
		let mut query = Self::default();

		for (key, value) in pairs {
			let slot = match key.as_str() {
				"pageNum" => &mut query.page_num,
				"pageSize" => &mut query.page_size,
				_ => continue,
			};

			if slot.is_none() {
				*slot = Some(value);
			}
		}

		query
	}

	/// Returns the requested page, or [`None`] if pagination is disabled.
	///
	/// Pagination is disabled unless both parameters are positive integers.
	fn page(&self) -> Option<Page>
	{
		let number = parse_positive(self.page_num.as_deref())?;
		let size = parse_positive(self.page_size.as_deref())?;

		Page::new(number, size)
	}
}

fn parse_positive(value: Option<&str>) -> Option<u64>
{
	value?.parse::<u64>().ok().filter(|&value| value > 0)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse
{
	list: Vec<Record>,

	#[serde(serialize_with = "minus_one_if_none")]
	page_num: Option<u64>,

	#[serde(serialize_with = "minus_one_if_none")]
	page_size: Option<u64>,

	total: u64,
}

fn minus_one_if_none<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match *value {
		Some(value) => serializer.serialize_u64(value),
		None => serializer.serialize_i64(-1),
	}
}

/// `GET /user/list?pageNum=&pageSize=`
#[instrument(skip(store))]
pub(crate) async fn list<S>(
	State(store): State<S>,
	query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> HandlerResult<ListResponse>
where
	S: RecordStore,
{
	let page = match query {
		Ok(Query(pairs)) => ListQuery::from_pairs(pairs).page(),
		Err(rejection) => {
			debug!(%rejection, "ignoring malformed query string");
			None
		},
	};

	let list = store.list(page).await?;
	let total = store.count().await?;

	if list.is_empty() {
		return Err(HandlerError::Rejected(NO_MATCHING_DATA));
	}

	Ok(Envelope::success("query succeeded", ListResponse {
		list,
		page_num: page.map(|page| page.number),
		page_size: page.map(|page| page.size),
		total,
	}))
}
