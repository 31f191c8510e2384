//! Plumbing shared by the owned-record endpoints.
//!
//! Each resource module owns its request bodies and envelopes; the calls into
//! the record ports and the removal envelope are identical across resources.

use actix_web::HttpResponse;
use pagination::PageQuery;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::records::{OwnedRecord, Record, RecordValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::RecordPorts;
use crate::inbound::http::validation::{
    map_record_validation_error, page_request, parse_record_id,
};

/// Body returned after a record is removed.
#[derive(Debug, Serialize, ToSchema)]
pub struct RemovedResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "activity removed")]
    pub message: String,
}

pub(crate) async fn list<R: OwnedRecord>(
    ports: &RecordPorts<R>,
    caller: &AuthenticatedUser,
    query: PageQuery,
) -> ApiResult<Vec<Record<R>>> {
    let page = page_request(query)?;
    ports.query.list(caller.user_id(), page).await
}

pub(crate) async fn create<R: OwnedRecord>(
    ports: &RecordPorts<R>,
    caller: &AuthenticatedUser,
    draft: Result<R::Draft, RecordValidationError>,
) -> ApiResult<Record<R>> {
    let draft = draft.map_err(map_record_validation_error)?;
    ports.command.create(caller.user_id(), draft).await
}

pub(crate) async fn update<R: OwnedRecord>(
    ports: &RecordPorts<R>,
    caller: &AuthenticatedUser,
    raw_id: &str,
    patch: Result<R::Patch, RecordValidationError>,
) -> ApiResult<Record<R>> {
    let id = parse_record_id(raw_id)?;
    let patch = patch.map_err(map_record_validation_error)?;
    ports.command.update(caller.user_id(), id, patch).await
}

pub(crate) async fn remove<R: OwnedRecord>(
    ports: &RecordPorts<R>,
    caller: &AuthenticatedUser,
    raw_id: &str,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(raw_id)?;
    ports.command.delete(caller.user_id(), id).await?;
    Ok(HttpResponse::Ok().json(RemovedResponse {
        success: true,
        message: format!("{} removed", R::KIND),
    }))
}
