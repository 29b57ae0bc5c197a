//! Service request HTTP handlers.
//!
//! ```text
//! POST /api/requests {"type":"cleaning","roomNumber":"101","block":"BlockA"}
//! GET /api/requests/active?roomNumber=101&block=BlockA&type=cleaning
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::ports::{CreateServiceRequest, FindActiveRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{ActiveRequestResponse, ServiceRequestResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_room_id, parse_optional_room_id_text, parse_optional_user_id,
    require_text,
};

const TYPE: FieldName = FieldName::new("type");
const USER_ID: FieldName = FieldName::new("userId");
const ROOM_ID: FieldName = FieldName::new("roomId");

/// Request body for `POST /api/requests`.
///
/// snake_case spellings are accepted for older clients.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequestBody {
    /// `cleaning` or `maintenance`, case-insensitive.
    #[serde(rename = "type")]
    #[schema(example = "cleaning")]
    pub request_type: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,
    #[serde(alias = "room_id")]
    pub room_id: Option<i64>,
    #[serde(alias = "room_number")]
    #[schema(example = "101")]
    pub room_number: Option<String>,
    #[schema(example = "BlockA")]
    pub block: Option<String>,
}

impl TryFrom<CreateServiceRequestBody> for CreateServiceRequest {
    type Error = Error;

    fn try_from(body: CreateServiceRequestBody) -> Result<Self, Self::Error> {
        Ok(Self {
            request_type: require_text(body.request_type, TYPE)?,
            description: body.description,
            user_id: parse_optional_user_id(body.user_id, USER_ID)?,
            room_id: parse_optional_room_id(body.room_id, ROOM_ID)?,
            room_number: body.room_number,
            block: body.block,
        })
    }
}

/// Response body for a created request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedServiceRequest {
    #[schema(example = "Service request created")]
    pub message: String,
    pub request: ServiceRequestResponse,
}

/// Query string for `GET /api/requests/active`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ActiveRequestParams {
    /// Positive integer; blank counts as absent.
    #[serde(alias = "room_id")]
    #[param(value_type = Option<i64>)]
    pub room_id: Option<String>,
    #[serde(alias = "room_number")]
    pub room_number: Option<String>,
    pub block: Option<String>,
    /// Defaults to `cleaning`.
    #[serde(rename = "type")]
    pub request_type: Option<String>,
}

/// Response body for the active request lookup; `request` is null when the
/// room or its active request does not exist.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActiveRequestEnvelope {
    pub request: Option<ActiveRequestResponse>,
}

/// Raise a service request against a room.
///
/// The room is created on first reference by location. A known `userId`
/// becomes a member of the room in the same transaction.
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateServiceRequestBody,
    responses(
        (status = 201, description = "Request created", body = CreatedServiceRequest),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Room or user not found", body = ErrorSchema),
        (status = 409, description = "An active request of this type exists", body = ErrorSchema),
        (status = 503, description = "Transient failure; retry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "createServiceRequest"
)]
#[post("/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    payload: web::Json<CreateServiceRequestBody>,
) -> ApiResult<HttpResponse> {
    let command = CreateServiceRequest::try_from(payload.into_inner())?;
    let request = state.service_requests.create_request(command).await?;
    Ok(HttpResponse::Created().json(CreatedServiceRequest {
        message: "Service request created".to_owned(),
        request: ServiceRequestResponse::from(&request),
    }))
}

/// Fetch the active request of one type for a room.
#[utoipa::path(
    get,
    path = "/api/requests/active",
    params(ActiveRequestParams),
    responses(
        (status = 200, description = "Active request, or null", body = ActiveRequestEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Transient failure; retry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "getActiveRequest"
)]
#[get("/requests/active")]
pub async fn get_active_request(
    state: web::Data<HttpState>,
    query: web::Query<ActiveRequestParams>,
) -> ApiResult<web::Json<ActiveRequestEnvelope>> {
    let params = query.into_inner();
    let lookup = FindActiveRequest {
        room_id: parse_optional_room_id_text(params.room_id, ROOM_ID)?,
        room_number: params.room_number,
        block: params.block,
        request_type: params.request_type,
    };
    let active = state.active_requests.find_active(lookup).await?;
    Ok(web::Json(ActiveRequestEnvelope {
        request: active.as_ref().map(ActiveRequestResponse::from),
    }))
}

#[cfg(test)]
#[path = "service_requests_tests.rs"]
mod tests;
