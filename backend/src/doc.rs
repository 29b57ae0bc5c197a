//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request/response DTOs and the domain error wrappers
//! ([`ErrorSchema`], [`ErrorCodeSchema`]).
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::auth::{AccountResponse, SignInBody, SignUpBody};
use crate::inbound::http::dto::{
    ActiveRequestResponse, RoomResponse, ServiceRequestResponse, UserResponse,
};
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::service_requests::{
    ActiveRequestEnvelope, CreateServiceRequestBody, CreatedServiceRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Facilities backend API",
        description = "Residents raise cleaning and maintenance requests against rooms."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::service_requests::create_request,
        crate::inbound::http::service_requests::get_active_request,
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateServiceRequestBody,
        CreatedServiceRequest,
        ActiveRequestEnvelope,
        ActiveRequestResponse,
        ServiceRequestResponse,
        RoomResponse,
        UserResponse,
        SignUpBody,
        SignInBody,
        AccountResponse,
        HealthStatus,
    )),
    tags(
        (name = "requests", description = "Cleaning and maintenance requests"),
        (name = "auth", description = "Resident sign-up and sign-in"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
