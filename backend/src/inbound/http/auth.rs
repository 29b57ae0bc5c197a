//! Resident account HTTP handlers.
//!
//! ```text
//! POST /api/auth/signup {"name":"Ada","email":"ada@example.org","password":"secret1"}
//! POST /api/auth/signin {"email":"ada@example.org","password":"secret1"}
//! ```
//!
//! No session or token is issued; clients keep the returned user id.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{SignInRequest, SignUpRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::UserResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/auth/signup`.
///
/// `roomNumber` also accepts `room_number`, `roomName` and `room_name`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBody {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.org")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "room_number", alias = "roomName", alias = "room_name")]
    #[schema(example = "101")]
    pub room_number: Option<String>,
    #[schema(example = "BlockA")]
    pub block: Option<String>,
}

impl From<SignUpBody> for SignUpRequest {
    fn from(body: SignUpBody) -> Self {
        Self {
            name: body.name.unwrap_or_default(),
            email: body.email.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
            phone: body.phone,
            room_number: body.room_number,
            block: body.block,
        }
    }
}

/// Request body for `POST /api/auth/signin`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignInBody {
    #[schema(example = "ada@example.org")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Response body for both account endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user: UserResponse,
}

/// Register a resident.
///
/// Naming a room (number and block) creates it when absent and makes the
/// new user a member in the same transaction as the insert.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpBody,
    responses(
        (status = 201, description = "User registered", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Transient failure; retry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUp"
)]
#[post("/auth/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .accounts
        .sign_up(SignUpRequest::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(AccountResponse {
        message: "User registered successfully".to_owned(),
        user: UserResponse::from(&user),
    }))
}

/// Verify a resident's credentials.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SignInBody,
    responses(
        (status = 200, description = "Credentials accepted", body = AccountResponse),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Transient failure; retry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn"
)]
#[post("/auth/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<SignInBody>,
) -> ApiResult<HttpResponse> {
    let SignInBody { email, password } = payload.into_inner();
    let user = state
        .accounts
        .sign_in(SignInRequest {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
        .await?;
    Ok(HttpResponse::Ok().json(AccountResponse {
        message: "Signed in successfully".to_owned(),
        user: UserResponse::from(&user),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::service_requests::{create_request, get_active_request};
    use crate::inbound::http::test_utils::memory_state;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api")
                .service(sign_up)
                .service(sign_in)
                .service(create_request)
                .service(get_active_request),
        )
    }

    fn post(uri: &str, body: Value) -> actix_test::TestRequest {
        actix_test::TestRequest::post().uri(uri).set_json(body)
    }

    fn ada() -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": " Ada@Example.org ",
            "password": "secret1",
            "phone": "0123",
            "room_name": "101",
            "block": "BlockA"
        })
    }

    #[actix_web::test]
    async fn sign_up_then_sign_in() {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let res = actix_test::call_service(&app, post("/api/auth/signup", ada()).to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(res).await;
        assert_eq!(created["message"], json!("User registered successfully"));
        assert_eq!(created["user"]["email"], json!("ada@example.org"));
        assert_eq!(created["user"]["roomNumber"], json!("101"));
        assert!(created["user"].get("password").is_none());

        let res = actix_test::call_service(
            &app,
            post(
                "/api/auth/signin",
                json!({"email": "ada@example.org", "password": "secret1"}),
            )
            .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let signed_in: Value = actix_test::read_body_json(res).await;
        assert_eq!(signed_in["user"]["id"], created["user"]["id"]);
    }

    #[rstest]
    #[case(json!({"email": "ada@example.org", "password": "wrong-one"}))]
    #[case(json!({"email": "grace@example.org", "password": "secret1"}))]
    #[case(json!({}))]
    #[actix_web::test]
    async fn bad_credentials_are_unauthorised(#[case] body: Value) {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let res = actix_test::call_service(&app, post("/api/auth/signup", ada()).to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = actix_test::call_service(&app, post("/api/auth/signin", body).to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let error: Value = actix_test::read_body_json(res).await;
        assert_eq!(error["message"], json!("invalid credentials"));
    }

    #[actix_web::test]
    async fn duplicate_email_conflicts() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let res = actix_test::call_service(&app, post("/api/auth/signup", ada()).to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = actix_test::call_service(&app, post("/api/auth/signup", ada()).to_request()).await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[case(json!({"name": " ", "email": "a@b.c", "password": "secret1"}))]
    #[case(json!({"name": "Ada", "email": "not-an-email", "password": "secret1"}))]
    #[case(json!({"name": "Ada", "email": "a@b.c", "password": "short"}))]
    #[case(json!({"name": "Ada", "email": "a@b.c", "password": "secret1", "roomNumber": "1"}))]
    #[actix_web::test]
    async fn invalid_sign_up_is_a_bad_request(#[case] body: Value) {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let res = actix_test::call_service(&app, post("/api/auth/signup", body).to_request()).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn registered_resident_is_shown_as_requester() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let res = actix_test::call_service(&app, post("/api/auth/signup", ada()).to_request()).await;
        let created: Value = actix_test::read_body_json(res).await;
        let user_id = created["user"]["id"].clone();

        // Room details come from the sign-up hint.
        let res = actix_test::call_service(
            &app,
            post("/api/requests", json!({"type": "cleaning", "userId": user_id})).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let found: Value = actix_test::read_body_json(
            actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri("/api/requests/active?roomNumber=101&block=BlockA")
                    .to_request(),
            )
            .await,
        )
        .await;
        assert_eq!(found["request"]["requester"]["id"], user_id);
        assert_eq!(found["request"]["requester"]["name"], json!("Ada Lovelace"));
    }
}
