//! Tests for the account handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::{
    MockBookingCommand, MockBookingQuery, MockLoginService, MockRegistrationService,
    MockRoomCommand, MockRoomQuery, MockUsersQuery,
};
use crate::domain::{Error, UserId, Username};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

fn ada(is_admin: bool) -> User {
    User::new(
        UserId::new(7),
        Username::new("ada").expect("valid username"),
        is_admin,
    )
}

#[derive(Default)]
struct AccountMocks {
    login: MockLoginService,
    registration: MockRegistrationService,
    users: MockUsersQuery,
}

fn state_with(mocks: AccountMocks) -> HttpState {
    HttpState::new(HttpStatePorts {
        login: Arc::new(mocks.login),
        registration: Arc::new(mocks.registration),
        users: Arc::new(mocks.users),
        rooms: Arc::new(MockRoomCommand::new()),
        rooms_query: Arc::new(MockRoomQuery::new()),
        bookings: Arc::new(MockBookingCommand::new()),
        bookings_query: Arc::new(MockBookingQuery::new()),
    })
}

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
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .service(register)
            .service(login)
            .service(logout)
            .service(current_user),
    )
}

fn credentials(username: &str, password: &str) -> CredentialsRequest {
    CredentialsRequest {
        username: username.into(),
        password: password.into(),
    }
}

#[actix_web::test]
async fn register_returns_created_user() {
    let mut mocks = AccountMocks::default();
    mocks
        .registration
        .expect_register()
        .withf(|registration| {
            registration.username().as_ref() == "ada" && registration.password() == "analytical"
        })
        .times(1)
        .return_once(|_| Ok(ada(false)));
    let app = actix_test::init_service(test_app(state_with(mocks))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(credentials("ada", "analytical"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("id").and_then(Value::as_i64), Some(7));
    assert_eq!(body.get("isAdmin").and_then(Value::as_bool), Some(false));
    assert!(body.get("passwordHash").is_none());
}

#[rstest]
#[case("ab", "pw", "username", "invalid_username")]
#[case("", "pw", "username", "empty_username")]
#[case("ada lovelace", "pw", "username", "invalid_username")]
#[case("ada", "", "password", "empty_password")]
#[actix_web::test]
async fn register_rejects_invalid_input(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(state_with(AccountMocks::default()))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(credentials(username, password))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    let details = body.get("details").expect("details");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
}

#[actix_web::test]
async fn register_surfaces_conflicts() {
    let mut mocks = AccountMocks::default();
    mocks
        .registration
        .expect_register()
        .return_once(|_| Err(Error::conflict("Username already taken")));
    let app = actix_test::init_service(test_app(state_with(mocks))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(credentials("ada", "analytical"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn login_sets_session_used_by_current_user() {
    let mut mocks = AccountMocks::default();
    mocks
        .login
        .expect_authenticate()
        .withf(|creds| creds.username() == "ada")
        .return_once(|_| Ok(ada(true)));
    mocks
        .users
        .expect_current_user()
        .withf(|id| *id == UserId::new(7))
        .return_once(|_| Ok(ada(true)));
    let app = actix_test::init_service(test_app(state_with(mocks))).await;

    let login_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(credentials("ada", "analytical"))
            .to_request(),
    )
    .await;
    assert_eq!(login_res.status(), StatusCode::OK);
    let cookie = session_cookie(&login_res);

    let me_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(me_res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(me_res).await;
    assert_eq!(body.get("username").and_then(Value::as_str), Some("ada"));
    assert_eq!(body.get("isAdmin").and_then(Value::as_bool), Some(true));
}

#[actix_web::test]
async fn login_rejects_wrong_credentials_with_unauthorised_status() {
    let mut mocks = AccountMocks::default();
    mocks
        .login
        .expect_authenticate()
        .return_once(|_| Err(Error::unauthorized("invalid credentials")));
    let app = actix_test::init_service(test_app(state_with(mocks))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(credentials("ada", "wrong"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("invalid credentials")
    );
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("unauthorized")
    );
}

#[rstest]
#[case("   ", "pw", "empty_username")]
#[case("ada", "", "empty_password")]
#[actix_web::test]
async fn login_rejects_blank_fields(
    #[case] username: &str,
    #[case] password: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(state_with(AccountMocks::default()))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(credentials(username, password))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some(code)
    );
}

#[actix_web::test]
async fn current_user_requires_session() {
    let app = actix_test::init_service(test_app(state_with(AccountMocks::default()))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_expires_the_session() {
    let mut mocks = AccountMocks::default();
    mocks
        .login
        .expect_authenticate()
        .return_once(|_| Ok(ada(false)));
    let app = actix_test::init_service(test_app(state_with(mocks))).await;

    let login_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(credentials("ada", "analytical"))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&login_res);

    let logout_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
    assert_eq!(session_cookie(&logout_res).value(), "");
}
