//! Tests for the account handlers.

use super::*;
use crate::domain::Error;
use crate::inbound::http::test_utils::{
    MockPorts, alice, location, notice_of, response_cookie, test_session_middleware,
};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::rstest;

async fn call(
    state: &web::Data<HttpState>,
    req: test::TestRequest,
) -> actix_web::dev::ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .wrap(test_session_middleware())
            .service(signup_form)
            .service(signup)
            .service(signin_form)
            .service(signin)
            .service(logout),
    )
    .await;
    test::call_service(&app, req.to_request()).await
}

fn form(path: &str, username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(path)
        .set_form([("username", username), ("password", password)])
}

#[rstest]
#[case("", "pw1")]
#[case("   ", "pw1")]
#[case("alice", "")]
#[actix_web::test]
async fn signup_with_blank_fields_reprompts(#[case] username: &str, #[case] password: &str) {
    let mut ports = MockPorts::default();
    ports.registration.expect_register().never();
    let state = ports.into_state();

    let res = call(&state, form("/signup", username, password)).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/signup"));
    assert_eq!(
        notice_of(&state, &res),
        Some(Notice::error(MISSING_CREDENTIALS))
    );
}

#[actix_web::test]
async fn signup_with_missing_fields_reaches_validation() {
    let mut ports = MockPorts::default();
    ports.registration.expect_register().never();
    let state = ports.into_state();

    let req = test::TestRequest::post()
        .uri("/signup")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("username=alice");
    let res = call(&state, req).await;

    assert_eq!(location(&res), Some("/signup"));
    assert_eq!(
        notice_of(&state, &res),
        Some(Notice::error(MISSING_CREDENTIALS))
    );
}

#[actix_web::test]
async fn signup_success_sends_visitor_to_signin() {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .withf(|creds| creds.username() == "alice" && creds.password() == "pw1")
        .times(1)
        .returning(|_| Ok(alice()));
    let state = ports.into_state();

    let res = call(&state, form("/signup", " alice ", "pw1")).await;

    assert_eq!(location(&res), Some(SIGNIN_PATH));
    assert_eq!(notice_of(&state, &res), Some(Notice::success(ACCOUNT_CREATED)));
}

#[rstest]
#[case(Error::conflict("username already exists"), USERNAME_TAKEN)]
#[case(Error::internal("insert failed"), UNEXPECTED)]
#[case(Error::service_unavailable("pool exhausted"), UNEXPECTED)]
#[actix_web::test]
async fn signup_failures_return_to_the_form(#[case] failure: Error, #[case] expected: &str) {
    let mut ports = MockPorts::default();
    ports
        .registration
        .expect_register()
        .times(1)
        .returning(move |_| Err(failure.clone()));
    let state = ports.into_state();

    let res = call(&state, form("/signup", "alice", "pw2")).await;

    assert_eq!(location(&res), Some("/signup"));
    assert_eq!(notice_of(&state, &res), Some(Notice::error(expected)));
}

#[actix_web::test]
async fn signin_success_binds_session_and_goes_to_feed() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .times(1)
        .returning(|_| Ok(alice()));
    let state = ports.into_state();

    let res = call(&state, form("/signin", "alice", "pw1")).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/"));
    assert!(response_cookie(&res, "session").is_some());
    assert_eq!(notice_of(&state, &res), None);
}

#[actix_web::test]
async fn signin_failure_is_generic() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .times(1)
        .returning(|_| Err(Error::unauthorized("invalid credentials")));
    let state = ports.into_state();

    let res = call(&state, form("/signin", "alice", "wrong")).await;

    assert_eq!(location(&res), Some(SIGNIN_PATH));
    assert_eq!(
        notice_of(&state, &res),
        Some(Notice::error(INVALID_CREDENTIALS))
    );
    assert!(response_cookie(&res, "session").is_none());
}

#[actix_web::test]
async fn signin_infrastructure_failure_is_reported_generically() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .returning(|_| Err(Error::service_unavailable("database down")));
    let state = ports.into_state();

    let res = call(&state, form("/signin", "alice", "pw1")).await;

    assert_eq!(location(&res), Some(SIGNIN_PATH));
    assert_eq!(notice_of(&state, &res), Some(Notice::error(UNEXPECTED)));
}

#[actix_web::test]
async fn forms_render_as_html() {
    let state = MockPorts::default().into_state();
    for path in ["/signup", "/signin"] {
        let res = call(&state, test::TestRequest::get().uri(path)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = String::from_utf8(body.to_vec()).expect("utf-8 body");
        assert!(html.contains(&format!(r#"action="{path}""#)));
    }
}

#[actix_web::test]
async fn logout_redirects_to_feed() {
    let state = MockPorts::default().into_state();

    let res = call(&state, test::TestRequest::get().uri("/logout")).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/"));
    assert_eq!(notice_of(&state, &res), Some(Notice::success(SIGNED_OUT)));
}
