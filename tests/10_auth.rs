mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{request, send, test_app, MockGateway};
use nutrition_api::database::StoredFunction;
use nutrition_api::types::{CallerContext, Role};

#[tokio::test]
async fn register_passes_the_function_result_through_verbatim() {
    let reply = r#"{"success": true,  "data": {"id": 12, "username": "ann"}}"#;
    let gateway = MockGateway::replying(reply);
    let app = test_app(gateway.clone());

    let res = send(
        app,
        request(
            "POST",
            "/api/auth/register",
            &[],
            Some(r#"{"username":"ann","password":"pw"}"#),
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    // whitespace and key order survive untouched
    assert_eq!(res.body, reply);

    let call = gateway.only_call();
    assert_eq!(call.function, StoredFunction::UserRegister);
    assert_eq!(call.params, vec![json!("ann"), json!("pw")]);
}

#[tokio::test]
async fn register_ignores_identity_headers() {
    let gateway = MockGateway::new();
    let app = test_app(gateway.clone());

    send(
        app,
        request(
            "POST",
            "/api/auth/register",
            &[("x-user-id", "5"), ("x-user-role", "app_admin")],
            Some(r#"{"username":"ann","password":"pw"}"#),
        ),
    )
    .await;

    assert_eq!(gateway.only_call().context, CallerContext::anonymous());
}

#[tokio::test]
async fn login_runs_without_identity() {
    let gateway = MockGateway::replying(r#"{"success":true,"data":{"id":3,"username":"bob","role":"app_user"}}"#);
    let app = test_app(gateway.clone());

    let res = send(
        app,
        request(
            "POST",
            "/api/auth/login",
            &[("x-user-id", "3")],
            Some(r#"{"username":"bob","password":"secret"}"#),
        ),
    )
    .await;

    assert_eq!(res.json()["data"]["role"], "app_user");
    let call = gateway.only_call();
    assert_eq!(call.function, StoredFunction::UserLogin);
    assert_eq!(call.params, vec![json!("bob"), json!("secret")]);
    assert!(call.context.is_anonymous());
}

#[tokio::test]
async fn login_with_missing_password_binds_null() {
    let gateway = MockGateway::new();
    let app = test_app(gateway.clone());

    send(app, request("POST", "/api/auth/login", &[], Some(r#"{"username":"bob"}"#))).await;

    assert_eq!(gateway.only_call().params, vec![json!("bob"), json!(null)]);
}

#[tokio::test]
async fn logout_carries_the_caller() {
    let gateway = MockGateway::new();
    let app = test_app(gateway.clone());

    let res = send(
        app,
        request(
            "POST",
            "/api/auth/logout",
            &[("x-user-id", "9"), ("x-user-role", "app_user")],
            None,
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    let call = gateway.only_call();
    assert_eq!(call.function, StoredFunction::UserLogout);
    assert!(call.params.is_empty());
    assert_eq!(call.context.user_id.as_deref(), Some("9"));
    assert_eq!(call.context.role, Some(Role::User));
}

#[tokio::test]
async fn unrecognised_role_does_not_block_credentials() {
    let gateway = MockGateway::new();

    for path in ["/api/auth/register", "/api/auth/login"] {
        let res = send(
            test_app(gateway.clone()),
            request(
                "POST",
                path,
                &[("x-user-role", "superuser")],
                Some(r#"{"username":"ann","password":"pw"}"#),
            ),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK, "{}", path);
    }

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.context.is_anonymous()));
}

#[tokio::test]
async fn unrecognised_role_is_refused_on_logout() {
    let gateway = MockGateway::new();

    let res = send(
        test_app(gateway.clone()),
        request("POST", "/api/auth/logout", &[("x-user-role", "superuser")], None),
    )
    .await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(gateway.call_count(), 0);
}
