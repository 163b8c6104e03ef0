// factu-client/tests/api.rs
// Endpoint wrappers and error mapping

mod common;

use common::{bearer, client};
use factu_client::ClientError;
use factu_client::api::{
    AuthApi, AuthOutcome, PlansApi, RegistrationForm, ResourceApi, SubscriptionApi, SuperAdminApi,
};
use mockito::Matcher;
use serde_json::json;
use shared::models::{Limit, PlanResource, Tax};

#[tokio::test]
async fn test_plan_limit_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/impuestos")
        .with_status(403)
        .with_body(
            json!({"detail": {"code": "PLAN_LIMIT", "message": "Has alcanzado el límite de tu plan"}})
                .to_string(),
        )
        .create_async()
        .await;

    let http = client(&server);
    let err = ResourceApi::<Tax, _>::new(&http)
        .create(&Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::PlanLimit(ref msg) if msg.contains("límite")));
}

#[tokio::test]
async fn test_plain_forbidden_is_not_plan_limit() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/superadmin/dashboard")
        .with_status(403)
        .with_body(json!({"detail": "Acceso denegado"}).to_string())
        .create_async()
        .await;

    let http = client(&server);
    let err = SuperAdminApi::new(&http).dashboard().await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(ref msg) if msg == "Acceso denegado"));
}

#[tokio::test]
async fn test_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/mi-plan")
        .with_status(401)
        .create_async()
        .await;

    let http = client(&server);
    let err = PlansApi::new(&http).my_plan().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_catalog_is_public() {
    let mut server = mockito::Server::new_async().await;
    let catalog = server
        .mock("GET", "/api/planes")
        .match_header("authorization", Matcher::Missing)
        .with_body(
            json!([{
                "id": "basico", "nombre": "Básico", "precio": 9.99,
                "limite_facturas": 500, "limite_usuarios": 3, "limite_productos": -1,
                "limite_tpv": 2, "limite_clientes": -1
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let http = client(&server);
    let plans = PlansApi::new(&http).catalog().await.unwrap();
    catalog.assert_async().await;

    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].invoice_limit, Limit::Max(500));
    assert!(plans[0].product_limit.is_unlimited());
}

#[tokio::test]
async fn test_limit_check() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/verificar-limite/productos")
        .match_header("authorization", bearer().as_str())
        .with_body(
            json!({"puede_crear": false, "mensaje": "Límite alcanzado", "uso_actual": 50, "limite": 50})
                .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/verificar-limite/tpv")
        .with_status(500)
        .create_async()
        .await;

    let http = client(&server);
    let api = PlansApi::new(&http);

    let check = api.check_limit(PlanResource::Products).await;
    assert!(!check.can_create);
    assert_eq!(check.limit, Limit::Max(50));

    // a failing check does not block creation
    let check = api.check_limit(PlanResource::Terminals).await;
    assert!(check.can_create);
    assert!(check.unlimited);
}

#[tokio::test]
async fn test_payment_status_path_is_encoded() {
    let mut server = mockito::Server::new_async().await;
    let status = server
        .mock("GET", "/api/suscripcion/estado/cs%20test%2F1")
        .with_body(json!({"payment_status": "paid", "plan_id": "pro"}).to_string())
        .create_async()
        .await;

    let http = client(&server);
    let answer = SubscriptionApi::new(&http)
        .payment_status("cs test/1")
        .await
        .unwrap();
    status.assert_async().await;
    assert!(answer.is_paid());
}

#[tokio::test]
async fn test_checkout_and_cancel() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/suscripcion/crear")
        .match_body(Matcher::Json(
            json!({"plan_id": "pro", "origin_url": "https://app.example.com"}),
        ))
        .with_body(
            json!({"checkout_url": "https://pay.example.com/cs_1", "session_id": "cs_1"}).to_string(),
        )
        .create_async()
        .await;
    server
        .mock("POST", "/api/suscripcion/cancelar")
        .match_body(Matcher::Json(json!({"cancel_at_period_end": true})))
        .with_body(json!({"message": "Suscripción cancelada"}).to_string())
        .create_async()
        .await;

    let http = client(&server);
    let api = SubscriptionApi::new(&http);

    let checkout = api
        .create_checkout("pro", "https://app.example.com")
        .await
        .unwrap();
    assert_eq!(checkout.session_id.as_deref(), Some("cs_1"));

    let ack = api.cancel().await.unwrap();
    assert_eq!(ack.message, "Suscripción cancelada");
}

#[tokio::test]
async fn test_google_exchange_outcomes() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/google")
        .match_body(Matcher::Json(json!({"code": "new"})))
        .with_body(
            json!({"needs_registration": true, "email": "ana@example.com", "nombre": "Ana"}).to_string(),
        )
        .create_async()
        .await;
    server
        .mock("POST", "/api/auth/google")
        .match_body(Matcher::Json(json!({"code": "known"})))
        .with_body(
            json!({"access_token": "jwt", "user": {"id": "u1", "nombre": "Luis"}}).to_string(),
        )
        .create_async()
        .await;

    let http = client(&server);
    let api = AuthApi::new(&http);

    match api.exchange_code("new").await.unwrap() {
        AuthOutcome::NeedsRegistration(pending) => assert_eq!(pending.email, "ana@example.com"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    match api.exchange_code("known").await.unwrap() {
        AuthOutcome::LoggedIn(login) => assert_eq!(login.user.name, "Luis"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_registration_is_not_sent() {
    let mut server = mockito::Server::new_async().await;
    let register = server
        .mock("POST", "/api/auth/google")
        .expect(0)
        .create_async()
        .await;

    let http = client(&server);
    let form = RegistrationForm {
        code: "new".into(),
        store_name: "Mi Tienda".into(),
        password: "abc".into(),
        confirm_password: "abc".into(),
    };
    let err = AuthApi::new(&http).register(&form).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    register.assert_async().await;
}
