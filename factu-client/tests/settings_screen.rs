// factu-client/tests/settings_screen.rs
// Receipt configuration and POS feature screens against a mock backend

mod common;

use common::{RecordingNotifier, bearer, client};
use factu_client::{ClientConfig, FeaturesScreen, ReceiptConfigScreen, UploadFile};
use mockito::Matcher;
use serde_json::json;
use shared::models::{LogoKind, PosFeature};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

#[tokio::test]
async fn test_upload_logo_sets_absolute_url() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/config")
        .with_body(json!({"nombre_negocio": "Cafe Sol", "logo_impreso": ""}).to_string())
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/api/config/upload-logo")
        .match_query(Matcher::UrlEncoded("tipo".into(), "impreso".into()))
        .match_header("authorization", bearer().as_str())
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::Regex(r#"name="file"; filename="logo.png""#.into()))
        .with_body(json!({"url": "/uploads/logo_impreso.png"}).to_string())
        .create_async()
        .await;

    let notifier = RecordingNotifier::default();
    let config = ClientConfig::new(server.url());
    let mut screen = ReceiptConfigScreen::new(client(&server), &notifier);
    assert!(screen.load().await);

    let file = UploadFile::image("logo.png", PNG.to_vec());
    assert_eq!(file.mime, "image/png");
    assert!(screen.upload_logo(LogoKind::Printed, file, &config).await);

    upload.assert_async().await;
    assert_eq!(
        screen.config().printed_logo,
        format!("{}/uploads/logo_impreso.png", server.url())
    );
    assert!(screen.config().email_logo.is_empty());
    assert_eq!(notifier.successes(), vec!["Logo uploaded"]);
}

#[tokio::test]
async fn test_failed_upload_keeps_logo() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/config")
        .with_body(json!({"logo_email": "https://cdn.example.com/old.png"}).to_string())
        .create_async()
        .await;
    server
        .mock("POST", "/api/config/upload-logo")
        .match_query(Matcher::UrlEncoded("tipo".into(), "email".into()))
        .with_status(400)
        .with_body(json!({"detail": "Formato no permitido"}).to_string())
        .create_async()
        .await;

    let notifier = RecordingNotifier::default();
    let config = ClientConfig::new(server.url());
    let mut screen = ReceiptConfigScreen::new(client(&server), &notifier);
    screen.load().await;

    let file = UploadFile::image("logo.bmp", PNG.to_vec());
    assert!(!screen.upload_logo(LogoKind::Email, file, &config).await);
    assert_eq!(screen.config().email_logo, "https://cdn.example.com/old.png");
    assert_eq!(notifier.errors(), vec!["Formato no permitido"]);
}

#[tokio::test]
async fn test_refused_feature_toggle_keeps_flag() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/funciones")
        .with_body(json!({"tickets_abiertos": true, "tickets_abiertos_count": 2}).to_string())
        .create_async()
        .await;
    let save = server
        .mock("PUT", "/api/funciones")
        .expect(0)
        .create_async()
        .await;

    let notifier = RecordingNotifier::default();
    let mut screen = FeaturesScreen::new(client(&server), &notifier);
    assert!(screen.load().await);

    assert_eq!(screen.toggle(PosFeature::OpenTickets), None);
    assert!(screen.features().open_tickets);

    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("2 saved ticket(s)"));
    save.assert_async().await;
}

#[tokio::test]
async fn test_feature_toggle_is_saved() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/funciones")
        .with_body(json!({"tipo_pedido": false, "cierres_caja": true}).to_string())
        .create_async()
        .await;
    let save = server
        .mock("PUT", "/api/funciones")
        .match_body(Matcher::PartialJson(json!({"tipo_pedido": true, "cierres_caja": true})))
        .with_body("{}")
        .create_async()
        .await;

    let notifier = RecordingNotifier::default();
    let mut screen = FeaturesScreen::new(client(&server), &notifier);
    screen.load().await;

    assert_eq!(screen.toggle(PosFeature::OrderTypes), Some(true));
    assert!(screen.save().await);
    save.assert_async().await;
    assert_eq!(notifier.successes(), vec!["Configuration saved"]);
}

#[tokio::test]
async fn test_closed_settings_screens_send_nothing() {
    let mut server = mockito::Server::new_async().await;
    let untouched = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let upload = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let notifier = RecordingNotifier::default();
    let parent = tokio_util::sync::CancellationToken::new();
    let mut receipt = ReceiptConfigScreen::new(client(&server), &notifier).with_lifetime(&parent);
    let mut features = FeaturesScreen::new(client(&server), &notifier).with_lifetime(&parent);
    parent.cancel();

    assert!(receipt.is_closed());
    assert!(!receipt.load().await);
    let config = ClientConfig::new(server.url());
    let file = UploadFile::image("logo.png", PNG.to_vec());
    assert!(!receipt.upload_logo(LogoKind::Email, file, &config).await);
    assert!(receipt.config().email_logo.is_empty());

    assert!(features.is_closed());
    assert!(!features.load().await);
    assert!(!features.save().await);

    untouched.assert_async().await;
    upload.assert_async().await;
    assert!(notifier.errors().is_empty());
    assert!(notifier.successes().is_empty());
}
