use std::{sync::Arc, time::Duration};

use claim::assert_ok_eq;
use fake::{faker::internet::en::SafeEmail, Fake};
use serde_json::json;
use sofly_waitlist::{
    configuration::Environment,
    domain::FormStatus,
    forms::{FormError, WaitlistForm},
    notifications::{NotificationKind, Notifications},
    waitlist_client::WaitlistClient,
};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{spawn_app, spawn_app_without_backend};

#[tokio::test]
async fn submitting_sends_exactly_the_email_typed() {
    let app = spawn_app().await;
    let notifications = Notifications::new();
    let email: String = SafeEmail().fake();

    Mock::given(path("/api/waitlist"))
        .and(method("POST"))
        .and(body_json(json!({ "email": email })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    let form = app.waitlist_form(&notifications);
    form.set_email(email.clone());

    assert_ok_eq!(form.submit().await, FormStatus::Success);
}

#[tokio::test]
async fn success_clears_the_email_and_shows_the_server_message() {
    let app = spawn_app().await;
    let notifications = Notifications::new();
    Mock::given(path("/api/waitlist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    let form = app.waitlist_form(&notifications);
    form.set_email("jane@sofly.app");
    form.submit().await.unwrap();

    assert_eq!(form.status(), FormStatus::Success);
    assert_eq!(form.email(), "");
    let all = notifications.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].kind, NotificationKind::Success);
    assert_eq!(all[0].title, "You're on the list!");
    assert_eq!(all[0].description, "ok");
}

#[tokio::test]
async fn success_without_a_message_uses_the_default() {
    let app = spawn_app().await;
    let notifications = Notifications::new();
    Mock::given(path("/api/waitlist"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .mount(&app.backend_server)
        .await;

    let form = app.waitlist_form(&notifications);
    form.set_email("jane@sofly.app");
    form.submit().await.unwrap();

    assert_eq!(notifications.latest().unwrap().description, "We'll notify you when we launch.");
}

#[tokio::test]
async fn a_rejection_shows_the_backend_detail() {
    let app = spawn_app().await;
    let notifications = Notifications::new();
    Mock::given(path("/api/waitlist"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "already registered" })))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    let form = app.waitlist_form(&notifications);
    form.set_email("jane@sofly.app");

    assert_ok_eq!(form.submit().await, FormStatus::Error);
    assert_eq!(form.email(), "jane@sofly.app");
    let notification = notifications.latest().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.title, "Failed to join waitlist");
    assert_eq!(notification.description, "already registered");
}

#[tokio::test]
async fn a_rejection_without_a_reason_uses_the_generic_message() {
    let app = spawn_app().await;
    let notifications = Notifications::new();
    Mock::given(path("/api/waitlist"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&app.backend_server)
        .await;

    let form = app.waitlist_form(&notifications);
    form.set_email("jane@sofly.app");
    form.submit().await.unwrap();

    assert_eq!(
        notifications.latest().unwrap().description,
        "Something went wrong. Please try again."
    );
}

#[tokio::test]
async fn an_html_reply_is_an_invalid_response_not_a_crash() {
    let app = spawn_app().await;
    for status in [200, 500] {
        let notifications = Notifications::new();
        let _guard = Mock::given(path("/api/waitlist"))
            .respond_with(ResponseTemplate::new(status).set_body_raw("<h1>Bad Gateway</h1>", "text/html"))
            .mount_as_scoped(&app.backend_server)
            .await;

        let form = app.waitlist_form(&notifications);
        form.set_email("jane@sofly.app");

        assert_ok_eq!(form.submit().await, FormStatus::Error);
        assert_eq!(notifications.latest().unwrap().title, "Invalid server response");
    }
}

#[tokio::test]
async fn an_unreachable_backend_is_a_connection_error() {
    let notifications = Notifications::new();
    let form = WaitlistForm::new(
        WaitlistClient::new("http://sofly.invalid".into()),
        notifications.clone(),
    );
    form.set_email("jane@sofly.app");

    assert_ok_eq!(form.submit().await, FormStatus::Error);
    let notification = notifications.latest().unwrap();
    assert_eq!(notification.title, "Connection error");
    assert_eq!(
        notification.description,
        "Unable to connect to the server. Please try again later."
    );
}

#[tokio::test]
async fn a_second_submit_while_loading_sends_nothing() {
    let app = spawn_app().await;
    let notifications = Notifications::new();
    Mock::given(path("/api/waitlist"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "ok" }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&app.backend_server)
        .await;

    let form = Arc::new(app.waitlist_form(&notifications));
    form.set_email("jane@sofly.app");

    let first = tokio::spawn({
        let form = Arc::clone(&form);
        async move { form.submit().await }
    });
    while form.status() != FormStatus::Loading {
        tokio::task::yield_now().await;
    }

    assert!(!form.is_submit_enabled());
    assert_eq!(form.submit().await, Err(FormError::AlreadySubmitting));
    // The input is disabled while loading.
    form.set_email("someone.else@sofly.app");
    assert_eq!(form.email(), "jane@sofly.app");

    assert_ok_eq!(first.await.unwrap(), FormStatus::Success);
    assert_eq!(form.email(), "");
    assert_eq!(notifications.all().len(), 1);
}

#[tokio::test]
async fn a_cancelled_submit_leaves_the_form_usable() {
    let app = spawn_app().await;
    let notifications = Notifications::new();
    Mock::given(path("/api/waitlist"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "ok" }))
                .set_delay(Duration::from_millis(500)),
        )
        // The cancelled request may or may not have reached the backend.
        .expect(1..=2)
        .mount(&app.backend_server)
        .await;

    let form = app.waitlist_form(&notifications);
    form.set_email("jane@sofly.app");

    let cancelled = tokio::time::timeout(Duration::from_millis(100), form.submit()).await;

    assert!(cancelled.is_err());
    assert_eq!(form.status(), FormStatus::Idle);
    assert!(form.is_submit_enabled());
    let toast = notifications.latest().unwrap();
    assert_eq!(toast.kind, NotificationKind::Error);
    assert_eq!(toast.title, "Failed to join waitlist");

    form.set_email("jane@sofly.io");
    assert_ok_eq!(form.submit().await, FormStatus::Success);
    assert_eq!(notifications.latest().unwrap().kind, NotificationKind::Success);
}

#[tokio::test]
async fn the_legacy_proxy_path_reports_backend_failures() {
    let app = spawn_app_without_backend(Environment::Production).await;
    let notifications = Notifications::new();

    let form = app.proxied_waitlist_form(&notifications);
    form.set_email("jane@sofly.app");

    assert_ok_eq!(form.submit().await, FormStatus::Error);
    assert_eq!(
        notifications.latest().unwrap().description,
        "Failed to connect to backend API"
    );
}

#[tokio::test]
async fn the_legacy_proxy_path_relays_success() {
    let app = spawn_app().await;
    let notifications = Notifications::new();
    Mock::given(path("/api/waitlist"))
        .and(body_json(json!({ "email": "jane@sofly.app" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "You're on the list! We'll notify you when we launch."
        })))
        .expect(1)
        .mount(&app.backend_server)
        .await;

    let form = app.proxied_waitlist_form(&notifications);
    form.set_email("jane@sofly.app");

    assert_ok_eq!(form.submit().await, FormStatus::Success);
    assert_eq!(
        notifications.latest().unwrap().description,
        "You're on the list! We'll notify you when we launch."
    );
}
