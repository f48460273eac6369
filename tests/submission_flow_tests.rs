//! End-to-end submit cycles against an in-process mock of the agency API.

mod harness;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use harness::{MockApi, Reply};
use serde_json::{json, Value};
use wcp_site::catalog::{
    contact, login, partnership, property_submission, register, FormKind,
};
use wcp_site::controller::{NETWORK_FAILURE_MESSAGE, UNAUTHORIZED_MESSAGE};
use wcp_site::{
    encode, Attachment, ClientConfig, Completion, Failure, FormController, FormError,
    LoginController, MemoryTokenStore, Outcome, Session, SubmissionClient, SubmissionStatus,
    SubmitResult,
};

fn fill_contact(form: &mut FormController) {
    form.set_field("fullName", "Jeanne Martin").unwrap();
    form.set_field("email", "jeanne@agence.fr").unwrap();
    form.set_field("phone", "06 00 00 00 00").unwrap();
    form.set_field("message", "I would like to sell my flat.").unwrap();
    form.set_field("privacyAccepted", true).unwrap();
}

fn fill_register(form: &mut FormController) {
    form.set_field("fullName", "Jeanne Martin").unwrap();
    form.set_field("email", "taken@agence.fr").unwrap();
    form.set_field("phone", "06 00 00 00 00").unwrap();
    form.set_field("password", "secret1").unwrap();
    form.set_field("confirmPassword", "secret1").unwrap();
    form.set_field("privacyAccepted", true).unwrap();
}

fn fill_property(form: &mut FormController) {
    form.set_field("propertyAddress", "Lot 12, Haie Vive, Cotonou").unwrap();
    form.set_field("propertyType", "villa").unwrap();
    form.set_field("area", "240").unwrap();
    form.set_field("estimatedPrice", "85000000").unwrap();
}

fn photos(count: usize) -> Vec<Attachment> {
    (0..count)
        .map(|i| Attachment::new(format!("photo-{i}.jpg"), "image/jpeg", vec![0xFF_u8, 0xD8, 0xFF]))
        .collect()
}

#[tokio::test]
async fn test_login_persists_token_and_calls_back() {
    let api = MockApi::start().await;
    api.reply(
        login::PATH,
        Reply::json(200, json!({"token": "abc", "user": {"id": 1, "fullName": "Jeanne"}})),
    );
    api.reply(contact::PATH, Reply::json(201, json!({"id": 9})));

    let store = Arc::new(MemoryTokenStore::default());
    let session = Session::new(store.clone());
    let seen = Arc::new(Mutex::new(Vec::<Value>::new()));
    let sink = Arc::clone(&seen);

    let mut controller = LoginController::new(api.client(session.clone()))
        .on_login_success(move |user| sink.lock().unwrap().push(user.clone()));
    controller.form_mut().set_field("email", "user@test.com").unwrap();
    controller.form_mut().set_field("password", "secret1").unwrap();

    let result = controller.submit().await;
    assert_matches!(result, SubmitResult::Completed(Completion::Succeeded(_)));
    assert_eq!(controller.form().status(), SubmissionStatus::Success);

    // request body carries exactly the credentials
    assert_eq!(
        api.last_request().json(),
        json!({"email": "user@test.com", "password": "secret1"})
    );

    // the token survives a reload and is read back by every later request
    assert_eq!(Session::new(store).token().as_deref(), Some("abc"));
    assert_eq!(*seen.lock().unwrap(), vec![json!({"id": 1, "fullName": "Jeanne"})]);

    let mut contact_form = FormController::new(contact::schema(), api.client(session));
    fill_contact(&mut contact_form);
    contact_form.submit().await;
    assert_eq!(
        api.last_request().header("authorization"),
        Some("Bearer abc")
    );
}

#[tokio::test]
async fn test_login_rejected_shows_invalid_credentials() {
    let api = MockApi::start().await;
    api.reply(login::PATH, Reply::json(401, json!({"error": "unauthorized"})));

    let session = Session::in_memory();
    let mut controller = LoginController::new(api.client(session.clone()));
    controller.form_mut().set_field("email", "user@test.com").unwrap();
    controller.form_mut().set_field("password", "wrong-password").unwrap();

    let result = controller.submit().await;
    assert_matches!(
        result,
        SubmitResult::Completed(Completion::Failed(Failure::Unauthorized { status: 401 }))
    );
    assert_eq!(
        controller.form().errors().general(),
        Some(login::INVALID_CREDENTIALS_MESSAGE)
    );
    assert_eq!(controller.form().values().text("password"), "wrong-password");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_register_conflict_marks_email_and_keeps_passwords() {
    let api = MockApi::start().await;
    api.reply(register::PATH, Reply::json(409, json!({"error": "email exists"})));

    let mut form = FormController::new(register::schema(), api.client(Session::in_memory()));
    fill_register(&mut form);

    let result = form.submit().await;
    assert_matches!(
        result,
        SubmitResult::Completed(Completion::Failed(Failure::Conflict { status: 409 }))
    );
    assert_eq!(form.status(), SubmissionStatus::Error);
    assert_eq!(form.errors().get("email"), Some(register::EMAIL_TAKEN_MESSAGE));
    assert_eq!(form.values().text("password"), "secret1");
    assert_eq!(form.values().text("confirmPassword"), "secret1");

    let sent = api.last_request().json();
    assert!(sent.get("confirmPassword").is_none());
    assert_eq!(sent["privacyAccepted"], json!(true));
}

#[tokio::test]
async fn test_property_submission_rejects_eleven_photos_without_calling() {
    let api = MockApi::start().await;
    let mut form = FormController::new(
        property_submission::schema(),
        api.client(Session::in_memory()),
    );
    fill_property(&mut form);

    let accepted = form.set_files("photos", photos(11)).unwrap();
    assert!(!accepted);
    assert!(form.values().files("photos").is_empty());
    assert!(form.errors().get("photos").unwrap().contains("10"));

    assert_eq!(form.submit().await, SubmitResult::Invalid);
    assert_eq!(api.hits(property_submission::PATH), 0);
}

#[tokio::test]
async fn test_photos_cannot_skip_the_limit_through_set_field() {
    let api = MockApi::start().await;
    let mut form = FormController::new(
        property_submission::schema(),
        api.client(Session::in_memory()),
    );
    fill_property(&mut form);

    assert_matches!(
        form.set_field("photos", photos(11)),
        Err(FormError::FilesNeedSelection(name)) if name == "photos"
    );
    assert!(form.values().files("photos").is_empty());
    assert!(form.begin_submit().is_none());
    assert_eq!(api.hits(property_submission::PATH), 0);
}

#[tokio::test]
async fn test_property_submission_sends_photos_with_bearer() {
    let api = MockApi::start().await;
    api.reply(property_submission::PATH, Reply::json(201, json!({"id": 42})));

    let session = Session::in_memory();
    session.acquire("partner-token").unwrap();
    let mut form = FormController::new(property_submission::schema(), api.client(session));
    fill_property(&mut form);
    assert!(form.set_files("photos", photos(10)).unwrap());

    let result = form.submit().await;
    assert_matches!(result, SubmitResult::Completed(Completion::Succeeded(_)));

    let request = api.last_request();
    assert_eq!(request.header("authorization"), Some("Bearer partner-token"));
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    let body = request.text();
    assert_eq!(body.matches("name=\"photos\"").count(), 10);
    assert!(body.contains("filename=\"photo-9.jpg\""));
    assert!(form.values().files("photos").is_empty());
}

#[tokio::test]
async fn test_property_submission_without_session_is_unauthorized() {
    let api = MockApi::start().await;
    api.reply(property_submission::PATH, Reply::json(401, json!({"error": "token required"})));

    let mut form = FormController::new(
        property_submission::schema(),
        api.client(Session::in_memory()),
    );
    fill_property(&mut form);
    form.set_files("photos", photos(1)).unwrap();

    form.submit().await;
    assert!(api.last_request().header("authorization").is_none());
    assert_eq!(form.errors().general(), Some(UNAUTHORIZED_MESSAGE));
    assert_eq!(form.values().files("photos").len(), 1);
}

#[tokio::test]
async fn test_second_submit_while_in_flight_sends_nothing() {
    let api = MockApi::start().await;
    api.reply(
        contact::PATH,
        Reply::json(201, json!({})).delayed(Duration::from_millis(200)),
    );

    let mut form = FormController::new(contact::schema(), api.client(Session::in_memory()));
    fill_contact(&mut form);

    let payload = form.begin_submit().expect("valid form");
    assert!(form.begin_submit().is_none());
    assert_eq!(form.submit().await, SubmitResult::InFlight);

    let outcome = form
        .client()
        .submit(&form.schema().endpoint, &payload)
        .await;
    assert_matches!(form.complete_submit(outcome), Completion::Succeeded(_));
    assert_eq!(api.hits(contact::PATH), 1);
}

#[tokio::test]
async fn test_contact_success_resets_every_field() {
    let api = MockApi::start().await;
    api.reply(contact::PATH, Reply::json(200, json!({"ok": true})));

    let mut form = FormController::new(contact::schema(), api.client(Session::in_memory()));
    fill_contact(&mut form);

    assert_matches!(
        form.submit().await,
        SubmitResult::Completed(Completion::Succeeded(_))
    );
    assert_eq!(form.status(), SubmissionStatus::Success);
    assert_eq!(form.values(), &contact::schema().defaults());
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn test_whitespace_only_required_text_never_reaches_the_network() {
    let api = MockApi::start().await;
    let mut form = FormController::new(contact::schema(), api.client(Session::in_memory()));
    fill_contact(&mut form);
    form.set_field("fullName", "   ").unwrap();

    assert_eq!(form.submit().await, SubmitResult::Invalid);
    assert_eq!(form.status(), SubmissionStatus::Idle);
    assert_eq!(form.errors().get("fullName"), Some("Full name is required."));
    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_shows_network_message() {
    let client = SubmissionClient::new(
        ClientConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(2)),
        Session::in_memory(),
    )
    .unwrap();
    let mut form = FormController::new(contact::schema(), client);
    fill_contact(&mut form);

    let result = form.submit().await;
    assert_matches!(
        result,
        SubmitResult::Completed(Completion::Failed(Failure::Network(_)))
    );
    assert_eq!(form.status(), SubmissionStatus::Error);
    assert_eq!(form.errors().general(), Some(NETWORK_FAILURE_MESSAGE));
    assert_eq!(form.values().text("fullName"), "Jeanne Martin");
}

#[tokio::test]
async fn test_unexpected_server_error_uses_form_failure_message() {
    let api = MockApi::start().await;
    api.reply(partnership::PATH, Reply::text(500, "Internal Server Error"));

    let mut form = FormController::new(partnership::schema(), api.client(Session::in_memory()));
    form.set_field("fullName", "Immo Conseil").unwrap();
    form.set_field("email", "contact@immo-conseil.fr").unwrap();
    form.set_field("phone", "06 00 00 00 00").unwrap();
    form.set_field("partnershipType", "referral-owner").unwrap();
    form.set_field("description", "Owner of a 200 m² villa in Calavi.").unwrap();

    form.submit().await;
    assert_eq!(
        form.errors().general(),
        Some(partnership::schema().failure_message)
    );
}

#[tokio::test]
async fn test_partnership_sends_repeated_document_parts() {
    let api = MockApi::start().await;
    api.reply(partnership::PATH, Reply::json(201, json!({"id": 3})));

    let mut form = FormController::new(partnership::schema(), api.client(Session::in_memory()));
    form.set_field("fullName", "Immo Conseil").unwrap();
    form.set_field("email", "contact@immo-conseil.fr").unwrap();
    form.set_field("phone", "06 00 00 00 00").unwrap();
    form.set_field("partnershipType", "referral-buyer").unwrap();
    form.set_field("description", "Client looking for a villa.").unwrap();
    form.set_files(
        "documents",
        vec![
            Attachment::new("plan.pdf", "application/pdf", b"%PDF-1.7".to_vec()),
            Attachment::new("facade.png", "image/png", vec![0x89_u8, b'P', b'N', b'G']),
        ],
    )
    .unwrap();

    assert_matches!(
        form.submit().await,
        SubmitResult::Completed(Completion::Succeeded(_))
    );

    let body = api.last_request().text();
    assert_eq!(body.matches("name=\"documents\"").count(), 2);
    assert!(body.contains("filename=\"plan.pdf\""));
    assert!(body.to_lowercase().contains("content-type: application/pdf"));
    assert!(body.contains("name=\"partnershipType\""));
}

#[tokio::test]
async fn test_every_catalog_form_posts_to_its_own_path() {
    let api = MockApi::start().await;
    for kind in FormKind::ALL {
        let form = FormController::new(kind.schema(), api.client(Session::in_memory()));
        let endpoint = form.schema().endpoint.clone();
        api.reply(endpoint.path, Reply::json(endpoint.success[0], json!({})));

        let payload = encode(form.schema(), form.values());
        let outcome = form.client().submit(&endpoint, &payload).await;
        assert_matches!(outcome, Outcome::Accepted(_), "{kind:?}");
        assert_eq!(api.hits(endpoint.path), 1, "{kind:?}");
    }
}
