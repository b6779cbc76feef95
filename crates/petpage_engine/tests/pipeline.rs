use std::sync::Once;

use chrono::{DateTime, Local, TimeZone};
use petpage_engine::{
    run, AuthError, Config, Credentials, EmailClient, FetchError, ObjectStorePublisher,
    PetfinderTokenAcquirer, PipelineError, ReqwestListingFetcher,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pipeline_logging::initialize_for_tests);
}

fn test_config(endpoint: &str) -> Config {
    Config {
        storage_bucket: "pets-bucket".to_string(),
        credentials: Credentials {
            client_id: "id-123".to_string(),
            client_secret: "secret-456".to_string(),
            organization_id: "ca3085".to_string(),
        },
        default_image_url: "https://sanctuary.example/placeholder.jpg".to_string(),
        adoption_form_url: "https://sanctuary.example/adopt?animal_name=".to_string(),
        recipient_email: "operator@sanctuary.example".to_string(),
        sender_email: "alerts@sanctuary.example".to_string(),
        api_base: endpoint.to_string(),
        storage_endpoint: endpoint.to_string(),
        email_endpoint: endpoint.to_string(),
        email_api_token: "token-abc".to_string(),
    }
}

fn run_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 8, 7, 6, 30, 0).unwrap()
}

struct Components {
    tokens: PetfinderTokenAcquirer,
    listings: ReqwestListingFetcher,
    publisher: ObjectStorePublisher,
    notifier: EmailClient,
}

fn components(config: &Config) -> Components {
    let http = reqwest::Client::new();
    Components {
        tokens: PetfinderTokenAcquirer::new(http.clone(), config.api_base.clone()),
        listings: ReqwestListingFetcher::new(http.clone(), config.api_base.clone()),
        publisher: ObjectStorePublisher::new(
            http.clone(),
            config.storage_endpoint.clone(),
            config.storage_bucket.clone(),
        ),
        notifier: EmailClient::new(
            http,
            config.email_endpoint.clone(),
            config.email_api_token.clone(),
            config.sender_email.clone(),
            config.recipient_email.clone(),
        ),
    }
}

async fn mount_token_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 3600,
            "access_token": "tok-789"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_run_publishes_page_and_sends_no_email() {
    init_logging();
    let server = MockServer::start().await;
    mount_token_success(&server).await;
    Mock::given(method("GET"))
        .and(path("/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "animals": [
                {
                    "name": "Biscuit",
                    "primary_photo_cropped": {"small": "https://cdn.example/biscuit-small.jpg"}
                },
                {"name": "Shadow"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/pets-bucket/animals.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let c = components(&config);
    let report = run(
        &config,
        run_time(),
        &c.tokens,
        &c.listings,
        &c.publisher,
        &c.notifier,
    )
    .await
    .expect("run");

    assert_eq!(report.animal_count, 2);
    assert_eq!(report.object_key, "animals.html");

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.url.path().ends_with("/animals.html"))
        .expect("publish request");
    let page = String::from_utf8(put.body.clone()).unwrap();
    assert_eq!(page.matches("Apply to Adopt").count(), 2);
    assert!(page.contains(r#"<img src="https://cdn.example/biscuit-small.jpg""#));
    // The sentinel is emitted literally, not replaced by the placeholder.
    assert!(page.contains(r#"<img src="Photo not available""#));
    assert!(!page.contains("placeholder.jpg"));
    assert!(
        page.find("biscuit-small.jpg").unwrap() < page.find("Photo not available").unwrap(),
        "blocks must keep listing order"
    );

    assert!(
        !requests.iter().any(|r| r.url.path().ends_with("/email")),
        "a completed run sends no notification"
    );
}

#[tokio::test]
async fn empty_listing_publishes_header_only_page() {
    let server = MockServer::start().await;
    mount_token_success(&server).await;
    Mock::given(method("GET"))
        .and(path("/animals"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"animals": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/pets-bucket/animals.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let c = components(&config);
    let report = run(
        &config,
        run_time(),
        &c.tokens,
        &c.listings,
        &c.publisher,
        &c.notifier,
    )
    .await
    .expect("run");
    assert_eq!(report.animal_count, 0);

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.url.path().ends_with("/animals.html"))
        .expect("publish request");
    let page = String::from_utf8(put.body.clone()).unwrap();
    assert!(page.contains("Updated on "));
    assert_eq!(page.matches("Apply to Adopt").count(), 0);
}

#[tokio::test]
async fn auth_rejection_notifies_and_never_publishes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let c = components(&config);
    let err = run(
        &config,
        run_time(),
        &c.tokens,
        &c.listings,
        &c.publisher,
        &c.notifier,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Auth(AuthError::Status(401))
    ));

    let requests = server.received_requests().await.unwrap();
    let email = requests
        .iter()
        .find(|r| r.url.path().ends_with("/email"))
        .expect("notification request");
    let sent: serde_json::Value = serde_json::from_slice(&email.body).unwrap();
    assert!(sent["Subject"].as_str().unwrap().contains("401"));
    assert!(sent["TextBody"]
        .as_str()
        .unwrap()
        .contains("Failed to obtain access token. Status code: 401"));

    assert!(
        !requests.iter().any(|r| r.url.path().ends_with("/animals.html")),
        "publisher must never be invoked after an auth failure"
    );
}

#[tokio::test]
async fn fetch_rejection_notifies_with_status_and_raw_body() {
    let server = MockServer::start().await;
    mount_token_success(&server).await;
    Mock::given(method("GET"))
        .and(path("/animals"))
        .respond_with(ResponseTemplate::new(500).set_body_string("org not found"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let c = components(&config);
    let err = run(
        &config,
        run_time(),
        &c.tokens,
        &c.listings,
        &c.publisher,
        &c.notifier,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Fetch(FetchError::Status { status: 500, .. })
    ));

    let requests = server.received_requests().await.unwrap();
    let email = requests
        .iter()
        .find(|r| r.url.path().ends_with("/email"))
        .expect("notification request");
    let sent: serde_json::Value = serde_json::from_slice(&email.body).unwrap();
    let text_body = sent["TextBody"].as_str().unwrap();
    assert!(text_body.contains("500"));
    assert!(text_body.contains("org not found"));

    assert!(!requests.iter().any(|r| r.url.path().ends_with("/animals.html")));
}

#[tokio::test]
async fn malformed_listing_payload_fails_without_notification() {
    let server = MockServer::start().await;
    mount_token_success(&server).await;
    Mock::given(method("GET"))
        .and(path("/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let c = components(&config);
    let err = run(
        &config,
        run_time(),
        &c.tokens,
        &c.listings,
        &c.publisher,
        &c.notifier,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PipelineError::Extract(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(!requests.iter().any(|r| r.url.path().ends_with("/email")));
    assert!(!requests.iter().any(|r| r.url.path().ends_with("/animals.html")));
}

#[tokio::test]
async fn publish_failure_propagates_without_notification() {
    let server = MockServer::start().await;
    mount_token_success(&server).await;
    Mock::given(method("GET"))
        .and(path("/animals"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"animals": []})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/pets-bucket/animals.html"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let c = components(&config);
    let err = run(
        &config,
        run_time(),
        &c.tokens,
        &c.listings,
        &c.publisher,
        &c.notifier,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, PipelineError::Publish(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(!requests.iter().any(|r| r.url.path().ends_with("/email")));
}

#[tokio::test]
async fn failed_notification_surfaces_the_notify_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let c = components(&config);
    let err = run(
        &config,
        run_time(),
        &c.tokens,
        &c.listings,
        &c.publisher,
        &c.notifier,
    )
    .await
    .unwrap_err();
    // The notify failure masks the auth failure; the run exits unrecovered.
    assert!(matches!(err, PipelineError::Notify(_)));
}
