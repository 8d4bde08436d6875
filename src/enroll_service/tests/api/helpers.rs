use std::time::Duration;

use enroll_adapters::{
    auth::{Argon2PasswordHasher, JwtSignerConfig, JwtTokenSigner},
    config::constants,
    email::PostmarkEmailClient,
    persistence::HashMapAccountStore,
};
use enroll_core::Email;
use enroll_service::AccountService;
use secrecy::Secret;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub email_server: MockServer,
    pub account_store: HashMapAccountStore,
}

impl TestApp {
    /// Spin up the service on an ephemeral port, backed by the in-memory
    /// store and a wiremock Postmark server.
    pub async fn spawn() -> Self {
        let email_server = MockServer::start().await;

        let sender = Email::try_from(Secret::from(
            constants::test::email_client::SENDER.to_string(),
        ))
        .unwrap();
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(
                constants::test::email_client::TIMEOUT_IN_MILLIS,
            ))
            .build()
            .unwrap();
        let email_client = PostmarkEmailClient::new(
            email_server.uri(),
            sender,
            Secret::from("postmark-auth-token".to_string()),
            http_client,
        );

        let account_store = HashMapAccountStore::new();
        let token_signer = JwtTokenSigner::new(JwtSignerConfig {
            jwt_secret: Secret::from(TEST_JWT_SECRET.to_string()),
            token_ttl_in_seconds: 600,
        });

        let service = AccountService::new(
            account_store.clone(),
            email_client,
            Argon2PasswordHasher::new(),
            token_signer,
        );

        let listener = tokio::net::TcpListener::bind(constants::test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            email_server,
            account_store,
        }
    }

    pub async fn post_account(
        &self,
        body: &serde_json::Value,
        correlation_id: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self
            .http_client
            .post(format!("{}/accounts", self.address))
            .json(body);
        if let Some(correlation_id) = correlation_id {
            request = request.header(constants::CORRELATION_ID_HEADER, correlation_id);
        }
        request.send().await.expect("Failed to execute request")
    }

    /// Mount the Postmark `/email` endpoint with the given status and an
    /// exact expectation on how often it may be hit.
    pub async fn mount_email_mock(&self, status: u16, expected_sends: u64) {
        Mock::given(method("POST"))
            .and(path("/email"))
            .respond_with(ResponseTemplate::new(status))
            .expect(expected_sends)
            .mount(&self.email_server)
            .await;
    }
}

pub fn sample_payload(email: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "password": "correct-horse-battery-staple",
        "name": "Test User",
        "age": 30,
        "city": "Oslo"
    })
}
