use enroll_adapters::{
    auth::{Argon2PasswordHasher, JwtSignerConfig, JwtTokenSigner},
    config::Settings,
    email::PostmarkEmailClient,
    persistence::PostgresAccountStore,
};
use enroll_core::Email;
use enroll_service::{AccountService, configure_postgresql, init_tracing};
use reqwest::Client as HttpClient;
use secrecy::Secret;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    dotenvy::dotenv().ok();
    let settings = Settings::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql(&settings).await;
    let account_store = PostgresAccountStore::new(pg_pool);

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;
    let sender = Email::try_from(Secret::from(settings.email_client.sender.clone()))?;
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        sender,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let password_hasher = Argon2PasswordHasher::new();
    let token_signer = JwtTokenSigner::new(JwtSignerConfig {
        jwt_secret: settings.auth.jwt_secret.clone(),
        token_ttl_in_seconds: settings.auth.token_ttl_in_seconds,
    });

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;

    AccountService::new(account_store, email_client, password_hasher, token_signer)
        .run_standalone(listener, settings.app.allowed_origins.clone())
        .await?;

    Ok(())
}
