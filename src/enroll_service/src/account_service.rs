use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::post,
};
use enroll_adapters::{config::AllowedOrigins, http::routes::create_account};
use enroll_core::{AccountStore, EmailClient, PasswordHasher, TokenSigner};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Account creation service: the `/accounts` route wired to its
/// collaborators.
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Create a new AccountService from the four collaborators.
    ///
    /// # Note on Architecture
    /// Collaborators implement Clone (stores via internal Arc) so the
    /// handler can take them by value through Axum state.
    pub fn new<S, E, H, T>(
        account_store: S,
        email_client: E,
        password_hasher: H,
        token_signer: T,
    ) -> Self
    where
        S: AccountStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        T: TokenSigner + Clone + 'static,
    {
        let router = Router::new()
            .route("/accounts", post(create_account::<S, E, H, T>))
            .with_state((account_store, email_client, password_hasher, token_signer));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AccountService into a router that can be nested into a
    /// larger application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the account service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Account service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
