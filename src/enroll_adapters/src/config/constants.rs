/// Header carrying the caller-supplied correlation identifier. The value is
/// only checked for presence; it is never stored.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "ENROLL_POSTGRES__URL";
    pub const JWT_SECRET_ENV_VAR: &str = "ENROLL_AUTH__JWT_SECRET";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "ENROLL_EMAIL_CLIENT__AUTH_TOKEN";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "ENROLL_APP__ALLOWED_ORIGINS";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "accounts@enroll.io";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT_IN_MILLIS: u64 = 200;
    }
}
