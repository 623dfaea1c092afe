use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_requests_per_min: u32,
}

impl Config {
    /// Every setting has a default suited to the local demo deployment, so
    /// the server runs without any environment at all.
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "certreq-dev-secret".to_string()),
            token_ttl: env::var("TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .unwrap(),
            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_requests_per_min: env::var("RATE_REQUESTS_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap(),
        }
    }
}
