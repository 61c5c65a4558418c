//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HMAC secret for signing and validating JWTs.
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_ttl: u64,
}
