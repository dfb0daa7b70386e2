//! JWT token service

use std::sync::LazyLock;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use moka::sync::Cache;

use crate::model::JwtPayload;

/// JWT Token cache to avoid repeated validation of the same token
static TOKEN_CACHE: LazyLock<Cache<String, JwtPayload>> = LazyLock::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(300))
        .build()
});

/// Decode and validate JWT token with caching
///
/// A cached entry is only served while its `exp` lies in the future.
pub fn decode_jwt_token_cached(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<JwtPayload> {
    if let Some(cached) = TOKEN_CACHE.get(token) {
        if cached.exp > chrono::Utc::now().timestamp() {
            return Ok(cached);
        }
        tracing::debug!(sub = %cached.sub, "Cached token expired");
        TOKEN_CACHE.invalidate(token);
    }

    let claims = decode_jwt_token(token, secret_key)?.claims;
    TOKEN_CACHE.insert(token.to_string(), claims.clone());

    Ok(claims)
}

/// Decode and validate JWT token without caching
pub fn decode_jwt_token(
    token: &str,
    secret_key: &str,
) -> jsonwebtoken::errors::Result<jsonwebtoken::TokenData<JwtPayload>> {
    let decoding_key = DecodingKey::from_base64_secret(secret_key)?;
    decode::<JwtPayload>(token, &decoding_key, &Validation::new(Algorithm::HS256))
}

/// Clear the entire token cache
pub fn clear_token_cache() {
    TOKEN_CACHE.invalidate_all();
}

/// Encode a JWT token valid for `expire_seconds`
pub fn encode_jwt_token(
    sub: &str,
    secret_key: &str,
    expire_seconds: i64,
    is_active: bool,
    is_superuser: bool,
) -> jsonwebtoken::errors::Result<String> {
    let exp = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::seconds(expire_seconds))
        .unwrap_or_else(chrono::Utc::now)
        .timestamp();

    let payload = JwtPayload {
        sub: sub.to_string(),
        exp,
        is_active,
        is_superuser,
    };

    let encoding_key = EncodingKey::from_base64_secret(secret_key)?;
    encode(&Header::new(Algorithm::HS256), &payload, &encoding_key)
}
