use async_trait::async_trait;
use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Credential check for the admin area. The shipped implementation
/// compares against the configured password; a real identity provider
/// can be substituted behind this seam.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, password: &str) -> Result<bool, anyhow::Error>;
}

pub struct StaticCredentialVerifier {
    password: String,
}

impl StaticCredentialVerifier {
    pub fn new(password: String) -> Self {
        Self { password }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, password: &str) -> Result<bool, anyhow::Error> {
        Ok(constant_time_eq(password.as_bytes(), self.password.as_bytes()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/admin/login", post(login))
}

/// POST /v1/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let ok = state.verifier.verify(&req.password).await?;
    if !ok {
        tracing::warn!("admin login rejected");
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let exp = (Utc::now().timestamp() as usize) + state.auth.expiration as usize;
    let claims = AdminClaims {
        sub: "admin".to_string(),
        role: "ADMIN".to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(json!({
        "token": token,
        "expiresIn": state.auth.expiration,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_verifier_accepts_only_the_configured_password() {
        let verifier = StaticCredentialVerifier::new("s3cret".to_string());
        assert!(verifier.verify("s3cret").await.unwrap());
        assert!(!verifier.verify("s3cre").await.unwrap());
        assert!(!verifier.verify("s3cret ").await.unwrap());
        assert!(!verifier.verify("").await.unwrap());
    }
}
