use serde_json::json;
use sha2::{Digest, Sha256};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginData, SessionMember};

/// SHA-256 hex digest of the password; the backend never sees plaintext.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

impl ApiClient {
    /// Log in and store the returned token on this client.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginData, ApiError> {
        let body = json!({
            "username": username,
            "password": hash_password(password),
        });
        let data: LoginData = self.post_json("/login", &body).await?.into_data()?;
        self.set_token(data.token.clone());
        log::info!("Logged in as {}", data.member.name);
        Ok(data)
    }

    /// Best-effort server-side logout; the local token is dropped regardless.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.post_json("/logout", &json!({})).await;
        self.clear_token();
        result?.into_ok()
    }

    pub async fn current_member(&self) -> Result<SessionMember, ApiError> {
        self.get("/current-member", &[]).await?.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_sha256_hex() {
        // echo -n "abc" | sha256sum
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash_password("father123").len(), 64);
        assert_ne!(hash_password("abc"), hash_password("abd"));
    }
}
