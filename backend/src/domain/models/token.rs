use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Session lifetime, 24 hours in milliseconds
pub const TOKEN_LIFETIME_MS: i64 = 24 * 60 * 60 * 1000;

/// Body of the session token: base64 of `{"userId":1,"exp":<epoch millis>}`.
///
/// This is an encoding, not a signature. Anyone can mint one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenPayload {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub exp: i64,
}

impl TokenPayload {
    pub fn issue(user_id: u64, now_millis: i64) -> Self {
        Self {
            user_id,
            exp: now_millis + TOKEN_LIFETIME_MS,
        }
    }

    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Decode a token, `None` for anything that is not base64 JSON of the right shape
    pub fn decode(token: &str) -> Option<Self> {
        let bytes = STANDARD.decode(token.trim()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.exp <= now_millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_browser_format() {
        let token = TokenPayload { user_id: 1, exp: 1000 }.encode().unwrap();
        let decoded = String::from_utf8(STANDARD.decode(&token).unwrap()).unwrap();
        assert_eq!(decoded, r#"{"userId":1,"exp":1000}"#);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(TokenPayload::decode("not base64!").is_none());
        assert!(TokenPayload::decode(&STANDARD.encode("[1,2,3]")).is_none());
    }

    #[test]
    fn test_expiry() {
        let payload = TokenPayload::issue(7, 0);
        assert_eq!(payload.exp, TOKEN_LIFETIME_MS);
        assert!(!payload.is_expired(TOKEN_LIFETIME_MS - 1));
        assert!(payload.is_expired(TOKEN_LIFETIME_MS));
    }
}
