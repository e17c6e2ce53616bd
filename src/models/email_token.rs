use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Hint carried by an emailed action link. Optional: a token without a
/// hint lets the mentor pick the action on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenAction {
    Approve,
    Reject,
}

/// Single-use capability letting a mentor act on a request from an
/// emailed link without being logged in (stored in `email_tokens`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Unguessable random identifier (uuid v4) — the capability itself
    pub token_id: String,

    /// MentorRequest this token acts on (ObjectId hex)
    pub request_id: String,
    pub mentor_email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TokenAction>,

    pub used: bool,

    /// Unix timestamps; expires_at = created_at + 7 days
    pub created_at: i64,
    pub expires_at: i64,
}

/// 7-day TTL on emailed action links
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 3600;

impl EmailToken {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at < now
    }
}

/// Typed outcome of token verification. Internal carries a driver or
/// database failure — the token's own state is unknown, not absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    NotFound,
    Expired,
    AlreadyUsed,
    Internal(String),
}

impl TokenError {
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::NotFound => "not_found",
            TokenError::Expired => "expired",
            TokenError::AlreadyUsed => "already_used",
            TokenError::Internal(_) => "internal",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TokenError::NotFound => "Token not found",
            TokenError::Expired => "Token has expired",
            TokenError::AlreadyUsed => "Token has already been used",
            TokenError::Internal(_) => "Token lookup failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_token(now: i64) -> EmailToken {
        EmailToken {
            id: None,
            token_id: "t-1".to_string(),
            request_id: "r-1".to_string(),
            mentor_email: "mentor@example.com".to_string(),
            action: Some(TokenAction::Approve),
            used: false,
            created_at: now,
            expires_at: now + TOKEN_TTL_SECS,
        }
    }

    #[test]
    fn test_fresh_token_not_expired() {
        let now = 1_700_000_000;
        let token = sample_token(now);
        assert!(!token.is_expired_at(now));
        assert!(!token.is_expired_at(now + TOKEN_TTL_SECS - 1));
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let now = 1_700_000_000;
        let token = sample_token(now);
        assert!(token.is_expired_at(now + TOKEN_TTL_SECS + 1));
    }

    #[test]
    fn test_action_wire_format() {
        assert_eq!(
            serde_json::to_string(&TokenAction::Approve).unwrap(),
            "\"approve\""
        );
        let parsed: TokenAction = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(parsed, TokenAction::Reject);
    }
}
