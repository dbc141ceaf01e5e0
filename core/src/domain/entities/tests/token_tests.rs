//! Unit tests for token claims

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, LegacyUserClaim, TOKEN_EXPIRY_DAYS};
use crate::errors::TokenError;

#[test]
fn test_new_claims_carry_flat_id() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let claims = Claims::new(user_id, now, now + Duration::days(TOKEN_EXPIRY_DAYS));

    assert_eq!(claims.id.as_deref(), Some(user_id.to_string().as_str()));
    assert!(claims.user.is_none());
    assert_eq!(claims.exp - claims.iat, TOKEN_EXPIRY_DAYS * 24 * 60 * 60);
    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[test]
fn test_legacy_nested_user_claim() {
    let user_id = Uuid::new_v4();
    let claims: Claims = serde_json::from_value(serde_json::json!({
        "user": { "id": user_id.to_string() },
        "iat": 1_700_000_000,
        "exp": 1_900_000_000
    }))
    .unwrap();

    assert_eq!(
        claims.user,
        Some(LegacyUserClaim {
            id: user_id.to_string()
        })
    );
    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[test]
fn test_flat_claim_wins_over_nested() {
    let flat = Uuid::new_v4();
    let nested = Uuid::new_v4();
    let claims = Claims {
        id: Some(flat.to_string()),
        user: Some(LegacyUserClaim {
            id: nested.to_string(),
        }),
        iat: 0,
        exp: 0,
    };

    assert_eq!(claims.user_id().unwrap(), flat);
}

#[test]
fn test_missing_subject() {
    let claims = Claims {
        id: None,
        user: None,
        iat: 0,
        exp: 0,
    };

    assert_eq!(
        claims.user_id().unwrap_err(),
        TokenError::MissingClaim {
            claim: "id".to_string()
        }
    );
}

#[test]
fn test_non_uuid_subject_is_invalid() {
    let claims = Claims {
        id: Some("64b7f0c2e4b0a1a2b3c4d5e6".to_string()),
        user: None,
        iat: 0,
        exp: 0,
    };

    assert_eq!(claims.user_id().unwrap_err(), TokenError::InvalidTokenFormat);
}

#[test]
fn test_serialized_payload_shape() {
    let claims = Claims::new(Uuid::new_v4(), Utc::now(), Utc::now() + Duration::days(1));
    let value = serde_json::to_value(&claims).unwrap();

    assert!(value.get("id").is_some());
    assert!(value.get("user").is_none());
    assert!(value.get("iat").is_some());
    assert!(value.get("exp").is_some());
}
