//! JWT Token Service
//!
//! HS256 签名的 Bearer Token，`sub` 为账号 ID

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{CredentialError, IssuedToken, TokenClaims, TokenServicePort};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// JWT Token 服务
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl JwtTokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    fn issue_at(
        &self,
        account_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, CredentialError> {
        let expires_at = i64::try_from(self.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                CredentialError::Issue(format!("token ttl out of range: {}s", self.ttl_secs))
            })?;

        let claims = Claims {
            sub: account_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Issue(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_secs,
        })
    }
}

impl TokenServicePort for JwtTokenService {
    fn issue(&self, account_id: i64, username: &str) -> Result<IssuedToken, CredentialError> {
        self.issue_at(account_id, username, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, CredentialError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => CredentialError::Expired,
                _ => CredentialError::InvalidToken(e.to_string()),
            }
        })?;

        let claims = data.claims;
        let account_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| CredentialError::InvalidToken(format!("bad subject: {}", claims.sub)))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| CredentialError::InvalidToken("bad expiry".to_string()))?;

        Ok(TokenClaims {
            account_id,
            username: claims.username,
            expires_at,
        })
    }
}
