//! Argon2 Password Hasher
//!
//! Argon2id (v0x13) + 随机盐，额外混入服务端密钥（pepper）。
//! 输出为 PHC 字符串，例如 `$argon2id$v=19$m=19456,t=2,p=1$...`

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::application::ports::{CredentialError, PasswordHasherPort};

/// Argon2 密码哈希适配器
pub struct Argon2PasswordHasher {
    secret: Vec<u8>,
}

impl Argon2PasswordHasher {
    pub fn new(secret: impl Into<String>) -> Result<Self, CredentialError> {
        let hasher = Self {
            secret: secret.into().into_bytes(),
        };
        // 提前校验密钥长度等参数
        hasher.argon2()?;
        Ok(hasher)
    }

    fn argon2(&self) -> Result<Argon2<'_>, CredentialError> {
        Argon2::new_with_secret(
            &self.secret,
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| CredentialError::Hashing(e.to_string()))
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, CredentialError> {
        let parsed =
            PasswordHash::new(password_hash).map_err(|e| CredentialError::Hashing(e.to_string()))?;

        match self.argon2()?.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CredentialError::Hashing(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2PasswordHasher::new("pepper").unwrap();
        let hash = hasher.hash("Paswd123").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hasher.verify("Paswd123", &hash).unwrap());
        assert!(!hasher.verify("paswd123", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let hasher = Argon2PasswordHasher::new("pepper").unwrap();
        let a = hasher.hash("Paswd123").unwrap();
        let b = hasher.hash("Paswd123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pepper_must_match() {
        let hash = Argon2PasswordHasher::new("pepper-one")
            .unwrap()
            .hash("Paswd123")
            .unwrap();
        let other = Argon2PasswordHasher::new("pepper-two").unwrap();
        assert!(!other.verify("Paswd123", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        let hasher = Argon2PasswordHasher::new("pepper").unwrap();
        assert!(matches!(
            hasher.verify("Paswd123", "not-a-phc-string"),
            Err(CredentialError::Hashing(_))
        ));
    }
}
