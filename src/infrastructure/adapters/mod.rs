//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

mod argon2_hasher;
mod jwt_tokens;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_tokens::JwtTokenService;
