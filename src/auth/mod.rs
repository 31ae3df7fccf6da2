//! Authentication: token service, password policy, and the bearer gate.

mod claims;
mod error;
mod middleware;
pub mod password;
mod token;

pub use claims::{Claims, TokenKind};
pub use error::AuthError;
pub use middleware::{AuthPrincipal, auth_middleware, bearer_token};
pub use token::{
    ADMIN_SESSION_TTL, DRIVER_SESSION_TTL, OTP_TTL, RESET_TOKEN_TTL, TokenService, generate_secret,
};
