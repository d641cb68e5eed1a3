//! Authentication: argon2 password hashing, HS256 bearer tokens, and the
//! middleware that turns a token into a request-scoped [`AuthContext`].

pub mod middleware;
pub mod models;
pub mod service;

pub use models::{AuthContext, JwtClaims};
pub use service::{authenticate, register_user};
