//! Token issuance and request authorization

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{Claims, TokenService};
pub use middleware::{extract_token, read_gate, write_gate, TokenSource};
pub use models::{AuthRequest, Role, TokenResponse};
