pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod trace;

pub use auth::{AuthContext, JwtAuth};
pub use cors::create_cors;
pub use rate_limit::{client_ip, RateLimiter};
pub use trace::RequestTrace;
