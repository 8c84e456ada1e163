pub mod request;
pub mod response;

pub use request::{RefreshTokenRequest, VerifyTokenRequest};
pub use response::VerifyTokenResponse;
