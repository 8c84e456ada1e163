pub mod login_request;
pub mod register_request;

pub use login_request::LoginRequest;
pub use register_request::RegisterRequest;
