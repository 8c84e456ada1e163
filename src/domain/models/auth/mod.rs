pub mod authenticated_user;
pub mod credential;

pub use authenticated_user::AuthenticatedUser;
pub use credential::LoginCredential;
