pub mod identity;

pub use identity::{Identity, NewIdentity, DEFAULT_ROLE};
