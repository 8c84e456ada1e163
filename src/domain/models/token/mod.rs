pub mod claims;
pub mod pair;

pub use claims::{Claims, KeyRole};
pub use pair::TokenPair;
