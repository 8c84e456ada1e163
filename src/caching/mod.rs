//! 캐시 계층 (Redis)

pub mod redis;

pub use self::redis::RedisClient;
