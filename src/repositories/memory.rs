//! 메모리 기반 저장소 구현
//!
//! 외부 MongoDB/Redis 없이 서비스 계층과 HTTP 계층을 테스트하기 위한 구현입니다.
//! 레지스트리는 TTL 을 흉내 내며, 쓰기 실패와 쓰기 지연을 주입할 수 있습니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::core::errors::{RegistryError, StoreError};
use crate::domain::entities::Identity;
use crate::repositories::tokens::RefreshTokenRegistry;
use crate::repositories::users::IdentityStore;

#[derive(Default)]
pub struct InMemoryIdentityStore {
    identities: RwLock<HashMap<String, Identity>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let map = identities
            .into_iter()
            .map(|identity| (identity.id.clone(), identity))
            .collect();
        Self {
            identities: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Identity>> {
        self.identities.read().unwrap_or_else(|e| e.into_inner())
    }

    fn find(&self, predicate: impl Fn(&Identity) -> bool) -> Option<Identity> {
        self.read().values().find(|identity| predicate(identity)).cloned()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.find(|identity| identity.username.as_deref() == Some(username)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.find(|identity| identity.email.as_deref() == Some(email)))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.read().get(id).cloned())
    }

    async fn insert(&self, identity: &Identity) -> Result<String, StoreError> {
        let mut identities = self.identities.write().unwrap_or_else(|e| e.into_inner());

        for existing in identities.values() {
            if identity.username.is_some() && existing.username == identity.username {
                return Err(StoreError::Conflict("username".to_string()));
            }
            if identity.email.is_some() && existing.email == identity.email {
                return Err(StoreError::Conflict("email".to_string()));
            }
        }
        if identities.contains_key(&identity.id) {
            return Err(StoreError::Conflict("_id".to_string()));
        }

        identities.insert(identity.id.clone(), identity.clone());
        Ok(identity.id.clone())
    }
}

#[derive(Default)]
pub struct InMemoryTokenRegistry {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    fail_writes: AtomicBool,
    write_delay: Mutex<Option<Duration>>,
}

impl InMemoryTokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이후의 `set_with_ttl` 호출을 실패시킵니다.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 이후의 `set_with_ttl` 호출을 지정 시간만큼 지연시킵니다.
    pub fn delay_writes(&self, delay: Option<Duration>) {
        *self.write_delay.lock().unwrap_or_else(|e| e.into_inner()) = delay;
    }

    /// 만료되지 않은 항목 수
    pub fn live_entries(&self) -> usize {
        let now = Instant::now();
        self.entries().values().filter(|(_, expires)| *expires > now).count()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, (String, Instant)>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RefreshTokenRegistry for InMemoryTokenRegistry {
    async fn exists(&self, token: &str) -> Result<bool, RegistryError> {
        let now = Instant::now();
        let mut entries = self.entries();
        match entries.get(token) {
            Some((_, expires)) if *expires > now => Ok(true),
            Some(_) => {
                entries.remove(token);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn set_with_ttl(&self, token: &str, value: &str, ttl: Duration) -> Result<(), RegistryError> {
        let delay = *self.write_delay.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RegistryError("write rejected".to_string()));
        }

        let expires = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| RegistryError(format!("ttl out of range: {:?}", ttl)))?;

        self.entries()
            .insert(token.to_string(), (value.to_string(), expires));
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<bool, RegistryError> {
        let now = Instant::now();
        Ok(self
            .entries()
            .remove(token)
            .is_some_and(|(_, expires)| expires > now))
    }
}
