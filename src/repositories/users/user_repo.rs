//! # 사용자 리포지토리 (MongoDB)
//!
//! `users` 컬렉션에 계정을 저장합니다. `_id` 는 UUID 문자열이며, 이메일과
//! 사용자명에는 sparse 유니크 인덱스가 걸려 있어 동시에 들어온 중복 가입도
//! 저장 단계에서 `StoreError::Conflict` 로 거부됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use super::IdentityStore;
use crate::core::errors::StoreError;
use crate::db::Database;
use crate::domain::entities::Identity;

const COLLECTION: &str = "users";
const EMAIL_INDEX: &str = "email_unique";
const USERNAME_INDEX: &str = "username_unique";
const DUPLICATE_KEY: i32 = 11000;

pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Identity> {
        self.db.get_database().collection::<Identity>(COLLECTION)
    }

    /// 이메일/사용자명 유니크 인덱스와 생성일 인덱스를 만듭니다.
    ///
    /// 이미 같은 정의의 인덱스가 있으면 아무 일도 하지 않습니다.
    pub async fn create_indexes(&self) -> Result<(), StoreError> {
        let unique = |name: &str| {
            IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name(name.to_string())
                .build()
        };

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique(EMAIL_INDEX))
                .build(),
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(unique(USERNAME_INDEX))
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
                .build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(store_error)?;

        log::info!("✅ users 컬렉션 인덱스 확인 완료");
        Ok(())
    }

    async fn find_one(&self, filter: mongodb::bson::Document) -> Result<Option<Identity>, StoreError> {
        self.collection().find_one(filter).await.map_err(store_error)
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        self.find_one(doc! { "username": username }).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        self.find_one(doc! { "email": email }).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError> {
        self.find_one(doc! { "_id": id }).await
    }

    async fn insert(&self, identity: &Identity) -> Result<String, StoreError> {
        self.collection()
            .insert_one(identity)
            .await
            .map_err(store_error)?;

        Ok(identity.id.clone())
    }
}

fn store_error(err: MongoError) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
        if write_error.code == DUPLICATE_KEY {
            return StoreError::Conflict(duplicate_field(&write_error.message).to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

/// E11000 메시지의 인덱스 이름으로 중복된 필드를 판별합니다.
fn duplicate_field(message: &str) -> &'static str {
    if message.contains(EMAIL_INDEX) {
        "email"
    } else if message.contains(USERNAME_INDEX) {
        "username"
    } else {
        "_id"
    }
}
