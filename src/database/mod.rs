pub mod user_store;
#[cfg(test)]
pub mod memory;

pub use user_store::*;

use crate::models::User;
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteError, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

const DEFAULT_DATABASE: &str = "nodejs-mongo-app";
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
    indexes: IndexSetup,
}

/// Gate that lets index creation run once per process, whatever its result.
#[derive(Clone, Default)]
struct IndexSetup(Arc<OnceCell<()>>);

impl IndexSetup {
    async fn run_once<F, Fut>(&self, create: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        self.0
            .get_or_init(|| async move {
                if let Err(e) = create().await {
                    log::warn!("⚠️  Unique email index unavailable, relying on lookup only: {}", e);
                }
            })
            .await;
    }
}

impl MongoDB {
    /// Builds the pooled client. No round trip happens here: the driver
    /// connects lazily, so an unreachable server only shows up on first use.
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let db_name = database_name(&client_options);
        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        log::info!("📊 Using database: {}", db_name);

        Ok(Self { db, indexes: IndexSetup::default() })
    }

    /// Requests the unique index on `users.email`.
    ///
    /// Fails when existing documents already violate it; callers log and carry on
    /// with the lookup-before-insert check alone.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS_COLLECTION);

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        users.create_index(email_index).await?;
        log::info!("   ✅ Index ready: users(email) unique");

        Ok(())
    }

    /// Creates the indexes after the first successful round trip. The server
    /// may still be starting when the process boots, so this can't be done
    /// only at startup.
    async fn after_round_trip(&self) {
        self.indexes.run_once(|| self.ensure_indexes()).await;
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_by_email(&self, email: Option<&str>) -> Result<Option<User>, AppError> {
        let users = self.collection::<User>(USERS_COLLECTION);
        // A missing email queries `email: null`, which only matches documents
        // without an email. Dropping the key instead would match any user.
        let found = users.find_one(doc! { "email": email }).await?;
        self.after_round_trip().await;
        Ok(found)
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        let users = self.collection::<User>(USERS_COLLECTION);
        match users.insert_one(user).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(AppError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        self.after_round_trip().await;
        Ok(())
    }
}

fn database_name(options: &ClientOptions) -> String {
    options
        .default_database
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError {
            code: DUPLICATE_KEY_CODE,
            ..
        }))
    )
}
