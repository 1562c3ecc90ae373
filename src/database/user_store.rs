use crate::models::User;
use crate::utils::AppError;
use async_trait::async_trait;

pub const USERS_COLLECTION: &str = "users";

/// Persistence seam for user documents.
///
/// Injected into the HTTP layer as `web::Data<dyn UserStore>`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact match on `email`. `None` matches documents without an email.
    async fn find_by_email(&self, email: Option<&str>) -> Result<Option<User>, AppError>;

    /// Insert a new document. A uniqueness violation on `email` must be
    /// reported as [`AppError::DuplicateEmail`].
    async fn insert(&self, user: &User) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

/// Stand-in used when no client could be built from the configured URI.
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn error(&self) -> AppError {
        AppError::ConnectionUnavailable(self.reason.clone())
    }
}

#[async_trait]
impl UserStore for UnavailableStore {
    async fn find_by_email(&self, _email: Option<&str>) -> Result<Option<User>, AppError> {
        Err(self.error())
    }

    async fn insert(&self, _user: &User) -> Result<(), AppError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(self.error())
    }
}
