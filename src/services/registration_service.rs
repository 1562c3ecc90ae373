use crate::database::UserStore;
use crate::models::{RegisterForm, User};
use crate::utils::AppError;

pub const MSG_CREATED: &str = "User registered successfully";
pub const MSG_DUPLICATE: &str = "Email already exists";
pub const MSG_FAILED: &str = "Error occurred during registration";

#[derive(Debug, PartialEq)]
pub enum RegistrationOutcome {
    Created,
    Duplicate,
    InfrastructureError(AppError),
}

impl RegistrationOutcome {
    /// Plain-text message shown to the client.
    pub fn message(&self) -> &'static str {
        match self {
            RegistrationOutcome::Created => MSG_CREATED,
            RegistrationOutcome::Duplicate => MSG_DUPLICATE,
            RegistrationOutcome::InfrastructureError(_) => MSG_FAILED,
        }
    }
}

/// Looks the email up and inserts the user when it's free.
///
/// The lookup and the insert are two round trips; a concurrent request can
/// slip in between. The store's unique index catches that case and it is
/// reported as `Duplicate` like the pre-check.
pub async fn register(store: &dyn UserStore, form: RegisterForm) -> RegistrationOutcome {
    match try_register(store, form).await {
        Ok(outcome) => outcome,
        Err(AppError::DuplicateEmail) => RegistrationOutcome::Duplicate,
        Err(e) => RegistrationOutcome::InfrastructureError(e),
    }
}

async fn try_register(
    store: &dyn UserStore,
    form: RegisterForm,
) -> Result<RegistrationOutcome, AppError> {
    if store.find_by_email(form.email.as_deref()).await?.is_some() {
        return Ok(RegistrationOutcome::Duplicate);
    }

    let new_user = User::from(form);
    store.insert(&new_user).await?;

    Ok(RegistrationOutcome::Created)
}
