use actix_web::{error::UrlencodedError, web, HttpResponse};
use crate::{
    api::metrics,
    database::UserStore,
    models::RegisterForm,
    services::registration_service::{self, RegistrationOutcome},
};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Registration",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "One of: \"User registered successfully\", \"Email already exists\", \"Error occurred during registration\"", body = String, content_type = "text/plain")
    )
)]
pub async fn register(
    store: web::Data<dyn UserStore>,
    form: Result<web::Form<RegisterForm>, actix_web::Error>,
) -> HttpResponse {
    let form = match form {
        Ok(form) => form.into_inner(),
        // Content-Type diferente = formulário vazio (sem validação)
        Err(e) if matches!(e.as_error::<UrlencodedError>(), Some(UrlencodedError::ContentType)) => {
            RegisterForm::default()
        }
        // Corpo grande demais ou malformado
        Err(e) => {
            metrics::increment_registrations_failed();
            log::error!("❌ Could not read registration form: {}", e);
            return plain_text(registration_service::MSG_FAILED);
        }
    };
    let email = form.email.clone().unwrap_or_default();
    log::info!("📝 POST /register - email: {}", email);

    let outcome = registration_service::register(store.get_ref(), form).await;

    match &outcome {
        RegistrationOutcome::Created => {
            metrics::increment_registrations_created();
            log::info!("✅ User registered: {}", email);
        }
        RegistrationOutcome::Duplicate => {
            metrics::increment_registrations_duplicate();
            log::info!("↩️  Email already registered: {}", email);
        }
        RegistrationOutcome::InfrastructureError(e) => {
            metrics::increment_registrations_failed();
            log::error!("❌ Registration failed for {}: {}", email, e);
        }
    }

    plain_text(outcome.message())
}

fn plain_text(message: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(message)
}
