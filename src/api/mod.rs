pub mod health;
pub mod index;
pub mod metrics;
pub mod register;
pub mod swagger;

use actix_files::Files;
use actix_web::web;
use std::path::PathBuf;

/// Largest accepted `/register` body, in bytes.
pub const FORM_LIMIT: usize = 100 * 1024;

/// Locations of the index document and the static asset directory.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub index_file: PathBuf,
    pub static_dir: PathBuf,
}

/// Registers every route. The static file service is mounted at `/` and must
/// stay last, anything registered after it is unreachable.
pub fn configure(cfg: &mut web::ServiceConfig, assets: &AssetPaths) {
    cfg.app_data(web::Data::new(assets.clone()))
        .app_data(web::FormConfig::default().limit(FORM_LIMIT))
        .route("/", web::get().to(index::index))
        .route("/register", web::post().to(register::register))
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(Files::new("/", &assets.static_dir));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::database::{UnavailableStore, UserStore};
    use crate::services::registration_service::{MSG_CREATED, MSG_DUPLICATE, MSG_FAILED};
    use actix_web::{http::header, http::StatusCode, test, App};
    use std::path::Path;
    use std::sync::Arc;

    fn assets() -> AssetPaths {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        AssetPaths {
            index_file: root.join("views/index.html"),
            static_dir: root.join("public"),
        }
    }

    macro_rules! app_with {
        ($store:expr) => {{
            let store: Arc<dyn UserStore> = $store;
            test::init_service(
                App::new()
                    .app_data(web::Data::from(store))
                    .configure(|cfg| configure(cfg, &assets())),
            )
            .await
        }};
    }

    fn register_request(body: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/register")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(body.to_string())
    }

    #[actix_web::test]
    async fn test_index_is_served_for_any_request_variant() {
        let app = app_with!(Arc::new(MemoryStore::new()));

        for req in [
            test::TestRequest::get().uri("/"),
            test::TestRequest::get().uri("/?utm_source=mail&x=1"),
            test::TestRequest::get()
                .uri("/")
                .insert_header((header::ACCEPT, "application/json"))
                .insert_header((header::USER_AGENT, "curl/8.0")),
        ] {
            let res = test::call_service(&app, req.to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
            let body = test::read_body(res).await;
            let html = String::from_utf8_lossy(&body);
            assert!(html.contains("action=\"/register\""));
        }
    }

    #[actix_web::test]
    async fn test_static_assets_and_missing_files() {
        let app = app_with!(Arc::new(MemoryStore::new()));

        let res = test::call_service(&app, test::TestRequest::get().uri("/style.css").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let content_type = res.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/css"));

        let res = test::call_service(&app, test::TestRequest::get().uri("/missing.txt").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_register_then_duplicate() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with!(store.clone());

        let body = "name=Ana&email=a%40example.com&password=secret";

        let res = test::call_service(&app, register_request(body).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let content_type = res.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(test::read_body(res).await, MSG_CREATED.as_bytes());

        let res = test::call_service(&app, register_request(body).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, MSG_DUPLICATE.as_bytes());

        assert_eq!(store.count_by_email(Some("a@example.com")), 1);
    }

    #[actix_web::test]
    async fn test_register_without_password_is_stored() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with!(store.clone());

        let res = test::call_service(
            &app,
            register_request("name=Bo&email=bo%40example.com").to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, MSG_CREATED.as_bytes());

        let users = store.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.as_deref(), Some("bo@example.com"));
        assert_eq!(users[0].password, None);
    }

    #[actix_web::test]
    async fn test_long_field_below_limit_is_stored() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with!(store.clone());

        let name = "a".repeat(20_000);
        let body = format!("name={}&email=big%40example.com&password=pw", name);
        let res = test::call_service(&app, register_request(&body).to_request()).await;
        assert_eq!(test::read_body(res).await, MSG_CREATED.as_bytes());

        let users = store.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name.as_deref(), Some(name.as_str()));
        assert_eq!(users[0].email.as_deref(), Some("big@example.com"));
    }

    #[actix_web::test]
    async fn test_body_over_limit_is_rejected_without_insert() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with!(store.clone());

        let body = format!("name={}&email=huge%40example.com", "a".repeat(FORM_LIMIT + 1));
        let res = test::call_service(&app, register_request(&body).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, MSG_FAILED.as_bytes());
        assert!(store.users().is_empty());
    }

    #[actix_web::test]
    async fn test_malformed_form_is_rejected_without_insert() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with!(store.clone());

        // Campo repetido não desserializa
        let body = "email=a%40example.com&email=b%40example.com";
        let res = test::call_service(&app, register_request(body).to_request()).await;
        assert_eq!(test::read_body(res).await, MSG_FAILED.as_bytes());
        assert!(store.users().is_empty());
    }

    #[actix_web::test]
    async fn test_non_form_body_registers_empty_user() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with!(store.clone());

        let req = test::TestRequest::post()
            .uri("/register")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(r#"{"email":"json@example.com"}"#)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, MSG_CREATED.as_bytes());

        let users = store.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, None);
    }

    #[actix_web::test]
    async fn test_unreachable_database_returns_generic_error() {
        let app = app_with!(Arc::new(UnavailableStore::new("server selection timeout")));

        let res = test::call_service(
            &app,
            register_request("name=Cy&email=cy%40example.com&password=pw").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, MSG_FAILED.as_bytes());
    }

    #[actix_web::test]
    async fn test_health_reports_database_state() {
        let app = app_with!(Arc::new(MemoryStore::new()));
        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["database"], "up");
        assert_eq!(body["status"], "healthy");

        let app = app_with!(Arc::new(UnavailableStore::new("down")));
        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["database"], "down");
    }

    #[actix_web::test]
    async fn test_metrics_count_registrations() {
        let app = app_with!(Arc::new(MemoryStore::new()));
        let before = metrics::snapshot();

        test::call_service(
            &app,
            register_request("email=metrics%40example.com").to_request(),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("registrations_total{outcome=\"created\"}"));
        assert!(metrics::snapshot().registrations_created_total > before.registrations_created_total);
    }
}
