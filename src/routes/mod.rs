//! API 라우트 설정 모듈
//!
//! 엔드포인트들을 기능별로 그룹화하고 그룹마다 CORS 정책을 적용합니다.
//!
//! # Routes
//!
//! - `/health` - 헬스체크
//! - `/api/v1/auth/*` - 페이지용 인증 API (허용된 Origin만)
//! - `/api/send-welcome-email` - 공개 환영 메일 트리거 (모든 Origin 허용)
//! - `/api/hooks/*` - 인증 프로바이더 훅 (브라우저 호출 대상 아님)
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let cors = config.cors.clone();
//! App::new().configure(|cfg| configure_all_routes(cfg, &cors));
//! ```

use actix_cors::Cors;
use actix_web::http::{header, Method};
use actix_web::web;
use crate::config::CorsConfig;
use crate::handlers;

/// Preflight 요청 캐시 시간 (초)
const CORS_MAX_AGE: usize = 3600;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig, cors: &CorsConfig) {
    // Health check endpoint
    cfg.service(handlers::health::health_check);

    configure_auth_routes(cfg, cors);
    configure_email_routes(cfg);
    configure_hook_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig, cors: &CorsConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .wrap(restricted_cors(cors))
            // 이메일 인증
            .service(handlers::auth::sign_in)
            .service(handlers::auth::sign_up)
            .service(handlers::auth::sign_out)
            .service(handlers::auth::current_user)
            .service(handlers::auth::resend_welcome)
            // OAuth
            .service(handlers::auth::oauth_start)
            .service(handlers::auth::oauth_callback)
    );
}

fn configure_email_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/send-welcome-email")
            .wrap(permissive_cors())
            .route(web::post().to(handlers::email::send_welcome_email))
            .route(web::method(Method::OPTIONS).to(handlers::email::preflight))
            .default_service(web::to(handlers::email::method_not_allowed))
    );
}

fn configure_hook_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/hooks")
            .service(handlers::hooks::identity_created)
    );
}

fn restricted_cors(config: &CorsConfig) -> Cors {
    let cors = config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(CORS_MAX_AGE)
}

fn permissive_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["POST", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(CORS_MAX_AGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use crate::config::{AppConfig, EnvSource};
    use crate::core::container::AppContext;

    fn config() -> AppConfig {
        AppConfig::from_source(&EnvSource::from_pairs(&[
            ("AUTH_PROVIDER", "memory"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000"),
        ]))
        .unwrap()
    }

    macro_rules! app {
        () => {{
            let config = config();
            let cors = config.cors.clone();
            let ctx = web::Data::new(AppContext::build(config).unwrap());
            test::init_service(App::new().app_data(ctx).configure(|cfg| configure_all_routes(cfg, &cors))).await
        }};
    }

    #[actix_web::test]
    async fn test_auth_scope_rejects_unknown_origin() {
        let app = app!();

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/v1/auth/sign-in")
            .insert_header((header::ORIGIN, "https://evil.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[actix_web::test]
    async fn test_auth_scope_allows_configured_origin() {
        let app = app!();

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/v1/auth/sign-in")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }

    #[actix_web::test]
    async fn test_welcome_endpoint_allows_any_origin() {
        let app = app!();

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/send-welcome-email")
            .insert_header((header::ORIGIN, "https://anywhere.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    }

    #[actix_web::test]
    async fn test_health_route_is_mounted() {
        let app = app!();

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
