//! 헬스체크 핸들러

use actix_web::{get, web, HttpResponse};
use serde_json::json;
use crate::core::container::AppContext;

/// 서비스 상태와 선택된 프로바이더를 보고합니다.
///
/// # Endpoint
/// `GET /health`
#[get("/health")]
pub async fn health_check(ctx: web::Data<AppContext>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "auth_provider": ctx.auth.backend_kind().as_str(),
        "email_provider": ctx.notifier.provider_name().unwrap_or("not configured"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use crate::config::{AppConfig, EnvSource};

    #[actix_web::test]
    async fn test_health_reports_providers() {
        let config = AppConfig::from_source(&EnvSource::from_pairs(&[("AUTH_PROVIDER", "memory")])).unwrap();
        let ctx = web::Data::new(AppContext::build(config).unwrap());
        let app = test::init_service(App::new().app_data(ctx).service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["auth_provider"], "memory");
        assert_eq!(body["email_provider"], "not configured");
        assert!(body["timestamp"].is_string());
    }
}
