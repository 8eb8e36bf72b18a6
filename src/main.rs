//! 얼리 액세스 인증 서비스 메인 애플리케이션
//!
//! 설정을 읽어 애플리케이션 컨텍스트를 조립하고 Actix-web HTTP 서버를 구동합니다.
//! 서버가 멈추면 활성 세션을 정리한 뒤 종료합니다.

use std::io;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use early_access_auth::config::AppConfig;
use early_access_auth::core::container::AppContext;
use early_access_auth::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 얼리 액세스 인증 서비스 시작중...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("설정 로드 실패: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let context = AppContext::build(config).map_err(|e| {
        error!("애플리케이션 컨텍스트 생성 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    context.auth.on_auth_state_change(|change| {
        info!("🔐 인증 상태 변경: {} ({})", change.as_str(), change.user().uid)
    });

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    let context = web::Data::new(context);
    let result = start_http_server(context.clone()).await;

    context.shutdown().await;
    result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 모든 워커가 같은 [`AppContext`]를 공유합니다. 세션 테이블과 진행 중인 OAuth 상태가
/// 워커마다 갈라지지 않도록 컨텍스트는 서버 밖에서 한 번만 생성합니다.
///
/// # Errors
///
/// * `std::io::Error` - 레이트 리밋 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(context: web::Data<AppContext>) -> io::Result<()> {
    let bind_address = context.config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1/auth", bind_address);

    // Rate Limiting 설정
    let rate_limit = &context.config.rate_limit;
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "RATE_LIMIT_PER_SECOND와 RATE_LIMIT_BURST_SIZE는 0보다 커야 합니다",
            )
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second,
        rate_limit.burst_size
    );

    let cors = context.config.cors.clone();

    HttpServer::new(move || {
        let cors = cors.clone();

        App::new()
            .app_data(context.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정 (CORS는 라우트 그룹별로 적용)
            .configure(|cfg| configure_all_routes(cfg, &cors))
    })
        .bind(bind_address)?
        .workers(4) // 워커 스레드 수
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 표준 에러로 직접 출력
    eprintln!("Current profile: {}", profile);

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("{} 파일 로드 됨", file),
        Err(e) => eprintln!("{} 프로파일 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}
