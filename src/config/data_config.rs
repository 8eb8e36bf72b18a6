//! 서버, 환경, 레이트 리밋, CORS 설정

use super::env_source::{parse_or, EnvSource};

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn from_source(source: &EnvSource) -> Self {
        source
            .get("ENVIRONMENT")
            .map(|s| Self::from_str(&s))
            .unwrap_or(Environment::Production)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_source(source: &EnvSource) -> Self {
        Self {
            host: source.get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(source, "PORT", 8080),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Rate Limiting 설정
///
/// 가입/로그인 엔드포인트와 환영 메일 엔드포인트 남용을 막기 위해 사용됩니다.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_source(source: &EnvSource) -> Self {
        Self {
            per_second: parse_or(source, "RATE_LIMIT_PER_SECOND", 10),
            burst_size: parse_or(source, "RATE_LIMIT_BURST_SIZE", 20),
        }
    }
}

/// `/api/v1` 라우트에 허용할 Origin 목록
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_source(source: &EnvSource) -> Self {
        let allowed_origins = match source.get("CORS_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:5500".to_string(),
                "http://127.0.0.1:5500".to_string(),
            ],
        };

        Self { allowed_origins }
    }
}
