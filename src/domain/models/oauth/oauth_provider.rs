//! 소셜 로그인 프로바이더

use serde::{Deserialize, Serialize};

/// 인증 백엔드를 통해 위임하는 OAuth 신원 공급자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::GitHub),
            _ => Err(format!("Unsupported OAuth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::GitHub => "github",
        }
    }

    /// Firebase Identity Toolkit의 `providerId`
    pub fn firebase_provider_id(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google.com",
            OAuthProvider::GitHub => "github.com",
        }
    }
}
