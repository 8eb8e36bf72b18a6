//! # Supabase GoTrue 백엔드
//!
//! Supabase Auth REST API(`{project}/auth/v1`)를 호출합니다.
//! 모든 요청에 `apikey` 헤더가 필요하며, 사용자 범위 요청은 액세스 토큰을 Bearer로 보냅니다.
//!
//! OAuth는 PKCE(S256) 코드 플로우를 사용합니다.
//! `code_verifier`는 [`PendingOAuth::secret`]에 보관됩니다.
//!
//! GoTrue 에러는 자유 형식 메시지이므로 정규화 없이 그대로 넘기고,
//! 에러 번역기의 부분 문자열 규칙이 처리합니다.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::config::{AuthProviderKind, SupabaseSettings};
use crate::domain::entities::users::User;
use crate::domain::models::{OAuthCallback, OAuthProvider, OAuthStart, PendingOAuth, Session};
use super::auth_backend::{with_query_param, AuthBackend, ProviderError};
use super::error_translator::{INVALID_OAUTH_CALLBACK, USER_NOT_FOUND};

/// 이메일 확인이 켜진 프로젝트에서 이미 가입된 이메일로 가입하면
/// GoTrue는 에러 대신 `identities`가 빈 사용자를 돌려줍니다.
const DUPLICATE_SIGN_UP_MESSAGE: &str = "User already registered";

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    last_sign_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    user_metadata: UserMetadata,
    #[serde(default)]
    identities: Option<Vec<serde_json::Value>>,
}

impl SupabaseUser {
    fn into_user(self) -> User {
        let metadata = self.user_metadata;
        let name = metadata.display_name.or(metadata.full_name).or(metadata.name);

        User::new(self.id, self.email.unwrap_or_default(), AuthProviderKind::Supabase)
            .with_display_name(name)
            .with_timestamps(self.created_at, self.last_sign_in_at)
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: SupabaseUser,
}

/// GoTrue 에러 본문의 메시지 필드 (버전에 따라 필드 이름이 다름)
fn error_message(body: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return body.trim().to_string(),
    };

    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_default()
}

/// PKCE `code_verifier`와 S256 `code_challenge`를 생성합니다.
fn pkce_pair() -> (String, String) {
    let verifier = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    (verifier.clone(), code_challenge(&verifier))
}

fn code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

pub struct SupabaseAuthBackend {
    client: reqwest::Client,
    settings: SupabaseSettings,
}

impl SupabaseAuthBackend {
    pub fn new(client: reqwest::Client, settings: SupabaseSettings) -> Self {
        Self { client, settings }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.settings.url, path)
    }

    fn with_keys(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        request
            .header("apikey", &self.settings.anon_key)
            .bearer_auth(access_token.unwrap_or(&self.settings.anon_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ProviderError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::debug!("Supabase 요청 실패 ({}): {}", status, text);
            return Err(ProviderError::rejected(error_message(&text)));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProviderError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Supabase 응답 파싱 실패: {}", e)))
    }

    fn session_from(response: SessionResponse) -> Session {
        Session::new(response.user.into_user(), Some(response.access_token), response.refresh_token)
    }

    /// 가입 응답은 세션 전체이거나(자동 확인) 사용자만 담고 있습니다(이메일 확인 대기).
    fn sign_up_session(body: serde_json::Value) -> Result<Session, ProviderError> {
        let parse_error = |e: serde_json::Error| ProviderError::InvalidResponse(format!("Supabase 가입 응답 파싱 실패: {}", e));

        let (user, access_token, refresh_token) = if body.get("access_token").is_some() {
            let session: SessionResponse = serde_json::from_value(body).map_err(parse_error)?;
            (session.user, Some(session.access_token), session.refresh_token)
        } else if body.get("user").is_some_and(|u| u.is_object()) {
            let user: SupabaseUser = serde_json::from_value(body["user"].clone()).map_err(parse_error)?;
            (user, None, None)
        } else {
            let user: SupabaseUser = serde_json::from_value(body).map_err(parse_error)?;
            (user, None, None)
        };

        if user.identities.as_ref().is_some_and(|identities| identities.is_empty()) {
            return Err(ProviderError::rejected(DUPLICATE_SIGN_UP_MESSAGE));
        }

        let created_at = user.created_at.unwrap_or_else(Utc::now);
        let user = user.into_user().mark_new_identity(created_at);

        Ok(Session::new(user, access_token, refresh_token))
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuthBackend {
    fn kind(&self) -> AuthProviderKind {
        AuthProviderKind::Supabase
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let request = self
            .client
            .post(self.url("token?grant_type=password"))
            .json(&json!({ "email": email, "password": password }));

        let response: SessionResponse = self.send_json(self.with_keys(request, None)).await?;
        Ok(Self::session_from(response))
    }

    async fn sign_up_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let request = self
            .client
            .post(self.url("signup"))
            .json(&json!({ "email": email, "password": password }));

        let body: serde_json::Value = self.send_json(self.with_keys(request, None)).await?;
        Self::sign_up_session(body)
    }

    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<(), ProviderError> {
        let access_token = session
            .access_token
            .as_deref()
            .ok_or_else(|| ProviderError::rejected("Email not confirmed"))?;

        let request = self
            .client
            .put(self.url("user"))
            .json(&json!({ "data": { "full_name": display_name, "display_name": display_name } }));

        self.send(self.with_keys(request, Some(access_token))).await?;
        Ok(())
    }

    async fn begin_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<OAuthStart, ProviderError> {
        let state = Uuid::new_v4().simple().to_string();
        let redirect_to = with_query_param(redirect_to, "state", &state)?;
        let (verifier, challenge) = pkce_pair();

        let authorize_url = format!(
            "{}?provider={}&redirect_to={}&code_challenge={}&code_challenge_method=s256",
            self.url("authorize"),
            provider.as_str(),
            urlencoding::encode(&redirect_to),
            challenge
        );

        Ok(OAuthStart {
            authorize_url,
            state,
            pending: PendingOAuth { provider, secret: verifier },
        })
    }

    async fn complete_oauth(&self, pending: &PendingOAuth, callback: &OAuthCallback) -> Result<Session, ProviderError> {
        let code = callback
            .code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| ProviderError::rejected(INVALID_OAUTH_CALLBACK))?;

        let request = self
            .client
            .post(self.url("token?grant_type=pkce"))
            .json(&json!({ "auth_code": code, "code_verifier": pending.secret }));

        let response: SessionResponse = self.send_json(self.with_keys(request, None)).await?;
        Ok(Self::session_from(response))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError> {
        let Some(access_token) = session.access_token.as_deref() else {
            return Ok(());
        };

        let request = self.client.post(self.url("logout"));
        self.send(self.with_keys(request, Some(access_token))).await?;
        Ok(())
    }

    async fn fetch_user(&self, session: &Session) -> Result<User, ProviderError> {
        let access_token = session
            .access_token
            .as_deref()
            .ok_or_else(|| ProviderError::rejected(USER_NOT_FOUND))?;

        let request = self.client.get(self.url("user"));
        let user: SupabaseUser = self.send_json(self.with_keys(request, Some(access_token))).await?;
        Ok(user.into_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::auth_backend::query_param;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param as query_matcher};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> SupabaseAuthBackend {
        SupabaseAuthBackend::new(
            reqwest::Client::new(),
            SupabaseSettings { url: server.uri(), anon_key: "anon-key".to_string() },
        )
    }

    fn user_json(created_at: &str, last_sign_in_at: &str) -> serde_json::Value {
        json!({
            "id": "sb-1",
            "email": "ava@example.com",
            "created_at": created_at,
            "last_sign_in_at": last_sign_in_at,
            "user_metadata": { "full_name": "Ava" },
            "identities": [{ "provider": "email" }]
        })
    }

    #[test]
    fn test_error_message_field_order() {
        assert_eq!(error_message(r#"{"msg":"Invalid login credentials"}"#), "Invalid login credentials");
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(error_message(r#"{"code":500}"#), "");
        assert_eq!(error_message("upstream timeout"), "upstream timeout");
    }

    #[test]
    fn test_code_challenge_is_s256_base64url() {
        // RFC 7636 Appendix B
        assert_eq!(
            code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
            "E9Melhoa2OwvFWzQXELTP5xlUw2GOwuZ9sKAWv2Yc6E"
        );

        let (verifier, challenge) = pkce_pair();
        assert_eq!(verifier.len(), 64);
        assert!(!challenge.contains('='));
    }

    #[actix_web::test]
    async fn test_sign_in_sends_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_matcher("grant_type", "password"))
            .and(header("apikey", "anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at",
                "refresh_token": "rt",
                "user": user_json("2024-01-01T00:00:00Z", "2024-06-01T00:00:00Z")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = backend(&server).sign_in_with_password("ava@example.com", "secret1").await.unwrap();

        assert_eq!(session.user.display_name.as_deref(), Some("Ava"));
        assert!(!session.user.is_first_session());
    }

    #[actix_web::test]
    async fn test_invalid_credentials_message_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;

        let err = backend(&server).sign_in_with_password("ava@example.com", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Incorrect email or password. Please try again.");
    }

    #[actix_web::test]
    async fn test_sign_up_pending_confirmation_returns_user_without_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(
                "2024-06-01T00:00:00.100Z",
                "2024-06-01T00:00:00.100Z",
            )))
            .mount(&server)
            .await;

        let session = backend(&server).sign_up_with_password("ava@example.com", "secret1").await.unwrap();

        assert!(!session.has_access_token());
        assert!(session.user.is_first_session());
    }

    #[actix_web::test]
    async fn test_obfuscated_duplicate_sign_up_is_rejected() {
        let server = MockServer::start().await;
        let mut body = user_json("2024-01-01T00:00:00Z", "2024-01-01T00:00:00Z");
        body["identities"] = json!([]);
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = backend(&server).sign_up_with_password("ava@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.user_message(), "This email is already registered. Try signing in!");
    }

    #[actix_web::test]
    async fn test_update_display_name_uses_user_token() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/v1/user"))
            .and(header("authorization", "Bearer at"))
            .and(body_partial_json(json!({ "data": { "full_name": "Ava" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(
                "2024-01-01T00:00:00Z",
                "2024-01-01T00:00:00Z",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let user = User::new("sb-1", "ava@example.com", AuthProviderKind::Supabase);
        let session = Session::new(user, Some("at".to_string()), None);

        backend(&server).update_display_name(&session, "Ava").await.unwrap();
    }

    #[actix_web::test]
    async fn test_oauth_uses_pkce() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_matcher("grant_type", "pkce"))
            .and(body_partial_json(json!({ "auth_code": "code-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at",
                "user": user_json("2024-06-01T00:00:00Z", "2024-06-01T00:00:01Z")
            })))
            .mount(&server)
            .await;

        let backend = backend(&server);
        let start = backend
            .begin_oauth(OAuthProvider::GitHub, "http://localhost:8080/callback")
            .await
            .unwrap();

        assert_eq!(query_param(&start.authorize_url, "provider").as_deref(), Some("github"));
        assert_eq!(
            query_param(&start.authorize_url, "code_challenge"),
            Some(code_challenge(&start.pending.secret))
        );
        let redirect = query_param(&start.authorize_url, "redirect_to").unwrap();
        assert_eq!(query_param(&redirect, "state"), Some(start.state.clone()));

        let callback = OAuthCallback {
            state: start.state.clone(),
            code: Some("code-1".to_string()),
            ..Default::default()
        };
        let session = backend.complete_oauth(&start.pending, &callback).await.unwrap();
        assert!(session.user.is_first_session());

        let missing_code = OAuthCallback { state: start.state, ..Default::default() };
        assert_eq!(
            backend.complete_oauth(&start.pending, &missing_code).await.unwrap_err(),
            ProviderError::rejected(INVALID_OAUTH_CALLBACK)
        );
    }
}
