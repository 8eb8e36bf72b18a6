//! 환경 변수 조회 추상화
//!
//! 설정은 시작 시점에 한 번 읽어 구조체로 고정합니다. 테스트에서는 프로세스
//! 환경 변수를 건드리지 않고 키/값 목록을 주입합니다.

use std::collections::HashMap;
use std::str::FromStr;

/// 설정 값 공급원
pub enum EnvSource {
    /// 프로세스 환경 변수
    Process,
    /// 고정된 키/값 (테스트용)
    Fixed(HashMap<String, String>),
}

impl EnvSource {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        EnvSource::Fixed(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// 값을 조회합니다. 빈 문자열은 설정되지 않은 것으로 취급합니다.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match self {
            EnvSource::Process => std::env::var(key).ok(),
            EnvSource::Fixed(map) => map.get(key).cloned(),
        };

        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// 값을 파싱하고, 없거나 잘못된 경우 기본값을 사용합니다.
pub fn parse_or<T>(source: &EnvSource, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match source.get(key) {
        Some(raw) => raw.parse::<T>().unwrap_or_else(|e| {
            log::error!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
            default
        }),
        None => default,
    }
}
