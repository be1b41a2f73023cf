//! 클라이언트 설정 모듈
//!
//! [`ClientConfig`]는 Tiki 사이트 주소, 접근 토큰, 디버그 출력 여부 등
//! 호출마다 넘기던 값을 하나로 묶은 설정입니다. 전역 상태는 두지 않습니다.
//!
//! ## 환경 변수
//!
//! | 변수 | 필드 | 필수 |
//! |---|---|---|
//! | `TIKI_DOMAIN` | `domain` | ✓ |
//! | `TIKI_ACCESS_TOKEN` | `access_token` | ✓ |
//! | `TIKI_DEBUG` | `debug` (`1`/`true`) | |
//! | `TIKI_TIMEOUT_SECS` | `timeout_secs` | |

use std::fmt;

use serde::Deserialize;

use crate::constants::USER_AGENT;
use crate::error::{Result, TikiError};

/// 사이트 주소 환경 변수 (필수)
pub const ENV_DOMAIN: &str = "TIKI_DOMAIN";
/// 접근 토큰 환경 변수 (필수)
pub const ENV_ACCESS_TOKEN: &str = "TIKI_ACCESS_TOKEN";
/// 디버그 로그 환경 변수 (`1`/`true`/`yes`/`on`이면 켬)
pub const ENV_DEBUG: &str = "TIKI_DEBUG";
/// 요청 타임아웃(초) 환경 변수
pub const ENV_TIMEOUT_SECS: &str = "TIKI_TIMEOUT_SECS";

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

/// Tiki API 클라이언트 설정
///
/// `serde::Deserialize`를 구현하므로 호출자가 JSON/TOML 설정 파일에서 읽을 수 있습니다.
/// `debug`, `timeout_secs`, `user_agent`는 생략 가능합니다.
///
/// # 예시
///
/// ```
/// use tiki_iot::config::ClientConfig;
///
/// let config = ClientConfig::new("https://tiki.example.com/", "Bearer abc")
///     .with_debug(true)
///     .with_timeout_secs(30);
/// assert_eq!(config.domain, "https://tiki.example.com");
/// assert!(config.debug);
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// 사이트 주소 (끝 `/` 없음)
    #[serde(deserialize_with = "deserialize_domain")]
    pub domain: String,
    /// 접근 토큰 (`"Bearer ..."` 또는 `"Authorization: Bearer ..."`)
    pub access_token: String,
    /// 응답 본문 전체 등 상세 디버그 로그 출력 여부
    #[serde(default)]
    pub debug: bool,
    /// 요청 타임아웃 (초). `None`이면 reqwest 기본값
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User-Agent 헤더
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn deserialize_domain<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_domain(&raw))
}

fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('/').to_string()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl ClientConfig {
    /// 필수 값으로 설정을 생성합니다. `domain`의 끝 `/`는 제거됩니다.
    pub fn new(domain: impl AsRef<str>, access_token: impl Into<String>) -> Self {
        Self {
            domain: normalize_domain(domain.as_ref()),
            access_token: access_token.into(),
            debug: false,
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }

    /// 상세 디버그 로그 여부를 설정합니다.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// 요청 타임아웃(초)을 설정합니다.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// User-Agent를 바꿉니다.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// 프로세스 환경 변수에서 설정을 읽습니다.
    ///
    /// # 에러
    ///
    /// - [`TikiError::MissingConfig`] — `TIKI_DOMAIN` 또는 `TIKI_ACCESS_TOKEN`이 없거나 비어 있음
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 키 조회 함수로 설정을 읽습니다. [`from_env`](Self::from_env)의 본체입니다.
    ///
    /// 숫자로 읽을 수 없는 `TIKI_TIMEOUT_SECS`는 무시합니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(TikiError::MissingConfig { name })
        };

        let mut config = Self::new(required(ENV_DOMAIN)?, required(ENV_ACCESS_TOKEN)?);

        if let Some(val) = lookup(ENV_DEBUG) {
            config.debug = parse_flag(&val);
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|v| v.trim().parse().ok()) {
            config.timeout_secs = Some(secs);
        }

        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("domain", &self.domain)
            .field("access_token", &"<redacted>")
            .field("debug", &self.debug)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("https://tiki.example.com//", "Bearer x");
        assert_eq!(config.domain, "https://tiki.example.com");
        assert!(!config.debug);
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.user_agent, USER_AGENT);
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new("https://t.example", "Bearer x")
            .with_debug(true)
            .with_timeout_secs(15)
            .with_user_agent("sensor-check/1.0");
        assert!(config.debug);
        assert_eq!(config.timeout_secs, Some(15));
        assert_eq!(config.user_agent, "sensor-check/1.0");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("https://t.example", "Bearer s3cret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_from_lookup_full() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_DOMAIN, "https://tiki.example.com/"),
            (ENV_ACCESS_TOKEN, "Bearer abc"),
            (ENV_DEBUG, "1"),
            (ENV_TIMEOUT_SECS, "20"),
        ]))
        .unwrap();
        assert_eq!(config.domain, "https://tiki.example.com");
        assert_eq!(config.access_token, "Bearer abc");
        assert!(config.debug);
        assert_eq!(config.timeout_secs, Some(20));
    }

    #[test]
    fn test_from_lookup_missing_domain() {
        let err =
            ClientConfig::from_lookup(lookup_from(&[(ENV_ACCESS_TOKEN, "Bearer abc")])).unwrap_err();
        assert!(matches!(err, TikiError::MissingConfig { name: "TIKI_DOMAIN" }));
    }

    #[test]
    fn test_from_lookup_blank_token_is_missing() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (ENV_DOMAIN, "https://t.example"),
            (ENV_ACCESS_TOKEN, "  "),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing configuration value: TIKI_ACCESS_TOKEN"
        );
    }

    #[test]
    fn test_from_lookup_ignores_bad_timeout() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_DOMAIN, "https://t.example"),
            (ENV_ACCESS_TOKEN, "Bearer abc"),
            (ENV_DEBUG, "no"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap();
        assert!(!config.debug);
        assert_eq!(config.timeout_secs, None);
    }
}
