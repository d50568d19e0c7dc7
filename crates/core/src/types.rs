//! 도메인 타입 - 분류 결과와 파생 속성 키
//!
//! 분류기([`UserAgentClassifier`](crate::pipeline::UserAgentClassifier))가 반환하는
//! [`Classification`]과, 이벤트 속성에 기록되는 키 상수를 정의합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- 조회 키 ---

/// user-agent 조회 1순위 키
pub const PROP_USERAGENT: &str = "$useragent";
/// user-agent 조회 2순위 키 (`$useragent`가 없을 때만 사용)
pub const PROP_USER_AGENT: &str = "$user-agent";

// --- 파생 키 ---

/// 브라우저 이름
pub const PROP_BROWSER: &str = "$browser";
/// 브라우저 버전
pub const PROP_BROWSER_VERSION: &str = "$browser_version";
/// 운영체제 이름
pub const PROP_OS: &str = "$os";
/// 브라우저 유형 태그
pub const PROP_BROWSER_TYPE: &str = "$browser_type";

/// 파생 키 목록 (기록 순서)
pub const DERIVED_PROPERTY_KEYS: [&str; 4] =
    [PROP_BROWSER, PROP_BROWSER_VERSION, PROP_OS, PROP_BROWSER_TYPE];

/// 브라우저 유형
///
/// 직렬화 문자열은 `Display`/`FromStr`과 동일합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrowserType {
    /// 일반 브라우저
    Browser,
    /// 검색 봇 / 크롤러 (이름·버전·OS 없음)
    Bot,
    /// 브라우저 엔진을 사용하는 크롤러 (예: Googlebot)
    BotDevice,
}

impl BrowserType {
    /// 속성 값으로 기록되는 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Bot => "bot",
            Self::BotDevice => "bot-device",
        }
    }
}

impl fmt::Display for BrowserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "browser" => Ok(Self::Browser),
            "bot" => Ok(Self::Bot),
            "bot-device" => Ok(Self::BotDevice),
            other => Err(format!("unknown browser type: {other}")),
        }
    }
}

/// user-agent 분류 결과
///
/// 네 필드는 서로 독립적인 `Option`입니다. 분류기가 일부만 판별해도
/// 병합 단계는 판별된 필드만 기록합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// 브라우저 이름 (예: `"safari"`, `"edge-chromium"`)
    pub browser: Option<String>,
    /// 세 자리로 정규화된 버전 (예: `"14.0.0"`)
    pub browser_version: Option<String>,
    /// 운영체제 이름 (예: `"Mac OS"`)
    pub os: Option<String>,
    /// 브라우저 유형
    pub browser_type: Option<BrowserType>,
}

impl Classification {
    /// 아무 필드도 판별되지 않은 결과
    pub fn empty() -> Self {
        Self::default()
    }

    /// 모든 필드가 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.browser.is_none()
            && self.browser_version.is_none()
            && self.os.is_none()
            && self.browser_type.is_none()
    }

    /// 파생 속성 `(키, 값)` 쌍을 고정 순서로 반환합니다.
    ///
    /// 순서: `$browser`, `$browser_version`, `$os`, `$browser_type`.
    pub fn derived_properties(&self) -> [(&'static str, Option<Value>); 4] {
        [
            (PROP_BROWSER, self.browser.clone().map(Value::String)),
            (
                PROP_BROWSER_VERSION,
                self.browser_version.clone().map(Value::String),
            ),
            (PROP_OS, self.os.clone().map(Value::String)),
            (
                PROP_BROWSER_TYPE,
                self.browser_type
                    .map(|t| Value::String(t.as_str().to_owned())),
            ),
        ]
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {} ({})",
            self.browser.as_deref().unwrap_or("unknown"),
            self.browser_version.as_deref().unwrap_or("-"),
            self.os.as_deref().unwrap_or("unknown"),
            self.browser_type.map(|t| t.as_str()).unwrap_or("-"),
        )
    }
}
