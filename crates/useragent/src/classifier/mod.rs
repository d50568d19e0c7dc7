//! 규칙 테이블 기반 user-agent 분류기
//!
//! [`RuleClassifier`]는 core의 [`UserAgentClassifier`] trait을 구현합니다.
//! 정규식은 생성 시 한 번만 컴파일하며, 분류 단계는 실패하지 않습니다.
//!
//! # 분류 순서
//! 1. 브라우저 규칙을 순서대로 시도 (첫 매칭 = 이름 + 버전)
//! 2. `searchbot` 매칭이면 유형만 `bot`으로 기록하고 종료
//! 3. OS 규칙을 순서대로 시도
//! 4. 알려진 크롤러 토큰이 있으면 `bot-device`, 아니면 `browser`
//!
//! # 사용 예시
//! ```ignore
//! use useragent_plugin::classifier::RuleClassifier;
//! use useragent_core::pipeline::UserAgentClassifier;
//!
//! let classifier = RuleClassifier::new()?;
//! let c = classifier.classify("Mozilla/5.0 (X11; Linux x86_64; rv:95.0) Gecko/20100101 Firefox/95.0");
//! assert_eq!(c.browser.as_deref(), Some("firefox"));
//! ```

mod rules;

use regex::Regex;

use useragent_core::error::ClassifierError;
use useragent_core::pipeline::UserAgentClassifier;
use useragent_core::types::{BrowserType, Classification};

use rules::{BOT_DEVICE_PATTERN, BROWSER_RULES, OS_RULES, SEARCHBOT};

/// 정규화된 버전 문자열의 자릿수
const REQUIRED_VERSION_PARTS: usize = 3;

/// 컴파일된 브라우저 규칙
struct BrowserRule {
    name: &'static str,
    regex: Regex,
    reject_if_followed_by: Option<&'static str>,
}

impl BrowserRule {
    /// 규칙이 매칭되면 캡처된 버전(있다면)을 반환합니다.
    fn find<'a>(&self, ua: &'a str) -> Option<Option<&'a str>> {
        let caps = self.regex.captures_iter(ua).find(|caps| {
            match (self.reject_if_followed_by, caps.get(0)) {
                (Some(token), Some(m)) => !ua[m.start()..].contains(token),
                _ => true,
            }
        })?;
        Some(caps.get(1).map(|m| m.as_str()))
    }
}

/// 규칙 테이블 기반 분류기
pub struct RuleClassifier {
    browser_rules: Vec<BrowserRule>,
    os_rules: Vec<(&'static str, Regex)>,
    bot_device: Regex,
}

impl RuleClassifier {
    /// 모든 규칙을 컴파일하여 분류기를 생성합니다.
    pub fn new() -> Result<Self, ClassifierError> {
        let browser_rules = BROWSER_RULES
            .iter()
            .map(|spec| {
                Ok(BrowserRule {
                    name: spec.name,
                    regex: compile(spec.name, spec.pattern)?,
                    reject_if_followed_by: spec.reject_if_followed_by,
                })
            })
            .collect::<Result<Vec<_>, ClassifierError>>()?;

        let os_rules = OS_RULES
            .iter()
            .map(|(name, pattern)| Ok((*name, compile(name, pattern)?)))
            .collect::<Result<Vec<_>, ClassifierError>>()?;

        Ok(Self {
            browser_rules,
            os_rules,
            bot_device: compile("bot-device", BOT_DEVICE_PATTERN)?,
        })
    }

    /// 등록된 브라우저 규칙 수
    pub fn browser_rule_count(&self) -> usize {
        self.browser_rules.len()
    }

    /// 등록된 OS 규칙 수
    pub fn os_rule_count(&self) -> usize {
        self.os_rules.len()
    }

    fn match_browser<'a>(&self, ua: &'a str) -> Option<(&'static str, Option<&'a str>)> {
        self.browser_rules
            .iter()
            .find_map(|rule| rule.find(ua).map(|version| (rule.name, version)))
    }

    fn detect_os(&self, ua: &str) -> Option<&'static str> {
        self.os_rules
            .iter()
            .find(|(_, regex)| regex.is_match(ua))
            .map(|(name, _)| *name)
    }
}

impl UserAgentClassifier for RuleClassifier {
    fn name(&self) -> &str {
        "rule-table"
    }

    fn classify(&self, user_agent: &str) -> Classification {
        if user_agent.is_empty() {
            return Classification::empty();
        }

        let Some((name, version)) = self.match_browser(user_agent) else {
            return Classification::empty();
        };

        if name == SEARCHBOT {
            return Classification {
                browser_type: Some(BrowserType::Bot),
                ..Classification::default()
            };
        }

        let browser_type = if self.bot_device.is_match(user_agent) {
            BrowserType::BotDevice
        } else {
            BrowserType::Browser
        };

        Classification {
            browser: Some(name.to_owned()),
            browser_version: version.map(normalize_version),
            os: self.detect_os(user_agent).map(str::to_owned),
            browser_type: Some(browser_type),
        }
    }
}

fn compile(rule: &str, pattern: &str) -> Result<Regex, ClassifierError> {
    Regex::new(pattern).map_err(|e| ClassifierError::RuleCompile {
        rule: rule.to_owned(),
        reason: e.to_string(),
    })
}

/// 버전을 `.`/`_`로 나눠 최대 세 자리만 남기고, 모자라면 `0`으로 채웁니다.
///
/// `"14.0"` → `"14.0.0"`, `"96.0.1054.57"` → `"96.0.1054"`, `"10_15"` → `"10.15.0"`
pub fn normalize_version(raw: &str) -> String {
    let mut parts: Vec<&str> = raw
        .split(['.', '_'])
        .take(REQUIRED_VERSION_PARTS)
        .collect();
    parts.resize(REQUIRED_VERSION_PARTS, "0");
    parts.join(".")
}
