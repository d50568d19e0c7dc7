//! user-agent 조회 및 속성 병합
//!
//! 이벤트 하나에 대한 전체 변환 흐름입니다.
//!
//! ```text
//! enabled? -> $useragent / $user-agent 조회 -> classify -> 4개 키 병합
//!    |              |                              |
//!  Disabled   Missing / Empty               Unclassified
//! ```
//!
//! 파생 키 4개 이외의 속성은 읽지도 쓰지도 않습니다.
//! 단락(short-circuit) 경로에서는 속성 백을 전혀 건드리지 않습니다.

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use useragent_core::config::EnricherSettings;
use useragent_core::event::{PluginEvent, Properties};
use useragent_core::metrics::{
    REASON_ALREADY_PRESENT, REASON_DISABLED, REASON_EMPTY_USER_AGENT, REASON_MISSING_USER_AGENT,
    REASON_UNCLASSIFIED,
};
use useragent_core::pipeline::UserAgentClassifier;
use useragent_core::types::{Classification, PROP_USER_AGENT, PROP_USERAGENT};

/// 이벤트 하나를 처리한 결과
///
/// 로깅과 메트릭에만 사용합니다. 호출자에게 에러로 노출되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// 마스터 스위치가 꺼져 있음
    Disabled,
    /// 두 조회 키가 모두 없음 (속성 백 자체가 없는 경우 포함)
    MissingUserAgent,
    /// 선택된 키의 값이 빈 문자열이거나 문자열이 아님
    EmptyUserAgent,
    /// 분류기가 아무 필드도 판별하지 못함
    Unclassified,
    /// 병합 단계까지 진행됨. `written`은 실제로 기록된 키 수 (0 가능)
    Enriched { written: usize },
}

impl EnrichOutcome {
    /// 변경 없이 통과한 경우 메트릭 사유 레이블
    ///
    /// 병합까지 갔지만 기록된 키가 없으면 `already_present`입니다.
    pub fn skip_reason(&self) -> Option<&'static str> {
        match self {
            Self::Disabled => Some(REASON_DISABLED),
            Self::MissingUserAgent => Some(REASON_MISSING_USER_AGENT),
            Self::EmptyUserAgent => Some(REASON_EMPTY_USER_AGENT),
            Self::Unclassified => Some(REASON_UNCLASSIFIED),
            Self::Enriched { written: 0 } => Some(REASON_ALREADY_PRESENT),
            Self::Enriched { .. } => None,
        }
    }
}

impl fmt::Display for EnrichOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enriched { written } => write!(f, "enriched({written})"),
            other => f.write_str(other.skip_reason().unwrap_or("unknown")),
        }
    }
}

/// 조회 단계 결과
enum Lookup<'a> {
    Missing,
    Unusable(&'static str),
    Found(&'static str, &'a str),
}

/// `$useragent`, 그다음 `$user-agent` 순서로 조회합니다.
///
/// 첫 번째 키가 존재하면 값과 무관하게 그 키가 선택됩니다.
fn lookup(properties: &Properties) -> Lookup<'_> {
    let selected = [PROP_USERAGENT, PROP_USER_AGENT]
        .into_iter()
        .find_map(|key| properties.get(key).map(|value| (key, value)));

    match selected {
        None => Lookup::Missing,
        Some((key, Value::String(s))) if !s.is_empty() => Lookup::Found(key, s),
        Some((key, _)) => Lookup::Unusable(key),
    }
}

/// 사용 가능한 user-agent 문자열을 반환합니다.
///
/// 누락, null, 문자열이 아닌 값, 빈 문자열은 모두 `None`입니다.
pub fn find_user_agent(properties: &Properties) -> Option<&str> {
    match lookup(properties) {
        Lookup::Found(_, ua) => Some(ua),
        _ => None,
    }
}

/// 분류 결과를 속성 백에 병합하고 기록한 키 수를 반환합니다.
///
/// 판별되지 않은 필드는 건너뜁니다. `override_existing`이 참이면 무조건 기록하고,
/// 거짓이면 키가 없을 때만 기록합니다. 정책은 네 키에 동일하게 적용됩니다.
pub fn merge_classification(
    properties: &mut Properties,
    classification: &Classification,
    override_existing: bool,
) -> usize {
    let mut written = 0;
    for (key, candidate) in classification.derived_properties() {
        let Some(value) = candidate else {
            continue;
        };
        if override_existing || !properties.contains_key(key) {
            properties.insert(key.to_owned(), value);
            written += 1;
        } else {
            trace!(key, "keeping existing property");
        }
    }
    written
}

/// 이벤트 하나를 변환합니다.
///
/// 속성 백은 제자리에서 수정되며, 단락 경로에서는 바이트 단위로 동일하게 남습니다.
pub fn enrich_event(
    event: &mut PluginEvent,
    settings: &EnricherSettings,
    classifier: &dyn UserAgentClassifier,
) -> EnrichOutcome {
    if !settings.enabled {
        return EnrichOutcome::Disabled;
    }

    let Some(properties) = event.properties.as_mut() else {
        return EnrichOutcome::MissingUserAgent;
    };

    let classification = match lookup(properties) {
        Lookup::Missing => return EnrichOutcome::MissingUserAgent,
        Lookup::Unusable(key) => {
            debug!(source_key = key, "user agent present but unusable, skipping");
            return EnrichOutcome::EmptyUserAgent;
        }
        Lookup::Found(key, ua) => {
            let classification = classifier.classify(ua);
            trace!(
                source_key = key,
                classifier = classifier.name(),
                result = %classification,
                "classified user agent"
            );
            classification
        }
    };

    if classification.is_empty() {
        return EnrichOutcome::Unclassified;
    }

    let written = merge_classification(
        properties,
        &classification,
        settings.override_user_agent_details,
    );
    debug!(
        browser = classification.browser.as_deref().unwrap_or("-"),
        written,
        override_existing = settings.override_user_agent_details,
        "merged user agent details"
    );
    EnrichOutcome::Enriched { written }
}
