//! 이벤트 모델 - 호스트 파이프라인이 넘겨주는 분석 이벤트
//!
//! [`PluginEvent`]는 호스트가 이벤트마다 한 번 전달하는 구조체입니다.
//! 변환기는 [`Properties`]만 수정하며, 나머지 필드는 그대로 통과시킵니다.
//!
//! `serde_json`의 `preserve_order` 기능을 사용하므로 속성의 삽입 순서는
//! 수정과 재직렬화 이후에도 유지됩니다. 모르는 최상위 필드(`id`, `$set` 등)는
//! [`PluginEvent::extra`]에 그대로 보관되어 재직렬화 시 다시 기록됩니다.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EventError, UserAgentError};

/// 이벤트 속성 백 (문자열 키 → JSON 값, 삽입 순서 보존)
pub type Properties = Map<String, Value>;

/// 호스트 분석 이벤트
///
/// 호스트 JSON 형식과 필드명이 같습니다. 변환기가 해석하지 않는 필드는
/// 문자열 또는 원본 JSON 값 그대로 통과시킵니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginEvent {
    /// 이벤트 고유 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// 이벤트 발생 시각 (호스트가 보낸 문자열 그대로, [`Self::timestamp_utc`] 참고)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// 이벤트 이름 (예: `"$pageview"`)
    #[serde(default)]
    pub event: String,
    /// 행위자 식별자
    #[serde(default)]
    pub distinct_id: String,
    /// 속성 백. 호스트가 아예 생략할 수 있습니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements_chain: Option<String>,
    /// 위에 없는 나머지 최상위 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PluginEvent {
    /// 새 UUID v4와 현재 시각으로 빈 이벤트를 생성합니다.
    pub fn new(event: impl Into<String>, distinct_id: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid::Uuid::new_v4().to_string()),
            timestamp: Some(Utc::now().to_rfc3339()),
            event: event.into(),
            distinct_id: distinct_id.into(),
            properties: Some(Properties::new()),
            ..Self::default()
        }
    }

    /// 속성 백을 교체합니다.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// 타임스탬프를 UTC 시각으로 해석합니다.
    ///
    /// RFC 3339 형식 외에 타임존 없는 `YYYY-MM-DDTHH:MM:SS[.fff]`도 UTC로 간주합니다.
    /// 해석할 수 없으면 `None`입니다.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    /// 속성 하나를 읽습니다. 속성 백이 없으면 `None`입니다.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    /// 속성 백의 가변 참조를 반환합니다. 없으면 빈 백을 만듭니다.
    pub fn properties_mut(&mut self) -> &mut Properties {
        self.properties.get_or_insert_with(Properties::new)
    }

    /// 호스트 JSON에서 이벤트를 파싱합니다.
    pub fn from_json(raw: &str) -> Result<Self, UserAgentError> {
        serde_json::from_str(raw).map_err(|e| EventError::Deserialize(e.to_string()).into())
    }

    /// 이벤트를 JSON 문자열로 직렬화합니다.
    pub fn to_json(&self) -> Result<String, UserAgentError> {
        serde_json::to_string(self).map_err(|e| EventError::Serialize(e.to_string()).into())
    }
}

impl fmt::Display for PluginEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id: String = self.uuid.as_deref().unwrap_or("-").chars().take(8).collect();
        write!(
            f,
            "PluginEvent[{}] {} distinct_id={} props={}",
            id,
            self.event,
            self.distinct_id,
            self.properties.as_ref().map_or(0, Map::len),
        )
    }
}
