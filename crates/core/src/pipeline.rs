//! 파이프라인 trait - 확장 포인트 정의

use crate::config::PluginMeta;
use crate::event::PluginEvent;
use crate::types::Classification;

/// user-agent 분류기 trait
///
/// 새로운 분류 라이브러리를 붙이려면 이 trait을 구현합니다.
/// 같은 입력에는 항상 같은 결과를 반환해야 하며, 잘못된 입력에도
/// 패닉 없이 [`Classification::empty()`] 또는 부분 결과를 반환합니다.
pub trait UserAgentClassifier: Send + Sync {
    /// 분류기 이름
    fn name(&self) -> &str;

    /// 원시 user-agent 문자열을 분류합니다.
    fn classify(&self, user_agent: &str) -> Classification;
}

/// 호스트가 이벤트마다 호출하는 처리기 trait
///
/// 이벤트 하나를 받아 (수정되었거나 그대로인) 같은 이벤트를 돌려줍니다.
/// 실패 경로가 없으므로 `Result`를 반환하지 않습니다.
pub trait EventProcessor: Send + Sync {
    /// 처리기 이름
    fn name(&self) -> &str;

    /// 이벤트를 처리합니다.
    fn process_event(&self, event: PluginEvent, meta: &PluginMeta) -> PluginEvent;
}
