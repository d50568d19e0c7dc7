//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 레코더가 설치되지 않았으면 기록은 아무 동작도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `useragent_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(useragent_core::metrics::EVENTS_PROCESSED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 건너뛴 사유 레이블 키 (disabled, missing_user_agent, empty_user_agent, unclassified, already_present)
pub const LABEL_REASON: &str = "reason";

/// 분류기 레이블 키
pub const LABEL_CLASSIFIER: &str = "classifier";

// ─── 레이블 값 상수 ────────────────────────────────────────────────

pub const REASON_DISABLED: &str = "disabled";
pub const REASON_MISSING_USER_AGENT: &str = "missing_user_agent";
pub const REASON_EMPTY_USER_AGENT: &str = "empty_user_agent";
pub const REASON_UNCLASSIFIED: &str = "unclassified";
pub const REASON_ALREADY_PRESENT: &str = "already_present";

// ─── 메트릭 이름 ───────────────────────────────────────────────────

/// 처리된 전체 이벤트 수 (counter)
pub const EVENTS_PROCESSED_TOTAL: &str = "useragent_events_processed_total";

/// 파생 속성이 하나 이상 기록된 이벤트 수 (counter, label: classifier)
pub const EVENTS_ENRICHED_TOTAL: &str = "useragent_events_enriched_total";

/// 변경 없이 통과한 이벤트 수 (counter, label: reason)
pub const EVENTS_SKIPPED_TOTAL: &str = "useragent_events_skipped_total";

/// 기록된 파생 속성 수 (counter)
pub const PROPERTIES_WRITTEN_TOTAL: &str = "useragent_properties_written_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더 설치 직후 한 번 호출합니다.
pub fn describe_metrics() {
    metrics::describe_counter!(EVENTS_PROCESSED_TOTAL, "Total number of events processed");
    metrics::describe_counter!(
        EVENTS_ENRICHED_TOTAL,
        "Number of events that received at least one derived property"
    );
    metrics::describe_counter!(
        EVENTS_SKIPPED_TOTAL,
        "Number of events passed through unchanged, by reason"
    );
    metrics::describe_counter!(
        PROPERTIES_WRITTEN_TOTAL,
        "Number of derived properties written into event property bags"
    );
}
