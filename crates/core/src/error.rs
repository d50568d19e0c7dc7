//! 에러 타입 - 도메인별 에러 정의
//!
//! 이벤트 단위 처리 경로(`EventProcessor::process_event`)는 에러를 반환하지 않습니다.
//! 아래 에러는 설정 로딩, 분류기 생성, 이벤트 (역)직렬화처럼
//! 호스트 쪽 경계에서만 발생합니다.

/// useragent 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum UserAgentError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 분류기 생성 에러
    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// 이벤트 (역)직렬화 에러
    #[error("event error: {0}")]
    Event(#[from] EventError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 분류기 에러
///
/// 규칙 테이블 컴파일 시점에만 발생합니다. 분류 자체는 실패하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// 규칙 정규식 컴파일 실패
    #[error("failed to compile rule '{rule}': {reason}")]
    RuleCompile { rule: String, reason: String },
}

/// 이벤트 직렬화 에러
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// JSON → 이벤트 변환 실패
    #[error("failed to deserialize event: {0}")]
    Deserialize(String),

    /// 이벤트 → JSON 변환 실패
    #[error("failed to serialize event: {0}")]
    Serialize(String),
}
