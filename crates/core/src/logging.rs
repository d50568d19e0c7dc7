//! 로깅 초기화
//!
//! `[general]` 섹션의 `log_level`, `log_format`에 따라
//! `tracing-subscriber`를 설정합니다. JSON 구조화 로그와
//! 사람이 읽기 쉬운 pretty 형식을 지원합니다.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::GeneralConfig;
use crate::error::ConfigError;

/// 전역 tracing subscriber를 초기화합니다.
///
/// 프로세스당 한 번만 성공합니다. `RUST_LOG`가 설정되어 있으면
/// `log_level`보다 우선합니다.
///
/// # 형식
///
/// * `"json"` - JSON lines (운영 기본값)
/// * `"pretty"` - 개발용 컬러 출력
pub fn init_tracing(config: &GeneralConfig) -> Result<(), ConfigError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let result = match config.log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "pretty" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        other => {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("unknown log format '{other}', expected 'json' or 'pretty'"),
            });
        }
    };

    result.map_err(|e| ConfigError::InvalidValue {
        field: "general.log_format".to_owned(),
        reason: format!("failed to initialize tracing subscriber: {e}"),
    })
}
