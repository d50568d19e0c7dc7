//! useragent-core - user-agent 변환기 공통 타입
//!
//! 호스트 이벤트 모델, 호출별 설정과 플래그 강제 변환, 분류 결과 타입,
//! 확장 trait, 에러, 메트릭 이름, 로깅 초기화를 제공합니다.
//!
//! # 호스트 연결 예시
//!
//! 프로세스 시작 시 로깅과 메트릭 설명을 한 번 등록한 뒤,
//! 이벤트마다 처리기를 호출합니다.
//!
//! ```ignore
//! use useragent_core::config::AppConfig;
//! use useragent_core::logging::init_tracing;
//! use useragent_core::metrics::describe_metrics;
//! use useragent_core::pipeline::EventProcessor;
//! use useragent_plugin::UserAgentPlugin;
//!
//! let config = AppConfig::load("useragent.toml").await?;
//! init_tracing(&config.general)?;
//! // metrics 레코더(예: Prometheus exporter)를 설치한 직후
//! describe_metrics();
//!
//! let plugin = UserAgentPlugin::new()?;
//! let meta = config.plugin_meta();
//! let event = plugin.process_event(event, &meta);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ClassifierError, ConfigError, EventError, UserAgentError};

// 설정
pub use config::{AppConfig, ConfigFlag, EnricherSettings, PluginConfig, PluginGlobal, PluginMeta};

// 이벤트
pub use event::{PluginEvent, Properties};

// 파이프라인 trait
pub use pipeline::{EventProcessor, UserAgentClassifier};

// 도메인 타입
pub use types::{BrowserType, Classification};
