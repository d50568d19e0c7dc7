//! useragent-plugin - user-agent 기반 이벤트 속성 보강
//!
//! # 모듈 구성
//!
//! - [`classifier`]: 규칙 테이블 기반 분류기 (브라우저 / OS / 봇 판별)
//! - [`enricher`]: user-agent 조회, 분류 결과 병합, 덮어쓰기 정책
//! - [`plugin`]: 호스트가 이벤트마다 호출하는 처리기 (EventProcessor 구현)
//!
//! # 흐름
//!
//! ```text
//! PluginEvent + PluginMeta -> EnricherSettings::resolve -> enrich_event -> PluginEvent
//!                                                              |
//!                                                        RuleClassifier
//! ```

pub mod classifier;
pub mod enricher;
pub mod plugin;

// --- 주요 타입 re-export ---

pub use classifier::RuleClassifier;
pub use enricher::{EnrichOutcome, enrich_event, find_user_agent, merge_classification};
pub use plugin::UserAgentPlugin;
