//! 호스트가 호출하는 처리기
//!
//! [`UserAgentPlugin`]은 core의 [`EventProcessor`] trait을 구현합니다.
//! 호출마다 설정을 한 번 해석하고, 변환 결과에 따라 메트릭을 기록한 뒤
//! 같은 이벤트를 돌려줍니다.
//!
//! # 사용 예시
//! ```ignore
//! use useragent_core::config::{PluginConfig, PluginMeta};
//! use useragent_core::pipeline::EventProcessor;
//! use useragent_plugin::UserAgentPlugin;
//!
//! let plugin = UserAgentPlugin::new()?;
//! let meta = PluginMeta::from_config(PluginConfig::default());
//! let event = plugin.process_event(event, &meta);
//! ```

use metrics::counter;

use useragent_core::config::{EnricherSettings, PluginMeta};
use useragent_core::error::ClassifierError;
use useragent_core::event::PluginEvent;
use useragent_core::metrics::{
    EVENTS_ENRICHED_TOTAL, EVENTS_PROCESSED_TOTAL, EVENTS_SKIPPED_TOTAL, LABEL_CLASSIFIER,
    LABEL_REASON, PROPERTIES_WRITTEN_TOTAL,
};
use useragent_core::pipeline::{EventProcessor, UserAgentClassifier};

use crate::classifier::RuleClassifier;
use crate::enricher::{EnrichOutcome, enrich_event};

/// 처리기 이름
pub const PLUGIN_NAME: &str = "useragent-plugin";

/// user-agent 변환 처리기
///
/// 상태가 없으므로 여러 스레드에서 동시에 호출해도 안전합니다.
pub struct UserAgentPlugin {
    classifier: Box<dyn UserAgentClassifier>,
}

impl UserAgentPlugin {
    /// 기본 규칙 테이블 분류기로 처리기를 생성합니다.
    pub fn new() -> Result<Self, ClassifierError> {
        Ok(Self::with_classifier(Box::new(RuleClassifier::new()?)))
    }

    /// 다른 분류기를 주입합니다.
    pub fn with_classifier(classifier: Box<dyn UserAgentClassifier>) -> Self {
        Self { classifier }
    }

    /// 사용 중인 분류기 이름
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// 이미 해석된 설정으로 이벤트를 변환합니다.
    pub fn enrich(&self, mut event: PluginEvent, settings: &EnricherSettings) -> PluginEvent {
        let outcome = enrich_event(&mut event, settings, self.classifier.as_ref());
        self.record(&outcome);
        event
    }

    fn record(&self, outcome: &EnrichOutcome) {
        counter!(EVENTS_PROCESSED_TOTAL).increment(1);
        if let Some(reason) = outcome.skip_reason() {
            counter!(EVENTS_SKIPPED_TOTAL, LABEL_REASON => reason).increment(1);
        } else if let EnrichOutcome::Enriched { written } = outcome {
            counter!(
                EVENTS_ENRICHED_TOTAL,
                LABEL_CLASSIFIER => self.classifier.name().to_owned()
            )
            .increment(1);
            counter!(PROPERTIES_WRITTEN_TOTAL).increment(*written as u64);
        }
    }
}

impl EventProcessor for UserAgentPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn process_event(&self, event: PluginEvent, meta: &PluginMeta) -> PluginEvent {
        let settings = EnricherSettings::resolve(meta);
        self.enrich(event, &settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use useragent_core::config::{ConfigFlag, PluginConfig, PluginGlobal};
    use useragent_core::types::Classification;

    struct NeverClassifier;

    impl UserAgentClassifier for NeverClassifier {
        fn name(&self) -> &str {
            "never"
        }

        fn classify(&self, _user_agent: &str) -> Classification {
            Classification::empty()
        }
    }

    fn meta(enable: &str, override_details: &str, global: bool) -> PluginMeta {
        PluginMeta {
            config: PluginConfig {
                enable: ConfigFlag::from(enable),
                override_user_agent_details: ConfigFlag::from(override_details),
            },
            global: PluginGlobal {
                override_user_agent_details: global,
            },
        }
    }

    #[test]
    fn default_plugin_uses_rule_table() {
        let plugin = UserAgentPlugin::new().unwrap();
        assert_eq!(plugin.classifier_name(), "rule-table");
        assert_eq!(EventProcessor::name(&plugin), PLUGIN_NAME);
    }

    #[test]
    fn global_override_forces_overwrite() {
        let plugin = UserAgentPlugin::new().unwrap();
        let event = PluginEvent::new("$pageview", "u1").with_properties(
            json!({
                "$browser": "stale",
                "$useragent": "Mozilla/5.0 (X11; Linux x86_64; rv:95.0) Gecko/20100101 Firefox/95.0"
            })
            .as_object()
            .cloned()
            .unwrap(),
        );
        let out = plugin.process_event(event, &meta("true", "false", true));
        assert_eq!(out.property("$browser"), Some(&json!("firefox")));
    }

    #[test]
    fn string_enable_other_than_true_disables() {
        let plugin = UserAgentPlugin::new().unwrap();
        let props = json!({"$useragent": "curl/7.64.1"}).as_object().cloned().unwrap();
        let event = PluginEvent::new("$pageview", "u1").with_properties(props.clone());
        let out = plugin.process_event(event, &meta("TRUE", "true", false));
        assert_eq!(out.properties, Some(props));
    }

    #[test]
    fn injected_classifier_is_used() {
        let plugin = UserAgentPlugin::with_classifier(Box::new(NeverClassifier));
        assert_eq!(plugin.classifier_name(), "never");
        let props = json!({"$useragent": "anything"}).as_object().cloned().unwrap();
        let event = PluginEvent::default().with_properties(props.clone());
        let out = plugin.process_event(event, &meta("true", "true", false));
        assert_eq!(out.properties, Some(props));
    }

    #[test]
    fn plugin_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UserAgentPlugin>();
    }
}
