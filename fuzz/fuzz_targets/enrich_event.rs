#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

use useragent_core::config::EnricherSettings;
use useragent_core::event::{PluginEvent, Properties};
use useragent_plugin::{RuleClassifier, enrich_event};

const DERIVED: [&str; 4] = ["$browser", "$browser_version", "$os", "$browser_type"];

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    enabled: bool,
    override_existing: bool,
    /// 조회 키에 넣을 값
    user_agent: FuzzUserAgent,
    /// 나머지 속성 (최대 16개로 제한)
    extra: Vec<(String, FuzzValue)>,
}

#[derive(Arbitrary, Debug)]
enum FuzzUserAgent {
    Missing,
    Primary(FuzzValue),
    Fallback(FuzzValue),
    Both(FuzzValue, FuzzValue),
}

#[derive(Arbitrary, Debug)]
enum FuzzValue {
    Null,
    Bool(bool),
    Number(i64),
    Text(String),
}

impl FuzzValue {
    fn to_value(&self) -> Value {
        match self {
            FuzzValue::Null => Value::Null,
            FuzzValue::Bool(b) => Value::Bool(*b),
            FuzzValue::Number(n) => Value::from(*n),
            FuzzValue::Text(s) => Value::String(s.clone()),
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let mut properties: Properties = input
        .extra
        .iter()
        .take(16)
        .map(|(k, v)| (k.clone(), v.to_value()))
        .collect();

    match &input.user_agent {
        FuzzUserAgent::Missing => {}
        FuzzUserAgent::Primary(v) => {
            properties.insert("$useragent".to_owned(), v.to_value());
        }
        FuzzUserAgent::Fallback(v) => {
            properties.insert("$user-agent".to_owned(), v.to_value());
        }
        FuzzUserAgent::Both(a, b) => {
            properties.insert("$useragent".to_owned(), a.to_value());
            properties.insert("$user-agent".to_owned(), b.to_value());
        }
    }

    let before = properties.clone();
    let mut event = PluginEvent::default().with_properties(properties);
    let settings = EnricherSettings {
        enabled: input.enabled,
        override_user_agent_details: input.override_existing,
    };
    let classifier = RuleClassifier::new().unwrap();

    let _ = enrich_event(&mut event, &settings, &classifier);
    let after = event.properties.unwrap();

    // 파생 키 외의 속성은 변하지 않음
    for (key, value) in before.iter().filter(|(k, _)| !DERIVED.contains(&k.as_str())) {
        assert_eq!(after.get(key), Some(value));
    }

    // 비활성화 또는 덮어쓰기 꺼짐이면 기존 값 유지
    if !input.enabled {
        assert_eq!(after, before);
    } else if !input.override_existing {
        for key in DERIVED {
            if let Some(value) = before.get(key) {
                assert_eq!(after.get(key), Some(value));
            }
        }
    }
});
