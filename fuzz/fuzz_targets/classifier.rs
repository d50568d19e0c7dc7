#![no_main]

use libfuzzer_sys::fuzz_target;

use useragent_core::pipeline::UserAgentClassifier;
use useragent_plugin::RuleClassifier;

fuzz_target!(|data: &[u8]| {
    let Ok(ua) = std::str::from_utf8(data) else {
        return;
    };

    // 규칙 테이블은 항상 컴파일되어야 함
    let classifier = RuleClassifier::new().unwrap();
    let result = classifier.classify(ua);

    // 검색 봇 분류는 유형 외 필드를 채우지 않음
    if result.browser_type == Some(useragent_core::types::BrowserType::Bot) {
        assert!(result.browser.is_none());
        assert!(result.browser_version.is_none());
        assert!(result.os.is_none());
    }

    // 버전은 항상 세 자리
    if let Some(version) = &result.browser_version {
        assert_eq!(version.split('.').count(), 3);
    }
});
