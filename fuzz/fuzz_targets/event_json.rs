#![no_main]

use libfuzzer_sys::fuzz_target;

use useragent_core::config::{PluginConfig, PluginMeta};
use useragent_core::event::PluginEvent;
use useragent_core::pipeline::EventProcessor;
use useragent_plugin::UserAgentPlugin;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    // 파싱 실패는 Err로 반환되어야 하며 패닉은 허용되지 않음
    let Ok(event) = PluginEvent::from_json(raw) else {
        return;
    };

    let plugin = UserAgentPlugin::new().unwrap();
    let meta = PluginMeta::from_config(PluginConfig::default());
    let processed = plugin.process_event(event, &meta);

    // 변환 결과는 항상 다시 직렬화 가능
    let _ = processed.to_json().unwrap();
});
