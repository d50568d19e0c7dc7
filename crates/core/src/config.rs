//! 설정 관리 - 플래그 강제 변환, 호출별 설정, useragent.toml 파싱
//!
//! 호스트는 플러그인 설정을 문자열(`"true"`/`"false"`) 또는 불리언으로 넘깁니다.
//! [`ConfigFlag`]가 두 형태를 모두 받고, [`EnricherSettings::resolve`]가
//! 호출 경계에서 한 번만 두 개의 유효 불리언으로 변환합니다.
//!
//! # 설정 로딩 우선순위 (파일 설정)
//! 1. 환경변수 (`USERAGENT_PLUGIN_ENABLE=false` 형식)
//! 2. 설정 파일 (`useragent.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), useragent_core::error::UserAgentError> {
//! use useragent_core::config::{AppConfig, EnricherSettings};
//!
//! let config = AppConfig::load("useragent.toml").await?;
//! let settings = EnricherSettings::resolve(&config.plugin_meta());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, UserAgentError};

// ─── ConfigFlag ──────────────────────────────────────────────────────

/// 불리언 또는 문자열로 전달되는 설정 플래그
///
/// 정확히 `"true"`인 문자열만 참입니다 (대소문자 구분).
/// 그 밖의 문자열, 숫자, null 등은 모두 거짓으로 취급합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigFlag {
    /// 네이티브 불리언
    Bool(bool),
    /// 문자열 리터럴
    Text(String),
    /// 그 밖의 JSON 값
    Other(serde_json::Value),
}

impl ConfigFlag {
    /// 유효 불리언 값으로 변환합니다.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => s == "true",
            Self::Other(_) => false,
        }
    }
}

impl From<bool> for ConfigFlag {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ConfigFlag {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

// ─── 호출별 설정 ─────────────────────────────────────────────────────

/// 호스트가 이벤트마다 전달하는 플러그인 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// 마스터 스위치
    #[serde(default = "default_enable")]
    pub enable: ConfigFlag,
    /// 기존 속성 덮어쓰기 여부
    #[serde(
        default = "default_override",
        alias = "override_user_agent_details"
    )]
    pub override_user_agent_details: ConfigFlag,
}

fn default_enable() -> ConfigFlag {
    ConfigFlag::from("true")
}

fn default_override() -> ConfigFlag {
    ConfigFlag::from("false")
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            override_user_agent_details: default_override(),
        }
    }
}

/// 호스트 전역 상태에 보관되는 덮어쓰기 플래그
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginGlobal {
    /// 참이면 문자열 설정과 무관하게 덮어쓰기를 강제합니다.
    #[serde(default, alias = "override_user_agent_details")]
    pub override_user_agent_details: bool,
}

impl PluginGlobal {
    /// 호스트의 플러그인 setup 단계가 문자열 설정에서 유도하는 전역 상태
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            override_user_agent_details: config.override_user_agent_details.is_enabled(),
        }
    }
}

/// 호출별 설정 묶음 (config + global)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginMeta {
    #[serde(default)]
    pub config: PluginConfig,
    #[serde(default)]
    pub global: PluginGlobal,
}

impl PluginMeta {
    /// setup 단계를 거친 것처럼 global을 config에서 유도합니다.
    pub fn from_config(config: PluginConfig) -> Self {
        let global = PluginGlobal::from_config(&config);
        Self { config, global }
    }
}

/// 변환기가 실제로 사용하는 두 개의 유효 불리언
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnricherSettings {
    pub enabled: bool,
    pub override_user_agent_details: bool,
}

impl EnricherSettings {
    /// 호출별 설정을 유효 불리언으로 변환합니다.
    ///
    /// 덮어쓰기 = global 플래그 OR 문자열 설정 플래그.
    pub fn resolve(meta: &PluginMeta) -> Self {
        Self {
            enabled: meta.config.enable.is_enabled(),
            override_user_agent_details: meta.global.override_user_agent_details
                || meta.config.override_user_agent_details.is_enabled(),
        }
    }
}

// ─── 파일 설정 ───────────────────────────────────────────────────────

/// useragent 통합 설정
///
/// `useragent.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 플러그인 설정
    #[serde(default)]
    pub useragent: UserAgentSection,
}

impl AppConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, UserAgentError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, UserAgentError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                UserAgentError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                UserAgentError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, UserAgentError> {
        toml::from_str(toml_str).map_err(|e| {
            UserAgentError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `USERAGENT_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "USERAGENT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "USERAGENT_GENERAL_LOG_FORMAT");

        override_flag(&mut self.useragent.enable, "USERAGENT_PLUGIN_ENABLE");
        override_flag(
            &mut self.useragent.override_user_agent_details,
            "USERAGENT_PLUGIN_OVERRIDE_USER_AGENT_DETAILS",
        );
        override_bool(
            &mut self.useragent.global_override,
            "USERAGENT_PLUGIN_GLOBAL_OVERRIDE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), UserAgentError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        Ok(())
    }

    /// 파일 설정을 호출별 설정 묶음으로 변환합니다.
    pub fn plugin_meta(&self) -> PluginMeta {
        PluginMeta {
            config: PluginConfig {
                enable: self.useragent.enable.clone(),
                override_user_agent_details: self.useragent.override_user_agent_details.clone(),
            },
            global: PluginGlobal {
                override_user_agent_details: self.useragent.global_override,
            },
        }
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// `[useragent]` 섹션
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAgentSection {
    /// 마스터 스위치 (`"true"`/`"false"` 또는 불리언)
    pub enable: ConfigFlag,
    /// 기존 속성 덮어쓰기 여부 (`"true"`/`"false"` 또는 불리언)
    pub override_user_agent_details: ConfigFlag,
    /// 전역 덮어쓰기 강제
    pub global_override: bool,
}

impl Default for UserAgentSection {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            override_user_agent_details: default_override(),
            global_override: false,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

// 문자열 그대로 보관합니다. 강제 변환은 resolve 시점에 한 번만 수행합니다.
fn override_flag(target: &mut ConfigFlag, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = ConfigFlag::Text(val);
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn flag_coercion() {
        assert!(ConfigFlag::Bool(true).is_enabled());
        assert!(!ConfigFlag::Bool(false).is_enabled());
        assert!(ConfigFlag::from("true").is_enabled());
        assert!(!ConfigFlag::from("false").is_enabled());
        // 대소문자 구분
        assert!(!ConfigFlag::from("TRUE").is_enabled());
        assert!(!ConfigFlag::from("True").is_enabled());
        assert!(!ConfigFlag::from("1").is_enabled());
        assert!(!ConfigFlag::from("").is_enabled());
        assert!(!ConfigFlag::from(" true").is_enabled());
        assert!(!ConfigFlag::Other(serde_json::json!(1)).is_enabled());
        assert!(!ConfigFlag::Other(serde_json::Value::Null).is_enabled());
    }

    #[test]
    fn flag_deserializes_from_bool_string_and_other() {
        let flags: Vec<ConfigFlag> =
            serde_json::from_str(r#"[true, "true", "yes", 1, null]"#).unwrap();
        assert_eq!(flags[0], ConfigFlag::Bool(true));
        assert_eq!(flags[1], ConfigFlag::Text("true".to_owned()));
        assert_eq!(flags[2], ConfigFlag::Text("yes".to_owned()));
        assert!(matches!(flags[3], ConfigFlag::Other(_)));
        assert!(matches!(flags[4], ConfigFlag::Other(_)));
    }

    #[test]
    fn plugin_config_from_host_json() {
        let config: PluginConfig =
            serde_json::from_str(r#"{"enable":"true","overrideUserAgentDetails":"false"}"#)
                .unwrap();
        assert!(config.enable.is_enabled());
        assert!(!config.override_user_agent_details.is_enabled());
    }

    #[test]
    fn plugin_config_defaults_when_fields_missing() {
        let config: PluginConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PluginConfig::default());
        assert!(config.enable.is_enabled());
        assert!(!config.override_user_agent_details.is_enabled());
    }

    #[test]
    fn resolve_override_is_disjunction() {
        let cases = [
            (false, "false", false),
            (false, "true", true),
            (true, "false", true),
            (true, "true", true),
        ];
        for (global, config, expected) in cases {
            let meta = PluginMeta {
                config: PluginConfig {
                    enable: ConfigFlag::from("true"),
                    override_user_agent_details: ConfigFlag::from(config),
                },
                global: PluginGlobal {
                    override_user_agent_details: global,
                },
            };
            assert_eq!(
                EnricherSettings::resolve(&meta).override_user_agent_details,
                expected,
                "global={global} config={config}"
            );
        }
    }

    #[test]
    fn resolve_enabled_follows_config_only() {
        let meta = PluginMeta {
            config: PluginConfig {
                enable: ConfigFlag::from("false"),
                override_user_agent_details: ConfigFlag::Bool(true),
            },
            global: PluginGlobal {
                override_user_agent_details: true,
            },
        };
        let settings = EnricherSettings::resolve(&meta);
        assert!(!settings.enabled);
        assert!(settings.override_user_agent_details);
    }

    #[test]
    fn plugin_meta_from_config_derives_global() {
        let meta = PluginMeta::from_config(PluginConfig {
            enable: ConfigFlag::Bool(true),
            override_user_agent_details: ConfigFlag::from("true"),
        });
        assert!(meta.global.override_user_agent_details);
    }

    #[test]
    fn default_config_passes_validation() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert!(config.useragent.enable.is_enabled());
        assert!(!config.useragent.global_override);
    }

    #[test]
    fn from_str_accepts_bool_and_string_flags() {
        let toml = r#"
[useragent]
enable = true
override_user_agent_details = "true"
"#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.useragent.enable, ConfigFlag::Bool(true));
        let settings = EnricherSettings::resolve(&config.plugin_meta());
        assert!(settings.enabled);
        assert!(settings.override_user_agent_details);
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = AppConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            UserAgentError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = AppConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = AppConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    #[serial]
    fn env_override_flag_keeps_raw_string() {
        let mut flag = ConfigFlag::Bool(true);
        // SAFETY: serial 테스트에서만 환경변수를 조작합니다.
        unsafe { std::env::set_var("TEST_USERAGENT_FLAG", "False") };
        override_flag(&mut flag, "TEST_USERAGENT_FLAG");
        assert_eq!(flag, ConfigFlag::Text("False".to_owned()));
        assert!(!flag.is_enabled());
        unsafe { std::env::remove_var("TEST_USERAGENT_FLAG") };
    }

    #[test]
    #[serial]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = false;
        // SAFETY: serial 테스트에서만 환경변수를 조작합니다.
        unsafe { std::env::set_var("TEST_USERAGENT_BOOL_BAD", "not-a-bool") };
        override_bool(&mut val, "TEST_USERAGENT_BOOL_BAD");
        assert!(!val);
        unsafe { std::env::remove_var("TEST_USERAGENT_BOOL_BAD") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_USERAGENT_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.useragent.enable, parsed.useragent.enable);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = AppConfig::from_file("/nonexistent/path/useragent.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UserAgentError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
