use crate::commands::{CmdMessage, CmdResult};
use crate::config::{Language, VitalsConfig};
use crate::error::{Result, VitalsError};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    SetLanguage(Language),
    SetUserId(String),
    SetApiKey(String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = VitalsConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            let value = match key.as_str() {
                "language" => config.language.to_string(),
                "user-id" => config.user_id.clone(),
                "api-key" => config
                    .api_key
                    .clone()
                    .unwrap_or_else(|| "<unset>".to_string()),
                other => {
                    return Err(VitalsError::Api(format!("Unknown config key: {}", other)));
                }
            };
            result.add_message(CmdMessage::info(format!("{} = {}", key, value)));
        }
        ConfigAction::SetLanguage(language) => {
            config.language = language;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("language = {}", language)));
        }
        ConfigAction::SetUserId(user_id) => {
            config.user_id = user_id;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("user-id = {}", config.user_id)));
        }
        ConfigAction::SetApiKey(api_key) => {
            config.api_key = Some(api_key);
            config.save(config_dir)?;
            result.add_message(CmdMessage::success("api-key updated"));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_language_persists() {
        let tmp = tempfile::tempdir().unwrap();

        run(tmp.path(), ConfigAction::SetLanguage(Language::Ar)).unwrap();

        let reloaded = VitalsConfig::load(tmp.path()).unwrap();
        assert_eq!(reloaded.language, Language::Ar);
    }

    #[test]
    fn show_all_returns_config_without_saving() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run(tmp.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(VitalsConfig::default()));
        assert!(!tmp.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run(tmp.path(), ConfigAction::ShowKey("theme".to_string()));
        assert!(matches!(err, Err(VitalsError::Api(_))));
    }
}
