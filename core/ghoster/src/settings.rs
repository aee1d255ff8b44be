use crate::appearance::Appearance;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SettingsError {
    #[error("Unable to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Setting \"{field}\" must not be empty")]
    EmptyName {
        field: &'static str
    },
}

/// Names used for scene objects and attributes, plus the starting look of ghosts
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GhosterSettings {
    pub group_name: String,
    pub frame_attr: String,
    pub source_attr: String,
    pub appearance: Appearance,
}

impl Default for GhosterSettings {
    fn default() -> GhosterSettings {
        GhosterSettings {
            group_name: String::from("ghost_grp"),
            frame_attr: String::from("frame"),
            source_attr: String::from("src"),
            appearance: Appearance::default(),
        }
    }
}

impl GhosterSettings {
    pub fn from_json(json: &str) -> Result<GhosterSettings, SettingsError> {
        let settings: GhosterSettings = serde_json::from_str(json)?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn from_file<T>(path: T) -> Result<GhosterSettings, SettingsError> where T: AsRef<Path> {
        let path = path.as_ref();
        log::info!("Loading settings from \"{}\"", path.display());

        let json = std::fs::read_to_string(path)?;
        GhosterSettings::from_json(&json)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let names = [
            ("group_name", &self.group_name),
            ("frame_attr", &self.frame_attr),
            ("source_attr", &self.source_attr),
        ];

        match names.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(SettingsError::EmptyName { field: *field }),
            None => Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::Rgb;

    #[test]
    fn empty_json_uses_defaults() {
        let settings = GhosterSettings::from_json("{}").unwrap();
        assert_eq!(settings, GhosterSettings::default());
        assert_eq!(settings.group_name, "ghost_grp");
        assert_eq!(settings.appearance.transparency_range, 100.0);
    }

    #[test]
    fn partial_appearance_keeps_other_defaults() {
        let settings = GhosterSettings::from_json(r#"{
            "group_name": "onion_grp",
            "appearance": { "color": { "r": 1.0, "g": 0.5, "b": 0.0 } }
        }"#).unwrap();

        assert_eq!(settings.group_name, "onion_grp");
        assert_eq!(settings.frame_attr, "frame");
        assert_eq!(settings.appearance.color, Rgb::new(1.0, 0.5, 0.0));
        assert_eq!(settings.appearance.transparency_offset, 0.0);
    }

    #[test]
    fn empty_names_are_rejected() {
        let result = GhosterSettings::from_json(r#"{ "frame_attr": "" }"#);
        assert!(matches!(result, Err(SettingsError::EmptyName { field: "frame_attr" })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(GhosterSettings::from_json("{"), Err(SettingsError::Parse(_))));
    }
}
