//! Centralized tunables with TOML preset support.
//!
//! Camera, navigation, island layout, ambient motion and keybindings are
//! consolidated here. Options serialize to/from TOML so a preset file can
//! override any subset of them.

mod ambient;
mod camera;
mod navigation;
mod scene;

use std::path::Path;

pub use ambient::AmbientOptions;
pub use camera::CameraOptions;
pub use navigation::NavigationOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::IsleError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[navigation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit control parameters.
    pub camera: CameraOptions,
    /// Timeline flight framing and timing.
    pub navigation: NavigationOptions,
    /// Island layout parameters.
    pub scene: SceneOptions,
    /// Ambient motion parameters.
    pub ambient: AmbientOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, IsleError> {
        toml::from_str(content)
            .map_err(|e| IsleError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, IsleError> {
        let content = std::fs::read_to_string(path).map_err(IsleError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), IsleError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| IsleError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(IsleError::Io)?;
        }
        std::fs::write(path, content).map_err(IsleError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::IsleCommand;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[navigation]
camera_distance = 20.0
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.navigation.camera_distance, 20.0);
        assert_eq!(opts.navigation.camera_height, 10.0);
        assert_eq!(opts.navigation.flight_duration_ms, 1000);
        assert_eq!(opts.scene.ring_radius, 12.0);
        assert_eq!(opts.camera.min_distance, 10.0);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[navigation\n").unwrap_err();
        assert!(matches!(err, IsleError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("ArrowRight"), Some(IsleCommand::Next));
        assert_eq!(opts.keybindings.lookup("KeyA"), Some(IsleCommand::Prev));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join(format!(
            "isle-options-{}",
            std::process::id()
        ));
        let path = dir.join("windy.toml");
        let mut opts = Options::default();
        opts.ambient.water_sway_amplitude = 0.1;
        opts.scene.seed = Some(9);
        opts.save(&path).unwrap();

        assert_eq!(Options::load(&path).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir), vec!["windy".to_owned()]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("navigation"));
        assert!(props.contains_key("scene"));
        assert!(props.contains_key("ambient"));
        assert!(!props.contains_key("keybindings"));

        let navigation = &props["navigation"]["properties"];
        assert!(navigation.get("camera_distance").is_some());
        assert!(navigation.get("flight_duration_ms").is_none());
    }
}
