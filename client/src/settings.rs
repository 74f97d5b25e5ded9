use std::path::{Path, PathBuf};

use bevy::prelude::*;
use fps_controller::ControllerSettings;

/// Where controller tuning is read from, relative to the asset root.
const SETTINGS_PATH: &str = "assets/controller.ron";

/// Validated controller tuning shared by every system that needs it.
#[derive(Resource, Debug, Clone, Default)]
pub struct ControllerConfig(pub ControllerSettings);

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ControllerConfig(load_settings(&settings_path())));
}

/// Resolve [`SETTINGS_PATH`] the way Bevy's `AssetPlugin` resolves `assets/`: against
/// `BEVY_ASSET_ROOT`, then `CARGO_MANIFEST_DIR`, then the executable's directory.
fn settings_path() -> PathBuf {
    bevy::asset::io::file::FileAssetReader::get_base_path().join(SETTINGS_PATH)
}

/// Read settings from `path`, falling back to defaults when the file is missing or invalid.
fn load_settings(path: &Path) -> ControllerSettings {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            log::warn!(
                "could not read {}: {err}; using default controller settings",
                path.display()
            );
            return ControllerSettings::default();
        }
    };

    match ControllerSettings::from_ron_str(&source) {
        Ok(settings) => {
            log::info!("loaded controller settings from {}", path.display());
            settings
        }
        Err(err) => {
            log::warn!("{}: {err}; using default controller settings", path.display());
            ControllerSettings::default()
        }
    }
}
