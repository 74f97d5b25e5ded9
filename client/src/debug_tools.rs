//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::{bridge::to_bevy_vec3, player::FirstPerson};

const GROUNDED_COLOR: Color = Color::srgb(0.2, 0.9, 0.3);
const AIRBORNE_COLOR: Color = Color::srgb(0.9, 0.2, 0.2);

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(PostUpdate, draw_ground_probe);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// Draw the ground probe sphere, green while it reports contact.
fn draw_ground_probe(mut gizmos: Gizmos, q: Query<&FirstPerson>) {
    for first_person in &q {
        let state = first_person.controller.state();
        let settings = first_person.controller.settings();

        let foot = to_bevy_vec3(state.foot_point(settings));
        let color = if state.is_grounded {
            GROUNDED_COLOR
        } else {
            AIRBORNE_COLOR
        };
        gizmos.sphere(Isometry3d::from_translation(foot), settings.ground_distance, color);
    }
}
