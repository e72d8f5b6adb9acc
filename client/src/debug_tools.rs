//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (recommended: `#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use crate::ghost::{GhostView, ReplicatedGhost};
use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

const GHOST_REPORT_SECS: f32 = 5.0;

#[derive(Resource)]
struct GhostReportTimer(Timer);

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));
    app.insert_resource(GhostReportTimer(Timer::from_seconds(
        GHOST_REPORT_SECS,
        TimerMode::Repeating,
    )));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, report_ghosts);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// Logs flagged ghosts against ghosts actually presented, which should always match.
fn report_ghosts(
    time: Res<Time>,
    mut timer: ResMut<GhostReportTimer>,
    structures: Query<(&ReplicatedGhost, Option<&GhostView>)>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let flagged = structures.iter().filter(|(flag, _)| flag.0).count();
    let presented = structures
        .iter()
        .filter(|(_, view)| view.is_some_and(|view| view.is_ghosted()))
        .count();
    let total = structures.iter().count();
    debug!("ghosts: {flagged} flagged, {presented} presented, {total} total");
}
