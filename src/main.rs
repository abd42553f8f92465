//! AR Gesture Replay.
//!
//! Spielt ein Gesten-Skript gegen eine simulierte Boden-Ebene und einen
//! In-Memory-Anker-Store ab und protokolliert den resultierenden Szenengraph.
//!
//! Aufruf: `ar-gesture-replay [skript.json] [optionen.toml]`

use std::path::PathBuf;

use ar_object_placement::core::NodeKind;
use ar_object_placement::sim::{
    DetectedPlane, GestureScript, InMemoryAnchorStore, PlaneSurfaceQuery, ScriptedGestureSource,
};
use ar_object_placement::{InteractionController, InteractionOptions, InteractionState, ViewContext};
use glam::{Vec2, Vec3};

/// Bildschirmgröße des simulierten Geräts (Pixel, Hochformat)
const VIEWPORT: Vec2 = Vec2::new(1080.0, 1920.0);
/// Vertikales Sichtfeld der simulierten Kamera
const VERTICAL_FOV_DEGREES: f32 = 60.0;
/// Halbe Kantenlänge der simulierten Boden-Ebene (Meter)
const FLOOR_HALF_EXTENT: f32 = 5.0;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("AR Gesture Replay v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let script_path = args.next().map(PathBuf::from);
    let options_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(InteractionOptions::config_path);

    let options = InteractionOptions::load_from_file(&options_path);
    let script = match &script_path {
        Some(path) => GestureScript::load_from_file(path)?,
        None => {
            log::info!("Kein Skript angegeben, verwende eingebautes Demo-Skript");
            GestureScript::builtin(VIEWPORT)
        }
    };

    replay(&script, options)
}

fn replay(script: &GestureScript, options: InteractionOptions) -> anyhow::Result<()> {
    let surface = PlaneSurfaceQuery::new(VIEWPORT, VERTICAL_FOV_DEGREES).with_plane(
        DetectedPlane::floor(Vec3::ZERO, Vec2::splat(FLOOR_HALF_EXTENT)),
    );
    let mut controller = InteractionController::from_options(
        Box::new(surface),
        Some(Box::new(InMemoryAnchorStore::new())),
        &options,
    );
    let screen_dpi = options.screen_dpi;
    let mut state = InteractionState::with_options(options);
    let mut source = ScriptedGestureSource::from_script(script);

    let mut camera = script.initial_camera;
    let mut event_count = 0;
    for tick in &script.ticks {
        if let Some(pose) = tick.camera {
            camera = pose;
        }
        let view = ViewContext::new(camera, screen_dpi);
        event_count += controller.poll_source(&mut state, &view, &mut source);
        controller.sync_anchors(&mut state);
    }

    log::info!(
        "{} Ticks, {} Events, {} Commands abgespielt ({} Platzierungs-Taps)",
        script.ticks.len(),
        event_count,
        state.command_log.len(),
        state.command_log.placement_attempts()
    );
    log_scene(&state);
    Ok(())
}

fn log_scene(state: &InteractionState) {
    log::info!(
        "Szene: {} Knoten, {} Platzierungen, selektiert: {}",
        state.scene.len(),
        state.placements.len(),
        state
            .selected_object()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
    );

    for node in state.scene.iter() {
        let kind = match &node.kind {
            NodeKind::Anchor(handle) => format!("Anker {}", handle),
            NodeKind::InteractionWrapper { prefab } => format!("Wrapper '{}'", prefab),
            NodeKind::VisualModel { prefab } => format!("Modell '{}'", prefab),
            NodeKind::SelectionIndicator => "Selektions-Indikator".to_string(),
        };
        let parent = node
            .parent
            .map(|p| p.to_string())
            .unwrap_or_else(|| "Welt".to_string());
        let world = state.scene.world_position(node.id).unwrap_or(Vec3::ZERO);
        log::info!(
            "  {} {} (Eltern: {}, aktiv: {}) Welt=({:.3}, {:.3}, {:.3})",
            node.id,
            kind,
            parent,
            node.active,
            world.x,
            world.y,
            world.z
        );
    }

    for interactable in state.interactables.values() {
        log::info!(
            "  {} selektiert={} Elevation={:.3} Commands={}",
            interactable.selection.object(),
            interactable.selection.is_selected(),
            interactable.selection.scaled_elevation(),
            state
                .command_log
                .for_object(interactable.selection.object())
                .count()
        );
    }
}
