//! 无窗口特效演示
//!
//! 构建一棵小帧树，产生几种特效，步进、录制渲染命令并做一次存读档。

use game_engine_sfx::config::EngineConfig;
use game_engine_sfx::core::{init_logging, SfxResult};
use game_engine_sfx::render::CommandRecorder;
use game_engine_sfx::scene::{Body, FrameGraph};
use game_engine_sfx::sfx::{
    render_all, serialize_tree, time_step_all, unserialize_tree, BinaryReader, BinaryWriter,
    SfxResources, SfxService, SfxType,
};
use glam::{DQuat, DVec3};
use std::io::Cursor;

const TICK: f32 = 1.0 / 60.0;

fn run(config: &EngineConfig) -> SfxResult<()> {
    let sfx_config = &config.sfx;
    let mut rng = rand::thread_rng();

    let mut frames = FrameGraph::new("system");
    let root = frames.root();
    let planet = frames.add_child(root, "planet", DVec3::new(1.0e9, 0.0, 0.0), DQuat::IDENTITY)?;
    let station = frames.add_child(planet, "station", DVec3::new(0.0, 7.0e6, 0.0), DQuat::IDENTITY)?;

    let mut ship = Body::new(station, DVec3::new(0.0, 0.0, 500.0), DVec3::new(0.0, 0.0, -50.0));
    let wreck = Body::new(planet, DVec3::new(2.0e3, 0.0, 0.0), DVec3::ZERO);

    SfxService::add_impulse(&mut frames, sfx_config, &wreck, SfxType::Explosion, &mut rng);
    for _ in 0..8 {
        SfxService::add_impulse(&mut frames, sfx_config, &wreck, SfxType::Damage, &mut rng);
    }

    let mut backend = CommandRecorder::new();
    let resources = SfxResources::new(&mut backend, sfx_config);

    let exhaust = DVec3::new(0.0, 0.0, 12.0);
    for tick in 0..120 {
        ship.position += ship.velocity * f64::from(TICK);
        if tick % 6 == 0 {
            SfxService::add_trail(&mut frames, sfx_config, &ship, SfxType::Smoke, 25.0, exhaust, &mut rng);
        }

        time_step_all(&mut frames, root, TICK);
        backend.clear();
        render_all(&frames, root, station, &mut backend, &resources);
    }
    tracing::info!(
        target: "sfx",
        draw_calls = backend.draw_call_count(),
        "Rendered final frame"
    );

    let mut writer = BinaryWriter::new(Vec::new());
    let saved = serialize_tree(&frames, root, &mut writer)?;

    let mut restored = FrameGraph::new("system");
    let restored_root = restored.root();
    let restored_planet =
        restored.add_child(restored_root, "planet", DVec3::new(1.0e9, 0.0, 0.0), DQuat::IDENTITY)?;
    restored.add_child(restored_planet, "station", DVec3::new(0.0, 7.0e6, 0.0), DQuat::IDENTITY)?;

    let mut reader = BinaryReader::new(Cursor::new(writer.into_inner()));
    let loaded = unserialize_tree(&mut restored, restored_root, &mut reader, sfx_config.pool_capacity)?;
    tracing::info!(target: "sfx", saved, loaded, "Save/load round trip");

    resources.release(&mut backend);
    Ok(())
}

fn main() {
    let mut config = EngineConfig::load_or_default();
    config.apply_env_overrides();
    init_logging(&config.logging);

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        eprintln!("Sfx demo failed: {}", e);
        std::process::exit(1);
    }
}
