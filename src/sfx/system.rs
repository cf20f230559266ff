//! ECS 调度
//!
//! 帧树作为资源存放在 World 中，特效步进作为普通系统加入调度。

use super::traversal::time_step_all;
use crate::scene::{FrameGraph, FrameId};
use bevy_ecs::prelude::*;

/// 特效所在的帧树
#[derive(Resource)]
pub struct SfxScene {
    pub frames: FrameGraph,
    /// 当前相机所在帧
    pub camera: FrameId,
}

impl SfxScene {
    pub fn new(frames: FrameGraph) -> Self {
        let camera = frames.root();
        Self { frames, camera }
    }
}

/// 特效时钟
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct SfxClock {
    pub delta_seconds: f32,
}

/// 特效步进系统
pub fn sfx_time_step_system(clock: Res<SfxClock>, mut scene: ResMut<SfxScene>) {
    if clock.delta_seconds <= 0.0 {
        return;
    }
    let root = scene.frames.root();
    time_step_all(&mut scene.frames, root, clock.delta_seconds);
}
