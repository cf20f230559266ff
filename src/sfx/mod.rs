//! 特效系统模块
//!
//! 挂在空间帧上的瞬时视觉特效：爆炸、伤害火花、引擎烟雾。
//!
//! ## 架构设计
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Sfx System                          │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Creation (SfxService)                                │
//! │     - 在锚点所属帧的池中分配槽位（池按需创建）             │
//! │     - 池满时静默放弃                                      │
//! │                                                          │
//! │  2. Simulation (time_step_all)                           │
//! │     - 先序遍历帧树，推进每个活跃特效                       │
//! │     - 年龄严格超过类型阈值时回收槽位                       │
//! │                                                          │
//! │  3. Rendering (render_all)                               │
//! │     - 每帧解析一次到相机帧的变换                           │
//! │     - 按类型的渲染配方发出绘制调用                         │
//! │                                                          │
//! │  4. Persistence                                          │
//! │     - 只写活跃槽位，读回时压缩                             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 使用示例
//!
//! ```
//! use game_engine_sfx::config::SfxConfig;
//! use game_engine_sfx::scene::{Body, FrameGraph};
//! use game_engine_sfx::sfx::{time_step_all, SfxService, SfxType};
//! use glam::DVec3;
//! use rand::SeedableRng;
//!
//! let mut frames = FrameGraph::new("system");
//! let root = frames.root();
//! let ship = Body::new(root, DVec3::ZERO, DVec3::new(0.0, 0.0, 300.0));
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//!
//! SfxService::add_impulse(&mut frames, &SfxConfig::default(), &ship, SfxType::Explosion, &mut rng);
//! time_step_all(&mut frames, root, 0.016);
//! ```

pub mod effect;
pub mod lifecycle;
pub mod persistence;
pub mod pool;
pub mod render;
pub mod service;
pub mod system;
pub mod traversal;

pub use effect::{Sfx, SfxKind, SfxType, DAMAGE_LIFETIME, EXPLOSION_LIFETIME, SMOKE_LIFETIME};
pub use persistence::{
    serialize, serialize_frame, serialize_tree, unserialize, unserialize_frame, unserialize_tree,
    BinaryReader, BinaryWriter, SaveReader, SaveWriter,
};
pub use pool::{SfxPool, SFX_POOL_CAPACITY};
pub use render::SfxResources;
pub use service::SfxService;
pub use system::{sfx_time_step_system, SfxClock, SfxScene};
pub use traversal::{preorder, render_all, time_step_all, TraversalStats};
