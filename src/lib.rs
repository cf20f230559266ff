//! # Game Engine Sfx
//!
//! 挂在空间帧树上的瞬时视觉特效（爆炸、伤害火花、引擎烟雾）。
//!
//! ## Features
//!
//! - **Per-frame pools**: 每个空间帧一个按需分配的固定容量特效池
//! - **Lifecycle**: 按类型老化与过期
//! - **Rendering**: 通过抽象渲染后端发出绘制调用
//! - **Persistence**: 紧凑的二进制存档格式
//! - **ECS**: bevy_ecs 资源与系统
//!
//! ## Architecture Design
//!
//! 遵循 **贫血模型**：
//! - **State**: `Sfx` / `SfxPool` 纯数据
//! - **Service**: `SfxService` 封装创建逻辑
//! - **System**: `sfx_time_step_system` 负责调度
//!
//! ## Modules
//!
//! - [`core`]: 错误、日志、宏
//! - [`config`]: 配置系统
//! - [`scene`]: 空间帧树接口与参考实现
//! - [`render`]: 渲染后端接口
//! - [`sfx`]: 特效池、生命周期、遍历与存档

/// Core infrastructure: errors, logging and macros
pub mod core;
/// Configuration system
pub mod config;
/// Spatial frame tree
pub mod scene;
/// Rendering backend contract
pub mod render;
/// Frame-anchored visual effects
pub mod sfx;
