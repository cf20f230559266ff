//! 渲染后端接口
//!
//! 特效层通过 [`SfxRenderBackend`] 发出绘制调用；[`CommandRecorder`]
//! 是一个只录制命令的实现。

pub mod backend;
pub mod recorder;

pub use backend::{
    BlendMode, Color, MaterialDescriptor, MaterialHandle, RenderStateDesc, RenderStateHandle,
    SfxRenderBackend,
};
pub use recorder::{CommandRecorder, RenderCommand};
