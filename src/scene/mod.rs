//! 空间帧树
//!
//! 提供特效层使用的帧树接口和参考实现。

pub mod frame;

pub use frame::{Body, Frame, FrameGraph, FrameId, FrameTree, SfxAnchor};
