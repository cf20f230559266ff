//! 空间帧树
//!
//! 特效按所属空间帧存放。这里定义特效层依赖的帧树与锚点接口，
//! 并提供一个基于 arena 的参考实现 [`FrameGraph`]。

use crate::core::{SfxError, SfxResult};
use crate::sfx::SfxPool;
use glam::{DAffine3, DQuat, DVec3};

/// 帧ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub usize);

impl FrameId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// 特效层所需的帧树接口
///
/// 每个帧独占至多一个特效池；池的生命周期与帧绑定。
pub trait FrameTree {
    /// 子帧，按树暴露的顺序
    fn children(&self, frame: FrameId) -> &[FrameId];

    /// 帧的特效池（未分配时为 `None`）
    fn sfx_pool(&self, frame: FrameId) -> Option<&SfxPool>;

    /// 帧的特效池槽位，未知帧返回 `None`
    fn sfx_pool_slot(&mut self, frame: FrameId) -> Option<&mut Option<SfxPool>>;

    /// 把 `from` 帧中的坐标变换到 `to` 帧
    fn frame_transform(&self, from: FrameId, to: FrameId) -> DAffine3;
}

/// 特效锚点（通常是游戏中的物体）
pub trait SfxAnchor {
    fn position(&self) -> DVec3;
    fn velocity(&self) -> DVec3;
    fn frame(&self) -> FrameId;
}

/// 简单物体
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: DVec3,
    pub velocity: DVec3,
    pub frame: FrameId,
}

impl Body {
    pub fn new(frame: FrameId, position: DVec3, velocity: DVec3) -> Self {
        Self {
            position,
            velocity,
            frame,
        }
    }
}

impl SfxAnchor for Body {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn velocity(&self) -> DVec3 {
        self.velocity
    }

    fn frame(&self) -> FrameId {
        self.frame
    }
}

/// 空间帧
#[derive(Debug)]
pub struct Frame {
    /// 名称
    pub label: String,
    /// 相对父帧的位置
    pub position: DVec3,
    /// 相对父帧的朝向
    pub orient: DQuat,
    parent: Option<FrameId>,
    children: Vec<FrameId>,
    sfx: Option<SfxPool>,
}

impl Frame {
    fn new(label: impl Into<String>, parent: Option<FrameId>, position: DVec3, orient: DQuat) -> Self {
        Self {
            label: label.into(),
            position,
            orient,
            parent,
            children: Vec::new(),
            sfx: None,
        }
    }

    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    /// 相对父帧的局部变换
    pub fn local_transform(&self) -> DAffine3 {
        DAffine3::from_rotation_translation(self.orient, self.position)
    }
}

/// 基于 arena 的帧树
///
/// 帧只增不删，`FrameId` 即 arena 下标。
#[derive(Debug)]
pub struct FrameGraph {
    frames: Vec<Frame>,
}

impl FrameGraph {
    /// 创建只含根帧的树
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            frames: vec![Frame::new(root_label, None, DVec3::ZERO, DQuat::IDENTITY)],
        }
    }

    pub fn root(&self) -> FrameId {
        FrameId(0)
    }

    /// 添加子帧
    pub fn add_child(
        &mut self,
        parent: FrameId,
        label: impl Into<String>,
        position: DVec3,
        orient: DQuat,
    ) -> SfxResult<FrameId> {
        if parent.0 >= self.frames.len() {
            return Err(SfxError::UnknownFrame(parent.0));
        }
        let id = FrameId(self.frames.len());
        self.frames
            .push(Frame::new(label, Some(parent), position, orient));
        self.frames[parent.0].children.push(id);
        Ok(id)
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id.0)
    }

    pub fn get_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 帧到根帧的变换
    fn to_root(&self, id: FrameId) -> DAffine3 {
        let mut transform = DAffine3::IDENTITY;
        let mut current = self.frames.get(id.0);
        while let Some(frame) = current {
            transform = frame.local_transform() * transform;
            current = frame.parent.and_then(|p| self.frames.get(p.0));
        }
        transform
    }
}

impl FrameTree for FrameGraph {
    fn children(&self, frame: FrameId) -> &[FrameId] {
        self.frames
            .get(frame.0)
            .map(|f| f.children.as_slice())
            .unwrap_or(&[])
    }

    fn sfx_pool(&self, frame: FrameId) -> Option<&SfxPool> {
        self.frames.get(frame.0).and_then(|f| f.sfx.as_ref())
    }

    fn sfx_pool_slot(&mut self, frame: FrameId) -> Option<&mut Option<SfxPool>> {
        self.frames.get_mut(frame.0).map(|f| &mut f.sfx)
    }

    fn frame_transform(&self, from: FrameId, to: FrameId) -> DAffine3 {
        if from == to {
            return DAffine3::IDENTITY;
        }
        self.to_root(to).inverse() * self.to_root(from)
    }
}
