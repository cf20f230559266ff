//! 特效存档
//!
//! 每个帧的格式：
//!
//! ```text
//! i32 active_count
//! active_count × { vec3 position, vec3 velocity, f32 age, i32 type }
//! ```
//!
//! 无标签、无填充、无校验。只写活跃槽位，读回时压缩到下标 `0..count`。
//! `speed` 与烟雾色偏不在格式中，读回后取默认值。

use super::effect::{Sfx, SfxKind, SfxType};
use super::pool::SfxPool;
use super::traversal::preorder;
use crate::core::{SfxError, SfxResult};
use crate::scene::{FrameId, FrameTree};
use glam::DVec3;
use std::io::{Read, Write};

/// 存档写入原语
pub trait SaveWriter {
    fn vector3d(&mut self, v: DVec3) -> SfxResult<()>;
    fn float(&mut self, v: f32) -> SfxResult<()>;
    fn int32(&mut self, v: i32) -> SfxResult<()>;
}

/// 存档读取原语
pub trait SaveReader {
    fn vector3d(&mut self) -> SfxResult<DVec3>;
    fn float(&mut self) -> SfxResult<f32>;
    fn int32(&mut self) -> SfxResult<i32>;
}

/// 二进制写入器
///
/// 使用 bincode 的定长小端编码：vec3 为 3 个 f64，f32/i32 各 4 字节。
pub struct BinaryWriter<W: Write> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> SaveWriter for BinaryWriter<W> {
    fn vector3d(&mut self, v: DVec3) -> SfxResult<()> {
        bincode::serialize_into(&mut self.inner, &v.to_array())?;
        Ok(())
    }

    fn float(&mut self, v: f32) -> SfxResult<()> {
        bincode::serialize_into(&mut self.inner, &v)?;
        Ok(())
    }

    fn int32(&mut self, v: i32) -> SfxResult<()> {
        bincode::serialize_into(&mut self.inner, &v)?;
        Ok(())
    }
}

/// 二进制读取器
pub struct BinaryReader<R: Read> {
    inner: R,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> SaveReader for BinaryReader<R> {
    fn vector3d(&mut self) -> SfxResult<DVec3> {
        let v: [f64; 3] = bincode::deserialize_from(&mut self.inner)?;
        Ok(DVec3::from_array(v))
    }

    fn float(&mut self) -> SfxResult<f32> {
        Ok(bincode::deserialize_from(&mut self.inner)?)
    }

    fn int32(&mut self) -> SfxResult<i32> {
        Ok(bincode::deserialize_from(&mut self.inner)?)
    }
}

impl Sfx {
    fn save<W: SaveWriter + ?Sized>(&self, wr: &mut W) -> SfxResult<()> {
        wr.vector3d(self.position)?;
        wr.vector3d(self.velocity)?;
        wr.float(self.age)?;
        wr.int32(self.sfx_type().as_i32())
    }

    fn load<R: SaveReader + ?Sized>(rd: &mut R) -> SfxResult<Self> {
        let position = rd.vector3d()?;
        let velocity = rd.vector3d()?;
        let age = rd.float()?;
        let raw = rd.int32()?;
        let ty = SfxType::from_i32(raw).ok_or(SfxError::UnknownType(raw))?;
        Ok(Self {
            position,
            velocity,
            age,
            kind: SfxKind::from_type(ty),
        })
    }
}

/// 写出一个池的活跃特效，返回写出的数量
pub fn serialize<W: SaveWriter + ?Sized>(wr: &mut W, pool: Option<&SfxPool>) -> SfxResult<usize> {
    let active = pool.map_or(0, SfxPool::active_count);
    wr.int32(active as i32)?;

    if let Some(pool) = pool {
        for (_, sfx) in pool.iter_active() {
            sfx.save(wr)?;
        }
    }
    Ok(active)
}

/// 读入一个池
///
/// 数量为 0 时返回 `None`（不分配池）；否则返回一个新池，
/// 记录按顺序填入下标 `0..count`。
pub fn unserialize<R: SaveReader + ?Sized>(
    rd: &mut R,
    capacity: usize,
) -> SfxResult<Option<SfxPool>> {
    let raw = rd.int32()?;
    if raw < 0 {
        return Err(SfxError::InvalidCount(raw));
    }
    let count = raw as usize;
    if count == 0 {
        return Ok(None);
    }
    if count > capacity {
        return Err(SfxError::CountExceedsCapacity { count, capacity });
    }

    let mut pool = SfxPool::new(capacity);
    for slot in pool.slots_mut().iter_mut().take(count) {
        *slot = Sfx::load(rd)?;
    }
    Ok(Some(pool))
}

/// 写出一个帧的特效
pub fn serialize_frame<T, W>(tree: &T, frame: FrameId, wr: &mut W) -> SfxResult<usize>
where
    T: FrameTree + ?Sized,
    W: SaveWriter + ?Sized,
{
    serialize(wr, tree.sfx_pool(frame))
}

/// 读入一个帧的特效
///
/// 读到非零数量时替换帧的池；数量为 0 时保持帧不变。
pub fn unserialize_frame<T, R>(
    tree: &mut T,
    frame: FrameId,
    rd: &mut R,
    capacity: usize,
) -> SfxResult<usize>
where
    T: FrameTree + ?Sized,
    R: SaveReader + ?Sized,
{
    let slot = tree
        .sfx_pool_slot(frame)
        .ok_or(SfxError::UnknownFrame(frame.index()))?;
    match unserialize(rd, capacity)? {
        Some(pool) => {
            let count = pool.active_count();
            *slot = Some(pool);
            Ok(count)
        }
        None => Ok(0),
    }
}

/// 按先序写出整棵子树的特效
pub fn serialize_tree<T, W>(tree: &T, root: FrameId, wr: &mut W) -> SfxResult<usize>
where
    T: FrameTree + ?Sized,
    W: SaveWriter + ?Sized,
{
    let frames = preorder(tree, root);
    let mut total = 0;
    for frame in &frames {
        total += serialize_frame(tree, *frame, wr)?;
    }
    tracing::debug!(
        target: "sfx::persistence",
        frames = frames.len(),
        effects = total,
        "Saved sfx"
    );
    Ok(total)
}

/// 按先序读入整棵子树的特效
///
/// 帧树结构必须与写出时一致。先解码全部帧再安装，
/// 出错时帧树保持原样。
pub fn unserialize_tree<T, R>(
    tree: &mut T,
    root: FrameId,
    rd: &mut R,
    capacity: usize,
) -> SfxResult<usize>
where
    T: FrameTree + ?Sized,
    R: SaveReader + ?Sized,
{
    let frames = preorder(tree, root);
    let mut decoded = Vec::with_capacity(frames.len());
    for frame in &frames {
        decoded.push((*frame, unserialize(rd, capacity)?));
    }

    let mut total = 0;
    for (frame, pool) in decoded {
        let Some(pool) = pool else {
            continue;
        };
        let slot = tree
            .sfx_pool_slot(frame)
            .ok_or(SfxError::UnknownFrame(frame.index()))?;
        total += pool.active_count();
        *slot = Some(pool);
    }
    tracing::debug!(
        target: "sfx::persistence",
        frames = frames.len(),
        effects = total,
        "Loaded sfx"
    );
    Ok(total)
}
