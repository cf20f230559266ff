//! 特效服务层
//!
//! 遵循贫血模型：
//! - `Sfx` / `SfxPool`: 纯数据结构
//! - `SfxService`: 创建与重新锚定特效
//! - `sfx_time_step_system`: 调度编排
//!
//! 特效是尽力而为的视觉表现，池满时创建调用静默失败。

use super::effect::{SfxKind, SfxType};
use super::pool::SfxPool;
use crate::config::SfxConfig;
use crate::scene::{FrameId, FrameTree, SfxAnchor};
use glam::DVec3;
use rand::Rng;

/// 烟雾颜色去饱和偏移上限
pub const SMOKE_SHADE_RANGE: f32 = 0.05;

/// 特效服务
pub struct SfxService;

impl SfxService {
    /// 创建冲击类特效（爆炸、伤害火花）
    ///
    /// 速度为锚点速度加上每轴 `[-jitter, +jitter)` 的均匀随机抖动。
    /// 返回槽位下标；池满或类型为 `None` 时返回 `None`。
    pub fn add_impulse<T, A, R>(
        tree: &mut T,
        config: &SfxConfig,
        anchor: &A,
        ty: SfxType,
        rng: &mut R,
    ) -> Option<usize>
    where
        T: FrameTree + ?Sized,
        A: SfxAnchor + ?Sized,
        R: Rng + ?Sized,
    {
        if ty == SfxType::None {
            return None;
        }

        let jitter = DVec3::new(
            rng.gen::<f64>() - 0.5,
            rng.gen::<f64>() - 0.5,
            rng.gen::<f64>() - 0.5,
        ) * (2.0 * config.impulse_jitter);
        let kind = Self::make_kind(ty, 0.0, rng);

        let pool = SfxPool::ensure_allocated(
            tree.sfx_pool_slot(anchor.frame())?,
            config.pool_capacity,
        );
        let (index, sfx) = pool.alloc_slot()?;
        sfx.spawn(kind, anchor.position(), anchor.velocity() + jitter);
        Some(index)
    }

    /// 创建尾迹类特效（引擎烟雾）
    ///
    /// 速度为零，位置由调用方每帧通过 [`SfxService::reanchor`] 更新。
    pub fn add_trail<T, A, R>(
        tree: &mut T,
        config: &SfxConfig,
        anchor: &A,
        ty: SfxType,
        speed: f32,
        offset: DVec3,
        rng: &mut R,
    ) -> Option<usize>
    where
        T: FrameTree + ?Sized,
        A: SfxAnchor + ?Sized,
        R: Rng + ?Sized,
    {
        if ty == SfxType::None {
            return None;
        }

        let kind = Self::make_kind(ty, speed, rng);
        let pool = SfxPool::ensure_allocated(
            tree.sfx_pool_slot(anchor.frame())?,
            config.pool_capacity,
        );
        let (index, sfx) = pool.alloc_slot()?;
        sfx.spawn(kind, anchor.position() + offset, DVec3::ZERO);
        Some(index)
    }

    /// 重新锚定活跃特效的位置
    ///
    /// 槽位空闲、越界或帧没有池时返回 `false`。
    pub fn reanchor<T: FrameTree + ?Sized>(
        tree: &mut T,
        frame: FrameId,
        index: usize,
        position: DVec3,
    ) -> bool {
        let Some(Some(pool)) = tree.sfx_pool_slot(frame) else {
            return false;
        };
        match pool.get_mut(index) {
            Some(sfx) if sfx.is_active() => {
                sfx.set_position(position);
                true
            }
            _ => false,
        }
    }

    /// 帧内活跃特效数
    pub fn active_count<T: FrameTree + ?Sized>(tree: &T, frame: FrameId) -> usize {
        tree.sfx_pool(frame).map_or(0, SfxPool::active_count)
    }

    fn make_kind<R: Rng + ?Sized>(ty: SfxType, speed: f32, rng: &mut R) -> SfxKind {
        let shade = if ty == SfxType::Smoke {
            rng.gen::<f32>() * SMOKE_SHADE_RANGE
        } else {
            0.0
        };
        SfxKind::with_payload(ty, speed, shade)
    }
}
