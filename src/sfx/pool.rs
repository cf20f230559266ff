//! 特效池
//!
//! 每个空间帧至多一个固定容量的槽位数组，首次使用时才分配。
//! 槽位从不释放，只会被标记为空闲并复用。

use super::effect::Sfx;

/// 默认每帧特效容量
pub const SFX_POOL_CAPACITY: usize = 1024;

/// 固定容量特效池
#[derive(Debug, Clone)]
pub struct SfxPool {
    slots: Box<[Sfx]>,
}

impl SfxPool {
    /// 创建所有槽位都空闲的池
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Sfx::default(); capacity].into_boxed_slice(),
        }
    }

    /// 确保帧的池已分配（幂等）
    pub fn ensure_allocated(slot: &mut Option<SfxPool>, capacity: usize) -> &mut SfxPool {
        slot.get_or_insert_with(|| {
            tracing::debug!(target: "sfx", capacity, "Allocated sfx pool");
            SfxPool::new(capacity)
        })
    }

    /// 分配第一个空闲槽位
    ///
    /// 从下标 0 开始线性扫描，池满时返回 `None`。
    pub fn alloc_slot(&mut self) -> Option<(usize, &mut Sfx)> {
        self.slots
            .iter_mut()
            .enumerate()
            .find(|(_, sfx)| !sfx.is_active())
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|sfx| sfx.is_active()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Sfx::is_active)
    }

    pub fn get(&self, index: usize) -> Option<&Sfx> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sfx> {
        self.slots.get_mut(index)
    }

    /// 所有槽位（含空闲）
    pub fn slots(&self) -> &[Sfx] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Sfx] {
        &mut self.slots
    }

    /// 活跃特效，按下标顺序
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Sfx)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, sfx)| sfx.is_active())
    }
}
