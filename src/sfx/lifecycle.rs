//! 特效生命周期
//!
//! 状态只在时间步进中迁移：活跃类型在年龄严格超过阈值时变为 `None`，
//! 没有暂停或恢复。未被步进的特效不会老化。

use super::effect::{Sfx, SfxKind};

impl Sfx {
    /// 推进一个时间步
    ///
    /// 空闲槽位不做任何修改。返回本步是否导致特效过期。
    pub fn time_step_update(&mut self, time_step: f32) -> bool {
        if !self.is_active() {
            return false;
        }

        self.age += time_step;
        self.position += self.velocity * f64::from(time_step);

        let expired = match self.sfx_type().lifetime() {
            Some(lifetime) => self.age > lifetime,
            None => false,
        };
        if expired {
            self.kind = SfxKind::None;
        }
        expired
    }
}
