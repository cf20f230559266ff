//! 特效记录
//!
//! 一个槽位对应一个 [`Sfx`]。`SfxKind::None` 表示槽位空闲，
//! 其余字段此时没有意义，随时可被新分配覆盖。

use glam::DVec3;

/// 特效类型判别值
///
/// 整数值即存档格式中的 `type` 字段。
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfxType {
    None = 0,
    Explosion = 1,
    Damage = 2,
    Smoke = 3,
}

impl SfxType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Explosion),
            2 => Some(Self::Damage),
            3 => Some(Self::Smoke),
            _ => None,
        }
    }

    /// 过期阈值（秒），年龄严格大于该值时失效
    pub fn lifetime(self) -> Option<f32> {
        match self {
            Self::None => None,
            Self::Explosion => Some(EXPLOSION_LIFETIME),
            Self::Damage => Some(DAMAGE_LIFETIME),
            Self::Smoke => Some(SMOKE_LIFETIME),
        }
    }
}

pub const EXPLOSION_LIFETIME: f32 = 0.5;
pub const DAMAGE_LIFETIME: f32 = 2.0;
pub const SMOKE_LIFETIME: f32 = 8.0;

/// 带载荷的特效类型
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SfxKind {
    #[default]
    None,
    Explosion,
    Damage,
    /// 尾迹烟雾
    Smoke {
        /// 尾迹尺寸系数（精灵尺寸 = speed * age）
        speed: f32,
        /// 颜色去饱和偏移，创建时确定，范围 [0, 0.05)
        shade: f32,
    },
}

impl SfxKind {
    /// 按判别值构造，载荷取默认值
    pub fn from_type(ty: SfxType) -> Self {
        Self::with_payload(ty, 0.0, 0.0)
    }

    /// 按判别值构造；`speed`/`shade` 只对 Smoke 有意义
    pub fn with_payload(ty: SfxType, speed: f32, shade: f32) -> Self {
        match ty {
            SfxType::None => Self::None,
            SfxType::Explosion => Self::Explosion,
            SfxType::Damage => Self::Damage,
            SfxType::Smoke => Self::Smoke { speed, shade },
        }
    }

    pub fn sfx_type(&self) -> SfxType {
        match self {
            Self::None => SfxType::None,
            Self::Explosion => SfxType::Explosion,
            Self::Damage => SfxType::Damage,
            Self::Smoke { .. } => SfxType::Smoke,
        }
    }
}

/// 单个特效实例
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sfx {
    /// 相对所属帧的位置
    pub position: DVec3,
    /// 线性积分用速度
    pub velocity: DVec3,
    /// 创建后经过的时间
    pub age: f32,
    pub kind: SfxKind,
}

impl Sfx {
    pub fn is_active(&self) -> bool {
        !matches!(self.kind, SfxKind::None)
    }

    pub fn sfx_type(&self) -> SfxType {
        self.kind.sfx_type()
    }

    /// 尾迹尺寸系数，非 Smoke 类型为 `None`
    pub fn speed(&self) -> Option<f32> {
        match self.kind {
            SfxKind::Smoke { speed, .. } => Some(speed),
            _ => None,
        }
    }

    /// 重新锚定位置（尾迹特效每帧由调用方更新）
    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    /// 填充为新特效
    pub(crate) fn spawn(&mut self, kind: SfxKind, position: DVec3, velocity: DVec3) {
        self.kind = kind;
        self.age = 0.0;
        self.position = position;
        self.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_round_trip() {
        for ty in [SfxType::None, SfxType::Explosion, SfxType::Damage, SfxType::Smoke] {
            assert_eq!(SfxType::from_i32(ty.as_i32()), Some(ty));
        }
        assert_eq!(SfxType::from_i32(4), None);
        assert_eq!(SfxType::from_i32(-1), None);
    }

    #[test]
    fn test_default_is_free_slot() {
        let sfx = Sfx::default();
        assert!(!sfx.is_active());
        assert_eq!(sfx.sfx_type(), SfxType::None);
    }

    #[test]
    fn test_speed_only_for_smoke() {
        let smoke = Sfx {
            kind: SfxKind::with_payload(SfxType::Smoke, 12.0, 0.01),
            ..Default::default()
        };
        assert_eq!(smoke.speed(), Some(12.0));

        let damage = Sfx {
            kind: SfxKind::with_payload(SfxType::Damage, 12.0, 0.01),
            ..Default::default()
        };
        assert_eq!(damage.speed(), None);
        assert_eq!(damage.kind, SfxKind::Damage);
    }
}
