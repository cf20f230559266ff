use super::{ConfigError, ConfigResult};
use crate::impl_default;
use serde::{Deserialize, Serialize};

/// 特效配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SfxConfig {
    /// 每个空间帧的特效槽位数
    pub pool_capacity: usize,

    /// 冲击类特效的速度抖动幅度（每轴 ±）
    pub impulse_jitter: f64,

    /// 爆炸球体细分级别
    pub sphere_subdivisions: u32,

    /// 粒子公告板纹理
    pub particle_texture: String,
}

impl_default!(SfxConfig {
    pool_capacity: crate::sfx::SFX_POOL_CAPACITY,
    impulse_jitter: 100.0,
    sphere_subdivisions: 2,
    particle_texture: "textures/smoke.png".to_string(),
});

impl SfxConfig {
    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.pool_capacity == 0 || self.pool_capacity > i32::MAX as usize {
            return Err(ConfigError::ValidationError(format!(
                "Invalid sfx pool capacity: {}",
                self.pool_capacity
            )));
        }
        if !self.impulse_jitter.is_finite() || self.impulse_jitter < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "Invalid impulse jitter: {}",
                self.impulse_jitter
            )));
        }
        if self.particle_texture.is_empty() {
            return Err(ConfigError::ValidationError(
                "Particle texture path is empty".to_string(),
            ));
        }
        Ok(())
    }
}
