//! 特效渲染
//!
//! 每种特效一个渲染配方。配方只读取特效记录，颜色、尺寸和透明度
//! 都只是 `age` 与载荷的函数。

use super::effect::{Sfx, SfxKind, DAMAGE_LIFETIME};
use crate::config::SfxConfig;
use crate::render::{
    BlendMode, Color, MaterialDescriptor, MaterialHandle, RenderStateDesc, RenderStateHandle,
    SfxRenderBackend,
};
use glam::{DAffine3, Mat4, Vec3};

/// 爆炸的三层同心球：(半径系数, 颜色)
pub const EXPLOSION_LAYERS: [(f32, Color); 3] = [
    (500.0, Color::rgba(255, 255, 128, 255)),
    (750.0, Color::rgba(255, 128, 0, 168)),
    (1000.0, Color::rgba(255, 0, 0, 84)),
];

/// 伤害火花精灵尺寸
pub const DAMAGE_SPRITE_SIZE: f32 = 20.0;

/// 烟雾基础灰度
pub const SMOKE_GREY: f32 = 0.75;

/// 烟雾淡入时长
pub const SMOKE_FADE_IN: f32 = 0.5;

/// 共享渲染资源
///
/// 在图形上下文创建后构造，在所有帧销毁后通过 [`SfxResources::release`]
/// 归还给后端。
#[derive(Debug, Clone, PartialEq)]
pub struct SfxResources {
    pub alpha_state: RenderStateHandle,
    pub additive_alpha_state: RenderStateHandle,
    pub explosion_material: MaterialHandle,
    pub damage_particle: MaterialHandle,
    pub smoke_particle: MaterialHandle,
    pub sphere_subdivisions: u32,
}

impl SfxResources {
    pub fn new<B: SfxRenderBackend + ?Sized>(backend: &mut B, config: &SfxConfig) -> Self {
        let mut desc = RenderStateDesc {
            blend_mode: BlendMode::Alpha,
            depth_write: false,
            ..Default::default()
        };
        let alpha_state = backend.create_render_state(&desc);
        desc.blend_mode = BlendMode::AlphaOne;
        let additive_alpha_state = backend.create_render_state(&desc);

        let explosion_material = backend.create_material(&MaterialDescriptor {
            label: Some("sfx_explosion".to_string()),
            billboard_texture: None,
        });
        let damage_particle = backend.create_material(&MaterialDescriptor {
            label: Some("sfx_damage".to_string()),
            billboard_texture: Some(config.particle_texture.clone()),
        });
        let smoke_particle = backend.create_material(&MaterialDescriptor {
            label: Some("sfx_smoke".to_string()),
            billboard_texture: Some(config.particle_texture.clone()),
        });

        tracing::debug!(target: "sfx", "Created sfx render resources");

        Self {
            alpha_state,
            additive_alpha_state,
            explosion_material,
            damage_particle,
            smoke_particle,
            sphere_subdivisions: config.sphere_subdivisions,
        }
    }

    /// 释放资源
    pub fn release<B: SfxRenderBackend + ?Sized>(self, backend: &mut B) {
        backend.destroy_material(self.explosion_material);
        backend.destroy_material(self.damage_particle);
        backend.destroy_material(self.smoke_particle);
        backend.destroy_render_state(self.alpha_state);
        backend.destroy_render_state(self.additive_alpha_state);
        tracing::debug!(target: "sfx", "Released sfx render resources");
    }
}

/// 伤害火花颜色：黄色，alpha 随年龄线性衰减到 0
pub fn damage_color(age: f32) -> Color {
    Color::from_unit(1.0, 1.0, 0.0, 1.0 - age / DAMAGE_LIFETIME)
}

/// 烟雾透明度
///
/// 前 0.5 秒从 0 线性升到衰减曲线，之后按 `0.25 - age/16` 截断到 [0,1]。
pub fn smoke_alpha(age: f32) -> f32 {
    let decay = |a: f32| (0.5 * 0.5 - a / 16.0).clamp(0.0, 1.0);
    if age < SMOKE_FADE_IN {
        decay(SMOKE_FADE_IN) * (age / SMOKE_FADE_IN).max(0.0)
    } else {
        decay(age)
    }
}

/// 烟雾颜色
pub fn smoke_color(age: f32, shade: f32) -> Color {
    let grey = SMOKE_GREY - shade;
    Color::from_unit(grey, grey, grey, smoke_alpha(age))
}

impl Sfx {
    /// 按类型渲染
    ///
    /// `frame_transform` 把所属帧坐标变换到相机帧。
    pub fn render<B: SfxRenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        resources: &SfxResources,
        frame_transform: &DAffine3,
    ) {
        let pos = frame_transform.transform_point3(self.position).as_vec3();
        let trans = Mat4::from_translation(pos);

        match self.kind {
            SfxKind::None => {}
            SfxKind::Explosion => {
                let material = resources.explosion_material;
                for (factor, color) in EXPLOSION_LAYERS {
                    backend.set_diffuse(material, color);
                    backend.set_transform(trans * Mat4::from_scale(Vec3::splat(factor * self.age)));
                    backend.draw_sphere(
                        material,
                        resources.alpha_state,
                        resources.sphere_subdivisions,
                    );
                }
            }
            SfxKind::Damage => {
                backend.set_transform(trans);
                backend.set_diffuse(resources.damage_particle, damage_color(self.age));
                backend.draw_point_sprites(
                    &[Vec3::ZERO],
                    resources.additive_alpha_state,
                    resources.damage_particle,
                    DAMAGE_SPRITE_SIZE,
                );
            }
            SfxKind::Smoke { speed, shade } => {
                backend.set_diffuse(resources.smoke_particle, smoke_color(self.age, shade));
                backend.set_transform(trans);
                backend.draw_point_sprites(
                    &[Vec3::ZERO],
                    resources.alpha_state,
                    resources.smoke_particle,
                    speed * self.age,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandRecorder, RenderCommand};
    use glam::DVec3;

    fn setup() -> (CommandRecorder, SfxResources) {
        let mut recorder = CommandRecorder::new();
        let resources = SfxResources::new(&mut recorder, &SfxConfig::default());
        (recorder, resources)
    }

    fn sfx(kind: SfxKind, age: f32) -> Sfx {
        Sfx {
            position: DVec3::new(1.0, 2.0, 3.0),
            velocity: DVec3::ZERO,
            age,
            kind,
        }
    }

    #[test]
    fn test_resources_create_and_release() {
        let (mut recorder, resources) = setup();
        assert_eq!(recorder.live_materials(), 3);
        assert_eq!(recorder.live_render_states(), 2);
        assert_eq!(
            recorder
                .render_state(resources.additive_alpha_state)
                .unwrap()
                .blend_mode,
            BlendMode::AlphaOne
        );
        assert!(!recorder.render_state(resources.alpha_state).unwrap().depth_write);

        resources.release(&mut recorder);
        assert_eq!(recorder.live_materials(), 0);
        assert_eq!(recorder.live_render_states(), 0);
    }

    #[test]
    fn test_explosion_draws_three_growing_spheres() {
        let (mut recorder, resources) = setup();
        sfx(SfxKind::Explosion, 0.2).render(&mut recorder, &resources, &DAffine3::IDENTITY);

        let spheres: Vec<_> = recorder
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawSphere { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(
            spheres,
            vec![
                Color::rgba(255, 255, 128, 255),
                Color::rgba(255, 128, 0, 168),
                Color::rgba(255, 0, 0, 84),
            ]
        );

        let scales: Vec<_> = recorder
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::SetTransform(m) => Some(m.to_scale_rotation_translation()),
                _ => None,
            })
            .collect();
        assert_eq!(scales.len(), 3);
        assert!((scales[0].0.x - 100.0).abs() < 1e-3);
        assert!((scales[2].0.x - 200.0).abs() < 1e-3);
        assert!((scales[1].2 - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_damage_fades_out() {
        assert_eq!(damage_color(0.0), Color::rgba(255, 255, 0, 255));
        assert_eq!(damage_color(1.0).a, 127);
        assert_eq!(damage_color(2.0).a, 0);

        let (mut recorder, resources) = setup();
        sfx(SfxKind::Damage, 1.0).render(&mut recorder, &resources, &DAffine3::IDENTITY);
        match recorder.commands().last() {
            Some(RenderCommand::DrawPointSprites {
                size, state, color, ..
            }) => {
                assert_eq!(*size, DAMAGE_SPRITE_SIZE);
                assert_eq!(*state, resources.additive_alpha_state);
                assert_eq!(color.a, 127);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_smoke_alpha_ramps_then_decays() {
        assert_eq!(smoke_alpha(0.0), 0.0);
        assert!(smoke_alpha(0.25) > 0.0);
        assert!(smoke_alpha(0.25) < smoke_alpha(0.49));
        assert!((smoke_alpha(0.5) - 0.21875).abs() < 1e-6);
        assert!(smoke_alpha(2.0) < smoke_alpha(0.5));
        assert_eq!(smoke_alpha(4.0), 0.0);
        assert_eq!(smoke_alpha(7.9), 0.0);
    }

    #[test]
    fn test_smoke_sprite_size_and_shade() {
        let (mut recorder, resources) = setup();
        let kind = SfxKind::Smoke {
            speed: 30.0,
            shade: 0.05,
        };
        sfx(kind, 2.0).render(&mut recorder, &resources, &DAffine3::IDENTITY);

        match recorder.commands().last() {
            Some(RenderCommand::DrawPointSprites {
                size, state, color, ..
            }) => {
                assert!((size - 60.0).abs() < 1e-4);
                assert_eq!(*state, resources.alpha_state);
                assert_eq!(color.r, (0.70f32 * 255.0) as u8);
                assert_eq!(color.r, color.g);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_render_does_not_mutate() {
        let (mut recorder, resources) = setup();
        let before = sfx(SfxKind::Damage, 0.3);
        let after = before;
        after.render(&mut recorder, &resources, &DAffine3::IDENTITY);
        assert_eq!(before, after);
    }

    #[test]
    fn test_free_slot_draws_nothing() {
        let (mut recorder, resources) = setup();
        Sfx::default().render(&mut recorder, &resources, &DAffine3::IDENTITY);
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn test_frame_transform_applied() {
        let (mut recorder, resources) = setup();
        let transform = DAffine3::from_translation(DVec3::new(-1.0, -2.0, -3.0));
        sfx(SfxKind::Damage, 0.0).render(&mut recorder, &resources, &transform);

        match recorder.commands().first() {
            Some(RenderCommand::SetTransform(m)) => {
                assert!(m.w_axis.truncate().length() < 1e-6);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
