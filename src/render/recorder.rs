//! 录制型渲染后端
//!
//! 不接触 GPU，只把特效层发出的调用按顺序记成 [`RenderCommand`]。
//! 用于测试、基准和无窗口运行。

use super::backend::{
    Color, MaterialDescriptor, MaterialHandle, RenderStateDesc, RenderStateHandle,
    SfxRenderBackend,
};
use glam::{Mat4, Vec3};
use std::collections::HashMap;

/// 渲染命令
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// 设置变换
    SetTransform(Mat4),
    /// 修改材质颜色
    SetDiffuse {
        material: MaterialHandle,
        color: Color,
    },
    /// 绘制球体
    DrawSphere {
        material: MaterialHandle,
        state: RenderStateHandle,
        subdivisions: u32,
        /// 绘制时材质的颜色
        color: Color,
    },
    /// 绘制点精灵
    DrawPointSprites {
        positions: Vec<Vec3>,
        state: RenderStateHandle,
        material: MaterialHandle,
        size: f32,
        /// 绘制时材质的颜色
        color: Color,
    },
}

/// 录制后端
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
    materials: HashMap<MaterialHandle, (MaterialDescriptor, Color)>,
    states: HashMap<RenderStateHandle, RenderStateDesc>,
    next_handle: u64,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// 绘制调用数（球体 + 精灵批次）
    pub fn draw_call_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::DrawSphere { .. } | RenderCommand::DrawPointSprites { .. }
                )
            })
            .count()
    }

    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    pub fn live_render_states(&self) -> usize {
        self.states.len()
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&MaterialDescriptor> {
        self.materials.get(&handle).map(|(desc, _)| desc)
    }

    pub fn render_state(&self, handle: RenderStateHandle) -> Option<&RenderStateDesc> {
        self.states.get(&handle)
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn diffuse(&self, material: MaterialHandle) -> Color {
        self.materials
            .get(&material)
            .map(|(_, color)| *color)
            .unwrap_or(Color::WHITE)
    }
}

impl SfxRenderBackend for CommandRecorder {
    fn create_render_state(&mut self, desc: &RenderStateDesc) -> RenderStateHandle {
        let handle = RenderStateHandle(self.next());
        self.states.insert(handle, *desc);
        handle
    }

    fn destroy_render_state(&mut self, state: RenderStateHandle) {
        self.states.remove(&state);
    }

    fn create_material(&mut self, desc: &MaterialDescriptor) -> MaterialHandle {
        let handle = MaterialHandle(self.next());
        self.materials.insert(handle, (desc.clone(), Color::WHITE));
        handle
    }

    fn destroy_material(&mut self, material: MaterialHandle) {
        self.materials.remove(&material);
    }

    fn set_diffuse(&mut self, material: MaterialHandle, color: Color) {
        if let Some((_, diffuse)) = self.materials.get_mut(&material) {
            *diffuse = color;
        }
        self.commands
            .push(RenderCommand::SetDiffuse { material, color });
    }

    fn set_transform(&mut self, transform: Mat4) {
        self.commands.push(RenderCommand::SetTransform(transform));
    }

    fn draw_sphere(
        &mut self,
        material: MaterialHandle,
        state: RenderStateHandle,
        subdivisions: u32,
    ) {
        let color = self.diffuse(material);
        self.commands.push(RenderCommand::DrawSphere {
            material,
            state,
            subdivisions,
            color,
        });
    }

    fn draw_point_sprites(
        &mut self,
        positions: &[Vec3],
        state: RenderStateHandle,
        material: MaterialHandle,
        size: f32,
    ) {
        let color = self.diffuse(material);
        self.commands.push(RenderCommand::DrawPointSprites {
            positions: positions.to_vec(),
            state,
            material,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_diffuse_at_draw_time() {
        let mut recorder = CommandRecorder::new();
        let material = recorder.create_material(&MaterialDescriptor::default());
        let state = recorder.create_render_state(&RenderStateDesc::default());

        recorder.set_diffuse(material, Color::rgba(10, 20, 30, 40));
        recorder.draw_sphere(material, state, 2);

        match recorder.commands().last() {
            Some(RenderCommand::DrawSphere { color, .. }) => {
                assert_eq!(*color, Color::rgba(10, 20, 30, 40));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(recorder.draw_call_count(), 1);
    }

    #[test]
    fn test_destroy_releases_handles() {
        let mut recorder = CommandRecorder::new();
        let material = recorder.create_material(&MaterialDescriptor::default());
        let state = recorder.create_render_state(&RenderStateDesc::default());
        assert_eq!(recorder.live_materials(), 1);
        assert_eq!(recorder.live_render_states(), 1);

        recorder.destroy_material(material);
        recorder.destroy_render_state(state);
        assert_eq!(recorder.live_materials(), 0);
        assert_eq!(recorder.live_render_states(), 0);
    }
}
