//! 渲染后端抽象
//!
//! 特效层只需要很小的一组渲染能力：设置变换、修改材质颜色、
//! 绘制球体和点精灵，以及创建/销毁共享的材质与渲染状态。
//!
//! ## 设计目标
//!
//! - 特效层不依赖具体图形 API
//! - 易于在测试中录制和断言绘制调用

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// 8位 RGBA 颜色
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 由 [0,1] 浮点分量构造，超出范围的值被截断
    pub fn from_unit(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: unit_to_byte(r),
            g: unit_to_byte(g),
            b: unit_to_byte(b),
            a: unit_to_byte(a),
        }
    }
}

fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// 混合模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// 不混合
    Solid,
    /// 标准 alpha 混合
    Alpha,
    /// 加色 alpha 混合
    AlphaOne,
}

/// 渲染状态描述符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderStateDesc {
    pub blend_mode: BlendMode,
    pub depth_write: bool,
    pub depth_test: bool,
}

impl Default for RenderStateDesc {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Solid,
            depth_write: true,
            depth_test: true,
        }
    }
}

/// 材质描述符
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialDescriptor {
    /// 标签
    pub label: Option<String>,
    /// 公告板纹理路径
    pub billboard_texture: Option<String>,
}

/// 抽象材质句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// 抽象渲染状态句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderStateHandle(pub u64);

/// 特效渲染后端 Trait
///
/// # 示例
///
/// ```ignore
/// struct MyBackend { ... }
///
/// impl SfxRenderBackend for MyBackend {
///     fn create_material(&mut self, desc: &MaterialDescriptor) -> MaterialHandle { ... }
///     fn draw_point_sprites(&mut self, positions: &[Vec3], ...) { ... }
///     ...
/// }
/// ```
pub trait SfxRenderBackend {
    /// 创建渲染状态
    fn create_render_state(&mut self, desc: &RenderStateDesc) -> RenderStateHandle;

    /// 销毁渲染状态
    fn destroy_render_state(&mut self, state: RenderStateHandle);

    /// 创建材质
    fn create_material(&mut self, desc: &MaterialDescriptor) -> MaterialHandle;

    /// 销毁材质
    fn destroy_material(&mut self, material: MaterialHandle);

    /// 修改材质漫反射颜色
    fn set_diffuse(&mut self, material: MaterialHandle, color: Color);

    /// 设置模型视图变换
    fn set_transform(&mut self, transform: Mat4);

    /// 在当前变换下绘制单位球
    fn draw_sphere(
        &mut self,
        material: MaterialHandle,
        state: RenderStateHandle,
        subdivisions: u32,
    );

    /// 绘制点精灵
    fn draw_point_sprites(
        &mut self,
        positions: &[Vec3],
        state: RenderStateHandle,
        material: MaterialHandle,
        size: f32,
    );
}
