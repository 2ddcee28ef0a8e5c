use bytemuck::{Pod, Zeroable};

pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub screen_size: [f32; 2],
    pub point_size: f32,
    pub _padding: f32,
}

impl Uniforms {
    pub fn new(width: u32, height: u32, point_size: f32) -> Self {
        Self {
            screen_size: [width as f32, height as f32],
            point_size,
            _padding: 0.0,
        }
    }
}
