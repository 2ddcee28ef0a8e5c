//! The particle record and its GPU vertex layout.
//!
//! A [`Particle`] is uploaded byte-for-byte, so the struct doubles as the
//! instance vertex format:
//!
//! | Offset | Field | Format |
//! |--------|-------|--------|
//! | 0 | `position` | `Float32x2` |
//! | 8 | `velocity` | `Float32x2` (not bound) |
//! | 16 | `life` | `Float32` |
//!
//! Stride is 20 bytes, no padding.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::mem;

/// One slot of the particle pool.
///
/// `life <= 0.0` marks the slot dead; its position and velocity are stale
/// and ignored by the simulation step.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Screen-space position in pixels, origin top-left, y down.
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Remaining lifetime in seconds.
    pub life: f32,
}

impl Particle {
    /// A dead particle parked at `position`.
    pub const fn dead_at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            life: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            offset: mem::offset_of!(Particle, position) as wgpu::BufferAddress,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: mem::offset_of!(Particle, life) as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32,
        },
    ];

    /// Instance-rate vertex layout matching the in-memory record.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Particle>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
