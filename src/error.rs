//! Error types for pointburst.
//!
//! The particle core itself never fails. These types cover the outer
//! surface: configuration validation, GPU initialization, and the window
//! event loop.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter(e) => write!(f, "No compatible GPU adapter found ({}). Ensure your system has a GPU with Vulkan/Metal/DX12 support.", e),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::NoAdapter(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for GpuError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        GpuError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Invalid simulation settings, reported before any window is opened.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The particle pool must hold at least one slot.
    ZeroCapacity,
    /// Window width or height is zero.
    ZeroWindowSize,
    /// A sampling range has `start > end`.
    EmptyRange { name: &'static str },
    /// A sampling range bound is NaN or infinite.
    NonFiniteRange { name: &'static str },
    /// A sampling range reaches below zero where only magnitudes make sense.
    NegativeRange { name: &'static str },
    /// Point sprites need a positive pixel size.
    NonPositivePointSize(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "Particle capacity must be at least 1"),
            ConfigError::ZeroWindowSize => write!(f, "Window width and height must be non-zero"),
            ConfigError::EmptyRange { name } => write!(f, "The {} range has start > end", name),
            ConfigError::NonFiniteRange { name } => write!(f, "The {} range bounds must be finite", name),
            ConfigError::NegativeRange { name } => write!(f, "The {} range must not be negative", name),
            ConfigError::NonPositivePointSize(size) => write!(f, "Point size must be positive, got {}", size),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Sampled emission direction had zero length and cannot be normalized.
///
/// Raised internally by direction sampling and resolved there by resampling,
/// so it never escapes [`Emitter::emit`](crate::Emitter::emit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateDirection;

impl fmt::Display for DegenerateDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sampled direction vector has zero length")
    }
}

impl std::error::Error for DegenerateDirection {}

/// Errors that can occur when running a simulation.
#[derive(Debug)]
pub enum SimulationError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// Settings were rejected by validation.
    Config(ConfigError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            SimulationError::Window(e) => write!(f, "Failed to create window: {}", e),
            SimulationError::Gpu(e) => write!(f, "GPU error: {}", e),
            SimulationError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::EventLoop(e) => Some(e),
            SimulationError::Window(e) => Some(e),
            SimulationError::Gpu(e) => Some(e),
            SimulationError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for SimulationError {
    fn from(e: winit::error::EventLoopError) -> Self {
        SimulationError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for SimulationError {
    fn from(e: winit::error::OsError) -> Self {
        SimulationError::Window(e)
    }
}

impl From<GpuError> for SimulationError {
    fn from(e: GpuError) -> Self {
        SimulationError::Gpu(e)
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}
