//! Configuration validation errors.
//!
//! Rendering itself has no recoverable failures; every numerical edge case
//! falls back to a well-defined value. What can fail is construction:
//! degenerate geometry, out-of-range material parameters, or a camera
//! configuration that cannot produce an image.

use std::error::Error;
use std::fmt;

/// Invalid scene or camera configuration, detected fail-fast at
/// construction or initialization time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sphere radius was negative or not finite.
    InvalidRadius(f32),
    /// Metal fuzz outside [0, 1].
    FuzzOutOfRange(f32),
    /// Dielectric refraction index was not finite and positive.
    InvalidRefractionIndex(f32),
    /// Image width of zero pixels.
    ZeroImageWidth,
    /// Aspect ratio was not finite and positive.
    InvalidAspectRatio(f32),
    /// Zero samples per pixel.
    ZeroSamples,
    /// Zero maximum recursion depth.
    ZeroMaxDepth,
    /// Vertical field of view outside (0, 180) degrees.
    InvalidVfov(f32),
    /// Focus distance was not positive.
    InvalidFocusDistance(f32),
    /// Defocus angle was negative.
    NegativeDefocusAngle(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRadius(r) => {
                write!(f, "sphere radius must be finite and non-negative, got {r}")
            }
            ConfigError::FuzzOutOfRange(fz) => {
                write!(f, "metal fuzz must lie in [0, 1], got {fz}")
            }
            ConfigError::InvalidRefractionIndex(ri) => {
                write!(f, "refraction index must be finite and positive, got {ri}")
            }
            ConfigError::ZeroImageWidth => write!(f, "image width must be at least 1 pixel"),
            ConfigError::InvalidAspectRatio(ar) => {
                write!(f, "aspect ratio must be finite and positive, got {ar}")
            }
            ConfigError::ZeroSamples => write!(f, "samples per pixel must be at least 1"),
            ConfigError::ZeroMaxDepth => write!(f, "max ray depth must be at least 1"),
            ConfigError::InvalidVfov(v) => {
                write!(f, "vertical field of view must lie in (0, 180) degrees, got {v}")
            }
            ConfigError::InvalidFocusDistance(d) => {
                write!(f, "focus distance must be positive, got {d}")
            }
            ConfigError::NegativeDefocusAngle(a) => {
                write!(f, "defocus angle must be non-negative, got {a}")
            }
        }
    }
}

impl Error for ConfigError {}
