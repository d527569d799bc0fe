use crate::foundation::error::{WlmpError, WlmpResult};

pub use kurbo::Point;

/// Absolute 0-based frame index in output timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)` in output timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> WlmpResult<Self> {
        if den == 0 {
            return Err(WlmpError::output_params("fps denominator must be > 0"));
        }
        if num == 0 {
            return Err(WlmpError::output_params("fps must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert seconds to frame count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Convert unit-range channels (`0.0..=1.0`) as stored in project files.
    ///
    /// Each channel is `round(v * 255)` clamped to `0..=255`.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        fn chan(v: f64) -> u8 {
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        }
        Self {
            r: chan(r),
            g: chan(g),
            b: chan(b),
        }
    }
}

/// Half-open span `[start, end)` in output timeline seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeSpan {
    /// Inclusive start in seconds.
    pub start: f64,
    /// Exclusive end in seconds.
    pub end: f64,
}

impl TimeSpan {
    /// Span starting at `start` lasting `duration` seconds.
    pub fn at(start: f64, duration: f64) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    /// Length in seconds.
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Map to output frames with floor semantics on both bounds.
    pub fn to_frames(self, fps: Fps) -> FrameRange {
        FrameRange {
            start: FrameIndex(fps.secs_to_frames_floor(self.start)),
            end: FrameIndex(fps.secs_to_frames_floor(self.end)),
        }
    }
}

/// Common output resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResolutionPreset {
    /// 1280x720
    Hd,
    /// 1920x1080
    FullHd,
    /// 2048x1080
    TwoK,
    /// 3840x2160
    FourK,
}

impl ResolutionPreset {
    /// Pixel size of the preset.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Hd => (1280, 720),
            Self::FullHd => (1920, 1080),
            Self::TwoK => (2048, 1080),
            Self::FourK => (3840, 2160),
        };
        Canvas { width, height }
    }
}

/// Validated render output parameters.
///
/// Width, height and fps are positive integers; construction rejects anything else so invalid
/// values never reach project parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputParams {
    /// Output frame size.
    pub canvas: Canvas,
    /// Output frame rate (integer, `den == 1`).
    pub fps: Fps,
}

impl OutputParams {
    /// Validate integer parameters.
    pub fn new(width: i64, height: i64, fps: i64) -> WlmpResult<Self> {
        let positive = |name: &str, v: i64| -> WlmpResult<u32> {
            if v <= 0 {
                return Err(WlmpError::output_params(format!(
                    "{name} must be a positive integer, got {v}"
                )));
            }
            u32::try_from(v).map_err(|_| {
                WlmpError::output_params(format!("{name} is out of range, got {v}"))
            })
        };

        let width = positive("width", width)?;
        let height = positive("height", height)?;
        let fps = positive("fps", fps)?;
        Ok(Self {
            canvas: Canvas { width, height },
            fps: Fps::new(fps, 1)?,
        })
    }

    /// Validate textual parameters (e.g. from a form or command line).
    pub fn parse(width: &str, height: &str, fps: &str) -> WlmpResult<Self> {
        let int = |name: &str, s: &str| -> WlmpResult<i64> {
            s.trim().parse::<i64>().map_err(|_| {
                WlmpError::output_params(format!("{name} must be a positive integer, got '{s}'"))
            })
        };
        Self::new(int("width", width)?, int("height", height)?, int("fps", fps)?)
    }

    /// Output parameters for a resolution preset.
    pub fn from_preset(preset: ResolutionPreset, fps: i64) -> WlmpResult<Self> {
        let c = preset.canvas();
        Self::new(i64::from(c.width), i64::from(c.height), fps)
    }

    /// Output width in pixels as `f64`.
    pub fn width_f64(self) -> f64 {
        f64::from(self.canvas.width)
    }

    /// Output height in pixels as `f64`.
    pub fn height_f64(self) -> f64 {
        f64::from(self.canvas.height)
    }
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            canvas: ResolutionPreset::FourK.canvas(),
            fps: Fps { num: 30, den: 1 },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
