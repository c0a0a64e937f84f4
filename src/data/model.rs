use std::fmt;

use ndarray::{Array3, Array4, Axis};

use super::error::VolumeError;

/// Full intensity; threshold highlighting clamps voxels to this value.
pub const MAX_INTENSITY: f32 = 255.0;

/// Channel count of the display encoding (RGB).
pub const DISPLAY_CHANNELS: usize = 3;

// ---------------------------------------------------------------------------
// SliceAxis – which volume axis a cross-section is taken along
// ---------------------------------------------------------------------------

/// The three orthogonal cross-sections, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceAxis {
    /// Fixed depth: an (H, W) image.
    Z,
    /// Fixed row: a (D, W) image.
    X,
    /// Fixed column: a (D, H) image.
    Y,
}

impl SliceAxis {
    pub const ALL: [SliceAxis; 3] = [SliceAxis::Z, SliceAxis::X, SliceAxis::Y];

    /// Position of this view in the panel grid (and of the sliced axis in the array).
    pub fn index(self) -> usize {
        match self {
            SliceAxis::Z => 0,
            SliceAxis::X => 1,
            SliceAxis::Y => 2,
        }
    }
}

impl fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceAxis::Z => write!(f, "z"),
            SliceAxis::X => write!(f, "x"),
            SliceAxis::Y => write!(f, "y"),
        }
    }
}

// ---------------------------------------------------------------------------
// Cursor – the point where the three cross-sections meet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub z: usize,
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    /// Centre of a (depth, height, width) volume, rounding down.
    pub fn centered((depth, height, width): (usize, usize, usize)) -> Self {
        Self {
            z: depth / 2,
            x: height / 2,
            y: width / 2,
        }
    }

    pub fn get(&self, axis: SliceAxis) -> usize {
        match axis {
            SliceAxis::Z => self.z,
            SliceAxis::X => self.x,
            SliceAxis::Y => self.y,
        }
    }

    /// Guide line positions for a view as `(vertical, horizontal)`.
    ///
    /// The Z view marks `x` vertically and `y` horizontally; the X and Y views
    /// mark their pointer-driven coordinate vertically and `z` horizontally.
    pub fn guides(&self, axis: SliceAxis) -> (usize, usize) {
        match axis {
            SliceAxis::Z => (self.x, self.y),
            SliceAxis::X => (self.x, self.z),
            SliceAxis::Y => (self.y, self.z),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(z={}, x={}, y={})", self.z, self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Volume – one loaded OCT scan
// ---------------------------------------------------------------------------

/// A scan of shape (depth, height, width, channels), widened to `f32`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Display label: file name without the `.npy` extension.
    pub name: String,
    pub data: Array4<f32>,
}

impl Volume {
    pub fn new(name: impl Into<String>, data: Array4<f32>) -> Result<Self, VolumeError> {
        if data.is_empty() {
            return Err(VolumeError::ZeroSized(data.shape().to_vec()));
        }
        Ok(Self {
            name: name.into(),
            data,
        })
    }

    /// Spatial extent as (depth, height, width).
    pub fn extent(&self) -> (usize, usize, usize) {
        let (d, h, w, _) = self.data.dim();
        (d, h, w)
    }

    pub fn channels(&self) -> usize {
        self.data.dim().3
    }

    /// Extract the cross-section of this volume at `cursor` along `axis`.
    pub fn slice(&self, axis: SliceAxis, cursor: &Cursor) -> Result<Slice, VolumeError> {
        let index = cursor.get(axis);
        let len = self.data.len_of(Axis(axis.index()));
        if index >= len {
            return Err(VolumeError::CursorOutOfBounds { axis, index, len });
        }
        let (vertical, horizontal) = cursor.guides(axis);
        Ok(Slice {
            axis,
            pixels: self.data.index_axis(Axis(axis.index()), index).to_owned(),
            vertical_guide: vertical,
            horizontal_guide: horizontal,
        })
    }
}

// ---------------------------------------------------------------------------
// Slice – one 2-D cross-section ready for display
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub axis: SliceAxis,
    /// (rows, columns, channels).
    pub pixels: Array3<f32>,
    /// Column marked by the vertical guide line.
    pub vertical_guide: usize,
    /// Row marked by the horizontal guide line.
    pub horizontal_guide: usize,
}

impl Slice {
    pub fn rows(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn columns(&self) -> usize {
        self.pixels.dim().1
    }
}
