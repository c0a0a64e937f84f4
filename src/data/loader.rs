use std::io::Read;
use std::path::Path;

use ndarray::{Array3, Array4, Axis, ShapeBuilder};
use npyz::{DType, NpyFile, Order, TypeChar};

use super::error::VolumeError;
use super::model::{Volume, DISPLAY_CHANNELS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one OCT volume from a `.npy` file.
///
/// The display label is the file name with its extension stripped.
pub fn load_volume(path: &Path) -> Result<Volume, VolumeError> {
    let bytes = std::fs::read(path).map_err(|source| VolumeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let volume = read_volume(volume_label(path), &bytes[..])?;

    let (d, h, w) = volume.extent();
    log::info!(
        "Loaded volume '{}' ({d}x{h}x{w}, {} channels)",
        volume.name,
        volume.channels()
    );
    Ok(volume)
}

/// File stem used as the window label, e.g. `scan_07.npy` → `scan_07`.
pub fn volume_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Decode an in-memory `.npy` stream.
///
/// Accepted layouts:
/// * `(depth, height, width, channels)` – used as-is
/// * `(depth, height, width)` – grey-level, replicated into three channels
pub fn read_volume(name: String, reader: impl Read) -> Result<Volume, VolumeError> {
    let npy = NpyFile::new(reader).map_err(VolumeError::Decode)?;
    let shape: Vec<usize> = npy.shape().iter().map(|&n| n as usize).collect();
    let fortran = matches!(npy.order(), Order::Fortran);
    let values = widen_to_f32(npy)?;
    Volume::new(name, arrange(&shape, fortran, values)?)
}

// -- Element types --

/// Read all elements, widening any integer or float type to `f32`.
fn widen_to_f32<R: Read>(npy: NpyFile<R>) -> Result<Vec<f32>, VolumeError> {
    let type_str = match npy.dtype() {
        DType::Plain(ts) => ts,
        other => return Err(VolumeError::UnsupportedDtype(format!("{other:?}"))),
    };

    let values = match (type_str.type_char(), type_str.size_field()) {
        (TypeChar::Uint, 1) => convert(npy.into_vec::<u8>(), f32::from)?,
        (TypeChar::Uint, 2) => convert(npy.into_vec::<u16>(), f32::from)?,
        (TypeChar::Uint, 4) => convert(npy.into_vec::<u32>(), |v| v as f32)?,
        (TypeChar::Uint, 8) => convert(npy.into_vec::<u64>(), |v| v as f32)?,
        (TypeChar::Int, 1) => convert(npy.into_vec::<i8>(), f32::from)?,
        (TypeChar::Int, 2) => convert(npy.into_vec::<i16>(), f32::from)?,
        (TypeChar::Int, 4) => convert(npy.into_vec::<i32>(), |v| v as f32)?,
        (TypeChar::Int, 8) => convert(npy.into_vec::<i64>(), |v| v as f32)?,
        (TypeChar::Float, 4) => npy.into_vec::<f32>().map_err(VolumeError::Decode)?,
        (TypeChar::Float, 8) => convert(npy.into_vec::<f64>(), |v| v as f32)?,
        _ => return Err(VolumeError::UnsupportedDtype(type_str.to_string())),
    };
    Ok(values)
}

fn convert<T>(
    raw: std::io::Result<Vec<T>>,
    widen: impl Fn(T) -> f32,
) -> Result<Vec<f32>, VolumeError> {
    Ok(raw.map_err(VolumeError::Decode)?.into_iter().map(widen).collect())
}

// -- Shapes --

fn arrange(shape: &[usize], fortran: bool, values: Vec<f32>) -> Result<Array4<f32>, VolumeError> {
    match *shape {
        [d, h, w, c] => Ok(Array4::from_shape_vec((d, h, w, c).set_f(fortran), values)?),
        [d, h, w] => {
            let grey = Array3::from_shape_vec((d, h, w).set_f(fortran), values)?.insert_axis(Axis(3));
            let rgb = grey
                .broadcast((d, h, w, DISPLAY_CHANNELS))
                .ok_or_else(|| VolumeError::UnsupportedShape(shape.to_vec()))?;
            Ok(rgb.to_owned())
        }
        _ => Err(VolumeError::UnsupportedShape(shape.to_vec())),
    }
}
