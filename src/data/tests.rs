use std::fs::File;
use std::path::Path;

use ndarray::Array4;
use npyz::{AutoSerialize, Order, WriteOptions, WriterBuilder};
use tempfile::tempdir;

use super::catalog::Catalog;
use super::error::{CatalogError, VolumeError};
use super::loader::{load_volume, volume_label};
use super::model::{Cursor, SliceAxis, Volume};

/// Write `values` as a C-order `.npy` file with the given shape.
pub(crate) fn write_npy<T: AutoSerialize + Copy>(path: &Path, shape: &[u64], values: &[T]) {
    write_npy_ordered(path, shape, values, Order::C);
}

pub(crate) fn write_npy_ordered<T: AutoSerialize + Copy>(
    path: &Path,
    shape: &[u64],
    values: &[T],
    order: Order,
) {
    let mut file = File::create(path).expect("create npy");
    let mut writer = WriteOptions::<T>::new()
        .default_dtype()
        .shape(shape)
        .order(order)
        .writer(&mut file)
        .begin_nd()
        .expect("npy header");
    for value in values {
        writer.push(value).expect("npy element");
    }
    writer.finish().expect("finish npy");
}

/// A u8 volume whose voxel value encodes its position modulo 256.
pub(crate) fn write_volume(path: &Path, (d, h, w, c): (usize, usize, usize, usize)) {
    let values: Vec<u8> = (0..d * h * w * c).map(|i| (i % 256) as u8).collect();
    write_npy(path, &[d as u64, h as u64, w as u64, c as u64], &values);
}

// -- Catalog --

#[test]
fn catalog_lists_only_npy_files() {
    let dir = tempdir().expect("tempdir");
    write_volume(&dir.path().join("a.npy"), (1, 1, 1, 3));
    write_volume(&dir.path().join("b.npy"), (1, 1, 1, 3));
    write_volume(&dir.path().join(".hidden.npy"), (1, 1, 1, 3));
    std::fs::write(dir.path().join("notes.txt"), "not a volume").expect("write txt");
    std::fs::write(dir.path().join("scan.npz"), "archive").expect("write npz");
    std::fs::create_dir(dir.path().join("folder.npy")).expect("mkdir");

    let catalog = Catalog::scan(dir.path()).expect("catalog");
    let mut names: Vec<String> = (0..catalog.len())
        .map(|i| volume_label(catalog.path(i)))
        .collect();
    names.sort();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.last_index(), 1);
}

#[test]
fn empty_catalog_is_an_error() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("readme.md"), "#").expect("write");
    let err = Catalog::scan(dir.path()).expect_err("no volumes");
    assert!(matches!(err, CatalogError::Empty(_)));
    assert!(err.to_string().contains("no volumes"));
}

#[test]
fn missing_directory_is_a_listing_error() {
    let dir = tempdir().expect("tempdir");
    let err = Catalog::scan(&dir.path().join("absent")).expect_err("missing dir");
    assert!(matches!(err, CatalogError::Listing { .. }));
}

// -- Loader --

#[test]
fn loads_u8_volume_with_label() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("patient_03.npy");
    write_volume(&path, (2, 3, 4, 3));

    let volume = load_volume(&path).expect("load");
    assert_eq!(volume.name, "patient_03");
    assert_eq!(volume.extent(), (2, 3, 4));
    assert_eq!(volume.channels(), 3);
    // [1, 2, 3, 1] sits at flat C-order index ((1 * 3 + 2) * 4 + 3) * 3 + 1 = 70.
    assert_eq!(volume.data[[1, 2, 3, 1]], 70.0);
}

#[test]
fn widens_float_and_wide_integer_types() {
    let dir = tempdir().expect("tempdir");

    let f64_path = dir.path().join("f64.npy");
    write_npy(&f64_path, &[1, 1, 2, 3], &[0.5_f64, 1.0, 2.0, 3.0, 254.5, 255.0]);
    let volume = load_volume(&f64_path).expect("load f64");
    assert_eq!(volume.data[[0, 0, 1, 1]], 254.5);

    let i16_path = dir.path().join("i16.npy");
    write_npy(&i16_path, &[1, 1, 1, 3], &[-3_i16, 0, 300]);
    let volume = load_volume(&i16_path).expect("load i16");
    assert_eq!(volume.data[[0, 0, 0, 0]], -3.0);
    assert_eq!(volume.data[[0, 0, 0, 2]], 300.0);
}

#[test]
fn grey_volume_is_replicated_into_three_channels() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("grey.npy");
    write_npy(&path, &[2, 2, 2], &[0_u8, 1, 2, 3, 4, 5, 6, 7]);

    let volume = load_volume(&path).expect("load");
    assert_eq!(volume.data.dim(), (2, 2, 2, 3));
    for c in 0..3 {
        assert_eq!(volume.data[[1, 0, 1, c]], 5.0);
    }
}

#[test]
fn fortran_order_is_respected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("fortran.npy");
    // Column-major: the first axis varies fastest.
    let values: Vec<u8> = (0..12).collect();
    write_npy_ordered(&path, &[2, 2, 1, 3], &values, Order::Fortran);

    let volume = load_volume(&path).expect("load");
    assert_eq!(volume.data[[1, 0, 0, 0]], 1.0);
    assert_eq!(volume.data[[0, 1, 0, 0]], 2.0);
    assert_eq!(volume.data[[0, 0, 0, 1]], 4.0);
}

#[test]
fn rejects_unsupported_shapes_and_types() {
    let dir = tempdir().expect("tempdir");

    let flat = dir.path().join("flat.npy");
    write_npy(&flat, &[4, 4], &[0_u8; 16]);
    assert!(matches!(
        load_volume(&flat),
        Err(VolumeError::UnsupportedShape(shape)) if shape == vec![4, 4]
    ));

    let empty = dir.path().join("empty.npy");
    write_npy::<u8>(&empty, &[0, 4, 4, 3], &[]);
    assert!(matches!(load_volume(&empty), Err(VolumeError::ZeroSized(_))));

    let boolean = dir.path().join("mask.npy");
    write_npy(&boolean, &[1, 1, 1, 1], &[true]);
    assert!(matches!(
        load_volume(&boolean),
        Err(VolumeError::UnsupportedDtype(_))
    ));
}

#[test]
fn unreadable_file_reports_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("missing.npy");
    let err = load_volume(&path).expect_err("missing file");
    assert!(matches!(err, VolumeError::Read { .. }));
    assert!(err.to_string().contains("missing.npy"));

    let garbage = dir.path().join("garbage.npy");
    std::fs::write(&garbage, b"definitely not numpy").expect("write");
    assert!(matches!(load_volume(&garbage), Err(VolumeError::Decode(_))));
}

// -- Model --

#[test]
fn cursor_starts_at_volume_center() {
    assert_eq!(Cursor::centered((10, 20, 30)), Cursor { z: 5, x: 10, y: 15 });
    assert_eq!(Cursor::centered((1, 3, 5)), Cursor { z: 0, x: 1, y: 2 });
}

#[test]
fn slices_are_axis_aligned() {
    let data = Array4::from_shape_fn((4, 5, 6, 3), |(z, x, y, c)| (z * 1000 + x * 100 + y * 10 + c) as f32);
    let volume = Volume::new("cube", data).expect("volume");
    let cursor = Cursor { z: 1, x: 2, y: 3 };

    let z = volume.slice(SliceAxis::Z, &cursor).expect("z slice");
    assert_eq!(z.pixels.dim(), (5, 6, 3));
    assert_eq!(z.pixels[[4, 5, 2]], 1452.0);
    assert_eq!((z.vertical_guide, z.horizontal_guide), (2, 3));

    let x = volume.slice(SliceAxis::X, &cursor).expect("x slice");
    assert_eq!(x.pixels.dim(), (4, 6, 3));
    assert_eq!(x.pixels[[3, 1, 0]], 3210.0);
    assert_eq!((x.vertical_guide, x.horizontal_guide), (2, 1));

    let y = volume.slice(SliceAxis::Y, &cursor).expect("y slice");
    assert_eq!(y.pixels.dim(), (4, 5, 3));
    assert_eq!(y.pixels[[0, 4, 1]], 431.0);
    assert_eq!((y.vertical_guide, y.horizontal_guide), (3, 1));
}

#[test]
fn slicing_outside_the_volume_is_reported() {
    let volume = Volume::new("small", Array4::zeros((2, 2, 2, 3))).expect("volume");
    let cursor = Cursor { z: 0, x: 5, y: 0 };
    assert!(volume.slice(SliceAxis::Z, &cursor).is_ok());
    assert!(matches!(
        volume.slice(SliceAxis::X, &cursor),
        Err(VolumeError::CursorOutOfBounds { axis: SliceAxis::X, index: 5, len: 2 })
    ));
}
