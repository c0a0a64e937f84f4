use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::model::SliceAxis;

// ---------------------------------------------------------------------------
// Catalog errors – fatal at startup
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no volumes (*.npy) found in {0}! Correct data path?")]
    Empty(PathBuf),

    #[error("listing data directory {path}")]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// Volume errors – loading and slicing
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("reading volume {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decoding .npy data")]
    Decode(#[source] io::Error),

    #[error("unsupported element type {0} (expected an integer or float array)")]
    UnsupportedDtype(String),

    #[error("expected a (depth, height, width[, channels]) array, got shape {0:?}")]
    UnsupportedShape(Vec<usize>),

    #[error("volume has a zero-sized axis: shape {0:?}")]
    ZeroSized(Vec<usize>),

    #[error("cursor {axis} = {index} lies outside the volume extent {len}")]
    CursorOutOfBounds {
        axis: SliceAxis,
        index: usize,
        len: usize,
    },

    #[error("array layout: {0}")]
    Layout(#[from] ndarray::ShapeError),
}
