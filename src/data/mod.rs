/// Data layer: volumes, the catalog, loading and threshold highlighting.
///
/// Architecture:
/// ```text
///   data directory (*.npy)
///        │
///        ▼
///   ┌──────────┐
///   │ catalog  │  list volume files, fixed at startup
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  decode .npy → Volume (D, H, W, C) as f32
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ threshold │  original → display volume
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model   │  Volume::slice(axis, cursor) → Slice
///   └──────────┘
/// ```

pub mod catalog;
pub mod error;
pub mod loader;
pub mod model;
pub mod threshold;

#[cfg(test)]
pub(crate) mod tests;
