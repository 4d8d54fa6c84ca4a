//! CLI command implementations

pub mod filter;

use anyhow::{Context, Result};
use bmpfx_io::Bitmap;
use std::path::Path;

/// Load bitmap from path
pub fn load_bitmap(path: &Path) -> Result<Bitmap> {
    bmpfx_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save bitmap to path
pub fn save_bitmap(path: &Path, bitmap: &Bitmap) -> Result<()> {
    bmpfx_io::write(path, bitmap).with_context(|| format!("Failed to save: {}", path.display()))
}
