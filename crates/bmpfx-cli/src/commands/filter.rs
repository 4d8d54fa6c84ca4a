//! Filter command
//!
//! Decodes the input, applies the selected filter, then creates and writes
//! the output. Nothing is written if decoding or filtering fails.

use crate::FilterArgs;
use anyhow::{Context, Result};
use bmpfx_ops::OpsError;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: FilterArgs) -> Result<()> {
    let filter = args
        .filter()
        .ok_or_else(|| OpsError::InvalidParameter("no filter selected".to_string()))?;
    trace!(input = %args.input.display(), output = %args.output.display(), %filter, "filter::run");

    let mut bitmap = super::load_bitmap(&args.input)?;
    info!(%filter, width = bitmap.width(), height = bitmap.height(), "Applying filter");

    filter
        .apply(&mut bitmap.image)
        .with_context(|| format!("Failed to apply {filter}"))?;

    super::save_bitmap(&args.output, &bitmap)?;
    info!(output = %args.output.display(), "Done");

    Ok(())
}
