//! Filter selection.
//!
//! A [`Filter`] names exactly one of the four operations. It is parsed from
//! the one-letter selector (`g`, `r`, `b`, `e`) or the long name, and applied
//! with [`Filter::apply`].

use crate::{color, filter, transform, OpsError, OpsResult};
use bmpfx_core::Image;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One of the four supported image filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Channel mean written to all three channels.
    Grayscale,
    /// Horizontal mirror.
    Reflect,
    /// 3x3 box blur over in-bounds neighbours.
    Blur,
    /// Sobel gradient magnitude per channel.
    Edges,
}

impl Filter {
    /// All filters, in selector order.
    pub const ALL: [Filter; 4] = [Filter::Grayscale, Filter::Reflect, Filter::Blur, Filter::Edges];

    /// Looks up a filter by its one-letter selector.
    pub fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'g' => Some(Filter::Grayscale),
            'r' => Some(Filter::Reflect),
            'b' => Some(Filter::Blur),
            'e' => Some(Filter::Edges),
            _ => None,
        }
    }

    /// Returns the one-letter selector.
    pub fn flag(&self) -> char {
        match self {
            Filter::Grayscale => 'g',
            Filter::Reflect => 'r',
            Filter::Blur => 'b',
            Filter::Edges => 'e',
        }
    }

    /// Returns the long name.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Reflect => "reflect",
            Filter::Blur => "blur",
            Filter::Edges => "edges",
        }
    }

    /// Applies the filter to `image` in place.
    ///
    /// Dimensions are preserved. Grayscale and reflect cannot fail; blur and
    /// edges fail only if their scratch buffer cannot be allocated, in which
    /// case `image` is left untouched.
    pub fn apply(&self, image: &mut Image) -> OpsResult<()> {
        debug!(filter = self.name(), width = image.width(), height = image.height(), "Applying filter");
        match self {
            Filter::Grayscale => color::grayscale(image),
            Filter::Reflect => transform::reflect(image),
            Filter::Blur => filter::blur(image)?,
            Filter::Edges => filter::edges(image)?,
        }
        Ok(())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('-').unwrap_or(s);
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(filter) = Filter::from_flag(c) {
                return Ok(filter);
            }
        }
        Filter::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpsError::InvalidParameter(format!("unknown filter '{s}'")))
    }
}
