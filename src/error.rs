//! Crate error type.

use std::alloc::LayoutError;
use std::error::Error;
use std::fmt;

/// Errors surfaced by the fallible parts of the crate, currently the aligned
/// buffer utilities.
#[derive(Debug)]
pub enum LanewiseError {
    /// The requested size and alignment do not form a valid allocation
    /// layout, for example a non-power-of-two alignment.
    Layout(LayoutError),
    /// The allocator returned null for a valid layout.
    Allocation { size: usize, align: usize },
}

impl fmt::Display for LanewiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanewiseError::Layout(err) => write!(f, "invalid allocation layout: {err}"),
            LanewiseError::Allocation { size, align } => {
                write!(f, "failed to allocate {size} bytes aligned to {align}")
            }
        }
    }
}

impl Error for LanewiseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LanewiseError::Layout(err) => Some(err),
            LanewiseError::Allocation { .. } => None,
        }
    }
}

impl From<LayoutError> for LanewiseError {
    fn from(err: LayoutError) -> Self {
        LanewiseError::Layout(err)
    }
}
