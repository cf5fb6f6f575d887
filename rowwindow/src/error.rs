use core::fmt;

/// Reasons `WindowedRowRenderer::init` can refuse to build a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// `row_height` was zero; no window can be derived from it.
    ZeroRowHeight,
    /// The render target reported no viewport, so the initial window can't be measured.
    ContainerUnavailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRowHeight => f.write_str("row height must be greater than zero"),
            Self::ContainerUnavailable => {
                f.write_str("scroll container is not attached; cannot measure viewport")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
