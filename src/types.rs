//! Common types shared between the input, window and platform layers.

use ::std::{fmt, num::NonZeroIsize};

/// An opaque, non-null handle to a native top-level window.
///
/// A [`WindowHandle`] is only a snapshot: the window it names can be destroyed
/// at any time, after which calls addressed to the handle simply fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(NonZeroIsize);

impl WindowHandle {
    /// Wraps a raw handle value. Returns `None` for the null handle.
    pub const fn new(raw: isize) -> Option<Self> {
        match NonZeroIsize::new(raw) {
            Some(h) => Some(Self(h)),
            None => None,
        }
    }

    /// The raw handle value.
    pub const fn raw(self) -> isize {
        self.0.get()
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.raw())
    }
}

/// Width and height of the primary screen, in pixels.
pub type ScreenSize = ::geoms::d2::Size2D<i32>;

/// A point in screen coordinates, in pixels.
pub type ScreenPoint = ::geoms::d2::Point2D<i32>;
