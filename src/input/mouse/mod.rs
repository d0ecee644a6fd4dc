//! Mouse buttons, scrolling and cursor movement.

mod event;
mod kinds;
mod pointer;

pub use event::*;
pub use kinds::*;
pub use pointer::*;
