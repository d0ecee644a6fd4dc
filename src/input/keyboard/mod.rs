//! Keyboard keys, modifier state and keystroke events.

mod codes;
mod event;
mod keyboard;
mod modifiers;
mod snapshot;

pub use codes::*;
pub use event::*;
pub use keyboard::*;
pub use modifiers::*;
pub use snapshot::*;
