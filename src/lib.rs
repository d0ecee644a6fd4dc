//! Synthesize keyboard and mouse input on Windows.
//!
//! Input is described in abstract terms ([`InputKey`](input::keyboard::InputKey),
//! [`ScrollKind`](input::mouse::ScrollKind), a sentence of text), translated
//! into platform input records, and delivered by a [`Dispatcher`] through the
//! unified input queue, the legacy event calls, or window messages addressed
//! to a [`WindowTarget`].
//!
//! All translation logic is platform independent. The operating system is
//! reached only through the traits in [`platform`]: [`platform::Win32`] on
//! Windows, or [`platform::RecordingPlatform`] for tests and dry runs.
//!
//! ```
//! use ::input_synth::{
//!     dispatch::Dispatcher,
//!     input::keyboard::{InputKey, Keyboard},
//!     platform::RecordingPlatform,
//! };
//!
//! let dispatcher = Dispatcher::new(RecordingPlatform::new());
//! let keyboard = Keyboard::new(&dispatcher);
//!
//! keyboard.type_text("Hello?").unwrap();
//! keyboard.key_press(&[InputKey::Enter]).unwrap();
//! assert_eq!(dispatcher.platform().injected().len(), 18);
//! ```

pub mod delay;
pub mod dispatch;
pub mod errors;
pub mod input;
pub mod platform;
pub mod types;
pub mod window;

pub use dispatch::{Builder, Delivered, Delivery, Dispatcher};
pub use window::WindowTarget;
