//! High level keyboard operations on top of a [`Dispatcher`].

use ::tracing::debug;

use super::{InputKey, KeyEvent, KeyMessage, KeyboardSnapshot, ModifierTracker, Modifiers};
use crate::{
    delay::Delay,
    dispatch::{Delivered, Delivery, Dispatcher},
    errors::*,
    input::codec::text_to_keys,
    platform::Platform,
    window::WindowTarget,
};

/// Presses keys, types text and queries key state.
///
/// # Example
///
/// ```no_run
/// # #[cfg(windows)]
/// # fn main() -> ::input_synth::errors::Result<()> {
/// use ::input_synth::{
///     dispatch::{Delivery, Dispatcher},
///     input::keyboard::{InputKey, Keyboard},
///     platform::Win32,
/// };
///
/// let dispatcher = Dispatcher::new(Win32);
/// let keyboard = Keyboard::new(&dispatcher).with_delivery(Delivery::Queue);
///
/// keyboard.type_text("Hello, World")?;
/// keyboard.chord(&[InputKey::Control, InputKey::A])?;
/// # Ok(())
/// # }
/// # #[cfg(not(windows))]
/// # fn main() {}
/// ```
pub struct Keyboard<'a, P> {
    dispatcher: &'a Dispatcher<P>,
    delivery: Delivery,
    target: WindowTarget,
    use_scan_code: bool,
}

impl<'a, P: Platform> Keyboard<'a, P> {
    /// A keyboard delivering through the input queue to whichever window has
    /// focus.
    pub fn new(dispatcher: &'a Dispatcher<P>) -> Self {
        Self {
            dispatcher,
            delivery: Delivery::Queue,
            target: WindowTarget::none(),
            use_scan_code: false,
        }
    }

    /// Mechanism used for every keystroke.
    pub fn with_delivery(self, delivery: Delivery) -> Self {
        Self { delivery, ..self }
    }

    /// Window focused before, or addressed by, every keystroke.
    pub fn with_target(self, target: WindowTarget) -> Self {
        Self { target, ..self }
    }

    /// Send keys by scan code rather than by virtual key.
    pub fn with_scan_codes(self, use_scan_code: bool) -> Self {
        Self {
            use_scan_code,
            ..self
        }
    }

    /// The modifiers currently held.
    pub fn modifiers(&self) -> Modifiers {
        self.tracker().current()
    }

    /// Returns `true` if `key` is down according to the thread's message
    /// queue.
    pub fn is_down(&self, key: InputKey) -> bool {
        self.tracker().is_down(key)
    }

    /// The inverse of [`is_down`](Self::is_down).
    pub fn is_up(&self, key: InputKey) -> bool {
        self.tracker().is_up(key)
    }

    /// Returns `true` if `key` is physically held right now.
    pub fn is_hardware_down(&self, key: InputKey) -> bool {
        self.tracker().is_hardware_down(key)
    }

    /// The inverse of [`is_hardware_down`](Self::is_hardware_down).
    pub fn is_hardware_up(&self, key: InputKey) -> bool {
        !self.is_hardware_down(key)
    }

    /// Returns `true` while a lock key such as Caps Lock is on.
    pub fn is_toggled(&self, key: InputKey) -> bool {
        self.tracker().is_toggled(key)
    }

    /// A consistent copy of the whole keyboard state.
    pub fn snapshot(&self) -> Result<KeyboardSnapshot> {
        KeyboardSnapshot::capture(self.dispatcher.platform())
    }

    /// Presses each of `keys`, in order.
    pub fn key_down(&self, keys: &[InputKey]) -> Result<Delivered> {
        self.send(keys, &[KeyMessage::KeyDown])
    }

    /// Releases each of `keys`, in order.
    pub fn key_up(&self, keys: &[InputKey]) -> Result<Delivered> {
        self.send(keys, &[KeyMessage::KeyUp])
    }

    /// Presses and releases each of `keys` in turn. With a press delay
    /// configured, all of `keys` go down, the delay runs once, then all are
    /// released.
    pub fn key_press(&self, keys: &[InputKey]) -> Result<Delivered> {
        match self.dispatcher.press_delay() {
            Some(delay) => self.key_press_with(keys, delay),
            None => self.send(keys, &[KeyMessage::KeyDown, KeyMessage::KeyUp]),
        }
    }

    /// Presses all of `keys`, waits on `delay`, then releases all of them.
    pub fn key_press_with(&self, keys: &[InputKey], delay: &dyn Delay) -> Result<Delivered> {
        let down = self.key_down(keys)?;
        delay.wait();
        self.key_up(keys).map(|up| down.merge(up))
    }

    /// Holds `keys` down together, then releases them in reverse order, as
    /// for a shortcut such as Control+C.
    pub fn chord(&self, keys: &[InputKey]) -> Result<Delivered> {
        let released: Vec<_> = keys.iter().rev().copied().collect();
        let down = self.event(keys, &[KeyMessage::KeyDown]);
        let up = self.event(&released, &[KeyMessage::KeyUp]);

        match self.dispatcher.press_delay() {
            Some(delay) => {
                let pressed = self.dispatcher.deliver(&down, self.delivery)?;
                delay.wait();
                self.dispatcher
                    .deliver(&up, self.delivery)
                    .map(|released| pressed.merge(released))
            }
            None => self.dispatcher.deliver_all(&[down, up], self.delivery),
        }
    }

    /// Types `text` on a US layout, holding Shift where a character needs
    /// it. Characters without a key are skipped.
    pub fn type_text(&self, text: &str) -> Result<Delivered> {
        let keys = text_to_keys(text);
        debug!(chars = text.chars().count(), keys = keys.len(), "Typing text");

        let mut events = Vec::with_capacity(keys.len() * 2);
        let mut shift_held = None;
        for key in keys {
            if key.is_shift() {
                events.push(self.event(&[key], &[KeyMessage::KeyDown]));
                shift_held = Some(key);
                continue;
            }

            events.push(self.event(&[key], &[KeyMessage::KeyDown, KeyMessage::KeyUp]));
            if let Some(shift) = shift_held.take() {
                events.push(self.event(&[shift], &[KeyMessage::KeyUp]));
            }
        }
        if let Some(shift) = shift_held {
            events.push(self.event(&[shift], &[KeyMessage::KeyUp]));
        }

        self.dispatcher.deliver_all(&events, self.delivery)
    }

    /// Types `text` as unicode input, independent of the keyboard layout.
    /// Always uses the input queue.
    pub fn type_unicode(&self, text: &str) -> Result<Delivered> {
        self.dispatcher.type_unicode(text, &self.target)
    }

    fn send(&self, keys: &[InputKey], messages: &[KeyMessage]) -> Result<Delivered> {
        self.dispatcher
            .deliver(&self.event(keys, messages), self.delivery)
    }

    fn event(&self, keys: &[InputKey], messages: &[KeyMessage]) -> KeyEvent {
        KeyEvent::new(keys, messages)
            .with_scan_codes(vec![self.use_scan_code; keys.len()])
            .with_target(self.target.clone())
    }

    fn tracker(&self) -> ModifierTracker<'_, P> {
        ModifierTracker::new(self.dispatcher.platform())
    }
}
