//! Capabilities the input layer needs from the operating system.
//!
//! Everything that reads global OS state or injects input goes through one of
//! the traits below, so the translation logic above them can be exercised
//! against [`RecordingPlatform`] on any host.

mod recording;
#[cfg(windows)]
mod win32;

pub use recording::*;
#[cfg(windows)]
pub use win32::*;

use crate::{
    errors::*,
    input::{
        keyboard::VirtualKey,
        record::{InputRecord, KeyboardRecord, MouseRecord},
    },
    types::*,
};

/// Raw key state as reported by the platform.
///
/// The high bit of a state word is set while the key is down, the low bit
/// while a toggle key (Caps Lock, Num Lock, Scroll Lock) is on.
pub trait KeyStateProvider {
    /// Key state as seen by the calling thread's message queue.
    fn key_state(&self, vk: VirtualKey) -> i16;

    /// Physical key state at the time of the call, independent of any message
    /// queue.
    fn async_key_state(&self, vk: VirtualKey) -> i16;

    /// The full 256-entry keyboard state array.
    fn keyboard_state(&self) -> Result<[u8; 256]>;
}

/// Looks up and activates top-level windows.
pub trait WindowLocator {
    /// The main top-level window of a process: visible and unowned.
    fn window_for_process(&self, pid: u32) -> Option<WindowHandle>;

    /// Ids of all running processes whose executable name matches `name`,
    /// ignoring ASCII case and an `.exe` suffix.
    fn processes_by_name(&self, name: &str) -> Vec<u32>;

    /// The top-level window whose title is exactly `title`.
    fn find_window_by_title(&self, title: &str) -> Option<WindowHandle>;

    /// The window which currently has keyboard focus.
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Returns `true` while `window` names an existing window.
    fn is_window(&self, window: WindowHandle) -> bool;

    /// Brings `window` to the foreground.
    fn set_foreground(&self, window: WindowHandle) -> Result<()>;

    /// Shows `window` in its current size and position.
    fn show(&self, window: WindowHandle) -> Result<()>;
}

/// Delivers synthesized input.
pub trait InputSink {
    /// Extra information associated with the current thread's last message.
    /// Copied into every record so receivers can tell injected input apart.
    fn message_extra_info(&self) -> usize;

    /// Hardware scan code for `vk` under the current layout, or `0`.
    fn scan_code(&self, vk: VirtualKey) -> u8;

    /// Submits `records` to the unified input queue in one batch. Returns the
    /// number of records the OS accepted.
    fn send_input(&self, records: &[InputRecord]) -> Result<u32>;

    /// Issues one legacy keyboard event.
    fn legacy_keyboard(&self, record: &KeyboardRecord);

    /// Issues one legacy mouse event.
    fn legacy_mouse(&self, record: &MouseRecord);

    /// Places a message in the queue of the thread owning `window` and returns
    /// without waiting.
    fn post_message(&self, window: WindowHandle, msg: u32, wparam: usize, lparam: isize)
        -> Result<()>;

    /// Calls the window procedure of `window` and waits for it to return.
    fn send_message(&self, window: WindowHandle, msg: u32, wparam: usize, lparam: isize) -> isize;

    /// Current cursor position in screen coordinates.
    fn cursor_pos(&self) -> Result<ScreenPoint>;

    /// Moves the cursor without generating input.
    fn set_cursor_pos(&self, pos: ScreenPoint) -> Result<()>;

    /// Size of the primary screen in pixels.
    fn screen_size(&self) -> ScreenSize;
}

/// The full set of capabilities needed to synthesize input.
pub trait Platform: KeyStateProvider + WindowLocator + InputSink {}

impl<T> Platform for T where T: KeyStateProvider + WindowLocator + InputSink {}

/// Returns `true` if the high bit of a key state word is set.
pub(crate) const fn is_state_down(state: i16) -> bool {
    state < 0
}

/// Returns `true` if the low bit of a key state word is set.
pub(crate) const fn is_state_toggled(state: i16) -> bool {
    state & 1 != 0
}

/// Lowercases a process name and strips any `.exe` suffix.
pub(crate) fn normalize_process_name(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    lower
        .strip_suffix(".exe")
        .map(str::to_owned)
        .unwrap_or(lower)
}
