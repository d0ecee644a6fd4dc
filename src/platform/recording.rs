//! An in-memory platform which records every call made against it.

use ::parking_lot::Mutex;
use ::tracing::trace;

use super::{normalize_process_name, InputSink, KeyStateProvider, WindowLocator};
use crate::{
    errors::*,
    input::{
        keyboard::VirtualKey,
        record::{InputRecord, KeyboardRecord, MouseRecord},
    },
    types::*,
};

/// Error code reported for calls addressed to an unknown window.
const ERROR_INVALID_WINDOW_HANDLE: i32 = 1400;

/// A window known to a [`RecordingPlatform`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeWindow {
    pub handle: WindowHandle,
    pub process_id: u32,
    pub process_name: String,
    pub title: String,
}

/// A call which reached a [`RecordingPlatform`], in the order it was made.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    SendInput(Vec<InputRecord>),
    LegacyKeyboard(KeyboardRecord),
    LegacyMouse(MouseRecord),
    PostMessage {
        window: WindowHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    },
    SendMessage {
        window: WindowHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    },
    SetForeground(WindowHandle),
    Show(WindowHandle),
    SetCursorPos(ScreenPoint),
}

struct State {
    keyboard: [u8; 256],
    windows: Vec<FakeWindow>,
    foreground: Option<WindowHandle>,
    cursor: ScreenPoint,
    screen: ScreenSize,
    accept_limit: Option<u32>,
    message_result: isize,
    extra_info: usize,
    calls: Vec<Call>,
}

/// A platform backend which keeps all state in memory and logs every call.
///
/// Key state, windows and the number of records the "OS" accepts are all
/// scripted by the caller. The log can be shared by reference across threads.
pub struct RecordingPlatform {
    state: Mutex<State>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPlatform {
    /// A platform with no windows, no keys down and a 1920x1080 screen.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                keyboard: [0; 256],
                windows: Vec::new(),
                foreground: None,
                cursor: ScreenPoint { x: 0, y: 0 },
                screen: ScreenSize {
                    width: 1920,
                    height: 1080,
                },
                accept_limit: None,
                message_result: 0,
                extra_info: 0,
                calls: Vec::new(),
            }),
        }
    }

    /// Marks `vk` as down.
    pub fn press(&self, vk: VirtualKey) {
        self.update_key(vk, |byte| byte | 0x80);
    }

    /// Marks `vk` as up.
    pub fn release(&self, vk: VirtualKey) {
        self.update_key(vk, |byte| byte & !0x80);
    }

    /// Flips the toggle state of `vk`.
    pub fn toggle(&self, vk: VirtualKey) {
        self.update_key(vk, |byte| byte ^ 0x01);
    }

    /// Registers a window.
    pub fn add_window(&self, window: FakeWindow) {
        self.state.lock().windows.push(window);
    }

    /// Sets the window reported as having focus.
    pub fn set_foreground_window(&self, window: Option<WindowHandle>) {
        self.state.lock().foreground = window;
    }

    /// Caps the number of records each `send_input` call accepts.
    pub fn set_accept_limit(&self, limit: Option<u32>) {
        self.state.lock().accept_limit = limit;
    }

    /// Result returned by `send_message` for known windows.
    pub fn set_message_result(&self, result: isize) {
        self.state.lock().message_result = result;
    }

    /// Value returned by `message_extra_info`.
    pub fn set_extra_info(&self, extra_info: usize) {
        self.state.lock().extra_info = extra_info;
    }

    /// Sets the size reported for the primary screen.
    pub fn set_screen_size(&self, size: ScreenSize) {
        self.state.lock().screen = size;
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Every record injected through either the input queue or the legacy
    /// calls, in order.
    pub fn injected(&self) -> Vec<InputRecord> {
        self.state
            .lock()
            .calls
            .iter()
            .flat_map(|call| match call {
                Call::SendInput(records) => records.clone(),
                Call::LegacyKeyboard(record) => vec![(*record).into()],
                Call::LegacyMouse(record) => vec![(*record).into()],
                _ => Vec::new(),
            })
            .collect()
    }

    /// Forgets all recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, call: Call) {
        trace!(?call, "Recorded platform call");
        self.state.lock().calls.push(call);
    }

    fn update_key(&self, vk: VirtualKey, f: impl FnOnce(u8) -> u8) {
        if let Some(byte) = self.state.lock().keyboard.get_mut(vk.value() as usize) {
            *byte = f(*byte);
        }
    }

    fn key_byte(&self, vk: VirtualKey) -> u8 {
        self.state
            .lock()
            .keyboard
            .get(vk.value() as usize)
            .copied()
            .unwrap_or_default()
    }

    fn knows(&self, window: WindowHandle) -> bool {
        self.state.lock().windows.iter().any(|w| w.handle == window)
    }

    fn invalid_window(window: WindowHandle) -> Error {
        Error::new(ErrorKind::Os {
            code: ERROR_INVALID_WINDOW_HANDLE,
            message: format!("Invalid window handle {window}."),
        })
    }
}

impl KeyStateProvider for RecordingPlatform {
    fn key_state(&self, vk: VirtualKey) -> i16 {
        let byte = self.key_byte(vk);
        let down = if byte & 0x80 != 0 { i16::MIN } else { 0 };
        down | (byte & 0x01) as i16
    }

    fn async_key_state(&self, vk: VirtualKey) -> i16 {
        if self.key_byte(vk) & 0x80 != 0 {
            i16::MIN
        } else {
            0
        }
    }

    fn keyboard_state(&self) -> Result<[u8; 256]> {
        Ok(self.state.lock().keyboard)
    }
}

impl WindowLocator for RecordingPlatform {
    fn window_for_process(&self, pid: u32) -> Option<WindowHandle> {
        self.state
            .lock()
            .windows
            .iter()
            .find(|w| w.process_id == pid)
            .map(|w| w.handle)
    }

    fn processes_by_name(&self, name: &str) -> Vec<u32> {
        let wanted = normalize_process_name(name);
        self.state
            .lock()
            .windows
            .iter()
            .filter(|w| normalize_process_name(&w.process_name) == wanted)
            .map(|w| w.process_id)
            .collect()
    }

    fn find_window_by_title(&self, title: &str) -> Option<WindowHandle> {
        self.state
            .lock()
            .windows
            .iter()
            .find(|w| w.title == title)
            .map(|w| w.handle)
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        self.state.lock().foreground
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        self.knows(window)
    }

    fn set_foreground(&self, window: WindowHandle) -> Result<()> {
        self.record(Call::SetForeground(window));
        if !self.knows(window) {
            return Err(Self::invalid_window(window)).function("SetForegroundWindow");
        }
        self.state.lock().foreground = Some(window);
        Ok(())
    }

    fn show(&self, window: WindowHandle) -> Result<()> {
        self.record(Call::Show(window));
        if self.knows(window) {
            Ok(())
        } else {
            Err(Self::invalid_window(window)).function("ShowWindow")
        }
    }
}

impl InputSink for RecordingPlatform {
    fn message_extra_info(&self) -> usize {
        self.state.lock().extra_info
    }

    /// The low byte of the virtual key stands in for a real scan code.
    fn scan_code(&self, vk: VirtualKey) -> u8 {
        (vk.value() & 0xFF) as u8
    }

    fn send_input(&self, records: &[InputRecord]) -> Result<u32> {
        self.record(Call::SendInput(records.to_vec()));
        let submitted = records.len() as u32;
        Ok(self
            .state
            .lock()
            .accept_limit
            .map_or(submitted, |limit| limit.min(submitted)))
    }

    fn legacy_keyboard(&self, record: &KeyboardRecord) {
        self.record(Call::LegacyKeyboard(*record));
    }

    fn legacy_mouse(&self, record: &MouseRecord) {
        self.record(Call::LegacyMouse(*record));
    }

    fn post_message(
        &self,
        window: WindowHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    ) -> Result<()> {
        self.record(Call::PostMessage {
            window,
            msg,
            wparam,
            lparam,
        });
        if self.knows(window) {
            Ok(())
        } else {
            Err(Self::invalid_window(window)).function("PostMessageW")
        }
    }

    fn send_message(&self, window: WindowHandle, msg: u32, wparam: usize, lparam: isize) -> isize {
        self.record(Call::SendMessage {
            window,
            msg,
            wparam,
            lparam,
        });
        if self.knows(window) {
            self.state.lock().message_result
        } else {
            0
        }
    }

    fn cursor_pos(&self) -> Result<ScreenPoint> {
        Ok(self.state.lock().cursor)
    }

    fn set_cursor_pos(&self, pos: ScreenPoint) -> Result<()> {
        self.record(Call::SetCursorPos(pos));
        self.state.lock().cursor = pos;
        Ok(())
    }

    fn screen_size(&self) -> ScreenSize {
        self.state.lock().screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_key_state_bits() {
        let platform = RecordingPlatform::new();
        platform.press(VirtualKey::A);
        platform.toggle(VirtualKey::CAPITAL_LOCK);

        assert!(platform.key_state(VirtualKey::A) < 0);
        assert_eq!(platform.key_state(VirtualKey::CAPITAL_LOCK), 1);
        assert_eq!(platform.async_key_state(VirtualKey::CAPITAL_LOCK), 0);

        platform.release(VirtualKey::A);
        assert_eq!(platform.key_state(VirtualKey::A), 0);
    }

    #[test]
    fn test_accept_limit() {
        let platform = RecordingPlatform::new();
        let records = vec![InputRecord::Keyboard(Default::default()); 3];

        assert_eq!(platform.send_input(&records), Ok(3));
        platform.set_accept_limit(Some(1));
        assert_eq!(platform.send_input(&records), Ok(1));
        assert_eq!(platform.injected().len(), 6);
    }

    #[test]
    fn test_post_to_unknown_window_fails() {
        let platform = RecordingPlatform::new();
        let err = platform
            .post_message(WindowHandle::new(1).unwrap(), 0x100, 0x41, 0)
            .unwrap_err();
        assert_eq!(err.function(), Some("PostMessageW"));
        assert_eq!(platform.calls().len(), 1);
    }

    #[test]
    fn test_normalize_process_name() {
        assert_eq!(normalize_process_name(" Notepad.EXE "), "notepad");
        assert_eq!(normalize_process_name("calc"), "calc");
    }
}
