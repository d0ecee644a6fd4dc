//! Keyboard events, the window messages they translate to, and the keystroke
//! flag bitfield carried in each message's `lParam`.

use ::deku::prelude::*;
use ::strum::{Display, EnumIter};
use ::tap::Pipe;

use super::InputKey;
use crate::{
    errors::{self, Error, ErrorKind},
    input::record::{KeyboardFlags, KeyboardRecord},
    window::WindowTarget,
};

/// A keyboard window message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u32)]
pub enum KeyMessage {
    /// `WM_KEYDOWN`
    KeyDown = 0x0100,
    /// `WM_KEYUP`
    KeyUp = 0x0101,
    /// `WM_CHAR`
    Char = 0x0102,
    /// `WM_SYSKEYDOWN`, a key pressed while Alt is held.
    SysKeyDown = 0x0104,
    /// `WM_SYSKEYUP`
    SysKeyUp = 0x0105,
}

impl KeyMessage {
    /// The window message identifier.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Looks up a message by its identifier.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0x0100 => Some(Self::KeyDown),
            0x0101 => Some(Self::KeyUp),
            0x0102 => Some(Self::Char),
            0x0104 => Some(Self::SysKeyDown),
            0x0105 => Some(Self::SysKeyUp),
            _ => None,
        }
    }

    /// Returns `true` for messages which release a key.
    pub const fn is_release(self) -> bool {
        matches!(self, Self::KeyUp | Self::SysKeyUp)
    }

    /// Returns `true` for the Alt-context variants.
    pub const fn is_system(self) -> bool {
        matches!(self, Self::SysKeyDown | Self::SysKeyUp)
    }

    /// The `wParam` of this message for `key`: the character code for
    /// [`Char`](Self::Char) when `key` types one, else the virtual key.
    pub fn wparam(self, key: InputKey) -> usize {
        match (self, key.to_char()) {
            (Self::Char, Some(c)) => c as usize,
            _ => key.to_virtual_key().value() as usize,
        }
    }
}

/// Struct representation of the keystroke message flags.
///
/// Message flag bitfield definition:
/// <https://learn.microsoft.com/en-us/windows/win32/inputdev/about-keyboard-input#keystroke-message-flags>
#[derive(Clone, Copy, Debug, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct KeystrokeFlags {
    /// Bit 31. Set while the key is being released.
    #[deku(bits = "1")]
    pub is_key_release: bool,

    /// Bit 30. Set if the key was down before the message.
    #[deku(bits = "1")]
    pub was_previous_state_down: bool,

    /// Bit 29. The context code: set if Alt is held.
    #[deku(bits = "1")]
    pub is_alt_pressed: bool,

    /// Bit 24. Set for extended keys such as the right-hand Alt and Control.
    #[deku(pad_bits_before = "4", bits = "1")]
    pub is_extended_key: bool,

    /// Bits 16-23. The OEM scan code.
    pub scan_code: u8,

    /// Bits 0-15. The auto-repeat count of this message.
    #[deku(bits = "16")]
    pub repeat_count: u16,
}

impl KeystrokeFlags {
    /// Flags for a single, non-repeated synthesized `msg`.
    pub const fn for_message(msg: KeyMessage, scan_code: u8, is_extended_key: bool) -> Self {
        Self {
            is_key_release: msg.is_release(),
            was_previous_state_down: msg.is_release(),
            is_alt_pressed: msg.is_system(),
            is_extended_key,
            scan_code,
            repeat_count: 1,
        }
    }

    /// Unpacks flags from a message `lParam`. Only the low 32 bits are used.
    pub fn from_lparam(lparam: isize) -> errors::Result<Self> {
        Self::from_bytes((&(lparam as u32).to_be_bytes(), 0))
            .map(|(_, flags)| flags)
            .map_err(Error::from)
    }

    /// Packs the flags into a message `lParam`.
    pub fn to_lparam(&self) -> errors::Result<isize> {
        let bytes = self.to_bytes()?;
        <[u8; 4]>::try_from(bytes.as_slice())
            .map_err(|_| {
                Error::new(ErrorKind::Encoding(format!(
                    "keystroke flags packed into {} bytes",
                    bytes.len()
                )))
            })?
            .pipe(u32::from_be_bytes)
            .pipe(|raw| Ok(raw as isize))
    }
}

/// A batch of keyboard input: each key in `keys` receives each message in
/// `messages`, key by key.
///
/// The `use_scan_code`, `is_extended_key` and `use_unicode` arrays are
/// indexed by key position. Positions past the end of an array read as
/// `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub keys: Vec<InputKey>,
    pub messages: Vec<KeyMessage>,
    pub use_scan_code: Vec<bool>,
    pub is_extended_key: Vec<bool>,
    pub use_unicode: Vec<bool>,
    /// Window the input is addressed to.
    pub target: WindowTarget,
    /// Event timestamp in milliseconds; `0` lets the system stamp it.
    pub time: u32,
}

impl KeyEvent {
    /// An event sending each of `messages` to each of `keys`.
    pub fn new(keys: impl Into<Vec<InputKey>>, messages: impl Into<Vec<KeyMessage>>) -> Self {
        Self {
            keys: keys.into(),
            messages: messages.into(),
            ..Default::default()
        }
    }

    /// A down/up pair for every key.
    pub fn press(keys: impl Into<Vec<InputKey>>) -> Self {
        Self::new(keys, [KeyMessage::KeyDown, KeyMessage::KeyUp])
    }

    /// Per key, whether to send it by scan code.
    pub fn with_scan_codes(mut self, flags: impl Into<Vec<bool>>) -> Self {
        self.use_scan_code = flags.into();
        self
    }

    /// Per key, whether it is an extended key (right-hand Alt and Control,
    /// the navigation cluster, ...).
    pub fn with_extended_keys(mut self, flags: impl Into<Vec<bool>>) -> Self {
        self.is_extended_key = flags.into();
        self
    }

    /// Per key, whether to send it as a unicode code unit.
    pub fn with_unicode(mut self, flags: impl Into<Vec<bool>>) -> Self {
        self.use_unicode = flags.into();
        self
    }

    /// Window the input is addressed to.
    pub fn with_target(mut self, target: WindowTarget) -> Self {
        self.target = target;
        self
    }

    /// Timestamp in milliseconds; `0` lets the system stamp the records.
    pub fn with_time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    /// Whether the key at `index` is sent as a scan code.
    pub fn uses_scan_code(&self, index: usize) -> bool {
        flag_at(&self.use_scan_code, index)
    }

    /// Whether the key at `index` is an extended key.
    pub fn is_extended(&self, index: usize) -> bool {
        flag_at(&self.is_extended_key, index)
    }

    /// Whether the key at `index` is sent as a unicode code unit.
    pub fn uses_unicode(&self, index: usize) -> bool {
        flag_at(&self.use_unicode, index)
    }

    /// Builds one input record per (key, message) pair, key-major.
    pub fn records(&self, extra_info: usize) -> Vec<KeyboardRecord> {
        let mut records = Vec::with_capacity(self.keys.len() * self.messages.len());

        for (index, key) in self.keys.iter().enumerate() {
            let vk = key.to_virtual_key();
            let by_scan = self.uses_scan_code(index) || self.uses_unicode(index);

            let mut base = KeyboardFlags::empty();
            base.set(KeyboardFlags::SCAN_CODE, self.uses_scan_code(index));
            base.set(KeyboardFlags::EXTENDED_KEY, self.is_extended(index));
            base.set(KeyboardFlags::UNICODE, self.uses_unicode(index));

            for msg in &self.messages {
                let mut flags = base;
                flags.set(KeyboardFlags::KEY_UP, msg.is_release());

                records.push(KeyboardRecord {
                    vk: if by_scan { Default::default() } else { vk },
                    scan: if by_scan { vk.value() } else { 0 },
                    flags,
                    time: self.time,
                    extra_info,
                });
            }
        }

        records
    }
}

fn flag_at(flags: &[bool], index: usize) -> bool {
    flags.get(index).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::VirtualKey;

    use ::pretty_assertions::assert_eq;
    use ::strum::IntoEnumIterator;
    use ::test_case::test_case;

    #[test]
    fn test_message_codes() {
        for msg in KeyMessage::iter() {
            assert_eq!(KeyMessage::from_code(msg.code()), Some(msg));
        }
        assert_eq!(KeyMessage::from_code(0x0103), None);
        assert!(KeyMessage::SysKeyUp.is_release());
        assert!(!KeyMessage::Char.is_release());
    }

    #[test]
    fn test_wparam() {
        assert_eq!(KeyMessage::KeyDown.wparam(InputKey::H), 0x48);
        assert_eq!(KeyMessage::Char.wparam(InputKey::H), 'h' as usize);
        assert_eq!(KeyMessage::Char.wparam(InputKey::F1), 0x70);
    }

    // Values captured from real 'h' and 'alt-h' keystrokes.
    #[test_case(0x230001, KeyMessage::KeyDown; "key down")]
    #[test_case(0xC0230001, KeyMessage::KeyUp; "key up")]
    #[test_case(0x20230001, KeyMessage::SysKeyDown; "sys key down")]
    #[test_case(0xE0230001, KeyMessage::SysKeyUp; "sys key up")]
    fn test_flags_match_captured_lparam(lparam: isize, msg: KeyMessage) {
        let flags = KeystrokeFlags::for_message(msg, 35, false);
        assert_eq!(KeystrokeFlags::from_lparam(lparam).unwrap(), flags);
        assert_eq!(flags.to_lparam().unwrap(), lparam);
    }

    #[test]
    fn test_extended_key_bit() {
        let flags = KeystrokeFlags::for_message(KeyMessage::KeyDown, 0x38, true);
        assert_eq!(flags.to_lparam().unwrap(), 0x01380001);
    }

    #[test]
    fn test_key_down_with_repeat() {
        assert_eq!(
            KeystrokeFlags::from_lparam(0x40230005).unwrap(),
            KeystrokeFlags {
                repeat_count: 5,
                scan_code: 35,
                is_extended_key: false,
                is_alt_pressed: false,
                was_previous_state_down: true,
                is_key_release: false,
            }
        );
    }

    #[test]
    fn test_records_are_key_major() {
        let event = KeyEvent::press([InputKey::A, InputKey::B]).with_time(99);
        let records = event.records(7);

        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.vk, r.flags.contains(KeyboardFlags::KEY_UP)))
            .collect();
        assert_eq!(
            summary,
            vec![
                (VirtualKey::A, false),
                (VirtualKey::A, true),
                (VirtualKey::B, false),
                (VirtualKey::B, true),
            ]
        );
        assert!(records.iter().all(|r| r.time == 99 && r.extra_info == 7));
        assert!(records.iter().all(|r| r.scan == 0));
    }

    #[test]
    fn test_record_encoding_per_position() {
        let event = KeyEvent::new(
            [InputKey::A, InputKey::RightControl, InputKey::B],
            [KeyMessage::KeyDown],
        )
        .with_scan_codes([true])
        .with_extended_keys([false, true])
        .with_unicode([false, false, true]);

        assert_eq!(
            event.records(0),
            vec![
                KeyboardRecord {
                    vk: VirtualKey::NONE,
                    scan: 0x41,
                    flags: KeyboardFlags::SCAN_CODE,
                    time: 0,
                    extra_info: 0,
                },
                KeyboardRecord {
                    vk: VirtualKey::RIGHT_CONTROL,
                    scan: 0,
                    flags: KeyboardFlags::EXTENDED_KEY,
                    time: 0,
                    extra_info: 0,
                },
                KeyboardRecord {
                    vk: VirtualKey::NONE,
                    scan: 0x42,
                    flags: KeyboardFlags::UNICODE,
                    time: 0,
                    extra_info: 0,
                },
            ]
        );
    }

    #[test]
    fn test_key_without_code_leaves_record_blank() {
        for key in [InputKey::None, InputKey::MouseScrollLeft, InputKey::MouseScrollRight] {
            let records = KeyEvent::new([key], [KeyMessage::KeyDown]).records(0);
            assert_eq!((records[0].vk, records[0].scan), (VirtualKey::NONE, 0));
        }
    }

    #[test]
    fn test_empty_event_builds_nothing() {
        assert!(KeyEvent::new([InputKey::A], Vec::<KeyMessage>::new())
            .records(0).is_empty());
        assert!(KeyEvent::press(Vec::<InputKey>::new()).records(0).is_empty());
    }
}
