//! Platform-neutral input records, mirroring the keyboard and mouse halves of
//! the OS `INPUT` structure.

use ::bitflags::bitflags;

use crate::input::keyboard::VirtualKey;

bitflags! {
    /// Keyboard record flags.
    #[derive(Default)]
    pub struct KeyboardFlags: u32 {
        const EXTENDED_KEY = 0x0001;
        const KEY_UP       = 0x0002;
        const UNICODE      = 0x0004;
        const SCAN_CODE    = 0x0008;
    }
}

bitflags! {
    /// Mouse record flags.
    #[derive(Default)]
    pub struct MouseFlags: u32 {
        const MOVE         = 0x0001;
        const LEFT_DOWN    = 0x0002;
        const LEFT_UP      = 0x0004;
        const RIGHT_DOWN   = 0x0008;
        const RIGHT_UP     = 0x0010;
        const MIDDLE_DOWN  = 0x0020;
        const MIDDLE_UP    = 0x0040;
        const X_DOWN       = 0x0080;
        const X_UP         = 0x0100;
        const WHEEL        = 0x0800;
        const HWHEEL       = 0x1000;
        const VIRTUAL_DESK = 0x4000;
        const ABSOLUTE     = 0x8000;
    }
}

/// One synthesized keystroke.
///
/// At most one of `vk` and `scan` is non-zero: `scan` carries the key when
/// the record is sent by scan code or as a unicode unit, `vk` otherwise. Keys
/// without a virtual-key code, such as [`InputKey::None`], leave both zero.
///
/// [`InputKey::None`]: crate::input::keyboard::InputKey::None
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardRecord {
    pub vk: VirtualKey,
    pub scan: u16,
    pub flags: KeyboardFlags,
    pub time: u32,
    pub extra_info: usize,
}

/// One synthesized mouse action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseRecord {
    pub dx: i32,
    pub dy: i32,
    /// Wheel delta for wheel records, X button number for X button records.
    pub data: i32,
    pub flags: MouseFlags,
    pub time: u32,
    pub extra_info: usize,
}

/// A record destined for the unified input queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputRecord {
    Keyboard(KeyboardRecord),
    Mouse(MouseRecord),
}

impl From<KeyboardRecord> for InputRecord {
    fn from(record: KeyboardRecord) -> Self {
        Self::Keyboard(record)
    }
}

impl From<MouseRecord> for InputRecord {
    fn from(record: MouseRecord) -> Self {
        Self::Mouse(record)
    }
}

/// Builds a down/up pair of unicode records for every UTF-16 unit of `text`.
///
/// Characters outside the basic plane produce two pairs, one per surrogate,
/// which the receiving window recombines.
pub fn unicode_records(text: &str, extra_info: usize) -> Vec<KeyboardRecord> {
    text.encode_utf16()
        .flat_map(|unit| {
            [KeyboardFlags::UNICODE, KeyboardFlags::UNICODE | KeyboardFlags::KEY_UP].map(
                |flags| KeyboardRecord {
                    vk: VirtualKey::NONE,
                    scan: unit,
                    flags,
                    time: 0,
                    extra_info,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_unicode_records_ascii() {
        let records = unicode_records("hi", 3);
        let summary: Vec<_> = records.iter().map(|r| (r.scan, r.flags)).collect();

        assert_eq!(
            summary,
            vec![
                (b'h' as u16, KeyboardFlags::UNICODE),
                (b'h' as u16, KeyboardFlags::UNICODE | KeyboardFlags::KEY_UP),
                (b'i' as u16, KeyboardFlags::UNICODE),
                (b'i' as u16, KeyboardFlags::UNICODE | KeyboardFlags::KEY_UP),
            ]
        );
        assert!(records.iter().all(|r| r.vk.is_none() && r.extra_info == 3));
    }

    /// "Musical Symbol G Clef" needs a surrogate pair.
    #[test]
    fn test_unicode_records_surrogate_pair() {
        let scans: Vec<_> = unicode_records("\u{1D11E}", 0)
            .iter()
            .map(|r| r.scan)
            .collect();
        assert_eq!(scans, vec![0xD834, 0xD834, 0xDD1E, 0xDD1E]);
    }

    #[test]
    fn test_unicode_records_empty() {
        assert!(unicode_records("", 0).is_empty());
    }
}
