//! Bidirectional tables between abstract [`InputKey`]s and platform
//! [`VirtualKey`] codes.

use ::lazy_static::lazy_static;
use ::std::collections::HashMap;
use ::strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

use super::Modifiers;
use crate::input::mouse::{ButtonKind, MoveKind, ScrollKind};

/// A platform virtual-key code.
///
/// Named constants mirror the platform's virtual-key space. Values which have
/// no name are still valid codes; they simply do not map to an [`InputKey`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualKey(pub u16);

impl VirtualKey {
    /// The "no key" sentinel.
    pub const NONE: Self = Self(0x00);

    /// The raw virtual-key code.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Returns `true` for the [`NONE`] sentinel.
    ///
    /// [`NONE`]: Self::NONE
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// The `SendKeys` notation for this key, e.g. `{ENTER}` for Enter, `+` for
    /// any Shift key or `A` for the A key. Returns an empty string for keys
    /// without a notation.
    pub fn to_send_keys(self) -> &'static str {
        SEND_KEYS_NOTATION
            .get(&self)
            .copied()
            .unwrap_or_default()
    }
}

impl From<u16> for VirtualKey {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl From<VirtualKey> for u16 {
    fn from(vk: VirtualKey) -> Self {
        vk.0
    }
}

/// Declares the [`InputKey`] enum, the named [`VirtualKey`] constants and the
/// table that pairs them, all from a single list so that they cannot drift
/// apart.
macro_rules! key_table {
    ($($(#[$meta:meta])* $key:ident => $vk:ident = $code:literal,)*) => {
        /// An abstract, layout-independent identifier for a logical input: a
        /// keyboard key, a mouse button, a scroll direction or a navigation
        /// gesture.
        ///
        /// Every variant except [`None`], [`MouseScrollLeft`] and
        /// [`MouseScrollRight`] maps to exactly one [`VirtualKey`].
        ///
        /// [`None`]: InputKey::None
        /// [`MouseScrollLeft`]: InputKey::MouseScrollLeft
        /// [`MouseScrollRight`]: InputKey::MouseScrollRight
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            AsRefStr,
            Display,
            EnumCount,
            EnumIter,
            EnumString,
        )]
        #[strum(ascii_case_insensitive)]
        pub enum InputKey {
            /// No input. Returned whenever a lookup has no mapping.
            #[default]
            None,
            /// Horizontal scroll towards the left. Has no virtual-key code.
            MouseScrollLeft,
            /// Horizontal scroll towards the right. Has no virtual-key code.
            MouseScrollRight,
            $($(#[$meta])* $key,)*
        }

        #[allow(missing_docs)]
        impl VirtualKey {
            $(pub const $vk: Self = Self($code);)*
        }

        /// Forward table. Every entry has a distinct virtual key.
        const KEY_TABLE: &[(InputKey, VirtualKey)] = &[
            $((InputKey::$key, VirtualKey::$vk),)*
        ];
    };
}

key_table! {
    LeftButton => LEFT_BUTTON = 0x01,
    RightButton => RIGHT_BUTTON = 0x02,
    Cancel => CANCEL = 0x03,
    MiddleButton => MIDDLE_BUTTON = 0x04,
    XButton1 => XBUTTON1 = 0x05,
    XButton2 => XBUTTON2 = 0x06,
    Back => BACK = 0x08,
    Tab => TAB = 0x09,
    Clear => CLEAR = 0x0C,
    Enter => ENTER = 0x0D,
    Shift => SHIFT = 0x10,
    Control => CONTROL = 0x11,
    /// The Alt key.
    Menu => MENU = 0x12,
    Pause => PAUSE = 0x13,
    CapitalLock => CAPITAL_LOCK = 0x14,
    Kana => KANA = 0x15,
    Hanja => HANJA = 0x19,
    Escape => ESCAPE = 0x1B,
    Convert => CONVERT = 0x1C,
    NonConvert => NON_CONVERT = 0x1D,
    Accept => ACCEPT = 0x1E,
    ModeChange => MODE_CHANGE = 0x1F,
    Space => SPACE = 0x20,
    PageUp => PAGE_UP = 0x21,
    PageDown => PAGE_DOWN = 0x22,
    End => END = 0x23,
    Home => HOME = 0x24,
    Left => LEFT = 0x25,
    Up => UP = 0x26,
    Right => RIGHT = 0x27,
    Down => DOWN = 0x28,
    Select => SELECT = 0x29,
    Print => PRINT = 0x2A,
    Execute => EXECUTE = 0x2B,
    Snapshot => SNAPSHOT = 0x2C,
    Insert => INSERT = 0x2D,
    Delete => DELETE = 0x2E,
    Help => HELP = 0x2F,
    Number0 => NUMBER0 = 0x30,
    Number1 => NUMBER1 = 0x31,
    Number2 => NUMBER2 = 0x32,
    Number3 => NUMBER3 = 0x33,
    Number4 => NUMBER4 = 0x34,
    Number5 => NUMBER5 = 0x35,
    Number6 => NUMBER6 = 0x36,
    Number7 => NUMBER7 = 0x37,
    Number8 => NUMBER8 = 0x38,
    Number9 => NUMBER9 = 0x39,
    A => A = 0x41,
    B => B = 0x42,
    C => C = 0x43,
    D => D = 0x44,
    E => E = 0x45,
    F => F = 0x46,
    G => G = 0x47,
    H => H = 0x48,
    I => I = 0x49,
    J => J = 0x4A,
    K => K = 0x4B,
    L => L = 0x4C,
    M => M = 0x4D,
    N => N = 0x4E,
    O => O = 0x4F,
    P => P = 0x50,
    Q => Q = 0x51,
    R => R = 0x52,
    S => S = 0x53,
    T => T = 0x54,
    U => U = 0x55,
    V => V = 0x56,
    W => W = 0x57,
    X => X = 0x58,
    Y => Y = 0x59,
    Z => Z = 0x5A,
    LeftWindows => LEFT_WINDOWS = 0x5B,
    RightWindows => RIGHT_WINDOWS = 0x5C,
    Application => APPLICATION = 0x5D,
    Sleep => SLEEP = 0x5F,
    NumberPad0 => NUMBER_PAD0 = 0x60,
    NumberPad1 => NUMBER_PAD1 = 0x61,
    NumberPad2 => NUMBER_PAD2 = 0x62,
    NumberPad3 => NUMBER_PAD3 = 0x63,
    NumberPad4 => NUMBER_PAD4 = 0x64,
    NumberPad5 => NUMBER_PAD5 = 0x65,
    NumberPad6 => NUMBER_PAD6 = 0x66,
    NumberPad7 => NUMBER_PAD7 = 0x67,
    NumberPad8 => NUMBER_PAD8 = 0x68,
    NumberPad9 => NUMBER_PAD9 = 0x69,
    Multiply => MULTIPLY = 0x6A,
    Add => ADD = 0x6B,
    Separator => SEPARATOR = 0x6C,
    Subtract => SUBTRACT = 0x6D,
    Decimal => DECIMAL = 0x6E,
    Divide => DIVIDE = 0x6F,
    F1 => F1 = 0x70,
    F2 => F2 = 0x71,
    F3 => F3 = 0x72,
    F4 => F4 = 0x73,
    F5 => F5 = 0x74,
    F6 => F6 = 0x75,
    F7 => F7 = 0x76,
    F8 => F8 = 0x77,
    F9 => F9 = 0x78,
    F10 => F10 = 0x79,
    F11 => F11 = 0x7A,
    F12 => F12 = 0x7B,
    F13 => F13 = 0x7C,
    F14 => F14 = 0x7D,
    F15 => F15 = 0x7E,
    F16 => F16 = 0x7F,
    F17 => F17 = 0x80,
    F18 => F18 = 0x81,
    F19 => F19 = 0x82,
    F20 => F20 = 0x83,
    F21 => F21 = 0x84,
    F22 => F22 = 0x85,
    F23 => F23 = 0x86,
    F24 => F24 = 0x87,
    /// Jump the cursor to a point. Borrows the navigation "view" code.
    MouseNavigateToXY => NAVIGATION_VIEW = 0x88,
    /// Glide the cursor to a point. Borrows the navigation "menu" code.
    MouseNavigateToXYSmooth => NAVIGATION_MENU = 0x89,
    MouseNavigateUp => NAVIGATION_UP = 0x8A,
    MouseNavigateDown => NAVIGATION_DOWN = 0x8B,
    MouseNavigateLeft => NAVIGATION_LEFT = 0x8C,
    MouseNavigateRight => NAVIGATION_RIGHT = 0x8D,
    /// Vertical scroll up. Borrows the navigation "accept" code.
    MouseScrollUp => NAVIGATION_ACCEPT = 0x8E,
    /// Vertical scroll down. Borrows the navigation "cancel" code.
    MouseScrollDown => NAVIGATION_CANCEL = 0x8F,
    NumberKeyLock => NUMBER_KEY_LOCK = 0x90,
    Scroll => SCROLL = 0x91,
    LeftShift => LEFT_SHIFT = 0xA0,
    RightShift => RIGHT_SHIFT = 0xA1,
    LeftControl => LEFT_CONTROL = 0xA2,
    RightControl => RIGHT_CONTROL = 0xA3,
    LeftMenu => LEFT_MENU = 0xA4,
    RightMenu => RIGHT_MENU = 0xA5,
    /// `;:` on a US layout.
    Oem1 => OEM_1 = 0xBA,
    OemPlus => OEM_PLUS = 0xBB,
    OemComma => OEM_COMMA = 0xBC,
    OemMinus => OEM_MINUS = 0xBD,
    OemPeriod => OEM_PERIOD = 0xBE,
    /// `/?` on a US layout.
    Oem2 => OEM_2 = 0xBF,
    /// `` `~ `` on a US layout.
    Oem3 => OEM_3 = 0xC0,
    MouseNavigateUpSmooth => GAMEPAD_DPAD_UP = 0xCB,
    MouseNavigateDownSmooth => GAMEPAD_DPAD_DOWN = 0xCC,
    MouseNavigateLeftSmooth => GAMEPAD_DPAD_LEFT = 0xCD,
    MouseNavigateRightSmooth => GAMEPAD_DPAD_RIGHT = 0xCE,
    /// `[{` on a US layout.
    Oem4 => OEM_4 = 0xDB,
    /// `\|` on a US layout.
    Oem5 => OEM_5 = 0xDC,
    /// `]}` on a US layout.
    Oem6 => OEM_6 = 0xDD,
    /// `'"` on a US layout.
    Oem7 => OEM_7 = 0xDE,
    Oem8 => OEM_8 = 0xDF,
    /// The extra `<>` key on 102-key keyboards.
    Oem102 => OEM_102 = 0xE2,
    ProcessKey => PROCESS_KEY = 0xE5,
    Packet => PACKET = 0xE7,
    Attn => ATTN = 0xF6,
    CrSel => CRSEL = 0xF7,
    ExSel => EXSEL = 0xF8,
    EraseEof => ERASE_EOF = 0xF9,
    Play => PLAY = 0xFA,
    Zoom => ZOOM = 0xFB,
    NoName => NO_NAME = 0xFC,
    Pa1 => PA1 = 0xFD,
    OemClear => OEM_CLEAR = 0xFE,
}

lazy_static! {
    static ref TO_VIRTUAL: HashMap<InputKey, VirtualKey> = KEY_TABLE.iter().copied().collect();
    static ref TO_INPUT: HashMap<VirtualKey, InputKey> =
        KEY_TABLE.iter().map(|&(key, vk)| (vk, key)).collect();
    static ref SEND_KEYS_NOTATION: HashMap<VirtualKey, &'static str> = {
        use VirtualKey as Vk;

        let mut map = ::maplit::hashmap! {
            Vk::BACK => "{BACKSPACE}",
            Vk::TAB => "{TAB}",
            Vk::CLEAR => "{CLEAR}",
            Vk::ENTER => "{ENTER}",
            Vk::PAUSE => "{PAUSE}",
            Vk::ESCAPE => "{ESC}",
            Vk::SPACE => " ",
            Vk::PAGE_UP => "{PGUP}",
            Vk::PAGE_DOWN => "{PGDN}",
            Vk::END => "{END}",
            Vk::HOME => "{HOME}",
            Vk::LEFT => "{LEFT}",
            Vk::UP => "{UP}",
            Vk::RIGHT => "{RIGHT}",
            Vk::DOWN => "{DOWN}",
            Vk::SELECT => "{SELECT}",
            Vk::PRINT => "{PRINTSCREEN}",
            Vk::EXECUTE => "{EXECUTE}",
            Vk::SNAPSHOT => "{SNAPSHOT}",
            Vk::INSERT => "{INSERT}",
            Vk::DELETE => "{DELETE}",
            Vk::HELP => "{HELP}",
            Vk::ADD => "{ADD}",
            Vk::SUBTRACT => "{SUBTRACT}",
            Vk::MULTIPLY => "{MULTIPLY}",
            Vk::DIVIDE => "{DIVIDE}",
            Vk::DECIMAL => "{DECIMAL}",
            Vk::LEFT_WINDOWS => "^{ESC}",
            Vk::RIGHT_WINDOWS => "^{ESC}",
            Vk::SHIFT => "+",
            Vk::LEFT_SHIFT => "+",
            Vk::RIGHT_SHIFT => "+",
            Vk::CONTROL => "^",
            Vk::LEFT_CONTROL => "^",
            Vk::RIGHT_CONTROL => "^",
            Vk::MENU => "%",
            Vk::LEFT_MENU => "%",
            Vk::RIGHT_MENU => "%",
        };

        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        const NUMPAD: [&str; 10] = [
            "{NUMPAD0}", "{NUMPAD1}", "{NUMPAD2}", "{NUMPAD3}", "{NUMPAD4}",
            "{NUMPAD5}", "{NUMPAD6}", "{NUMPAD7}", "{NUMPAD8}", "{NUMPAD9}",
        ];
        const LETTERS: [&str; 26] = [
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M",
            "N", "O", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
        ];
        const FUNCTION: [&str; 12] = [
            "{F1}", "{F2}", "{F3}", "{F4}", "{F5}", "{F6}",
            "{F7}", "{F8}", "{F9}", "{F10}", "{F11}", "{F12}",
        ];

        for (offset, s) in (0u16..).zip(DIGITS) {
            map.insert(Vk(Vk::NUMBER0.0 + offset), s);
        }
        for (offset, s) in (0u16..).zip(NUMPAD) {
            map.insert(Vk(Vk::NUMBER_PAD0.0 + offset), s);
        }
        for (offset, s) in (0u16..).zip(LETTERS) {
            map.insert(Vk(Vk::A.0 + offset), s);
        }
        for (offset, s) in (0u16..).zip(FUNCTION) {
            map.insert(Vk(Vk::F1.0 + offset), s);
        }

        map
    };
}

impl InputKey {
    /// The platform virtual key for this input, or [`VirtualKey::NONE`] if the
    /// input has no platform code.
    pub fn to_virtual_key(self) -> VirtualKey {
        TO_VIRTUAL.get(&self).copied().unwrap_or_default()
    }

    /// The input corresponding to a platform virtual key, or [`InputKey::None`]
    /// if the code is unmapped.
    pub fn from_virtual_key(vk: VirtualKey) -> Self {
        TO_INPUT.get(&vk).copied().unwrap_or_default()
    }

    /// Projects this input onto the mouse button family.
    pub fn to_button(self) -> ButtonKind {
        match self {
            Self::LeftButton => ButtonKind::LeftButton,
            Self::RightButton => ButtonKind::RightButton,
            Self::MiddleButton => ButtonKind::MiddleButton,
            Self::XButton1 => ButtonKind::XButton1,
            Self::XButton2 => ButtonKind::XButton2,
            _ => ButtonKind::None,
        }
    }

    /// Projects this input onto the scroll family.
    pub fn to_scroll(self) -> ScrollKind {
        match self {
            Self::MouseScrollLeft => ScrollKind::MouseScrollLeft,
            Self::MouseScrollRight => ScrollKind::MouseScrollRight,
            Self::MouseScrollUp => ScrollKind::MouseScrollUp,
            Self::MouseScrollDown => ScrollKind::MouseScrollDown,
            _ => ScrollKind::None,
        }
    }

    /// Projects this input onto the cursor movement family.
    pub fn to_move(self) -> MoveKind {
        match self {
            Self::MouseNavigateUp => MoveKind::MouseNavigateUp,
            Self::MouseNavigateUpSmooth => MoveKind::MouseNavigateUpSmooth,
            Self::MouseNavigateDown => MoveKind::MouseNavigateDown,
            Self::MouseNavigateDownSmooth => MoveKind::MouseNavigateDownSmooth,
            Self::MouseNavigateLeft => MoveKind::MouseNavigateLeft,
            Self::MouseNavigateLeftSmooth => MoveKind::MouseNavigateLeftSmooth,
            Self::MouseNavigateRight => MoveKind::MouseNavigateRight,
            Self::MouseNavigateRightSmooth => MoveKind::MouseNavigateRightSmooth,
            Self::MouseNavigateToXY => MoveKind::MouseNavigateToXY,
            Self::MouseNavigateToXYSmooth => MoveKind::MouseNavigateToXYSmooth,
            _ => MoveKind::None,
        }
    }

    /// The modifier this key contributes when held. Left and right variants
    /// collapse onto the same modifier, so this mapping is many-to-one.
    pub fn to_modifiers(self) -> Modifiers {
        match self {
            Self::Control | Self::LeftControl | Self::RightControl => Modifiers::CONTROL,
            Self::Shift | Self::LeftShift | Self::RightShift => Modifiers::SHIFT,
            Self::Menu | Self::LeftMenu | Self::RightMenu => Modifiers::ALT,
            Self::LeftWindows | Self::RightWindows => Modifiers::WINDOWS,
            _ => Modifiers::empty(),
        }
    }

    /// Returns `true` for any of the Shift keys.
    pub fn is_shift(self) -> bool {
        matches!(self, Self::Shift | Self::LeftShift | Self::RightShift)
    }

    /// The unshifted character typed by this key on a US layout, if any.
    /// Letters are reported in lowercase.
    pub fn to_char(self) -> Option<char> {
        let vk = self.to_virtual_key();
        let offset = |base: VirtualKey| (vk.0 - base.0) as u8;

        match vk {
            v if (VirtualKey::A..=VirtualKey::Z).contains(&v) => {
                Some((b'a' + offset(VirtualKey::A)) as char)
            }
            v if (VirtualKey::NUMBER0..=VirtualKey::NUMBER9).contains(&v) => {
                Some((b'0' + offset(VirtualKey::NUMBER0)) as char)
            }
            v if (VirtualKey::NUMBER_PAD0..=VirtualKey::NUMBER_PAD9).contains(&v) => {
                Some((b'0' + offset(VirtualKey::NUMBER_PAD0)) as char)
            }
            VirtualKey::SPACE => Some(' '),
            VirtualKey::DECIMAL => Some('.'),
            VirtualKey::ADD => Some('+'),
            VirtualKey::SUBTRACT => Some('-'),
            VirtualKey::MULTIPLY => Some('*'),
            VirtualKey::DIVIDE => Some('/'),
            VirtualKey::OEM_1 => Some(';'),
            VirtualKey::OEM_PLUS => Some('='),
            VirtualKey::OEM_COMMA => Some(','),
            VirtualKey::OEM_MINUS => Some('-'),
            VirtualKey::OEM_PERIOD => Some('.'),
            VirtualKey::OEM_2 => Some('/'),
            VirtualKey::OEM_3 => Some('`'),
            VirtualKey::OEM_4 => Some('['),
            VirtualKey::OEM_5 => Some('\\'),
            VirtualKey::OEM_6 => Some(']'),
            VirtualKey::OEM_7 => Some('\''),
            VirtualKey::OEM_102 => Some('<'),
            _ => None,
        }
    }
}

impl From<InputKey> for VirtualKey {
    fn from(key: InputKey) -> Self {
        key.to_virtual_key()
    }
}

impl From<VirtualKey> for InputKey {
    fn from(vk: VirtualKey) -> Self {
        Self::from_virtual_key(vk)
    }
}
