//! Narrow families of mouse inputs: buttons, scroll directions and cursor
//! movements. Each family carries its own numeric codes and projects back onto
//! [`InputKey`].

use ::strum::{Display, EnumIter};

use crate::input::keyboard::InputKey;

/// Generates a `u16`-backed kind enum with lossless conversions to and from
/// its code, and back onto the matching [`InputKey`].
macro_rules! kind_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $code:literal,)* }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
        #[repr(u16)]
        pub enum $name {
            #[default]
            None = 0,
            $($variant = $code,)*
        }

        impl $name {
            /// The numeric code of this kind.
            pub const fn code(self) -> u16 {
                self as u16
            }

            /// Looks up a kind by its numeric code.
            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    0 => Some(Self::None),
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// The [`InputKey`] for this kind; [`InputKey::None`] for `None`.
            pub fn to_input(self) -> InputKey {
                match self {
                    Self::None => InputKey::None,
                    $(Self::$variant => InputKey::$variant,)*
                }
            }
        }

        impl From<$name> for InputKey {
            fn from(kind: $name) -> Self {
                kind.to_input()
            }
        }
    };
}

kind_enum! {
    /// A mouse button.
    ButtonKind {
        LeftButton = 0x01,
        RightButton = 0x02,
        MiddleButton = 0x04,
        XButton1 = 0x05,
        XButton2 = 0x06,
    }
}

kind_enum! {
    /// A scroll direction.
    ScrollKind {
        MouseScrollLeft = 0xFF00,
        MouseScrollRight = 0xFF01,
        MouseScrollUp = 0xFF02,
        MouseScrollDown = 0xFF03,
    }
}

kind_enum! {
    /// A cursor movement gesture.
    MoveKind {
        MouseNavigateLeft = 0xFF04,
        MouseNavigateLeftSmooth = 0xFF05,
        MouseNavigateRight = 0xFF06,
        MouseNavigateRightSmooth = 0xFF07,
        MouseNavigateUp = 0xFF08,
        MouseNavigateUpSmooth = 0xFF09,
        // 0xFF0A-0xFF0F are unassigned.
        MouseNavigateDown = 0xFF10,
        MouseNavigateDownSmooth = 0xFF11,
        MouseNavigateToXY = 0xFF12,
        MouseNavigateToXYSmooth = 0xFF13,
    }
}

impl ScrollKind {
    /// Returns `true` for left and right scrolling.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::MouseScrollLeft | Self::MouseScrollRight)
    }

    /// Signed wheel delta for scrolling `amount` in this direction. Up and
    /// right are positive, down and left negative.
    pub const fn signed(self, amount: i32) -> i32 {
        match self {
            Self::MouseScrollUp | Self::MouseScrollRight => amount,
            Self::MouseScrollDown | Self::MouseScrollLeft => -amount,
            Self::None => 0,
        }
    }
}

impl MoveKind {
    /// Returns `true` for the interpolated variants.
    pub const fn is_smooth(self) -> bool {
        matches!(
            self,
            Self::MouseNavigateUpSmooth
                | Self::MouseNavigateDownSmooth
                | Self::MouseNavigateLeftSmooth
                | Self::MouseNavigateRightSmooth
                | Self::MouseNavigateToXYSmooth
        )
    }

    /// Returns `true` for moves to an absolute position.
    pub const fn is_absolute(self) -> bool {
        matches!(self, Self::MouseNavigateToXY | Self::MouseNavigateToXYSmooth)
    }

    /// Unit direction of a relative move, with y growing downwards. `(0, 0)`
    /// for absolute moves and `None`.
    pub const fn direction(self) -> (i32, i32) {
        match self {
            Self::MouseNavigateUp | Self::MouseNavigateUpSmooth => (0, -1),
            Self::MouseNavigateDown | Self::MouseNavigateDownSmooth => (0, 1),
            Self::MouseNavigateLeft | Self::MouseNavigateLeftSmooth => (-1, 0),
            Self::MouseNavigateRight | Self::MouseNavigateRightSmooth => (1, 0),
            _ => (0, 0),
        }
    }
}
