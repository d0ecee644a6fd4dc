//! Mouse events and the builders which produce them.

use super::{ButtonKind, MoveKind, ScrollKind};
use crate::{
    input::record::{MouseFlags, MouseRecord},
    types::*,
    window::WindowTarget,
};

/// One notch of a standard mouse wheel.
pub const WHEEL_DELTA: i32 = 120;

/// Upper bound of the normalized absolute coordinate space.
pub const ABSOLUTE_MAX: i32 = 65535;

/// Number of intermediate moves used by the smooth navigation variants.
pub const SMOOTH_STEPS: i32 = 10;

/// X button number carried in the record data.
const XBUTTON1: u16 = 0x0001;
const XBUTTON2: u16 = 0x0002;

/// A single mouse action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MouseEvent {
    pub flags: MouseFlags,
    /// Horizontal movement, in pixels or normalized absolute units.
    pub dx: i32,
    /// Vertical movement, in pixels or normalized absolute units.
    pub dy: i32,
    /// Signed wheel movement for [`MouseFlags::WHEEL`] and
    /// [`MouseFlags::HWHEEL`].
    pub wheel: i32,
    /// Which X button for [`MouseFlags::X_DOWN`] and [`MouseFlags::X_UP`].
    pub x_button: u16,
    /// Window brought to the front before the event is injected.
    pub target: WindowTarget,
    pub time: u32,
}

impl MouseEvent {
    /// An event with the given flags and nothing else.
    pub fn new(flags: MouseFlags) -> Self {
        Self {
            flags,
            ..Default::default()
        }
    }

    /// Presses (or releases, if `release` is set) `button`. `None` for
    /// [`ButtonKind::None`].
    pub fn button(button: ButtonKind, release: bool) -> Option<Self> {
        let (down, up, x_button) = match button {
            ButtonKind::LeftButton => (MouseFlags::LEFT_DOWN, MouseFlags::LEFT_UP, 0),
            ButtonKind::RightButton => (MouseFlags::RIGHT_DOWN, MouseFlags::RIGHT_UP, 0),
            ButtonKind::MiddleButton => (MouseFlags::MIDDLE_DOWN, MouseFlags::MIDDLE_UP, 0),
            ButtonKind::XButton1 => (MouseFlags::X_DOWN, MouseFlags::X_UP, XBUTTON1),
            ButtonKind::XButton2 => (MouseFlags::X_DOWN, MouseFlags::X_UP, XBUTTON2),
            ButtonKind::None => return None,
        };

        Some(Self {
            x_button,
            ..Self::new(if release { up } else { down })
        })
    }

    /// A press followed by a release of `button`.
    pub fn click(button: ButtonKind) -> Vec<Self> {
        [false, true]
            .into_iter()
            .filter_map(|release| Self::button(button, release))
            .collect()
    }

    /// Scrolls `amount` wheel units in `direction`. Vertical directions use
    /// the wheel, horizontal ones the tilt wheel. `None` for
    /// [`ScrollKind::None`].
    pub fn scroll(direction: ScrollKind, amount: i32) -> Option<Self> {
        let flags = match direction {
            ScrollKind::None => return None,
            d if d.is_horizontal() => MouseFlags::HWHEEL,
            _ => MouseFlags::WHEEL,
        };

        Some(Self {
            wheel: direction.signed(amount),
            ..Self::new(flags)
        })
    }

    /// Moves the cursor by a relative offset in pixels.
    pub fn move_by(dx: i32, dy: i32) -> Self {
        Self {
            dx,
            dy,
            ..Self::new(MouseFlags::MOVE)
        }
    }

    /// Moves the cursor to `point` on a primary screen of size `screen`.
    pub fn move_to(point: ScreenPoint, screen: ScreenSize) -> Self {
        Self {
            dx: normalize(point.x, screen.width),
            dy: normalize(point.y, screen.height),
            ..Self::new(MouseFlags::MOVE | MouseFlags::ABSOLUTE)
        }
    }

    /// The moves for a relative navigation gesture of `distance` pixels. The
    /// smooth variants spread the distance over [`SMOOTH_STEPS`] moves.
    /// Empty for absolute gestures and [`MoveKind::None`].
    pub fn nudge(gesture: MoveKind, distance: i32) -> Vec<Self> {
        let (x, y) = gesture.direction();
        if (x, y) == (0, 0) {
            return Vec::new();
        }

        if !gesture.is_smooth() {
            return vec![Self::move_by(
                x.saturating_mul(distance),
                y.saturating_mul(distance),
            )];
        }

        steps(0, distance)
            .map(|step| Self::move_by(x * step, y * step))
            .collect()
    }

    /// The moves which take the cursor from `from` to `to`. A single jump, or
    /// [`SMOOTH_STEPS`] absolute moves along the line between the points if
    /// `smooth` is set.
    pub fn glide(from: ScreenPoint, to: ScreenPoint, screen: ScreenSize, smooth: bool) -> Vec<Self> {
        if !smooth {
            return vec![Self::move_to(to, screen)];
        }

        steps(from.x, to.x)
            .zip(steps(from.y, to.y))
            .scan(from, |pos, (dx, dy)| {
                pos.x += dx;
                pos.y += dy;
                Some(Self::move_to(*pos, screen))
            })
            .collect()
    }

    /// Window brought to the front before the event is injected.
    pub fn with_target(mut self, target: WindowTarget) -> Self {
        self.target = target;
        self
    }

    /// Timestamp in milliseconds; `0` lets the system stamp the event.
    pub fn with_time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    /// Builds the input record. Movement is only carried for move and
    /// absolute events; the data word carries the wheel delta for wheel
    /// events, else the X button for X button events.
    pub fn record(&self, extra_info: usize) -> MouseRecord {
        let moves = self
            .flags
            .intersects(MouseFlags::MOVE | MouseFlags::ABSOLUTE);

        let data = if self.flags.intersects(MouseFlags::WHEEL | MouseFlags::HWHEEL) {
            self.wheel
        } else if self.flags.intersects(MouseFlags::X_DOWN | MouseFlags::X_UP) {
            self.x_button as i32
        } else {
            0
        };

        MouseRecord {
            dx: if moves { self.dx } else { 0 },
            dy: if moves { self.dy } else { 0 },
            data,
            flags: self.flags,
            time: self.time,
            extra_info,
        }
    }
}

/// Maps a pixel coordinate onto `0..=ABSOLUTE_MAX`.
fn normalize(pixel: i32, extent: i32) -> i32 {
    if extent <= 1 {
        return 0;
    }
    let scaled = (pixel.clamp(0, extent - 1) as i64 * ABSOLUTE_MAX as i64) / (extent - 1) as i64;
    scaled as i32
}

/// Splits the span `from..to` into [`SMOOTH_STEPS`] increments which sum to
/// exactly `to - from`. Computed in `i64`, so any pair of `i32` endpoints is
/// valid; each increment is at most a tenth of the span and fits an `i32`.
fn steps(from: i32, to: i32) -> impl Iterator<Item = i32> {
    let span = i64::from(to) - i64::from(from);
    let count = i64::from(SMOOTH_STEPS);
    (1..=count).map(move |i| (span * i / count - span * (i - 1) / count) as i32)
}
