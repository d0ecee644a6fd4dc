//! High level mouse operations on top of a [`Dispatcher`].

use ::tracing::debug;

use super::{ButtonKind, MouseEvent, MoveKind, ScrollKind};
use crate::{
    dispatch::{Delivered, Delivery, Dispatcher},
    errors::*,
    input::keyboard::ModifierTracker,
    platform::Platform,
    types::*,
    window::WindowTarget,
};

/// Clicks, scrolls and moves the cursor.
///
/// Mouse input only travels through [`Delivery::Queue`] or
/// [`Delivery::Legacy`]; the message mechanisms fail with
/// [`ErrorKind::UnsupportedDelivery`].
pub struct Pointer<'a, P> {
    dispatcher: &'a Dispatcher<P>,
    delivery: Delivery,
    target: WindowTarget,
}

impl<'a, P: Platform> Pointer<'a, P> {
    /// A pointer delivering through the input queue to whichever window has
    /// focus.
    pub fn new(dispatcher: &'a Dispatcher<P>) -> Self {
        Self {
            dispatcher,
            delivery: Delivery::Queue,
            target: WindowTarget::none(),
        }
    }

    /// Mechanism used for every action. Only `Queue` and `Legacy` work.
    pub fn with_delivery(self, delivery: Delivery) -> Self {
        Self { delivery, ..self }
    }

    /// Window brought to the front before each action.
    pub fn with_target(self, target: WindowTarget) -> Self {
        Self { target, ..self }
    }

    /// Returns `true` if `button` is down according to the thread's message
    /// queue.
    pub fn is_down(&self, button: ButtonKind) -> bool {
        ModifierTracker::new(self.dispatcher.platform()).is_down(button.to_input())
    }

    /// The inverse of [`is_down`](Self::is_down).
    pub fn is_up(&self, button: ButtonKind) -> bool {
        !self.is_down(button)
    }

    /// Returns `true` if `button` is physically held right now.
    pub fn is_hardware_down(&self, button: ButtonKind) -> bool {
        ModifierTracker::new(self.dispatcher.platform()).is_hardware_down(button.to_input())
    }

    /// The inverse of [`is_hardware_down`](Self::is_hardware_down).
    pub fn is_hardware_up(&self, button: ButtonKind) -> bool {
        !self.is_hardware_down(button)
    }

    /// Presses `button`. Delivers nothing for [`ButtonKind::None`].
    pub fn button_down(&self, button: ButtonKind) -> Result<Delivered> {
        self.send(MouseEvent::button(button, false))
    }

    /// Releases `button`.
    pub fn button_up(&self, button: ButtonKind) -> Result<Delivered> {
        self.send(MouseEvent::button(button, true))
    }

    /// Presses and releases `button`, pausing in between if the dispatcher
    /// has a press delay.
    pub fn click(&self, button: ButtonKind) -> Result<Delivered> {
        match self.dispatcher.press_delay() {
            Some(delay) => {
                let down = self.button_down(button)?;
                delay.wait();
                self.button_up(button).map(|up| down.merge(up))
            }
            None => self.send_all(MouseEvent::click(button)),
        }
    }

    /// Moves the cursor to `point`, then clicks `button` there.
    pub fn click_at(&self, button: ButtonKind, point: ScreenPoint) -> Result<Delivered> {
        let moved = self.navigate_to(point, false)?;
        self.click(button).map(|clicked| moved.merge(clicked))
    }

    /// Holds `button` while gliding from the current position to `to`.
    pub fn drag(&self, button: ButtonKind, to: ScreenPoint, smooth: bool) -> Result<Delivered> {
        let platform = self.dispatcher.platform();
        let from = platform.cursor_pos().context("Failed to read cursor position")?;
        debug!(?button, ?from, ?to, smooth, "Dragging");

        let mut events = Vec::new();
        events.extend(MouseEvent::button(button, false));
        events.extend(MouseEvent::glide(from, to, platform.screen_size(), smooth));
        events.extend(MouseEvent::button(button, true));
        self.send_all(events)
    }

    /// Scrolls `amount` wheel units in `direction`. See
    /// [`WHEEL_DELTA`](super::WHEEL_DELTA) for one notch.
    pub fn scroll(&self, direction: ScrollKind, amount: i32) -> Result<Delivered> {
        self.send(MouseEvent::scroll(direction, amount))
    }

    /// Current cursor position in screen coordinates.
    pub fn position(&self) -> Result<ScreenPoint> {
        self.dispatcher
            .platform()
            .cursor_pos()
            .context("Failed to read cursor position")
    }

    /// Places the cursor at `point` without generating input.
    pub fn set_position(&self, point: ScreenPoint) -> Result<()> {
        self.dispatcher
            .platform()
            .set_cursor_pos(point)
            .context("Failed to place cursor")
    }

    /// Shifts the cursor by `(dx, dy)` pixels without generating input.
    pub fn move_by(&self, dx: i32, dy: i32) -> Result<()> {
        let ScreenPoint { x, y } = self.position()?;
        self.set_position(ScreenPoint {
            x: x.saturating_add(dx),
            y: y.saturating_add(dy),
        })
    }

    /// Performs a relative navigation gesture as mouse input. Absolute
    /// gestures deliver nothing; use [`navigate_to`](Self::navigate_to).
    pub fn navigate(&self, gesture: MoveKind, distance: i32) -> Result<Delivered> {
        self.send_all(MouseEvent::nudge(gesture, distance))
    }

    /// Moves the cursor to `point` as mouse input, in one jump or along a
    /// line from the current position.
    pub fn navigate_to(&self, point: ScreenPoint, smooth: bool) -> Result<Delivered> {
        let platform = self.dispatcher.platform();
        let from = if smooth { self.position()? } else { point };
        self.send_all(MouseEvent::glide(from, point, platform.screen_size(), smooth))
    }

    fn send(&self, event: Option<MouseEvent>) -> Result<Delivered> {
        self.send_all(event.into_iter().collect())
    }

    fn send_all(&self, events: Vec<MouseEvent>) -> Result<Delivered> {
        let events: Vec<_> = events
            .into_iter()
            .map(|e| e.with_target(self.target.clone()))
            .collect();
        self.dispatcher.deliver_mouse_batch(&events, self.delivery)
    }
}
