//! Delivery of keyboard and mouse events through one of the platform's
//! injection mechanisms.

use ::std::fmt;
use ::strum::{Display, EnumIter, EnumString};
use ::tracing::{debug, trace, warn};

use crate::{
    delay::Delay,
    errors::*,
    input::{
        keyboard::{KeyEvent, KeystrokeFlags},
        mouse::MouseEvent,
        record::{unicode_records, InputRecord},
    },
    platform::Platform,
    types::*,
    window::{self, WindowTarget},
};

/// How input reaches its destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Delivery {
    /// Submitted as one batch to the unified input queue, as if it came from
    /// a real device. Lands in whichever window has focus.
    #[default]
    Queue,
    /// One legacy event call per record. Same focus behaviour as `Queue`.
    Legacy,
    /// Posted as window messages to the target's queue without waiting.
    Post,
    /// Sent as window messages, waiting for the target to process each one.
    Send,
}

impl Delivery {
    /// Returns `true` for the mechanisms which address a window directly.
    pub const fn is_message(self) -> bool {
        matches!(self, Self::Post | Self::Send)
    }
}

/// The outcome of a delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivered {
    /// Number of records the input queue accepted.
    Injected(u32),
    /// Number of legacy calls made.
    Legacy(usize),
    /// Per key, whether every message for that key was queued.
    Posted(Vec<bool>),
    /// Per key, the result of the last message sent for that key.
    Sent(Vec<isize>),
}

impl Delivered {
    /// Folds the outcome of a follow-up delivery into this one. Counts add
    /// up, per-key posts must all succeed, and for sends the later result
    /// wins. Outcomes of different kinds keep `self`.
    pub fn merge(self, later: Self) -> Self {
        match (self, later) {
            (Self::Injected(a), Self::Injected(b)) => Self::Injected(a + b),
            (Self::Legacy(a), Self::Legacy(b)) => Self::Legacy(a + b),
            (Self::Posted(a), Self::Posted(b)) => Self::Posted(zip_longest(a, b, |x, y| x && y)),
            (Self::Sent(a), Self::Sent(b)) => Self::Sent(zip_longest(a, b, |_, y| y)),
            (this, _) => this,
        }
    }
}

fn zip_longest<T: Copy>(a: Vec<T>, b: Vec<T>, f: impl Fn(T, T) -> T) -> Vec<T> {
    (0..a.len().max(b.len()))
        .filter_map(|i| match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            (Some(x), None) | (None, Some(x)) => Some(*x),
            (None, None) => None,
        })
        .collect()
}

/// Configuration for a [`Dispatcher`].
///
/// By default the target is brought to the front before device-level
/// delivery, is not explicitly shown, and an unresolvable target is an
/// error for message delivery. A resolved handle is trusted as is unless
/// [`with_verify_target`](Self::with_verify_target) is set.
pub struct Builder {
    foreground_fallback: bool,
    focus_target: bool,
    show_target: bool,
    verify_target: bool,
    press_delay: Option<Box<dyn Delay>>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("foreground_fallback", &self.foreground_fallback)
            .field("focus_target", &self.focus_target)
            .field("show_target", &self.show_target)
            .field("verify_target", &self.verify_target)
            .field("press_delay", &self.press_delay.is_some())
            .finish()
    }
}

impl Builder {
    /// Construct a new builder. Default values will be used for all
    /// properties until explicitly set.
    pub fn new() -> Self {
        Self {
            foreground_fallback: false,
            focus_target: true,
            show_target: false,
            verify_target: false,
            press_delay: None,
        }
    }

    /// Use the foreground window when the event's target resolves to nothing.
    pub fn with_foreground_fallback(self, fallback: bool) -> Self {
        Self {
            foreground_fallback: fallback,
            ..self
        }
    }

    /// Bring the target to the front before queue and legacy delivery.
    pub fn with_focus_target(self, focus: bool) -> Self {
        Self {
            focus_target: focus,
            ..self
        }
    }

    /// Show the target window before bringing it to the front.
    pub fn with_show_target(self, show: bool) -> Self {
        Self {
            show_target: show,
            ..self
        }
    }

    /// Check that a resolved window still exists before message delivery,
    /// failing with [`ErrorKind::TargetNotFound`] instead of sending to a
    /// stale handle.
    pub fn with_verify_target(self, verify: bool) -> Self {
        Self {
            verify_target: verify,
            ..self
        }
    }

    /// Pause between the down and up halves of a key press or click.
    pub fn with_press_delay(self, delay: impl Delay + 'static) -> Self {
        Self {
            press_delay: Some(Box::new(delay)),
            ..self
        }
    }

    /// Whether an unresolvable target falls back to the foreground window.
    pub fn foreground_fallback(&self) -> bool {
        self.foreground_fallback
    }

    /// Whether queue and legacy delivery bring the target to the front.
    pub fn focus_target(&self) -> bool {
        self.focus_target
    }

    /// Whether the target is shown before it is brought to the front.
    pub fn show_target(&self) -> bool {
        self.show_target
    }

    /// Whether message delivery checks that the resolved window exists.
    pub fn verify_target(&self) -> bool {
        self.verify_target
    }

    /// Finalizes the configuration for `platform`.
    pub fn build<P: Platform>(self, platform: P) -> Dispatcher<P> {
        Dispatcher {
            platform,
            config: self,
        }
    }
}

/// Delivers events through a [`Platform`].
pub struct Dispatcher<P> {
    platform: P,
    config: Builder,
}

impl<P: Platform> Dispatcher<P> {
    /// A dispatcher with the default configuration.
    pub fn new(platform: P) -> Self {
        Builder::new().build(platform)
    }

    /// The platform events are delivered through.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The configured pause between press halves, if any.
    pub fn press_delay(&self) -> Option<&dyn Delay> {
        self.config.press_delay.as_deref()
    }

    /// Delivers a keyboard event.
    ///
    /// Events with any unicode key cannot use legacy delivery and fail with
    /// [`ErrorKind::UnsupportedDelivery`].
    ///
    /// Queue and legacy delivery first try to bring the event's target to
    /// the front, but a target which cannot be found or focused is not an
    /// error. Message delivery fails with [`ErrorKind::TargetNotFound`] if
    /// the target does not resolve, before anything is sent.
    pub fn deliver(&self, event: &KeyEvent, delivery: Delivery) -> Result<Delivered> {
        debug!(%delivery, keys = event.keys.len(), target = %event.target, "Delivering key event");

        match delivery {
            Delivery::Queue => {
                self.focus(&event.target);
                let records = event
                    .records(self.platform.message_extra_info())
                    .into_iter()
                    .map(InputRecord::from)
                    .collect();
                self.inject(records).map(Delivered::Injected)
            }
            Delivery::Legacy => {
                // The legacy call carries an 8-bit scan code and cannot hold
                // a UTF-16 unit.
                if (0..event.keys.len()).any(|index| event.uses_unicode(index)) {
                    return Err(Error::new(ErrorKind::UnsupportedDelivery {
                        input: "unicode keyboard",
                        delivery: delivery.to_string(),
                    }));
                }
                self.focus(&event.target);
                let records = event.records(self.platform.message_extra_info());
                trace!(count = records.len(), "Issuing legacy keyboard events");
                for record in &records {
                    self.platform.legacy_keyboard(record);
                }
                Ok(Delivered::Legacy(records.len()))
            }
            Delivery::Post => {
                let window = self.resolve_strict(&event.target)?;
                let mut posted = Vec::with_capacity(event.keys.len());
                for (index, params) in self.message_params(event)?.into_iter().enumerate() {
                    let mut ok = true;
                    for (msg, wparam, lparam) in params {
                        if let Err(err) = self.platform.post_message(window, msg, wparam, lparam) {
                            debug!(%window, key = ?event.keys[index], %err, "Failed to post key message");
                            ok = false;
                        }
                    }
                    posted.push(ok);
                }
                Ok(Delivered::Posted(posted))
            }
            Delivery::Send => {
                let window = self.resolve_strict(&event.target)?;
                let sent = self
                    .message_params(event)?
                    .into_iter()
                    .map(|params| {
                        params.into_iter().fold(0, |_, (msg, wparam, lparam)| {
                            self.platform.send_message(window, msg, wparam, lparam)
                        })
                    })
                    .collect();
                Ok(Delivered::Sent(sent))
            }
        }
    }

    /// Delivers several keyboard events in order.
    ///
    /// Queue delivery submits the records of all events as one batch, so no
    /// real input can interleave with them. Per-key results of message
    /// delivery are concatenated across events.
    pub fn deliver_all(&self, events: &[KeyEvent], delivery: Delivery) -> Result<Delivered> {
        let Some(first) = events.first() else {
            return Ok(Self::nothing_delivered(delivery));
        };

        if delivery == Delivery::Queue {
            self.focus(&first.target);
            let extra_info = self.platform.message_extra_info();
            let records = events
                .iter()
                .flat_map(|event| event.records(extra_info))
                .map(InputRecord::from)
                .collect();
            return self.inject(records).map(Delivered::Injected);
        }

        events
            .iter()
            .map(|event| self.deliver(event, delivery))
            .try_fold(Self::nothing_delivered(delivery), |acc, next| {
                Ok(match (acc, next?) {
                    (Delivered::Posted(mut a), Delivered::Posted(b)) => {
                        a.extend(b);
                        Delivered::Posted(a)
                    }
                    (Delivered::Sent(mut a), Delivered::Sent(b)) => {
                        a.extend(b);
                        Delivered::Sent(a)
                    }
                    (acc, next) => acc.merge(next),
                })
            })
    }

    /// Delivers a single mouse event through the input queue or the legacy
    /// calls.
    pub fn deliver_mouse(&self, event: &MouseEvent, delivery: Delivery) -> Result<Delivered> {
        self.deliver_mouse_batch(::std::slice::from_ref(event), delivery)
    }

    /// Delivers several mouse events in order. The first event's target is
    /// brought to the front; queue delivery submits all of them in one batch.
    pub fn deliver_mouse_batch(&self, events: &[MouseEvent], delivery: Delivery) -> Result<Delivered> {
        if delivery.is_message() {
            return Err(Error::new(ErrorKind::UnsupportedDelivery {
                input: "mouse",
                delivery: delivery.to_string(),
            }));
        }

        if let Some(first) = events.first() {
            self.focus(&first.target);
        }

        let extra_info = self.platform.message_extra_info();
        let records = events.iter().map(|e| e.record(extra_info));

        if delivery == Delivery::Legacy {
            let mut count = 0;
            for record in records {
                self.platform.legacy_mouse(&record);
                count += 1;
            }
            return Ok(Delivered::Legacy(count));
        }

        self.inject(records.map(InputRecord::from).collect())
            .map(Delivered::Injected)
    }

    /// Types `text` as unicode input through the input queue, independent of
    /// the keyboard layout.
    pub fn type_unicode(&self, text: &str, target: &WindowTarget) -> Result<Delivered> {
        self.focus(target);
        let records = unicode_records(text, self.platform.message_extra_info())
            .into_iter()
            .map(InputRecord::from)
            .collect();
        self.inject(records).map(Delivered::Injected)
    }

    fn nothing_delivered(delivery: Delivery) -> Delivered {
        match delivery {
            Delivery::Queue => Delivered::Injected(0),
            Delivery::Legacy => Delivered::Legacy(0),
            Delivery::Post => Delivered::Posted(Vec::new()),
            Delivery::Send => Delivered::Sent(Vec::new()),
        }
    }

    /// Best-effort focusing of `target` ahead of device-level delivery.
    fn focus(&self, target: &WindowTarget) {
        if !self.config.focus_target {
            return;
        }

        let window = match target.resolve(&self.platform, self.config.foreground_fallback) {
            Ok(window) => window,
            Err(err) => {
                if !target.is_empty() {
                    warn!(%target, %err, "Input target not found, delivering to focused window");
                }
                return;
            }
        };

        if let Err(err) = window::bring_to_front(&self.platform, window, self.config.show_target) {
            warn!(%window, %err, "Failed to focus input target");
        }
    }

    fn resolve_strict(&self, target: &WindowTarget) -> Result<WindowHandle> {
        let window = target
            .resolve(&self.platform, self.config.foreground_fallback)
            .context("Failed to resolve window for message delivery")?;

        if self.config.verify_target && !self.platform.is_window(window) {
            return Err(Error::target_not_found(target.to_string()))
                .context(format!("Window {window} no longer exists"));
        }

        Ok(window)
    }

    fn inject(&self, records: Vec<InputRecord>) -> Result<u32> {
        trace!(count = records.len(), "Submitting input records");
        let accepted = self.platform.send_input(&records)?;
        if (accepted as usize) < records.len() {
            warn!(
                accepted,
                submitted = records.len(),
                "Input queue rejected some records"
            );
        }
        Ok(accepted)
    }

    /// `(msg, wParam, lParam)` for every message of every key, grouped by key.
    fn message_params(&self, event: &KeyEvent) -> Result<Vec<Vec<(u32, usize, isize)>>> {
        event
            .keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                let scan_code = self.platform.scan_code(key.to_virtual_key());
                event
                    .messages
                    .iter()
                    .map(|msg| {
                        KeystrokeFlags::for_message(*msg, scan_code, event.is_extended(index))
                            .to_lparam()
                            .map(|lparam| (msg.code(), msg.wparam(*key), lparam))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::{
            keyboard::{InputKey, KeyMessage, VirtualKey},
            mouse::ScrollKind,
            record::{KeyboardFlags, MouseFlags},
        },
        platform::{Call, FakeWindow, RecordingPlatform, WindowLocator},
    };

    use ::pretty_assertions::assert_eq;

    fn handle(raw: isize) -> WindowHandle {
        WindowHandle::new(raw).unwrap()
    }

    fn dispatcher() -> Dispatcher<RecordingPlatform> {
        let platform = RecordingPlatform::new();
        platform.add_window(FakeWindow {
            handle: handle(0x10),
            process_id: 42,
            process_name: "notepad.exe".into(),
            title: "Untitled - Notepad".into(),
        });
        Dispatcher::new(platform)
    }

    #[test]
    fn test_queue_focuses_target_and_submits_one_batch() {
        let dispatcher = dispatcher();
        let event = KeyEvent::press([InputKey::A, InputKey::B])
            .with_target(WindowTarget::process_name("notepad"));

        let delivered = dispatcher.deliver(&event, Delivery::Queue).unwrap();

        assert_eq!(delivered, Delivered::Injected(4));
        let calls = dispatcher.platform().calls();
        assert_eq!(calls[0], Call::SetForeground(handle(0x10)));
        match &calls[1] {
            Call::SendInput(records) => assert_eq!(records.len(), 4),
            other => panic!("unexpected call {other:?}"),
        }
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn test_queue_with_missing_target_still_injects() {
        let dispatcher = dispatcher();
        let event = KeyEvent::press([InputKey::A]).with_target(WindowTarget::title("Gone"));

        assert_eq!(
            dispatcher.deliver(&event, Delivery::Queue),
            Ok(Delivered::Injected(2))
        );
        assert_eq!(dispatcher.platform().calls().len(), 1);
    }

    #[test]
    fn test_short_count_is_not_an_error() {
        let dispatcher = dispatcher();
        dispatcher.platform().set_accept_limit(Some(1));

        let event = KeyEvent::press([InputKey::A]);
        assert_eq!(
            dispatcher.deliver(&event, Delivery::Queue),
            Ok(Delivered::Injected(1))
        );
    }

    #[test]
    fn test_focus_can_be_disabled() {
        let dispatcher = Builder::new()
            .with_focus_target(false)
            .build(RecordingPlatform::new());
        let event = KeyEvent::press([InputKey::A]).with_target(WindowTarget::handle(handle(1)));

        dispatcher.deliver(&event, Delivery::Queue).unwrap();
        assert!(matches!(
            dispatcher.platform().calls().as_slice(),
            [Call::SendInput(_)]
        ));
    }

    #[test]
    fn test_show_target_before_focus() {
        let platform = RecordingPlatform::new();
        platform.add_window(FakeWindow {
            handle: handle(0x10),
            process_id: 1,
            process_name: "a".into(),
            title: "A".into(),
        });
        let dispatcher = Builder::new().with_show_target(true).build(platform);
        let event = KeyEvent::press([InputKey::A]).with_target(WindowTarget::handle(handle(0x10)));

        dispatcher.deliver(&event, Delivery::Queue).unwrap();
        let calls = dispatcher.platform().calls();
        assert_eq!(calls[0], Call::Show(handle(0x10)));
        assert_eq!(calls[1], Call::SetForeground(handle(0x10)));
    }

    #[test]
    fn test_legacy_makes_one_call_per_record() {
        let dispatcher = dispatcher();
        dispatcher.platform().set_extra_info(0xABC);
        let event = KeyEvent::press([InputKey::A, InputKey::B]);

        assert_eq!(
            dispatcher.deliver(&event, Delivery::Legacy),
            Ok(Delivered::Legacy(4))
        );

        let injected = dispatcher.platform().injected();
        assert_eq!(injected.len(), 4);
        assert_eq!(
            injected[1],
            InputRecord::Keyboard(crate::input::record::KeyboardRecord {
                vk: VirtualKey::A,
                scan: 0,
                flags: KeyboardFlags::KEY_UP,
                time: 0,
                extra_info: 0xABC,
            })
        );
    }

    #[test]
    fn test_legacy_rejects_unicode_keys() {
        let dispatcher = dispatcher();
        let event = KeyEvent::press([InputKey::A, InputKey::B]).with_unicode([false, true]);

        let err = dispatcher.deliver(&event, Delivery::Legacy).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::UnsupportedDelivery { input: "unicode keyboard", .. }
        ));
        assert!(dispatcher.platform().calls().is_empty());

        assert_eq!(
            dispatcher.deliver(&event, Delivery::Queue),
            Ok(Delivered::Injected(4))
        );
    }

    #[test]
    fn test_post_without_target_fails_before_anything_is_built() {
        let dispatcher = dispatcher();
        let event = KeyEvent::press([InputKey::A]);

        let err = dispatcher.deliver(&event, Delivery::Post).unwrap_err();
        assert!(err.is_target_not_found());
        assert!(dispatcher.platform().calls().is_empty());
    }

    #[test]
    fn test_post_with_foreground_fallback() {
        let platform = RecordingPlatform::new();
        platform.add_window(FakeWindow {
            handle: handle(0x30),
            process_id: 3,
            process_name: "shell".into(),
            title: "Shell".into(),
        });
        platform.set_foreground_window(Some(handle(0x30)));
        let dispatcher = Builder::new()
            .with_foreground_fallback(true)
            .build(platform);

        let delivered = dispatcher
            .deliver(&KeyEvent::press([InputKey::A]), Delivery::Post)
            .unwrap();
        assert_eq!(delivered, Delivered::Posted(vec![true]));
    }

    #[test]
    fn test_post_to_stale_handle_reports_false_per_key() {
        let dispatcher = dispatcher();
        let event = KeyEvent::press([InputKey::A, InputKey::B])
            .with_target(WindowTarget::handle(handle(0xDEAD)));

        assert_eq!(
            dispatcher.deliver(&event, Delivery::Post),
            Ok(Delivered::Posted(vec![false, false]))
        );
        assert_eq!(dispatcher.platform().calls().len(), 4);
    }

    #[test]
    fn test_verified_target_rejects_stale_handle() {
        let platform = RecordingPlatform::new();
        let dispatcher = Builder::new().with_verify_target(true).build(platform);
        let event = KeyEvent::press([InputKey::A])
            .with_target(WindowTarget::handle(handle(0xDEAD)));

        let err = dispatcher.deliver(&event, Delivery::Send).unwrap_err();
        assert!(err.is_target_not_found());
        assert!(dispatcher.platform().calls().is_empty());
    }

    #[test]
    fn test_verified_target_accepts_live_handle() {
        let platform = RecordingPlatform::new();
        platform.add_window(FakeWindow {
            handle: handle(0x10),
            process_id: 1,
            process_name: "a".into(),
            title: "A".into(),
        });
        let dispatcher = Builder::new().with_verify_target(true).build(platform);
        let event = KeyEvent::press([InputKey::A])
            .with_target(WindowTarget::handle(handle(0x10)));

        assert_eq!(
            dispatcher.deliver(&event, Delivery::Post),
            Ok(Delivered::Posted(vec![true]))
        );
    }

    #[test]
    fn test_post_message_parameters() {
        let dispatcher = dispatcher();
        let event = KeyEvent::new(
            [InputKey::H],
            [KeyMessage::KeyDown, KeyMessage::Char, KeyMessage::KeyUp],
        )
        .with_target(WindowTarget::handle(handle(0x10)));

        dispatcher.deliver(&event, Delivery::Post).unwrap();

        let scan = 0x48isize << 16;
        assert_eq!(
            dispatcher.platform().calls(),
            vec![
                Call::PostMessage {
                    window: handle(0x10),
                    msg: 0x100,
                    wparam: 0x48,
                    lparam: scan | 1,
                },
                Call::PostMessage {
                    window: handle(0x10),
                    msg: 0x102,
                    wparam: 'h' as usize,
                    lparam: scan | 1,
                },
                Call::PostMessage {
                    window: handle(0x10),
                    msg: 0x101,
                    wparam: 0x48,
                    lparam: 0xC000_0000 | scan | 1,
                },
            ]
        );
    }

    #[test]
    fn test_send_returns_last_result_per_key() {
        let dispatcher = dispatcher();
        dispatcher.platform().set_message_result(5);
        let event = KeyEvent::press([InputKey::A, InputKey::B, InputKey::C])
            .with_target(WindowTarget::process_id(42));

        assert_eq!(
            dispatcher.deliver(&event, Delivery::Send),
            Ok(Delivered::Sent(vec![5, 5, 5]))
        );
        assert_eq!(dispatcher.platform().calls().len(), 6);
    }

    #[test]
    fn test_deliver_all_queue_is_one_batch() {
        let dispatcher = dispatcher();
        let events = [
            KeyEvent::new([InputKey::Shift], [KeyMessage::KeyDown]),
            KeyEvent::press([InputKey::A]),
            KeyEvent::new([InputKey::Shift], [KeyMessage::KeyUp]),
        ];

        assert_eq!(
            dispatcher.deliver_all(&events, Delivery::Queue),
            Ok(Delivered::Injected(4))
        );
        assert!(matches!(
            dispatcher.platform().calls().as_slice(),
            [Call::SendInput(records)] if records.len() == 4
        ));
    }

    #[test]
    fn test_deliver_all_concatenates_per_key_results() {
        let dispatcher = dispatcher();
        let target = WindowTarget::handle(handle(0x10));
        let events = [
            KeyEvent::press([InputKey::A]).with_target(target.clone()),
            KeyEvent::press([InputKey::B, InputKey::C]).with_target(target),
        ];

        assert_eq!(
            dispatcher.deliver_all(&events, Delivery::Post),
            Ok(Delivered::Posted(vec![true, true, true]))
        );
        assert_eq!(
            dispatcher.deliver_all(&[], Delivery::Send),
            Ok(Delivered::Sent(vec![]))
        );
    }

    #[test]
    fn test_mouse_over_messages_is_unsupported() {
        let dispatcher = dispatcher();
        let event = MouseEvent::scroll(ScrollKind::MouseScrollDown, 120).unwrap();

        let err = dispatcher.deliver_mouse(&event, Delivery::Send).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedDelivery { .. }));
    }

    #[test]
    fn test_mouse_batch() {
        let dispatcher = dispatcher();
        let events = MouseEvent::click(crate::input::mouse::ButtonKind::LeftButton);

        assert_eq!(
            dispatcher.deliver_mouse_batch(&events, Delivery::Queue),
            Ok(Delivered::Injected(2))
        );
        assert_eq!(
            dispatcher.deliver_mouse_batch(&events, Delivery::Legacy),
            Ok(Delivered::Legacy(2))
        );

        let flags: Vec<_> = dispatcher
            .platform()
            .injected()
            .into_iter()
            .filter_map(|r| match r {
                InputRecord::Mouse(m) => Some(m.flags),
                _ => None,
            })
            .collect();
        assert_eq!(
            flags,
            vec![
                MouseFlags::LEFT_DOWN,
                MouseFlags::LEFT_UP,
                MouseFlags::LEFT_DOWN,
                MouseFlags::LEFT_UP,
            ]
        );
    }

    #[test]
    fn test_type_unicode() {
        let dispatcher = dispatcher();
        assert_eq!(
            dispatcher.type_unicode("ok", &WindowTarget::none()),
            Ok(Delivered::Injected(4))
        );
        assert_eq!(dispatcher.platform().foreground_window(), None);
    }

    #[test]
    fn test_merge() {
        assert_eq!(
            Delivered::Injected(1).merge(Delivered::Injected(2)),
            Delivered::Injected(3)
        );
        assert_eq!(
            Delivered::Posted(vec![true, true]).merge(Delivered::Posted(vec![false])),
            Delivered::Posted(vec![false, true])
        );
        assert_eq!(
            Delivered::Sent(vec![1]).merge(Delivered::Sent(vec![2])),
            Delivered::Sent(vec![2])
        );
        assert_eq!(
            Delivered::Legacy(1).merge(Delivered::Injected(2)),
            Delivered::Legacy(1)
        );
    }
}
