//! Modifier key state, and a small textual grammar for querying it.

use ::bitflags::bitflags;
use ::std::fmt;
use ::tracing::trace;

use super::{InputKey, VirtualKey};
use crate::platform::{is_state_down, is_state_toggled, KeyStateProvider};

bitflags! {
    /// The set of modifier keys held at a point in time. The empty set is
    /// rendered as `None`.
    #[derive(Default)]
    pub struct Modifiers: u8 {
        const CONTROL = 0b0001;
        const ALT     = 0b0010;
        const SHIFT   = 0b0100;
        const WINDOWS = 0b1000;
    }
}

/// Canonical names in formatting order.
const NAMES: [(Modifiers, &str); 4] = [
    (Modifiers::CONTROL, "Control"),
    (Modifiers::ALT, "Alt"),
    (Modifiers::SHIFT, "Shift"),
    (Modifiers::WINDOWS, "Windows"),
];

impl Modifiers {
    /// Looks up a single modifier by name, ignoring case. Accepts the aliases
    /// `Ctrl`, `Menu` and `Win`. Unknown names, including `None`, yield the
    /// empty set.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "control" | "ctrl" => Self::CONTROL,
            "alt" | "menu" => Self::ALT,
            "shift" => Self::SHIFT,
            "windows" | "win" => Self::WINDOWS,
            _ => Self::empty(),
        }
    }

    /// Renders the active modifiers joined by `+`, e.g. `Control+Shift`.
    ///
    /// The empty set renders as `None` if `accept_none` is set, otherwise as
    /// an empty string.
    pub fn format(self, accept_none: bool) -> String {
        if self.is_empty() {
            return if accept_none { "None".into() } else { String::new() };
        }

        NAMES
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Tests this state against a query.
    ///
    /// A query is a `-`-separated list of alternatives, each a `+`-separated
    /// list of modifier names which must all be held. `Control+Shift-Alt`
    /// matches when Control and Shift are both held, or when Alt is held.
    /// An alternative naming no known modifier (such as `None`) matches only
    /// when nothing is held.
    pub fn matches(self, query: &str) -> bool {
        query.split('-').any(|group| {
            let mask = group
                .split('+')
                .map(Self::from_name)
                .fold(Self::empty(), |acc, m| acc | m);

            if mask.is_empty() {
                self.is_empty()
            } else {
                self.contains(mask)
            }
        })
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true))
    }
}

/// Reads live modifier and key state through a [`KeyStateProvider`].
pub struct ModifierTracker<'a, P: ?Sized> {
    provider: &'a P,
}

impl<'a, P> ModifierTracker<'a, P>
where
    P: KeyStateProvider + ?Sized,
{
    /// Creates a tracker reading from `provider`.
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// The modifiers currently held.
    pub fn current(&self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::CONTROL, self.is_vk_down(VirtualKey::CONTROL));
        modifiers.set(Modifiers::SHIFT, self.is_vk_down(VirtualKey::SHIFT));
        modifiers.set(Modifiers::ALT, self.is_vk_down(VirtualKey::MENU));
        modifiers.set(
            Modifiers::WINDOWS,
            self.is_vk_down(VirtualKey::LEFT_WINDOWS) || self.is_vk_down(VirtualKey::RIGHT_WINDOWS),
        );

        trace!(%modifiers, "Read modifier state");
        modifiers
    }

    /// Shorthand for `self.current().matches(query)`.
    pub fn matches(&self, query: &str) -> bool {
        self.current().matches(query)
    }

    /// Returns `true` if `key` is down according to the thread's message
    /// queue.
    pub fn is_down(&self, key: InputKey) -> bool {
        self.is_vk_down(key.to_virtual_key())
    }

    /// The inverse of [`is_down`](Self::is_down).
    pub fn is_up(&self, key: InputKey) -> bool {
        !self.is_down(key)
    }

    /// Returns `true` if `key` is physically down right now.
    pub fn is_hardware_down(&self, key: InputKey) -> bool {
        is_state_down(self.provider.async_key_state(key.to_virtual_key()))
    }

    /// Returns `true` if a toggle key such as [`InputKey::CapitalLock`] is on.
    pub fn is_toggled(&self, key: InputKey) -> bool {
        is_state_toggled(self.provider.key_state(key.to_virtual_key()))
    }

    fn is_vk_down(&self, vk: VirtualKey) -> bool {
        !vk.is_none() && is_state_down(self.provider.key_state(vk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::RecordingPlatform;

    use ::pretty_assertions::assert_eq;
    use ::test_case::test_case;

    #[test_case(Modifiers::empty(), true, "None")]
    #[test_case(Modifiers::empty(), false, "")]
    #[test_case(Modifiers::SHIFT | Modifiers::CONTROL, true, "Control+Shift")]
    #[test_case(Modifiers::all(), false, "Control+Alt+Shift+Windows")]
    #[test_case(Modifiers::WINDOWS | Modifiers::ALT, true, "Alt+Windows")]
    fn test_format(modifiers: Modifiers, accept_none: bool, expected: &str) {
        assert_eq!(modifiers.format(accept_none), expected);
    }

    #[test]
    fn test_format_then_match_is_consistent() {
        for bits in 0..=Modifiers::all().bits() {
            let modifiers = Modifiers::from_bits_truncate(bits);
            assert!(
                modifiers.matches(&modifiers.format(true)),
                "{modifiers:?} should match its own rendering"
            );
        }
    }

    #[test_case(Modifiers::empty(), "None", true)]
    #[test_case(Modifiers::CONTROL, "None", false)]
    #[test_case(Modifiers::CONTROL, "Control", true)]
    #[test_case(Modifiers::CONTROL | Modifiers::SHIFT, "Control", true)]
    #[test_case(Modifiers::CONTROL, "Control+Shift", false)]
    #[test_case(Modifiers::ALT, "Control+Shift-Alt", true)]
    #[test_case(Modifiers::empty(), "Shift-None", true)]
    #[test_case(Modifiers::SHIFT, "ctrl-SHIFT", true)]
    #[test_case(Modifiers::WINDOWS, "Win", true)]
    #[test_case(Modifiers::ALT, "Menu", true)]
    #[test_case(Modifiers::ALT, "Hyper", false)]
    #[test_case(Modifiers::empty(), "Hyper", true)]
    #[test_case(Modifiers::empty(), "", true)]
    fn test_matches(state: Modifiers, query: &str, expected: bool) {
        assert_eq!(state.matches(query), expected);
    }

    #[test]
    fn test_tracker_reads_provider() {
        let platform = RecordingPlatform::new();
        platform.press(VirtualKey::CONTROL);
        platform.press(VirtualKey::RIGHT_WINDOWS);

        let tracker = ModifierTracker::new(&platform);
        assert_eq!(tracker.current(), Modifiers::CONTROL | Modifiers::WINDOWS);
        assert!(tracker.matches("Ctrl+Win"));
        assert!(!tracker.matches("None"));

        platform.release(VirtualKey::CONTROL);
        platform.release(VirtualKey::RIGHT_WINDOWS);
        assert_eq!(tracker.current(), Modifiers::empty());
        assert!(tracker.matches("None"));
    }

    #[test]
    fn test_key_queries() {
        let platform = RecordingPlatform::new();
        platform.press(VirtualKey::A);
        platform.toggle(VirtualKey::CAPITAL_LOCK);

        let tracker = ModifierTracker::new(&platform);
        assert!(tracker.is_down(InputKey::A));
        assert!(tracker.is_hardware_down(InputKey::A));
        assert!(tracker.is_up(InputKey::B));
        assert!(tracker.is_toggled(InputKey::CapitalLock));
        assert!(!tracker.is_down(InputKey::CapitalLock));
        assert!(tracker.is_up(InputKey::None));
    }
}
