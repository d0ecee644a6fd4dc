//! A point-in-time copy of the whole keyboard state.

use ::bitvec::prelude::*;
use ::strum::IntoEnumIterator;

use super::{InputKey, Modifiers};
use crate::{errors::*, platform::KeyStateProvider};

/// Number of virtual-key slots in the platform keyboard state array.
const KEY_SLOTS: usize = 256;

/// Which keys were down, and which toggle keys were on, at the moment the
/// snapshot was taken.
///
/// Unlike [`ModifierTracker`](super::ModifierTracker), a snapshot never
/// changes after it has been captured, so several keys can be inspected
/// against one consistent state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    pressed: BitArr!(for KEY_SLOTS, in usize, Lsb0),
    toggled: BitArr!(for KEY_SLOTS, in usize, Lsb0),
}

impl Default for KeyboardSnapshot {
    fn default() -> Self {
        Self {
            pressed: BitArray::ZERO,
            toggled: BitArray::ZERO,
        }
    }
}

impl KeyboardSnapshot {
    /// Captures the current keyboard state from `provider`.
    pub fn capture<P>(provider: &P) -> Result<Self>
    where
        P: KeyStateProvider + ?Sized,
    {
        provider
            .keyboard_state()
            .map(|state| Self::from_state(&state))
            .context("Failed to capture keyboard state")
    }

    /// Builds a snapshot from a raw state array: bit 7 of each byte marks a
    /// pressed key, bit 0 a toggle key which is on.
    pub fn from_state(state: &[u8; KEY_SLOTS]) -> Self {
        let mut snapshot = Self::default();
        for (slot, byte) in state.iter().enumerate() {
            snapshot.pressed.set(slot, byte & 0x80 != 0);
            snapshot.toggled.set(slot, byte & 0x01 != 0);
        }
        snapshot
    }

    /// Returns `true` if `key` was down. Always `false` for keys without a
    /// virtual-key code.
    pub fn is_down(&self, key: InputKey) -> bool {
        self.slot(key)
            .map(|slot| self.pressed[slot])
            .unwrap_or_default()
    }

    /// Returns `true` if the toggle key `key` was on.
    pub fn is_toggled(&self, key: InputKey) -> bool {
        self.slot(key)
            .map(|slot| self.toggled[slot])
            .unwrap_or_default()
    }

    /// All mapped keys which were down, in [`InputKey`] declaration order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = InputKey> + '_ {
        InputKey::iter().filter(|key| self.is_down(*key))
    }

    /// The modifiers which were held.
    pub fn modifiers(&self) -> Modifiers {
        self.pressed_keys()
            .map(InputKey::to_modifiers)
            .fold(Modifiers::empty(), |acc, m| acc | m)
    }

    fn slot(&self, key: InputKey) -> Option<usize> {
        let vk = key.to_virtual_key();
        (!vk.is_none())
            .then_some(vk.value() as usize)
            .filter(|slot| *slot < KEY_SLOTS)
    }
}
