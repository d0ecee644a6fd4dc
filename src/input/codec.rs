//! Conversion between text and the key sequences which type it on a US
//! keyboard layout.

use ::lazy_static::lazy_static;
use ::std::collections::HashMap;
use ::tracing::trace;

use crate::input::keyboard::{InputKey, Modifiers, VirtualKey};

lazy_static! {
    /// Characters typed by holding Shift with the key for the unshifted
    /// character.
    static ref SHIFTED_SYMBOLS: HashMap<char, char> = ::maplit::hashmap! {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        ';' => ':',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        '`' => '~',
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '\'' => '"',
    };

    /// Characters typed by holding AltGr with the key for the (possibly
    /// shifted) character. Letters are keyed in lowercase.
    static ref ALTGR_SYMBOLS: HashMap<char, char> = ::maplit::hashmap! {
        'q' => '@',
        'e' => '€',
        '2' => '²',
        '3' => '³',
        '4' => '¼',
        '5' => '½',
        '6' => '¾',
        '7' => '{',
        '8' => '[',
        '9' => ']',
        '0' => '}',
        '$' => '£',
        '-' => '\\',
        ',' => ';',
        '.' => ':',
        '_' => '|',
        '<' => '>',
    };
}

/// How far a Shift or AltGr key reaches when rendering keys as text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShiftScope {
    /// A Shift applies to the next key which types a character, then lapses.
    #[default]
    NextKey,
    /// A Shift anywhere in the sequence applies to every key which types a
    /// character, including keys before it.
    WholeSequence,
}

/// The keys which type `text`, prefixing Shift where one is needed.
///
/// Characters with no key on a US layout are dropped.
pub fn text_to_keys(text: &str) -> Vec<InputKey> {
    use InputKey::*;

    let mut keys = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'a'..='z' | 'A'..='Z' => {
                if c.is_ascii_uppercase() {
                    keys.push(Shift);
                }
                keys.push(letter_key(c.to_ascii_uppercase()));
            }
            '0'..='9' => keys.push(digit_key(c)),
            ' ' => keys.push(Space),
            '.' => keys.push(Decimal),
            '+' => keys.push(Add),
            '-' => keys.push(Subtract),
            '*' => keys.push(Multiply),
            '/' => keys.push(Divide),
            ';' => keys.push(Oem1),
            '=' => keys.push(OemPlus),
            ',' => keys.push(OemComma),
            '`' => keys.push(Oem3),
            '[' => keys.push(Oem4),
            '\\' => keys.push(Oem5),
            ']' => keys.push(Oem6),
            '\'' => keys.push(Oem7),
            '_' => keys.extend([Shift, OemMinus]),
            '?' => keys.extend([Shift, Oem2]),
            '<' => keys.extend([Shift, OemComma]),
            '>' => keys.extend([Shift, OemPeriod]),
            '"' => keys.extend([Shift, Oem7]),
            _ => trace!("Dropping '{c}' which has no key on a US layout"),
        }
    }

    keys
}

/// Renders `keys` as the text they type, with Shift applying to the next key
/// only.
pub fn keys_to_text(keys: &[InputKey]) -> String {
    keys_to_text_with(keys, ShiftScope::NextKey)
}

/// Renders `keys` as the text they type.
///
/// Caps Lock toggles. Letters come out uppercase when exactly one of Caps
/// Lock and Shift is in effect; other characters take their shifted symbol
/// whenever Shift is. AltGr, either Right Alt or Control with Alt, then
/// substitutes its symbol for the character where one exists. Keys which type
/// nothing are skipped.
pub fn keys_to_text_with(keys: &[InputKey], scope: ShiftScope) -> String {
    let shift_anywhere = keys.iter().any(|k| k.is_shift());
    let alt_gr_anywhere = keys.contains(&InputKey::RightMenu)
        || keys
            .iter()
            .fold(Modifiers::empty(), |held, k| held | k.to_modifiers())
            .contains(Modifiers::CONTROL | Modifiers::ALT);

    let mut caps_lock = false;
    let mut shift_pending = false;
    let mut alt_gr_pending = false;
    let mut chord_pending = Modifiers::empty();
    let mut text = String::with_capacity(keys.len());

    for key in keys {
        if key.is_shift() {
            shift_pending = true;
            continue;
        }
        if *key == InputKey::RightMenu {
            alt_gr_pending = true;
            continue;
        }
        let modifier = key.to_modifiers();
        if modifier.intersects(Modifiers::CONTROL | Modifiers::ALT) {
            chord_pending |= modifier;
            continue;
        }
        if *key == InputKey::CapitalLock {
            caps_lock = !caps_lock;
            continue;
        }

        let Some(c) = key.to_char() else {
            continue;
        };

        let (shifted, alt_gr) = match scope {
            ShiftScope::NextKey => {
                let chord = ::std::mem::take(&mut chord_pending);
                (
                    ::std::mem::take(&mut shift_pending),
                    ::std::mem::take(&mut alt_gr_pending)
                        || chord.contains(Modifiers::CONTROL | Modifiers::ALT),
                )
            }
            ShiftScope::WholeSequence => (shift_anywhere, alt_gr_anywhere),
        };

        let c = if c.is_ascii_alphabetic() {
            if caps_lock != shifted {
                c.to_ascii_uppercase()
            } else {
                c
            }
        } else if shifted {
            SHIFTED_SYMBOLS.get(&c).copied().unwrap_or(c)
        } else {
            c
        };

        text.push(if alt_gr {
            ALTGR_SYMBOLS
                .get(&c.to_ascii_lowercase())
                .copied()
                .unwrap_or(c)
        } else {
            c
        });
    }

    text
}

fn letter_key(upper: char) -> InputKey {
    let vk = VirtualKey::A.value() + (upper as u16 - 'A' as u16);
    InputKey::from_virtual_key(vk.into())
}

fn digit_key(digit: char) -> InputKey {
    let vk = VirtualKey::NUMBER0.value() + (digit as u16 - '0' as u16);
    InputKey::from_virtual_key(vk.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use InputKey::*;

    use ::pretty_assertions::assert_eq;
    use ::test_case::test_case;

    #[test]
    fn test_uppercase_letter_gets_shift() {
        assert_eq!(text_to_keys("A"), vec![Shift, A]);
        assert_eq!(keys_to_text(&[Shift, A]), "A");
    }

    #[test]
    fn test_text_to_keys_sentence() {
        assert_eq!(
            text_to_keys("Hi 5?"),
            vec![Shift, H, I, Space, Number5, Shift, Oem2]
        );
    }

    #[test]
    fn test_unmapped_characters_are_dropped() {
        assert_eq!(text_to_keys("a\té!~b"), vec![A, B]);
        assert!(text_to_keys("€").is_empty());
    }

    #[test_case(&[CapitalLock, A], "A"; "caps lock alone")]
    #[test_case(&[CapitalLock, Shift, A], "a"; "caps and shift cancel")]
    #[test_case(&[CapitalLock, A, CapitalLock, A], "Aa"; "caps lock toggles")]
    #[test_case(&[Shift, Number1], "!"; "shifted digit")]
    #[test_case(&[RightShift, Oem4], "{"; "right shift")]
    #[test_case(&[Shift, F1, A], "A"; "shift survives keys without text")]
    #[test_case(&[Shift, A, B], "Ab"; "shift lapses")]
    #[test_case(&[NumberPad7, Decimal, Multiply], "7.*"; "numpad")]
    #[test_case(&[Enter, Escape], ""; "no printable keys")]
    fn test_keys_to_text(keys: &[InputKey], expected: &str) {
        assert_eq!(keys_to_text(keys), expected);
    }

    #[test]
    fn test_whole_sequence_shift_reaches_backwards() {
        let keys = [A, B, Shift, C, Number1];
        assert_eq!(keys_to_text_with(&keys, ShiftScope::NextKey), "abC1");
        assert_eq!(keys_to_text_with(&keys, ShiftScope::WholeSequence), "ABC!");
    }

    #[test_case(&[RightMenu, Q], "@"; "right alt letter")]
    #[test_case(&[RightMenu, Shift, E], "€"; "shifted letter")]
    #[test_case(&[Control, Menu, Number7], "{"; "control alt digit")]
    #[test_case(&[LeftControl, RightMenu, Number0], "}"; "left control right alt")]
    #[test_case(&[RightMenu, Shift, Number4], "£"; "shifted then alt gr")]
    #[test_case(&[RightMenu, Shift, OemMinus], "|"; "underscore")]
    #[test_case(&[RightMenu, Subtract], "\\"; "minus")]
    #[test_case(&[RightMenu, A], "a"; "no alt gr symbol")]
    #[test_case(&[RightMenu, OemComma, OemComma], ";,"; "alt gr lapses")]
    #[test_case(&[Control, Number7], "7"; "control alone")]
    #[test_case(&[Menu, Number8], "8"; "alt alone")]
    fn test_alt_gr_symbols(keys: &[InputKey], expected: &str) {
        assert_eq!(keys_to_text(keys), expected);
    }

    #[test]
    fn test_whole_sequence_alt_gr() {
        let keys = [Number8, Control, Menu, Number9];
        assert_eq!(keys_to_text_with(&keys, ShiftScope::NextKey), "8]");
        assert_eq!(keys_to_text_with(&keys, ShiftScope::WholeSequence), "[]");
    }

    #[test]
    fn test_round_trip_of_typeable_text() {
        let text = "Hello World, 1+2=3; [ok] 'quote' \"dq\" a_b <x> /?\\ `t` 4*5-6.";
        assert_eq!(keys_to_text(&text_to_keys(text)), text);
    }
}
