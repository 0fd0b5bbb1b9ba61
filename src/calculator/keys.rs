//! # Keys
//!
//! Maps calculator key codes (`GetKey(n)`'s argument) to host key names, and
//! tracks which host keys are currently held. Decoupled from any concrete
//! input backend -- the simulator crate is the only thing that knows about
//! `crossterm`; this module just deals in `&str` key names, fed in from
//! outside via [`Keys::set_pressed`].

use std::collections::{HashMap, HashSet};

/// Host keys that never count towards `GetKey(0)` ("is any key pressed"),
/// mirroring the original's exclusion of Num/Caps/Scroll lock.
const EXCLUDED: &[&str] = &["NumLock", "CapsLock", "ScrollLock"];

pub struct Keys {
    bindings: HashMap<i64, Vec<String>>,
    pressed: HashSet<String>,
}

impl Keys {
    /// Builds bindings from a `name: CODE` keybindings file, one pair per
    /// line, `#` starting a trailing comment, blank/unparsable lines
    /// skipped. A code of `0` means "unassigned" and is dropped, matching
    /// the original's `_get_keybindings`.
    pub fn from_config(text: &str) -> Self {
        let mut bindings: HashMap<i64, Vec<String>> = HashMap::new();
        for line in text.lines() {
            let Some((head, tail)) = line.split_once(':') else {
                continue;
            };
            let head = uncomment(head).trim().to_string();
            let tail = uncomment(tail).trim();
            if head.is_empty() {
                continue;
            }
            let Ok(code) = tail.parse::<i64>() else {
                continue;
            };
            if code == 0 {
                continue;
            }
            bindings.entry(code).or_default().push(head);
        }
        Keys {
            bindings,
            pressed: HashSet::new(),
        }
    }

    pub fn empty() -> Self {
        Keys {
            bindings: HashMap::new(),
            pressed: HashSet::new(),
        }
    }

    /// Replaces the set of currently-held host keys. Called by the frontend
    /// once per poll cycle.
    pub fn set_pressed(&mut self, pressed: HashSet<String>) {
        self.pressed = pressed;
    }

    /// `GetKey(0)`: 1 if any non-excluded key is currently held.
    pub fn is_any_key_pressed(&self) -> bool {
        self.pressed.iter().any(|k| !EXCLUDED.contains(&k.as_str()))
    }

    /// `GetKey(n)`, `n != 0`: 1 if any host key bound to calculator code `n`
    /// is currently held.
    pub fn is_key_pressed(&self, code: i64) -> bool {
        match self.bindings.get(&code) {
            Some(names) => names.iter().any(|n| self.pressed.contains(n)),
            None => false,
        }
    }

    pub fn get(&self, code: i64) -> i64 {
        let hit = if code == 0 {
            self.is_any_key_pressed()
        } else {
            self.is_key_pressed(code)
        };
        hit as i64
    }
}

fn uncomment(s: &str) -> &str {
    match s.find('#') {
        Some(i) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_code_pairs_and_skips_comments() {
        let keys = Keys::from_config("# a comment\nChar2: 2\nChar3: 3  # third row\nUnassigned: 0\n");
        assert!(keys.bindings.contains_key(&2));
        assert!(keys.bindings.contains_key(&3));
        assert!(!keys.bindings.contains_key(&0));
    }

    #[test]
    fn key_pressed_checks_bound_host_keys() {
        let mut keys = Keys::from_config("Enter: 9\n");
        let mut pressed = HashSet::new();
        pressed.insert("Enter".to_string());
        keys.set_pressed(pressed);
        assert_eq!(keys.get(9), 1);
        assert_eq!(keys.get(10), 0);
    }

    #[test]
    fn excluded_keys_do_not_count_as_any_key_pressed() {
        let mut keys = Keys::empty();
        let mut pressed = HashSet::new();
        pressed.insert("CapsLock".to_string());
        keys.set_pressed(pressed);
        assert_eq!(keys.get(0), 0);
    }

    #[test]
    fn a_real_key_does_count_as_any_key_pressed() {
        let mut keys = Keys::empty();
        let mut pressed = HashSet::new();
        pressed.insert("a".to_string());
        keys.set_pressed(pressed);
        assert_eq!(keys.get(0), 1);
    }
}
