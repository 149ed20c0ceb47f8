//! Keyboard state polling

use std::collections::HashSet;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Escape key, the exit key
    Escape,
    /// Space bar
    Space,
}

impl KeyCode {
    /// Every key this module knows about
    pub const ALL: [Self; 2] = [Self::Escape, Self::Space];
}

/// Answers "is this key held right now"
pub trait KeyboardState {
    /// Whether `key` is currently down
    fn is_key_down(&self, key: KeyCode) -> bool;
}

/// Keyboard state backed by a set of held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    down: HashSet<KeyCode>,
}

impl KeyboardSnapshot {
    /// No keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with the given keys held
    pub fn with_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            down: keys.into_iter().collect(),
        }
    }

    /// Mark a key as pressed or released
    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.down.insert(key);
        } else {
            self.down.remove(&key);
        }
    }

    /// Release every key
    pub fn release_all(&mut self) {
        self.down.clear();
    }
}

impl KeyboardState for KeyboardSnapshot {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keyboard = KeyboardSnapshot::new();
        assert!(!keyboard.is_key_down(KeyCode::Escape));

        keyboard.set(KeyCode::Escape, true);
        assert!(keyboard.is_key_down(KeyCode::Escape));
        assert!(!keyboard.is_key_down(KeyCode::Space));

        keyboard.set(KeyCode::Escape, false);
        assert!(!keyboard.is_key_down(KeyCode::Escape));
    }

    #[test]
    fn test_with_keys_and_release_all() {
        let mut keyboard = KeyboardSnapshot::with_keys(KeyCode::ALL);
        assert!(keyboard.is_key_down(KeyCode::Escape));
        assert!(keyboard.is_key_down(KeyCode::Space));

        keyboard.release_all();
        assert!(KeyCode::ALL.iter().all(|&key| !keyboard.is_key_down(key)));
    }
}
