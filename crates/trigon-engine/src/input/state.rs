use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for the window.
///
/// This is the "full keyboard state" view: which keys are held right now,
/// after every event delivered so far has been applied.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Release events are not delivered while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_then_release_tracks_key() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::Escape, KeyState::Pressed));
        assert!(s.key_down(Key::Escape));
        s.apply_event(&key(Key::Escape, KeyState::Released));
        assert!(!s.key_down(Key::Escape));
    }

    #[test]
    fn repeat_press_keeps_key_down() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::Space, KeyState::Pressed));
        s.apply_event(&InputEvent::Key { key: Key::Space, state: KeyState::Pressed, repeat: true });
        assert!(s.key_down(Key::Space));
        assert_eq!(s.keys_down.len(), 1);
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&key(Key::Escape, KeyState::Pressed));
        s.apply_event(&key(Key::Unknown(42), KeyState::Pressed));
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(s.keys_down.is_empty());
    }
}
