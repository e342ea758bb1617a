/// Input mapper: discrete key events to player intent.
///
/// The host decides which physical keys mean what; this module only sees
/// the three logical keys.

use crate::compute::{player_shoot, set_player_velocity};
use crate::entities::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
}

/// Apply one key event.
///
/// Left/Right down sets the player velocity to ∓speed; releasing either
/// of them stops the player, even if the other one is still held. Fire
/// acts on key-down only. Terminal states ignore all input.
pub fn apply_key(state: &GameState, key: Key, action: KeyAction) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let speed = state.config.player_speed;
    match (key, action) {
        (Key::Left, KeyAction::Down) => set_player_velocity(state, -speed),
        (Key::Right, KeyAction::Down) => set_player_velocity(state, speed),
        (Key::Left | Key::Right, KeyAction::Up) => set_player_velocity(state, 0.0),
        (Key::Fire, KeyAction::Down) => player_shoot(state),
        (Key::Fire, KeyAction::Up) => state.clone(),
    }
}
