use shisa_shooter::compute::init_state;
use shisa_shooter::config::GameConfig;
use shisa_shooter::entities::GameStatus;
use shisa_shooter::input::{apply_key, Key, KeyAction};

#[test]
fn left_and_right_set_velocity() {
    let s = init_state(GameConfig::default());
    assert_eq!(apply_key(&s, Key::Left, KeyAction::Down).player.dx, -5.0);
    assert_eq!(apply_key(&s, Key::Right, KeyAction::Down).player.dx, 5.0);
}

#[test]
fn releasing_either_direction_stops() {
    let s = init_state(GameConfig::default());
    let s = apply_key(&s, Key::Left, KeyAction::Down);
    let s = apply_key(&s, Key::Right, KeyAction::Down);
    assert_eq!(s.player.dx, 5.0);
    // releasing the older key still stops the player
    let s = apply_key(&s, Key::Left, KeyAction::Up);
    assert_eq!(s.player.dx, 0.0);
}

#[test]
fn fire_down_shoots_and_fire_up_does_nothing() {
    let s = init_state(GameConfig::default());
    let s = apply_key(&s, Key::Fire, KeyAction::Down);
    assert_eq!(s.player_shots.len(), 1);
    let s2 = apply_key(&s, Key::Fire, KeyAction::Up);
    assert_eq!(s2, s);
}

#[test]
fn fire_beyond_cap_is_dropped() {
    let mut s = init_state(GameConfig::default());
    for _ in 0..7 {
        s = apply_key(&s, Key::Fire, KeyAction::Down);
    }
    assert_eq!(s.player_shots.len(), 5);
}

#[test]
fn input_ignored_once_terminal() {
    let mut s = init_state(GameConfig::default());
    s.status = GameStatus::Won;
    for key in [Key::Left, Key::Right, Key::Fire] {
        for action in [KeyAction::Down, KeyAction::Up] {
            assert_eq!(apply_key(&s, key, action), s);
        }
    }
}
