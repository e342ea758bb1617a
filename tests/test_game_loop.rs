use shisa_shooter::compute::init_state;
use shisa_shooter::config::GameConfig;
use shisa_shooter::entities::*;
use shisa_shooter::game_loop::{Schedule, Session};
use shisa_shooter::input::Key;
use shisa_shooter::render::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct ScoreLog {
    shown: Vec<u32>,
}

impl ScoreDisplay for ScoreLog {
    fn show_score(&mut self, score: u32) {
        self.shown.push(score);
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn one_enemy_about_to_be_hit() -> GameState {
    let mut s = init_state(GameConfig::default());
    s.formation.enemies = vec![Enemy { x: 100.0, y: 100.0, width: 50.0, height: 20.0 }];
    s.player_shots.push(Projectile {
        x: 120.0,
        y: 125.0,
        width: 5.0,
        height: 10.0,
        speed: 7.0,
        owner: ProjectileOwner::Player,
    });
    s
}

#[test]
fn frame_draws_then_advances() {
    let mut session = Session::new(GameConfig::default(), seeded_rng());
    session.key_down(Key::Right);
    let mut buf = CommandBuffer::new();
    let mut scores = ScoreLog::default();

    let next = session.on_frame(16, &mut buf, &mut scores);

    assert_eq!(next, Schedule::Continue);
    // drawn before this frame's move
    assert_eq!(buf.rects_with(Paint::Player), vec![Rect::new(375.0, 540.0, 50.0, 50.0)]);
    assert_eq!(session.state().player.x, 380.0);
    assert_eq!(session.state().frame, 1);
    assert!(scores.shown.is_empty());
}

#[test]
fn key_up_stops_player() {
    let mut session = Session::new(GameConfig::default(), seeded_rng());
    let mut buf = CommandBuffer::new();
    let mut scores = ScoreLog::default();
    session.key_down(Key::Left);
    session.on_frame(16, &mut buf, &mut scores);
    session.key_up(Key::Left);
    session.on_frame(32, &mut buf, &mut scores);
    assert_eq!(session.state().player.x, 370.0);
}

#[test]
fn winning_frame_reports_score_and_stops() {
    let mut session = Session::from_state(one_enemy_about_to_be_hit(), seeded_rng());
    let mut buf = CommandBuffer::new();
    let mut scores = ScoreLog::default();

    let next = session.on_frame(16, &mut buf, &mut scores);

    assert_eq!(next, Schedule::Stop);
    assert!(!session.is_scheduled());
    assert_eq!(session.state().status, GameStatus::Won);
    assert_eq!(scores.shown, vec![10]);
    assert_eq!(buf.texts(), vec![WIN_MESSAGE, RETRY_HINT]);
}

#[test]
fn losing_frame_shows_game_over() {
    let mut s = init_state(GameConfig::default());
    s.formation.enemies = vec![Enemy { x: 100.0, y: 521.0, width: 50.0, height: 20.0 }];
    let mut session = Session::from_state(s, seeded_rng());
    let mut buf = CommandBuffer::new();
    let mut scores = ScoreLog::default();

    assert_eq!(session.on_frame(16, &mut buf, &mut scores), Schedule::Stop);
    assert_eq!(session.state().status, GameStatus::Lost);
    assert_eq!(buf.texts(), vec![LOSS_MESSAGE, RETRY_HINT]);
}

#[test]
fn frames_after_stop_are_noops() {
    let mut session = Session::from_state(one_enemy_about_to_be_hit(), seeded_rng());
    let mut buf = CommandBuffer::new();
    let mut scores = ScoreLog::default();
    session.on_frame(16, &mut buf, &mut scores);

    let frozen = session.state().clone();
    let drawn = buf.commands.len();
    session.key_down(Key::Fire);
    session.key_down(Key::Left);
    for t in [32, 5000, 10_000] {
        assert_eq!(session.on_frame(t, &mut buf, &mut scores), Schedule::Stop);
    }

    assert_eq!(session.state(), &frozen);
    assert_eq!(buf.commands.len(), drawn);
    assert_eq!(scores.shown, vec![10]);
}

#[test]
fn enemy_fire_follows_frame_clock() {
    let mut session = Session::new(GameConfig::default(), seeded_rng());
    let mut buf = CommandBuffer::new();
    let mut scores = ScoreLog::default();

    session.on_frame(500, &mut buf, &mut scores);
    assert!(session.state().enemy_shots.is_empty());
    session.on_frame(1001, &mut buf, &mut scores);
    assert_eq!(session.state().enemy_shots.len(), 1);
    session.on_frame(1500, &mut buf, &mut scores);
    assert_eq!(session.state().enemy_shots.len(), 1);
    session.on_frame(2002, &mut buf, &mut scores);
    assert_eq!(session.state().enemy_shots.len(), 2);
}
