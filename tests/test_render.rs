use shisa_shooter::compute::{init_state, player_shoot};
use shisa_shooter::config::GameConfig;
use shisa_shooter::entities::*;
use shisa_shooter::render::*;

fn make_state() -> GameState {
    init_state(GameConfig::default())
}

#[test]
fn scene_starts_with_clear() {
    let mut buf = CommandBuffer::new();
    render_scene(&mut buf, &make_state());
    assert_eq!(buf.commands.first(), Some(&DrawCommand::Clear));
}

#[test]
fn body_rects_match_entity_geometry() {
    let mut s = player_shoot(&make_state());
    s.enemy_shots.push(Projectile {
        x: 10.0,
        y: 20.0,
        width: 5.0,
        height: 10.0,
        speed: 4.0,
        owner: ProjectileOwner::Enemy,
    });
    let mut buf = CommandBuffer::new();
    render_scene(&mut buf, &s);

    assert_eq!(buf.rects_with(Paint::Player), vec![s.player.bounds()]);
    let enemies: Vec<Rect> = s.formation.enemies.iter().map(|e| e.bounds()).collect();
    assert_eq!(buf.rects_with(Paint::Enemy), enemies);
    assert_eq!(buf.rects_with(Paint::PlayerShot), vec![s.player_shots[0].bounds()]);
    assert_eq!(buf.rects_with(Paint::EnemyShot), vec![Rect::new(10.0, 20.0, 5.0, 10.0)]);
}

#[test]
fn decorations_sit_on_their_bodies() {
    let s = make_state();
    let mut buf = CommandBuffer::new();
    render_scene(&mut buf, &s);

    let eyes = buf.rects_with(Paint::PlayerEyes);
    assert_eq!(
        eyes,
        vec![Rect::new(385.0, 550.0, 10.0, 10.0), Rect::new(405.0, 550.0, 10.0, 10.0)]
    );
    assert_eq!(buf.rects_with(Paint::PlayerMouth), vec![Rect::new(385.0, 575.0, 30.0, 5.0)]);

    let bumps = buf.rects_with(Paint::EnemyBumps);
    assert_eq!(bumps.len(), 5 * 50);
    // first enemy at (30, 30)
    assert_eq!(bumps[0], Rect::new(35.0, 35.0, 5.0, 5.0));
    assert_eq!(bumps[1], Rect::new(45.0, 40.0, 5.0, 5.0));
}

#[test]
fn no_overlay_while_running() {
    let mut buf = CommandBuffer::new();
    render_overlay(&mut buf, &make_state());
    assert!(buf.commands.is_empty());
}

#[test]
fn win_overlay() {
    let mut s = make_state();
    s.status = GameStatus::Won;
    let mut buf = CommandBuffer::new();
    render_overlay(&mut buf, &s);

    assert_eq!(buf.rects_with(Paint::Shade), vec![Rect::new(0.0, 0.0, 800.0, 600.0)]);
    assert_eq!(buf.texts(), vec![WIN_MESSAGE, RETRY_HINT]);
    assert_eq!(
        buf.commands[1],
        DrawCommand::FillText {
            text: WIN_MESSAGE.to_string(),
            x: 400.0,
            y: 300.0,
            size: 50.0,
            paint: Paint::Text,
        }
    );
    match &buf.commands[2] {
        DrawCommand::FillText { y, size, .. } => {
            assert_eq!(*y, 350.0);
            assert_eq!(*size, 20.0);
        }
        other => panic!("expected hint text, got {other:?}"),
    }
}

#[test]
fn loss_overlay() {
    let mut s = make_state();
    s.status = GameStatus::Lost;
    let mut buf = CommandBuffer::new();
    render_overlay(&mut buf, &s);
    assert_eq!(buf.texts(), vec![LOSS_MESSAGE, RETRY_HINT]);
}

#[test]
fn decorations_follow_a_moved_body() {
    let mut buf = CommandBuffer::new();
    draw_entity(&mut buf, EntityKind::Player, Rect::new(0.0, 100.0, 50.0, 50.0));
    draw_entity(&mut buf, EntityKind::Enemy, Rect::new(200.0, 0.0, 50.0, 20.0));

    assert_eq!(
        buf.rects_with(Paint::PlayerEyes),
        vec![Rect::new(10.0, 110.0, 10.0, 10.0), Rect::new(30.0, 110.0, 10.0, 10.0)]
    );
    assert_eq!(buf.rects_with(Paint::PlayerMouth), vec![Rect::new(10.0, 135.0, 30.0, 5.0)]);
    assert_eq!(
        buf.rects_with(Paint::EnemyBumps),
        vec![
            Rect::new(205.0, 5.0, 5.0, 5.0),
            Rect::new(215.0, 10.0, 5.0, 5.0),
            Rect::new(225.0, 5.0, 5.0, 5.0),
            Rect::new(235.0, 10.0, 5.0, 5.0),
            Rect::new(245.0, 5.0, 5.0, 5.0),
        ]
    );
}
