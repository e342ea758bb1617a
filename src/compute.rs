/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, the frame timestamp or an RNG handle) and
/// returns a brand-new `GameState`.  Side effects are limited to the
/// injected RNG and log events.
///
/// Once the state is terminal every transition returns an unchanged copy.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    Enemy, FireController, Formation, GameState, GameStatus, Player, Projectile, ProjectileOwner,
    Rect,
};

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Grid parameters for [`create_formation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormationLayout {
    pub rows: usize,
    pub cols: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl FormationLayout {
    pub fn from_config(config: &GameConfig) -> Self {
        FormationLayout {
            rows: config.enemy_rows,
            cols: config.enemy_cols,
            cell_width: config.enemy_width,
            cell_height: config.enemy_height,
            padding_x: config.enemy_padding_x,
            padding_y: config.enemy_padding_y,
            offset_x: config.enemy_offset_x,
            offset_y: config.enemy_offset_y,
        }
    }
}

/// Lay out the enemy grid, column by column.
pub fn create_formation(layout: &FormationLayout) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(layout.rows * layout.cols);
    for c in 0..layout.cols {
        for r in 0..layout.rows {
            enemies.push(Enemy {
                x: layout.offset_x + c as f32 * (layout.cell_width + layout.padding_x),
                y: layout.offset_y + r as f32 * (layout.cell_height + layout.padding_y),
                width: layout.cell_width,
                height: layout.cell_height,
            });
        }
    }
    enemies
}

/// Build the initial game state: player centred near the bottom edge,
/// full formation moving right, no projectiles.
pub fn init_state(config: GameConfig) -> GameState {
    let enemies = create_formation(&FormationLayout::from_config(&config));
    info!(
        enemies = enemies.len(),
        width = config.field_width,
        height = config.field_height,
        "formation created"
    );

    GameState {
        player: Player {
            x: config.field_width / 2.0 - config.player_width / 2.0,
            y: config.field_height - config.player_bottom_offset,
            width: config.player_width,
            height: config.player_height,
            dx: 0.0,
        },
        formation: Formation {
            enemies,
            dx: config.formation_step,
            descent: config.formation_descent,
        },
        player_shots: Vec::new(),
        enemy_shots: Vec::new(),
        fire: FireController::default(),
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        config,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn set_player_velocity(state: &GameState, dx: f32) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    GameState {
        player: Player {
            dx,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire a projectile from the player's centre, capped at
/// `max_player_shots` live projectiles. Shots past the cap are dropped.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let cfg = &state.config;
    if state.player_shots.len() >= cfg.max_player_shots {
        debug!(live = state.player_shots.len(), "shot dropped at cap");
        return state.clone();
    }
    let p = &state.player;
    let shot = Projectile {
        x: p.x + p.width / 2.0 - cfg.shot_width / 2.0,
        y: p.y,
        width: cfg.shot_width,
        height: cfg.shot_height,
        speed: cfg.player_shot_speed,
        owner: ProjectileOwner::Player,
    };
    let mut player_shots = state.player_shots.clone();
    player_shots.push(shot);
    GameState {
        player_shots,
        ..state.clone()
    }
}

// ── Motion & boundaries ─────────────────────────────────────────────────────

pub fn move_player(state: &GameState) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let p = &state.player;
    let limit = state.width() - p.width;
    let x = (p.x + p.dx).max(0.0).min(limit);
    GameState {
        player: Player {
            x,
            ..p.clone()
        },
        ..state.clone()
    }
}

/// Advance the formation one step.
///
/// Every enemy moves by the shared `dx`. If any of them ends up past a
/// side wall, `dx` flips for the next frame and the whole grid drops by
/// `descent` now; the out-of-bounds x is kept for this frame. An enemy
/// whose bottom edge passes the player's top edge ends the game.
pub fn move_formation(state: &GameState) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let width = state.width();
    let mut formation = state.formation.clone();
    let mut wall_hit = false;
    let mut reached_player = false;

    for enemy in &mut formation.enemies {
        enemy.x += formation.dx;
        if enemy.x + enemy.width > width || enemy.x < 0.0 {
            wall_hit = true;
        }
        if enemy.y + enemy.height > state.player.y {
            reached_player = true;
        }
    }

    if wall_hit {
        formation.dx = -formation.dx;
        for enemy in &mut formation.enemies {
            enemy.y += formation.descent;
        }
    }

    let status = if reached_player {
        GameStatus::Lost
    } else {
        state.status
    };

    GameState {
        formation,
        status,
        ..state.clone()
    }
}

/// Player shots travel up and are discarded once fully above the field.
pub fn move_player_projectiles(state: &GameState) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let player_shots = state
        .player_shots
        .iter()
        .map(|s| Projectile {
            y: s.y - s.speed,
            ..s.clone()
        })
        .filter(|s| s.y + s.height >= 0.0)
        .collect();
    GameState {
        player_shots,
        ..state.clone()
    }
}

/// Enemy shots travel down and are discarded once past the bottom edge.
pub fn move_enemy_projectiles(state: &GameState) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let height = state.height();
    let enemy_shots = state
        .enemy_shots
        .iter()
        .map(|s| Projectile {
            y: s.y + s.speed,
            ..s.clone()
        })
        .filter(|s| s.y <= height)
        .collect();
    GameState {
        enemy_shots,
        ..state.clone()
    }
}

// ── Enemy fire controller ───────────────────────────────────────────────────

/// One shot opportunity per `enemy_fire_interval_ms` for the whole
/// formation. The shooter is picked uniformly from the live enemies and
/// fires from the middle of its bottom edge.
pub fn enemy_fire(state: &GameState, now: u64, rng: &mut impl Rng) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let cfg = &state.config;
    let elapsed = now.saturating_sub(state.fire.last_shot);
    if elapsed <= cfg.enemy_fire_interval_ms || state.formation.is_empty() {
        return state.clone();
    }

    let idx = rng.gen_range(0..state.formation.len());
    let shooter = &state.formation.enemies[idx];
    let shot = Projectile {
        x: shooter.x + shooter.width / 2.0 - cfg.shot_width / 2.0,
        y: shooter.y + shooter.height,
        width: cfg.shot_width,
        height: cfg.shot_height,
        speed: cfg.enemy_shot_speed,
        owner: ProjectileOwner::Enemy,
    };
    debug!(shooter = idx, x = shot.x, y = shot.y, "enemy fired");

    let mut enemy_shots = state.enemy_shots.clone();
    enemy_shots.push(shot);
    GameState {
        enemy_shots,
        fire: FireController { last_shot: now },
        ..state.clone()
    }
}

// ── Collisions ──────────────────────────────────────────────────────────────

/// Axis-aligned overlap. Rectangles that only touch along an edge do not
/// overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Result of a read-only collision scan. Indices refer to the slices that
/// were passed to [`detect_collisions`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collisions {
    /// Every (player shot, enemy) pair that overlapped.
    pub hits: Vec<(usize, usize)>,
    pub destroyed_enemies: BTreeSet<usize>,
    pub spent_player_shots: BTreeSet<usize>,
    pub spent_enemy_shots: BTreeSet<usize>,
    pub score_delta: u32,
    pub player_hit: bool,
}

impl Collisions {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.spent_enemy_shots.is_empty()
    }
}

/// Scan all pairs without touching any collection. An enemy overlapped by
/// several shots is counted once; a shot overlapping several enemies
/// destroys all of them.
pub fn detect_collisions(
    player_shots: &[Projectile],
    enemy_shots: &[Projectile],
    enemies: &[Enemy],
    player: &Player,
    score_per_enemy: u32,
) -> Collisions {
    let mut out = Collisions::default();

    for (si, shot) in player_shots.iter().enumerate() {
        let shot_box = shot.bounds();
        for (ei, enemy) in enemies.iter().enumerate() {
            if overlaps(&shot_box, &enemy.bounds()) {
                out.hits.push((si, ei));
                out.spent_player_shots.insert(si);
                out.destroyed_enemies.insert(ei);
            }
        }
    }
    out.score_delta = score_per_enemy.saturating_mul(out.destroyed_enemies.len() as u32);

    let player_box = player.bounds();
    for (si, shot) in enemy_shots.iter().enumerate() {
        if overlaps(&shot.bounds(), &player_box) {
            out.spent_enemy_shots.insert(si);
            out.player_hit = true;
        }
    }

    out
}

/// Apply a scan result in one step: drop everything it names, add the
/// score and end the game if the player was hit.
pub fn apply_collisions(state: &GameState, collisions: &Collisions) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }

    let enemies = keep_unlisted(&state.formation.enemies, &collisions.destroyed_enemies);
    let player_shots = keep_unlisted(&state.player_shots, &collisions.spent_player_shots);
    let enemy_shots = keep_unlisted(&state.enemy_shots, &collisions.spent_enemy_shots);

    let status = if collisions.player_hit {
        GameStatus::Lost
    } else {
        state.status
    };

    GameState {
        formation: Formation {
            enemies,
            ..state.formation.clone()
        },
        player_shots,
        enemy_shots,
        score: state.score.saturating_add(collisions.score_delta),
        status,
        ..state.clone()
    }
}

fn keep_unlisted<T: Clone>(items: &[T], drop: &BTreeSet<usize>) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| !drop.contains(i))
        .map(|(_, item)| item.clone())
        .collect()
}

/// An empty formation wins the game.
pub fn check_win(state: &GameState) -> GameState {
    if state.status.is_terminal() || !state.formation.is_empty() {
        return state.clone();
    }
    GameState {
        status: GameStatus::Won,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  `now` is the frame timestamp in
/// milliseconds; all randomness comes through `rng` so callers control
/// determinism (useful for tests with a seeded RNG).
///
/// Order: player, formation (may end the game), player shots, enemy shots,
/// enemy fire, collisions (may end the game), win check.
pub fn tick(state: &GameState, now: u64, rng: &mut impl Rng) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }

    let s = GameState {
        frame: state.frame + 1,
        ..move_player(state)
    };

    let s = move_formation(&s);
    if s.status.is_terminal() {
        log_outcome(&s);
        return s;
    }

    let s = move_player_projectiles(&s);
    let s = move_enemy_projectiles(&s);
    let s = enemy_fire(&s, now, rng);

    let collisions = detect_collisions(
        &s.player_shots,
        &s.enemy_shots,
        &s.formation.enemies,
        &s.player,
        s.config.score_per_enemy,
    );
    let s = if collisions.is_empty() {
        s
    } else {
        apply_collisions(&s, &collisions)
    };

    let s = check_win(&s);
    if s.status.is_terminal() {
        log_outcome(&s);
    }
    s
}

fn log_outcome(state: &GameState) {
    info!(
        status = ?state.status,
        score = state.score,
        enemies_left = state.formation.len(),
        frame = state.frame,
        "game over"
    );
}
