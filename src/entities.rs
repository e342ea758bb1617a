/// All game entity types — pure data, no logic.
///
/// Geometry is in logical field pixels with the origin at the top-left
/// corner and y growing downward.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Running)
    }
}

/// Tag used by the renderer to pick how an entity is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    PlayerShot,
    EnemyShot,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels travelled per frame; direction comes from `owner`.
    pub speed: f32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn kind(&self) -> EntityKind {
        match self.owner {
            ProjectileOwner::Player => EntityKind::PlayerShot,
            ProjectileOwner::Enemy => EntityKind::EnemyShot,
        }
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity: `-speed`, `0.0` or `+speed`.
    pub dx: f32,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The enemy grid, moved as one unit.
///
/// `dx` is shared by every member: a single wall contact flips it for all
/// of them and drops the whole grid by `descent`.
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
    pub dx: f32,
    pub descent: f32,
}

impl Formation {
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }
}

/// Global enemy fire throttle. Timestamps are milliseconds on the host's
/// frame clock.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FireController {
    pub last_shot: u64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub formation: Formation,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub fire: FireController,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub config: GameConfig,
}

impl GameState {
    pub fn width(&self) -> f32 {
        self.config.field_width
    }

    pub fn height(&self) -> f32 {
        self.config.field_height
    }
}
