/// Drawing seam between the simulation and whatever host shows it.
///
/// The core only ever asks for filled rectangles and centred text; the
/// host decides how a `Paint` looks and how field pixels map to its
/// output.

use crate::entities::{EntityKind, GameState, GameStatus, Rect};

pub const WIN_MESSAGE: &str = "CLEARED!";
pub const LOSS_MESSAGE: &str = "GAME OVER";
pub const RETRY_HINT: &str = "Relaunch to try again";

const MESSAGE_SIZE: f32 = 50.0;
const HINT_SIZE: f32 = 20.0;
const HINT_GAP: f32 = 50.0;

// Decoration offsets inside the sprite body, sized for the 50×50 shisa
// and the 50×20 goya.
const EYE_SIZE: f32 = 10.0;
const EYE_OFFSETS: [(f32, f32); 2] = [(10.0, 10.0), (30.0, 10.0)];
const MOUTH: Rect = Rect { x: 10.0, y: 35.0, width: 30.0, height: 5.0 };
const BUMP_SIZE: f32 = 5.0;
//   ▪   ▪   ▪
//     ▪   ▪
const BUMP_OFFSETS: [(f32, f32); 5] = [(5.0, 5.0), (15.0, 10.0), (25.0, 5.0), (35.0, 10.0), (45.0, 5.0)];

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    /// Shisa body.
    Player,
    PlayerEyes,
    PlayerMouth,
    /// Goya body.
    Enemy,
    EnemyBumps,
    PlayerShot,
    EnemyShot,
    /// Translucent end-of-game overlay.
    Shade,
    Text,
}

// ── Host traits ───────────────────────────────────────────────────────────────

pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, paint: Paint);
    /// Draw `text` horizontally centred on `x` with its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, paint: Paint);
}

pub trait ScoreDisplay {
    fn show_score(&mut self, score: u32);
}

// ── Recording surface ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { rect: Rect, paint: Paint },
    FillText { text: String, x: f32, y: f32, size: f32, paint: Paint },
}

/// A `Surface` that just remembers what it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects_with(&self, paint: Paint) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, paint: p } if *p == paint => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.commands.push(DrawCommand::FillRect { rect, paint });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, paint: Paint) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            size,
            paint,
        });
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw one entity. The first rectangle is always the exact body.
pub fn draw_entity<S: Surface + ?Sized>(surface: &mut S, kind: EntityKind, body: Rect) {
    match kind {
        EntityKind::Player => {
            surface.fill_rect(body, Paint::Player);
            for (dx, dy) in EYE_OFFSETS {
                surface.fill_rect(Rect::new(body.x + dx, body.y + dy, EYE_SIZE, EYE_SIZE), Paint::PlayerEyes);
            }
            let mouth = Rect::new(body.x + MOUTH.x, body.y + MOUTH.y, MOUTH.width, MOUTH.height);
            surface.fill_rect(mouth, Paint::PlayerMouth);
        }
        EntityKind::Enemy => {
            surface.fill_rect(body, Paint::Enemy);
            for (dx, dy) in BUMP_OFFSETS {
                surface.fill_rect(Rect::new(body.x + dx, body.y + dy, BUMP_SIZE, BUMP_SIZE), Paint::EnemyBumps);
            }
        }
        EntityKind::PlayerShot => surface.fill_rect(body, Paint::PlayerShot),
        EntityKind::EnemyShot => surface.fill_rect(body, Paint::EnemyShot),
    }
}

/// Render one complete frame of the running game.
pub fn render_scene<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear();

    draw_entity(surface, EntityKind::Player, state.player.bounds());
    for enemy in &state.formation.enemies {
        draw_entity(surface, EntityKind::Enemy, enemy.bounds());
    }
    for shot in state.player_shots.iter().chain(&state.enemy_shots) {
        draw_entity(surface, shot.kind(), shot.bounds());
    }
}

// ── End-of-game overlay ───────────────────────────────────────────────────────

/// Shade the field and print the outcome. Does nothing while running.
pub fn render_overlay<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let message = match state.status {
        GameStatus::Running => return,
        GameStatus::Won => WIN_MESSAGE,
        GameStatus::Lost => LOSS_MESSAGE,
    };
    let (w, h) = (state.width(), state.height());
    surface.fill_rect(Rect::new(0.0, 0.0, w, h), Paint::Shade);
    surface.fill_text(message, w / 2.0, h / 2.0, MESSAGE_SIZE, Paint::Text);
    surface.fill_text(RETRY_HINT, w / 2.0, h / 2.0 + HINT_GAP, HINT_SIZE, Paint::Text);
}
