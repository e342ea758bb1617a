use anyhow::ensure;

/// Tunable constants for a single game. `Default` reproduces the classic
/// layout: an 800×600 field with a 5×10 grid of enemies.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the player's top edge to the bottom of the field.
    pub player_bottom_offset: f32,
    pub player_speed: f32,

    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_padding_x: f32,
    pub enemy_padding_y: f32,
    pub enemy_offset_x: f32,
    pub enemy_offset_y: f32,
    pub formation_step: f32,
    pub formation_descent: f32,

    pub shot_width: f32,
    pub shot_height: f32,
    pub player_shot_speed: f32,
    pub enemy_shot_speed: f32,
    pub max_player_shots: usize,
    /// Minimum time between enemy shots, in milliseconds.
    pub enemy_fire_interval_ms: u64,

    pub score_per_enemy: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: 800.0,
            field_height: 600.0,

            player_width: 50.0,
            player_height: 50.0,
            player_bottom_offset: 60.0,
            player_speed: 5.0,

            enemy_rows: 5,
            enemy_cols: 10,
            enemy_width: 50.0,
            enemy_height: 20.0,
            enemy_padding_x: 10.0,
            enemy_padding_y: 10.0,
            enemy_offset_x: 30.0,
            enemy_offset_y: 30.0,
            formation_step: 2.0,
            formation_descent: 20.0,

            shot_width: 5.0,
            shot_height: 10.0,
            player_shot_speed: 7.0,
            enemy_shot_speed: 4.0,
            max_player_shots: 5,
            enemy_fire_interval_ms: 1000,

            score_per_enemy: 10,
        }
    }
}

impl GameConfig {
    /// Same defaults on a field of a different size.
    pub fn with_field(width: f32, height: f32) -> Self {
        GameConfig {
            field_width: width,
            field_height: height,
            ..GameConfig::default()
        }
    }

    /// Width of the whole enemy grid at spawn, offset included.
    pub fn formation_extent(&self) -> f32 {
        let cols = self.enemy_cols as f32;
        self.enemy_offset_x + cols * self.enemy_width + (cols - 1.0).max(0.0) * self.enemy_padding_x
    }

    /// Bottom edge of the lowest enemy row at spawn, offset included.
    pub fn formation_depth(&self) -> f32 {
        let rows = self.enemy_rows as f32;
        self.enemy_offset_y + rows * self.enemy_height + (rows - 1.0).max(0.0) * self.enemy_padding_y
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.field_width.is_finite()
                && self.field_height.is_finite()
                && self.field_width > 0.0
                && self.field_height > 0.0,
            "field must have a positive size, got {}x{}",
            self.field_width,
            self.field_height
        );
        ensure!(
            self.player_width > 0.0 && self.player_height > 0.0,
            "player must have a positive size"
        );
        ensure!(
            self.enemy_width > 0.0 && self.enemy_height > 0.0,
            "enemies must have a positive size"
        );
        ensure!(
            self.shot_width > 0.0 && self.shot_height > 0.0,
            "projectiles must have a positive size"
        );
        ensure!(
            self.player_width <= self.field_width,
            "player ({}) is wider than the field ({})",
            self.player_width,
            self.field_width
        );
        ensure!(
            self.player_bottom_offset >= self.player_height
                && self.player_bottom_offset <= self.field_height,
            "player row must lie inside the field"
        );
        ensure!(
            self.enemy_rows > 0 && self.enemy_cols > 0,
            "formation needs at least one row and one column"
        );
        ensure!(
            self.formation_extent() <= self.field_width,
            "formation ({}) does not fit in a field {} wide",
            self.formation_extent(),
            self.field_width
        );
        ensure!(
            self.formation_depth() <= self.field_height - self.player_bottom_offset,
            "formation reaches y={} but the player row starts at y={}",
            self.formation_depth(),
            self.field_height - self.player_bottom_offset
        );
        ensure!(self.formation_step > 0.0, "formation step must be positive");
        ensure!(self.max_player_shots > 0, "player needs at least one shot");
        Ok(())
    }
}

