use glam::Vec2;

use crate::input::{Direction, InputState};
use crate::{MAP_HEIGHT, MAP_WIDTH, MOVE_SPEED, TILE_SIZE, WALK_CYCLE_LEN, WALK_FRAME_INTERVAL, clamp};

/// Horizontal facing of the walker sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// The controllable entity: continuous pixel position plus the discrete
/// animation state derived from movement.
pub struct Player {
    /// World position in pixels (top-left corner of the sprite tile).
    pub pos: Vec2,
    pub facing: Facing,
    /// Current walk-cycle frame, always in `0..WALK_CYCLE_LEN`.
    pub frame: usize,
    /// Ticks spent moving since the walk started; drives frame advances.
    walk_counter: u64,
}

impl Player {
    /// Spawn on the center tile of the world.
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(
                (MAP_WIDTH / 2 * TILE_SIZE) as f32,
                (MAP_HEIGHT / 2 * TILE_SIZE) as f32,
            ),
            facing: Facing::Left,
            frame: 0,
            walk_counter: 0,
        }
    }

    /// Advance one simulation tick from the current held-direction snapshot.
    ///
    /// Direction contributions are evaluated in the fixed order Up, Down,
    /// Left, Right. Facing follows the horizontal contributions in that same
    /// order, so when both Left and Right are held the later write (Right)
    /// wins while the axis itself cancels to zero.
    pub fn tick(&mut self, input: &InputState) {
        let mut dx = 0.0_f32;
        let mut dy = 0.0_f32;

        if input.direction_held(Direction::Up) {
            dy -= 1.0;
        }
        if input.direction_held(Direction::Down) {
            dy += 1.0;
        }
        if input.direction_held(Direction::Left) {
            dx -= 1.0;
            self.facing = Facing::Left;
        }
        if input.direction_held(Direction::Right) {
            dx += 1.0;
            self.facing = Facing::Right;
        }

        if dx != 0.0 || dy != 0.0 {
            // Unit-length direction: diagonal speed equals axis-aligned speed.
            let len = (dx * dx + dy * dy).sqrt();
            dx /= len;
            dy /= len;

            self.walk_counter += 1;
            if self.walk_counter % WALK_FRAME_INTERVAL == 0 {
                self.frame = (self.frame + 1) % WALK_CYCLE_LEN;
            }
        } else {
            // Idle: rest pose, no partial-cycle memory.
            self.frame = 0;
            self.walk_counter = 0;
        }

        self.pos.x = clamp(
            self.pos.x + dx * MOVE_SPEED,
            0.0,
            (MAP_WIDTH * TILE_SIZE - 1) as f32,
        );
        self.pos.y = clamp(
            self.pos.y + dy * MOVE_SPEED,
            0.0,
            (MAP_HEIGHT * TILE_SIZE - 1) as f32,
        );
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
