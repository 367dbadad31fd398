use std::collections::HashSet;

pub use winit::keyboard::KeyCode;

/// Logical movement direction, aliased from one or more physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Physical keys that activate this direction (arrow key + WASD letter;
    /// `KeyCode` already collapses upper/lowercase to one code).
    pub fn keys(self) -> [KeyCode; 2] {
        match self {
            Direction::Up => [KeyCode::ArrowUp, KeyCode::KeyW],
            Direction::Down => [KeyCode::ArrowDown, KeyCode::KeyS],
            Direction::Left => [KeyCode::ArrowLeft, KeyCode::KeyA],
            Direction::Right => [KeyCode::ArrowRight, KeyCode::KeyD],
        }
    }
}

/// Live set of held keys, fed by the window event loop.
///
/// Aliasing keys are tracked as independent set members: releasing `KeyW`
/// while `ArrowUp` stays down keeps `Up` active. Opposite directions carry no
/// priority — both held cancels to zero net motion on that axis.
#[derive(Debug, Default)]
pub struct InputState {
    keys_held: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.keys_held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// A direction is active iff at least one of its aliasing keys is held.
    pub fn direction_held(&self, dir: Direction) -> bool {
        dir.keys().iter().any(|k| self.keys_held.contains(k))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
