use rand::Rng;

// ── Tile ──────────────────────────────────────────────────────────────────────

/// One cell of the world grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Grass,
    Water,
    Sand,
}

impl Tile {
    /// Solid display color (RGBA, linear 0..1) for this tile type.
    pub fn color(self) -> [f32; 4] {
        match self {
            Tile::Grass => [0.596, 0.984, 0.596, 1.0],
            Tile::Water => [0.200, 0.600, 1.000, 1.0],
            Tile::Sand => [1.000, 0.894, 0.627, 1.0],
        }
    }
}

// ── TileMap ───────────────────────────────────────────────────────────────────

/// The static world grid: generated once at startup, immutable afterwards.
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Generate a `width × height` grid from a uniform random source.
    ///
    /// Per cell: `r < 0.1` → Water, `0.1 <= r < 0.2` → Sand, else Grass.
    /// The `Rng` is injected so tests can seed a deterministic sequence; the
    /// viewer passes `rand::thread_rng()`.
    pub fn generate(width: u32, height: u32, rng: &mut impl Rng) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for _ in 0..width * height {
            let r: f32 = rng.r#gen();
            tiles.push(if r < 0.1 {
                Tile::Water
            } else if r < 0.2 {
                Tile::Sand
            } else {
                Tile::Grass
            });
        }
        Self { width, height, tiles }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile at `(x, y)`. Total over all coordinates: anything outside the
    /// generated grid reads as the background type (Grass).
    pub fn get(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Tile::Grass;
        }
        self.tiles[(y as u32 * self.width + x as u32) as usize]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
