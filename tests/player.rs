/// Unit tests for the motion integrator.
///
/// `Player::tick` reads a plain key set and mutates plain state, so tests
/// require no window or GPU.
use tilewalker::input::{InputState, KeyCode};
use tilewalker::player::{Facing, Player};
use tilewalker::{MAP_HEIGHT, MAP_WIDTH, MOVE_SPEED, TILE_SIZE};

fn held(keys: &[KeyCode]) -> InputState {
    let mut input = InputState::new();
    for &k in keys {
        input.press(k);
    }
    input
}

// ── World bounds ─────────────────────────────────────────────────────────────

#[test]
fn position_never_leaves_world_bounds() {
    let max_x = (MAP_WIDTH * TILE_SIZE - 1) as f32;
    let max_y = (MAP_HEIGHT * TILE_SIZE - 1) as f32;
    let input = held(&[KeyCode::ArrowLeft, KeyCode::ArrowUp]);

    let mut player = Player::new();
    // Far more ticks than needed to cross the whole world.
    for _ in 0..2_000 {
        player.tick(&input);
        assert!(player.pos.x >= 0.0 && player.pos.x <= max_x, "x={}", player.pos.x);
        assert!(player.pos.y >= 0.0 && player.pos.y <= max_y, "y={}", player.pos.y);
    }
    // Pinned against the top-left corner by now.
    assert_eq!(player.pos.x, 0.0);
    assert_eq!(player.pos.y, 0.0);
}

#[test]
fn clamps_to_far_corner() {
    let input = held(&[KeyCode::ArrowRight, KeyCode::ArrowDown]);
    let mut player = Player::new();
    for _ in 0..2_000 {
        player.tick(&input);
    }
    assert_eq!(player.pos.x, (MAP_WIDTH * TILE_SIZE - 1) as f32);
    assert_eq!(player.pos.y, (MAP_HEIGHT * TILE_SIZE - 1) as f32);
}

// ── Axis cancellation ────────────────────────────────────────────────────────

#[test]
fn opposite_horizontal_directions_cancel() {
    let input = held(&[KeyCode::ArrowLeft, KeyCode::ArrowRight]);
    let mut player = Player::new();
    let start = player.pos;
    for _ in 0..30 {
        player.tick(&input);
    }
    assert_eq!(player.pos, start);
}

#[test]
fn opposite_vertical_directions_cancel() {
    let input = held(&[KeyCode::KeyW, KeyCode::KeyS]);
    let mut player = Player::new();
    let start = player.pos;
    for _ in 0..30 {
        player.tick(&input);
    }
    assert_eq!(player.pos, start);
}

#[test]
fn cancelled_axes_count_as_idle_for_animation() {
    // Net-zero input means no motion, so the walk cycle must not run.
    let input = held(&[KeyCode::ArrowLeft, KeyCode::ArrowRight]);
    let mut player = Player::new();
    for _ in 0..20 {
        player.tick(&input);
        assert_eq!(player.frame, 0);
    }
}

// ── Normalization ────────────────────────────────────────────────────────────

#[test]
fn diagonal_step_length_equals_axis_step_length() {
    let mut axis = Player::new();
    axis.tick(&held(&[KeyCode::ArrowRight]));
    let axis_step = (axis.pos - Player::new().pos).length();

    let mut diagonal = Player::new();
    diagonal.tick(&held(&[KeyCode::ArrowRight, KeyCode::ArrowUp]));
    let diagonal_step = (diagonal.pos - Player::new().pos).length();

    assert!((axis_step - MOVE_SPEED).abs() < 1e-4);
    assert!(
        (diagonal_step - axis_step).abs() < 1e-4,
        "diagonal {diagonal_step} vs axis {axis_step}"
    );
}

// ── Facing ───────────────────────────────────────────────────────────────────

#[test]
fn facing_follows_horizontal_input() {
    let mut player = Player::new();
    player.tick(&held(&[KeyCode::ArrowRight]));
    assert_eq!(player.facing, Facing::Right);
    player.tick(&held(&[KeyCode::KeyA]));
    assert_eq!(player.facing, Facing::Left);
}

#[test]
fn facing_right_wins_when_both_horizontals_held() {
    // Left applies first, Right applies second within the tick; the last
    // write wins while the axis itself cancels.
    let mut player = Player::new();
    player.tick(&held(&[KeyCode::ArrowLeft, KeyCode::ArrowRight]));
    assert_eq!(player.facing, Facing::Right);
}

#[test]
fn facing_untouched_by_vertical_or_idle_input() {
    let mut player = Player::new();
    player.tick(&held(&[KeyCode::ArrowRight]));
    assert_eq!(player.facing, Facing::Right);

    player.tick(&held(&[KeyCode::ArrowUp]));
    assert_eq!(player.facing, Facing::Right, "vertical-only input must not reset facing");

    player.tick(&InputState::new());
    assert_eq!(player.facing, Facing::Right, "idle input must not reset facing");
}

// ── Walk cycle ───────────────────────────────────────────────────────────────

#[test]
fn frame_advances_every_fifth_moving_tick() {
    let input = held(&[KeyCode::ArrowRight]);
    let mut player = Player::new();
    let mut timeline = Vec::new();
    for tick in 1..=20u32 {
        player.tick(&input);
        if tick % 5 == 0 {
            timeline.push((tick, player.frame));
        }
    }
    assert_eq!(timeline, vec![(5, 1), (10, 2), (15, 3), (20, 0)]);
}

#[test]
fn frame_index_always_within_cycle() {
    let input = held(&[KeyCode::KeyD, KeyCode::KeyS]);
    let mut player = Player::new();
    for _ in 0..123 {
        player.tick(&input);
        assert!(player.frame < 4, "frame {} out of cycle", player.frame);
    }
}

#[test]
fn frame_resets_within_one_idle_tick_and_stays_reset() {
    let input = held(&[KeyCode::ArrowLeft]);
    let mut player = Player::new();
    for _ in 0..7 {
        player.tick(&input);
    }
    assert_eq!(player.frame, 1, "sanity: mid-cycle before release");

    let idle = InputState::new();
    player.tick(&idle);
    assert_eq!(player.frame, 0);
    for _ in 0..50 {
        player.tick(&idle);
        assert_eq!(player.frame, 0);
    }
}

#[test]
fn walk_counter_restarts_after_idle() {
    // 4 moving ticks, idle, then 4 more: no frame advance — the partial
    // cycle is forgotten, not resumed.
    let input = held(&[KeyCode::ArrowDown]);
    let mut player = Player::new();
    for _ in 0..4 {
        player.tick(&input);
    }
    player.tick(&InputState::new());
    for _ in 0..4 {
        player.tick(&input);
    }
    assert_eq!(player.frame, 0);
}

// ── End-to-end walk scenario ─────────────────────────────────────────────────

#[test]
fn holding_right_for_sixty_ticks_moves_120_pixels() {
    // World 100×100 tiles of 16 px, spawn on tile (50, 50) = (800, 800);
    // 60 ticks at 2 px/tick → x = 800 + 120 = 920.
    let input = held(&[KeyCode::ArrowRight]);
    let mut player = Player::new();
    assert_eq!(player.pos.x, 800.0);
    for _ in 0..60 {
        player.tick(&input);
    }
    assert_eq!(player.pos.x, 920.0);
    assert_eq!(player.pos.y, 800.0);
    assert_eq!(player.facing, Facing::Right);
}

// ── Alias handling through the integrator ────────────────────────────────────

#[test]
fn motion_continues_while_any_alias_remains_held() {
    let mut input = InputState::new();
    input.press(KeyCode::ArrowRight);
    input.press(KeyCode::KeyD);

    let mut player = Player::new();
    player.tick(&input);
    input.release(KeyCode::KeyD);
    player.tick(&input);
    assert_eq!(player.pos.x, 800.0 + 2.0 * MOVE_SPEED);

    input.release(KeyCode::ArrowRight);
    player.tick(&input);
    assert_eq!(player.pos.x, 800.0 + 2.0 * MOVE_SPEED, "no keys held, no motion");
}
