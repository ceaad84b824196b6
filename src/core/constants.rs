// Grid dimensions
pub const ROW_COUNT: usize = 6;
pub const COL_COUNT: usize = 20;

// Gameplay
pub const COLOR_TYPE_COUNT: u8 = 4;
pub const MINIMUM_MATCH_COUNT: usize = 5;
pub const BOMB_SPAWN_THRESHOLD: usize = 5;
pub const BOMB_DAMAGE: u32 = 2;
pub const OBSTACLE_DURABILITY: u32 = 3;

// Animation pacing hints (seconds). The engine never waits on these; the
// timeline planner turns them into per-event start offsets for hosts.
pub const BLAST_ANIMATION_SECS: f32 = 0.6;
pub const FALL_ANIMATION_SECS: f32 = 0.3;
pub const FALL_ANIMATION_DELAY_SECS: f32 = 0.0;
pub const SPAWN_ANIMATION_DELAY_SECS: f32 = 0.0;
pub const CHAIN_EXPLOSION_DELAY_SECS: f32 = 0.15;

// Built-in level ids
pub const LEVEL_CLASSIC: u32 = 0;
pub const LEVEL_OBSTACLE_BAND: u32 = 1;
pub const LEVEL_ISLAND_MAZE: u32 = 2;
pub const LEVEL_BOMB_GRID: u32 = 3;
pub const LEVEL_BOMB_CHAMBERS: u32 = 4;

// Row that carries the obstacle band in the obstacle band level
pub const OBSTACLE_BAND_ROW: usize = 3;

// Fixed obstacle cells (row, col) of the island maze level
pub const ISLAND_MAZE_OBSTACLES: [(usize, usize); 8] = [
    (3, 6),
    (1, 2),
    (1, 7),
    (2, 4),
    (4, 1),
    (4, 6),
    (5, 0),
    (5, 8),
];

// Simulator defaults
pub const SIM_DEFAULT_RUNS: u32 = 100;
pub const SIM_DEFAULT_MOVES_PER_RUN: u32 = 200;
