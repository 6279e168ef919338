//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Playfield ---

/// Playfield width in pixels.
pub const PLAYFIELD_WIDTH: f64 = 384.0;

/// Playfield height in pixels.
pub const PLAYFIELD_HEIGHT: f64 = 448.0;

/// Margin beyond the field edge before a projectile is culled.
pub const OFFSCREEN_MARGIN: f64 = 32.0;

/// Background scroll speed (pixels per second).
pub const BACKGROUND_SCROLL_SPEED: f64 = 40.0;

// --- Pool capacities ---

/// Enemy bullet pool capacity. The pool grows by one slot on exhaustion.
pub const ENEMY_BULLET_CAP: usize = 2000;

/// Player shot pool capacity. Spawns are dropped on exhaustion.
pub const PLAYER_SHOT_CAP: usize = 256;

/// Item pool capacity.
pub const ITEM_CAP: usize = 128;

/// Particle pool capacity. The oldest particle is recycled on exhaustion.
pub const PARTICLE_CAP: usize = 512;

/// Maximum cleanup particles emitted by a full bullet-field clear.
pub const CLEAR_PARTICLE_CAP: usize = 50;

// --- Collision ---

/// Lethal hit tests use the bullet radius scaled by this factor
/// (the visible sprite is larger than the lethal core).
pub const LETHAL_BULLET_RADIUS_SCALE: f64 = 0.7;

/// Player shot half-width used in shot-vs-enemy hit tests.
pub const SHOT_HALF_WIDTH: f64 = 4.0;

/// Score awarded per graze.
pub const GRAZE_SCORE: u64 = 500;

/// Score awarded per non-piercing shot hit.
pub const HIT_SCORE: u64 = 10;

/// Reduced score awarded per piercing shot hit (piercing shots hit every tick).
pub const PIERCE_HIT_SCORE: u64 = 2;

/// Probability of spawning an impact particle on a shot hit.
pub const HIT_PARTICLE_CHANCE: f64 = 0.3;

// --- Player ---

/// Player spawn/respawn x position.
pub const PLAYER_START_X: f64 = PLAYFIELD_WIDTH * 0.5;

/// Player spawn/respawn y position.
pub const PLAYER_START_Y: f64 = PLAYFIELD_HEIGHT - 48.0;

/// Movement inset keeping the player sprite inside the field.
pub const PLAYER_EDGE_INSET: f64 = 12.0;

/// Invulnerability window after losing a life (ticks).
pub const DEATH_IMMUNITY_TICKS: u32 = 180;

/// Invulnerability window after a bomb (ticks).
pub const BOMB_IMMUNITY_TICKS: u32 = 240;

/// Respawn drift-in duration after death (ticks).
pub const RESPAWN_TICKS: u32 = 60;

/// Maximum power level.
pub const POWER_MAX: u32 = 128;

/// Power items dropped on death.
pub const DEATH_POWER_DROPS: u32 = 3;

/// Power lost on death.
pub const DEATH_POWER_LOSS: u32 = 16;

/// Bomb damage applied to every living enemy.
pub const BOMB_DAMAGE: f64 = 200.0;

// --- Items ---

/// Downward acceleration on falling items (pixels/s²).
pub const ITEM_GRAVITY: f64 = 120.0;

/// Terminal fall speed for items (pixels/s).
pub const ITEM_TERMINAL_SPEED: f64 = 90.0;

/// Homing speed once an item is magnetized (pixels/s).
pub const ITEM_HOMING_SPEED: f64 = 320.0;

/// Collection radius around the player.
pub const ITEM_COLLECT_RADIUS: f64 = 16.0;

/// When the player's y is at or above this line, all items magnetize.
pub const AUTO_COLLECT_LINE: f64 = 112.0;

/// Score per point item.
pub const POINT_ITEM_SCORE: u64 = 10_000;

/// Power per small power item.
pub const POWER_ITEM_VALUE: u32 = 1;

/// Power per big power item.
pub const BIG_POWER_ITEM_VALUE: u32 = 8;

// --- Script engine ---

/// Idle gap (simulated seconds to the next event, with nothing on screen)
/// past which the script clock fast-forwards.
pub const FAST_FORWARD_GAP_SECS: f64 = 2.0;

/// Script clock multiplier while fast-forwarding.
pub const FAST_FORWARD_RATE: f64 = 5.0;

// --- Cosmetics ---

/// Screen flash decay (alpha per second).
pub const SCREEN_FLASH_DECAY: f64 = 2.0;

/// Camera shake decay (magnitude per second).
pub const CAMERA_SHAKE_DECAY: f64 = 12.0;

/// Camera shake magnitude on boss death.
pub const BOSS_DEATH_SHAKE: f64 = 6.0;

/// Spell card HUD slide-in duration (seconds of phase-local time).
pub const SPELL_SLIDE_SECS: f64 = 0.5;

/// Positions recorded in a player shot's render trail.
pub const SHOT_TRAIL_LEN: usize = 8;
