//! Centralized tuning constants for the prize wheel.
//!
//! Storage keys match the layout the promotion already wrote to visitors'
//! devices, so existing play records keep gating replays.

// Storage keys -------------------------------------------------------------
pub const PLAYED_KEY: &str = "barbearia-wheel-played";
pub const SESSION_KEY: &str = "barbearia-session-id";

// Selection ----------------------------------------------------------------
/// Allowed deviation of the probability sum from 1.0 at table validation.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

// Wheel animation ----------------------------------------------------------
pub const FULL_TURN_DEGREES: f64 = 360.0;
pub const BASE_TURNS: u32 = 5;
pub const REVEAL_DELAY_MS: u64 = 3_000;

// Session ids --------------------------------------------------------------
pub const SESSION_PREFIX: &str = "session";
pub const SESSION_SUFFIX_LEN: usize = 9;
