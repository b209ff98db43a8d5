//! Combat constants - all fixed multipliers in one place

// Type advantage multipliers
pub const ADVANTAGE_STRONG: f64 = 1.5;
pub const ADVANTAGE_NEUTRAL: f64 = 1.0;
pub const ADVANTAGE_WEAK: f64 = 0.5;

// Damage floor: every landed hit deals at least this much
pub const MIN_DAMAGE: u32 = 1;

// Effective defense never drops below this (zero defense would divide by zero)
pub const MIN_EFFECTIVE_DEFENSE: f64 = 1.0;

// Multiplier used when a skill or ability is absent
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;
