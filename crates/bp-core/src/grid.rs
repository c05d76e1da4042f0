//! 8-unit grid: named sizes and rounding helpers.
//!
//! Everything the canvas places or commits goes through [`snap`] so that
//! positions and sizes stay on multiples of [`UNIT`].

pub const UNIT: f64 = 8.0;

pub const XS: f64 = UNIT;
pub const SM: f64 = UNIT * 2.0;
pub const MD: f64 = UNIT * 3.0;
pub const LG: f64 = UNIT * 4.0;
pub const XL: f64 = UNIT * 6.0;
pub const XXL: f64 = UNIT * 8.0;

/// Default gutter between columns / rows.
pub const GAP: f64 = SM;

/// Round to the nearest multiple of [`UNIT`].
pub fn snap(v: f64) -> f64 {
    (v / UNIT).round() * UNIT
}

/// Width of one of `n` equal columns filling `total` with `gap` gutters,
/// rounded to the grid. `n == 0` is treated as one column.
pub fn cols(total: f64, n: usize, gap: f64) -> f64 {
    let n = n.max(1) as f64;
    snap((total - gap * (n - 1.0)) / n)
}

/// Height of one of `n` equal rows; same rule as [`cols`].
pub fn rows(total: f64, n: usize, gap: f64) -> f64 {
    cols(total, n, gap)
}
