/* embcordic | rotation.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/******************************************************************************/

use crate::common::{Error, SinCos, MAX_ITERATIONS};
use crate::table::{AngleTable, SCALE_TABLE, THETA_TABLE};

/******************************************************************************/

/// The main CORDIC rotation engine
///
/// Starting from the unit vector (1, 0), every iteration rotates the vector
/// by the next elementary angle, towards the target if the residual angle is
/// non-negative and away from it otherwise. After the configured number of
/// iterations the accumulated rotation has converged to the target angle and
/// the vector components, corrected for the rotation gain, are its cosine
/// and sine.
#[derive(Debug)]
pub struct EmbCordic<'a> {
    table: AngleTable<'a>,
    iterations: usize,
    in_domain: bool,
    step: usize,
    x: f64,
    y: f64,
    z: f64,
    p2i: f64
}

impl<'a> EmbCordic<'a> {
    /// Initializes a new rotation towards `theta` (in radians)
    ///
    /// The iteration count selects the precision, each micro-rotation
    /// contributing roughly one bit; it must be between 1 and the table
    /// length, or [`Error::InvalidIterations`] is returned.
    pub fn new(theta: f64, iterations: usize, table: AngleTable<'a>) -> Result<Self, Error> {
        if iterations == 0 || iterations > table.len() {
            return Err(Error::InvalidIterations);
        }

        let limit = table.max_angle(iterations);
        Ok(Self {
            table,
            iterations,
            in_domain: theta >= -limit && theta <= limit,
            step: 0,
            x: 1.0,
            y: 0.0,
            z: theta,
            p2i: 1.0
        })
    }

    /// Checks whether the target angle is within the convergence domain
    ///
    /// Rotations outside ±[`AngleTable::max_angle()`] still run to
    /// completion, but the residual angle no longer shrinks towards zero, so
    /// the accuracy guarantee is void. Callers needing full-circle coverage
    /// must fold the angle into the domain with the quadrant symmetries
    /// before starting the rotation.
    pub fn in_convergence_domain(&self) -> bool {
        self.in_domain
    }

    /// Checks if the rotation is complete
    ///
    /// Use this together with the [`EmbCordic::rotate_iterate()`] function.
    pub fn is_done(&self) -> bool {
        self.step == self.iterations
    }

    /// Angle still to be rotated
    ///
    /// For targets within the convergence domain, the magnitude of the
    /// residual is bounded by the last elementary angle consumed so far.
    pub fn residual(&self) -> f64 {
        self.z
    }

    /// Non-blocking rotation: performs a single micro-rotation
    ///
    /// Does nothing once the rotation is complete.
    /// Use this together with the [`EmbCordic::is_done()`] function.
    /// For example:
    /// ```
    /// let table = embcordic::AngleTable::builtin();
    /// let mut cordic = embcordic::EmbCordic::new(0.5, 30, table).unwrap();
    /// while !cordic.is_done() {
    ///     cordic.rotate_iterate();
    ///     // Other actions can be performed here between two iterations
    /// }
    /// let result = cordic.results();
    /// ```
    pub fn rotate_iterate(&mut self) {
        if self.is_done() {
            return;
        }

        let sigma = if self.z >= 0.0 { 1.0 } else { -1.0 };
        self.z -= sigma * self.table.angles()[self.step];
        (self.x, self.y) = (
            self.x - sigma * self.y * self.p2i,
            self.y + sigma * self.x * self.p2i
        );
        self.p2i /= 2.0;
        self.step += 1;
    }

    /// Gain-corrected cosine and sine for the micro-rotations taken so far
    ///
    /// The estimate is refined by every call to
    /// [`EmbCordic::rotate_iterate()`]; once [`EmbCordic::is_done()`]
    /// returns true, it is the final result.
    pub fn results(&self) -> SinCos {
        let scale = self.table.scale(self.step);
        SinCos { cos: self.x * scale, sin: self.y * scale }
    }

    /// Blocking rotation: runs all remaining micro-rotations
    ///
    /// For example:
    /// ```
    /// let table = embcordic::AngleTable::builtin();
    /// let result = embcordic::EmbCordic::new(0.5, 30, table).unwrap().rotate();
    /// ```
    pub fn rotate(&mut self) -> SinCos {
        while !self.is_done() {
            self.rotate_iterate();
        }
        self.results()
    }
}

/******************************************************************************/

/// Computes the cosine and sine of `alpha` (in radians) over the built-in table
///
/// This is the rotation engine as a `const fn`, usable to bake trigonometric
/// tables into the binary at compile time. `iterations` must be between 1
/// and [`MAX_ITERATIONS`] and `alpha` within the convergence domain; both
/// are checked with assertions.
/// For example:
/// ```
/// const RESULT: embcordic::SinCos = embcordic::sin_cos(0.5, 48);
/// ```
pub const fn sin_cos(alpha: f64, iterations: usize) -> SinCos {
    assert!(iterations >= 1 && iterations <= MAX_ITERATIONS);

    let mut limit = 0.0;
    let mut i = 0;
    while i < iterations {
        limit += THETA_TABLE[i];
        i += 1;
    }
    assert!(alpha >= -limit && alpha <= limit);

    let mut x = 1.0;
    let mut y = 0.0;
    let mut z = alpha;
    let mut p2i = 1.0;

    let mut i = 0;
    while i < iterations {
        let sigma = if z >= 0.0 { 1.0 } else { -1.0 };
        z -= sigma * THETA_TABLE[i];
        (x, y) = (x - sigma * y * p2i, y + sigma * x * p2i);
        p2i /= 2.0;
        i += 1;
    }

    SinCos { cos: x * SCALE_TABLE[iterations - 1], sin: y * SCALE_TABLE[iterations - 1] }
}

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DEFAULT_ITERATIONS;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::FRAC_PI_4;

    #[test]
    fn test_sweep_against_libm() {
        let table = AngleTable::builtin();
        let mut theta = -1.0;
        while theta <= 1.0 {
            let result = EmbCordic::new(theta, DEFAULT_ITERATIONS, table).unwrap().rotate();
            assert_abs_diff_eq!(result.cos, libm::cos(theta), epsilon = 1e-6);
            assert_abs_diff_eq!(result.sin, libm::sin(theta), epsilon = 1e-6);
            assert_abs_diff_eq!(result.cos * result.cos + result.sin * result.sin, 1.0, epsilon = 1e-6);
            theta += 1.0 / 16.0;
        }
    }

    #[test]
    fn test_quarter_pi() {
        let table = AngleTable::builtin();
        let result = EmbCordic::new(FRAC_PI_4, DEFAULT_ITERATIONS, table).unwrap().rotate();
        assert_abs_diff_eq!(result.cos, 0.7071067812, epsilon = 1e-6);
        assert_abs_diff_eq!(result.sin, 0.7071067812, epsilon = 1e-6);
    }

    #[test]
    fn test_cosine_even_sine_odd() {
        let table = AngleTable::builtin();
        let pos = EmbCordic::new(0.3, DEFAULT_ITERATIONS, table).unwrap().rotate();
        let neg = EmbCordic::new(-0.3, DEFAULT_ITERATIONS, table).unwrap().rotate();

        // The micro-rotations mirror bit for bit, so the match is exact
        assert_eq!(pos.cos, neg.cos);
        assert_eq!(pos.sin, -neg.sin);
    }

    #[test]
    fn test_zero_angle_is_not_exact() {
        let table = AngleTable::builtin();
        let result = EmbCordic::new(0.0, DEFAULT_ITERATIONS, table).unwrap().rotate();

        // The direction bit never idles, so the output is not exactly
        // (1, 0): the residual stays on the order of the last elementary
        // angle and shows up in the sine
        assert!(result.sin != 0.0);
        assert_abs_diff_eq!(result.cos, 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(result.sin, 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_low_iteration_error_bound() {
        let table = AngleTable::builtin();
        let coarse = EmbCordic::new(0.5, 10, table).unwrap().rotate();
        let fine = EmbCordic::new(0.5, DEFAULT_ITERATIONS, table).unwrap().rotate();

        // 10 iterations leave an error on the order of 2⁻¹⁰
        assert!((coarse.cos - fine.cos).abs() < 2e-3);
        assert!((coarse.sin - fine.sin).abs() < 2e-3);
        assert!((coarse.cos - fine.cos).abs() + (coarse.sin - fine.sin).abs() > 1e-7);
    }

    #[test]
    fn test_convergence_domain_flag() {
        let table = AngleTable::builtin();
        assert!(EmbCordic::new(1.0, DEFAULT_ITERATIONS, table).unwrap().in_convergence_domain());
        assert!(!EmbCordic::new(3.0, DEFAULT_ITERATIONS, table).unwrap().in_convergence_domain());
        assert!(!EmbCordic::new(f64::NAN, DEFAULT_ITERATIONS, table).unwrap().in_convergence_domain());
    }

    #[test]
    fn test_configuration_errors() {
        let table = AngleTable::builtin();
        assert_eq!(EmbCordic::new(0.5, 0, table).unwrap_err(), Error::InvalidIterations);
        assert_eq!(EmbCordic::new(0.5, MAX_ITERATIONS + 1, table).unwrap_err(), Error::InvalidIterations);
    }

    #[test]
    fn test_iterate_matches_blocking() {
        let table = AngleTable::builtin();
        let mut cordic = EmbCordic::new(0.75, DEFAULT_ITERATIONS, table).unwrap();
        let mut steps = 0;
        while !cordic.is_done() {
            cordic.rotate_iterate();
            steps += 1;
        }
        assert_eq!(steps, DEFAULT_ITERATIONS);

        let blocking = EmbCordic::new(0.75, DEFAULT_ITERATIONS, table).unwrap().rotate();
        assert_eq!(cordic.results(), blocking);

        // Extra calls once done must not change the result
        cordic.rotate_iterate();
        assert_eq!(cordic.results(), blocking);
    }

    #[test]
    fn test_residual_shrinks() {
        let table = AngleTable::builtin();
        let mut cordic = EmbCordic::new(1.0, DEFAULT_ITERATIONS, table).unwrap();
        cordic.rotate_iterate();
        let early = cordic.residual().abs();
        while !cordic.is_done() {
            cordic.rotate_iterate();
        }
        assert!(cordic.residual().abs() < early);
        assert!(cordic.residual().abs() <= table.angles()[DEFAULT_ITERATIONS - 1] * 2.0);
    }

    #[test]
    fn test_custom_table_rotation() {
        let mut theta = [0.0; 20];
        let mut scale = [0.0; 20];
        let table = AngleTable::fill(&mut theta, &mut scale).unwrap();
        let result = EmbCordic::new(-0.25, table.len(), table).unwrap().rotate();
        assert_abs_diff_eq!(result.cos, libm::cos(-0.25), epsilon = 1e-5);
        assert_abs_diff_eq!(result.sin, libm::sin(-0.25), epsilon = 1e-5);
    }

    #[test]
    fn test_const_sin_cos() {
        const RESULT: SinCos = sin_cos(0.5, 48);
        assert_abs_diff_eq!(RESULT.cos, libm::cos(0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(RESULT.sin, libm::sin(0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_table_is_shareable_between_rotations() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AngleTable<'static>>();
    }
}
