/* embcordic | table.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/******************************************************************************/

use crate::common::{Error, MAX_ITERATIONS};

include!(concat!(env!("OUT_DIR"), "/cordic_tables.rs"));

const _: () = assert!(THETA_TABLE.len() == MAX_ITERATIONS);
const _: () = assert!(SCALE_TABLE.len() == MAX_ITERATIONS);

/******************************************************************************/

/// Elementary rotation angles with the matching gain corrections
///
/// Entry `i` of the angle table is `atan(2⁻ⁱ)`: the angles are all positive,
/// strictly decreasing from π/4, and approach `2⁻ⁱ` for large `i`. The scale
/// table holds the reciprocal magnitude gain accumulated after each
/// micro-rotation, so that results can be corrected for any iteration count.
///
/// A table is a pair of shared slices: it is cheap to copy and safe to read
/// from concurrent rotations, as it is never mutated once built.
#[derive(Clone, Copy, Debug)]
pub struct AngleTable<'a> {
    theta: &'a [f64],
    scale: &'a [f64]
}

impl AngleTable<'static> {
    /// Returns the built-in table computed at build time
    ///
    /// It holds [`MAX_ITERATIONS`] entries, enough to saturate an `f64`
    /// mantissa; use [`AngleTable::fill()`] when a different length or
    /// custom storage is required.
    pub const fn builtin() -> Self {
        Self { theta: &THETA_TABLE, scale: &SCALE_TABLE }
    }
}

impl<'a> AngleTable<'a> {
    /// Fills caller-provided storage with a freshly computed table
    ///
    /// The table length is the buffer length; both buffers must be non-empty
    /// and equal in length. For example:
    /// ```
    /// let mut theta = [0.0; 20];
    /// let mut scale = [0.0; 20];
    /// let table = embcordic::AngleTable::fill(&mut theta, &mut scale).unwrap();
    /// assert_eq!(table.len(), 20);
    /// ```
    pub fn fill(theta: &'a mut [f64], scale: &'a mut [f64]) -> Result<Self, Error> {
        if theta.is_empty() || theta.len() != scale.len() {
            return Err(Error::InvalidTable);
        }

        let mut p2i = 1.0;
        let mut k = 1.0;
        for (t, s) in core::iter::zip(theta.iter_mut(), scale.iter_mut()) {
            *t = libm::atan(p2i);
            k /= libm::sqrt(1.0 + p2i * p2i);
            *s = k;
            p2i /= 2.0;
        }

        Ok(Self { theta, scale })
    }

    /// Number of entries in the table
    pub const fn len(&self) -> usize {
        self.theta.len()
    }

    /// Checks whether the table is empty
    pub const fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    /// The elementary rotation angles
    pub const fn angles(&self) -> &'a [f64] {
        self.theta
    }

    /// Reciprocal rotation gain after `iterations` micro-rotations
    ///
    /// Multiplying the raw vector components by this factor removes the
    /// magnitude growth accumulated by the micro-rotations; it converges to
    /// ≈ 0.60725 as the iteration count grows. `scale(0)` is 1.
    pub fn scale(&self, iterations: usize) -> f64 {
        if iterations == 0 { 1.0 } else { self.scale[iterations - 1] }
    }

    /// Largest angle magnitude reachable with `iterations` micro-rotations
    ///
    /// Convergence is only guaranteed for target angles within
    /// ±`max_angle(iterations)`; the bound approaches ≈ 1.7433 rad as the
    /// iteration count grows.
    pub fn max_angle(&self, iterations: usize) -> f64 {
        self.theta[..iterations].iter().sum()
    }
}

/******************************************************************************/
