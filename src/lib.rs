/* embcordic | lib.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* CORDIC sine / cosine computation */

/******************************************************************************/

#![no_std]
#![doc = include_str!("../README.md")]
#[warn(missing_docs)]

/******************************************************************************/

mod common;
mod rotation;
mod table;

/******************************************************************************/

pub use common::{Error, SinCos, DEFAULT_ITERATIONS, MAX_ITERATIONS};
pub use rotation::{sin_cos, EmbCordic};
pub use table::AngleTable;
