//! # scaled_fixed
//!
//! Binary fixed-point numbers with checked arithmetic.
//!
//! A value is a signed integer `raw` standing for `raw / 2^F`. The storage
//! width, a strictly wider intermediate width and the scale `F` are chosen
//! by the caller.
//!
//! ## Features
//!
//! - [`Fixed<S, W, F>`]: format fixed at compile time; invalid width/scale
//!   combinations fail to compile
//! - [`DynFixed`]: the same arithmetic with a run-time [`Format`]
//! - Operands of different scale combine directly; the right operand is
//!   rescaled to the left operand's scale
//! - Every fallible operation returns [`FixedPointError`] instead of
//!   wrapping, truncating the integer part or trapping on division by zero
//! - Zero-copy byte access through `bytemuck`
//! - `no_std` when the default `std` feature is disabled
//!
//! ## Rounding
//!
//! Conversion from floats rounds half away from zero. Every other loss of
//! fractional bits (rescaling to a coarser scale, products, quotients,
//! right shifts) truncates toward zero.
//!
//! ## Examples
//!
//! ```
//! use scaled_fixed::{Fixed12_4, FixedI16};
//!
//! let mut g = Fixed12_4::from_f32(7.125)?;
//! let f = FixedI16::<2>::from_f32(10.25)?;
//!
//! g.div_assign(f)?;
//! println!("{}", g.to_f32());
//! assert!((g.to_f32() - 0.6951).abs() < 1.0 / 16.0);
//!
//! // Overflow is an error, not a wrap-around.
//! assert!(Fixed12_4::max_value().add(g).is_err());
//! # Ok::<(), scaled_fixed::FixedPointError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod arith;
pub mod dynamic;
pub mod error;
pub mod fixed;
pub mod int;
mod ops;
pub mod scalar_formats;

pub use dynamic::{DynFixed, Format};
pub use error::{FixedPointError, Result};
pub use fixed::Fixed;
pub use int::{Storage, WideInt, Width};
pub use scalar_formats::*;
