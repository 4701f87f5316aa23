//! Common fixed-point format type aliases.
//!
//! The naming convention is `FixedI_F` where I is the number of integer bits
//! (sign included) and F is the number of fractional bits. Each alias pairs
//! its storage with the next wider integer for intermediates.

use crate::Fixed;

/// Any scale over `i8` storage.
pub type FixedI8<const F: u32> = Fixed<i8, i16, F>;

/// Any scale over `i16` storage.
pub type FixedI16<const F: u32> = Fixed<i16, i32, F>;

/// Any scale over `i32` storage.
pub type FixedI32<const F: u32> = Fixed<i32, i64, F>;

/// Any scale over `i64` storage.
pub type FixedI64<const F: u32> = Fixed<i64, i128, F>;

/// 4.4 fixed-point format.
///
/// Range: [-8.0, 7.9375]
/// Precision: 0.0625
pub type Fixed4_4 = FixedI8<4>;

/// 8.8 fixed-point format.
///
/// Range: [-128.0, 127.99609375]
/// Precision: ~0.00390625
pub type Fixed8_8 = FixedI16<8>;

/// 12.4 fixed-point format.
///
/// Range: [-2048.0, 2047.9375]
/// Precision: 0.0625
pub type Fixed12_4 = FixedI16<4>;

/// 4.12 fixed-point format.
///
/// Range: [-8.0, 7.999755859]
/// Precision: ~0.000244141
pub type Fixed4_12 = FixedI16<12>;

/// 16.16 fixed-point format.
///
/// Range: [-32768.0, 32767.999984741]
/// Precision: ~0.000015259
pub type Fixed16_16 = FixedI32<16>;

/// 24.8 fixed-point format.
///
/// Range: [-8388608.0, 8388607.99609375]
/// Precision: ~0.00390625
pub type Fixed24_8 = FixedI32<8>;

/// 32.32 fixed-point format.
///
/// Range: [-2147483648.0, 2147483647.999999999]
/// Precision: ~2.3e-10
pub type Fixed32_32 = FixedI64<32>;
