#[cfg(feature = "std")]
use thiserror::Error;

/// Errors for fixed-point operations
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedPointError {
    /// Result is above the largest value of the storage type.
    #[cfg_attr(
        feature = "std",
        error("Overflow in arithmetic with fixed point type {bits}-bit/{scale}")
    )]
    Overflow { bits: u32, scale: u32 },

    /// Result is below the smallest value of the storage type.
    #[cfg_attr(
        feature = "std",
        error("Underflow in arithmetic with fixed point type {bits}-bit/{scale}")
    )]
    Underflow { bits: u32, scale: u32 },

    #[cfg_attr(feature = "std", error("Division by zero"))]
    DivisionByZero,

    /// Operands of a run-time format disagree on storage or wide width.
    #[cfg_attr(
        feature = "std",
        error(
            "Width mismatch: expected {expected_storage}/{expected_wide} bits, found {found_storage}/{found_wide} bits"
        )
    )]
    TypeMismatch {
        expected_storage: u32,
        expected_wide: u32,
        found_storage: u32,
        found_wide: u32,
    },

    #[cfg_attr(
        feature = "std",
        error(
            "Invalid format: wide {wide_bits} bits must exceed storage {storage_bits} bits (at most 64), scale {scale} must be below storage width"
        )
    )]
    Configuration {
        storage_bits: u32,
        wide_bits: u32,
        scale: u32,
    },

    #[cfg_attr(feature = "std", error("Value is not a number"))]
    NotANumber,
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for FixedPointError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FixedPointError::Overflow { bits, scale } => write!(
                f,
                "Overflow in arithmetic with fixed point type {}-bit/{}",
                bits, scale
            ),
            FixedPointError::Underflow { bits, scale } => write!(
                f,
                "Underflow in arithmetic with fixed point type {}-bit/{}",
                bits, scale
            ),
            FixedPointError::DivisionByZero => write!(f, "Division by zero"),
            FixedPointError::TypeMismatch {
                expected_storage,
                expected_wide,
                found_storage,
                found_wide,
            } => write!(
                f,
                "Width mismatch: expected {}/{} bits, found {}/{} bits",
                expected_storage, expected_wide, found_storage, found_wide
            ),
            FixedPointError::Configuration {
                storage_bits,
                wide_bits,
                scale,
            } => write!(
                f,
                "Invalid format: wide {} bits must exceed storage {} bits (at most 64), scale {} must be below storage width",
                wide_bits, storage_bits, scale
            ),
            FixedPointError::NotANumber => write!(f, "Value is not a number"),
        }
    }
}

pub type Result<T> = core::result::Result<T, FixedPointError>;
