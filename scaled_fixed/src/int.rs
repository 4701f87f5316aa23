//! Integer widths usable as storage and as wide intermediates.
//!
//! Both traits are sealed: the arithmetic relies on two's-complement signed
//! primitives whose widths are powers of two, so a wide type strictly wider
//! than the storage type is always at least twice as wide.

use core::fmt::Debug;
use core::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// Bit width of a signed primitive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
    W128,
}

impl Width {
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
            Width::W128 => 128,
        }
    }

    /// Smallest value of the signed integer of this width.
    pub const fn min_value(self) -> i128 {
        match self {
            Width::W128 => i128::MIN,
            w => -(1i128 << (w.bits() - 1)),
        }
    }

    /// Largest value of the signed integer of this width.
    pub const fn max_value(self) -> i128 {
        match self {
            Width::W128 => i128::MAX,
            w => (1i128 << (w.bits() - 1)) - 1,
        }
    }
}

/// Signed integer holding the scaled value of a fixed-point number.
pub trait Storage: sealed::Sealed + Copy + Ord + Hash + Debug + Send + Sync + 'static {
    const BITS: u32;
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;
    const ONE: Self;
    const WIDTH: Width;

    fn to_i128(self) -> i128;

    /// Returns `None` when `value` is outside the range of `Self`.
    fn from_i128(value: i128) -> Option<Self>;
}

/// Signed integer used for intermediates before they are narrowed to storage.
pub trait WideInt: sealed::Sealed + Copy + Ord + Hash + Debug + Send + Sync + 'static {
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const WIDTH: Width;

    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    fn checked_div(self, rhs: Self) -> Option<Self>;
    fn checked_neg(self) -> Option<Self>;

    /// `self * 2^shift`, or `None` if any significant bit is lost.
    fn checked_shl_exact(self, shift: u32) -> Option<Self>;

    /// `self / 2^shift`, truncating toward zero.
    fn div_pow2(self, shift: u32) -> Self;

    fn is_negative(self) -> bool;
    fn to_i128(self) -> i128;
    fn to_f64(self) -> f64;

    /// Truncates toward zero, saturating at the bounds; NaN maps to zero.
    fn saturating_from_f64(value: f64) -> Self;
}

macro_rules! impl_sealed {
    ($($t:ty),*) => {
        $(impl sealed::Sealed for $t {})*
    };
}

impl_sealed!(i8, i16, i32, i64, i128);

macro_rules! impl_storage {
    ($($t:ty => $width:ident),*) => {
        $(
            impl Storage for $t {
                const BITS: u32 = <$t>::BITS;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const WIDTH: Width = Width::$width;

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_i128(value: i128) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_storage!(i8 => W8, i16 => W16, i32 => W32, i64 => W64);

macro_rules! impl_wide {
    ($($t:ty => $width:ident),*) => {
        $(
            impl WideInt for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const WIDTH: Width = Width::$width;

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_sub(self, rhs)
                }

                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_mul(self, rhs)
                }

                #[inline]
                fn checked_div(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_div(self, rhs)
                }

                #[inline]
                fn checked_neg(self) -> Option<Self> {
                    <$t>::checked_neg(self)
                }

                #[inline]
                fn checked_shl_exact(self, shift: u32) -> Option<Self> {
                    if self == 0 {
                        return Some(0);
                    }
                    if shift >= <$t>::BITS {
                        return None;
                    }
                    let shifted = self << shift;
                    // Arithmetic shift back must restore every bit, sign included.
                    (shifted >> shift == self).then_some(shifted)
                }

                #[inline]
                fn div_pow2(self, shift: u32) -> Self {
                    if shift >= <$t>::BITS {
                        0
                    } else if shift == <$t>::BITS - 1 {
                        // 2^(BITS-1) is not representable; only MIN has that magnitude.
                        if self == <$t>::MIN { -1 } else { 0 }
                    } else {
                        self / (1 << shift)
                    }
                }

                #[inline]
                fn is_negative(self) -> bool {
                    self < 0
                }

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn saturating_from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_wide!(i16 => W16, i32 => W32, i64 => W64, i128 => W128);
