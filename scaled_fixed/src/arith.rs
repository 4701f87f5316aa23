//! Checked arithmetic on scaled integers held in a wide type.
//!
//! Every function returns a value already inside the storage range described
//! by [`Limits`], so callers only narrow. Scale narrowing (rescale to a
//! coarser scale, undoing the doubled scale of a product, division, `>>`)
//! always truncates toward zero; only [`Limits::from_f64`] rounds.

use crate::error::{FixedPointError, Result};
use crate::int::WideInt;

/// Storage bounds and scale of one fixed-point format, expressed in `W`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits<W> {
    pub min: W,
    pub max: W,
    pub bits: u32,
    pub scale: u32,
}

#[inline]
fn reject<T>(err: FixedPointError) -> Result<T> {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "fixed-point operation rejected");
    Err(err)
}

/// `2^shift` as a float. Exact for every shift below 128.
#[inline]
pub(crate) fn pow2(shift: u32) -> f64 {
    (1u128 << shift) as f64
}

impl<W: WideInt> Limits<W> {
    pub fn overflow(&self) -> FixedPointError {
        FixedPointError::Overflow {
            bits: self.bits,
            scale: self.scale,
        }
    }

    pub fn underflow(&self) -> FixedPointError {
        FixedPointError::Underflow {
            bits: self.bits,
            scale: self.scale,
        }
    }

    /// Error for a result too large for even the wide type; only its sign is known.
    fn out_of_range(&self, negative: bool) -> FixedPointError {
        if negative {
            self.underflow()
        } else {
            self.overflow()
        }
    }

    /// Range check against storage.
    #[inline]
    pub fn check(&self, value: W) -> Result<W> {
        if value > self.max {
            return reject(self.overflow());
        }
        if value < self.min {
            return reject(self.underflow());
        }
        Ok(value)
    }

    /// `round(num * 2^scale)`, ties away from zero.
    pub fn from_f64(&self, num: f64) -> Result<W> {
        if num.is_nan() {
            return reject(FixedPointError::NotANumber);
        }
        let scaled = num * pow2(self.scale);
        // Truncate before rounding: the fractional part of a float is exact,
        // `scaled + 0.5` is not once `scaled` reaches 2^52.
        let truncated = W::saturating_from_f64(scaled);
        let fraction = scaled - truncated.to_f64();
        let rounded = if fraction >= 0.5 {
            truncated.checked_add(W::ONE)
        } else if fraction <= -0.5 {
            truncated.checked_sub(W::ONE)
        } else {
            Some(truncated)
        };
        // Infinities and huge inputs saturate to the wide bounds, which lie
        // outside storage and so fail the range check with the right sign.
        match rounded {
            Some(value) => self.check(value),
            None => reject(self.out_of_range(num < 0.0)),
        }
    }

    #[inline]
    pub fn to_f64(&self, raw: W) -> f64 {
        raw.to_f64() / pow2(self.scale)
    }

    /// Moves `raw` from `from_scale` to this scale. Not checked against
    /// storage: the value it combines with decides whether the result fits.
    pub fn rescale(&self, raw: W, from_scale: u32) -> Result<W> {
        if self.scale > from_scale {
            match raw.checked_shl_exact(self.scale - from_scale) {
                Some(v) => Ok(v),
                None => reject(self.out_of_range(raw.is_negative())),
            }
        } else {
            Ok(raw.div_pow2(from_scale - self.scale))
        }
    }

    pub fn add(&self, lhs: W, rhs: W) -> Result<W> {
        match lhs.checked_add(rhs) {
            Some(sum) => self.check(sum),
            None => reject(self.out_of_range(lhs.is_negative())),
        }
    }

    pub fn sub(&self, lhs: W, rhs: W) -> Result<W> {
        match lhs.checked_sub(rhs) {
            Some(diff) => self.check(diff),
            None => reject(self.out_of_range(lhs.is_negative())),
        }
    }

    pub fn mul(&self, lhs: W, rhs: W) -> Result<W> {
        match lhs.checked_mul(rhs) {
            Some(product) => self.check(product.div_pow2(self.scale)),
            None => reject(self.out_of_range(lhs.is_negative() != rhs.is_negative())),
        }
    }

    pub fn div(&self, lhs: W, rhs: W) -> Result<W> {
        if rhs == W::ZERO {
            return reject(FixedPointError::DivisionByZero);
        }
        let Some(dividend) = lhs.checked_shl_exact(self.scale) else {
            return reject(self.out_of_range(lhs.is_negative() != rhs.is_negative()));
        };
        match dividend.checked_div(rhs) {
            Some(quotient) => self.check(quotient),
            // MIN / -1
            None => reject(self.overflow()),
        }
    }

    pub fn neg(&self, value: W) -> Result<W> {
        match value.checked_neg() {
            Some(negated) => self.check(negated),
            None => reject(self.overflow()),
        }
    }

    pub fn shl(&self, value: W, shift: u32) -> Result<W> {
        match value.checked_shl_exact(shift) {
            Some(shifted) => self.check(shifted),
            None => reject(self.out_of_range(value.is_negative())),
        }
    }

    pub fn shr(&self, value: W, shift: u32) -> Result<W> {
        self.check(value.div_pow2(shift))
    }
}
