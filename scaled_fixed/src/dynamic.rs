//! Fixed-point values whose format is chosen at run time.
//!
//! [`DynFixed`] follows exactly the arithmetic of [`Fixed`], but the storage
//! width, wide width and scale travel with the value. Width checks that the
//! compiler performs for `Fixed` become [`FixedPointError::TypeMismatch`] and
//! [`FixedPointError::Configuration`] errors here.

use crate::arith::Limits;
use crate::error::{FixedPointError, Result};
use crate::fixed::Fixed;
use crate::int::{Storage, WideInt, Width};

/// Storage width, wide width and scale of a [`DynFixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    storage: Width,
    wide: Width,
    scale: u32,
}

impl Format {
    /// Validates a format.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` unless `wide` is strictly wider than
    /// `storage`, `storage` is at most 64 bits and `scale` is smaller than
    /// the storage width.
    ///
    /// ```
    /// use scaled_fixed::{Format, Width};
    ///
    /// assert!(Format::new(Width::W16, Width::W32, 4).is_ok());
    /// assert!(Format::new(Width::W16, Width::W16, 4).is_err());
    /// ```
    pub fn new(storage: Width, wide: Width, scale: u32) -> Result<Self> {
        if wide <= storage || storage == Width::W128 || scale >= storage.bits() {
            return Err(FixedPointError::Configuration {
                storage_bits: storage.bits(),
                wide_bits: wide.bits(),
                scale,
            });
        }
        Ok(Self {
            storage,
            wide,
            scale,
        })
    }

    /// Width of the stored integer.
    pub fn storage(&self) -> Width {
        self.storage
    }

    /// Width used for intermediates.
    pub fn wide(&self) -> Width {
        self.wide
    }

    /// Number of fractional bits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Same widths, different scale.
    pub fn with_scale(&self, scale: u32) -> Result<Self> {
        Self::new(self.storage, self.wide, scale)
    }

    fn same_widths(&self, other: &Format) -> Result<()> {
        if self.storage == other.storage && self.wide == other.wide {
            Ok(())
        } else {
            Err(FixedPointError::TypeMismatch {
                expected_storage: self.storage.bits(),
                expected_wide: self.wide.bits(),
                found_storage: other.storage.bits(),
                found_wide: other.wide.bits(),
            })
        }
    }

    fn limits(&self) -> Limits<i128> {
        Limits {
            min: self.storage.min_value(),
            max: self.storage.max_value(),
            bits: self.storage.bits(),
            scale: self.scale,
        }
    }
}

/// A fixed-point number with a run-time [`Format`].
///
/// # Examples
///
/// ```
/// use scaled_fixed::{DynFixed, Format, Width};
///
/// let q4 = Format::new(Width::W16, Width::W32, 4)?;
/// let q2 = q4.with_scale(2)?;
///
/// let mut g = DynFixed::from_f64(7.125, q4)?;
/// g.div_assign(DynFixed::from_f64(10.25, q2)?)?;
/// assert_eq!(g.scaled_int(), 11);
///
/// let other = Format::new(Width::W32, Width::W64, 4)?;
/// assert!(g.add(DynFixed::from_f64(1.0, other)?).is_err());
/// # Ok::<(), scaled_fixed::FixedPointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DynFixed {
    raw: i64,
    format: Format,
}

impl DynFixed {
    fn from_wide(value: i128, format: Format) -> Result<Self> {
        match i64::try_from(value) {
            Ok(raw) => Ok(Self { raw, format }),
            Err(_) => Err(format.limits().overflow()),
        }
    }

    /// Rounds `num * 2^scale` half away from zero. Same rules as [`Fixed::from_f64`].
    pub fn from_f64(num: f64, format: Format) -> Result<Self> {
        Self::from_wide(format.limits().from_f64(num)?, format)
    }

    /// Wraps an already scaled integer, checking it against the storage width.
    pub fn from_raw(raw: i64, format: Format) -> Result<Self> {
        Self::from_wide(format.limits().check(raw as i128)?, format)
    }

    /// Zero in `format`.
    pub fn zero(format: Format) -> Self {
        Self { raw: 0, format }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the raw scaled integer, sign-extended to `i64`.
    pub fn scaled_int(&self) -> i64 {
        self.raw
    }

    /// Converts to an f64. Exact unless the stored integer needs more than 53 bits.
    pub fn to_f64(&self) -> f64 {
        self.format.limits().to_f64(self.raw as i128)
    }

    /// Converts to another scale of the same widths, truncating toward zero
    /// when the new scale is coarser.
    pub fn to_scale(self, scale: u32) -> Result<Self> {
        let format = self.format.with_scale(scale)?;
        let limits = format.limits();
        let raw = limits.rescale(self.raw as i128, self.format.scale)?;
        Self::from_wide(limits.check(raw)?, format)
    }

    /// Checks widths and brings `rhs` to this value's scale.
    fn operand(&self, rhs: &DynFixed) -> Result<(Limits<i128>, i128)> {
        self.format.same_widths(&rhs.format)?;
        let limits = self.format.limits();
        let rhs = limits.rescale(rhs.raw as i128, rhs.format.scale)?;
        Ok((limits, rhs))
    }

    /// Adds `rhs`, rescaled to this value's scale.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` when the widths of the two formats differ, and
    /// `Overflow`/`Underflow` when the sum leaves the storage range.
    pub fn add(self, rhs: DynFixed) -> Result<Self> {
        let (limits, rhs) = self.operand(&rhs)?;
        Self::from_wide(limits.add(self.raw as i128, rhs)?, self.format)
    }

    /// Subtracts `rhs`. Fails like [`DynFixed::add`].
    pub fn sub(self, rhs: DynFixed) -> Result<Self> {
        let (limits, rhs) = self.operand(&rhs)?;
        Self::from_wide(limits.sub(self.raw as i128, rhs)?, self.format)
    }

    /// Multiplies, truncating the dropped fraction bits toward zero.
    pub fn mul(self, rhs: DynFixed) -> Result<Self> {
        let (limits, rhs) = self.operand(&rhs)?;
        Self::from_wide(limits.mul(self.raw as i128, rhs)?, self.format)
    }

    /// Divides, truncating toward zero. `DivisionByZero` when `rhs` rescales to zero.
    pub fn div(self, rhs: DynFixed) -> Result<Self> {
        let (limits, rhs) = self.operand(&rhs)?;
        Self::from_wide(limits.div(self.raw as i128, rhs)?, self.format)
    }

    /// Returns `-self`; the storage minimum overflows.
    pub fn negate(self) -> Result<Self> {
        Self::from_wide(self.format.limits().neg(self.raw as i128)?, self.format)
    }

    /// Multiplies the stored integer by `2^shift`.
    pub fn shl(self, shift: u32) -> Result<Self> {
        Self::from_wide(self.format.limits().shl(self.raw as i128, shift)?, self.format)
    }

    /// Divides the stored integer by `2^shift`, truncating toward zero.
    pub fn shr(self, shift: u32) -> Result<Self> {
        Self::from_wide(self.format.limits().shr(self.raw as i128, shift)?, self.format)
    }

    /// In-place [`DynFixed::add`]; `self` is unchanged on error.
    pub fn add_assign(&mut self, rhs: DynFixed) -> Result<()> {
        *self = self.add(rhs)?;
        Ok(())
    }

    /// In-place [`DynFixed::sub`]; `self` is unchanged on error.
    pub fn sub_assign(&mut self, rhs: DynFixed) -> Result<()> {
        *self = self.sub(rhs)?;
        Ok(())
    }

    /// In-place [`DynFixed::mul`]; `self` is unchanged on error.
    pub fn mul_assign(&mut self, rhs: DynFixed) -> Result<()> {
        *self = self.mul(rhs)?;
        Ok(())
    }

    /// In-place [`DynFixed::div`]; `self` is unchanged on error.
    pub fn div_assign(&mut self, rhs: DynFixed) -> Result<()> {
        *self = self.div(rhs)?;
        Ok(())
    }

    /// In-place [`DynFixed::negate`]; `self` is unchanged on error.
    pub fn negate_in_place(&mut self) -> Result<()> {
        *self = self.negate()?;
        Ok(())
    }

    /// In-place [`DynFixed::shl`]; `self` is unchanged on error.
    pub fn shl_assign(&mut self, shift: u32) -> Result<()> {
        *self = self.shl(shift)?;
        Ok(())
    }

    /// In-place [`DynFixed::shr`]; `self` is unchanged on error.
    pub fn shr_assign(&mut self, shift: u32) -> Result<()> {
        *self = self.shr(shift)?;
        Ok(())
    }
}

impl<S, W, const F: u32> From<Fixed<S, W, F>> for DynFixed
where
    S: Storage,
    W: WideInt + From<S>,
{
    fn from(value: Fixed<S, W, F>) -> Self {
        // The layout of Fixed is checked at compile time, so the format is valid.
        Self {
            raw: value.scaled_int().to_i128() as i64,
            format: Format {
                storage: S::WIDTH,
                wide: W::WIDTH,
                scale: F,
            },
        }
    }
}

impl<S, W, const F: u32> TryFrom<DynFixed> for Fixed<S, W, F>
where
    S: Storage,
    W: WideInt + From<S>,
{
    type Error = FixedPointError;

    /// Fails with `TypeMismatch` when the widths differ; rescales otherwise.
    fn try_from(value: DynFixed) -> Result<Self> {
        let target = Format {
            storage: S::WIDTH,
            wide: W::WIDTH,
            scale: F,
        };
        target.same_widths(&value.format)?;
        let limits = target.limits();
        let raw = limits.check(limits.rescale(value.raw as i128, value.format.scale)?)?;
        match S::from_i128(raw) {
            Some(raw) => Ok(Fixed::from_raw(raw)),
            None => Err(limits.overflow()),
        }
    }
}
