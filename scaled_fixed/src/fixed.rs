use core::marker::PhantomData;

use bytemuck::{Pod, Zeroable};

use crate::arith::Limits;
use crate::error::{FixedPointError, Result};
use crate::int::{Storage, WideInt};

/// A fixed-point number stored in `S` with `F` fractional bits.
///
/// The represented value is `raw / 2^F`. Intermediate results are computed
/// in the wider integer `W` and checked against the range of `S` before they
/// are stored, so no operation ever wraps or silently truncates the integer
/// part.
///
/// # Type Parameters
///
/// - `S`: Storage integer (`i8`, `i16`, `i32` or `i64`)
/// - `W`: Wide integer, strictly wider than `S`
/// - `F`: Number of fractional bits (must be < bits of `S`)
///
/// Both width rules are checked when the type is first used; an invalid
/// combination fails to compile. The wide type must be strictly wider:
///
/// ```compile_fail
/// use scaled_fixed::Fixed;
///
/// let _ = Fixed::<i32, i32, 4>::from_f64(1.0);
/// ```
///
/// and the scale must leave room for the sign bit:
///
/// ```compile_fail
/// use scaled_fixed::Fixed;
///
/// let _ = Fixed::<i8, i16, 8>::from_raw(1);
/// ```
///
/// # Examples
///
/// ```
/// use scaled_fixed::Fixed;
///
/// let x = Fixed::<i16, i32, 4>::from_f64(7.125)?;
/// assert_eq!(x.scaled_int(), 114);
///
/// // Operands of different scale are rescaled to the left operand's scale.
/// let y = Fixed::<i16, i32, 2>::from_f64(10.25)?;
/// let q = x.div(y)?;
/// assert!((q.to_f64() - 7.125 / 10.25).abs() < 1.0 / 16.0);
/// # Ok::<(), scaled_fixed::FixedPointError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fixed<S, W, const F: u32> {
    raw: S,
    _wide: PhantomData<W>,
}

// Safety: Fixed is a transparent wrapper around S; PhantomData is zero-sized.
// These impls do not check `S::BITS < W::BITS`: a zeroed value of an invalid
// layout can exist, but every constructor, arithmetic operation and float
// conversion evaluates `VALID_LAYOUT` and refuses to compile for it.
unsafe impl<S, W, const F: u32> Zeroable for Fixed<S, W, F>
where
    S: Storage + Zeroable,
    W: WideInt,
{
}

unsafe impl<S, W, const F: u32> Pod for Fixed<S, W, F>
where
    S: Storage + Pod,
    W: WideInt,
{
}

impl<S, W, const F: u32> Fixed<S, W, F>
where
    S: Storage,
    W: WideInt + From<S>,
{
    /// Number of fractional bits.
    pub const SCALE: u32 = F;

    const VALID_LAYOUT: () = {
        assert!(
            W::BITS > S::BITS,
            "wide type must be strictly wider than the storage type"
        );
        assert!(F < S::BITS, "scale must be smaller than the storage width");
    };

    #[inline]
    pub(crate) fn limits() -> Limits<W> {
        let () = Self::VALID_LAYOUT;
        Limits {
            min: W::from(S::MIN),
            max: W::from(S::MAX),
            bits: S::BITS,
            scale: F,
        }
    }

    #[inline]
    fn wide(self) -> W {
        W::from(self.raw)
    }

    /// Narrows a wide value that the arithmetic kernel has already range-checked.
    fn from_wide(value: W) -> Result<Self> {
        match S::from_i128(value.to_i128()) {
            Some(raw) => Ok(Self::from_raw(raw)),
            None => Err(Self::limits().overflow()),
        }
    }

    /// Creates a fixed-point number from an f64, rounding half away from zero.
    ///
    /// # Errors
    ///
    /// Returns `Overflow`/`Underflow` if the scaled value leaves the storage
    /// range, and `NotANumber` for NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaled_fixed::Fixed;
    ///
    /// let x = Fixed::<i16, i32, 2>::from_f64(10.25)?;
    /// assert_eq!(x.scaled_int(), 41);
    ///
    /// // Out of range
    /// let result = Fixed::<i8, i16, 4>::from_f64(100.0);
    /// assert!(result.is_err());
    /// # Ok::<(), scaled_fixed::FixedPointError>(())
    /// ```
    pub fn from_f64(num: f64) -> Result<Self> {
        Self::from_wide(Self::limits().from_f64(num)?)
    }

    /// Creates a fixed-point number from an f32. See [`Fixed::from_f64`].
    pub fn from_f32(num: f32) -> Result<Self> {
        Self::from_f64(num as f64)
    }

    /// Creates the fixed-point number equal to the integer `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaled_fixed::Fixed;
    ///
    /// let x = Fixed::<i16, i32, 8>::from_int(-3)?;
    /// assert_eq!(x.to_f64(), -3.0);
    /// assert!(Fixed::<i16, i32, 8>::from_int(200).is_err());
    /// # Ok::<(), scaled_fixed::FixedPointError>(())
    /// ```
    pub fn from_int(value: S) -> Result<Self> {
        let limits = Self::limits();
        Self::from_wide(limits.shl(W::from(value), F)?)
    }

    /// Creates a fixed-point number from an already scaled integer.
    ///
    /// ```
    /// use scaled_fixed::Fixed;
    ///
    /// // With 8 fractional bits, raw value 256 represents 1.0
    /// let x = Fixed::<i16, i32, 8>::from_raw(256);
    /// assert_eq!(x.to_f64(), 1.0);
    /// ```
    pub const fn from_raw(raw: S) -> Self {
        let () = Self::VALID_LAYOUT;
        Self {
            raw,
            _wide: PhantomData,
        }
    }

    /// Converts a value of another scale to this one.
    ///
    /// Moving to a finer scale is exact; moving to a coarser scale drops the
    /// low bits, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns `Overflow`/`Underflow` if the rescaled value leaves the
    /// storage range.
    pub fn from_fixed<const G: u32>(other: Fixed<S, W, G>) -> Result<Self> {
        let limits = Self::limits();
        let raw = limits.rescale(other.wide(), G)?;
        Self::from_wide(limits.check(raw)?)
    }

    /// Converts this value to scale `G`. See [`Fixed::from_fixed`].
    ///
    /// ```
    /// use scaled_fixed::Fixed;
    ///
    /// let x = Fixed::<i16, i32, 4>::from_f64(1.5)?;
    /// let y = x.to_scale::<8>()?;
    /// assert_eq!(y.scaled_int(), 384);
    /// assert_eq!(y.to_scale::<4>()?, x);
    /// # Ok::<(), scaled_fixed::FixedPointError>(())
    /// ```
    pub fn to_scale<const G: u32>(self) -> Result<Fixed<S, W, G>> {
        Fixed::from_fixed(self)
    }

    /// Returns the raw scaled integer.
    #[inline]
    pub const fn scaled_int(&self) -> S {
        self.raw
    }

    /// Converts the fixed-point number to an f64.
    pub fn to_f64(&self) -> f64 {
        Self::limits().to_f64(self.wide())
    }

    /// Converts the fixed-point number to an f32.
    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }

    /// Returns zero.
    pub const fn zero() -> Self {
        Self::from_raw(S::ZERO)
    }

    /// Smallest positive value, `2^-F`.
    pub const fn epsilon() -> Self {
        Self::from_raw(S::ONE)
    }

    /// Returns the maximum representable value.
    pub const fn max_value() -> Self {
        Self::from_raw(S::MAX)
    }

    /// Returns the minimum representable value.
    pub const fn min_value() -> Self {
        Self::from_raw(S::MIN)
    }
}

impl<S, W, const F: u32> Default for Fixed<S, W, F>
where
    S: Storage,
    W: WideInt + From<S>,
{
    fn default() -> Self {
        Self::zero()
    }
}

// Arithmetic operations
//
// The right operand may have any scale; it is first rescaled to `F`. The
// value-returning forms never modify `self`, the `_assign` forms store the
// result only when the whole operation succeeds.
impl<S, W, const F: u32> Fixed<S, W, F>
where
    S: Storage,
    W: WideInt + From<S>,
{
    #[inline]
    fn rescaled<const G: u32>(limits: &Limits<W>, rhs: Fixed<S, W, G>) -> Result<W> {
        limits.rescale(rhs.wide(), G)
    }

    /// Adds two fixed-point numbers.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaled_fixed::Fixed;
    ///
    /// let x = Fixed::<i16, i32, 4>::from_f64(1.5)?;
    /// let y = Fixed::<i16, i32, 8>::from_f64(0.25)?;
    /// assert_eq!(x.add(y)?.to_f64(), 1.75);
    /// assert!(Fixed::<i16, i32, 4>::max_value().add(x).is_err());
    /// # Ok::<(), scaled_fixed::FixedPointError>(())
    /// ```
    pub fn add<const G: u32>(self, rhs: Fixed<S, W, G>) -> Result<Self> {
        let limits = Self::limits();
        let rhs = Self::rescaled(&limits, rhs)?;
        Self::from_wide(limits.add(self.wide(), rhs)?)
    }

    /// Subtracts `rhs` from `self`.
    pub fn sub<const G: u32>(self, rhs: Fixed<S, W, G>) -> Result<Self> {
        let limits = Self::limits();
        let rhs = Self::rescaled(&limits, rhs)?;
        Self::from_wide(limits.sub(self.wide(), rhs)?)
    }

    /// Multiplies two fixed-point numbers. The product keeps `F` fractional
    /// bits; the dropped bits are truncated toward zero.
    ///
    /// ```
    /// use scaled_fixed::Fixed;
    ///
    /// let x = Fixed::<i16, i32, 8>::from_f64(2.0)?;
    /// let y = Fixed::<i16, i32, 8>::from_f64(3.0)?;
    /// assert_eq!(x.mul(y)?.to_f64(), 6.0);
    /// # Ok::<(), scaled_fixed::FixedPointError>(())
    /// ```
    pub fn mul<const G: u32>(self, rhs: Fixed<S, W, G>) -> Result<Self> {
        let limits = Self::limits();
        let rhs = Self::rescaled(&limits, rhs)?;
        Self::from_wide(limits.mul(self.wide(), rhs)?)
    }

    /// Divides `self` by `rhs`, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` when `rhs` is zero at this scale, which
    /// includes values finer than `2^-F` that rescale to zero.
    ///
    /// ```
    /// use scaled_fixed::{Fixed, FixedPointError};
    ///
    /// let x = Fixed::<i16, i32, 4>::from_f64(1.0)?;
    /// let tiny = Fixed::<i16, i32, 8>::from_f64(0.03125)?;
    /// assert_eq!(x.div(tiny), Err(FixedPointError::DivisionByZero));
    /// # Ok::<(), scaled_fixed::FixedPointError>(())
    /// ```
    pub fn div<const G: u32>(self, rhs: Fixed<S, W, G>) -> Result<Self> {
        let limits = Self::limits();
        let rhs = Self::rescaled(&limits, rhs)?;
        Self::from_wide(limits.div(self.wide(), rhs)?)
    }

    /// Returns `-self`.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` for [`Fixed::min_value`], whose magnitude has no
    /// positive counterpart.
    pub fn negate(self) -> Result<Self> {
        Self::from_wide(Self::limits().neg(self.wide())?)
    }

    /// Returns the absolute value. Fails like [`Fixed::negate`] on the minimum.
    pub fn abs(self) -> Result<Self> {
        if self.raw < S::ZERO {
            self.negate()
        } else {
            Ok(self)
        }
    }

    /// Multiplies the stored integer by `2^shift`.
    pub fn shl(self, shift: u32) -> Result<Self> {
        Self::from_wide(Self::limits().shl(self.wide(), shift)?)
    }

    /// Divides the stored integer by `2^shift`, truncating toward zero.
    pub fn shr(self, shift: u32) -> Result<Self> {
        Self::from_wide(Self::limits().shr(self.wide(), shift)?)
    }

    /// In-place [`Fixed::add`]; `self` is unchanged on error.
    pub fn add_assign<const G: u32>(&mut self, rhs: Fixed<S, W, G>) -> Result<()> {
        *self = self.add(rhs)?;
        Ok(())
    }

    /// In-place [`Fixed::sub`]; `self` is unchanged on error.
    pub fn sub_assign<const G: u32>(&mut self, rhs: Fixed<S, W, G>) -> Result<()> {
        *self = self.sub(rhs)?;
        Ok(())
    }

    /// In-place [`Fixed::mul`]; `self` is unchanged on error.
    pub fn mul_assign<const G: u32>(&mut self, rhs: Fixed<S, W, G>) -> Result<()> {
        *self = self.mul(rhs)?;
        Ok(())
    }

    /// In-place [`Fixed::div`]; `self` is unchanged on error.
    ///
    /// ```
    /// use scaled_fixed::Fixed;
    ///
    /// let mut g = Fixed::<i16, i32, 4>::from_f64(7.125)?;
    /// let f = Fixed::<i16, i32, 2>::from_f64(10.25)?;
    /// g.div_assign(f)?;
    /// assert_eq!(g.scaled_int(), 11);
    /// # Ok::<(), scaled_fixed::FixedPointError>(())
    /// ```
    pub fn div_assign<const G: u32>(&mut self, rhs: Fixed<S, W, G>) -> Result<()> {
        *self = self.div(rhs)?;
        Ok(())
    }

    /// In-place [`Fixed::negate`]; `self` is unchanged on error.
    pub fn negate_in_place(&mut self) -> Result<()> {
        *self = self.negate()?;
        Ok(())
    }

    /// In-place [`Fixed::shl`]; `self` is unchanged on error.
    pub fn shl_assign(&mut self, shift: u32) -> Result<()> {
        *self = self.shl(shift)?;
        Ok(())
    }

    /// In-place [`Fixed::shr`]; `self` is unchanged on error.
    pub fn shr_assign(&mut self, shift: u32) -> Result<()> {
        *self = self.shr(shift)?;
        Ok(())
    }

    fn saturate(result: Result<Self>) -> Self {
        match result {
            Ok(value) => value,
            Err(FixedPointError::Underflow { .. }) => Self::min_value(),
            Err(_) => Self::max_value(),
        }
    }

    /// Adds two fixed-point numbers, clamping to the representable range.
    pub fn saturating_add<const G: u32>(self, rhs: Fixed<S, W, G>) -> Self {
        Self::saturate(self.add(rhs))
    }

    /// Subtracts with saturation.
    pub fn saturating_sub<const G: u32>(self, rhs: Fixed<S, W, G>) -> Self {
        Self::saturate(self.sub(rhs))
    }

    /// Multiplies with saturation.
    pub fn saturating_mul<const G: u32>(self, rhs: Fixed<S, W, G>) -> Self {
        Self::saturate(self.mul(rhs))
    }
}

impl<S, W, const F: u32> TryFrom<f64> for Fixed<S, W, F>
where
    S: Storage,
    W: WideInt + From<S>,
{
    type Error = FixedPointError;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_f64(value)
    }
}

impl<S, W, const F: u32> TryFrom<f32> for Fixed<S, W, F>
where
    S: Storage,
    W: WideInt + From<S>,
{
    type Error = FixedPointError;

    fn try_from(value: f32) -> Result<Self> {
        Self::from_f32(value)
    }
}

#[cfg(feature = "half_support")]
impl<S, W, const F: u32> Fixed<S, W, F>
where
    S: Storage,
    W: WideInt + From<S>,
{
    /// Creates a fixed-point number from a half-precision float.
    pub fn from_f16(value: half::f16) -> Result<Self> {
        Self::from_f64(value.to_f64())
    }

    /// Converts to the nearest half-precision float.
    pub fn to_f16(&self) -> half::f16 {
        half::f16::from_f64(self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Q12_4 = Fixed<i16, i32, 4>;
    type Q14_2 = Fixed<i16, i32, 2>;
    type Q8_8 = Fixed<i16, i32, 8>;
    type Q4_4 = Fixed<i8, i16, 4>;

    #[test]
    fn test_from_f64_basic() {
        let x = Q12_4::from_f64(7.125).unwrap();
        assert_eq!(x.scaled_int(), 114);
        assert_eq!(x.to_f64(), 7.125);

        let y = Q14_2::from_f64(10.25).unwrap();
        assert_eq!(y.scaled_int(), 41);
    }

    #[test]
    fn test_from_f64_negative() {
        let x = Q8_8::from_f64(-5.5).unwrap();
        assert_eq!(x.scaled_int(), -1408);
        assert_eq!(x.to_f32(), -5.5);
    }

    #[test]
    fn test_overflow_boundary() {
        // 2047.9375 * 16 = 32767 = i16::MAX
        assert_eq!(Q12_4::from_f64(2047.9375).unwrap(), Q12_4::max_value());
        assert_eq!(
            Q12_4::from_f64(2048.0),
            Err(FixedPointError::Overflow { bits: 16, scale: 4 })
        );
        assert_eq!(Q12_4::from_f64(-2048.0).unwrap(), Q12_4::min_value());
        assert_eq!(
            Q12_4::from_f64(-2048.0625),
            Err(FixedPointError::Underflow { bits: 16, scale: 4 })
        );
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(Q8_8::from_f32(f32::NAN), Err(FixedPointError::NotANumber));
    }

    #[test]
    fn test_constants() {
        assert_eq!(Q8_8::zero().to_f64(), 0.0);
        assert_eq!(Q8_8::default(), Q8_8::zero());
        assert_eq!(Q8_8::epsilon().to_f64(), 1.0 / 256.0);
        assert_eq!(Q4_4::max_value().scaled_int(), i8::MAX);
        assert_eq!(Q4_4::min_value().scaled_int(), i8::MIN);
        assert_eq!(Q12_4::SCALE, 4);
    }

    #[test]
    fn test_zeroed_matches_zero() {
        let zeroed: Q8_8 = bytemuck::Zeroable::zeroed();
        assert_eq!(zeroed, Q8_8::zero());
        assert_eq!(zeroed.add(Q8_8::epsilon()).unwrap(), Q8_8::epsilon());
    }

    #[test]
    fn test_from_int() {
        assert_eq!(Q4_4::from_int(7).unwrap().scaled_int(), 112);
        assert_eq!(Q4_4::from_int(-8).unwrap(), Q4_4::min_value());
        assert_eq!(
            Q4_4::from_int(8),
            Err(FixedPointError::Overflow { bits: 8, scale: 4 })
        );
    }

    #[test]
    fn test_scale_conversion() {
        let x = Q12_4::from_f64(-1.5).unwrap();
        let finer: Q8_8 = x.to_scale().unwrap();
        assert_eq!(finer.scaled_int(), -384);
        assert_eq!(Q12_4::from_fixed(finer).unwrap(), x);

        // Coarser scale drops low bits toward zero.
        let fine = Q8_8::from_f64(-0.1).unwrap();
        assert_eq!(fine.to_scale::<2>().unwrap().scaled_int(), 0);

        // Widening the scale can leave the storage range.
        assert_eq!(
            Q12_4::from_f64(200.0).unwrap().to_scale::<8>(),
            Err(FixedPointError::Overflow { bits: 16, scale: 8 })
        );
    }

    #[test]
    fn test_add_sub_mixed_scale() {
        let x = Q12_4::from_f64(1.5).unwrap();
        let y = Q8_8::from_f64(0.25).unwrap();
        assert_eq!(x.add(y).unwrap().to_f64(), 1.75);
        assert_eq!(x.sub(y).unwrap().to_f64(), 1.25);

        // The right operand loses precision below 2^-4.
        let tiny = Q8_8::from_raw(8);
        assert_eq!(x.sub(tiny).unwrap(), x);
    }

    #[test]
    fn test_add_overflow() {
        let one = Q12_4::from_int(1).unwrap();
        assert_eq!(
            Q12_4::max_value().add(one),
            Err(FixedPointError::Overflow { bits: 16, scale: 4 })
        );
        assert_eq!(
            Q12_4::min_value().sub(one),
            Err(FixedPointError::Underflow { bits: 16, scale: 4 })
        );
    }

    #[test]
    fn test_mul() {
        let x = Q8_8::from_f64(2.0).unwrap();
        let y = Q8_8::from_f64(-3.0).unwrap();
        assert_eq!(x.mul(y).unwrap().to_f64(), -6.0);

        let big = Q8_8::from_f64(100.0).unwrap();
        assert_eq!(
            big.mul(big),
            Err(FixedPointError::Overflow { bits: 16, scale: 8 })
        );
        assert_eq!(
            big.mul(y),
            Err(FixedPointError::Underflow { bits: 16, scale: 8 })
        );
    }

    #[test]
    fn test_mul_is_sign_symmetric() {
        let a = Q8_8::from_f64(1.5).unwrap();
        let eps = Q8_8::epsilon();
        let neg_product = a.negate().unwrap().mul(eps).unwrap();
        let product = a.mul(eps).unwrap();
        assert_eq!(neg_product, product.negate().unwrap());
        assert_eq!(product.scaled_int(), 1);
    }

    #[test]
    fn test_div() {
        let g = Q12_4::from_f64(7.125).unwrap();
        let f = Q14_2::from_f64(10.25).unwrap();
        let q = g.div(f).unwrap();
        assert_eq!(q.scaled_int(), 11);
        assert!((q.to_f64() - 7.125 / 10.25).abs() < 1.0 / 16.0);

        let third = Q8_8::from_int(1)
            .unwrap()
            .div(Q8_8::from_int(3).unwrap())
            .unwrap();
        assert_eq!(third.scaled_int(), 85);
    }

    #[test]
    fn test_div_by_zero() {
        let x = Q12_4::from_f64(1.0).unwrap();
        assert_eq!(x.div(Q12_4::zero()), Err(FixedPointError::DivisionByZero));
        // 0.03125 has no representation at scale 4 and rescales to zero.
        let tiny = Q8_8::from_f64(0.03125).unwrap();
        assert_eq!(x.div(tiny), Err(FixedPointError::DivisionByZero));
    }

    #[test]
    fn test_div_overflow() {
        let x = Q12_4::from_f64(2000.0).unwrap();
        let small = Q12_4::from_f64(0.0625).unwrap();
        assert!(matches!(x.div(small), Err(FixedPointError::Overflow { .. })));
        assert!(matches!(
            x.negate().unwrap().div(small),
            Err(FixedPointError::Underflow { .. })
        ));

        let minus_one = Q12_4::from_int(-1).unwrap();
        assert!(matches!(
            Q12_4::min_value().div(minus_one),
            Err(FixedPointError::Overflow { .. })
        ));
    }

    #[test]
    fn test_negate_and_abs() {
        let x = Q8_8::from_f64(3.5).unwrap();
        assert_eq!(x.negate().unwrap().to_f64(), -3.5);
        assert_eq!(x.negate().unwrap().abs().unwrap(), x);
        assert_eq!(
            Q8_8::min_value().negate(),
            Err(FixedPointError::Overflow { bits: 16, scale: 8 })
        );
        assert!(Q8_8::min_value().abs().is_err());
        assert_eq!(Q8_8::max_value().negate().unwrap().scaled_int(), -i16::MAX);
    }

    #[test]
    fn test_shifts() {
        let one = Q12_4::from_int(1).unwrap();
        assert_eq!(one.shl(3).unwrap().to_f64(), 8.0);
        assert!(one.shl(11).is_err());
        assert_eq!(one.negate().unwrap().shl(11).unwrap(), Q12_4::min_value());
        assert_eq!(Q12_4::zero().shl(100).unwrap(), Q12_4::zero());

        let x = Q12_4::from_f64(-1.5).unwrap();
        assert_eq!(x.shr(4).unwrap().scaled_int(), -1);
        assert_eq!(x.shr(99).unwrap(), Q12_4::zero());
    }

    #[test]
    fn test_assign_forms() {
        let mut x = Q8_8::from_f64(1.0).unwrap();
        x.add_assign(Q12_4::from_f64(0.5).unwrap()).unwrap();
        assert_eq!(x.to_f64(), 1.5);
        x.mul_assign(Q8_8::from_f64(2.0).unwrap()).unwrap();
        assert_eq!(x.to_f64(), 3.0);
        x.sub_assign(Q8_8::from_f64(0.5).unwrap()).unwrap();
        assert_eq!(x.to_f64(), 2.5);
        x.div_assign(Q8_8::from_f64(0.5).unwrap()).unwrap();
        assert_eq!(x.to_f64(), 5.0);
        x.negate_in_place().unwrap();
        assert_eq!(x.to_f64(), -5.0);
        x.shl_assign(1).unwrap();
        assert_eq!(x.to_f64(), -10.0);
        x.shr_assign(2).unwrap();
        assert_eq!(x.to_f64(), -2.5);
    }

    #[test]
    fn test_assign_failure_leaves_value_unchanged() {
        let mut x = Q12_4::max_value();
        assert!(x.add_assign(Q12_4::epsilon()).is_err());
        assert_eq!(x, Q12_4::max_value());

        assert!(x.div_assign(Q12_4::zero()).is_err());
        assert!(x.shl_assign(1).is_err());
        assert_eq!(x, Q12_4::max_value());

        let mut m = Q12_4::min_value();
        assert!(m.negate_in_place().is_err());
        assert_eq!(m, Q12_4::min_value());
    }

    #[test]
    fn test_saturating() {
        let one = Q4_4::from_int(1).unwrap();
        assert_eq!(Q4_4::max_value().saturating_add(one), Q4_4::max_value());
        assert_eq!(Q4_4::min_value().saturating_sub(one), Q4_4::min_value());
        let four = Q4_4::from_int(4).unwrap();
        assert_eq!(four.saturating_mul(four), Q4_4::max_value());
        assert_eq!(
            four.saturating_mul(four.negate().unwrap()),
            Q4_4::min_value()
        );
        assert_eq!(one.saturating_add(one).to_f64(), 2.0);
    }

    #[test]
    fn test_sqrt_difference_in_eight_bits() {
        let a = Q4_4::from_f64(2f64.sqrt()).unwrap();
        let b = Q4_4::from_f64(3f64.sqrt()).unwrap();
        let diff = a.sub(b).unwrap();
        assert_eq!(diff.scaled_int(), -5);
        assert!((diff.to_f64() - (2f64.sqrt() - 3f64.sqrt())).abs() < 1.0 / 16.0);
    }

    #[test]
    fn test_wide_storage() {
        type Q32_32 = Fixed<i64, i128, 32>;
        let x = Q32_32::from_f64(1234.5).unwrap();
        let y = Q32_32::from_f64(-0.25).unwrap();
        assert_eq!(x.mul(y).unwrap().to_f64(), -308.625);
        assert!(Q32_32::from_f64(3e9).is_err());
    }

    #[cfg(feature = "half_support")]
    #[test]
    fn test_f16_roundtrip() {
        let x = Q8_8::from_f16(half::f16::from_f32(1.5)).unwrap();
        assert_eq!(x.scaled_int(), 384);
        assert_eq!(x.to_f16().to_f32(), 1.5);
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_within_half_ulp(value in -2047.0f64..2047.0f64) {
                let fixed = Q12_4::from_f64(value).unwrap();
                prop_assert!((fixed.to_f64() - value).abs() <= 1.0 / 32.0);
            }

            #[test]
            fn test_add_commutative(a in any::<i16>(), b in any::<i16>()) {
                let x = Q8_8::from_raw(a);
                let y = Q8_8::from_raw(b);
                prop_assert_eq!(x.add(y), y.add(x));
            }

            #[test]
            fn test_mul_commutative(a in any::<i16>(), b in any::<i16>()) {
                let x = Q8_8::from_raw(a);
                let y = Q8_8::from_raw(b);
                prop_assert_eq!(x.mul(y), y.mul(x));
            }

            #[test]
            fn test_additive_identity(a in any::<i16>()) {
                let x = Q12_4::from_raw(a);
                prop_assert_eq!(x.add(Q12_4::from_f64(0.0).unwrap()), Ok(x));
            }
        }
    }
}
