//! Operator overloads.
//!
//! Every operator returns `Result<Self, FixedPointError>` so failures are
//! reported the same way as through the named methods. Compound assignment
//! (`+=` and friends) is only available as methods such as
//! [`Fixed::add_assign`], because `core::ops::AddAssign` cannot fail.
//!
//! ```
//! use scaled_fixed::Fixed;
//!
//! type Q12_4 = Fixed<i16, i32, 4>;
//! type Q14_2 = Fixed<i16, i32, 2>;
//!
//! let a = Q12_4::from_f64(1.5)?;
//! let b = Q14_2::from_f64(0.75)?;
//! let c = ((a + b)? * a)?;
//! assert_eq!(c.to_f64(), 3.375);
//! assert_eq!((-c)?.to_f64(), -3.375);
//! assert_eq!((a << 2)?.to_f64(), 6.0);
//! # Ok::<(), scaled_fixed::FixedPointError>(())
//! ```

use core::ops::{Add, Div, Mul, Neg, Shl, Shr, Sub};

use crate::dynamic::DynFixed;
use crate::error::Result;
use crate::fixed::Fixed;
use crate::int::{Storage, WideInt};

macro_rules! impl_binary_op {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl<S, W, const F: u32, const G: u32> $trait<Fixed<S, W, G>> for Fixed<S, W, F>
            where
                S: Storage,
                W: WideInt + From<S>,
            {
                type Output = Result<Self>;

                #[inline]
                fn $method(self, rhs: Fixed<S, W, G>) -> Result<Self> {
                    Fixed::<S, W, F>::$method::<G>(self, rhs)
                }
            }

            impl $trait for DynFixed {
                type Output = Result<Self>;

                #[inline]
                fn $method(self, rhs: DynFixed) -> Result<Self> {
                    DynFixed::$method(self, rhs)
                }
            }
        )*
    };
}

impl_binary_op!(Add::add, Sub::sub, Mul::mul, Div::div);

macro_rules! impl_shift_op {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl<S, W, const F: u32> $trait<u32> for Fixed<S, W, F>
            where
                S: Storage,
                W: WideInt + From<S>,
            {
                type Output = Result<Self>;

                #[inline]
                fn $method(self, shift: u32) -> Result<Self> {
                    Fixed::<S, W, F>::$method(self, shift)
                }
            }

            impl $trait<u32> for DynFixed {
                type Output = Result<Self>;

                #[inline]
                fn $method(self, shift: u32) -> Result<Self> {
                    DynFixed::$method(self, shift)
                }
            }
        )*
    };
}

impl_shift_op!(Shl::shl, Shr::shr);

impl<S, W, const F: u32> Neg for Fixed<S, W, F>
where
    S: Storage,
    W: WideInt + From<S>,
{
    type Output = Result<Self>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for DynFixed {
    type Output = Result<Self>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
