use core::fmt::Debug;
use core::ops::{AddAssign, DivAssign, MulAssign, Neg, SubAssign};
use num_complex::Complex;
use num_traits::{Float, FromPrimitive, Num, NumAssign, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, `Complex<f32>`, `Complex<f64>`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point elements.
///
/// Required where an ordered, purely real value is the answer: magnitudes,
/// norms, quality measures, singular values. Implies `LinalgScalar<Real = Self>`
/// since real floats are their own real type.
pub trait RealScalar: Scalar + Float + FromPrimitive + NumAssign + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + FromPrimitive + NumAssign + LinalgScalar<Real = T>> RealScalar for T {}

/// Trait for matrix elements the decompositions operate on.
///
/// Covers both real floats (`f32`, `f64`) and complex numbers (`Complex<f32>`,
/// `Complex<f64>`). One generic code path then serves both arithmetics: the
/// pivot searches compare `mag_sq`, the factor updates use `conj`, and real
/// results (quality, norms) come back as the associated [`RealScalar`] type.
///
/// Method names carry an `l` prefix where a `Float` inherent method of the same
/// name exists, so `T: LinalgScalar + Float` bounds stay unambiguous.
pub trait LinalgScalar:
    Scalar + Neg<Output = Self> + AddAssign + SubAssign + MulAssign + DivAssign
{
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: RealScalar;

    /// Magnitude: `|z| = sqrt(re² + im²)` for complex, `.abs()` for real.
    fn mag(self) -> Self::Real;

    /// Squared magnitude, no square root. Pivot selection and singularity
    /// tests compare these directly.
    fn mag_sq(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn real(self) -> Self::Real;

    /// Square root.
    fn lsqrt(self) -> Self;

    /// Machine epsilon of the underlying real type.
    fn lepsilon() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;
}

/// Concrete impls for real floats — trivial delegation.
macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn mag(self) -> $t { Float::abs(self) }
                #[inline] fn mag_sq(self) -> $t { self * self }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn real(self) -> $t { self }
                #[inline] fn lsqrt(self) -> $t { Float::sqrt(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn from_real(r: $t) -> $t { r }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

impl<T: RealScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn mag(self) -> T {
        self.norm()
    }

    #[inline]
    fn mag_sq(self) -> T {
        self.norm_sqr()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn real(self) -> T {
        self.re
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }
}
