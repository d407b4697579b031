//! Signed (two's-complement) fixed-point numbers.

use core::fmt;
use core::ops::{Add, Neg, Shl, Shr, Sub};

use super::{mask, pow2};
use crate::error::{Error, ValueError};

/// Signed fixed-point number: `WL` bits of two's complement with `IWL`
/// integral bits, one sign bit and `WL - IWL - 1` fractional bits.
///
/// The raw value is stored sign-extended in an `i64`, so ordering and
/// equality compare values directly. `+` and `-` stay in the format and wrap
/// modulo `2^WL`, matching the hardware accumulator they model.
///
/// # Example
///
/// ```rust
/// use nco_core::Fixed;
///
/// // Q1.22: the engine's amplitude format.
/// let x = Fixed::<24, 1>::from_float(-0.75).unwrap();
/// assert_eq!(x.as_float(), -0.75);
/// assert_eq!(x.to_bits(), -(3 << 20));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed<const WL: u32, const IWL: u32> {
    bits: i64,
}

impl<const WL: u32, const IWL: u32> Fixed<WL, IWL> {
    const FORMAT_OK: () = assert!(
        WL <= u64::BITS && IWL < WL,
        "Fixed<WL, IWL> requires IWL < WL <= 64"
    );

    /// Total bits, sign included.
    pub const WORD_BITS: u32 = WL;
    /// Bits left of the binary point, sign excluded.
    pub const INTEGRAL_BITS: u32 = IWL;
    /// Bits right of the binary point.
    pub const FRACTIONAL_BITS: u32 = WL - IWL - 1;

    const SCALE: f64 = pow2(WL - IWL - 1);
    /// Magnitude of the most negative scaled value.
    const LIMIT: f64 = pow2(WL - 1);

    /// Zero.
    pub const ZERO: Self = Self { bits: 0 };
    /// Most positive value.
    pub const MAX: Self = Self {
        bits: mask(WL - 1) as i64,
    };
    /// Most negative value.
    pub const MIN: Self = Self {
        bits: !(mask(WL - 1) as i64),
    };

    /// Reinterpret the low `WL` bits of `raw`, sign-extending from bit
    /// `WL - 1`.
    #[inline]
    pub const fn from_bits(raw: i64) -> Self {
        let () = Self::FORMAT_OK;
        let shift = u64::BITS - WL;
        Self {
            bits: (raw << shift) >> shift,
        }
    }

    /// Raw two's-complement value, sign-extended to 64 bits.
    #[inline]
    pub const fn to_bits(self) -> i64 {
        self.bits
    }

    /// Convert from a float, rounding to the nearest representable value.
    ///
    /// The accepted range is symmetric: `|value|` must round below
    /// `2^IWL`, so the most negative bit pattern is only reachable through
    /// [`from_bits`](Self::from_bits).
    pub fn from_float(value: f64) -> Result<Self, Error> {
        let () = Self::FORMAT_OK;
        if !value.is_finite() {
            return Err(ValueError::NotFinite.into());
        }
        let scaled = libm::round(value * Self::SCALE);
        if libm::fabs(scaled) >= Self::LIMIT {
            return Err(ValueError::OutOfRange {
                value,
                integral_bits: IWL,
            }
            .into());
        }
        Ok(Self {
            bits: scaled as i64,
        })
    }

    /// Convert from a float, clamping into `[-MAX, MAX]`. NaN becomes zero.
    pub fn saturating_from_float(value: f64) -> Self {
        let () = Self::FORMAT_OK;
        if value.is_nan() {
            return Self::ZERO;
        }
        let top = Self::MAX.bits as f64;
        let scaled = libm::round(value * Self::SCALE).clamp(-top, top);
        Self {
            bits: scaled as i64,
        }
    }

    /// Compose a value from a signed integral field and a raw fractional
    /// field: the result is `integral + fractional / 2^FRACTIONAL_BITS`.
    ///
    /// `integral` must fit in `IWL + 1` two's-complement bits.
    pub fn from_int(integral: i64, fractional: u64) -> Result<Self, Error> {
        let () = Self::FORMAT_OK;
        let half_range = 1i128 << IWL;
        if !(-half_range..half_range).contains(&i128::from(integral)) {
            return Err(ValueError::FieldOverflow {
                field: "integral",
                value: integral as u64,
                bits: IWL + 1,
            }
            .into());
        }
        if fractional > mask(Self::FRACTIONAL_BITS) {
            return Err(ValueError::FieldOverflow {
                field: "fractional",
                value: fractional,
                bits: Self::FRACTIONAL_BITS,
            }
            .into());
        }
        Ok(Self::from_bits(
            (integral << Self::FRACTIONAL_BITS) | fractional as i64,
        ))
    }

    /// Value as a float. Exact while `WL <= 53`.
    #[inline]
    pub fn as_float(self) -> f64 {
        self.bits as f64 / Self::SCALE
    }

    /// The integral field, i.e. the value rounded toward negative infinity.
    #[inline]
    pub const fn integral_part(self) -> i64 {
        self.bits >> Self::FRACTIONAL_BITS
    }

    /// The fractional bit field as a raw pattern.
    #[inline]
    pub const fn fractional_part(self) -> u64 {
        self.bits as u64 & mask(Self::FRACTIONAL_BITS)
    }

    /// True when the value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.bits == 0
    }

    /// True when the sign bit is set.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.bits < 0
    }

    /// Reinterpret as another signed format: realign the binary point, then
    /// keep the low `OWL` bits and sign-extend. Like
    /// [`Ufixed::cast`](super::Ufixed::cast) this truncates and wraps
    /// silently.
    #[inline]
    pub fn cast<const OWL: u32, const OIWL: u32>(self) -> Fixed<OWL, OIWL> {
        let from = Self::FRACTIONAL_BITS;
        let to = Fixed::<OWL, OIWL>::FRACTIONAL_BITS;
        let bits = if to >= from {
            self.bits << (to - from)
        } else {
            self.bits >> (from - to)
        };
        Fixed::from_bits(bits)
    }
}

impl<const WL: u32, const IWL: u32> Add for Fixed<WL, IWL> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_bits(self.bits.wrapping_add(rhs.bits))
    }
}

impl<const WL: u32, const IWL: u32> Sub for Fixed<WL, IWL> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_bits(self.bits.wrapping_sub(rhs.bits))
    }
}

impl<const WL: u32, const IWL: u32> Neg for Fixed<WL, IWL> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_bits(self.bits.wrapping_neg())
    }
}

impl<const WL: u32, const IWL: u32> Shl<u32> for Fixed<WL, IWL> {
    type Output = Self;

    #[inline]
    fn shl(self, rhs: u32) -> Self {
        if rhs >= i64::BITS {
            Self::ZERO
        } else {
            Self::from_bits(self.bits << rhs)
        }
    }
}

impl<const WL: u32, const IWL: u32> Shr<u32> for Fixed<WL, IWL> {
    type Output = Self;

    /// Arithmetic shift; the sign is kept.
    #[inline]
    fn shr(self, rhs: u32) -> Self {
        Self::from_bits(self.bits >> rhs.min(i64::BITS - 1))
    }
}

impl<const WL: u32, const IWL: u32> fmt::Display for Fixed<WL, IWL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_float(), f)
    }
}

impl<const WL: u32, const IWL: u32> fmt::Debug for Fixed<WL, IWL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fixed<{}, {}>({:#x} = {})",
            WL,
            IWL,
            self.bits as u64 & mask(WL),
            self.as_float()
        )
    }
}
