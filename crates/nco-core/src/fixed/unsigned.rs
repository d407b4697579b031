//! Unsigned fixed-point numbers.

use core::fmt;
use core::ops::{Shl, Shr, Sub};

use super::{mask, pow2, shl_or_zero, shr_or_zero};
use crate::error::{Error, ValueError};

/// Unsigned fixed-point number with `WL` total bits and `IWL` integral bits.
///
/// The raw value is kept in the low `WL` bits of a `u64`; every constructor
/// masks, so the upper bits are always zero. Equality, ordering and hashing
/// compare raw bits, which is exact within one format.
///
/// # Example
///
/// ```rust
/// use nco_core::Ufixed;
///
/// let a = Ufixed::<8, 4>::from_float(1.5).unwrap();
/// let b = Ufixed::<8, 4>::from_float(15.5).unwrap();
///
/// // 8-bit + 8-bit grows to 9 bits: 17.0 needs five integral bits.
/// let sum: Ufixed<9, 5> = a.widening_add(b);
/// assert_eq!(sum.as_float(), 17.0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ufixed<const WL: u32, const IWL: u32> {
    bits: u64,
}

impl<const WL: u32, const IWL: u32> Ufixed<WL, IWL> {
    const FORMAT_OK: () = assert!(
        WL <= u64::BITS && IWL <= WL,
        "Ufixed<WL, IWL> requires IWL <= WL <= 64"
    );

    /// Total bits.
    pub const WORD_BITS: u32 = WL;
    /// Bits left of the binary point.
    pub const INTEGRAL_BITS: u32 = IWL;
    /// Bits right of the binary point.
    pub const FRACTIONAL_BITS: u32 = WL - IWL;

    /// Value of one unit in the last place, as a raw-to-float divisor.
    const SCALE: f64 = pow2(WL - IWL);
    /// First scaled value past the top of the range.
    const LIMIT: f64 = pow2(WL);

    /// Zero.
    pub const ZERO: Self = Self { bits: 0 };
    /// Largest representable value (all bits set).
    pub const MAX: Self = Self { bits: mask(WL) };

    /// Reinterpret `raw` as a value of this format, keeping the low `WL` bits.
    #[inline]
    pub const fn from_bits(raw: u64) -> Self {
        let () = Self::FORMAT_OK;
        Self {
            bits: raw & mask(WL),
        }
    }

    /// Raw bit pattern.
    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.bits
    }

    /// Convert from a float, rounding to the nearest representable value.
    ///
    /// Fails for NaN or infinity, for negative input, and when the rounded
    /// value does not fit in `IWL` integral bits.
    pub fn from_float(value: f64) -> Result<Self, Error> {
        let () = Self::FORMAT_OK;
        if !value.is_finite() {
            return Err(ValueError::NotFinite.into());
        }
        if value < 0.0 {
            return Err(ValueError::Negative { value }.into());
        }
        let scaled = libm::round(value * Self::SCALE);
        if scaled >= Self::LIMIT {
            return Err(ValueError::OutOfRange {
                value,
                integral_bits: IWL,
            }
            .into());
        }
        Ok(Self {
            bits: scaled as u64,
        })
    }

    /// Convert from a float, clamping into `[0, MAX]`. NaN becomes zero.
    pub fn saturating_from_float(value: f64) -> Self {
        let () = Self::FORMAT_OK;
        if value.is_nan() || value <= 0.0 {
            return Self::ZERO;
        }
        let scaled = libm::round(value * Self::SCALE);
        if scaled >= Self::LIMIT {
            Self::MAX
        } else {
            Self {
                bits: scaled as u64,
            }
        }
    }

    /// Compose a value from its integral and fractional bit fields.
    ///
    /// `fractional` is the raw pattern of the `WL - IWL` fractional bits, so
    /// `Ufixed::<8, 4>::from_int(3, 0b1000)` is 3.5.
    pub fn from_int(integral: u64, fractional: u64) -> Result<Self, Error> {
        let () = Self::FORMAT_OK;
        if integral > mask(IWL) {
            return Err(ValueError::FieldOverflow {
                field: "integral",
                value: integral,
                bits: IWL,
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
        Ok(Self {
            bits: shl_or_zero(integral, Self::FRACTIONAL_BITS) | fractional,
        })
    }

    /// Value as a float. Exact while `WL <= 53`.
    #[inline]
    pub fn as_float(self) -> f64 {
        self.bits as f64 / Self::SCALE
    }

    /// The integral bit field, i.e. the value rounded toward zero.
    #[inline]
    pub const fn integral_part(self) -> u64 {
        shr_or_zero(self.bits, Self::FRACTIONAL_BITS)
    }

    /// The fractional bit field as a raw pattern.
    #[inline]
    pub const fn fractional_part(self) -> u64 {
        self.bits & mask(Self::FRACTIONAL_BITS)
    }

    /// True when every bit is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.bits == 0
    }

    /// Exact sum in the grown format `Ufixed<WL + 1, IWL + 1>`.
    ///
    /// The output format is a type parameter because it cannot be spelled
    /// generically; any other choice is a compile error.
    #[inline]
    pub fn widening_add<const OWL: u32, const OIWL: u32>(self, rhs: Self) -> Ufixed<OWL, OIWL> {
        const {
            assert!(
                OWL == WL + 1 && OIWL == IWL + 1,
                "sum of Ufixed<WL, IWL> must be Ufixed<WL + 1, IWL + 1>"
            );
        }
        Ufixed::from_bits(self.bits + rhs.bits)
    }

    /// Exact product in the grown format `Ufixed<WL + RWL, IWL + RIWL>`.
    #[inline]
    pub fn widening_mul<const RWL: u32, const RIWL: u32, const OWL: u32, const OIWL: u32>(
        self,
        rhs: Ufixed<RWL, RIWL>,
    ) -> Ufixed<OWL, OIWL> {
        const {
            assert!(
                OWL == WL + RWL && OIWL == IWL + RIWL,
                "product of Ufixed<WL1, IWL1> and Ufixed<WL2, IWL2> must be Ufixed<WL1 + WL2, IWL1 + IWL2>"
            );
        }
        Ufixed::from_bits(self.bits * rhs.to_bits())
    }

    /// Reinterpret as another format.
    ///
    /// The binary point is realigned by shifting by the difference in
    /// fractional bits, then the result is masked to `OWL` bits. Integral bits
    /// that do not fit wrap away and surplus fractional bits are truncated;
    /// no error is reported.
    #[inline]
    pub fn cast<const OWL: u32, const OIWL: u32>(self) -> Ufixed<OWL, OIWL> {
        let from = Self::FRACTIONAL_BITS;
        let to = Ufixed::<OWL, OIWL>::FRACTIONAL_BITS;
        let bits = if to >= from {
            shl_or_zero(self.bits, to - from)
        } else {
            shr_or_zero(self.bits, from - to)
        };
        Ufixed::from_bits(bits)
    }
}

impl<const WL: u32, const IWL: u32> Sub for Ufixed<WL, IWL> {
    type Output = Self;

    /// Difference in the same format, wrapping modulo `2^WL`.
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_bits(self.bits.wrapping_sub(rhs.bits))
    }
}

impl<const WL: u32, const IWL: u32> Shl<u32> for Ufixed<WL, IWL> {
    type Output = Self;

    #[inline]
    fn shl(self, rhs: u32) -> Self {
        Self::from_bits(shl_or_zero(self.bits, rhs))
    }
}

impl<const WL: u32, const IWL: u32> Shr<u32> for Ufixed<WL, IWL> {
    type Output = Self;

    #[inline]
    fn shr(self, rhs: u32) -> Self {
        Self::from_bits(shr_or_zero(self.bits, rhs))
    }
}

impl<const WL: u32, const IWL: u32> fmt::Display for Ufixed<WL, IWL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_float(), f)
    }
}

impl<const WL: u32, const IWL: u32> fmt::Debug for Ufixed<WL, IWL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ufixed<{}, {}>({:#x} = {})",
            WL,
            IWL,
            self.bits,
            self.as_float()
        )
    }
}
