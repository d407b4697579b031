//! Linear interpolation in unsigned fixed point.
//!
//! Two ways to compute `lo + (hi - lo) * ratio` without leaving the operand
//! format:
//!
//! - [`lerp`] multiplies directly (one widening multiply).
//! - [`bisect_lerp`] halves the `[lo, hi]` interval `depth` times, steered by
//!   the bits of `ratio`; it needs only adds and shifts, at the cost of
//!   `2^-depth` resolution.
//!
//! Both return `lo` exactly for `ratio == 0` and `hi` exactly for
//! `ratio == 1`. `hi >= lo` is expected; otherwise the difference wraps.

use crate::fixed::{Ufixed, mask};

/// Default subdivision depth for [`bisect_lerp`].
pub const DEFAULT_BISECT_DEPTH: u32 = 5;

/// `(hi - lo) * ratio + lo`, truncated back to the operand format.
///
/// ```rust
/// use nco_core::{Ufixed, lerp};
///
/// type Q = Ufixed<24, 3>;
/// let hi = Q::from_float(4.0).unwrap();
/// let lo = Q::from_float(1.0).unwrap();
/// let r = Q::from_float(0.25).unwrap();
/// assert_eq!(lerp(hi, lo, r).as_float(), 1.75);
/// ```
pub fn lerp<const WL: u32, const IWL: u32>(
    hi: Ufixed<WL, IWL>,
    lo: Ufixed<WL, IWL>,
    ratio: Ufixed<WL, IWL>,
) -> Ufixed<WL, IWL> {
    let frac = Ufixed::<WL, IWL>::FRACTIONAL_BITS;
    // The 2*WL-bit product, cast back by dropping `frac` fractional bits.
    let product = u128::from((hi - lo).to_bits()) * u128::from(ratio.to_bits());
    let scaled = (product >> frac) as u64 & mask(WL);
    Ufixed::from_bits(scaled.wrapping_add(lo.to_bits()))
}

/// Interpolate by repeated midpoint subdivision.
///
/// At each of `depth` steps the interval is halved: the upper half is kept
/// when `ratio >= 0.5` (and `0.5` is subtracted), the lower half otherwise,
/// and `ratio` is doubled. The midpoint of the final interval is returned.
/// A `ratio` of exactly 0 or 1 collapses the interval onto `lo` or `hi`.
pub fn bisect_lerp<const WL: u32, const IWL: u32>(
    mut hi: Ufixed<WL, IWL>,
    mut lo: Ufixed<WL, IWL>,
    mut ratio: Ufixed<WL, IWL>,
    depth: u32,
) -> Ufixed<WL, IWL> {
    let frac = Ufixed::<WL, IWL>::FRACTIONAL_BITS;
    let one = 1u128 << frac;
    let half = one >> 1;

    for _ in 0..depth {
        let mid = midpoint(hi, lo);
        let r = u128::from(ratio.to_bits());
        if r == one {
            lo = hi;
        } else if r == 0 {
            hi = lo;
        } else if r >= half {
            lo = mid;
            ratio = Ufixed::from_bits((r - half) as u64);
        } else {
            hi = mid;
        }
        ratio = ratio << 1;
    }
    midpoint(hi, lo)
}

/// `(a + b) / 2` rounded down, computed without overflowing the format.
#[inline]
fn midpoint<const WL: u32, const IWL: u32>(
    a: Ufixed<WL, IWL>,
    b: Ufixed<WL, IWL>,
) -> Ufixed<WL, IWL> {
    let sum = u128::from(a.to_bits()) + u128::from(b.to_bits());
    Ufixed::from_bits((sum >> 1) as u64)
}
