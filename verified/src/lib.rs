//! # Verified Signed 8-bit Checked Addition
//!
//! A verified library that works with both:
//! - `cargo build/test` - specs stripped, compiles as pure Rust
//! - `verus` - full verification
//!
//! ## How It Works
//!
//! The guard runs before any addition happens. The addition itself is done in
//! `i16`, which cannot overflow for two `i8` operands, and only then narrowed
//! back to `i8` by an explicit rule. Nothing here depends on debug-mode
//! overflow panics or on silent `i8` wrapping.
//!
//! ```rust
//! use verified::{checked_add, Outcome};
//!
//! assert_eq!(checked_add(127, 1), Outcome::Overflow);
//! assert_eq!(checked_add(126, 1), Outcome::Sum(127));
//! ```

// Verus requires explicit arithmetic for verification specs
#![allow(clippy::assign_op_pattern)]

mod report;

pub use report::ArithmeticOverflow;

use verus_builtin_macros::verus;

verus! {

// ============================================================================
// SECTION 1: RANGE CONSTANTS
// ============================================================================

/// Largest value representable in a signed 8-bit integer.
pub const MAX_INT8: i8 = 127;
/// Smallest value representable in a signed 8-bit integer.
pub const MIN_INT8: i8 = -128;

/// Largest sum of two `i8` values, as seen in the wide type.
pub const WIDE_SUM_MAX: i16 = 254;
/// Smallest sum of two `i8` values, as seen in the wide type.
pub const WIDE_SUM_MIN: i16 = -256;

/// Exit status when the sum was produced.
pub const EXIT_OK: i32 = 0;
/// Exit status when the guard fired.
pub const EXIT_OVERFLOW: i32 = 1;

// ============================================================================
// SECTION 2: POLICIES
// ============================================================================

/// Which side of the range the guard protects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Only positive overflow: both operands positive and the sum above 127.
    /// Negative sums below -128 pass the guard and are narrowed.
    PositiveOnly,
    /// Both sides. A behavioural change relative to `PositiveOnly`: sums below
    /// -128 are reported as overflow instead of being narrowed.
    Symmetric,
}

/// How a wide sum outside [-128, 127] is brought back to 8 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Narrowing {
    /// Two's-complement truncation: keep the low 8 bits.
    Wrapping,
    /// Clamp to the nearest bound.
    Saturating,
}

/// Result of a checked addition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The guard fired; no sum was produced.
    Overflow,
    /// The narrowed sum.
    Sum(i8),
}

// ============================================================================
// SECTION 3: SPECIFICATIONS
// ============================================================================

/// Does the mathematical sum fit in an `i8`?
pub open spec fn fits_i8(sum: int) -> bool {
    MIN_INT8 as int <= sum && sum <= MAX_INT8 as int
}

/// The guard condition, stated over mathematical integers.
pub open spec fn guard_spec(a: i8, add: i8, policy: GuardPolicy) -> bool {
    match policy {
        GuardPolicy::PositiveOnly => a > 0 && add > 0 && a as int + add as int > MAX_INT8 as int,
        GuardPolicy::Symmetric => !fits_i8(a as int + add as int),
    }
}

// ============================================================================
// SECTION 4: THE GUARD AND THE ADDER
// ============================================================================

/// The pre-check alone. No arithmetic can overflow here: each subtraction is
/// only reached once the sign of `add` keeps it in range.
pub fn would_overflow(a: i8, add: i8, policy: GuardPolicy) -> (result: bool)
    ensures
        result == guard_spec(a, add, policy),
{
    let positive = a > 0 && add > 0 && a > MAX_INT8 - add;
    match policy {
        GuardPolicy::PositiveOnly => positive,
        GuardPolicy::Symmetric => {
            let negative = a < 0 && add < 0 && a < MIN_INT8 - add;
            positive || negative
        }
    }
}

/// Bring a wide sum of two `i8` values back to 8 bits.
///
/// In-range values are returned unchanged. Out-of-range values are shifted by
/// 256 (`Wrapping`) or clamped (`Saturating`), so every cast below is proven
/// lossless.
pub fn narrow(wide: i16, narrowing: Narrowing) -> (result: i8)
    requires
        WIDE_SUM_MIN <= wide,
        wide <= WIDE_SUM_MAX,
    ensures
        fits_i8(wide as int) ==> result as int == wide as int,
{
    if wide > MAX_INT8 as i16 {
        match narrowing {
            Narrowing::Wrapping => (wide - 256) as i8,
            Narrowing::Saturating => MAX_INT8,
        }
    } else if wide < MIN_INT8 as i16 {
        match narrowing {
            Narrowing::Wrapping => (wide + 256) as i8,
            Narrowing::Saturating => MIN_INT8,
        }
    } else {
        wide as i8
    }
}

/// Checked addition with an explicit guard policy and narrowing rule.
pub fn checked_add_with(a: i8, add: i8, policy: GuardPolicy, narrowing: Narrowing) -> (result: Outcome)
    ensures
        guard_spec(a, add, policy) <==> result == Outcome::Overflow,
        fits_i8(a as int + add as int) && !guard_spec(a, add, policy)
            ==> result == Outcome::Sum((a as int + add as int) as i8),
{
    if would_overflow(a, add, policy) {
        return Outcome::Overflow;
    }
    let wide = a as i16 + add as i16;
    Outcome::Sum(narrow(wide, narrowing))
}

/// Checked addition: positive-side guard, wrapping narrowing.
///
/// `checked_add(-128, -1)` is not guarded and yields `Sum(127)`.
pub fn checked_add(a: i8, add: i8) -> (result: Outcome)
    ensures
        guard_spec(a, add, GuardPolicy::PositiveOnly) <==> result == Outcome::Overflow,
{
    checked_add_with(a, add, GuardPolicy::PositiveOnly, Narrowing::Wrapping)
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> (code: i32)
        ensures
            code == 0 || code == 1,
    {
        match self {
            Outcome::Overflow => EXIT_OVERFLOW,
            Outcome::Sum(_) => EXIT_OK,
        }
    }

    pub fn sum(&self) -> (value: Option<i8>) {
        match self {
            Outcome::Overflow => None,
            Outcome::Sum(v) => Some(*v),
        }
    }
}

} // verus!

// Default impls can't be derived inside verus! macro blocks
impl Default for GuardPolicy {
    fn default() -> Self {
        GuardPolicy::PositiveOnly
    }
}

impl Default for Narrowing {
    fn default() -> Self {
        Narrowing::Wrapping
    }
}

/// Run the adder and log the guard decision.
pub fn evaluate(a: i8, add: i8, policy: GuardPolicy, narrowing: Narrowing) -> Outcome {
    log::debug!(
        "checking {} + {} (policy: {:?}, narrowing: {:?})",
        a,
        add,
        policy,
        narrowing
    );
    let outcome = checked_add_with(a, add, policy, narrowing);
    match outcome {
        Outcome::Overflow => log::warn!("{} + {} exceeds the i8 range", a, add),
        Outcome::Sum(v) => log::debug!("{} + {} = {}", a, add, v),
    }
    outcome
}

// ============================================================================
// TESTS - Run with `cargo test`
// ============================================================================
