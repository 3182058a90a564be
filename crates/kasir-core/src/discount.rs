//! # Discount Engine
//!
//! A sale carries at most one discount, either a percentage of the subtotal
//! or a fixed amount off.
//!
//! ## Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal S                                                             │
//! │     │                                                                   │
//! │     ├── Percentage(bps) ──► round_half_up(S × bps / 10000)              │
//! │     │                                                                   │
//! │     └── Fixed(v) ─────────► min(v, S)                                   │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                     amount ∈ [0, S]   total = S − amount ≥ 0           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entry values are clamped when the discount is built (a rate never exceeds
//! 100 %, a fixed value is never negative), so resolution cannot fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Basis points in 100 %.
pub const FULL_RATE_BPS: u32 = 10_000;

// =============================================================================
// Discount Rate
// =============================================================================

/// A percentage stored in basis points (1000 = 10 %), always within 0..=100 %.
///
/// Deserializing clamps like [`DiscountRate::from_bps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(from = "u32")]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points, clamping above 100 %.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > FULL_RATE_BPS {
            DiscountRate(FULL_RATE_BPS)
        } else {
            DiscountRate(bps)
        }
    }

    /// Creates a rate from a whole percentage (10 = 10 %).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        Self::from_bps(pct.saturating_mul(100))
    }

    /// Creates a rate from a fractional percentage, e.g. `12.5`.
    ///
    /// Negative and NaN inputs become 0 %.
    pub fn from_percentage(pct: f64) -> Self {
        if pct.is_nan() || pct <= 0.0 {
            return DiscountRate(0);
        }
        let bps = (pct * 100.0).round();
        if bps >= FULL_RATE_BPS as f64 {
            DiscountRate(FULL_RATE_BPS)
        } else {
            DiscountRate(bps as u32)
        }
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for DiscountRate {
    fn from(bps: u32) -> Self {
        DiscountRate::from_bps(bps)
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}%", self.percentage())
        }
    }
}

// =============================================================================
// Discount Kind
// =============================================================================

/// Stored discriminator for a transaction's discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

// =============================================================================
// Discount
// =============================================================================

/// The single discount a sale may carry.
///
/// Serialized adjacently tagged: `{"kind":"percentage","value":1000}` (bps) or
/// `{"kind":"fixed","value":5000}`. Deserialized values are clamped the same
/// way as the constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(
    tag = "kind",
    content = "value",
    rename_all = "snake_case",
    from = "DiscountInput"
)]
pub enum Discount {
    Percentage(DiscountRate),
    Fixed(Money),
}

/// Wire shape of [`Discount`] before clamping.
#[derive(Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
enum DiscountInput {
    Percentage(DiscountRate),
    Fixed(Money),
}

impl From<DiscountInput> for Discount {
    fn from(input: DiscountInput) -> Self {
        match input {
            DiscountInput::Percentage(rate) => Discount::Percentage(rate),
            DiscountInput::Fixed(amount) => Discount::fixed(amount),
        }
    }
}

impl Discount {
    /// Whole-percent discount, clamped to 0..=100.
    pub const fn percentage(pct: u32) -> Self {
        Discount::Percentage(DiscountRate::from_percent(pct))
    }

    /// Fixed amount off; negative amounts are clamped to zero.
    pub const fn fixed(amount: Money) -> Self {
        if amount.is_negative() {
            Discount::Fixed(Money::zero())
        } else {
            Discount::Fixed(amount)
        }
    }

    pub const fn kind(&self) -> DiscountKind {
        match self {
            Discount::Percentage(_) => DiscountKind::Percentage,
            Discount::Fixed(_) => DiscountKind::Fixed,
        }
    }

    /// The entered value as stored on the transaction row:
    /// basis points for a percentage, minor units for a fixed amount.
    pub const fn stored_value(&self) -> i64 {
        match self {
            Discount::Percentage(rate) => rate.bps() as i64,
            Discount::Fixed(amount) => amount.amount(),
        }
    }

    /// Rebuilds a discount from its stored kind and value.
    pub fn from_stored(kind: DiscountKind, value: i64) -> Self {
        match kind {
            DiscountKind::Percentage => {
                let bps = u32::try_from(value.max(0)).unwrap_or(FULL_RATE_BPS);
                Discount::Percentage(DiscountRate::from_bps(bps))
            }
            DiscountKind::Fixed => Discount::fixed(Money::new(value)),
        }
    }

    /// True when applying this discount could never take anything off.
    pub const fn is_zero(&self) -> bool {
        match self {
            Discount::Percentage(rate) => rate.is_zero(),
            Discount::Fixed(amount) => amount.is_zero(),
        }
    }

    /// Amount taken off `subtotal`, always within `[0, subtotal]`.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::{Discount, Money};
    ///
    /// let subtotal = Money::new(100_000);
    /// assert_eq!(Discount::fixed(Money::new(500_000)).amount_for(subtotal), subtotal);
    /// assert_eq!(Discount::percentage(10).amount_for(subtotal), Money::new(10_000));
    /// ```
    pub fn amount_for(&self, subtotal: Money) -> Money {
        if !subtotal.is_positive() {
            return Money::zero();
        }
        let raw = match self {
            Discount::Percentage(rate) => subtotal.percentage(*rate),
            Discount::Fixed(amount) => *amount,
        };
        raw.clamp(Money::zero(), subtotal)
    }

    pub fn resolve(&self, subtotal: Money) -> ResolvedDiscount {
        ResolvedDiscount {
            discount: *self,
            amount: self.amount_for(subtotal),
        }
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discount::Percentage(rate) => write!(f, "{}", rate),
            Discount::Fixed(amount) => write!(f, "{}", amount),
        }
    }
}

/// Parses cashier input: `10%` / `12.5%` is a percentage, a bare integer is a
/// fixed amount.
impl FromStr for Discount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "discount".to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "discount".to_string(),
            });
        }

        if let Some(pct) = s.strip_suffix('%') {
            let pct: f64 = pct
                .trim()
                .parse()
                .map_err(|_| invalid("percentage must be a number followed by %"))?;
            return Ok(Discount::Percentage(DiscountRate::from_percentage(pct)));
        }

        let amount: i64 = s
            .parse()
            .map_err(|_| invalid("expected an amount like 5000 or a percentage like 10%"))?;
        Ok(Discount::fixed(Money::new(amount)))
    }
}

// =============================================================================
// Resolved Discount
// =============================================================================

/// A discount together with the amount it took off a specific subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDiscount {
    pub discount: Discount,
    pub amount: Money,
}

// =============================================================================
// Discount Draft
// =============================================================================

/// The discount the cashier is typing, plus whether it has been applied.
///
/// ## User Workflow
/// ```text
/// type "10%" ──► set() ──► apply() ──► resolve(subtotal) = 10 % of S
///                             │
///                             └── value is 0 → stays unapplied
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDraft {
    pub discount: Discount,
    pub applied: bool,
}

impl DiscountDraft {
    pub fn new(discount: Discount) -> Self {
        DiscountDraft {
            discount,
            applied: false,
        }
    }

    /// Replaces the typed discount. A new value must be applied again.
    pub fn set(&mut self, discount: Discount) {
        self.discount = discount;
        self.applied = false;
    }

    /// Marks the draft applied. Returns `false` (and stays unapplied) when
    /// the value is zero.
    pub fn apply(&mut self) -> bool {
        self.applied = !self.discount.is_zero();
        self.applied
    }

    pub fn remove(&mut self) {
        self.applied = false;
    }

    /// The discount to send with the checkout, if applied.
    pub fn active(&self) -> Option<Discount> {
        self.applied.then_some(self.discount)
    }

    /// Amount off `subtotal`; zero unless applied.
    pub fn resolve(&self, subtotal: Money) -> Money {
        self.active()
            .map(|d| d.amount_for(subtotal))
            .unwrap_or_default()
    }
}

impl Default for DiscountDraft {
    fn default() -> Self {
        DiscountDraft::new(Discount::percentage(0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
