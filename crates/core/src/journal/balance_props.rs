//! Property-based tests for balance accumulation and functional conversion.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tallybook_shared::types::CurrencyCode;

use super::balance::BalanceTotals;
use super::error::PostingError;
use crate::account::NormalSide;
use crate::fx::{convert_to_functional, FxRate};
use crate::storage::StorageError;

/// Strategy for a positive minor-unit amount.
fn positive_minor() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000_000i64
}

/// Strategy for a plausible exchange rate with up to 6 decimal places.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|raw| Decimal::new(raw, 6))
}

fn usd() -> CurrencyCode {
    CurrencyCode::new("USD").unwrap()
}

fn eur() -> CurrencyCode {
    CurrencyCode::new("EUR").unwrap()
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

fn no_rates(
    _base: &CurrencyCode,
    _quote: &CurrencyCode,
    _date: NaiveDate,
) -> Result<Option<FxRate>, StorageError> {
    Ok(None)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Splitting any total across both sides in equal measure balances.
    #[test]
    fn prop_equal_sides_balance(
        amounts in prop::collection::vec(positive_minor(), 1..10),
    ) {
        let mut totals = BalanceTotals::new();
        for &amount in &amounts {
            totals.accumulate(NormalSide::Debit, amount).unwrap();
            totals.accumulate(NormalSide::Credit, amount).unwrap();
        }
        prop_assert!(totals.is_balanced());
        prop_assert!(totals.require_balanced().is_ok());
    }

    /// Any non-zero skew between the sides is rejected, and the error
    /// reports both sums exactly.
    #[test]
    fn prop_skewed_sides_rejected(
        amount in positive_minor(),
        skew in 1i64..1_000_000i64,
    ) {
        let mut totals = BalanceTotals::new();
        totals.accumulate(NormalSide::Debit, amount).unwrap();
        totals.accumulate(NormalSide::Credit, amount + skew).unwrap();

        let result = totals.require_balanced();
        prop_assert!(
            matches!(
                result,
                Err(PostingError::Unbalanced { debits, credits })
                    if debits == amount && credits == amount + skew
            ),
            "Skewed totals should be rejected, got: {:?}",
            result
        );
    }

    /// Accumulation order never changes the totals.
    #[test]
    fn prop_accumulation_is_order_independent(
        amounts in prop::collection::vec((any::<bool>(), positive_minor()), 2..10),
    ) {
        let mut forward = BalanceTotals::new();
        for &(debit, amount) in &amounts {
            let side = if debit { NormalSide::Debit } else { NormalSide::Credit };
            forward.accumulate(side, amount).unwrap();
        }

        let mut backward = BalanceTotals::new();
        for &(debit, amount) in amounts.iter().rev() {
            let side = if debit { NormalSide::Debit } else { NormalSide::Credit };
            backward.accumulate(side, amount).unwrap();
        }

        prop_assert_eq!(forward.debits(), backward.debits());
        prop_assert_eq!(forward.credits(), backward.credits());
    }

    /// Same-currency conversion is always the identity: rate 1, amount
    /// bit-for-bit unchanged.
    #[test]
    fn prop_identity_conversion_preserves_amount(amount in positive_minor()) {
        let conv = convert_to_functional(&usd(), amount, &usd(), as_of(), no_rates).unwrap();
        prop_assert_eq!(conv.fx_rate, Decimal::ONE);
        prop_assert_eq!(conv.functional_amount_minor, amount);
    }

    /// Direct-rate conversion truncates toward zero: the result never
    /// exceeds the exact product and differs from it by less than one
    /// minor unit.
    #[test]
    fn prop_direct_conversion_truncates_toward_zero(
        amount in positive_minor(),
        rate in rate_strategy(),
    ) {
        let lookup = |base: &CurrencyCode, quote: &CurrencyCode, _d: NaiveDate| {
            if base == &eur() && quote == &usd() {
                Ok(Some(FxRate {
                    base: base.clone(),
                    quote: quote.clone(),
                    as_of: as_of(),
                    rate,
                    source: None,
                    inserted_at: Utc::now(),
                }))
            } else {
                Ok(None)
            }
        };

        let conv = convert_to_functional(&eur(), amount, &usd(), as_of(), lookup).unwrap();
        let exact = Decimal::from(amount) * rate;
        let floor = exact.trunc().to_i64().unwrap();
        prop_assert_eq!(conv.functional_amount_minor, floor);
        prop_assert!(Decimal::from(conv.functional_amount_minor) <= exact);
        prop_assert!(exact - Decimal::from(conv.functional_amount_minor) < Decimal::ONE);
    }

    /// An entry whose lines all convert through the same rate balances in
    /// functional currency whenever both sides carry the same face amounts.
    #[test]
    fn prop_conversion_preserves_balance_for_mirrored_lines(
        amounts in prop::collection::vec(positive_minor(), 1..6),
        rate in rate_strategy(),
    ) {
        let lookup = |base: &CurrencyCode, quote: &CurrencyCode, _d: NaiveDate| {
            if base == &eur() && quote == &usd() {
                Ok(Some(FxRate {
                    base: base.clone(),
                    quote: quote.clone(),
                    as_of: as_of(),
                    rate,
                    source: None,
                    inserted_at: Utc::now(),
                }))
            } else {
                Ok(None)
            }
        };

        let mut totals = BalanceTotals::new();
        for &amount in &amounts {
            let debit = convert_to_functional(&eur(), amount, &usd(), as_of(), lookup).unwrap();
            let credit = convert_to_functional(&eur(), amount, &usd(), as_of(), lookup).unwrap();
            totals.accumulate(NormalSide::Debit, debit.functional_amount_minor).unwrap();
            totals.accumulate(NormalSide::Credit, credit.functional_amount_minor).unwrap();
        }
        prop_assert!(totals.is_balanced());
    }
}
