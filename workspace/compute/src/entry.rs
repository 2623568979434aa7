//! Tax amount derivation for ledger entries.

use rust_decimal::Decimal;

use model::entities::prelude::*;

/// The three amounts displayed for an entry, fully derived.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntryAmounts {
    pub ht: Decimal,
    pub tva: Decimal,
    pub ttc: Decimal,
}

/// Derives HT, TVA and TTC for an entry.
///
/// A positive stored HT is authoritative and the TTC is recomputed forward
/// from it, even when a TTC was also stored. Otherwise a positive stored
/// TTC is authoritative and HT/TVA are backed out from it. When neither is
/// positive every amount is zero. All totals in the application go through
/// this one derivation.
pub fn compute_entry_amounts(entry: &Entry) -> EntryAmounts {
    if entry.amount_ht > Decimal::ZERO {
        let tva = entry.amount_ht * entry.tva_rate / Decimal::ONE_HUNDRED;
        EntryAmounts {
            ht: entry.amount_ht,
            tva,
            ttc: entry.amount_ht + tva,
        }
    } else if entry.amount_ttc > Decimal::ZERO {
        let divisor = Decimal::ONE + entry.tva_rate / Decimal::ONE_HUNDRED;
        let ht = if divisor.is_zero() {
            entry.amount_ttc
        } else {
            entry.amount_ttc / divisor
        };
        EntryAmounts {
            ht,
            tva: entry.amount_ttc - ht,
            ttc: entry.amount_ttc,
        }
    } else {
        EntryAmounts::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::config::AccountingDefaults;

    fn entry(ht: Decimal, rate: Decimal, ttc: Decimal) -> Entry {
        let mut entry = Entry::default_for(EntryKind::Income, &AccountingDefaults::default());
        entry.amount_ht = ht;
        entry.tva_rate = rate;
        entry.amount_ttc = ttc;
        entry
    }

    #[test]
    fn test_forward_from_ht() {
        let amounts = compute_entry_amounts(&entry(
            Decimal::new(100, 0),
            Decimal::new(20, 0),
            Decimal::ZERO,
        ));
        assert_eq!(amounts.tva, Decimal::new(20, 0));
        assert_eq!(amounts.ttc, Decimal::new(120, 0));
    }

    #[test]
    fn test_ht_wins_over_stored_ttc() {
        let amounts = compute_entry_amounts(&entry(
            Decimal::new(100, 0),
            Decimal::new(20, 0),
            Decimal::new(999, 0),
        ));
        assert_eq!(amounts.ttc, Decimal::new(120, 0));
    }

    #[test]
    fn test_backward_from_ttc() {
        let amounts = compute_entry_amounts(&entry(
            Decimal::ZERO,
            Decimal::new(20, 0),
            Decimal::new(120, 0),
        ));
        assert_eq!(amounts.ht, Decimal::new(100, 0));
        assert_eq!(amounts.tva, Decimal::new(20, 0));
        assert_eq!(amounts.ttc, Decimal::new(120, 0));
    }

    #[test]
    fn test_backward_reconstructs_ttc_exactly() {
        let ttc = Decimal::new(5999, 2);
        let amounts = compute_entry_amounts(&entry(Decimal::ZERO, Decimal::new(55, 1), ttc));
        assert_eq!(amounts.ht + amounts.tva, ttc);
    }

    #[test]
    fn test_neither_positive_is_all_zero() {
        let amounts = compute_entry_amounts(&entry(
            Decimal::ZERO,
            Decimal::new(20, 0),
            Decimal::new(-5, 0),
        ));
        assert_eq!(amounts, EntryAmounts::default());
    }
}
