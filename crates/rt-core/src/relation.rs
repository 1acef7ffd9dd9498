//! Pairwise relations between events: duplicates and combined objectives.
//!
//! Both predicates look at two events only. Callers slide them across the
//! stream; missing operands (`None`) never relate.

use crate::event::RawEvent;

/// Whether `l` and `r` are the same sample repeated.
///
/// True when both are present and agree on the timestamp and all four
/// classification ids. Action and command markers are not compared.
pub fn is_duplicate(l: Option<&RawEvent>, r: Option<&RawEvent>) -> bool {
    let (Some(l), Some(r)) = (l, r) else {
        return false;
    };

    l.timestamp == r.timestamp
        && l.event_id == r.event_id
        && l.location_id == r.location_id
        && l.item_id == r.item_id
        && l.tile_id == r.tile_id
}

/// Whether `l` and `r` form one combined objective.
///
/// A check cleared at the same instant as an item is picked up is a single
/// player action. Only check + item pairs qualify, in either order.
pub fn is_combined(l: Option<&RawEvent>, r: Option<&RawEvent>) -> bool {
    let (Some(l), Some(r)) = (l, r) else {
        return false;
    };

    if l.timestamp != r.timestamp {
        return false;
    }

    let check_then_item = l.location_id.is_some() && r.item_id.is_some();
    let item_then_check = l.item_id.is_some() && r.location_id.is_some();
    check_then_item || item_then_check
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_is_reflexive_and_symmetric() {
        let samples = [
            RawEvent::tile(10, 1),
            RawEvent::check(10, 1),
            RawEvent::item(20, 4),
            RawEvent::event(30, 2),
            RawEvent::action(40, 6),
            RawEvent::default(),
        ];

        for l in &samples {
            assert!(is_duplicate(Some(l), Some(l)), "{l:?} should duplicate itself");
            for r in &samples {
                assert_eq!(is_duplicate(Some(l), Some(r)), is_duplicate(Some(r), Some(l)));
            }
        }
    }

    #[test]
    fn duplicate_requires_both_operands() {
        let e = RawEvent::tile(10, 1);
        assert!(!is_duplicate(None, Some(&e)));
        assert!(!is_duplicate(Some(&e), None));
        assert!(!is_duplicate(None, None));
    }

    #[test]
    fn duplicate_compares_timestamp_and_ids() {
        assert!(!is_duplicate(Some(&RawEvent::tile(10, 1)), Some(&RawEvent::tile(11, 1))));
        assert!(!is_duplicate(Some(&RawEvent::tile(10, 1)), Some(&RawEvent::tile(10, 2))));
        assert!(!is_duplicate(Some(&RawEvent::tile(10, 1)), Some(&RawEvent::check(10, 1))));
    }

    #[test]
    fn duplicate_ignores_markers() {
        assert!(is_duplicate(
            Some(&RawEvent::action(10, 1)),
            Some(&RawEvent::command(10, 2))
        ));
    }

    #[test]
    fn check_and_item_at_same_instant_combine() {
        let check = RawEvent::check(500, 3);
        let item = RawEvent::item(500, 4);
        assert!(is_combined(Some(&check), Some(&item)));
        assert!(is_combined(Some(&item), Some(&check)));
    }

    #[test]
    fn combination_requires_equal_timestamps() {
        let check = RawEvent::check(500, 3);
        let item = RawEvent::item(501, 4);
        assert!(!is_combined(Some(&check), Some(&item)));
    }

    #[test]
    fn other_pairs_never_combine() {
        let pairs = [
            (RawEvent::tile(5, 1), RawEvent::tile(5, 2)),
            (RawEvent::event(5, 1), RawEvent::event(5, 2)),
            (RawEvent::tile(5, 1), RawEvent::item(5, 2)),
            (RawEvent::check(5, 1), RawEvent::check(5, 2)),
            (RawEvent::item(5, 1), RawEvent::item(5, 2)),
            (RawEvent::action(5, 1), RawEvent::command(5, 2)),
        ];

        for (l, r) in &pairs {
            assert!(!is_combined(Some(l), Some(r)), "{l:?} + {r:?}");
        }
    }

    #[test]
    fn combination_requires_both_operands() {
        let check = RawEvent::check(500, 3);
        assert!(!is_combined(Some(&check), None));
        assert!(!is_combined(None, Some(&check)));
    }
}
