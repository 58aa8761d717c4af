//! Common-item precondition shared by every linking method.
//!
//! Both forms must contain exactly the same item names. On success the names
//! of Form Y, the reference form, become the canonical iteration order used by
//! all downstream computations.
use crate::{
    irt::ItemSet,
    linking::errors::{LinkingError, LinkingResult},
};

/// Validate the common-item design and return the canonical item order.
///
/// # Errors
/// - `DimensionMismatch` when the sizes differ or either form has an item
///   the other lacks; `mismatched` is the size of the symmetric difference.
/// - `NoCommonItems` when both forms are empty.
pub fn common_items(form_x: &ItemSet, form_y: &ItemSet) -> LinkingResult<Vec<String>> {
    let only_x = form_x.names().filter(|n| !form_y.contains(n)).count();
    let only_y = form_y.names().filter(|n| !form_x.contains(n)).count();
    let mismatched = only_x + only_y;
    if form_x.len() != form_y.len() || mismatched != 0 {
        return Err(LinkingError::DimensionMismatch {
            size_x: form_x.len(),
            size_y: form_y.len(),
            mismatched,
        });
    }
    if form_y.is_empty() {
        return Err(LinkingError::NoCommonItems);
    }
    Ok(form_y.names().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irt::LogisticItem;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover acceptance of matching forms and the two ways the
    // common-item design can be violated.
    // -------------------------------------------------------------------------

    fn form(names: &[&str]) -> ItemSet {
        names.iter().fold(ItemSet::new(), |set, name| {
            set.with_item(*name, LogisticItem::rasch(0.0).expect("valid item"))
        })
    }

    #[test]
    // Purpose
    // -------
    // Matching forms yield Form Y's names as the canonical order.
    //
    // Given
    // -----
    // - Both forms with items {q2, q1, q3}.
    //
    // Expect
    // ------
    // - ["q1", "q2", "q3"].
    fn matching_forms_return_reference_order() {
        // Act
        let order = common_items(&form(&["q2", "q1", "q3"]), &form(&["q3", "q1", "q2"]));

        // Assert
        assert_eq!(order, Ok(vec!["q1".to_string(), "q2".to_string(), "q3".to_string()]));
    }

    #[test]
    // Purpose
    // -------
    // Same size but different membership is still a mismatch.
    //
    // Given
    // -----
    // - X = {a, b}, Y = {a, c}.
    //
    // Expect
    // ------
    // - `DimensionMismatch { size_x: 2, size_y: 2, mismatched: 2 }`.
    fn same_size_different_membership_is_rejected() {
        // Act
        let res = common_items(&form(&["a", "b"]), &form(&["a", "c"]));

        // Assert
        assert_eq!(
            res,
            Err(LinkingError::DimensionMismatch { size_x: 2, size_y: 2, mismatched: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // An extra item on Form Y is rejected, as are two empty forms.
    //
    // Given
    // -----
    // - X = {a}, Y = {a, extra}; then X = Y = {}.
    //
    // Expect
    // ------
    // - `DimensionMismatch` with one mismatched item; `NoCommonItems`.
    fn extra_item_and_empty_forms_are_rejected() {
        // Act
        let extra = common_items(&form(&["a"]), &form(&["a", "extra"]));
        let empty = common_items(&ItemSet::new(), &ItemSet::new());

        // Assert
        assert_eq!(
            extra,
            Err(LinkingError::DimensionMismatch { size_x: 1, size_y: 2, mismatched: 1 })
        );
        assert_eq!(empty, Err(LinkingError::NoCommonItems));
    }
}
