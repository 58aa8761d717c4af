//! Rasch-family classification.
//!
//! A form is Rasch family when every item is a partial-credit (Rasch) item or
//! a dichotomous logistic item with discrimination 1, no guessing and no
//! slipping. Linking then only needs the intercept.
use crate::irt::{ItemFamily, ItemResponseModel, ItemSet};

const PARAM_TOL: f64 = 1e-12;

/// `true` when every item of `items` is Rasch family.
pub fn is_rasch_family(items: &ItemSet) -> bool {
    items.models().all(|m| is_rasch_item(m.as_ref()))
}

/// `true` when both forms are Rasch family.
pub fn both_rasch_family(form_x: &ItemSet, form_y: &ItemSet) -> bool {
    is_rasch_family(form_x) && is_rasch_family(form_y)
}

fn is_rasch_item(item: &dyn ItemResponseModel) -> bool {
    match item.family() {
        ItemFamily::PartialCredit => true,
        ItemFamily::GeneralizedPartialCredit => false,
        ItemFamily::Logistic => {
            (item.discrimination() - 1.0).abs() < PARAM_TOL
                && item.guessing().abs() < PARAM_TOL
                && (item.slipping() - 1.0).abs() < PARAM_TOL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irt::{LogisticItem, PartialCreditItem};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover each family and the mixed-form case.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Rasch and PCM items qualify; a 2PL, a 3PL or a GPCM item does not.
    //
    // Given
    // -----
    // - A Rasch + PCM form, and forms that add one non-Rasch item each.
    //
    // Expect
    // ------
    // - Only the first form is Rasch family.
    fn classifies_items_by_family_and_parameters() {
        // Arrange
        let base = ItemSet::new()
            .with_item("r", LogisticItem::rasch(0.2).expect("valid item"))
            .with_item("p", PartialCreditItem::pcm(vec![-0.5, 0.5]).expect("valid item"));
        let with_2pl =
            base.clone().with_item("x", LogisticItem::two_pl(1.3, 0.0, 1.0).expect("ok"));
        let with_3pl =
            base.clone().with_item("x", LogisticItem::three_pl(1.0, 0.0, 0.2, 1.0).expect("ok"));
        let with_gpcm =
            base.clone().with_item("x", PartialCreditItem::gpcm(1.0, vec![0.0], 1.0).expect("ok"));

        // Act / Assert
        assert!(is_rasch_family(&base));
        assert!(!is_rasch_family(&with_2pl));
        assert!(!is_rasch_family(&with_3pl));
        assert!(!is_rasch_family(&with_gpcm));
        assert!(!both_rasch_family(&base, &with_2pl));
    }
}
