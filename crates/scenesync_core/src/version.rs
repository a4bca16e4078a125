//! Scene version: the logical clock used for optimistic concurrency.

use crate::element::Element;

/// Computes the scene version of a collection.
///
/// The value is the sum of all element versions, tombstones included. It is
/// independent of element order and strictly increases whenever a single
/// element version is incremented (until it saturates at `u64::MAX`).
///
/// Equal scene versions do not imply equal collections; callers only use the
/// value to decide whether a snapshot is stale.
pub fn scene_version(elements: &[Element]) -> u64 {
    elements
        .iter()
        .fold(0u64, |acc, element| acc.saturating_add(element.version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scene_is_zero() {
        assert_eq!(scene_version(&[]), 0);
    }

    #[test]
    fn sums_versions_including_tombstones() {
        let elements = vec![
            Element::new("a").with_version(3),
            Element::new("b").with_version(5).deleted(),
        ];
        assert_eq!(scene_version(&elements), 8);
    }

    #[test]
    fn ignores_order() {
        let a = Element::new("a").with_version(2);
        let b = Element::new("b").with_version(7);
        assert_eq!(
            scene_version(&[a.clone(), b.clone()]),
            scene_version(&[b, a])
        );
    }

    #[test]
    fn increases_after_bump() {
        let mut elements = vec![Element::new("a"), Element::new("b")];
        let before = scene_version(&elements);
        elements[1].bump(1, 1);
        assert!(scene_version(&elements) > before);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let elements = vec![
            Element::new("a").with_version(u64::MAX),
            Element::new("b").with_version(10),
        ];
        assert_eq!(scene_version(&elements), u64::MAX);
    }
}
