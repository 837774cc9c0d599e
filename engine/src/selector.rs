//! Catalog selection: a bounded random draw at the target level.

use motus_types::{Catalog, CatalogEntry, SELECTION_LIMIT, Selection};
use rand::seq::IndexedRandom;

/// Draw up to [`SELECTION_LIMIT`] entries for a target level.
///
/// Exact-level matches are preferred; when the exact tier is empty the pool
/// widens to the adjacent tiers. An empty pool after widening returns the
/// empty selection — a legitimate outcome, not an error. The draw itself is
/// uniformly random without replacement; the consistency cache, not this
/// function, is what makes results repeatable for identical inputs.
#[must_use]
pub fn select(catalog: &Catalog, target_level: u8) -> Selection {
    let mut candidates: Vec<&CatalogEntry> = catalog.at_level(target_level).collect();
    if candidates.is_empty() {
        candidates = catalog.near_level(target_level).collect();
    }
    if candidates.is_empty() {
        return Selection::empty();
    }

    let mut rng = rand::rng();
    let drawn = candidates
        .choose_multiple(&mut rng, SELECTION_LIMIT)
        .map(|entry| (*entry).clone())
        .collect();
    Selection::new(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_types::Level;
    use std::collections::HashSet;

    fn entry(id: &str, level: u8) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: format!("exercise {id}"),
            category: "squat".to_string(),
            level: Level::try_new(level).unwrap(),
            tags: Vec::new(),
            description: String::new(),
        }
    }

    #[test]
    fn exact_level_matches_are_preferred_over_neighbors() {
        let catalog = Catalog::new(vec![entry("a", 5), entry("b", 4), entry("c", 6)]);
        let selection = select(&catalog, 5);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.entries()[0].id, "a");
    }

    #[test]
    fn widening_reaches_adjacent_tiers_when_the_exact_tier_is_empty() {
        // Levels {2, 3, 6, 8} with target 4: only level 3 is within one tier.
        let catalog = Catalog::new(vec![
            entry("l2", 2),
            entry("l3", 3),
            entry("l6", 6),
            entry("l8", 8),
        ]);
        let selection = select(&catalog, 4);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.entries()[0].id, "l3");
    }

    #[test]
    fn no_coverage_even_after_widening_yields_the_empty_selection() {
        let catalog = Catalog::new(vec![entry("l8", 8)]);
        let selection = select(&catalog, 1);
        assert!(selection.is_empty());
    }

    #[test]
    fn draws_are_bounded_and_free_of_duplicates() {
        let entries: Vec<CatalogEntry> =
            (0..10).map(|i| entry(&format!("e{i}"), 7)).collect();
        let catalog = Catalog::new(entries);

        for _ in 0..20 {
            let selection = select(&catalog, 7);
            assert_eq!(selection.len(), SELECTION_LIMIT);

            let ids: HashSet<_> = selection.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids.len(), SELECTION_LIMIT);
            assert!(selection.iter().all(|e| e.level.get() == 7));
        }
    }

    #[test]
    fn small_pools_are_returned_whole() {
        let catalog = Catalog::new(vec![entry("a", 7), entry("b", 7)]);
        let selection = select(&catalog, 7);
        assert_eq!(selection.len(), 2);
    }
}
