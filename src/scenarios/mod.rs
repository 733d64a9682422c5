//! # Scenario Catalog
//!
//! Every end-to-end scenario the suite knows, grouped by resource:
//! `pet`, `store`, `user` and `security`. Each one arranges its own data,
//! acts through the service wrappers, asserts on the raw responses and
//! registers cleanup for what it created.

pub mod pet;
pub mod security;
pub mod store;
pub mod user;

use crate::testing::Scenario;

/// All scenarios in execution-report order.
pub fn catalog() -> Vec<Scenario> {
    let mut scenarios = pet::scenarios();
    scenarios.extend(store::scenarios());
    scenarios.extend(user::scenarios());
    scenarios.extend(security::scenarios());
    scenarios
}

/// Scenarios whose group or name contains any of `patterns`; all of them when
/// no pattern is given.
pub fn filter(scenarios: &[Scenario], patterns: &[String]) -> Vec<Scenario> {
    scenarios
        .iter()
        .filter(|scenario| patterns.is_empty() || patterns.iter().any(|p| scenario.matches(p)))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_are_unique() {
        let catalog = catalog();
        let names: HashSet<_> = catalog.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn catalog_covers_every_group() {
        let groups: HashSet<_> = catalog().iter().map(|s| s.group).collect();
        assert_eq!(groups, HashSet::from(["pet", "store", "user", "security"]));
    }

    #[test]
    fn catalog_contains_the_reference_examples() {
        let catalog = catalog();
        for name in [
            "pet_crud_lifecycle",
            "minimal_user_lifecycle",
            "place_order",
            "get_missing_pet",
        ] {
            assert!(catalog.iter().any(|s| s.name == name), "missing {name}");
        }
    }

    #[test]
    fn filter_matches_group_or_name() {
        let catalog = catalog();
        assert_eq!(filter(&catalog, &[]).len(), catalog.len());

        let store = filter(&catalog, &["store".to_string()]);
        assert!(!store.is_empty());
        assert!(store.iter().all(|s| s.group == "store"));

        let picked = filter(&catalog, &["get_missing_pet".to_string(), "sql_injection".to_string()]);
        let names: Vec<_> = picked.iter().map(|s| s.name).collect();
        assert_eq!(names, [
            "get_missing_pet",
            "sql_injection_in_username_lookup",
            "sql_injection_in_login"
        ]);

        assert!(filter(&catalog, &["nothing-matches".to_string()]).is_empty());
    }
}
