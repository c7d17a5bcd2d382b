use proptest::prelude::*;

use regstat_standards::{RegionRegistry, default_registry, display_name, resolve};

#[test]
fn every_alias_entry_is_a_fixed_point() {
    let map = default_registry().key_map();
    assert!(!map.is_empty());
    for (label, key) in map.iter() {
        assert_eq!(resolve(label), key, "{label}");
    }
}

#[test]
fn every_alias_target_has_a_display_name() {
    for (label, key) in default_registry().key_map().iter() {
        assert!(display_name(key).is_some(), "{label} -> {key}");
    }
}

#[test]
fn reference_alias_table() {
    let expected = [
        ("Республика Карелия", "Karelia"),
        ("Республика Коми", "Komi"),
        ("Архангельская обл. без АО", "Arkhangelsk"),
        ("Ненецкий автономный округ", "Nenets"),
        ("Вологодская область", "Vologda"),
        ("Калининградская область", "Kaliningrad"),
        ("Ленинградская область", "Leningrad"),
        ("Мурманская область", "Murmansk"),
        ("Новгородская область", "Novgorod"),
        ("Псковская область", "Pskov"),
        ("г. Санкт-Петербург", "CityofSt.Petersburg"),
    ];
    let map = default_registry().key_map();
    assert_eq!(map.len(), expected.len());
    for (label, key) in expected {
        assert_eq!(map.get(label), Some(key));
    }
}

#[test]
fn short_label_does_not_reach_geometry_key() {
    // The alias table only knows "Республика Карелия"; the bare name falls
    // through unchanged and will not join with the "Karelia" feature.
    let key = resolve("Карелия");
    assert_eq!(key, "Карелия");
    assert_ne!(key, "Karelia");
    assert!(!default_registry().is_canonical_key(&key));
}

#[test]
fn display_table_covers_all_subjects() {
    let registry = RegionRegistry::try_embedded().expect("embedded registry");
    let names = registry.display_names();
    // 83 subjects plus one alternate key spelling.
    assert_eq!(names.len(), 84);
    assert_eq!(names.get("MoscowCity"), Some(&"Москва"));
    assert_eq!(names.get("Moskva"), Some(&"Московская область"));
}

proptest! {
    #[test]
    fn resolve_is_total(name in "\\PC{0,40}") {
        let key = resolve(&name);
        if !name.is_empty() {
            prop_assert!(!key.is_empty());
        }
        match default_registry().key_map().get(&name) {
            Some(mapped) => prop_assert_eq!(key.as_str(), mapped),
            None => prop_assert_eq!(key.as_str(), name.as_str()),
        }
    }
}
