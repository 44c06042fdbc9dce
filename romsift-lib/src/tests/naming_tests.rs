use super::*;
use romsift_dat::{Category, Variant};

fn entry(variants: &[(&str, Option<&str>)]) -> CatalogEntry {
    CatalogEntry {
        variants: variants
            .iter()
            .map(|(name, region)| Variant::new(*name, *region))
            .collect(),
        clones: variants.iter().map(|(name, _)| name.to_string()).collect(),
        category: Category::Games,
    }
}

#[test]
fn test_resolve_prefers_best_region() {
    let config = EngineConfig::default();
    let e = entry(&[
        ("Game (USA)", Some("USA")),
        ("Game (Europe)", Some("Europe")),
        ("Game (Japan)", Some("Japan")),
    ]);
    let r = resolve(&e, &config);
    assert_eq!(r.canonical_name, "Game");
    assert_eq!(r.region_rank, 0);
    assert_eq!(r.representative, 0);
}

#[test]
fn test_resolve_representative_not_first() {
    let config = EngineConfig::default();
    let e = entry(&[
        ("Kessen (Japan)", Some("J")),
        ("Kessen (Europe) (Special Edition)", Some("E")),
    ]);
    let r = resolve(&e, &config);
    assert_eq!(r.region_rank, 2);
    assert_eq!(r.representative, 1);
    assert_eq!(r.canonical_name, "Kessen (Special Edition)");
}

#[test]
fn test_resolve_unknown_regions() {
    let config = EngineConfig::default();
    let e = entry(&[("Homebrew (Atlantis)", None), ("Homebrew (Mars)", Some("Mars"))]);
    let r = resolve(&e, &config);
    assert_eq!(r.region_rank, UNKNOWN_RANK);
    assert_eq!(r.representative, 0);
}

#[test]
fn test_canonical_name_skips_disqualified_suffixes() {
    let config = EngineConfig::default();
    assert_eq!(
        canonical_name("Pokemon - Red Version (USA, Europe) (SGB Enhanced)", &config),
        "Pokemon - Red Version"
    );
    assert_eq!(canonical_name("Game (USA) (Rev 1)", &config), "Game");
    assert_eq!(canonical_name("Game (USA) (v1.1)", &config), "Game");
    assert_eq!(canonical_name("Game (USA) (Beta 2)", &config), "Game");
    assert_eq!(canonical_name("Game (USA) (Namco Collection)", &config), "Game");
    assert_eq!(canonical_name("Game (USA) (2000-10-13-A)", &config), "Game");
    assert_eq!(canonical_name("Game (Japan) (En,Ja)", &config), "Game");
}

#[test]
fn test_canonical_name_keeps_one_suffix() {
    let config = EngineConfig::default();
    assert_eq!(
        canonical_name("Game (Japan) (Special Edition) (Limited)", &config),
        "Game (Special Edition)"
    );
    assert_eq!(
        canonical_name("Game (USA) (Rev 1) (Alt-Title)", &config),
        "Game (Alt-Title)"
    );
}

#[test]
fn test_canonical_name_keeps_attributes_before_region() {
    let config = EngineConfig::default();
    assert_eq!(
        canonical_name("Game (Disc 1) (Japan) (Bonus)", &config),
        "Game (Disc 1) (Bonus)"
    );
}

#[test]
fn test_canonical_name_without_region() {
    let config = EngineConfig::default();
    assert_eq!(canonical_name("Tool (Rev 1) (Homebrew)", &config), "Tool (Homebrew)");
    assert_eq!(canonical_name("Plain Title", &config), "Plain Title");
}

#[test]
fn test_canonical_name_strips_trailing_periods() {
    let config = EngineConfig::default();
    assert_eq!(canonical_name("Super Mario Bros. (World)", &config), "Super Mario Bros");
    assert_eq!(canonical_name("Dr. Mario (Japan) (Rev A)", &config), "Dr. Mario");
}

#[test]
fn test_canonical_name_is_deterministic() {
    let config = EngineConfig::default();
    let names = [
        "Game (Japan) (Special Edition) (Rev 1)",
        "Another (Europe) (Fr,De) (Promo)",
        "Third (Proto) (USA)",
    ];
    for name in names {
        assert_eq!(canonical_name(name, &config), canonical_name(name, &config));
    }
    let e = entry(&[("X (Japan) (Deluxe)", Some("J")), ("X (Korea) (Deluxe)", Some("K"))]);
    assert_eq!(resolve(&e, &config), resolve(&e, &config));
}

#[test]
fn test_split_of_resolved_name_keeps_base_title() {
    let config = EngineConfig::default();
    for name in [
        "Game (Japan) (Special Edition)",
        "Pokemon - Red Version (USA, Europe) (SGB Enhanced)",
        "Title (Disc 1) (Europe)",
    ] {
        let resolved = canonical_name(name, &config);
        assert_eq!(
            split_attributes(&resolved).base_title,
            split_attributes(name).base_title
        );
    }
}

#[test]
fn test_custom_skip_list() {
    let mut config = EngineConfig::default();
    config.naming.skipped_prefixes = vec!["Special".to_string()];
    assert_eq!(
        canonical_name("Game (Japan) (Special Edition) (Limited)", &config),
        "Game (Limited)"
    );
}
