use super::*;

#[test]
fn test_split_extension() {
    assert_eq!(split_extension("Game (USA).zip"), ("Game (USA)", ".zip"));
    assert_eq!(split_extension("Game (USA).7z"), ("Game (USA)", ".7z"));
    assert_eq!(split_extension("Game (v1.1)"), ("Game (v1.1)", ""));
    assert_eq!(split_extension("Super Mario Bros."), ("Super Mario Bros.", ""));
    assert_eq!(
        split_extension("Super Mario Bros..zip"),
        ("Super Mario Bros.", ".zip")
    );
    assert_eq!(split_extension("Dr. Mario (World)"), ("Dr. Mario (World)", ""));
    assert_eq!(split_extension(".zip"), (".zip", ""));
}

#[test]
fn test_is_zip_name() {
    assert!(is_zip_name("Game (USA).zip"));
    assert!(is_zip_name("Game (USA).ZIP"));
    assert!(!is_zip_name("Game (USA).sfc"));
    assert!(!is_zip_name("Game (USA)"));
}
