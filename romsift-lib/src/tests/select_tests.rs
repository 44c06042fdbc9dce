use super::*;
use crate::merge::MergeKey;
use romsift_core::UNKNOWN_RANK;

fn config() -> EngineConfig {
    EngineConfig::default()
}

#[test]
fn test_revision_beats_plain_and_demo() {
    let members = ["Game (Demo).zip", "Game (USA).zip", "Game (USA)(Rev 1).zip"];
    assert_eq!(
        select_best(&members, &config()).as_deref(),
        Some("Game (USA)(Rev 1).zip")
    );
}

#[test]
fn test_score_variant() {
    let c = config();
    assert_eq!(
        score_variant("Game (USA) (Rev 1).zip", &c),
        VariantScore {
            zone_rank: 1,
            score: 130
        }
    );
    assert_eq!(score_variant("Game (Europe) (v1.1).zip", &c).score, 130);
    assert_eq!(score_variant("Game (Japan) (Beta 2).zip", &c).score, 50);
    assert_eq!(score_variant("Game (Japan) (Proto).zip", &c).score, 50);
    assert_eq!(score_variant("Game (USA) (Virtual Console).zip", &c).score, 90);
    assert_eq!(score_variant("Game (USA) (Sample).zip", &c).score, 10);
    assert_eq!(score_variant("Game (Demo).zip", &c).zone_rank, UNKNOWN_RANK);
}

#[test]
fn test_markers_need_word_boundary() {
    let c = config();
    // "Betamax" and "Revenge" are not prerelease or revision tags
    assert_eq!(score_variant("Game (USA) (Betamax).zip", &c).score, 100);
    assert_eq!(score_variant("Game (USA) (Revenge).zip", &c).score, 100);
    assert_eq!(score_variant("Game (USA) (Rev).zip", &c).score, 100);
    assert_eq!(score_variant("Game (USA) (version).zip", &c).score, 100);
}

#[test]
fn test_minimal_zone_rank_wins_over_score() {
    let members = ["Game (Japan) (Rev 2).zip", "Game (USA) (Beta).zip"];
    // USA beta (zone 1, score 50) beats Japan revision (zone 6, score 130)
    assert_eq!(
        select_best(&members, &config()).as_deref(),
        Some("Game (USA) (Beta).zip")
    );
}

#[test]
fn test_never_returns_non_minimal_zone() {
    let c = config();
    let groups: [&[&str]; 4] = [
        &["A (Europe).zip", "A (World).zip", "A (Japan) (Rev 1).zip"],
        &["B (Unknown).zip", "B (Fr).zip", "B (Demo).zip"],
        &["C (Korea) (v1.2).zip", "C (Korea).zip", "C (China) (Rev A).zip"],
        &["D.zip", "D (Sample).zip"],
    ];
    for members in groups {
        let chosen = select_best(members, &c).unwrap();
        let min_zone = members
            .iter()
            .map(|m| score_variant(m, &c).zone_rank)
            .min()
            .unwrap();
        assert_eq!(score_variant(&chosen, &c).zone_rank, min_zone, "{members:?}");
    }
}

#[test]
fn test_ties_go_to_first_sorted_file() {
    let members = ["Game (USA) (Alt 2).zip", "Game (USA) (Alt 1).zip"];
    assert_eq!(
        select_best(&members, &config()).as_deref(),
        Some("Game (USA) (Alt 1).zip")
    );
}

#[test]
fn test_order_of_members_does_not_matter() {
    let a = ["X (USA).zip", "X (USA) (Rev 1).zip", "X (Europe).zip"];
    let b = ["X (Europe).zip", "X (USA) (Rev 1).zip", "X (USA).zip"];
    assert_eq!(select_best(&a, &config()), select_best(&b, &config()));
}

#[test]
fn test_empty_group() {
    let members: [&str; 0] = [];
    assert_eq!(select_best(&members, &config()), None);
}

#[test]
fn test_custom_scoring() {
    let mut c = config();
    c.scoring.sample_markers = vec!["Kiosk".to_string()];
    assert_eq!(score_variant("Game (USA) (Kiosk).zip", &c).score, 10);
    assert_eq!(score_variant("Game (USA) (Demo).zip", &c).score, 100);
}

#[test]
fn test_custom_version_prefix() {
    let mut c = config();
    assert_eq!(score_variant("Game (USA) (v1.1).zip", &c).score, 130);

    c.scoring.version_prefix = "Ver ".to_string();
    assert_eq!(score_variant("Game (USA) (Ver 2).zip", &c).score, 130);
    assert_eq!(score_variant("Game (USA) (v1.1).zip", &c).score, 100);
}

#[test]
fn test_select_all_in_group_order() {
    let mut groups = MergeMap::new();
    let zelda = MergeKey::new("Zelda", 0);
    let mario = MergeKey::new("Mario", 0);
    groups.add_member(&zelda, "Zelda (USA).zip", Category::Games, 0);
    groups.add_member(&mario, "Mario (Japan).zip", Category::Games, 1);
    groups.add_member(&mario, "Mario (USA).zip", Category::Games, 1);
    groups.touch(&MergeKey::new("Empty", 99), Category::Games, 2);

    let picks = select_all(&groups, &config());
    let files: Vec<_> = picks.iter().map(|s| s.file.as_str()).collect();
    assert_eq!(files, vec!["Mario (USA).zip", "Zelda (USA).zip"]);
    assert_eq!(picks[0].members, 2);
}
