use crate::config::{RegionTable, UNKNOWN_RANK};

/// Maps region tokens to preference ranks (lower is preferred).
///
/// A thin view over a [`RegionTable`]; cheap to copy and free of side effects.
#[derive(Debug, Clone, Copy)]
pub struct RegionRanker<'a> {
    table: &'a RegionTable,
}

impl<'a> RegionRanker<'a> {
    pub fn new(table: &'a RegionTable) -> Self {
        Self { table }
    }

    /// Rank of a region token, or [`UNKNOWN_RANK`] if the token is not in the
    /// table. Tokens are case-sensitive.
    pub fn rank(&self, token: &str) -> u32 {
        self.table
            .ranks
            .get(token)
            .copied()
            .unwrap_or(UNKNOWN_RANK)
    }

    /// Find the best (lowest) rank among a sequence of optional region tokens.
    ///
    /// Returns `(rank, index)` of the first token achieving the minimum, so
    /// ties always go to the earliest position. Missing tokens rank as
    /// unknown. Returns `None` only for an empty sequence.
    pub fn best_region<'t, I>(&self, tokens: I) -> Option<(u32, usize)>
    where
        I: IntoIterator<Item = Option<&'t str>>,
    {
        let mut best: Option<(u32, usize)> = None;
        for (index, token) in tokens.into_iter().enumerate() {
            let rank = token.map_or(UNKNOWN_RANK, |t| self.rank(t));
            match best {
                Some((best_rank, _)) if rank >= best_rank => {}
                _ => best = Some((rank, index)),
            }
        }
        best
    }

    /// Whether the token appears in the region priority ordering list.
    pub fn is_region_token(&self, token: &str) -> bool {
        self.table.priority.iter().any(|p| p == token)
    }

    /// Position in the priority ordering list of the best-placed attribute,
    /// or [`UNKNOWN_RANK`] if no attribute is listed.
    pub fn zone_rank<S: AsRef<str>>(&self, attributes: &[S]) -> u32 {
        self.table
            .priority
            .iter()
            .position(|p| attributes.iter().any(|a| a.as_ref() == p))
            .map_or(UNKNOWN_RANK, |pos| pos as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RegionTable {
        RegionTable::default()
    }

    #[test]
    fn test_rank_known_and_unknown() {
        let table = table();
        let ranker = RegionRanker::new(&table);
        assert_eq!(ranker.rank("USA"), 0);
        assert_eq!(ranker.rank("Europe"), 2);
        assert_eq!(ranker.rank("J"), 5);
        assert_eq!(ranker.rank("Atlantis"), UNKNOWN_RANK);
        assert_eq!(ranker.rank("usa"), UNKNOWN_RANK);
    }

    #[test]
    fn test_best_region_picks_minimum() {
        let table = table();
        let ranker = RegionRanker::new(&table);
        let tokens = [Some("Japan"), Some("Europe"), Some("USA")];
        assert_eq!(ranker.best_region(tokens), Some((0, 2)));
    }

    #[test]
    fn test_best_region_ties_go_to_first_occurrence() {
        let table = table();
        let ranker = RegionRanker::new(&table);
        // "World", "U" and "USA" all rank 0
        let tokens = [Some("Japan"), Some("USA"), Some("World"), Some("U")];
        assert_eq!(ranker.best_region(tokens), Some((0, 1)));

        let tokens = [Some("U"), Some("World"), Some("USA")];
        assert_eq!(ranker.best_region(tokens), Some((0, 0)));
    }

    #[test]
    fn test_best_region_missing_and_empty() {
        let table = table();
        let ranker = RegionRanker::new(&table);
        assert_eq!(ranker.best_region([None, None]), Some((UNKNOWN_RANK, 0)));
        assert_eq!(ranker.best_region([None, Some("France")]), Some((6, 1)));
        assert_eq!(ranker.best_region(std::iter::empty()), None);
    }

    #[test]
    fn test_zone_rank_uses_priority_list() {
        let table = table();
        let ranker = RegionRanker::new(&table);
        assert_eq!(ranker.zone_rank(&["USA", "Rev 1"]), 1);
        assert_eq!(ranker.zone_rank(&["Japan", "USA"]), 1);
        assert_eq!(ranker.zone_rank(&["World"]), 0);
        assert_eq!(ranker.zone_rank(&["Demo"]), UNKNOWN_RANK);
        assert_eq!(ranker.zone_rank::<&str>(&[]), UNKNOWN_RANK);
    }

    #[test]
    fn test_is_region_token() {
        let table = table();
        let ranker = RegionRanker::new(&table);
        assert!(ranker.is_region_token("USA"));
        assert!(ranker.is_region_token("En"));
        assert!(!ranker.is_region_token("U"));
        assert!(!ranker.is_region_token("Rev 1"));
    }
}
