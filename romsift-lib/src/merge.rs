use std::collections::{BTreeMap, HashSet};

use romsift_dat::Category;
use serde::Serialize;

/// Identity of a merge group: canonical name plus region rank.
///
/// Ordering is by name first, so iterating a [`MergeMap`] lists groups
/// alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MergeKey {
    pub canonical_name: String,
    pub region_rank: u32,
}

impl MergeKey {
    pub fn new(canonical_name: impl Into<String>, region_rank: u32) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            region_rank,
        }
    }
}

/// A set of on-disk files that all represent the same logical game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeGroup {
    pub canonical_name: String,
    pub region_rank: u32,
    /// File names (with extension) in insertion order.
    pub members: Vec<String>,
    /// Most significant category among the contributing entries.
    pub category: Category,
    /// Indices of the catalog entries that contributed to this group.
    #[serde(skip)]
    pub sources: Vec<usize>,
}

impl MergeGroup {
    fn new(key: &MergeKey, category: Category) -> Self {
        Self {
            canonical_name: key.canonical_name.clone(),
            region_rank: key.region_rank,
            members: Vec::new(),
            category,
            sources: Vec::new(),
        }
    }

    pub fn key(&self) -> MergeKey {
        MergeKey::new(self.canonical_name.clone(), self.region_rank)
    }
}

/// Deterministically ordered map of merge groups.
///
/// A file is a member of at most one group.
#[derive(Debug, Clone, Default)]
pub struct MergeMap {
    groups: BTreeMap<MergeKey, MergeGroup>,
    claimed: HashSet<String>,
}

/// A merge group that had to move to a new key to resolve a name conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRename {
    pub from: MergeKey,
    pub to: MergeKey,
}

impl MergeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &MergeKey) -> Option<&MergeGroup> {
        self.groups.get(key)
    }

    /// Groups in key order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeGroup> {
        self.groups.values()
    }

    /// Whether the file already belongs to some group.
    pub fn contains_file(&self, file: &str) -> bool {
        self.claimed.contains(file)
    }

    /// First group (in key order) with the given canonical name that was not
    /// contributed by catalog entry `source`.
    pub fn find_conflict(&self, canonical_name: &str, source: usize) -> Option<MergeKey> {
        self.groups
            .iter()
            .find(|(key, group)| {
                key.canonical_name == canonical_name && !group.sources.contains(&source)
            })
            .map(|(key, _)| key.clone())
    }

    /// Ensure a group exists for `key` and record `source` as a contributor.
    pub fn touch(&mut self, key: &MergeKey, category: Category, source: usize) {
        let group = self
            .groups
            .entry(key.clone())
            .or_insert_with(|| MergeGroup::new(key, category));
        group.category = group.category.most_significant(category);
        if !group.sources.contains(&source) {
            group.sources.push(source);
        }
    }

    /// Add a file to a group, creating the group if needed.
    ///
    /// Returns `false` and leaves the map unchanged if the file is already a
    /// member of any group.
    pub fn add_member(
        &mut self,
        key: &MergeKey,
        file: impl Into<String>,
        category: Category,
        source: usize,
    ) -> bool {
        let file = file.into();
        if self.claimed.contains(&file) {
            return false;
        }
        self.touch(key, category, source);
        if let Some(group) = self.groups.get_mut(key) {
            self.claimed.insert(file.clone());
            group.members.push(file);
        }
        true
    }

    /// Move the group at `from` to the same rank under `new_name`.
    ///
    /// If a group already exists at the target key the two are merged, the
    /// existing members first. Returns the new key, or `None` if no group
    /// exists at `from`.
    pub fn rekey(&mut self, from: &MergeKey, new_name: &str) -> Option<GroupRename> {
        let mut group = self.groups.remove(from)?;
        let to = MergeKey::new(new_name, from.region_rank);
        group.canonical_name = to.canonical_name.clone();

        match self.groups.get_mut(&to) {
            Some(existing) => {
                existing.category = existing.category.most_significant(group.category);
                existing.members.append(&mut group.members);
                for source in group.sources {
                    if !existing.sources.contains(&source) {
                        existing.sources.push(source);
                    }
                }
            }
            None => {
                self.groups.insert(to.clone(), group);
            }
        }

        Some(GroupRename {
            from: from.clone(),
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_member_claims_file_once() {
        let mut map = MergeMap::new();
        let a = MergeKey::new("Game", 0);
        let b = MergeKey::new("Other", 2);
        assert!(map.add_member(&a, "Game (USA).zip", Category::Games, 0));
        assert!(!map.add_member(&b, "Game (USA).zip", Category::Games, 1));
        assert!(map.get(&b).is_none());
        assert_eq!(map.len(), 1);
        assert!(map.contains_file("Game (USA).zip"));
    }

    #[test]
    fn test_iteration_is_ordered() {
        let mut map = MergeMap::new();
        map.add_member(&MergeKey::new("Zelda", 0), "z.zip", Category::Games, 0);
        map.add_member(&MergeKey::new("Asteroids", 5), "a.zip", Category::Games, 1);
        map.add_member(&MergeKey::new("Asteroids", 0), "b.zip", Category::Games, 2);
        let names: Vec<_> = map
            .iter()
            .map(|g| (g.canonical_name.as_str(), g.region_rank))
            .collect();
        assert_eq!(names, vec![("Asteroids", 0), ("Asteroids", 5), ("Zelda", 0)]);
    }

    #[test]
    fn test_category_keeps_most_significant() {
        let mut map = MergeMap::new();
        let key = MergeKey::new("Disc", 0);
        map.add_member(&key, "a.zip", Category::Coverdiscs, 0);
        map.add_member(&key, "b.zip", Category::Demos, 1);
        assert_eq!(map.get(&key).map(|g| g.category), Some(Category::Demos));
    }

    #[test]
    fn test_find_conflict_ignores_own_source() {
        let mut map = MergeMap::new();
        let key = MergeKey::new("Puzzle", 0);
        map.add_member(&key, "Puzzle (USA).zip", Category::Games, 3);
        assert_eq!(map.find_conflict("Puzzle", 3), None);
        assert_eq!(map.find_conflict("Puzzle", 4), Some(key));
        assert_eq!(map.find_conflict("Other", 4), None);
    }

    #[test]
    fn test_rekey_moves_group() {
        let mut map = MergeMap::new();
        let key = MergeKey::new("Puzzle", 0);
        map.add_member(&key, "Puzzle (USA).zip", Category::Games, 0);

        let rename = map.rekey(&key, "Puzzle (USA)").unwrap();
        assert_eq!(rename.to, MergeKey::new("Puzzle (USA)", 0));
        assert!(map.get(&key).is_none());
        let group = map.get(&rename.to).unwrap();
        assert_eq!(group.canonical_name, "Puzzle (USA)");
        assert_eq!(group.members, vec!["Puzzle (USA).zip"]);
        assert!(map.contains_file("Puzzle (USA).zip"));
    }

    #[test]
    fn test_rekey_merges_into_existing() {
        let mut map = MergeMap::new();
        let old = MergeKey::new("Game", 1);
        let target = MergeKey::new("Game (Japan)", 1);
        map.add_member(&target, "b.zip", Category::Games, 1);
        map.add_member(&old, "a.zip", Category::Games, 0);

        map.rekey(&old, "Game (Japan)").unwrap();
        assert_eq!(map.len(), 1);
        let group = map.get(&target).unwrap();
        assert_eq!(group.members, vec!["b.zip", "a.zip"]);
        assert_eq!(group.sources, vec![1, 0]);
    }

    #[test]
    fn test_rekey_missing_group() {
        let mut map = MergeMap::new();
        assert!(map.rekey(&MergeKey::new("Nothing", 0), "Else").is_none());
    }

    #[test]
    fn test_touch_creates_empty_group() {
        let mut map = MergeMap::new();
        let key = MergeKey::new("Missing", 99);
        map.touch(&key, Category::Games, 0);
        assert_eq!(map.get(&key).map(|g| g.members.len()), Some(0));
    }
}
