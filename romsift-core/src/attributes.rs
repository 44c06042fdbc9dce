//! Splitting of No-Intro/Redump release names into a base title and a flat
//! list of attribute tags.
//!
//! ```text
//! Game Title (USA, Europe) (Rev 1) [b]
//! ^^^^^^^^^^  ^^^  ^^^^^^   ^^^^^  ^^^
//! base title  attributes, in order
//! ```

/// A release name decomposed into its base title and attribute tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantName {
    /// Title text before the first parenthesized group.
    pub base_title: String,
    /// Attribute tags in the order they appear. Comma- and plus-joined groups
    /// such as `(USA, Europe)` or `(En+Fr)` are flattened.
    pub attributes: Vec<String>,
}

impl VariantName {
    /// Re-join the base title and attributes into a display name.
    ///
    /// Every attribute gets its own parenthesized group, so
    /// `Game (USA, Europe)` comes back as `Game (USA) (Europe)`.
    pub fn display(&self) -> String {
        let mut name = self.base_title.clone();
        for attr in &self.attributes {
            name.push_str(" (");
            name.push_str(attr);
            name.push(')');
        }
        name
    }

    /// The attribute at `position` counting the base title as position 0.
    ///
    /// `position(1)` is the first attribute after the title, which is where
    /// the region usually sits.
    pub fn position(&self, position: usize) -> Option<&str> {
        match position {
            0 => Some(self.base_title.as_str()),
            n => self.attributes.get(n - 1).map(String::as_str),
        }
    }
}

/// Split a release name into base title and attributes.
///
/// Never fails: unbalanced parentheses still produce a best-effort split.
/// The first segment outside any parentheses is the base title, even when a
/// parenthesized group comes first. Other unparenthesized text (for example
/// `[b]` dump flags) is kept as an attribute.
///
/// # Examples
///
/// ```
/// use romsift_core::attributes::split_attributes;
///
/// let v = split_attributes("Game Title (USA, Europe) (Rev 1)");
/// assert_eq!(v.base_title, "Game Title");
/// assert_eq!(v.attributes, vec!["USA", "Europe", "Rev 1"]);
/// ```
pub fn split_attributes(name: &str) -> VariantName {
    let segments = segments(name);

    let title_pos = segments
        .iter()
        .position(|(_, inside)| !inside)
        .unwrap_or(0);

    let mut result = VariantName::default();
    for (i, (text, _)) in segments.into_iter().enumerate() {
        if i == title_pos {
            result.base_title = text;
            continue;
        }
        if text.contains(',') || text.contains('+') {
            result.attributes.extend(
                text.split([',', '+'])
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string),
            );
        } else {
            result.attributes.push(text);
        }
    }

    result
}

/// Cut a name at every parenthesis, remembering whether each piece sat
/// inside a group. Pieces are trimmed and empty ones dropped.
fn segments(name: &str) -> Vec<(String, bool)> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut depth = 0u32;

    let mut flush = |current: &mut String, inside: bool| {
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            out.push((trimmed.to_string(), inside));
        }
        current.clear();
    };

    for ch in name.chars() {
        match ch {
            '(' => {
                flush(&mut current, depth > 0);
                depth += 1;
            }
            ')' => {
                flush(&mut current, depth > 0);
                depth = depth.saturating_sub(1);
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, depth > 0);

    out
}

#[cfg(test)]
#[path = "tests/attributes_tests.rs"]
mod tests;
