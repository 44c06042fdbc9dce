/// A clone with no exact or substitution match, offered for a decision.
#[derive(Debug, Clone, Copy)]
pub struct Ambiguity<'a> {
    /// The clone name that has no file
    pub missing: &'a str,
    /// All clone names of the entry, for context
    pub clones: &'a [&'a str],
    /// Files sharing the clone's title prefix that nothing has claimed yet
    pub candidates: &'a [String],
}

/// Answer to an [`Ambiguity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Use `candidates[i]`
    Candidate(usize),
    /// Use a file typed by name; `.zip` is assumed when no extension is given
    Literal(String),
    /// Leave this clone unmatched
    Skip,
    /// Leave this and every later ambiguous clone unmatched
    SkipAll,
}

/// Source of decisions for ambiguous matches, e.g. an interactive prompt.
pub trait Disambiguator {
    fn choose(&mut self, ambiguity: &Ambiguity<'_>) -> Decision;
}

impl<F> Disambiguator for F
where
    F: FnMut(&Ambiguity<'_>) -> Decision,
{
    fn choose(&mut self, ambiguity: &Ambiguity<'_>) -> Decision {
        self(ambiguity)
    }
}

/// Skips every ambiguous clone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverAsk;

impl Disambiguator for NeverAsk {
    fn choose(&mut self, _ambiguity: &Ambiguity<'_>) -> Decision {
        Decision::Skip
    }
}
