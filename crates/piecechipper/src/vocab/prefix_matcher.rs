//! # Longest-Prefix Symbol Matcher

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};

use crate::{
    PCError,
    PCResult,
    alloc::string::ToString,
};

/// Finds the longest symbol from a fixed set which prefixes a text.
///
/// Backed by an anchored, leftmost-longest Aho-Corasick automaton; so the
/// cost of a lookup is bounded by the match length, not the symbol count.
#[derive(Clone, Default)]
pub struct PrefixMatcher {
    /// `None` when there are no symbols.
    ac: Option<AhoCorasick>,
}

impl core::fmt::Debug for PrefixMatcher {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("PrefixMatcher")
            .field("symbols", &self.len())
            .finish()
    }
}

impl PrefixMatcher {
    /// Build a matcher over `symbols`.
    ///
    /// Empty symbols are ignored; they can never be a positive-length match.
    pub fn new<I, S>(symbols: I) -> PCResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = symbols
            .into_iter()
            .filter(|s| !s.as_ref().is_empty())
            .map(|s| s.as_ref().to_string())
            .collect::<crate::alloc::vec::Vec<_>>();

        if symbols.is_empty() {
            return Ok(Self::default());
        }

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .start_kind(StartKind::Anchored)
            .build(&symbols)
            .map_err(|err| PCError::PrefixMatcher(err.to_string()))?;

        Ok(Self { ac: Some(ac) })
    }

    /// The number of symbols in the matcher.
    pub fn len(&self) -> usize {
        self.ac.as_ref().map_or(0, |ac| ac.patterns_len())
    }

    /// Are there no symbols?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the byte length of the longest symbol prefixing `text`, or 0.
    pub fn find_prefix_len(
        &self,
        text: &str,
    ) -> usize {
        match &self.ac {
            Some(ac) => ac
                .find(Input::new(text).anchored(Anchored::Yes))
                .map_or(0, |m| m.end()),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alloc::vec::Vec, support::traits::static_is_send_sync_check};

    #[test]
    fn test_empty_matcher() {
        let matcher = PrefixMatcher::new(Vec::<&str>::new()).unwrap();
        assert!(matcher.is_empty());
        assert_eq!(matcher.find_prefix_len("anything"), 0);
        assert_eq!(matcher.find_prefix_len(""), 0);

        let matcher = PrefixMatcher::new([""]).unwrap();
        assert!(matcher.is_empty());
        assert_eq!(matcher.find_prefix_len("anything"), 0);
    }

    #[test]
    fn test_longest_prefix() {
        let matcher = PrefixMatcher::new([
            "<td>",
            "<s>",
            "</s>",
            "<start_of_turn>",
            "<start",
            "▁▁",
            "▁▁▁",
            "▁▁▁▁▁▁",
        ])
        .unwrap();
        static_is_send_sync_check(&matcher);
        assert_eq!(matcher.len(), 8);

        assert_eq!(matcher.find_prefix_len("<td>"), 4);
        assert_eq!(matcher.find_prefix_len("<s>"), 3);
        assert_eq!(matcher.find_prefix_len("</s>"), 4);
        assert_eq!(matcher.find_prefix_len("<start_of_turn>"), 15);
        assert_eq!(matcher.find_prefix_len("<start_of_turn!"), 6);
        assert_eq!(matcher.find_prefix_len("▁▁"), 6);
        assert_eq!(matcher.find_prefix_len("▁▁▁▁"), 9);
        assert_eq!(matcher.find_prefix_len("▁▁▁▁▁▁▁"), 18);
        assert_eq!(matcher.find_prefix_len("bob"), 0);
        assert_eq!(matcher.find_prefix_len("🤨"), 0);
        assert_eq!(matcher.find_prefix_len(""), 0);
    }

    #[test]
    fn test_matches_only_at_start() {
        let matcher = PrefixMatcher::new(["<td>"]).unwrap();
        assert_eq!(matcher.find_prefix_len("x<td>"), 0);
        assert_eq!(matcher.find_prefix_len("<td><td>"), 4);
    }
}
