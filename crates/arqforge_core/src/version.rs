//! Maven version ordering.
//!
//! Resolver candidates are presented oldest → newest and the last entry is the “latest”. Maven
//! versions are not semver (`1.0.0.Alpha5`, `3.1.4`, `6.0.0.Final`, `5.14.10`), so ordering follows the
//! Maven rules in simplified form:
//!
//! - a version splits into items on `.`, `-`, `_` and on digit/letter transitions,
//! - numeric items compare numerically and rank above qualifiers,
//! - qualifiers rank `alpha < beta < milestone < rc < snapshot < release < sp`, where release is the
//!   empty qualifier and its spellings `ga`, `final`, `release`; unknown qualifiers sort lexically
//!   after `sp`,
//! - zeros in front of a qualifier and trailing release qualifiers are dropped, so `1.0` == `1.0.0` ==
//!   `1.0.Final` and `1.0.0-SNAPSHOT` < `1.0.0`,
//! - a shorter version is padded with “nothing”, which ranks like the release qualifier.
//!
//! ## Examples
//! ```rust
//! use arqforge_core::version::{sort_versions, MavenVersion};
//!
//! assert!(MavenVersion::parse("1.0.0.Alpha5") < MavenVersion::parse("1.0.0.CR1"));
//! assert!(MavenVersion::parse("1.0.0.CR1") < MavenVersion::parse("1.0.0.Final"));
//! assert!(MavenVersion::parse("4.8.2") < MavenVersion::parse("4.10"));
//!
//! let mut versions = vec!["1.2".to_string(), "1.0".to_string(), "1.1".to_string()];
//! sort_versions(&mut versions);
//! assert_eq!(versions, ["1.0", "1.1", "1.2"]);
//! ```

use std::cmp::Ordering;
use std::fmt;

const RELEASE_RANK: u8 = 5;

/// One component of a parsed version.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    /// Digits with leading zeros stripped; compared by length then lexically so huge numbers don't overflow.
    Number(String),
    /// A qualifier with its rank; `text` only matters for unknown qualifiers.
    Qualifier { rank: u8, text: String },
}

impl Item {
    fn number(digits: &str) -> Item {
        let trimmed = digits.trim_start_matches('0');
        Item::Number(trimmed.to_string())
    }

    fn qualifier(text: &str, followed_by_digit: bool) -> Item {
        let lower = text.to_ascii_lowercase();
        let rank = match lower.as_str() {
            "alpha" => 0,
            "a" if followed_by_digit => 0,
            "beta" => 1,
            "b" if followed_by_digit => 1,
            "milestone" => 2,
            "m" if followed_by_digit => 2,
            "rc" | "cr" => 3,
            "snapshot" => 4,
            "" | "ga" | "final" | "release" => RELEASE_RANK,
            "sp" => 6,
            _ => 7,
        };
        Item::Qualifier { rank, text: lower }
    }

    fn is_zero(&self) -> bool {
        matches!(self, Item::Number(digits) if digits.is_empty())
    }

    fn is_release(&self) -> bool {
        matches!(self, Item::Qualifier { rank, .. } if *rank == RELEASE_RANK)
    }

    /// Compare against a missing item (the other version ran out of components).
    ///
    /// A missing item ranks exactly like the release qualifier: above pre-release qualifiers, below
    /// `sp`, unknown qualifiers and every number.
    fn cmp_to_nothing(&self) -> Ordering {
        match self {
            Item::Number(_) => Ordering::Greater,
            Item::Qualifier { rank, .. } => rank.cmp(&RELEASE_RANK),
        }
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Item::Number(a), Item::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Item::Number(_), Item::Qualifier { .. }) => Ordering::Greater,
            (Item::Qualifier { .. }, Item::Number(_)) => Ordering::Less,
            (Item::Qualifier { rank: ra, text: ta }, Item::Qualifier { rank: rb, text: tb }) => {
                ra.cmp(rb).then_with(|| if *ra == 7 { ta.cmp(tb) } else { Ordering::Equal })
            }
        }
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A parsed, comparable Maven version. Keeps the original spelling for display.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    raw: String,
    items: Vec<Item>,
}

impl MavenVersion {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            items: split_items(raw.trim()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn split_items(raw: &str) -> Vec<Item> {
    let chars: Vec<char> = raw.chars().collect();
    let mut items = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if matches!(c, '.' | '-' | '_') {
            i += 1;
            continue;
        }
        let start = i;
        if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[start..i].iter().collect();
            items.push(Item::number(&digits));
        } else {
            while i < chars.len() && !chars[i].is_ascii_digit() && !matches!(chars[i], '.' | '-' | '_') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            let followed_by_digit = chars.get(i).is_some_and(|c| c.is_ascii_digit());
            items.push(Item::qualifier(&text, followed_by_digit));
        }
    }

    normalize(items)
}

/// Drop zero runs that precede a qualifier or the end, then trailing release qualifiers, so that
/// `1`, `1.0`, `1.0.0.Final` share one normal form and `1.0.0-SNAPSHOT` becomes `1-SNAPSHOT`.
fn normalize(items: Vec<Item>) -> Vec<Item> {
    let mut out: Vec<Item> = Vec::with_capacity(items.len());
    let mut i = 0;
    while i < items.len() {
        if items[i].is_zero() {
            let run_end = items[i..].iter().position(|it| !it.is_zero()).map_or(items.len(), |o| i + o);
            let keep = matches!(items.get(run_end), Some(Item::Number(_)));
            if keep {
                out.extend(items[i..run_end].iter().cloned());
            }
            i = run_end;
        } else {
            out.push(items[i].clone());
            i += 1;
        }
    }

    while out.last().is_some_and(|it| it.is_release() || it.is_zero()) {
        out.pop();
    }
    out
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        for idx in 0..len {
            let ord = match (self.items.get(idx), other.items.get(idx)) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(a), None) => a.cmp_to_nothing(),
                (None, Some(b)) => b.cmp_to_nothing().reverse(),
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Sort version strings oldest → newest and drop duplicates that compare equal.
///
/// Of two equal spellings the first one seen is kept.
pub fn sort_versions(versions: &mut Vec<String>) {
    versions.sort_by(|a, b| MavenVersion::parse(a).cmp(&MavenVersion::parse(b)));
    versions.dedup_by(|a, b| MavenVersion::parse(a) == MavenVersion::parse(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> MavenVersion {
        MavenVersion::parse(s)
    }

    #[test]
    fn test_numeric_segments_compare_numerically() {
        assert!(v("4.8.2") < v("4.10"));
        assert!(v("5.9") < v("5.14.10"));
        assert!(v("1.0") < v("1.0.1"));
    }

    #[test]
    fn test_trailing_zeros_and_release_qualifiers_are_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("1.0"), v("1.0.Final"));
        assert_eq!(v("6.0.0.GA"), v("6.0.0.Final"));
    }

    #[test]
    fn test_qualifier_order() {
        let ordered = [
            "1.0.0.Alpha1",
            "1.0.0.Alpha5",
            "1.0.0.Beta1",
            "1.0.0.M2",
            "1.0.0.CR1",
            "1.0.0-SNAPSHOT",
            "1.0.0.Final",
            "1.0.0.SP1",
        ];
        for pair in ordered.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_number_beats_qualifier() {
        assert!(v("1.0-alpha") < v("1.0.1"));
    }

    #[test]
    fn test_huge_numbers_do_not_overflow() {
        assert!(v("1.99999999999999999999999") < v("1.100000000000000000000000"));
    }

    #[test]
    fn test_sort_versions_dedups_equal_spellings() {
        let mut versions = vec!["1.1".to_string(), "1.0".to_string(), "1.0.0".to_string()];
        sort_versions(&mut versions);
        assert_eq!(versions, ["1.0", "1.1"]);
    }

    #[test]
    fn test_display_keeps_original_spelling() {
        assert_eq!(v("1.0.0.Final").to_string(), "1.0.0.Final");
    }
}
