//! Argument tokenizer: splits `n/Alex t/a t/b` into prefix → values.

use std::collections::HashMap;
use std::fmt;

use super::ParseError;

/// A short literal marking the start of one argument, e.g. `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(literal: &'static str) -> Self {
        Self(literal)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Tokenized arguments: the preamble plus every value seen for each recognized prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first recognized prefix, trimmed.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// The last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    /// Every value given for `prefix`, in order of appearance.
    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Whether a required `prefix` is absent or given only whitespace.
    pub fn lacks_value(&self, prefix: Prefix) -> bool {
        !self.contains(prefix) || self.value(prefix).is_some_and(|v| v.trim().is_empty())
    }

    /// Single-valued prefixes among `prefixes` that appear more than once.
    pub fn duplicated(&self, prefixes: &[Prefix]) -> Vec<Prefix> {
        prefixes
            .iter()
            .copied()
            .filter(|p| self.all_values(*p).len() > 1)
            .collect()
    }

    /// Fails with a usage error naming every prefix in `prefixes` given more than once.
    pub fn verify_no_duplicate_prefixes(
        &self,
        prefixes: &[Prefix],
        usage: &'static str,
    ) -> Result<(), ParseError> {
        let duplicated = self.duplicated(prefixes);
        if duplicated.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = duplicated.iter().map(|p| p.as_str()).collect();
        Err(ParseError::usage(
            format!(
                "Multiple values specified for the following single-valued field(s): {}",
                names.join(" ")
            ),
            usage,
        ))
    }
}

/// Splits `args` on the given prefixes.
///
/// A prefix only counts at the start of `args` or right after whitespace, so
/// `pt/` is never mistaken for `t/`. Unrecognized prefixes stay literal text.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let mut positions: Vec<(usize, Prefix)> = prefixes
        .iter()
        .flat_map(|&prefix| find_prefix(args, prefix).map(move |at| (at, prefix)))
        .collect();
    positions.sort_by_key(|&(at, _)| at);

    let mut map = ArgumentMultimap {
        preamble: args[..positions.first().map_or(args.len(), |&(at, _)| at)]
            .trim()
            .to_string(),
        values: HashMap::new(),
    };

    for (i, &(at, prefix)) in positions.iter().enumerate() {
        let start = at + prefix.as_str().len();
        let end = positions.get(i + 1).map_or(args.len(), |&(next, _)| next);
        map.values
            .entry(prefix)
            .or_default()
            .push(args[start..end].trim().to_string());
    }

    map
}

fn find_prefix(args: &str, prefix: Prefix) -> impl Iterator<Item = usize> + '_ {
    args.match_indices(prefix.as_str())
        .map(|(at, _)| at)
        .filter(move |&at| at == 0 || args[..at].ends_with(char::is_whitespace))
}
