//! Record filters: which records the filtered view shows.

use std::collections::BTreeSet;

use super::field::{ClassNumber, ProjectTeam, Tag};
use super::record::Record;

/// The predicate behind the filtered view.
///
/// A closed value type rather than a boxed closure, so commands carrying a
/// filter stay comparable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordFilter {
    /// Show every record.
    #[default]
    All,

    /// Show records satisfying every present criterion.
    Matching(Criteria),
}

/// Search criteria for `find`. Empty parts are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Any keyword equal to a whole word of the name, ignoring case.
    pub name_keywords: Vec<String>,
    pub class: Option<ClassNumber>,
    pub team: Option<ProjectTeam>,
    /// Any of these tags.
    pub tags: BTreeSet<Tag>,
}

impl Criteria {
    pub fn is_empty(&self) -> bool {
        self.name_keywords.is_empty()
            && self.class.is_none()
            && self.team.is_none()
            && self.tags.is_empty()
    }

    fn matches(&self, record: &Record) -> bool {
        let name_ok = self.name_keywords.is_empty()
            || self.name_keywords.iter().any(|keyword| {
                record
                    .name
                    .words()
                    .any(|word| word.to_lowercase() == keyword.to_lowercase())
            });
        let class_ok = self.class.as_ref().is_none_or(|c| *c == record.class);
        let team_ok = self.team.as_ref().is_none_or(|t| {
            t.as_str().to_lowercase() == record.team.as_str().to_lowercase()
        });
        let tags_ok = self.tags.is_empty() || !self.tags.is_disjoint(&record.tags);

        name_ok && class_ok && team_ok && tags_ok
    }
}

impl RecordFilter {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Matching(criteria) => criteria.matches(record),
        }
    }
}
