//! Core data model for TAHub.
//!
//! The [`Model`] owns the ordered student records, the filter behind the
//! filtered view, and the separate [`EventBook`] of timed events.

mod event;
mod field;
mod filter;
mod record;

pub use event::{EventBook, TIME_FORMAT, TimedEvent};
pub use field::{
    ClassNumber, Email, Github, InvalidField, Name, Phone, Progress, ProjectTeam, Remark,
    Repository, StudentId, Tag,
};
pub use filter::{Criteria, RecordFilter};
pub use record::Record;

#[cfg(test)]
pub(crate) use record::fixtures;

/// Store invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("a student with the same name or student ID already exists: {0}")]
    DuplicateRecord(String),

    #[error("student not found: {0}")]
    RecordNotFound(String),

    #[error("this event already exists: {0}")]
    DuplicateTimedEvent(String),

    #[error("no such event: {0}")]
    TimedEventNotFound(String),
}

pub type Result<T> = core::result::Result<T, ModelError>;

/// What `sort` orders records by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    StudentId,
    Class,
    Progress,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::StudentId => "student ID",
            Self::Class => "class",
            Self::Progress => "progress",
        }
    }
}

/// The record store and its live filtered view.
///
/// `visible` holds positions into `records` and is recomputed on every
/// mutation or filter change, so it never goes stale.
#[derive(Debug, Default)]
pub struct Model {
    records: Vec<Record>,
    filter: RecordFilter,
    visible: Vec<usize>,
    events: EventBook,
}

impl Model {
    /// Builds a model from loaded records and events, enforcing both uniqueness rules.
    pub fn new(records: Vec<Record>, events: Vec<event::TimedEvent>) -> Result<Self> {
        let mut model = Self {
            events: EventBook::from_events(events)?,
            ..Self::default()
        };
        for record in records {
            model.add_record(record)?;
        }
        Ok(model)
    }

    // ── Records ──

    /// The full ordered sequence, regardless of filter.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Whether a record with the same identity exists.
    pub fn has_record(&self, record: &Record) -> bool {
        self.records.iter().any(|r| r.is_same_student(record))
    }

    /// Appends `record`.
    ///
    /// Fails with [`ModelError::DuplicateRecord`] if the same student is already present.
    pub fn add_record(&mut self, record: Record) -> Result<()> {
        if self.has_record(&record) {
            return Err(ModelError::DuplicateRecord(record.label()));
        }
        self.records.push(record);
        self.refresh();
        Ok(())
    }

    /// Removes the record equal to `target`.
    pub fn remove_record(&mut self, target: &Record) -> Result<()> {
        let pos = self.position_of(target)?;
        self.records.remove(pos);
        self.refresh();
        Ok(())
    }

    /// Replaces `target` with `replacement` at the same position.
    ///
    /// `replacement` may keep `target`'s identity but must not collide with any other record.
    pub fn replace_record(&mut self, target: &Record, replacement: Record) -> Result<()> {
        let pos = self.position_of(target)?;
        let collides = self
            .records
            .iter()
            .enumerate()
            .any(|(i, r)| i != pos && r.is_same_student(&replacement));
        if collides {
            return Err(ModelError::DuplicateRecord(replacement.label()));
        }
        self.records[pos] = replacement;
        self.refresh();
        Ok(())
    }

    /// Stable reorder of the underlying sequence.
    pub fn sort_records(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self
                .records
                .sort_by_key(|r| r.name.as_str().to_lowercase()),
            SortKey::StudentId => self.records.sort_by(|a, b| a.student_id.cmp(&b.student_id)),
            // Unassigned students go last.
            SortKey::Class => self
                .records
                .sort_by(|a, b| {
                    (a.class.is_unassigned(), &a.class).cmp(&(b.class.is_unassigned(), &b.class))
                }),
            SortKey::Progress => self.records.sort_by_key(|r| r.progress),
        }
        self.refresh();
    }

    /// Removes every record. Events are untouched.
    pub fn clear_records(&mut self) {
        self.records.clear();
        self.refresh();
    }

    fn position_of(&self, target: &Record) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r == target)
            .ok_or_else(|| ModelError::RecordNotFound(target.label()))
    }

    // ── Filtered view ──

    /// Replaces the filter. Hidden records stay in the store.
    pub fn set_filter(&mut self, filter: RecordFilter) {
        self.filter = filter;
        self.refresh();
    }

    /// Records passing the filter, in store order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> {
        self.visible.iter().map(|&i| &self.records[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    /// The record at zero-based `index` of the filtered view.
    pub fn filtered_get(&self, index: usize) -> Option<&Record> {
        self.visible.get(index).map(|&i| &self.records[i])
    }

    fn refresh(&mut self) {
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filter.matches(r))
            .map(|(i, _)| i)
            .collect();
    }

    // ── Events ──

    pub fn events(&self) -> &EventBook {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBook {
        &mut self.events
    }
}
