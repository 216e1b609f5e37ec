//! Record-writing commands: add, edit, remark.

use std::collections::BTreeSet;

use crate::model::{
    ClassNumber, Email, Github, Model, Name, Phone, Progress, ProjectTeam, Record, Remark,
    Repository, StudentId, Tag,
};

use super::{CommandResult, Index, Result, resolve};

/// Adds a fully validated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    pub record: Record,
}

impl AddCommand {
    pub const USAGE: &'static str = "add: Adds a student.\n\
        Parameters: n/NAME s/STUDENT_ID [p/PHONE] [e/EMAIL] [c/CLASS] [g/GITHUB] \
        [pt/PROJECT_TEAM] [r/REPOSITORY] [pg/PROGRESS] [t/TAG]...\n\
        Example: add n/John Doe s/A0123456X p/98765432 e/johnd@example.com c/T01 g/johndoe t/friends";

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        model.add_record(self.record.clone())?;
        Ok(CommandResult::message(format!(
            "New student added: {}",
            self.record
        )))
    }
}

/// Fields to change. `None` leaves a field untouched.
///
/// `phone` and `email` nest a second `Option`: `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDescriptor {
    pub name: Option<Name>,
    pub student_id: Option<StudentId>,
    pub phone: Option<Option<Phone>>,
    pub email: Option<Option<Email>>,
    pub class: Option<ClassNumber>,
    pub github: Option<Github>,
    pub team: Option<ProjectTeam>,
    pub repository: Option<Repository>,
    pub tags: Option<BTreeSet<Tag>>,
    pub progress: Option<Progress>,
}

impl EditDescriptor {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A copy of `record` with this descriptor's fields swapped in.
    pub fn apply(&self, record: &Record) -> Record {
        let mut edited = record.clone();
        if let Some(name) = &self.name {
            edited.name = name.clone();
        }
        if let Some(student_id) = &self.student_id {
            edited.student_id = student_id.clone();
        }
        if let Some(phone) = &self.phone {
            edited.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            edited.email = email.clone();
        }
        if let Some(class) = &self.class {
            edited.class = class.clone();
        }
        if let Some(github) = &self.github {
            edited.github = github.clone();
        }
        if let Some(team) = &self.team {
            edited.team = team.clone();
        }
        if let Some(repository) = &self.repository {
            edited.repository = repository.clone();
        }
        if let Some(tags) = &self.tags {
            edited.tags = tags.clone();
        }
        if let Some(progress) = self.progress {
            edited.progress = progress;
        }
        edited
    }
}

/// Replaces the record at `index` with an edited copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    pub index: Index,
    pub descriptor: EditDescriptor,
}

impl EditCommand {
    pub const USAGE: &'static str = "edit: Edits the student at INDEX in the displayed list. \
        Omitted fields are unchanged; an empty value resets a field.\n\
        Parameters: INDEX [n/NAME] [s/STUDENT_ID] [p/PHONE] [e/EMAIL] [c/CLASS] [g/GITHUB] \
        [pt/PROJECT_TEAM] [r/REPOSITORY] [pg/PROGRESS] [t/TAG]...\n\
        Example: edit 1 p/91234567 t/";

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let target = resolve(model, self.index)?.clone();
        let edited = self.descriptor.apply(&target);
        model.replace_record(&target, edited.clone())?;
        Ok(CommandResult::message(format!("Edited student: {edited}")))
    }
}

/// Sets or clears the remark of the record at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemarkCommand {
    pub index: Index,
    pub remark: Remark,
}

impl RemarkCommand {
    pub const USAGE: &'static str = "remark: Sets the remark of the student at INDEX. \
        An empty remark clears it.\n\
        Parameters: INDEX m/[REMARK]\n\
        Example: remark 1 m/Needs help with Git";

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let target = resolve(model, self.index)?.clone();
        let edited = Record {
            remark: self.remark.clone(),
            ..target.clone()
        };
        model.replace_record(&target, edited)?;
        let verb = if self.remark.is_empty() {
            "Removed remark from"
        } else {
            "Added remark to"
        };
        Ok(CommandResult::message(format!("{verb} {}", target.label())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::num::NonZeroUsize;

    use crate::command::CommandError;
    use crate::model::fixtures::*;
    use crate::model::{Criteria, ModelError, RecordFilter};

    fn index(i: usize) -> Index {
        Index::from_one_based(NonZeroUsize::new(i).unwrap())
    }

    #[test]
    fn add_then_duplicate() {
        let mut model = Model::default();
        let add = AddCommand { record: alex() };

        let result = add.execute(&mut model).unwrap();
        assert!(result.feedback.contains("Alex Yeoh"));

        let err = add.execute(&mut model).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Model(ModelError::DuplicateRecord(_))
        ));
        assert_eq!(model.records().len(), 1);
    }

    #[test]
    fn empty_descriptor_changes_nothing() {
        let descriptor = EditDescriptor::default();
        assert!(descriptor.is_empty());
        assert_eq!(descriptor.apply(&alex()), alex());
    }

    #[test]
    fn edit_clears_tags_and_keeps_other_fields() {
        let mut tagged = bernice();
        tagged.tags.insert(Tag::new("friends").unwrap());
        tagged.phone = Some(Phone::new("99272758").unwrap());
        let mut model = Model::new(vec![alex(), tagged.clone()], Vec::new()).unwrap();

        let edit = EditCommand {
            index: index(2),
            descriptor: EditDescriptor {
                tags: Some(BTreeSet::new()),
                ..EditDescriptor::default()
            },
        };
        edit.execute(&mut model).unwrap();

        let edited = &model.records()[1];
        assert!(edited.tags.is_empty());
        assert_eq!(
            Record {
                tags: tagged.tags.clone(),
                ..edited.clone()
            },
            tagged
        );
    }

    #[test]
    fn edit_clears_phone() {
        let mut with_phone = alex();
        with_phone.phone = Some(Phone::new("87438807").unwrap());
        let mut model = Model::new(vec![with_phone], Vec::new()).unwrap();

        let edit = EditCommand {
            index: index(1),
            descriptor: EditDescriptor {
                phone: Some(None),
                ..EditDescriptor::default()
            },
        };
        edit.execute(&mut model).unwrap();

        assert_eq!(model.records()[0].phone, None);
    }

    #[test]
    fn edit_into_existing_identity_fails() {
        let mut model = Model::new(vec![alex(), bernice()], Vec::new()).unwrap();
        let edit = EditCommand {
            index: index(2),
            descriptor: EditDescriptor {
                student_id: Some(StudentId::new("A0000001B").unwrap()),
                ..EditDescriptor::default()
            },
        };

        let err = edit.execute(&mut model).unwrap_err();

        assert!(matches!(
            err,
            CommandError::Model(ModelError::DuplicateRecord(_))
        ));
        assert_eq!(model.records(), [alex(), bernice()]);
    }

    #[test]
    fn edit_index_resolves_against_filtered_view() {
        let mut model = Model::new(vec![alex(), bernice()], Vec::new()).unwrap();
        model.set_filter(RecordFilter::Matching(Criteria {
            name_keywords: vec!["bernice".into()],
            ..Criteria::default()
        }));

        let edit = EditCommand {
            index: index(1),
            descriptor: EditDescriptor {
                progress: Some(Progress::new(70).unwrap()),
                ..EditDescriptor::default()
            },
        };
        edit.execute(&mut model).unwrap();

        assert_eq!(model.records()[0], alex());
        assert_eq!(model.records()[1].progress.value(), 70);

        let out_of_view = EditCommand {
            index: index(2),
            descriptor: edit.descriptor.clone(),
        };
        assert!(matches!(
            out_of_view.execute(&mut model),
            Err(CommandError::InvalidIndex { index: 2, size: 1 })
        ));
    }

    #[test]
    fn remark_set_and_clear() {
        let mut model = Model::new(vec![alex()], Vec::new()).unwrap();

        let set = RemarkCommand {
            index: index(1),
            remark: Remark::new("Needs help with Git"),
        };
        let result = set.execute(&mut model).unwrap();
        assert_eq!(result.feedback, "Added remark to Alex Yeoh (A0000001B)");
        assert_eq!(model.records()[0].remark.as_str(), "Needs help with Git");

        let clear = RemarkCommand {
            index: index(1),
            remark: Remark::default(),
        };
        clear.execute(&mut model).unwrap();
        assert!(model.records()[0].remark.is_empty());
    }
}
