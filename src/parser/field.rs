//! Field parsers: raw argument text → validated field values.
//!
//! Every parser trims its input and either returns the field or a
//! [`ParseError::FieldValidation`] naming the prefix it came from.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use jiff::civil::DateTime;

use crate::command::Index;
use crate::model::{
    ClassNumber, Email, Github, InvalidField, Name, Phone, Progress, ProjectTeam, Remark,
    Repository, SortKey, StudentId, TIME_FORMAT, Tag,
};

use super::{
    ParseError, Prefix, PREFIX_CLASS, PREFIX_EMAIL, PREFIX_GITHUB, PREFIX_NAME, PREFIX_PHONE,
    PREFIX_PROGRESS, PREFIX_REPOSITORY, PREFIX_STUDENT_ID, PREFIX_TAG, PREFIX_TEAM, PREFIX_TIME,
};

fn invalid(prefix: Prefix) -> impl FnOnce(InvalidField) -> ParseError {
    move |e| ParseError::FieldValidation {
        prefix,
        message: e.constraints.to_string(),
    }
}

/// A 1-based index from the preamble.
pub fn parse_index(raw: &str) -> Result<Index, ParseError> {
    let raw = raw.trim();
    raw.parse::<NonZeroUsize>()
        .map(Index::from_one_based)
        .map_err(|_| ParseError::InvalidIndex(raw.to_string()))
}

pub fn parse_name(raw: &str) -> Result<Name, ParseError> {
    Name::new(raw.trim()).map_err(invalid(PREFIX_NAME))
}

pub fn parse_student_id(raw: &str) -> Result<StudentId, ParseError> {
    StudentId::new(raw.trim()).map_err(invalid(PREFIX_STUDENT_ID))
}

pub fn parse_phone(raw: &str) -> Result<Phone, ParseError> {
    Phone::new(raw.trim()).map_err(invalid(PREFIX_PHONE))
}

pub fn parse_email(raw: &str) -> Result<Email, ParseError> {
    Email::new(raw.trim()).map_err(invalid(PREFIX_EMAIL))
}

pub fn parse_class(raw: &str) -> Result<ClassNumber, ParseError> {
    ClassNumber::new(raw.trim()).map_err(invalid(PREFIX_CLASS))
}

pub fn parse_github(raw: &str) -> Result<Github, ParseError> {
    Github::new(raw.trim()).map_err(invalid(PREFIX_GITHUB))
}

pub fn parse_project_team(raw: &str) -> Result<ProjectTeam, ParseError> {
    ProjectTeam::new(raw.trim()).map_err(invalid(PREFIX_TEAM))
}

pub fn parse_repository(raw: &str) -> Result<Repository, ParseError> {
    Repository::new(raw.trim()).map_err(invalid(PREFIX_REPOSITORY))
}

pub fn parse_progress(raw: &str) -> Result<Progress, ParseError> {
    raw.trim()
        .parse::<Progress>()
        .map_err(invalid(PREFIX_PROGRESS))
}

pub fn parse_tag(raw: &str) -> Result<Tag, ParseError> {
    Tag::new(raw.trim()).map_err(invalid(PREFIX_TAG))
}

/// Parses every occurrence; one bad tag fails the whole list.
pub fn parse_tags(raws: &[String]) -> Result<BTreeSet<Tag>, ParseError> {
    raws.iter().map(|raw| parse_tag(raw)).collect()
}

/// Remarks accept any text.
pub fn parse_remark(raw: &str) -> Remark {
    Remark::new(raw.trim())
}

/// A civil date-time in `YYYY-MM-DD HH:MM` form.
pub fn parse_date_time(raw: &str) -> Result<DateTime, ParseError> {
    DateTime::strptime(TIME_FORMAT, raw.trim()).map_err(|_| ParseError::FieldValidation {
        prefix: PREFIX_TIME,
        message: "Times should be of the form YYYY-MM-DD HH:MM, e.g. 2024-10-20 14:00".to_string(),
    })
}

/// `name`, `id`, `class` or `progress`.
pub fn parse_sort_key(raw: &str) -> Option<SortKey> {
    match raw.trim().to_lowercase().as_str() {
        "name" => Some(SortKey::Name),
        "id" => Some(SortKey::StudentId),
        "class" => Some(SortKey::Class),
        "progress" => Some(SortKey::Progress),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fmt;

    #[test]
    fn index_must_be_positive_integer() {
        assert_eq!(parse_index(" 1 ").unwrap().one_based(), 1);
        assert_eq!(parse_index("12").unwrap().zero_based(), 11);
        for bad in ["0", "-1", "abc", "", "1 2", "+"] {
            assert!(
                matches!(parse_index(bad), Err(ParseError::InvalidIndex(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn field_error_names_prefix() {
        let err = parse_student_id("A123").unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldValidation {
                prefix: PREFIX_STUDENT_ID,
                message: StudentId::CONSTRAINTS.to_string(),
            }
        );
    }

    #[test]
    fn values_are_trimmed() {
        assert_eq!(parse_name("  Alex Yeoh ").unwrap().as_str(), "Alex Yeoh");
        assert_eq!(parse_progress(" 40 ").unwrap().value(), 40);
    }

    /// Parses `raw` padded with whitespace, then reparses the display form.
    fn reparses<T, E>(raw: &str, parse: fn(&str) -> Result<T, E>) -> T
    where
        T: fmt::Display + PartialEq + fmt::Debug,
        E: fmt::Debug,
    {
        let value = parse(&format!("  {raw} ")).unwrap();
        assert_eq!(value.to_string(), raw);
        assert_eq!(parse(&value.to_string()).unwrap(), value);
        value
    }

    #[test]
    fn display_form_parses_back_to_equal_value() {
        reparses("Alex Yeoh", parse_name);
        reparses("A0000001B", parse_student_id);
        reparses("87438807", parse_phone);
        reparses("alex.yeoh+tp@example.com", parse_email);
        reparses("T01", parse_class);
        reparses(ClassNumber::UNASSIGNED, parse_class);
        reparses("alex-yeoh", parse_github);
        reparses(Github::NONE, parse_github);
        reparses("Team Rocket", parse_project_team);
        reparses(ProjectTeam::NONE, parse_project_team);
        reparses("tp.v1_final-2", parse_repository);
        reparses(Repository::NONE, parse_repository);
        reparses("friends", parse_tag);
        reparses("0", parse_progress);
        reparses("100", parse_progress);

        let time = reparses("2024-10-20 14:05", parse_date_time_displayed);
        assert_eq!((time.0.hour(), time.0.minute()), (14, 5));
    }

    /// `DateTime`'s own `Display` is ISO; the user-facing form is `TIME_FORMAT`.
    fn parse_date_time_displayed(raw: &str) -> Result<Displayed, ParseError> {
        parse_date_time(raw).map(Displayed)
    }

    #[derive(Debug, PartialEq)]
    struct Displayed(DateTime);

    impl fmt::Display for Displayed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0.strftime(TIME_FORMAT))
        }
    }

    #[test]
    fn tags_collect_into_set() {
        let tags = parse_tags(&["friends".into(), "friends".into(), "tutor".into()]).unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn one_bad_tag_fails_the_list() {
        let err = parse_tags(&["friends".into(), "best friend".into()]).unwrap_err();
        assert!(matches!(err, ParseError::FieldValidation { prefix, .. } if prefix == PREFIX_TAG));
    }

    #[test]
    fn date_time_format() {
        let dt = parse_date_time("2024-10-20 14:30").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (14, 30));
        assert!(parse_date_time("20/10/2024 14:30").is_err());
        assert!(parse_date_time("2024-13-20 14:30").is_err());
    }

    #[test]
    fn sort_keys() {
        assert_eq!(parse_sort_key("Name"), Some(SortKey::Name));
        assert_eq!(parse_sort_key("id"), Some(SortKey::StudentId));
        assert_eq!(parse_sort_key("age"), None);
    }
}
