//! Field types: immutable, self-validating values for each record attribute.
//!
//! Every type validates at construction and compares by value. The `Display`
//! form of a value is its canonical literal and always parses back to an equal value.
//! Serde goes through the same validators, so an invalid snapshot fails to load.

use std::{fmt, str::FromStr, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A literal that does not satisfy a field's constraints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{constraints}")]
pub struct InvalidField {
    /// Human-readable field name (e.g. "student ID").
    pub field: &'static str,

    /// What a valid literal looks like.
    pub constraints: &'static str,
}

/// Generates a validated string newtype.
///
/// `$valid` decides whether a literal is acceptable; everything else
/// (accessors, `Display`, `FromStr`, serde via `TryFrom<String>`) is shared.
macro_rules! string_field {
    ($(#[$meta:meta])* $ty:ident, $field:literal, $constraints:literal, $valid:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $ty(String);

        impl $ty {
            pub const CONSTRAINTS: &'static str = $constraints;

            /// Validates `value` and wraps it.
            pub fn new(value: impl Into<String>) -> Result<Self, InvalidField> {
                let value = value.into();
                if Self::is_valid(&value) {
                    Ok(Self(value))
                } else {
                    Err(InvalidField {
                        field: $field,
                        constraints: Self::CONSTRAINTS,
                    })
                }
            }

            /// Whether `value` is an acceptable literal for this field.
            pub fn is_valid(value: &str) -> bool {
                let valid: fn(&str) -> bool = $valid;
                valid(value)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = InvalidField;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = InvalidField;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

fn is_match(cell: &'static OnceLock<Regex>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).expect("field pattern is a valid regex"))
        .is_match(value)
}

string_field!(
    /// A student's full name.
    Name,
    "name",
    "Names should only contain alphanumeric characters and spaces, and it should not be blank",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        is_match(&RE, r"^[\p{Alphabetic}\p{Nd}][\p{Alphabetic}\p{Nd} ]*$", v)
    }
);

impl Name {
    /// Case-insensitive comparison used by the identity rule.
    pub fn eq_ignore_case(&self, other: &Name) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }

    /// Whitespace-separated words of the name.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

string_field!(
    /// A matriculation number such as `A0000001B`.
    StudentId,
    "student ID",
    "Student IDs should be the letter A, followed by 7 digits and an uppercase letter, e.g. A0000001B",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        is_match(&RE, r"^A[0-9]{7}[A-Z]$", v)
    }
);

string_field!(
    /// A phone number.
    Phone,
    "phone",
    "Phone numbers should only contain digits, and it should be at least 3 digits long",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        is_match(&RE, r"^[0-9]{3,}$", v)
    }
);

string_field!(
    /// An email address in `local-part@domain` form.
    Email,
    "email",
    "Emails should be of the format local-part@domain. The local-part should only contain \
     alphanumeric characters and the special characters +_.-, and may not start or end with \
     a special character. The domain is made of labels separated by periods; each label \
     contains alphanumeric characters joined by single hyphens, and the last label is at \
     least 2 characters long",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        let shape = is_match(
            &RE,
            r"^[A-Za-z0-9]+([+_.\-][A-Za-z0-9]+)*@([A-Za-z0-9]+(-[A-Za-z0-9]+)*\.)*[A-Za-z0-9]+(-[A-Za-z0-9]+)*$",
            v,
        );
        shape
            && v
                .rsplit_once('@')
                .and_then(|(_, domain)| domain.rsplit('.').next())
                .is_some_and(|label| label.len() >= 2)
    }
);

string_field!(
    /// A tutorial class such as `T01`, or the unassigned sentinel.
    ClassNumber,
    "class",
    "Class numbers should be an uppercase letter followed by 2 digits, e.g. T01, or 'Unassigned'",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        v == ClassNumber::UNASSIGNED || is_match(&RE, r"^[A-Z][0-9]{2}$", v)
    }
);

impl ClassNumber {
    pub const UNASSIGNED: &'static str = "Unassigned";

    pub fn is_unassigned(&self) -> bool {
        self.0 == Self::UNASSIGNED
    }
}

string_field!(
    /// A GitHub username, or the "no GitHub" sentinel.
    Github,
    "GitHub username",
    "GitHub usernames should contain alphanumeric characters joined by single hyphens, \
     be at most 39 characters long, or be 'No Github'",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        v == Github::NONE || (v.len() <= 39 && is_match(&RE, r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$", v))
    }
);

impl Github {
    pub const NONE: &'static str = "No Github";

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }

    /// The profile URL, unless this is the sentinel.
    pub fn profile_url(&self) -> Option<String> {
        (!self.is_none()).then(|| format!("https://github.com/{}", self.0))
    }
}

string_field!(
    /// The project team a student belongs to.
    ProjectTeam,
    "project team",
    "Project team names should only contain alphanumeric characters and spaces, and it should not be blank",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        is_match(&RE, r"^[A-Za-z0-9][A-Za-z0-9 ]*$", v)
    }
);

impl ProjectTeam {
    pub const NONE: &'static str = "No Team";
}

string_field!(
    /// A repository name under the student's GitHub account, or the "no repository" sentinel.
    Repository,
    "repository",
    "Repository names should only contain alphanumeric characters, '.', '_' and '-', \
     or be 'No Repository'",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        v == Repository::NONE || is_match(&RE, r"^[A-Za-z0-9._\-]+$", v)
    }
);

impl Repository {
    pub const NONE: &'static str = "No Repository";

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }
}

string_field!(
    /// A free-form label used for grouping.
    Tag,
    "tag",
    "Tag names should be alphanumeric",
    |v| {
        static RE: OnceLock<Regex> = OnceLock::new();
        is_match(&RE, r"^[A-Za-z0-9]+$", v)
    }
);

/// Completion percentage, 0 to 100 inclusive.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const CONSTRAINTS: &'static str =
        "Progress should be a whole number between 0 and 100 inclusive";

    pub fn new(value: u8) -> Result<Self, InvalidField> {
        if value <= 100 {
            Ok(Self(value))
        } else {
            Err(Self::invalid())
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    fn invalid() -> InvalidField {
        InvalidField {
            field: "progress",
            constraints: Self::CONSTRAINTS,
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Progress {
    type Err = InvalidField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u8>().map_err(|_| Self::invalid())?;
        Self::new(value)
    }
}

impl TryFrom<u8> for Progress {
    type Error = InvalidField;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

/// Free-text note about a student. Any text is accepted, including empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Remark(String);

impl Remark {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
