//! Record: everything TAHub knows about one student.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::{
    ClassNumber, Email, Github, Name, Phone, Progress, ProjectTeam, Remark, Repository, StudentId,
    Tag,
};

/// One student entry.
///
/// Immutable from the store's point of view: edits build a new `Record`
/// and replace the old one at the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: Name,
    pub student_id: StudentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    pub class: ClassNumber,
    pub github: Github,
    pub team: ProjectTeam,
    pub repository: Repository,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default, skip_serializing_if = "Remark::is_empty")]
    pub remark: Remark,
}

impl Record {
    /// Whether `other` is the same student: same name ignoring case, or same student ID.
    ///
    /// This is the store's uniqueness rule and is weaker than `==`.
    pub fn is_same_student(&self, other: &Record) -> bool {
        self.name.eq_ignore_case(&other.name) || self.student_id == other.student_id
    }

    /// `https://github.com/<handle>/<repository>` when both parts are set.
    pub fn repository_url(&self) -> Option<String> {
        if self.repository.is_none() {
            return None;
        }
        self.github
            .profile_url()
            .map(|profile| format!("{profile}/{}", self.repository))
    }

    /// The most specific link for this student: repository, else GitHub profile.
    pub fn link(&self) -> Option<String> {
        self.repository_url().or_else(|| self.github.profile_url())
    }

    /// `Name (StudentId)`, used in prompts and feedback.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.student_id)
    }

    /// Multi-line description for `view`.
    pub fn details(&self) -> String {
        let mut lines = vec![
            format!("Name: {}", self.name),
            format!("Student ID: {}", self.student_id),
            format!(
                "Phone: {}",
                self.phone.as_ref().map_or("-", Phone::as_str)
            ),
            format!(
                "Email: {}",
                self.email.as_ref().map_or("-", Email::as_str)
            ),
            format!("Class: {}", self.class),
            format!("GitHub: {}", self.github),
            format!("Project team: {}", self.team),
            format!("Repository: {}", self.repository),
            format!("Progress: {}%", self.progress),
        ];
        if !self.tags.is_empty() {
            lines.push(format!("Tags: {}", join_tags(&self.tags)));
        }
        if !self.remark.is_empty() {
            lines.push(format!("Remark: {}", self.remark));
        }
        lines.join("\n")
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Class: {}; Team: {}; Progress: {}%",
            self.label(),
            self.class,
            self.team,
            self.progress
        )?;
        if !self.tags.is_empty() {
            write!(f, "; Tags: {}", join_tags(&self.tags))?;
        }
        Ok(())
    }
}

fn join_tags(tags: &BTreeSet<Tag>) -> String {
    tags.iter()
        .map(|t| format!("[{t}]"))
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A record with every optional field at its sentinel.
    pub fn record(name: &str, student_id: &str) -> Record {
        Record {
            name: Name::new(name).unwrap(),
            student_id: StudentId::new(student_id).unwrap(),
            phone: None,
            email: None,
            class: ClassNumber::new(ClassNumber::UNASSIGNED).unwrap(),
            github: Github::new(Github::NONE).unwrap(),
            team: ProjectTeam::new(ProjectTeam::NONE).unwrap(),
            repository: Repository::new(Repository::NONE).unwrap(),
            tags: BTreeSet::new(),
            progress: Progress::default(),
            remark: Remark::default(),
        }
    }

    pub fn alex() -> Record {
        record("Alex Yeoh", "A0000001B")
    }

    pub fn bernice() -> Record {
        record("Bernice Yu", "A0000002C")
    }

    pub fn charlotte() -> Record {
        record("Charlotte Oliveiro", "A0000003D")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn same_student_by_name_ignoring_case() {
        let a = alex();
        let b = record("ALEX YEOH", "A0000099Z");
        assert!(a.is_same_student(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn same_student_by_id() {
        let a = alex();
        let b = record("Someone Else", "A0000001B");
        assert!(a.is_same_student(&b));
    }

    #[test]
    fn different_students() {
        assert!(!alex().is_same_student(&bernice()));
    }

    #[test]
    fn links_prefer_repository() {
        let mut r = alex();
        assert_eq!(r.link(), None);

        r.github = Github::new("alexyeoh").unwrap();
        assert_eq!(r.link().as_deref(), Some("https://github.com/alexyeoh"));

        r.repository = Repository::new("tp").unwrap();
        assert_eq!(r.link().as_deref(), Some("https://github.com/alexyeoh/tp"));
    }

    #[test]
    fn repository_without_github_has_no_url() {
        let mut r = alex();
        r.repository = Repository::new("tp").unwrap();
        assert_eq!(r.repository_url(), None);
    }

    #[test]
    fn snapshot_json_round_trip() {
        let mut r = alex();
        r.tags.insert(Tag::new("friends").unwrap());
        r.phone = Some(Phone::new("87438807").unwrap());
        let json = serde_json::to_string(&r).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
