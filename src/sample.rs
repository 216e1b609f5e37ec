//! Starter data for a first run, so the student book is never empty on day one.

use std::collections::BTreeSet;

use crate::model::{
    ClassNumber, Email, Github, InvalidField, Name, Phone, Progress, ProjectTeam, Record, Remark,
    Repository, StudentId, Tag,
};

struct Sample {
    name: &'static str,
    student_id: &'static str,
    phone: &'static str,
    email: &'static str,
    class: &'static str,
    github: &'static str,
    team: &'static str,
    repository: &'static str,
    tags: &'static [&'static str],
    progress: u8,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "Alex Yeoh",
        student_id: "A0000001B",
        phone: "87438807",
        email: "alexyeoh@example.com",
        class: "T01",
        github: "alexyeoh",
        team: "Team Rocket",
        repository: "tp",
        tags: &["friends"],
        progress: 40,
    },
    Sample {
        name: "Bernice Yu",
        student_id: "A0000002C",
        phone: "99272758",
        email: "berniceyu@example.com",
        class: "T01",
        github: "berniceyu",
        team: "Team Rocket",
        repository: "tp",
        tags: &["colleagues", "friends"],
        progress: 55,
    },
    Sample {
        name: "Charlotte Oliveiro",
        student_id: "A0000003D",
        phone: "93210283",
        email: "charlotte@example.com",
        class: "T02",
        github: "charlotteoliveiro",
        team: "Team Aqua",
        repository: Repository::NONE,
        tags: &["neighbours"],
        progress: 20,
    },
    Sample {
        name: "David Li",
        student_id: "A0000004E",
        phone: "91031282",
        email: "lidavid@example.com",
        class: "T02",
        github: Github::NONE,
        team: "Team Aqua",
        repository: Repository::NONE,
        tags: &["family"],
        progress: 75,
    },
    Sample {
        name: "Irfan Ibrahim",
        student_id: "A0000005F",
        phone: "92492021",
        email: "irfan@example.com",
        class: ClassNumber::UNASSIGNED,
        github: "irfanibrahim",
        team: ProjectTeam::NONE,
        repository: Repository::NONE,
        tags: &["classmates"],
        progress: 0,
    },
];

/// The starter records, in display order.
pub fn records() -> Result<Vec<Record>, InvalidField> {
    SAMPLES.iter().map(Sample::to_record).collect()
}

impl Sample {
    fn to_record(&self) -> Result<Record, InvalidField> {
        Ok(Record {
            name: Name::new(self.name)?,
            student_id: StudentId::new(self.student_id)?,
            phone: Some(Phone::new(self.phone)?),
            email: Some(Email::new(self.email)?),
            class: ClassNumber::new(self.class)?,
            github: Github::new(self.github)?,
            team: ProjectTeam::new(self.team)?,
            repository: Repository::new(self.repository)?,
            tags: self
                .tags
                .iter()
                .map(|t| Tag::new(*t))
                .collect::<Result<BTreeSet<_>, _>>()?,
            progress: Progress::new(self.progress)?,
            remark: Remark::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Model;

    #[test]
    fn samples_are_valid_and_distinct() {
        let records = records().unwrap();
        assert_eq!(records.len(), SAMPLES.len());

        let model = Model::new(records, Vec::new()).unwrap();
        assert_eq!(model.filtered_len(), SAMPLES.len());
    }

    #[test]
    fn first_sample_links_to_its_repository() {
        let records = records().unwrap();
        assert_eq!(
            records[0].link().as_deref(),
            Some("https://github.com/alexyeoh/tp")
        );
    }
}
