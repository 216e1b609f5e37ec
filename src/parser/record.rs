//! Parsers for the record-writing commands: add, edit, remark.

use std::collections::BTreeSet;

use crate::command::{AddCommand, Command, EditCommand, EditDescriptor, RemarkCommand};
use crate::config::Defaults;
use crate::model::{Record, Remark, Tag};

use super::field::{
    self, parse_class, parse_email, parse_github, parse_index, parse_name, parse_phone,
    parse_progress, parse_project_team, parse_repository, parse_student_id, parse_tags,
};
use super::{
    ArgumentMultimap, PREFIX_CLASS, PREFIX_EMAIL, PREFIX_GITHUB, PREFIX_NAME, PREFIX_PHONE,
    PREFIX_PROGRESS, PREFIX_REMARK, PREFIX_REPOSITORY, PREFIX_STUDENT_ID, PREFIX_TAG,
    PREFIX_TEAM, ParseError, Prefix, Result, tokenize,
};

/// Every prefix a record can be written with.
const RECORD_PREFIXES: [Prefix; 10] = [
    PREFIX_NAME,
    PREFIX_STUDENT_ID,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_CLASS,
    PREFIX_GITHUB,
    PREFIX_TEAM,
    PREFIX_REPOSITORY,
    PREFIX_PROGRESS,
    PREFIX_TAG,
];

/// The record prefixes that may appear at most once.
const SINGLE_VALUED: [Prefix; 9] = [
    PREFIX_NAME,
    PREFIX_STUDENT_ID,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_CLASS,
    PREFIX_GITHUB,
    PREFIX_TEAM,
    PREFIX_REPOSITORY,
    PREFIX_PROGRESS,
];

/// `add n/NAME s/STUDENT_ID [optional fields]...`
pub(super) fn parse_add(args: &str, defaults: &Defaults) -> Result<Command> {
    let usage = AddCommand::USAGE;
    let map = tokenize(args, &RECORD_PREFIXES);

    if !map.preamble().is_empty() {
        return Err(ParseError::usage(
            format!("Unexpected text before the first field: {:?}", map.preamble()),
            usage,
        ));
    }
    let missing: Vec<&str> = [PREFIX_NAME, PREFIX_STUDENT_ID]
        .into_iter()
        .filter(|p| map.lacks_value(*p))
        .map(|p| p.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::usage(
            format!("Missing required field(s): {}", missing.join(" ")),
            usage,
        ));
    }
    map.verify_no_duplicate_prefixes(&SINGLE_VALUED, usage)?;

    let record = Record {
        name: parse_name(map.value(PREFIX_NAME).unwrap_or_default())?,
        student_id: parse_student_id(map.value(PREFIX_STUDENT_ID).unwrap_or_default())?,
        phone: map.value(PREFIX_PHONE).map(parse_phone).transpose()?,
        email: map.value(PREFIX_EMAIL).map(parse_email).transpose()?,
        class: parse_class(value_or(&map, PREFIX_CLASS, &defaults.class))?,
        github: parse_github(value_or(&map, PREFIX_GITHUB, &defaults.github))?,
        team: parse_project_team(value_or(&map, PREFIX_TEAM, &defaults.project_team))?,
        repository: parse_repository(value_or(&map, PREFIX_REPOSITORY, &defaults.repository))?,
        tags: parse_tags(map.all_values(PREFIX_TAG))?,
        progress: parse_progress(value_or(&map, PREFIX_PROGRESS, &defaults.progress))?,
        remark: Remark::default(),
    };

    Ok(Command::Add(AddCommand { record }))
}

/// `edit INDEX [fields]...`
///
/// An omitted prefix leaves its field alone. An empty value resets it: to the
/// configured default, to nothing for phone and email, or to no tags for a lone `t/`.
pub(super) fn parse_edit(args: &str, defaults: &Defaults) -> Result<Command> {
    let usage = EditCommand::USAGE;
    let map = tokenize(args, &RECORD_PREFIXES);

    if map.preamble().is_empty() {
        return Err(ParseError::usage("Missing the student index.", usage));
    }
    let index = parse_index(map.preamble())?;
    map.verify_no_duplicate_prefixes(&SINGLE_VALUED, usage)?;

    let descriptor = EditDescriptor {
        name: map.value(PREFIX_NAME).map(parse_name).transpose()?,
        student_id: map.value(PREFIX_STUDENT_ID).map(parse_student_id).transpose()?,
        phone: map
            .value(PREFIX_PHONE)
            .map(|raw| non_empty(raw).map(parse_phone).transpose())
            .transpose()?,
        email: map
            .value(PREFIX_EMAIL)
            .map(|raw| non_empty(raw).map(parse_email).transpose())
            .transpose()?,
        class: reset_or(&map, PREFIX_CLASS, &defaults.class, parse_class)?,
        github: reset_or(&map, PREFIX_GITHUB, &defaults.github, parse_github)?,
        team: reset_or(&map, PREFIX_TEAM, &defaults.project_team, parse_project_team)?,
        repository: reset_or(&map, PREFIX_REPOSITORY, &defaults.repository, parse_repository)?,
        tags: parse_tags_for_edit(map.all_values(PREFIX_TAG))?,
        progress: reset_or(&map, PREFIX_PROGRESS, &defaults.progress, parse_progress)?,
    };

    if descriptor.is_empty() {
        return Err(ParseError::usage(
            "At least one field to edit must be provided.",
            usage,
        ));
    }

    Ok(Command::Edit(EditCommand { index, descriptor }))
}

/// `remark INDEX m/[REMARK]`
pub(super) fn parse_remark(args: &str) -> Result<Command> {
    let usage = RemarkCommand::USAGE;
    let map = tokenize(args, &[PREFIX_REMARK]);

    if map.preamble().is_empty() {
        return Err(ParseError::usage("Missing the student index.", usage));
    }
    let index = parse_index(map.preamble())?;
    let Some(raw) = map.value(PREFIX_REMARK) else {
        return Err(ParseError::usage("Missing required field: m/", usage));
    };
    map.verify_no_duplicate_prefixes(&[PREFIX_REMARK], usage)?;

    Ok(Command::Remark(RemarkCommand {
        index,
        remark: field::parse_remark(raw),
    }))
}

/// `prefix`'s value, or `default` when the prefix is absent.
fn value_or<'a>(map: &'a ArgumentMultimap, prefix: Prefix, default: &'a str) -> &'a str {
    map.value(prefix).unwrap_or(default)
}

fn non_empty(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    (!raw.is_empty()).then_some(raw)
}

/// Parses `prefix`'s value if given, substituting `default` for an empty value.
fn reset_or<T>(
    map: &ArgumentMultimap,
    prefix: Prefix,
    default: &str,
    parse: fn(&str) -> Result<T>,
) -> Result<Option<T>> {
    map.value(prefix)
        .map(|raw| parse(non_empty(raw).unwrap_or(default)))
        .transpose()
}

/// A lone empty `t/` clears the tags; otherwise every value must be a valid tag.
fn parse_tags_for_edit(raws: &[String]) -> Result<Option<BTreeSet<Tag>>> {
    match raws {
        [] => Ok(None),
        [only] if only.is_empty() => Ok(Some(BTreeSet::new())),
        _ => parse_tags(raws).map(Some),
    }
}
