//! Parsers for index-based and read-side commands: delete, view, open, find, sort.

use crate::command::{
    Command, DeleteCommand, FindCommand, Index, OpenCommand, SortCommand, ViewCommand,
};
use crate::model::{Criteria, RecordFilter};

use super::field::{parse_class, parse_index, parse_project_team, parse_sort_key, parse_tags};
use super::{PREFIX_CLASS, PREFIX_TAG, PREFIX_TEAM, ParseError, Result, tokenize};

/// The whole argument string must be a single index.
fn index_only(args: &str, usage: &'static str) -> Result<Index> {
    let args = args.trim();
    if args.is_empty() {
        return Err(ParseError::usage("Missing the student index.", usage));
    }
    parse_index(args)
}

pub(super) fn parse_delete(args: &str) -> Result<Command> {
    let index = index_only(args, DeleteCommand::USAGE)?;
    Ok(Command::Delete(DeleteCommand::new(index)))
}

pub(super) fn parse_view(args: &str) -> Result<Command> {
    let index = index_only(args, ViewCommand::USAGE)?;
    Ok(Command::View(ViewCommand { index }))
}

pub(super) fn parse_open(args: &str) -> Result<Command> {
    let index = index_only(args, OpenCommand::USAGE)?;
    Ok(Command::Open(OpenCommand { index }))
}

/// `find [KEYWORD]... [c/CLASS] [pt/TEAM] [t/TAG]...`
pub(super) fn parse_find(args: &str) -> Result<Command> {
    let usage = FindCommand::USAGE;
    let map = tokenize(args, &[PREFIX_CLASS, PREFIX_TEAM, PREFIX_TAG]);
    map.verify_no_duplicate_prefixes(&[PREFIX_CLASS, PREFIX_TEAM], usage)?;

    let criteria = Criteria {
        name_keywords: map
            .preamble()
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        class: map.value(PREFIX_CLASS).map(parse_class).transpose()?,
        team: map.value(PREFIX_TEAM).map(parse_project_team).transpose()?,
        tags: parse_tags(map.all_values(PREFIX_TAG))?,
    };

    if criteria.is_empty() {
        return Err(ParseError::usage("Give at least one keyword or filter.", usage));
    }

    Ok(Command::Find(FindCommand {
        filter: RecordFilter::Matching(criteria),
    }))
}

/// `sort name|id|class|progress`
pub(super) fn parse_sort(args: &str) -> Result<Command> {
    let key = parse_sort_key(args).ok_or_else(|| {
        ParseError::usage(
            format!("Unknown sort key {:?}.", args.trim()),
            SortCommand::USAGE,
        )
    })?;
    Ok(Command::Sort(SortCommand { key }))
}
