//! Parsers for schedule and unschedule.

use jiff::civil::DateTime;

use crate::command::{Command, ScheduleCommand, UnscheduleCommand};
use crate::model::{Name, TimedEvent};

use super::field::{parse_date_time, parse_name};
use super::{PREFIX_NAME, PREFIX_TIME, ParseError, Result, tokenize};

/// Both forms take exactly `n/NAME d/YYYY-MM-DD HH:MM`.
fn name_and_time(args: &str, usage: &'static str) -> Result<(Name, DateTime)> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_TIME]);
    if !map.preamble().is_empty() {
        return Err(ParseError::usage(
            format!("Unexpected text before the first field: {:?}", map.preamble()),
            usage,
        ));
    }
    if map.lacks_value(PREFIX_NAME) || map.lacks_value(PREFIX_TIME) {
        return Err(ParseError::usage("Both n/ and d/ are required.", usage));
    }
    map.verify_no_duplicate_prefixes(&[PREFIX_NAME, PREFIX_TIME], usage)?;
    Ok((
        parse_name(map.value(PREFIX_NAME).unwrap_or_default())?,
        parse_date_time(map.value(PREFIX_TIME).unwrap_or_default())?,
    ))
}

pub(super) fn parse_schedule(args: &str) -> Result<Command> {
    let (name, time) = name_and_time(args, ScheduleCommand::USAGE)?;
    Ok(Command::Schedule(ScheduleCommand {
        event: TimedEvent { name, time },
    }))
}

pub(super) fn parse_unschedule(args: &str) -> Result<Command> {
    let (name, time) = name_and_time(args, UnscheduleCommand::USAGE)?;
    Ok(Command::Unschedule(UnscheduleCommand { name, time }))
}
