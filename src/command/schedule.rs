//! Timed-event commands: schedule, unschedule, schedules.

use jiff::civil::DateTime;

use crate::model::{Model, Name, TimedEvent};

use super::{CommandResult, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCommand {
    pub event: TimedEvent,
}

impl ScheduleCommand {
    pub const USAGE: &'static str = "schedule: Schedules an event.\n\
        Parameters: n/NAME d/YYYY-MM-DD HH:MM\n\
        Example: schedule n/Alex Yeoh d/2024-10-20 14:00";

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        model.events_mut().add(self.event.clone())?;
        Ok(CommandResult::message(format!("Scheduled: {}", self.event)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnscheduleCommand {
    pub name: Name,
    pub time: DateTime,
}

impl UnscheduleCommand {
    pub const USAGE: &'static str = "unschedule: Removes a scheduled event.\n\
        Parameters: n/NAME d/YYYY-MM-DD HH:MM\n\
        Example: unschedule n/Alex Yeoh d/2024-10-20 14:00";

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult> {
        let removed = model.events_mut().remove(&self.name, self.time)?;
        Ok(CommandResult::message(format!("Unscheduled: {removed}")))
    }
}

pub(super) fn list(model: &Model) -> CommandResult {
    let events = model.events().events();
    if events.is_empty() {
        return CommandResult::message("No scheduled events");
    }
    let lines: Vec<String> = events
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {e}", i + 1))
        .collect();
    CommandResult::message(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::command::CommandError;
    use crate::model::ModelError;

    fn alex_at(hour: i8) -> TimedEvent {
        TimedEvent {
            name: Name::new("Alex Yeoh").unwrap(),
            time: date(2024, 10, 20).at(hour, 0, 0, 0),
        }
    }

    #[test]
    fn schedule_and_list() {
        let mut model = Model::default();
        ScheduleCommand { event: alex_at(14) }
            .execute(&mut model)
            .unwrap();
        ScheduleCommand { event: alex_at(9) }
            .execute(&mut model)
            .unwrap();

        let listed = list(&model).feedback;
        assert_eq!(
            listed,
            "1. Alex Yeoh at 2024-10-20 09:00\n2. Alex Yeoh at 2024-10-20 14:00"
        );
    }

    #[test]
    fn schedule_duplicate_fails() {
        let mut model = Model::default();
        let cmd = ScheduleCommand { event: alex_at(14) };
        cmd.execute(&mut model).unwrap();

        assert!(matches!(
            cmd.execute(&mut model),
            Err(CommandError::Model(ModelError::DuplicateTimedEvent(_)))
        ));
    }

    #[test]
    fn unschedule_missing_fails() {
        let mut model = Model::default();
        let event = alex_at(14);
        let cmd = UnscheduleCommand {
            name: event.name,
            time: event.time,
        };
        assert!(matches!(
            cmd.execute(&mut model),
            Err(CommandError::Model(ModelError::TimedEventNotFound(_)))
        ));
    }

    #[test]
    fn empty_schedule() {
        assert_eq!(list(&Model::default()).feedback, "No scheduled events");
    }
}
