//! Two-phase confirmation for destructive commands.
//!
//! ```text
//! Unconfirmed ──prompt──▶ Awaiting(target) ──confirm──▶ Applied
//!                                      └──────cancel──▶ Cancelled
//! ```
//!
//! Any other transition is a [`CommandError::ContractViolation`]: the logic
//! layer only forwards yes/no answers to a command that has just prompted.

use super::CommandError;

/// Where a destructive command stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Confirmation<T> {
    /// Nothing resolved yet. The store has not been touched.
    #[default]
    Unconfirmed,

    /// The user has been asked; `T` is what will be acted on.
    Awaiting(T),

    /// Confirmed and carried out.
    Applied,

    /// Cancelled by the user, or abandoned because the target vanished.
    Cancelled,
}

impl<T> Confirmation<T> {
    /// `Unconfirmed → Awaiting(target)`.
    pub fn prompt(&mut self, target: T) -> Result<(), CommandError> {
        match self {
            Self::Unconfirmed => {
                *self = Self::Awaiting(target);
                Ok(())
            }
            _ => Err(self.violation("prompt")),
        }
    }

    /// The awaited target, if any.
    pub fn target(&self) -> Option<&T> {
        match self {
            Self::Awaiting(target) => Some(target),
            _ => None,
        }
    }

    /// `Awaiting(target) → Applied`, handing back the target.
    ///
    /// Callers that then fail to act should call [`Confirmation::abandon`].
    pub fn confirm(&mut self) -> Result<T, CommandError> {
        match std::mem::replace(self, Self::Applied) {
            Self::Awaiting(target) => Ok(target),
            previous => {
                *self = previous;
                Err(self.violation("confirm"))
            }
        }
    }

    /// `Awaiting(_) → Cancelled`.
    pub fn cancel(&mut self) -> Result<(), CommandError> {
        match self {
            Self::Awaiting(_) => {
                *self = Self::Cancelled;
                Ok(())
            }
            _ => Err(self.violation("cancel")),
        }
    }

    /// Marks a confirmed action that could not be carried out.
    pub fn abandon(&mut self) {
        *self = Self::Cancelled;
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Awaiting(_) => "awaiting confirmation",
            Self::Applied => "applied",
            Self::Cancelled => "cancelled",
        }
    }

    fn violation(&self, transition: &str) -> CommandError {
        CommandError::ContractViolation(format!(
            "cannot {transition} a command that is {}",
            self.state_name()
        ))
    }
}
