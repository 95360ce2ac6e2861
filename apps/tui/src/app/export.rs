use std::convert::TryFrom;
use std::fmt;
use std::path::PathBuf;

/// File name the raw vendor results are exported under.
pub const EXPORT_FILE_NAME: &str = "sandbox_landscape_raw_data.json";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExportState {
    Idle,
    Exporting,
    Written,
    Failed,
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Exporting => write!(f, "Exporting"),
            Self::Written => write!(f, "Written"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ExportEvent {
    Start,
    Written(PathBuf),
    Failed(String),
    Reset,
}

impl fmt::Display for ExportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Written(path) => write!(f, "Written({})", path.display()),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
pub struct TransitionError {
    from: ExportState,
    event: ExportEvent,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for TransitionError {}

/// Tracks the raw-data export so only one runs at a time.
#[derive(Debug)]
pub struct ExportMachine {
    state: ExportState,
}

impl ExportMachine {
    pub const fn new() -> Self {
        Self {
            state: ExportState::Idle,
        }
    }

    pub const fn state(&self) -> ExportState {
        self.state
    }

    /// Applies `event`, writing the user-facing outcome into `status`.
    pub fn process(
        &mut self,
        event: &ExportEvent,
        status: &mut String,
    ) -> Result<(), TransitionError> {
        let next = NextState::try_from((self.state, event, status))?;
        self.state = next.0;
        Ok(())
    }
}

impl Default for ExportMachine {
    fn default() -> Self {
        Self::new()
    }
}

struct NextState(ExportState);

impl TryFrom<(ExportState, &ExportEvent, &mut String)> for NextState {
    type Error = TransitionError;

    fn try_from(value: (ExportState, &ExportEvent, &mut String)) -> Result<Self, Self::Error> {
        let (current, event, status) = value;

        match (current, event) {
            (ExportState::Idle, ExportEvent::Start) => {
                *status = "Exporting raw data...".to_string();
                Ok(Self(ExportState::Exporting))
            }
            (ExportState::Exporting, ExportEvent::Written(path)) => {
                *status = format!("Raw data saved to {}", path.display());
                Ok(Self(ExportState::Written))
            }
            (ExportState::Exporting, ExportEvent::Failed(error)) => {
                *status = format!("Export failed: {error}");
                Ok(Self(ExportState::Failed))
            }
            (ExportState::Written | ExportState::Failed, ExportEvent::Reset) => {
                Ok(Self(ExportState::Idle))
            }
            _ => Err(TransitionError {
                from: current,
                event: event.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_export_reports_path_and_returns_to_idle() -> Result<(), TransitionError> {
        let mut machine = ExportMachine::new();
        let mut status = String::new();

        machine.process(&ExportEvent::Start, &mut status)?;
        assert_eq!(machine.state(), ExportState::Exporting);

        machine.process(
            &ExportEvent::Written(PathBuf::from("out").join(EXPORT_FILE_NAME)),
            &mut status,
        )?;
        assert!(status.ends_with(EXPORT_FILE_NAME));

        machine.process(&ExportEvent::Reset, &mut status)?;
        assert_eq!(machine.state(), ExportState::Idle);
        Ok(())
    }

    #[test]
    fn start_while_exporting_is_rejected() -> Result<(), TransitionError> {
        let mut machine = ExportMachine::new();
        let mut status = String::new();
        machine.process(&ExportEvent::Start, &mut status)?;

        assert!(machine.process(&ExportEvent::Start, &mut status).is_err());
        assert_eq!(status, "Exporting raw data...");
        Ok(())
    }
}
