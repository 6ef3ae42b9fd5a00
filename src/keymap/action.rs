//! Named actions that shortcuts map to

use std::fmt;
use std::str::FromStr;

/// A shortcut-triggered action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert the current video time into the note
    AddTimestamp,
    /// Alternate binding for timestamp insertion
    AddTimestampAlt,
    /// Show or hide the note panel
    ToggleVisibility,
    /// Copy the current video time to the clipboard
    CopyTimestamp,
    /// Append the copied time to the note
    PasteTimestamp,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::AddTimestamp,
        Action::AddTimestampAlt,
        Action::ToggleVisibility,
        Action::CopyTimestamp,
        Action::PasteTimestamp,
    ];

    /// Name as written in shortcut files
    pub fn name(self) -> &'static str {
        match self {
            Action::AddTimestamp => "AddTimestamp",
            Action::AddTimestampAlt => "AddTimestampAlt",
            Action::ToggleVisibility => "ToggleVisibility",
            Action::CopyTimestamp => "CopyTimestamp",
            Action::PasteTimestamp => "PasteTimestamp",
        }
    }

    /// Short description for settings listings
    pub fn description(self) -> &'static str {
        match self {
            Action::AddTimestamp => "Add timestamp",
            Action::AddTimestampAlt => "Add timestamp (alternate)",
            Action::ToggleVisibility => "Toggle note visibility",
            Action::CopyTimestamp => "Copy current time",
            Action::PasteTimestamp => "Paste copied time",
        }
    }

    /// Whether the action inserts a timestamp
    pub fn is_timestamp_insert(self) -> bool {
        matches!(self, Action::AddTimestamp | Action::AddTimestampAlt)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or(())
    }
}
