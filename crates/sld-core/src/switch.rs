//! Switch positions.

use core::fmt;

/// Position of a disconnect switch.
///
/// `Fault` is a cosmetic marker for renderers. `Other` stands for any state
/// string documents carry beyond the three known ones. Neither conducts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum SwitchState {
    Open,
    #[default]
    Closed,
    Fault,
    Other,
}

impl SwitchState {
    /// Only a closed switch lets energization through.
    pub fn conducts(self) -> bool {
        matches!(self, SwitchState::Closed)
    }

    /// Flip `Closed` <-> `Open`. `Fault` stays put; any other state closes.
    pub fn toggled(self) -> Self {
        match self {
            SwitchState::Closed => SwitchState::Open,
            SwitchState::Fault => SwitchState::Fault,
            SwitchState::Open | SwitchState::Other => SwitchState::Closed,
        }
    }

    /// Read a declared state. Unknown strings map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "open" => SwitchState::Open,
            "closed" => SwitchState::Closed,
            "fault" => SwitchState::Fault,
            _ => SwitchState::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwitchState::Open => "open",
            SwitchState::Closed => "closed",
            SwitchState::Fault => "fault",
            SwitchState::Other => "other",
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SwitchState {
    fn from(s: &str) -> Self {
        SwitchState::parse(s)
    }
}

impl From<String> for SwitchState {
    fn from(s: String) -> Self {
        SwitchState::parse(&s)
    }
}

impl From<SwitchState> for String {
    fn from(state: SwitchState) -> Self {
        state.as_str().to_string()
    }
}
