//! Phase/side tags stamped by a feed and inherited by everything it reaches.

/// Provenance of energization: the feed's phase and optional side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Provenance {
    pub phase: Option<String>,
    pub side: Option<String>,
}

impl Provenance {
    pub fn new(phase: impl Into<String>, side: Option<String>) -> Self {
        Self {
            phase: Some(phase.into()),
            side,
        }
    }

    /// Palette key in `<phase>_<side>` form, if both tags are present.
    pub fn palette_key(&self) -> Option<String> {
        match (&self.phase, &self.side) {
            (Some(phase), Some(side)) => Some(format!("{phase}_{side}")),
            _ => None,
        }
    }
}
