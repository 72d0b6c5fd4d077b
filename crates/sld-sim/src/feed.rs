//! Feed points.

use sld_core::{Provenance, SegmentId};

/// A designated always-energized source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// Name from a named feed map, if the topology gave one.
    pub name: Option<String>,
    pub segment: SegmentId,
    /// Declared phase/side, stamped on the feed segment every run.
    pub provenance: Provenance,
    /// Static presentation group.
    pub group: Option<String>,
}

impl Feed {
    pub fn new(segment: SegmentId, phase: impl Into<String>) -> Self {
        Self {
            name: None,
            segment,
            provenance: Provenance::new(phase, None),
            group: None,
        }
    }

    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.provenance.side = Some(side.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
