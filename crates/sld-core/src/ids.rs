use core::fmt;
use core::num::NonZeroU32;

/// Handle of one segment (wire node or switch) in a built graph.
///
/// Nodes and switches share one keyspace and are numbered densely in
/// declaration order, so a `SegmentId` doubles as a slot into any per-segment
/// vector. Stored as index+1 so `Option<SegmentId>` costs nothing extra.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(NonZeroU32);

impl SegmentId {
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Id for a vector slot. Slots past `u32::MAX - 1` saturate.
    pub fn from_slot(slot: usize) -> Self {
        Self::from_index(u32::try_from(slot).unwrap_or(u32::MAX))
    }

    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seg#{}", self.index())
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}
