//! Capture-group bookkeeping for a single match attempt.
//!
//! Each group owns a [`Slot`]. Entering a group records a provisional start,
//! leaving it finalises the span. The matcher stores the previous [`Slot`]
//! every time it mutates one so it can put it back when it backtracks.

/// State of one capture group on the current search path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Slot {
    open: Option<usize>,
    span: Option<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub(crate) struct CaptureSlots {
    slots: Vec<Slot>,
}

impl CaptureSlots {
    pub(crate) fn new(group_count: usize) -> Self {
        Self {
            slots: vec![Slot::default(); group_count],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.slots.fill(Slot::default());
    }

    /// The most recently finalised span of `group`, in code-point offsets.
    pub(crate) fn span(&self, group: usize) -> Option<(usize, usize)> {
        self.slots.get(group).and_then(|slot| slot.span)
    }

    /// Marks `group` as entered at `offset` unless it is already open.
    /// Returns the previous slot when something changed.
    pub(crate) fn open(&mut self, group: usize, offset: usize) -> Option<Slot> {
        let slot = &mut self.slots[group];
        if slot.open.is_some() {
            return None;
        }
        let previous = *slot;
        slot.open = Some(offset);
        Some(previous)
    }

    /// Finalises `group` as ending at `offset`. Returns the previous slot
    /// when something changed.
    pub(crate) fn close(&mut self, group: usize, offset: usize) -> Option<Slot> {
        let slot = &mut self.slots[group];
        let start = slot.open?;
        let previous = *slot;
        slot.span = Some((start, offset));
        slot.open = None;
        Some(previous)
    }

    pub(crate) fn restore(&mut self, group: usize, slot: Slot) {
        self.slots[group] = slot;
    }

    pub(crate) fn extract(&self, text: &[char]) -> Vec<Option<String>> {
        self.slots
            .iter()
            .map(|slot| slot.span.map(|(start, end)| text[start..end].iter().collect()))
            .collect()
    }
}
