#![forbid(unsafe_code)]

//! Selection bookkeeping.
//!
//! [`SelectionState`] keeps two views of "which card is selected":
//!
//! - `previous`: the logical selection. It moves as soon as a transition is
//!   accepted, so a burst of next/previous commands each compute their
//!   candidate from the newest target rather than from what is on screen.
//! - `current`: the committed selection. It moves only when a transition
//!   commits, together with the active buffer flag.
//!
//! At rest both agree.

/// Position of a card: a row within a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    /// Create an index path.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Row `row` of section 0.
    #[inline]
    pub const fn row(row: usize) -> Self {
        Self::new(0, row)
    }

    /// The following row in the same section.
    #[inline]
    pub fn next_row(self) -> Option<Self> {
        self.row.checked_add(1).map(|row| Self { row, ..self })
    }

    /// The preceding row in the same section, if any.
    #[inline]
    pub fn previous_row(self) -> Option<Self> {
        self.row.checked_sub(1).map(|row| Self { row, ..self })
    }
}

/// One of the two interchangeable buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferId {
    #[default]
    A,
    B,
}

impl BufferId {
    /// The other buffer.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Array index for slot storage.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Current/previous selection and the active buffer flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<IndexPath>,
    previous: Option<IndexPath>,
    active_buffer: BufferId,
    flips: u64,
}

impl SelectionState {
    /// Nothing selected, buffer A active.
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed selection.
    pub fn current(&self) -> Option<IndexPath> {
        self.current
    }

    /// The logical selection: the most recently accepted target.
    pub fn previous(&self) -> Option<IndexPath> {
        self.previous
    }

    pub fn active_buffer(&self) -> BufferId {
        self.active_buffer
    }

    /// How many times the active buffer has flipped.
    pub fn flip_count(&self) -> u64 {
        self.flips
    }

    /// Whether a transition toward `previous` is still uncommitted.
    pub fn is_pending(&self) -> bool {
        self.current != self.previous
    }

    /// Candidate for "next": one row after the logical selection, or row 1
    /// of section 0 when nothing is selected. `None` when out of range.
    pub fn next_candidate(&self, count: usize) -> Option<IndexPath> {
        self.previous
            .unwrap_or_default()
            .next_row()
            .filter(|candidate| candidate.row < count)
    }

    /// Candidate for "previous": one row before the logical selection.
    /// `None` at row 0 or with nothing selected.
    pub fn previous_candidate(&self, count: usize) -> Option<IndexPath> {
        self.previous
            .and_then(IndexPath::previous_row)
            .filter(|candidate| candidate.row < count)
    }

    /// Record an accepted transition target.
    pub(crate) fn record_target(&mut self, index: IndexPath) {
        self.previous = Some(index);
    }

    /// Record a committed transition: `index` is now shown by `active`.
    pub(crate) fn commit(&mut self, index: IndexPath, active: BufferId) {
        debug_assert_ne!(active, self.active_buffer, "commit must flip the buffer");
        self.current = Some(index);
        self.active_buffer = active;
        self.flips += 1;
    }

    /// Jump to `index` without a transition (reload).
    pub(crate) fn settle_at(&mut self, index: IndexPath) {
        self.current = Some(index);
        self.previous = Some(index);
    }

    /// Forget the selection. The buffer flag is kept; it tracks the presenter.
    pub(crate) fn clear(&mut self) {
        self.current = None;
        self.previous = None;
    }
}
