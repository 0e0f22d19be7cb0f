//! The two contending traffic flows.

/// Travel direction through the bottleneck.
///
/// Doubles as an index into `[T; 2]` per-direction arrays via
/// [`Direction::index`].  Whenever both directions act "at the same instant"
/// (e.g. both contend for the lock at startup), ties are broken in
/// [`Direction::BOTH`] order — North first — which is what makes runs
/// deterministic.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Both directions, in the canonical tie-break order.
    pub const BOTH: [Direction; 2] = [Direction::North, Direction::South];

    /// The opposing flow.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }

    /// Index into `[T; 2]` per-direction storage.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
