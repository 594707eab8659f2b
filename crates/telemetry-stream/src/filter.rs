//! Session-time monotonicity filter.

/// Where the filter is in its two-state lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FilterState {
    /// Nothing admitted yet; the next packet is admitted unconditionally.
    #[default]
    AwaitingFirst,
    /// Holds the `time` of the last admitted packet.
    Streaming { last_time: f32 },
}

/// Admits a packet only if its `time` is strictly greater than the last
/// admitted one. The first packet is always admitted.
///
/// Equal timestamps are dropped. A NaN `time` never compares greater, so it
/// is dropped once streaming. A NaN first packet is still admitted and
/// becomes the anchor, after which nothing compares greater.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicFilter {
    state: FilterState,
}

impl MonotonicFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Decide whether a packet with session `time` should be emitted,
    /// advancing the state when it is.
    pub fn admit(&mut self, time: f32) -> bool {
        let admitted = match self.state {
            FilterState::AwaitingFirst => true,
            FilterState::Streaming { last_time } => time > last_time,
        };
        if admitted {
            self.state = FilterState::Streaming { last_time: time };
        }
        admitted
    }
}
