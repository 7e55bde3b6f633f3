//! Request generations used to tell current responses from superseded ones.

/// Identifies one outbound request of a single source. Tokens of one source
/// are strictly increasing; only the token a source is currently waiting on
/// may change its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub(crate) struct Generation {
    current: u64,
}

impl Generation {
    pub(crate) fn advance(&mut self) -> RequestToken {
        self.current += 1;
        RequestToken(self.current)
    }
}

/// A request a source is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingLoad {
    pub(crate) token: RequestToken,
    pub(crate) page: u32,
}

/// What applying a completed fetch did to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Replaced,
    Appended,
    Failed,
    Stale,
}
