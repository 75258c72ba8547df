use crate::core::clock::Clock;
use crate::domain::ExpenseId;

/// Hands out expense identifiers derived from wall-clock milliseconds.
///
/// Two submissions inside the same millisecond would collide on the raw
/// timestamp, so each id is at least one greater than the previous one.
#[derive(Debug, Default, Clone)]
pub struct ExpenseIdGenerator {
    last: Option<u64>,
}

impl ExpenseIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, clock: &dyn Clock) -> ExpenseId {
        let now = u64::try_from(clock.now().timestamp_millis()).unwrap_or(0);
        let id = match self.last {
            Some(last) => now.max(last.saturating_add(1)),
            None => now,
        };
        self.last = Some(id);
        ExpenseId(id)
    }
}
