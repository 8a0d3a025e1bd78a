// viewerscan state managers
// Managers own in-memory state that outlives a single scan cycle.

pub mod visitor_tracker;
