use std::cmp::Ordering;

/// Ranking key for one candidate on one date. Ordering puts the best
/// candidate first, so a plain ascending sort yields the pick order:
/// preferred before not, higher debt before lower, fewer shifts so far
/// before more, initials as the final deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankKey {
    pub preferred: bool,
    /// desired shifts minus shifts assigned so far this month
    pub debt: i64,
    pub assigned: u32,
    pub initials: String,
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .preferred
            .cmp(&self.preferred)
            .then_with(|| other.debt.cmp(&self.debt))
            .then_with(|| self.assigned.cmp(&other.assigned))
            .then_with(|| self.initials.cmp(&other.initials))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
