//! Milestone table mapping training progress to evaluation intervals

use crate::error::ConfigError;

/// Immutable schedule of `(milestone, interval)` pairs
///
/// Built once from a base interval plus a user-supplied list; the implicit
/// first entry is `(0, start_interval)`. `resolve` picks the interval of
/// the greatest milestone at or below the given progress value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestoneTable {
    milestones: Vec<u64>,
    intervals: Vec<u64>,
}

impl MilestoneTable {
    /// Build the table, failing fast on a malformed schedule
    ///
    /// Milestones must be strictly increasing and positive (milestone 0
    /// belongs to the implicit start entry); intervals must be positive.
    pub fn new(start_interval: u64, dynamic: &[(u64, u64)]) -> Result<Self, ConfigError> {
        if start_interval == 0 {
            return Err(ConfigError::ZeroStartInterval);
        }
        let mut milestones = Vec::with_capacity(dynamic.len() + 1);
        let mut intervals = Vec::with_capacity(dynamic.len() + 1);
        milestones.push(0);
        intervals.push(start_interval);
        for &(milestone, interval) in dynamic {
            if milestone == 0 {
                return Err(ConfigError::ZeroMilestone);
            }
            if interval == 0 {
                return Err(ConfigError::ZeroInterval(milestone));
            }
            let prev = *milestones.last().unwrap_or(&0);
            if milestone <= prev {
                return Err(ConfigError::NonIncreasingMilestones { prev, next: milestone });
            }
            milestones.push(milestone);
            intervals.push(interval);
        }
        Ok(Self { milestones, intervals })
    }

    /// Interval in effect at `progress`
    ///
    /// A progress value exactly equal to a milestone resolves to the
    /// interval beginning at that milestone. O(log n) binary search.
    pub fn resolve(&self, progress: u64) -> u64 {
        let step = self.milestones.partition_point(|&m| m <= progress);
        self.intervals[step - 1]
    }

    /// Number of entries, including the implicit start entry
    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    /// Always false: the start entry is always present
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_milestone_schedule() {
        let table = MilestoneTable::new(5, &[(10, 2), (20, 1)]).unwrap();
        assert_eq!(table.resolve(0), 5);
        assert_eq!(table.resolve(9), 5);
        assert_eq!(table.resolve(10), 2);
        assert_eq!(table.resolve(19), 2);
        assert_eq!(table.resolve(20), 1);
        assert_eq!(table.resolve(100), 1);
    }

    #[test]
    fn test_resolve_without_dynamic_entries() {
        let table = MilestoneTable::new(3, &[]).unwrap();
        assert_eq!(table.resolve(0), 3);
        assert_eq!(table.resolve(u64::MAX), 3);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_new_rejects_zero_start_interval() {
        assert_eq!(MilestoneTable::new(0, &[]), Err(ConfigError::ZeroStartInterval));
    }

    #[test]
    fn test_new_rejects_zero_milestone() {
        assert_eq!(MilestoneTable::new(5, &[(0, 2)]), Err(ConfigError::ZeroMilestone));
    }

    #[test]
    fn test_new_rejects_zero_interval() {
        assert_eq!(MilestoneTable::new(5, &[(10, 0)]), Err(ConfigError::ZeroInterval(10)));
    }

    #[test]
    fn test_new_rejects_non_increasing_milestones() {
        assert_eq!(
            MilestoneTable::new(5, &[(20, 2), (10, 1)]),
            Err(ConfigError::NonIncreasingMilestones { prev: 20, next: 10 })
        );
        assert_eq!(
            MilestoneTable::new(5, &[(10, 2), (10, 1)]),
            Err(ConfigError::NonIncreasingMilestones { prev: 10, next: 10 })
        );
    }

    #[test]
    fn test_resolve_at_exact_milestone_takes_new_interval() {
        let table = MilestoneTable::new(8, &[(4, 4)]).unwrap();
        assert_eq!(table.resolve(3), 8);
        assert_eq!(table.resolve(4), 4);
    }
}
