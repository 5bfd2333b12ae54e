use serde::{Deserialize, Serialize};

/// Weighted storage credits for a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageQuota {
    pub limit: u32,
    pub item_weight: f64,
    pub task_weight: f64,
}

impl Default for StorageQuota {
    fn default() -> Self {
        Self {
            limit: 500,
            item_weight: 1.5,
            task_weight: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsage {
    pub items: u32,
    pub tasks: u32,
}

impl StorageQuota {
    pub fn used(&self, usage: StorageUsage) -> u32 {
        let total = usage.tasks as f64 * self.task_weight + usage.items as f64 * self.item_weight;
        total.round() as u32
    }

    pub fn remaining(&self, usage: StorageUsage) -> u32 {
        self.limit.saturating_sub(self.used(usage))
    }

    pub fn is_full(&self, usage: StorageUsage) -> bool {
        self.used(usage) >= self.limit
    }

    /// Share of the limit taken by inventory items, 0-100+.
    pub fn items_percent(&self, usage: StorageUsage) -> f64 {
        self.percent(usage.items as f64 * self.item_weight)
    }

    pub fn tasks_percent(&self, usage: StorageUsage) -> f64 {
        self.percent(usage.tasks as f64 * self.task_weight)
    }

    fn percent(&self, credits: f64) -> f64 {
        if self.limit == 0 {
            return 100.0;
        }
        credits * 100.0 / self.limit as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_sum_rounds() {
        let quota = StorageQuota::default();
        let usage = StorageUsage { items: 3, tasks: 5 };
        // 4.5 + 2.5
        assert_eq!(quota.used(usage), 7);
        assert_eq!(quota.remaining(usage), 493);
        assert!(!quota.is_full(usage));
    }

    #[test]
    fn remaining_saturates_when_over_limit() {
        let quota = StorageQuota::default();
        let usage = StorageUsage { items: 400, tasks: 0 };
        assert_eq!(quota.used(usage), 600);
        assert_eq!(quota.remaining(usage), 0);
        assert!(quota.is_full(usage));
    }

    #[test]
    fn category_percentages() {
        let quota = StorageQuota::default();
        let usage = StorageUsage { items: 100, tasks: 200 };
        assert!((quota.items_percent(usage) - 30.0).abs() < 1e-9);
        assert!((quota.tasks_percent(usage) - 20.0).abs() < 1e-9);
    }
}
