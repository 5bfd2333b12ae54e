use super::bucket::TimeBucket;
use super::task::Task;

/// Tasks grouped by the bucket their due time falls in.
///
/// `columns[i]` holds the tasks of `buckets[i]` in input order. Tasks with no
/// due time land in `unscheduled`; tasks due outside every bucket land in
/// `outside`. Neither partition is part of the column mapping.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    pub columns: Vec<Vec<Task>>,
    pub unscheduled: Vec<Task>,
    pub outside: Vec<Task>,
}

impl Assignment {
    pub fn column(&self, index: usize) -> &[Task] {
        self.columns.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn assigned_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

/// Place each task in the chronologically first bucket containing its due time.
pub fn assign(tasks: &[Task], buckets: &[TimeBucket]) -> Assignment {
    // Probe buckets by start time so overlapping input still resolves to the earliest.
    let mut probe_order: Vec<usize> = (0..buckets.len()).collect();
    probe_order.sort_by_key(|&i| buckets[i].start);

    let mut assignment = Assignment {
        columns: vec![Vec::new(); buckets.len()],
        ..Default::default()
    };

    for task in tasks {
        let Some(due) = task.due else {
            assignment.unscheduled.push(task.clone());
            continue;
        };
        match probe_order.iter().find(|&&i| buckets[i].contains(due)) {
            Some(&index) => assignment.columns[index].push(task.clone()),
            None => assignment.outside.push(task.clone()),
        }
    }

    log::debug!(
        "assigned {} of {} tasks to {} buckets ({} unscheduled, {} outside)",
        assignment.assigned_count(),
        tasks.len(),
        buckets.len(),
        assignment.unscheduled.len(),
        assignment.outside.len()
    );
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bucket::{Granularity, buckets_for};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week_of_days() -> Vec<TimeBucket> {
        buckets_for(date(2024, 1, 15), Granularity::Day, 7).unwrap()
    }

    #[test]
    fn due_task_lands_in_its_day() {
        let due = Task::new("Take out bins")
            .with_due(date(2024, 1, 16).and_hms_opt(0, 0, 0).unwrap());
        let floating = Task::new("Someday");
        let assignment = assign(&[due.clone(), floating.clone()], &week_of_days());

        assert_eq!(assignment.column(1), &[due]);
        assert_eq!(assignment.assigned_count(), 1);
        assert_eq!(assignment.unscheduled, vec![floating]);
    }

    #[test]
    fn task_outside_every_bucket_is_omitted() {
        let late = Task::new("Later").with_due(date(2024, 2, 1).and_hms_opt(9, 0, 0).unwrap());
        let assignment = assign(&[late.clone()], &week_of_days());
        assert_eq!(assignment.assigned_count(), 0);
        assert_eq!(assignment.outside, vec![late]);
    }

    #[test]
    fn arrival_order_kept_within_bucket() {
        let morning = date(2024, 1, 17).and_hms_opt(8, 0, 0).unwrap();
        let evening = date(2024, 1, 17).and_hms_opt(20, 0, 0).unwrap();
        let a = Task::new("Evening walk").with_due(evening);
        let b = Task::new("Breakfast").with_due(morning);
        let assignment = assign(&[a.clone(), b.clone()], &week_of_days());
        assert_eq!(assignment.column(2), &[a, b]);
    }

    #[test]
    fn overlapping_buckets_resolve_to_earliest() {
        let week = buckets_for(date(2024, 1, 15), Granularity::Week, 1).unwrap();
        let day = buckets_for(date(2024, 1, 17), Granularity::Day, 1).unwrap();
        // Day bucket listed first but the week starts earlier.
        let buckets = vec![day[0], week[0]];
        let task = Task::new("Call plumber")
            .with_due(date(2024, 1, 17).and_hms_opt(10, 0, 0).unwrap());
        let assignment = assign(&[task.clone()], &buckets);
        assert!(assignment.column(0).is_empty());
        assert_eq!(assignment.column(1), &[task]);
    }

    #[test]
    fn each_task_in_at_most_one_bucket() {
        let buckets = week_of_days();
        let monday = date(2024, 1, 15).and_hms_opt(0, 0, 0).unwrap();
        let tasks: Vec<Task> = (0..20)
            .map(|h| Task::new(format!("t{h}")).with_due(monday + chrono::Duration::hours(h * 9)))
            .collect();
        let assignment = assign(&tasks, &buckets);
        assert_eq!(assignment.assigned_count() + assignment.outside.len(), tasks.len());
        for (i, column) in assignment.columns.iter().enumerate() {
            for task in column {
                assert!(buckets[i].contains(task.due.unwrap()));
            }
        }
    }
}
