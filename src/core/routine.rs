use chrono::NaiveDate;

use super::goal::RecurringGoal;

/// Today's coaching routine.
#[derive(Debug, Clone, Default)]
pub struct Routine {
    /// Due today and not yet done, earliest hour first.
    pub remaining: Vec<RecurringGoal>,
    /// Already advanced today.
    pub done_today: Vec<RecurringGoal>,
    /// Ready to be completed for a trophy.
    pub finished: Vec<RecurringGoal>,
}

impl Routine {
    pub fn build(goals: &[RecurringGoal], today: NaiveDate) -> Self {
        let mut routine = Self::default();
        for goal in goals.iter().filter(|g| !g.archived) {
            if goal.is_finished() {
                routine.finished.push(goal.clone());
            } else if goal.is_completed_on(today) {
                routine.done_today.push(goal.clone());
            } else if goal.is_due(today) {
                routine.remaining.push(goal.clone());
            }
        }
        routine.remaining.sort_by_key(|g| g.time_of_day);
        routine.done_today.sort_by_key(|g| g.time_of_day);
        routine
    }

    pub fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // Monday
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn goal(name: &str, hour: u8) -> RecurringGoal {
        let mut g = RecurringGoal::new(name, 10);
        g.time_of_day = hour;
        g
    }

    #[test]
    fn remaining_sorted_by_hour() {
        let goals = vec![goal("evening", 20), goal("morning", 6), goal("noon", 12)];
        let routine = Routine::build(&goals, today());
        let names: Vec<&str> = routine.remaining.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["morning", "noon", "evening"]);
        assert!(!routine.is_done());
    }

    #[test]
    fn goals_split_by_state() {
        let mut done = goal("done", 8);
        done.last_completed = Some(today());
        done.progress = 3;
        let mut finished = goal("finished", 8);
        finished.progress = 10;
        let mut archived = goal("archived", 8);
        archived.progress = 10;
        archived.archived = true;
        let mut weekend = goal("weekend", 8);
        weekend.days_of_week = [true, false, false, false, false, false, true];

        let routine = Routine::build(&[done, finished, archived, weekend], today());
        assert!(routine.is_done());
        assert_eq!(routine.done_today.len(), 1);
        assert_eq!(routine.finished.len(), 1);
        assert_eq!(routine.finished[0].name, "finished");
    }
}
