/// Unit tests for the analytics layer: day snapshots, stats and the calendar
use habit_journal_mcp::*;
use chrono::{NaiveDate, TimeZone, Utc};

#[cfg(test)]
mod aggregation_tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit_created_on(name: &str, y: i32, m: u32, d: u32) -> Habit {
        Habit::from_existing(
            HabitId::new(),
            name.to_string(),
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            true,
            None,
        )
    }

    fn done(habit: &Habit, y: i32, m: u32, d: u32) -> Completion {
        Completion::new(habit.id.clone(), day(y, m, d), true)
    }

    #[test]
    fn test_daily_percentage_rounds_to_whole_numbers() {
        let habits = vec![
            habit_created_on("A", 2024, 1, 1),
            habit_created_on("B", 2024, 1, 1),
            habit_created_on("C", 2024, 1, 1),
        ];

        let one_done = vec![done(&habits[0], 2024, 1, 5)];
        assert_eq!(daily_completion_percentage(&habits, &one_done), 33);

        let two_done = vec![done(&habits[0], 2024, 1, 5), done(&habits[1], 2024, 1, 5)];
        assert_eq!(daily_completion_percentage(&habits, &two_done), 67);

        assert_eq!(daily_completion_percentage(&[], &one_done), 0);
    }

    #[test]
    fn test_day_data_excludes_habits_created_later() {
        let early = habit_created_on("Early", 2024, 1, 1);
        let late = habit_created_on("Late", 2024, 1, 20);

        let habits = vec![early.clone(), late];
        let completions = vec![done(&early, 2024, 1, 10)];

        let snapshot = day_data(day(2024, 1, 10), &habits, &completions);

        assert_eq!(snapshot.habits.len(), 1);
        assert_eq!(snapshot.habits[0].name, "Early");
        assert!(snapshot.habits[0].completed);
        assert_eq!(snapshot.completion_percentage, 100);
    }

    #[test]
    fn test_monthly_stats_clip_to_creation_and_today() {
        let habit = habit_created_on("Stretch", 2024, 2, 20);
        let completions = vec![done(&habit, 2024, 2, 21), done(&habit, 2024, 2, 22)];

        // Queried mid-month: the window is creation day through today
        let stats = monthly_habit_stats(&habit, &completions, day(2024, 2, 1), day(2024, 2, 25));

        assert_eq!(stats.total_days, 6); // Feb 20 through Feb 25
        assert_eq!(stats.completed_days, 2);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn test_monthly_stats_future_month_is_all_zero() {
        let habit = habit_created_on("Stretch", 2024, 2, 20);
        let completions = vec![done(&habit, 2024, 2, 21)];

        let stats = monthly_habit_stats(&habit, &completions, day(2024, 6, 1), day(2024, 2, 25));

        assert_eq!(stats.total_days, 0);
        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 0);
    }

    #[test]
    fn test_monthly_stats_stop_counting_after_archive() {
        let mut habit = habit_created_on("Journal", 2024, 1, 1);
        habit.archive(Utc.with_ymd_and_hms(2024, 1, 12, 8, 0, 0).unwrap());

        let completions = vec![
            done(&habit, 2024, 1, 10),
            done(&habit, 2024, 1, 11),
            // After the archive day, this mark no longer counts
            done(&habit, 2024, 1, 20),
        ];

        let stats = monthly_habit_stats(&habit, &completions, day(2024, 1, 1), day(2024, 1, 31));

        assert_eq!(stats.total_days, 12); // Jan 1 through the archive day
        assert_eq!(stats.completed_days, 2);
    }

    #[test]
    fn test_day_status_vocabulary_serializes_snake_case() {
        let as_json = |status: DayStatus| serde_json::to_value(status).unwrap();

        assert_eq!(as_json(DayStatus::Future), serde_json::json!("future"));
        assert_eq!(as_json(DayStatus::Empty), serde_json::json!("empty"));
        assert_eq!(as_json(DayStatus::Partial), serde_json::json!("partial"));
        assert_eq!(as_json(DayStatus::Full), serde_json::json!("full"));
    }

    #[test]
    fn test_month_summary_counts_each_kind_of_day() {
        let first = habit_created_on("A", 2024, 4, 1);
        let second = habit_created_on("B", 2024, 4, 1);
        let habits = vec![first.clone(), second.clone()];

        let completions = vec![
            // April 2: both done (perfect)
            done(&first, 2024, 4, 2),
            done(&second, 2024, 4, 2),
            // April 3: one of two done (partial)
            done(&first, 2024, 4, 3),
        ];

        // Today is April 10, so 10 days of April count
        let summary = month_summary(&habits, &completions, day(2024, 4, 1), day(2024, 4, 10));

        assert_eq!(summary.tracked, 10);
        assert_eq!(summary.perfect, 1);
        assert_eq!(summary.partial, 1);
        assert_eq!(summary.success_rate, 10); // 1 of 10 days perfect
    }

    #[test]
    fn test_all_monthly_habit_stats_keeps_habit_order() {
        let first = habit_created_on("First", 2024, 3, 1);
        let second = habit_created_on("Second", 2024, 3, 2);
        let habits = vec![first, second];

        let all = all_monthly_habit_stats(&habits, &[], day(2024, 3, 1), day(2024, 3, 15));

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].habit_name, "First");
        assert_eq!(all[1].habit_name, "Second");
    }

    #[test]
    fn test_day_data_is_reproducible() {
        let first = habit_created_on("Read", 2024, 1, 1);
        let second = habit_created_on("Run", 2024, 1, 3);
        let habits = vec![first.clone(), second];
        let completions = vec![
            done(&first, 2024, 1, 5),
            Completion::new(first.id.clone(), day(2024, 1, 6), false),
        ];

        // Same inputs, same snapshot: nothing reads the clock or mutates.
        let once = day_data(day(2024, 1, 5), &habits, &completions);
        let twice = day_data(day(2024, 1, 5), &habits, &completions);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_daily_percentage_bounds_and_monotonicity() {
        let habits: Vec<Habit> = (0..5)
            .map(|i| habit_created_on(&format!("H{i}"), 2024, 1, 1))
            .collect();

        let mut completions = Vec::new();
        let mut previous = 0;
        for habit in &habits {
            completions.push(done(habit, 2024, 1, 10));
            let current = daily_completion_percentage(&habits, &completions);

            // Every extra completed record can only push the figure up,
            // and with one record per habit it stays within 0..=100.
            assert!(current >= previous);
            assert!(current <= 100);
            previous = current;
        }

        assert_eq!(previous, 100);
    }
}
