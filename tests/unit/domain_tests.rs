/// Unit tests for the domain layer: habits, completions and streaks
use habit_journal_mcp::*;
use chrono::{NaiveDate, TimeZone, Utc};

#[cfg(test)]
mod habit_domain_tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_habit_creation_trims_name() {
        let habit = Habit::new("  Drink Water  ".to_string()).unwrap();

        assert_eq!(habit.name, "Drink Water");
        assert!(habit.active);
        assert!(habit.archived_at.is_none());
    }

    #[test]
    fn test_habit_name_rules() {
        assert!(Habit::new("".to_string()).is_err());
        assert!(Habit::new("\t \n".to_string()).is_err());
        assert!(Habit::new("x".repeat(101)).is_err());
        assert!(Habit::new("x".repeat(100)).is_ok());
    }

    #[test]
    fn test_archive_cycle_tracks_calendar_days() {
        let mut habit = Habit::from_existing(
            HabitId::new(),
            "Meditate".to_string(),
            Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap(),
            true,
            None,
        );

        assert_eq!(habit.created_on(), day(2024, 1, 10));
        assert_eq!(habit.archived_on(), None);

        habit.archive(Utc.with_ymd_and_hms(2024, 2, 3, 23, 59, 0).unwrap());
        assert!(!habit.active);
        assert_eq!(habit.archived_on(), Some(day(2024, 2, 3)));

        habit.restore();
        assert!(habit.active);
        assert_eq!(habit.archived_on(), None);
    }

    #[test]
    fn test_completion_ids_follow_the_day() {
        let habit_id = HabitId::new();

        let monday = Completion::new(habit_id.clone(), day(2024, 3, 4), true);
        let tuesday = Completion::new(habit_id.clone(), day(2024, 3, 5), true);

        assert_ne!(monday.id, tuesday.id);
        assert_eq!(monday.id.to_string(), format!("{}-2024-03-04", habit_id));
    }

    #[test]
    fn test_streak_is_zero_without_history() {
        let habit_id = HabitId::new();
        let summary = calculate_streak(&habit_id, &[], day(2024, 3, 10));

        assert_eq!(summary.current, 0);
        assert_eq!(summary.longest, 0);
    }

    #[test]
    fn test_streak_filters_to_its_habit_and_done_records() {
        let mine = HabitId::new();
        let theirs = HabitId::new();

        let completions = vec![
            // Three days in a row for the habit under test
            Completion::new(mine.clone(), day(2024, 3, 8), true),
            Completion::new(mine.clone(), day(2024, 3, 9), true),
            Completion::new(mine.clone(), day(2024, 3, 10), true),
            // A day marked and then unmarked does not extend anything
            Completion::new(mine.clone(), day(2024, 3, 7), false),
            // Another habit's run must not leak in
            Completion::new(theirs.clone(), day(2024, 3, 6), true),
            Completion::new(theirs, day(2024, 3, 7), true),
        ];

        let summary = calculate_streak(&mine, &completions, day(2024, 3, 10));
        assert_eq!(summary.current, 3);
        assert_eq!(summary.longest, 3);
    }

    #[test]
    fn test_streak_current_requires_recent_activity() {
        let habit_id = HabitId::new();
        let completions = vec![
            Completion::new(habit_id.clone(), day(2024, 3, 1), true),
            Completion::new(habit_id.clone(), day(2024, 3, 2), true),
            Completion::new(habit_id.clone(), day(2024, 3, 3), true),
        ];

        // Still alive the day after the last completion
        let alive = calculate_streak(&habit_id, &completions, day(2024, 3, 4));
        assert_eq!(alive.current, 3);

        // Two days later the current streak is gone, the longest remains
        let expired = calculate_streak(&habit_id, &completions, day(2024, 3, 5));
        assert_eq!(expired.current, 0);
        assert_eq!(expired.longest, 3);
    }
}
