/// End-to-end tests that drive the tool layer against a real database
use habit_journal_mcp::*;
use chrono::{TimeZone, Utc};
use tempfile::{tempdir, NamedTempFile};

#[cfg(test)]
mod tool_workflow_tests {
    use super::*;

    /// A habit backdated to a fixed day, so month views are deterministic
    fn backdated_habit(store: &SqliteStore, name: &str, y: i32, m: u32, d: u32) -> Habit {
        let habit = Habit::from_existing(
            HabitId::new(),
            name.to_string(),
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            true,
            None,
        );
        store.create_habit(&habit).unwrap();
        habit
    }

    #[tokio::test]
    async fn test_server_starts_and_reopens_the_same_database() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let server = HabitJournalServer::new(db_path.clone())
            .await
            .expect("Failed to create server");

        add_habit(
            server.store(),
            AddHabitParams {
                name: "Meditate".to_string(),
            },
        )
        .unwrap();

        // A second server over the same file sees the stored habit
        let reopened = HabitJournalServer::new(db_path)
            .await
            .expect("Failed to create second server");

        let listing = list_habits(
            reopened.store(),
            ListHabitsParams {
                include_archived: None,
            },
        )
        .unwrap();
        assert_eq!(listing.habits.len(), 1);
        assert_eq!(listing.habits[0].stats.habit_name, "Meditate");
    }

    #[test]
    fn test_toggle_shows_up_in_the_day_view() {
        let temp_dir = tempdir().unwrap();
        let store = SqliteStore::new(temp_dir.path().join("test.db")).unwrap();

        let habit = backdated_habit(&store, "Run", 2024, 1, 10);

        toggle_habit(
            &store,
            ToggleParams {
                habit_id: habit.id.to_string(),
                date: Some("2024-01-10".to_string()),
            },
        )
        .unwrap();

        let view = today_view(
            &store,
            TodayParams {
                date: Some("2024-01-10".to_string()),
            },
        )
        .unwrap();

        assert_eq!(view.day.habits.len(), 1);
        assert!(view.day.habits[0].completed);
        assert_eq!(view.day.completion_percentage, 100);
        assert!(view.message.contains("1/1 done (100%)"));
    }

    #[test]
    fn test_month_stats_and_calendar_agree_on_a_closed_month() {
        let temp_dir = tempdir().unwrap();
        let store = SqliteStore::new(temp_dir.path().join("test.db")).unwrap();

        let habit = backdated_habit(&store, "Run", 2024, 1, 10);

        for date in ["2024-01-10", "2024-01-11", "2024-01-12"] {
            toggle_habit(
                &store,
                ToggleParams {
                    habit_id: habit.id.to_string(),
                    date: Some(date.to_string()),
                },
            )
            .unwrap();
        }

        let stats = month_stats(
            &store,
            MonthStatsParams {
                month: Some("2024-01".to_string()),
            },
        )
        .unwrap();

        assert_eq!(stats.month, "2024-01");
        assert_eq!(stats.habits.len(), 1);
        // Tracked from creation on the 10th through January 31st
        assert_eq!(stats.habits[0].total_days, 22);
        assert_eq!(stats.habits[0].completed_days, 3);
        assert_eq!(stats.habits[0].completion_rate, 14);

        let calendar = month_calendar(
            &store,
            CalendarParams {
                month: Some("2024-01".to_string()),
            },
        )
        .unwrap();

        assert_eq!(calendar.month, "2024-01");
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.summary.perfect, 3);
        assert_eq!(calendar.summary.partial, 0);
        assert_eq!(calendar.summary.tracked, 31);
        assert_eq!(calendar.summary.success_rate, 10);

        // January 10th was fully done; the 1st predates the habit
        assert_eq!(calendar.days[9].status, DayStatus::Full);
        assert_eq!(calendar.days[9].completion_percentage, 100);
        assert_eq!(calendar.days[0].status, DayStatus::Empty);
    }

    #[test]
    fn test_full_habit_lifecycle() {
        let temp_dir = tempdir().unwrap();
        let store = SqliteStore::new(temp_dir.path().join("test.db")).unwrap();

        let added = add_habit(
            &store,
            AddHabitParams {
                name: "Meditate".to_string(),
            },
        )
        .unwrap();
        assert!(added.success);

        let toggled = toggle_habit(
            &store,
            ToggleParams {
                habit_id: added.habit_id.clone(),
                date: None,
            },
        )
        .unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.current_streak, 1);

        let view = today_view(&store, TodayParams { date: None }).unwrap();
        assert_eq!(view.day.completion_percentage, 100);

        // Archiving hides the habit from the daily checklist
        archive_habit(
            &store,
            ArchiveHabitParams {
                habit_id: added.habit_id.clone(),
            },
        )
        .unwrap();

        let archived_view = today_view(&store, TodayParams { date: None }).unwrap();
        assert!(archived_view.day.habits.is_empty());

        let default_listing = list_habits(
            &store,
            ListHabitsParams {
                include_archived: None,
            },
        )
        .unwrap();
        assert!(default_listing.habits.is_empty());

        let full_listing = list_habits(
            &store,
            ListHabitsParams {
                include_archived: Some(true),
            },
        )
        .unwrap();
        assert_eq!(full_listing.habits.len(), 1);
        assert!(!full_listing.habits[0].active);

        // Restoring puts it back
        restore_habit(
            &store,
            RestoreHabitParams {
                habit_id: added.habit_id.clone(),
            },
        )
        .unwrap();

        let restored_listing = list_habits(
            &store,
            ListHabitsParams {
                include_archived: None,
            },
        )
        .unwrap();
        assert_eq!(restored_listing.habits.len(), 1);
        assert!(restored_listing.habits[0].active);

        // A hard delete removes the habit and its history for good
        delete_habit(
            &store,
            DeleteHabitParams {
                habit_id: added.habit_id,
                hard: Some(true),
            },
        )
        .unwrap();

        let final_listing = list_habits(
            &store,
            ListHabitsParams {
                include_archived: Some(true),
            },
        )
        .unwrap();
        assert!(final_listing.habits.is_empty());
        assert!(store.list_completions().unwrap().is_empty());
    }
}
