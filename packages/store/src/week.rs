//! Weekly window math and the derived [`WeeklyView`] projection.
//!
//! A weekly view is seven consecutive calendar days anchored at
//! `today + offset weeks`, starting on a configurable weekday. It is never
//! persisted: [`WeeklyView::project`] recomputes it from the flat meal list
//! whenever the list or the offset changes.

use chrono::{Datelike, Days, Duration, Local, NaiveDate, Weekday};

use crate::models::Meal;

/// The current calendar day in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The seven days of the week containing `today + offset weeks`.
pub fn week_window(today: NaiveDate, offset: i32, week_starts_on: Weekday) -> [NaiveDate; 7] {
    let anchor = today + Duration::weeks(offset as i64);
    let first = start_of_week(anchor, week_starts_on);
    std::array::from_fn(|i| first + Days::new(i as u64))
}

/// The most recent `week_starts_on` on or before `date`.
pub fn start_of_week(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let days_back = (7 + date.weekday().num_days_from_monday()
        - week_starts_on.num_days_from_monday())
        % 7;
    date - Duration::days(days_back as i64)
}

/// One calendar day of a [`WeeklyView`] and its time-sorted meals.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
}

impl DayBucket {
    pub fn total_calories(&self) -> u32 {
        self.meals.iter().filter_map(|m| m.calories).sum()
    }

    /// How many of the day's meals kept to the diet.
    pub fn on_diet_count(&self) -> usize {
        self.meals.iter().filter(|m| m.on_diet).count()
    }
}

/// A 7-day windowed projection of the meal list. Derived state only.
#[derive(Clone, Debug, PartialEq)]
pub struct WeeklyView {
    pub days: Vec<DayBucket>,
}

impl WeeklyView {
    /// Partition `meals` into the week of `today + offset weeks`.
    ///
    /// Assumes `meals` is sorted by `(date, time, id)` — [`crate::MealStore`]
    /// maintains that invariant — so each bucket comes out sorted by time.
    pub fn project(
        meals: &[Meal],
        today: NaiveDate,
        offset: i32,
        week_starts_on: Weekday,
    ) -> Self {
        let days = week_window(today, offset, week_starts_on)
            .into_iter()
            .map(|date| DayBucket {
                date,
                meals: meals.iter().filter(|m| m.date == date).cloned().collect(),
            })
            .collect();
        Self { days }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[6].date
    }

    /// Whether a meal with this id appears anywhere in the window.
    pub fn contains(&self, id: u64) -> bool {
        self.days
            .iter()
            .any(|day| day.meals.iter().any(|m| m.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meal(id: u64, day: NaiveDate, hhmm: (u32, u32)) -> Meal {
        Meal {
            id,
            name: format!("meal-{id}"),
            description: String::new(),
            date: day,
            time: NaiveTime::from_hms_opt(hhmm.0, hhmm.1, 0).unwrap(),
            on_diet: id % 2 == 0,
            calories: Some(100 * id as u32),
        }
    }

    #[test]
    fn start_of_week_respects_configured_weekday() {
        // 2025-03-12 is a Wednesday.
        let wed = date(2025, 3, 12);
        assert_eq!(start_of_week(wed, Weekday::Mon), date(2025, 3, 10));
        assert_eq!(start_of_week(wed, Weekday::Sun), date(2025, 3, 9));
        assert_eq!(start_of_week(wed, Weekday::Wed), wed);
        // A date that already is the week start maps to itself.
        assert_eq!(start_of_week(date(2025, 3, 10), Weekday::Mon), date(2025, 3, 10));
    }

    #[test]
    fn week_window_is_seven_consecutive_days() {
        let today = date(2025, 3, 12);
        let window = week_window(today, 0, Weekday::Mon);
        assert_eq!(window[0], date(2025, 3, 10));
        assert_eq!(window[6], date(2025, 3, 16));
        for pair in window.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }

        // Offsets move the anchor by whole weeks, crossing month boundaries.
        let last_week = week_window(today, -1, Weekday::Mon);
        assert_eq!(last_week[0], date(2025, 3, 3));
        let next_month = week_window(today, 3, Weekday::Mon);
        assert_eq!(next_month[0], date(2025, 3, 31));
        assert_eq!(next_month[6], date(2025, 4, 6));
    }

    #[test]
    fn projection_buckets_by_date_and_keeps_time_order() {
        let today = date(2025, 3, 12);
        let mut meals = vec![
            meal(1, date(2025, 3, 10), (8, 0)),
            meal(2, date(2025, 3, 10), (12, 30)),
            meal(3, date(2025, 3, 12), (19, 0)),
            meal(4, date(2025, 3, 20), (9, 0)), // outside the window
        ];
        meals.sort_by_key(|m| m.sort_key());

        let view = WeeklyView::project(&meals, today, 0, Weekday::Mon);
        assert_eq!(view.days.len(), 7);
        assert_eq!(view.days[0].meals.len(), 2);
        assert!(view.days[0].meals[0].time < view.days[0].meals[1].time);
        assert_eq!(view.days[2].meals.len(), 1);
        assert!(!view.contains(4));

        // Each meal in the window appears in exactly one bucket.
        let total: usize = view.days.iter().map(|d| d.meals.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn projection_is_idempotent() {
        let today = date(2025, 3, 12);
        let meals = vec![meal(1, today, (7, 15)), meal(2, today, (13, 0))];
        let first = WeeklyView::project(&meals, today, 0, Weekday::Mon);
        let second = WeeklyView::project(&meals, today, 0, Weekday::Mon);
        assert_eq!(first, second);
    }

    #[test]
    fn day_totals() {
        let today = date(2025, 3, 12);
        let meals = vec![meal(1, today, (7, 0)), meal(2, today, (12, 0))];
        let view = WeeklyView::project(&meals, today, 0, Weekday::Mon);
        let day = &view.days[2];
        assert_eq!(day.total_calories(), 300);
        assert_eq!(day.on_diet_count(), 1);
    }
}
