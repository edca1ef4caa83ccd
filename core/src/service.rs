use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::NaiveDate;

use crate::foods;
use crate::formula::{DEFAULT_DAILY_TARGET, calculate_daily_target};
use crate::models::{
    DailySummary, DayTotal, FoodHit, LogEntry, MealGroup, MealType, NewLogEntry, UserProfile,
    WeeklyStats,
};
use crate::stats::{compliance_pct, weekly_average};
use crate::store::{LogStore, ProfileStore, total_calories};

/// Platform-native calorie estimator.
///
/// Implementations never fail: a missing credential, an unreachable
/// upstream, or a malformed response all degrade to a fixed fallback value
/// inside the implementation, so the core always receives a usable hit.
pub trait CalorieEstimator {
    fn estimate(&self, query: &str) -> FoodHit;
}

/// The estimator supplements the local table only when it found too little
/// and the query carries enough signal to be worth a remote call.
#[must_use]
pub fn should_consult_estimator(local_matches: usize, query: &str) -> bool {
    local_matches < 3 && query.chars().count() > 2
}

/// Request-generation counter for in-flight searches. A result is accepted
/// only while no newer search has begun; anything slower than a later
/// request is discarded instead of overwriting fresher results.
#[derive(Debug, Default)]
pub struct SearchCoordinator {
    current: AtomicU64,
}

#[derive(Debug)]
pub struct SearchTicket {
    generation: u64,
}

impl SearchCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SearchTicket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket { generation }
    }

    #[must_use]
    pub fn accept(&self, ticket: &SearchTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.generation
    }
}

/// Facade over the two stores plus the formula engine. Owns all mutation
/// paths; frontends hold one of these and render what it returns.
pub struct VitalityService {
    profile: ProfileStore,
    logs: LogStore,
}

impl VitalityService {
    pub fn open(profile_path: &Path, logs_path: &Path) -> Result<Self> {
        Ok(Self {
            profile: ProfileStore::load(profile_path)?,
            logs: LogStore::load(logs_path)?,
        })
    }

    #[must_use]
    pub fn open_in_memory() -> Self {
        Self {
            profile: ProfileStore::in_memory(),
            logs: LogStore::in_memory(),
        }
    }

    // --- Profile ---

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.get()
    }

    /// Replace the profile wholesale and return the recomputed daily target.
    pub fn save_profile(&mut self, profile: UserProfile) -> Result<i32> {
        let target = calculate_daily_target(&profile);
        self.profile.replace(profile)?;
        Ok(target)
    }

    /// The current profile's daily target, or the default before setup.
    /// Historical days are always measured against this current value; no
    /// per-entry snapshot of past targets is kept.
    #[must_use]
    pub fn daily_target(&self) -> i32 {
        self.profile.get().map_or(DEFAULT_DAILY_TARGET, calculate_daily_target)
    }

    // --- Log ---

    pub fn log_food(&mut self, new: NewLogEntry) -> Result<LogEntry> {
        self.logs.append(new)
    }

    pub fn delete_log(&mut self, id: &str) -> Result<bool> {
        self.logs.remove(id)
    }

    #[must_use]
    pub fn log_entries(&self) -> &[LogEntry] {
        self.logs.entries()
    }

    // --- Aggregation ---

    /// One day's entries grouped into the four meals, with subtotals, the
    /// consumed total, and what remains of the target (floored at zero).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn daily_summary(&self, day: &str) -> DailySummary {
        let target = self.daily_target();
        let entries = self.logs.entries_for_day(day);
        let consumed = total_calories(&entries);
        let meals = MealType::ALL
            .iter()
            .map(|&meal_type| {
                let entries: Vec<LogEntry> = entries
                    .iter()
                    .filter(|e| e.meal_type == meal_type)
                    .cloned()
                    .collect();
                let subtotal = total_calories(&entries);
                MealGroup {
                    meal_type,
                    entries,
                    subtotal,
                }
            })
            .collect();
        DailySummary {
            date: day.to_string(),
            meals,
            consumed,
            target,
            remaining: (target - consumed as i32).max(0),
        }
    }

    /// Full history grouped by day, most recent day first.
    #[must_use]
    pub fn history(&self) -> Vec<(String, Vec<LogEntry>)> {
        self.logs.group_by_day()
    }

    #[must_use]
    pub fn rolling_window(&self, end: NaiveDate, num_days: u32) -> Vec<DayTotal> {
        self.logs.rolling_window(end, num_days, self.daily_target())
    }

    #[must_use]
    pub fn weekly_stats(&self, end: NaiveDate, num_days: u32) -> WeeklyStats {
        let days = self.rolling_window(end, num_days);
        WeeklyStats {
            average: weekly_average(&days),
            compliance_pct: compliance_pct(&days),
            days,
        }
    }

    // --- Search ---

    /// Local table matches first; the estimator's single result is appended
    /// only when [`should_consult_estimator`] says the local matches aren't
    /// enough.
    #[must_use]
    pub fn search_foods(&self, estimator: &dyn CalorieEstimator, query: &str) -> Vec<FoodHit> {
        let mut hits = foods::search_local(query);
        if should_consult_estimator(hits.len(), query) {
            hits.push(estimator.estimate(query));
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, Goal};

    struct MockEstimator {
        calories: u32,
        calls: std::cell::Cell<usize>,
    }

    impl MockEstimator {
        fn new(calories: u32) -> Self {
            Self {
                calories,
                calls: std::cell::Cell::new(0),
            }
        }
    }

    impl CalorieEstimator for MockEstimator {
        fn estimate(&self, query: &str) -> FoodHit {
            self.calls.set(self.calls.get() + 1);
            FoodHit {
                name: query.to_string(),
                calories: self.calories,
            }
        }
    }

    fn sample_profile() -> UserProfile {
        UserProfile {
            name: "Test".to_string(),
            age: 25,
            gender: Gender::Male,
            height_cm: 175.0,
            weight_kg: 70.0,
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::Maintain,
        }
    }

    fn new_entry(date: &str, meal: MealType, name: &str, calories: u32) -> NewLogEntry {
        NewLogEntry {
            date: date.to_string(),
            meal_type: meal,
            food_name: name.to_string(),
            calories,
            serving_size: "1 serving".to_string(),
        }
    }

    #[test]
    fn test_daily_target_defaults_before_setup() {
        let svc = VitalityService::open_in_memory();
        assert!(svc.profile().is_none());
        assert_eq!(svc.daily_target(), DEFAULT_DAILY_TARGET);
    }

    #[test]
    fn test_save_profile_returns_target() {
        let mut svc = VitalityService::open_in_memory();
        let target = svc.save_profile(sample_profile()).unwrap();
        assert_eq!(target, 2594);
        assert_eq!(svc.daily_target(), 2594);
        assert_eq!(svc.profile().unwrap().name, "Test");
    }

    #[test]
    fn test_save_profile_replaces_wholesale() {
        let mut svc = VitalityService::open_in_memory();
        svc.save_profile(sample_profile()).unwrap();

        let mut heavier = sample_profile();
        heavier.weight_kg = 80.0;
        let target = svc.save_profile(heavier).unwrap();
        // 10 kg more ⇒ 100 kcal more BMR ⇒ 155 kcal more target.
        assert_eq!(target, 2749);
        assert_eq!(svc.daily_target(), 2749);
    }

    #[test]
    fn test_daily_summary_groups_and_totals() {
        let mut svc = VitalityService::open_in_memory();
        svc.save_profile(sample_profile()).unwrap();
        svc.log_food(new_entry("2024-06-15", MealType::Breakfast, "Oatmeal", 158))
            .unwrap();
        svc.log_food(new_entry("2024-06-15", MealType::Lunch, "Rice", 205))
            .unwrap();
        svc.log_food(new_entry("2024-06-15", MealType::Lunch, "Chicken", 165))
            .unwrap();
        svc.log_food(new_entry("2024-06-14", MealType::Dinner, "Yesterday", 999))
            .unwrap();

        let summary = svc.daily_summary("2024-06-15");
        assert_eq!(summary.consumed, 528);
        assert_eq!(summary.target, 2594);
        assert_eq!(summary.remaining, 2594 - 528);

        // All four meals present, in fixed order, empty ones included.
        assert_eq!(summary.meals.len(), 4);
        assert_eq!(summary.meals[0].meal_type, MealType::Breakfast);
        assert_eq!(summary.meals[0].subtotal, 158);
        assert_eq!(summary.meals[1].subtotal, 370);
        assert_eq!(summary.meals[2].subtotal, 0);
        assert!(summary.meals[2].entries.is_empty());
    }

    #[test]
    fn test_daily_summary_remaining_floors_at_zero() {
        let mut svc = VitalityService::open_in_memory();
        svc.save_profile(sample_profile()).unwrap();
        svc.log_food(new_entry("2024-06-15", MealType::Dinner, "Feast", 9000))
            .unwrap();
        let summary = svc.daily_summary("2024-06-15");
        assert_eq!(summary.remaining, 0);
    }

    #[test]
    fn test_weekly_stats_uses_current_target() {
        let mut svc = VitalityService::open_in_memory();
        svc.save_profile(sample_profile()).unwrap();
        svc.log_food(new_entry("2024-06-15", MealType::Lunch, "Rice", 205))
            .unwrap();

        let end = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let stats = svc.weekly_stats(end, 7);
        assert_eq!(stats.days.len(), 7);
        assert!(stats.days.iter().all(|d| d.target == 2594));
        // One compliant day out of seven: 1/7 → 14%.
        assert_eq!(stats.compliance_pct, 14);
        // 205 / 7 = 29.28… → 29.
        assert_eq!(stats.average, 29);
    }

    #[test]
    fn test_search_consults_estimator_when_local_is_thin() {
        let svc = VitalityService::open_in_memory();
        let estimator = MockEstimator::new(450);

        let hits = svc.search_foods(&estimator, "lasagna");
        assert_eq!(estimator.calls.get(), 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "lasagna");
        assert_eq!(hits[0].calories, 450);
    }

    #[test]
    fn test_search_appends_estimate_after_local_matches() {
        let svc = VitalityService::open_in_memory();
        let estimator = MockEstimator::new(300);

        // "rice" matches two local rows — still fewer than three.
        let hits = svc.search_foods(&estimator, "rice");
        assert_eq!(estimator.calls.get(), 1);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].name, "White Rice (1 cup cooked)");
        assert_eq!(hits[2].name, "rice");
    }

    #[test]
    fn test_search_skips_estimator_for_short_queries() {
        let svc = VitalityService::open_in_memory();
        let estimator = MockEstimator::new(300);

        let hits = svc.search_foods(&estimator, "ri");
        assert_eq!(estimator.calls.get(), 0);
        // Local substring matches still returned.
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_search_skips_estimator_with_enough_local_matches() {
        let svc = VitalityService::open_in_memory();
        let estimator = MockEstimator::new(300);

        // "(1 cup" matches four table rows.
        let hits = svc.search_foods(&estimator, "(1 cup");
        assert!(hits.len() >= 3);
        assert_eq!(estimator.calls.get(), 0);
    }

    #[test]
    fn test_should_consult_estimator_boundaries() {
        assert!(should_consult_estimator(0, "abc"));
        assert!(should_consult_estimator(2, "abc"));
        assert!(!should_consult_estimator(3, "abc"));
        assert!(!should_consult_estimator(0, "ab"));
    }

    #[test]
    fn test_search_coordinator_accepts_latest_only() {
        let coordinator = SearchCoordinator::new();
        let first = coordinator.begin();
        assert!(coordinator.accept(&first));

        let second = coordinator.begin();
        // The older in-flight request is now stale.
        assert!(!coordinator.accept(&first));
        assert!(coordinator.accept(&second));
    }

    #[test]
    fn test_delete_log_round_trip() {
        let mut svc = VitalityService::open_in_memory();
        let entry = svc
            .log_food(new_entry("2024-06-15", MealType::Lunch, "Rice", 205))
            .unwrap();
        assert!(svc.delete_log(&entry.id).unwrap());
        assert!(!svc.delete_log(&entry.id).unwrap());
        assert!(svc.log_entries().is_empty());
    }

    #[test]
    fn test_history_orders_days_descending() {
        let mut svc = VitalityService::open_in_memory();
        for date in ["2024-01-01", "2024-01-03", "2024-01-02"] {
            svc.log_food(new_entry(date, MealType::Lunch, "Meal", 100))
                .unwrap();
        }
        let history = svc.history();
        let keys: Vec<&str> = history.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["2024-01-03", "2024-01-02", "2024-01-01"]);
    }
}
