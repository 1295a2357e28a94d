use std::env;

use crate::storage::FoodLogEntry;

/// Summed nutrition across a day's log.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Daily intake limits the progress bars measure against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyLimits {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Default for DailyLimits {
    fn default() -> Self {
        Self {
            calories: 2500.0,
            protein: 150.0,
            carbs: 300.0,
            fats: 70.0,
        }
    }
}

impl DailyLimits {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            calories: env_limit("DAILY_CALORIES", defaults.calories),
            protein: env_limit("DAILY_PROTEIN", defaults.protein),
            carbs: env_limit("DAILY_CARBS", defaults.carbs),
            fats: env_limit("DAILY_FATS", defaults.fats),
        }
    }
}

fn env_limit(var: &str, default: f64) -> f64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v: &f64| *v > 0.0)
        .unwrap_or(default)
}

/// Sum each nutrition field across the log. Fields absent on an entry were
/// already decoded as 0.
pub fn totals(log: &[FoodLogEntry]) -> NutritionTotals {
    log.iter().fold(NutritionTotals::default(), |acc, entry| NutritionTotals {
        calories: acc.calories + entry.calories,
        protein: acc.protein + entry.protein,
        carbs: acc.carbs + entry.carbs,
        fats: acc.fats + entry.fats,
    })
}

/// Percentage of a daily limit consumed, clamped to [0, 100]. A non-positive
/// limit reads as no progress rather than a division blowup.
pub fn progress_percent(current: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        return 0.0;
    }
    (current / limit * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{EntryType, FoodLogEntry};

    fn entry(calories: f64, protein: f64, carbs: f64, fats: f64) -> FoodLogEntry {
        FoodLogEntry {
            id: "t".into(),
            name: "test".into(),
            entry_type: EntryType::Custom,
            calories,
            protein,
            carbs,
            fats,
            logged_at: "2025-03-09T08:00:00Z".into(),
        }
    }

    #[test]
    fn empty_log_totals_to_zero() {
        assert_eq!(totals(&[]), NutritionTotals::default());
    }

    #[test]
    fn totals_sum_each_field() {
        let log = vec![entry(300.0, 20.0, 40.0, 10.0), entry(150.5, 5.0, 27.0, 3.0)];
        let t = totals(&log);
        assert_eq!(t.calories, 450.5);
        assert_eq!(t.protein, 25.0);
        assert_eq!(t.carbs, 67.0);
        assert_eq!(t.fats, 13.0);
    }

    #[test]
    fn progress_is_clamped_to_0_100() {
        assert_eq!(progress_percent(0.0, 2500.0), 0.0);
        assert_eq!(progress_percent(1250.0, 2500.0), 50.0);
        assert_eq!(progress_percent(2500.0, 2500.0), 100.0);
        assert_eq!(progress_percent(9000.0, 2500.0), 100.0);
        assert_eq!(progress_percent(-50.0, 2500.0), 0.0);
        assert_eq!(progress_percent(100.0, 0.0), 0.0);
    }

    #[test]
    fn progress_is_monotonic_in_current() {
        let limit = 150.0;
        let mut last = -1.0;
        for current in (0..400).map(f64::from) {
            let pct = progress_percent(current, limit);
            assert!(pct >= last);
            last = pct;
        }
    }
}
