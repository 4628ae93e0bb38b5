// ABOUTME: Aggregations over logged meals for the dashboard views
// ABOUTME: Daily totals, Monday-first weekly calorie chart and progress against the caloric target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Datelike, Days, NaiveDate, Weekday};
use nutrilens_core::models::{AssessmentResult, LoggedMeal, MacronutrientSplit, MealNutrition};
use serde::{Deserialize, Serialize};

/// Calories eaten on one day of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCalories {
    /// Calendar date
    pub date: NaiveDate,
    /// Three letter weekday label (Mon..Sun)
    pub day: String,
    /// Sum of estimated calories
    pub calories: u32,
}

/// Seven days of calories starting on Monday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCalories {
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Monday..Sunday
    pub days: Vec<DailyCalories>,
}

impl WeeklyCalories {
    /// Sum over the week
    #[must_use]
    pub fn total(&self) -> u32 {
        self.days
            .iter()
            .fold(0_u32, |acc, day| acc.saturating_add(day.calories))
    }
}

/// Intake of a day compared with the assessment targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    /// Calendar date
    pub date: NaiveDate,
    /// Summed estimates of the day's meals
    pub consumed: MealNutrition,
    /// Daily caloric target from the assessment
    pub target_kcal: u32,
    /// Target minus consumed; negative once exceeded
    pub remaining_kcal: i64,
    /// Consumed calories as a percentage of the target, 1 decimal
    pub percent_of_target: f64,
    /// Macro targets from the assessment
    pub macro_targets: MacronutrientSplit,
}

const fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn meals_on(meals: &[LoggedMeal], date: NaiveDate) -> impl Iterator<Item = &MealNutrition> {
    meals
        .iter()
        .filter(move |meal| meal.eaten_at.date() == date)
        .filter_map(|meal| meal.nutrition.as_ref())
}

/// Sum the estimates of every analysed meal eaten on `date`
///
/// Meals still awaiting analysis contribute nothing.
#[must_use]
pub fn daily_totals(meals: &[LoggedMeal], date: NaiveDate) -> MealNutrition {
    meals_on(meals, date).fold(MealNutrition::default(), |acc, nutrition| {
        acc.saturating_add(*nutrition)
    })
}

/// Monday of the week containing `date`
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Calories per day for the Monday-first week containing `date`
#[must_use]
pub fn weekly_calorie_chart(meals: &[LoggedMeal], date: NaiveDate) -> WeeklyCalories {
    let monday = week_start(date);
    let days = monday
        .iter_days()
        .take(7)
        .map(|day| DailyCalories {
            date: day,
            day: weekday_label(day.weekday()).to_owned(),
            calories: daily_totals(meals, day).calories,
        })
        .collect();

    WeeklyCalories {
        week_start: monday,
        days,
    }
}

/// Progress of a day's intake against the assessment
#[must_use]
pub fn daily_progress(
    meals: &[LoggedMeal],
    date: NaiveDate,
    assessment: &AssessmentResult,
) -> DailyProgress {
    let consumed = daily_totals(meals, date);
    let target_kcal = assessment.daily_caloric_target.value;
    let percent_of_target = if target_kcal == 0 {
        0.0
    } else {
        (f64::from(consumed.calories) * 1000.0 / f64::from(target_kcal)).round() / 10.0
    };

    DailyProgress {
        date,
        consumed,
        target_kcal,
        remaining_kcal: i64::from(target_kcal) - i64::from(consumed.calories),
        percent_of_target,
        macro_targets: assessment.macronutrients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_starts_on_monday() {
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(week_start(monday), monday);
    }

    #[test]
    fn test_empty_week_has_seven_zero_days() {
        let chart = weekly_calorie_chart(&[], NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert_eq!(chart.days.len(), 7);
        assert_eq!(chart.days[0].day, "Mon");
        assert_eq!(chart.days[6].day, "Sun");
        assert_eq!(chart.total(), 0);
    }
}
