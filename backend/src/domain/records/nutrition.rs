//! Meals and their macronutrients.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Label, Notes, OwnedRecord, Quantity, RecordKind};

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FATS: f64 = 9.0;

/// Estimate energy from macronutrient grams, rounded to the nearest kcal.
///
/// Returns `None` when no macro is known.
///
/// # Examples
/// ```
/// use fitlog::domain::records::{Quantity, calories_from_macros};
///
/// let grams = |v| Quantity::new("g", v).ok();
/// let kcal = calories_from_macros(grams(30.0), grams(50.0), grams(10.0));
/// assert_eq!(kcal.map(Quantity::get), Some(410.0));
/// ```
pub fn calories_from_macros(
    protein: Option<Quantity>,
    carbs: Option<Quantity>,
    fats: Option<Quantity>,
) -> Option<Quantity> {
    if protein.is_none() && carbs.is_none() && fats.is_none() {
        return None;
    }
    let grams = |value: Option<Quantity>| value.map_or(0.0, Quantity::get);
    let kcal = grams(protein) * KCAL_PER_GRAM_PROTEIN
        + grams(carbs) * KCAL_PER_GRAM_CARBS
        + grams(fats) * KCAL_PER_GRAM_FATS;
    Quantity::new("calories", kcal.round()).ok()
}

/// A logged meal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    /// e.g. "breakfast".
    pub meal_type: Option<Label>,
    pub calories: Option<Quantity>,
    /// Grams of protein.
    pub protein: Option<Quantity>,
    /// Grams of carbohydrate.
    pub carbs: Option<Quantity>,
    /// Grams of fat.
    pub fats: Option<Quantity>,
    pub notes: Option<Notes>,
    pub date: DateTime<Utc>,
}

/// Fields accepted when logging a meal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionDraft {
    pub meal_type: Option<Label>,
    pub calories: Option<Quantity>,
    pub protein: Option<Quantity>,
    pub carbs: Option<Quantity>,
    pub fats: Option<Quantity>,
    pub notes: Option<Notes>,
    pub date: Option<DateTime<Utc>>,
}

/// Partial meal update.
pub type NutritionPatch = NutritionDraft;

impl Nutrition {
    fn derive_calories(&mut self) {
        self.calories = calories_from_macros(self.protein, self.carbs, self.fats);
    }
}

impl OwnedRecord for Nutrition {
    type Draft = NutritionDraft;
    type Patch = NutritionPatch;

    const KIND: RecordKind = RecordKind::Nutrition;

    fn from_draft(draft: NutritionDraft, now: DateTime<Utc>) -> Self {
        let mut meal = Self {
            meal_type: draft.meal_type,
            calories: draft.calories,
            protein: draft.protein,
            carbs: draft.carbs,
            fats: draft.fats,
            notes: draft.notes,
            date: draft.date.unwrap_or(now),
        };
        if meal.calories.is_none() {
            meal.derive_calories();
        }
        meal
    }

    fn apply_patch(&mut self, patch: NutritionPatch) {
        let macros_changed =
            patch.protein.is_some() || patch.carbs.is_some() || patch.fats.is_some();
        if patch.meal_type.is_some() {
            self.meal_type = patch.meal_type;
        }
        if patch.protein.is_some() {
            self.protein = patch.protein;
        }
        if patch.carbs.is_some() {
            self.carbs = patch.carbs;
        }
        if patch.fats.is_some() {
            self.fats = patch.fats;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        match patch.calories {
            Some(calories) => self.calories = Some(calories),
            None if macros_changed => self.derive_calories(),
            None => {}
        }
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        Some(self.date)
    }
}
