use std::fmt;
use std::str::FromStr;

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::OrderError;

/// A selectable dish (sabji) on a daily menu.
///
/// Names are unique per menu; comparisons are by name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishSelection {
    #[serde(rename = "name")]
    pub name: String,

    /// Special dishes carry a premium surcharge.
    #[serde(rename = "isSpecial", default)]
    pub is_special: bool,

    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl DishSelection {
    pub fn new(name: impl Into<String>, is_special: bool) -> Self {
        Self {
            name: name.into(),
            is_special,
            image_url: None,
        }
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for DishSelection {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DishSelection {}

/// Meal period a menu is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Lunch,
    Dinner,
}

impl MealType {
    /// Meal period served at the given local hour (0-23).
    ///
    /// Lunch runs from noon until 19:00; everything else orders for dinner.
    pub fn for_hour(hour: u32) -> Self {
        if hour >= 19 || hour < 12 {
            MealType::Dinner
        } else {
            MealType::Lunch
        }
    }

    /// Meal period for the current local time.
    pub fn current() -> Self {
        Self::for_hour(Local::now().hour())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    /// Human-readable serving window.
    pub fn serving_window(&self) -> &'static str {
        match self {
            MealType::Lunch => "Lunch (12-3 PM)",
            MealType::Dinner => "Dinner (7-10 PM)",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(OrderError::UnknownMealType(other.to_string())),
        }
    }
}

/// A published menu for one meal period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    #[serde(rename = "mealType")]
    pub meal_type: MealType,

    #[serde(rename = "listOfSabjis", default)]
    pub dishes: Vec<DishSelection>,
}

impl Menu {
    pub fn new(meal_type: MealType, dishes: Vec<DishSelection>) -> Self {
        Self { meal_type, dishes }
    }

    /// Find a dish by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&DishSelection> {
        let key = name.trim().to_lowercase();
        self.dishes.iter().find(|d| d.key() == key)
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}
