use std::path::{Path, PathBuf};

use strsim::jaro_winkler;
use tracing::info;

use crate::error::{OrderError, Result};
use crate::models::{DishSelection, MealType, Menu};
use crate::state::load_menu;

/// Minimum Jaro-Winkler similarity for a fuzzy dish match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Read-only source of the menu for a meal period.
pub trait MenuSource {
    fn menu_for(&self, meal_type: MealType) -> Result<Menu>;
}

/// Reads `<dir>/<meal>.json`, falling back to `<dir>/<meal>.csv`.
#[derive(Debug, Clone)]
pub struct FileMenuSource {
    dir: PathBuf,
}

impl FileMenuSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl MenuSource for FileMenuSource {
    fn menu_for(&self, meal_type: MealType) -> Result<Menu> {
        let path = ["json", "csv"]
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", meal_type.as_str(), ext)))
            .find(|p| p.exists())
            .ok_or_else(|| {
                OrderError::MenuUnavailable(format!(
                    "no {} menu published in {}",
                    meal_type,
                    self.dir.display()
                ))
            })?;

        let menu = load_menu(&path, meal_type)?;
        if menu.is_empty() {
            return Err(OrderError::MenuUnavailable(format!(
                "the {} menu for today is empty",
                meal_type
            )));
        }

        info!("Loaded {} menu with {} dishes", meal_type, menu.len());
        Ok(menu)
    }
}

/// Dishes whose names resemble `input`, best first.
///
/// An exact (case-insensitive) match is returned alone.
pub fn match_dishes<'a>(menu: &'a Menu, input: &str) -> Vec<&'a DishSelection> {
    if let Some(dish) = menu.find(input) {
        return vec![dish];
    }

    let needle = input.trim().to_lowercase();
    let mut candidates: Vec<(&DishSelection, f64)> = menu
        .dishes
        .iter()
        .map(|d| (d, jaro_winkler(&d.key(), &needle)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(d, _)| d).collect()
}
