use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::Result;
use crate::models::{Base, DeliveryAddress, DishSelection, MealType, Menu, OrderDraft};
use crate::pricing::constants::{
    MAX_DISHES, MAX_EXTRA_UNITS, MAX_QUANTITY, MAX_STEP, MIN_EXTRA_UNITS, MIN_QUANTITY, MIN_STEP,
};

/// Serialize a draft for storage.
pub fn encode_draft(draft: &OrderDraft) -> Result<String> {
    Ok(serde_json::to_string(draft)?)
}

/// Restore a draft from its stored form.
///
/// Never fails: every field is read on its own, and a missing, mistyped or
/// out-of-range field falls back to its default.
pub fn decode_draft(raw: &str) -> OrderDraft {
    let mut draft = OrderDraft::default();

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored draft is not valid JSON, starting fresh: {}", e);
            return draft;
        }
    };

    let Some(fields) = value.as_object() else {
        warn!("Stored draft is not a JSON object, starting fresh");
        return draft;
    };

    if let Some(Value::Array(items)) = fields.get("selectedSabjis") {
        draft.selected_dishes = decode_dishes(items);
    }

    if let Some(base) = fields
        .get("selectedBase")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Base>().ok())
    {
        draft.base = base;
    }

    if let Some(n) = bounded_u32(fields.get("extraRoti"), MIN_EXTRA_UNITS, MAX_EXTRA_UNITS) {
        draft.extra_units = n;
    }

    if let Some(n) = bounded_u32(fields.get("quantity"), MIN_QUANTITY, MAX_QUANTITY) {
        draft.quantity = n;
    }

    if let Some(Value::Object(address)) = fields.get("address") {
        draft.delivery_address = Some(decode_address(address));
    }

    if let Some(text) = fields.get("specialInstructions").and_then(Value::as_str) {
        draft.special_instructions = text.to_string();
    }

    if let Some(n) = bounded_u32(fields.get("currentStep"), MIN_STEP, MAX_STEP) {
        draft.step = n;
    }

    draft
}

/// Each address part defaults to empty when missing or not a string.
fn decode_address(fields: &Map<String, Value>) -> DeliveryAddress {
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    DeliveryAddress {
        full_name: text("fullName"),
        phone: text("phone"),
        street: text("street"),
        apartment: text("apartment"),
        landmark: text("landmark"),
        city: text("city"),
        pincode: text("pincode"),
    }
}

/// A dish needs a string name; a non-bool special flag reads as false.
fn decode_dish(item: &Value) -> Option<DishSelection> {
    let fields = item.as_object()?;
    let name = fields.get("name")?.as_str()?;
    Some(DishSelection {
        name: name.to_string(),
        is_special: fields
            .get("isSpecial")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        image_url: fields
            .get("imageUrl")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Keep the first `MAX_DISHES` dishes with distinct names.
fn decode_dishes(items: &[Value]) -> Vec<DishSelection> {
    let mut dishes: Vec<DishSelection> = Vec::new();
    for item in items {
        let Some(dish) = decode_dish(item) else {
            continue;
        };
        if dishes.iter().any(|d| d.name == dish.name) {
            continue;
        }
        dishes.push(dish);
        if dishes.len() == MAX_DISHES {
            break;
        }
    }
    dishes
}

fn bounded_u32(value: Option<&Value>, min: u32, max: u32) -> Option<u32> {
    let n = value?.as_u64()?;
    u32::try_from(n).ok().filter(|n| (min..=max).contains(n))
}

/// Load a menu file. `.csv` files are read as `name,is_special,image_url`
/// rows; anything else is parsed as a JSON menu.
///
/// Deduplicates dishes by lowercase name (last occurrence wins, first
/// position kept).
pub fn load_menu<P: AsRef<Path>>(path: P, meal_type: MealType) -> Result<Menu> {
    let path = path.as_ref();
    let dishes = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_menu_csv(path)?,
        _ => {
            let content = fs::read_to_string(path)?;
            let menu: Menu = serde_json::from_str(&content)?;
            menu.dishes
        }
    };

    Ok(Menu::new(meal_type, dedupe_dishes(dishes)))
}

#[derive(Debug, Deserialize)]
struct CsvDishRow {
    name: String,
    #[serde(default)]
    is_special: bool,
    #[serde(default)]
    image_url: Option<String>,
}

fn load_menu_csv(path: &Path) -> Result<Vec<DishSelection>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut dishes = Vec::new();
    for row in reader.deserialize() {
        let row: CsvDishRow = row?;
        dishes.push(DishSelection {
            name: row.name,
            is_special: row.is_special,
            image_url: row.image_url.filter(|url| !url.is_empty()),
        });
    }
    Ok(dishes)
}

fn dedupe_dishes(dishes: Vec<DishSelection>) -> Vec<DishSelection> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<DishSelection> = Vec::new();
    for dish in dishes {
        match positions.get(&dish.key()) {
            Some(&i) => unique[i] = dish,
            None => {
                positions.insert(dish.key(), unique.len());
                unique.push(dish);
            }
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_encode_decode_preserves_fields() {
        let mut draft = OrderDraft::default();
        draft.selected_dishes = vec![
            DishSelection::new("Dal Tadka", false),
            DishSelection::new("Paneer Tikka", true),
        ];
        draft.base = Base::Combo;
        draft.extra_units = 2;
        draft.quantity = 4;
        draft.special_instructions = "less oil".to_string();
        draft.step = 3;
        draft.delivery_address = Some(DeliveryAddress {
            full_name: "Asha".to_string(),
            city: "Pune".to_string(),
            ..Default::default()
        });

        let decoded = decode_draft(&encode_draft(&draft).unwrap());
        assert_eq!(decoded, draft);
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let decoded = decode_draft(r#"{"quantity": 3}"#);
        assert_eq!(decoded.quantity(), 3);
        assert_eq!(decoded.base(), Base::Roti);
        assert_eq!(decoded.step(), 1);
        assert!(decoded.selected_dishes().is_empty());
    }

    #[test]
    fn test_decode_invalid_fields_default() {
        let raw = r#"{
            "selectedSabjis": "not a list",
            "selectedBase": "naan",
            "extraRoti": 9,
            "quantity": 0,
            "address": 42,
            "specialInstructions": ["x"],
            "currentStep": -1
        }"#;
        assert_eq!(decode_draft(raw), OrderDraft::default());
    }

    #[test]
    fn test_decode_garbage_gives_default() {
        assert_eq!(decode_draft("{{{not json"), OrderDraft::default());
        assert_eq!(decode_draft("[1, 2, 3]"), OrderDraft::default());
    }

    #[test]
    fn test_decode_dishes_caps_and_dedupes() {
        let raw = r#"{"selectedSabjis": [
            {"name": "A", "isSpecial": false},
            {"bogus": true},
            {"name": "A", "isSpecial": true},
            {"name": "B"},
            {"name": "C"}
        ]}"#;
        let decoded = decode_draft(raw);
        assert_eq!(decoded.dish_names(), vec!["A".to_string(), "B".to_string()]);
        assert!(!decoded.has_special_dish());
    }

    #[test]
    fn test_decode_address_keeps_good_parts() {
        let raw = r#"{"address": {
            "fullName": "Asha Rao",
            "phone": "9876543210",
            "street": "12 MG Road",
            "apartment": 4,
            "landmark": null,
            "city": "Pune",
            "pincode": "411001"
        }}"#;
        let decoded = decode_draft(raw);
        let address = decoded.delivery_address().unwrap();
        assert_eq!(address.full_name, "Asha Rao");
        assert_eq!(address.phone, "9876543210");
        assert_eq!(address.street, "12 MG Road");
        assert_eq!(address.apartment, "");
        assert_eq!(address.landmark, "");
        assert_eq!(address.city, "Pune");
        assert_eq!(address.pincode, "411001");
    }

    #[test]
    fn test_decode_dish_with_bad_special_flag() {
        let raw = r#"{"selectedSabjis": [
            {"name": "Dal", "isSpecial": null},
            {"name": "Paneer", "isSpecial": "yes", "imageUrl": 7}
        ]}"#;
        let decoded = decode_draft(raw);
        assert_eq!(decoded.dish_names(), vec!["Dal".to_string(), "Paneer".to_string()]);
        assert!(!decoded.has_special_dish());
        assert!(decoded.selected_dishes()[1].image_url.is_none());
    }

    #[test]
    fn test_load_menu_json_dedupes() {
        let json = r#"{"mealType": "lunch", "listOfSabjis": [
            {"name": "Aloo Gobi", "isSpecial": false},
            {"name": "Paneer", "isSpecial": false},
            {"name": "aloo gobi", "isSpecial": true}
        ]}"#;
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let menu = load_menu(file.path(), MealType::Lunch).unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.dishes[0].name, "aloo gobi");
        assert!(menu.dishes[0].is_special);
    }

    #[test]
    fn test_load_menu_csv() {
        let csv = "name,is_special,image_url\nDal Makhani,false,\nShahi Paneer,true,https://img/paneer.jpg\n";
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let menu = load_menu(file.path(), MealType::Dinner).unwrap();
        assert_eq!(menu.meal_type, MealType::Dinner);
        assert_eq!(menu.len(), 2);
        assert!(menu.dishes[0].image_url.is_none());
        assert!(menu.find("shahi paneer").unwrap().is_special);
    }
}
