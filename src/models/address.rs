use serde::{Deserialize, Serialize};

/// Structured delivery address captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    #[serde(rename = "fullName", default)]
    pub full_name: String,

    #[serde(rename = "phone", default)]
    pub phone: String,

    #[serde(rename = "street", default)]
    pub street: String,

    /// Apartment, suite or floor. Optional.
    #[serde(rename = "apartment", default)]
    pub apartment: String,

    /// Nearby landmark. Optional.
    #[serde(rename = "landmark", default)]
    pub landmark: String,

    #[serde(rename = "city", default)]
    pub city: String,

    #[serde(rename = "pincode", default)]
    pub pincode: String,
}

impl DeliveryAddress {
    /// Address lines for display, skipping empty optional parts.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = vec![self.full_name.clone(), self.street.clone()];
        if !self.apartment.trim().is_empty() {
            lines.push(self.apartment.clone());
        }
        if !self.landmark.trim().is_empty() {
            lines.push(format!("Near {}", self.landmark));
        }
        lines.push(format!("{}, {}", self.city, self.pincode));
        lines.push(format!("Phone: {}", self.phone));
        lines
    }
}
