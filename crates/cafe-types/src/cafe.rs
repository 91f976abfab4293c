//! Cafe records

use serde::{Deserialize, Serialize};

/// A stored cafe listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// A cafe that has passed validation but has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl NewCafe {
    /// Name of the first required text field that is empty, if any.
    pub fn first_empty_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("map_url", &self.map_url),
            ("img_url", &self.img_url),
            ("location", &self.location),
            ("seats", &self.seats),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    /// Attach the id assigned by the store.
    pub fn into_cafe(self, id: i64) -> Cafe {
        Cafe {
            id,
            name: self.name,
            map_url: self.map_url,
            img_url: self.img_url,
            location: self.location,
            seats: self.seats,
            has_toilet: self.has_toilet,
            has_wifi: self.has_wifi,
            has_sockets: self.has_sockets,
            can_take_calls: self.can_take_calls,
            coffee_price: self.coffee_price,
        }
    }
}
