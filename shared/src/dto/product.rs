//! # Product DTOs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed product category set defined by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Book,
    Uniform,
    Peripheral,
    Backpack,
    Calculator,
    #[serde(alias = "OTHER")]
    Others,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Book,
            Category::Uniform,
            Category::Peripheral,
            Category::Backpack,
            Category::Calculator,
            Category::Others,
        ]
    }

    /// Wire name, e.g. `"BOOK"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Book => "BOOK",
            Category::Uniform => "UNIFORM",
            Category::Peripheral => "PERIPHERAL",
            Category::Backpack => "BACKPACK",
            Category::Calculator => "CALCULATOR",
            Category::Others => "OTHERS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Book => "Book",
            Category::Uniform => "Uniform",
            Category::Peripheral => "Peripheral",
            Category::Backpack => "Backpack",
            Category::Calculator => "Calculator",
            Category::Others => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive; accepts wire names and `"other"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOOK" => Ok(Category::Book),
            "UNIFORM" => Ok(Category::Uniform),
            "PERIPHERAL" => Ok(Category::Peripheral),
            "BACKPACK" => Ok(Category::Backpack),
            "CALCULATOR" => Ok(Category::Calculator),
            "OTHERS" | "OTHER" => Ok(Category::Others),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// A product offered by a user.
///
/// Products embedded in an advertisement may carry only an id, so every other
/// field tolerates being absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub for_exchange: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Body for `POST /api/v1/products` and `PUT /api/v1/products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub category: Category,
    pub for_exchange: bool,
    pub user_id: i64,
}
