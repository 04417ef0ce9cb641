//! Product create/edit form.

use lib_utils::{parse_decimal, parse_quantity};
use shared::{Category, Product, ProductPayload};

use super::{required, EditableDraft, FormDraft, ResourceForm};
use crate::app::routes::Route;
use crate::services::api::Products;

/// Raw product form fields. Price and quantity hold what the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub category: Category,
    pub for_exchange: bool,
    pub owner_id: i64,
}

impl ProductDraft {
    /// Empty draft owned by `owner_id`, quantity preset to one.
    pub fn new(owner_id: i64) -> Self {
        Self {
            quantity: "1".to_string(),
            owner_id,
            ..Self::default()
        }
    }
}

impl FormDraft for ProductDraft {
    type Payload = ProductPayload;

    fn validate(&self) -> Result<ProductPayload, String> {
        let title = required(&self.title, "title")?;
        let description = required(&self.description, "description")?;
        let price = parse_decimal(&self.price, "price")?;
        let quantity = parse_quantity(&self.quantity, "quantity")?;
        if self.owner_id < 1 {
            return Err("owner required".to_string());
        }

        Ok(ProductPayload {
            title,
            description,
            price,
            quantity,
            category: self.category,
            for_exchange: self.for_exchange,
            user_id: self.owner_id,
        })
    }
}

impl ResourceForm for ProductDraft {
    type Resource = Products;

    fn saved_route(_saved: &Product) -> Route {
        Route::Products
    }
}

impl EditableDraft for ProductDraft {
    fn from_entity(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            category: product.category,
            for_exchange: product.for_exchange,
            owner_id: product.user_id.unwrap_or_default(),
        }
    }
}
