//! # Advertisement DTOs
//!
//! Advertisements group products offered by one advertiser. Writes go through
//! [`AdvertisementPayload`], which references the advertiser and products by
//! `{id}` objects.

use serde::{Deserialize, Serialize};

use super::product::Product;
use super::user::User;
use super::IdRef;

/// An advertisement as returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawAdvertisement")]
pub struct Advertisement {
    pub id: i64,
    pub description: String,
    pub created_at: Option<String>,
    pub whatsapp_number: Option<String>,
    pub advertiser: Option<User>,
    pub products: Vec<Product>,
}

impl Advertisement {
    pub fn advertiser_id(&self) -> Option<i64> {
        self.advertiser.as_ref().map(|user| user.id)
    }

    pub fn product_ids(&self) -> Vec<i64> {
        self.products.iter().map(|product| product.id).collect()
    }

    /// Sum of the listed product prices.
    pub fn total_price(&self) -> f64 {
        self.products.iter().map(|product| product.price).sum()
    }

    /// Contact number for this advertisement, falling back to the advertiser's.
    pub fn contact_number(&self) -> Option<&str> {
        self.whatsapp_number
            .as_deref()
            .or_else(|| {
                self.advertiser
                    .as_ref()
                    .and_then(|user| user.whatsapp_number.as_deref())
            })
            .filter(|number| !number.trim().is_empty())
    }

    pub fn has_whatsapp(&self) -> bool {
        self.contact_number().is_some()
    }
}

/// Advertisement body with both historical names for the contact number.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAdvertisement {
    id: i64,
    description: Option<String>,
    created_at: Option<String>,
    whatsapp_number: Option<String>,
    whatsapp: Option<String>,
    advertiser: Option<User>,
    products: Option<Vec<Product>>,
}

impl From<RawAdvertisement> for Advertisement {
    fn from(raw: RawAdvertisement) -> Self {
        let whatsapp_number = [raw.whatsapp_number, raw.whatsapp]
            .into_iter()
            .flatten()
            .find(|number| !number.trim().is_empty());

        Advertisement {
            id: raw.id,
            description: raw.description.unwrap_or_default(),
            created_at: raw.created_at,
            whatsapp_number,
            advertiser: raw.advertiser,
            products: raw.products.unwrap_or_default(),
        }
    }
}

/// Body for creating or replacing an advertisement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementPayload {
    pub description: String,
    /// Server-assigned on create; echoed back on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub whatsapp_number: Option<String>,
    pub advertiser: IdRef,
    pub products: Vec<IdRef>,
}
