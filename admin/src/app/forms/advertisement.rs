//! Advertisement create/edit form.

use shared::{Advertisement, AdvertisementPayload, IdRef, Product};

use super::{optional_phone, required, EditableDraft, FormDraft, ProductSelection, ResourceForm};
use crate::app::routes::Route;
use crate::services::api::Advertisements;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvertisementDraft {
    pub description: String,
    pub whatsapp_number: String,
    pub advertiser_id: i64,
    pub products: ProductSelection,
    /// Kept from the loaded entity so an update does not reset it.
    pub created_at: Option<String>,
}

impl AdvertisementDraft {
    pub fn new(advertiser_id: i64) -> Self {
        Self {
            advertiser_id,
            ..Self::default()
        }
    }

    /// Select every product in `visible`, typically the filtered list.
    pub fn select_visible<'a>(&mut self, visible: impl IntoIterator<Item = &'a Product>) {
        self.products.select_all(visible.into_iter().map(|product| product.id));
    }
}

impl FormDraft for AdvertisementDraft {
    type Payload = AdvertisementPayload;

    fn validate(&self) -> Result<AdvertisementPayload, String> {
        let description = required(&self.description, "description")?;
        let whatsapp_number = optional_phone(&self.whatsapp_number, "WhatsApp number")?;
        if self.advertiser_id < 1 {
            return Err("advertiser required".to_string());
        }

        Ok(AdvertisementPayload {
            description,
            created_at: self.created_at.clone(),
            whatsapp_number,
            advertiser: IdRef::new(self.advertiser_id),
            products: self.products.to_refs(),
        })
    }
}

impl ResourceForm for AdvertisementDraft {
    type Resource = Advertisements;

    fn saved_route(saved: &Advertisement) -> Route {
        Route::AdvertisementDetail(saved.id)
    }
}

impl EditableDraft for AdvertisementDraft {
    fn from_entity(ad: &Advertisement) -> Self {
        Self {
            description: ad.description.clone(),
            whatsapp_number: ad.whatsapp_number.clone().unwrap_or_default(),
            advertiser_id: ad.advertiser_id().unwrap_or_default(),
            products: ProductSelection::from_ids(ad.product_ids()),
            created_at: ad.created_at.clone(),
        }
    }
}
