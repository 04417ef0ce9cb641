//! # Product Endpoints
//!
//! `/api/v1/products`, served by the generic [`ResourceClient`].

use shared::{Product, ProductPayload};

use super::client::ApiClient;
use super::resource::{Resource, ResourceClient};

pub struct Products;

impl Resource for Products {
    type Entity = Product;
    type Payload = ProductPayload;

    const NAME: &'static str = "products";
    const BASE_PATH: &'static str = "/api/v1/products";

    fn id_of(entity: &Product) -> i64 {
        entity.id
    }
}

impl ApiClient {
    pub fn products(&self) -> ResourceClient<Products> {
        ResourceClient::new(self.clone())
    }
}
