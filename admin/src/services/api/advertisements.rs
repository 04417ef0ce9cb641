//! # Advertisement Endpoints
//!
//! The advertisement controller predates the others and keeps its own
//! sub-paths for listing (`/all`) and creating (`/create`).

use shared::{Advertisement, AdvertisementPayload};

use super::client::ApiClient;
use super::resource::{Resource, ResourceClient};

pub struct Advertisements;

impl Resource for Advertisements {
    type Entity = Advertisement;
    type Payload = AdvertisementPayload;

    const NAME: &'static str = "advertisements";
    const BASE_PATH: &'static str = "/api/v1/advertisements";
    const LIST_PATH: &'static str = "/all";
    const CREATE_PATH: &'static str = "/create";

    fn id_of(entity: &Advertisement) -> i64 {
        entity.id
    }
}

impl ApiClient {
    pub fn advertisements(&self) -> ResourceClient<Advertisements> {
        ResourceClient::new(self.clone())
    }
}
