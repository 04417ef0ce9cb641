//! # Rule Endpoints

use shared::{Rule, RulePayload};

use super::client::ApiClient;
use super::resource::{Resource, ResourceClient};

pub struct Rules;

impl Resource for Rules {
    type Entity = Rule;
    type Payload = RulePayload;

    const NAME: &'static str = "rules";
    const BASE_PATH: &'static str = "/api/v1/rules";

    fn id_of(entity: &Rule) -> i64 {
        entity.id
    }
}

impl ApiClient {
    pub fn rules(&self) -> ResourceClient<Rules> {
        ResourceClient::new(self.clone())
    }
}
