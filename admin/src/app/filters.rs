//! # Client-side Filtering and Sorting
//!
//! List views fetch whole collections and narrow them locally. Every filter
//! is pure: same input, same output, nothing sent to the backend.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use lib_utils::parse_timestamp;
use shared::{Advertisement, Category, Product, Rule, User};

/// Predicate over one list item.
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// Matching items, in display order.
    fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Case-insensitive substring search. A blank query matches everything.
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || fields.iter().any(|field| field.to_lowercase().contains(&query))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: String,
    pub category: Option<Category>,
}

impl ListFilter<Product> for ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        self.category.map_or(true, |category| product.category == category)
            && matches_query(&self.search, &[&product.title, &product.description])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdvertisementSort {
    #[default]
    MostRecent,
    Oldest,
    MostItems,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertisementFilter {
    /// Matched against the description and the id
    pub search: String,
    pub sort: AdvertisementSort,
    pub with_whatsapp: bool,
    /// Only advertisements of this user, usually the session user
    pub advertiser: Option<i64>,
}

impl ListFilter<Advertisement> for AdvertisementFilter {
    fn matches(&self, ad: &Advertisement) -> bool {
        if self.with_whatsapp && !ad.has_whatsapp() {
            return false;
        }
        if let Some(advertiser) = self.advertiser {
            if ad.advertiser_id() != Some(advertiser) {
                return false;
            }
        }
        matches_query(&self.search, &[&ad.description, &ad.id.to_string()])
    }

    fn apply<'a>(&self, items: &'a [Advertisement]) -> Vec<&'a Advertisement> {
        let mut matching: Vec<&Advertisement> =
            items.iter().filter(|ad| self.matches(ad)).collect();
        match self.sort {
            AdvertisementSort::MostRecent => {
                matching.sort_by(|a, b| by_created_at(b, a).then(b.id.cmp(&a.id)))
            }
            AdvertisementSort::Oldest => {
                matching.sort_by(|a, b| by_created_at(a, b).then(a.id.cmp(&b.id)))
            }
            AdvertisementSort::MostItems => matching.sort_by(|a, b| {
                b.products.len().cmp(&a.products.len()).then(b.id.cmp(&a.id))
            }),
        }
        matching
    }
}

fn created_at(ad: &Advertisement) -> Option<DateTime<Utc>> {
    ad.created_at.as_deref().and_then(|raw| parse_timestamp(raw).ok())
}

/// Ascending by creation time. Undated advertisements compare lowest, so
/// they come first when oldest-first and last when newest-first.
fn by_created_at(a: &Advertisement, b: &Advertisement) -> Ordering {
    created_at(a).cmp(&created_at(b))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    pub search: String,
}

impl ListFilter<Rule> for RuleFilter {
    fn matches(&self, rule: &Rule) -> bool {
        matches_query(&self.search, &[&rule.title, &rule.description])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: String,
}

impl ListFilter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        matches_query(
            &self.search,
            &[
                user.display_name(),
                &user.username,
                user.enrollment_number.as_deref().unwrap_or_default(),
            ],
        )
    }
}

/// Advertisements that can be contacted over WhatsApp.
pub fn whatsapp_count(ads: &[Advertisement]) -> usize {
    ads.iter().filter(|ad| ad.has_whatsapp()).count()
}

/// Products listed across all advertisements.
pub fn total_items(ads: &[Advertisement]) -> usize {
    ads.iter().map(|ad| ad.products.len()).sum()
}
