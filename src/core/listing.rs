//! Typed listing model
//!
//! This is the typed counterpart of the wire documents the service stores.
//! The server deliberately works on raw JSON documents (a document store
//! preserves fields it does not know about); this struct is what the client
//! toolkit edits and what callers deserialize responses into.
//!
//! Wire format: camelCase keys, `_id` as a 24-char hex ObjectId string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of property being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    Villa,
    Townhouse,
    Penthouse,
}

/// Whether the listing is offered for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Sale,
    Rent,
}

/// Lifecycle status of a listing. `Published` listings are read-only in the
/// editing form until unpublished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Draft,
    Published,
}

/// Construction state of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionStatus {
    Ready,
    OffPlan,
    UnderConstruction,
}

/// UAE ownership model for the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    Freehold,
    Leasehold,
}

/// Geographic coordinates pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Where the property is. `emirate` and `city` are required by the schema;
/// the rest is free-form address detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub emirate: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    pub coordinates: Coordinates,
}

/// Contact details of the listing agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Developer payment plan flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentPlan {
    pub available: bool,
}

/// A UAE property listing.
///
/// `id` is `None` until the store assigns one; it never changes afterwards.
/// `status` and `is_published` are intentionally redundant — both are part
/// of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,

    pub property_type: PropertyType,
    pub purpose: Purpose,

    pub size_sq_ft: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_spots: Option<i64>,

    pub location: Location,

    pub status: ListingStatus,
    pub is_published: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<CompletionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_plan: Option<PaymentPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<Ownership>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Listing {
    /// A fresh draft, matching the defaults the editing form starts from.
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            price: 0.0,
            currency: "AED".to_string(),
            property_type: PropertyType::Apartment,
            purpose: Purpose::Sale,
            size_sq_ft: 0.0,
            bedrooms: 0,
            bathrooms: 0,
            parking_spots: Some(0),
            location: Location::default(),
            status: ListingStatus::Draft,
            is_published: false,
            amenities: Some(Vec::new()),
            developer: None,
            completion_status: Some(CompletionStatus::Ready),
            year_built: None,
            payment_plan: Some(PaymentPlan { available: false }),
            ownership: Some(Ownership::Freehold),
            agent: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Listing {
    /// Mark the listing published or back to draft, keeping the redundant
    /// flag and the status in lockstep.
    pub fn set_published(&mut self, published: bool) {
        self.is_published = published;
        self.status = if published {
            ListingStatus::Published
        } else {
            ListingStatus::Draft
        };
    }
}
