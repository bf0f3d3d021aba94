//! Core domain: model, filtering, patch semantics, validation, service.

pub mod error;
pub mod filter;
pub mod listing;
pub mod patch;
pub mod service;
pub mod validation;

pub use error::{ErrorResponse, ListingError};
pub use filter::{ListingFilter, ListingQuery};
pub use listing::{
    Agent, CompletionStatus, Coordinates, Listing, ListingStatus, Location, Ownership,
    PaymentPlan, PropertyType, Purpose,
};
pub use service::ListingsService;
