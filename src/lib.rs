//! # Listings-RS
//!
//! A CRUD web application for UAE real-estate property listings: a REST
//! backend over a MongoDB document store, plus a client toolkit mirroring
//! the browser frontend it serves.
//!
//! ## Features
//!
//! - **Document CRUD**: create/list/get/update/delete over listing
//!   documents, with shallow-merge partial updates
//! - **Server-side schema validation**: the full listing contract is
//!   enforced at the service boundary before every write
//! - **Conjunctive filtering**: location, type, purpose, counts, price
//!   range and publication state
//! - **Pluggable storage**: MongoDB in production, in-memory for tests
//! - **Autosaving form controller**: trailing-edge debounce with all
//!   writes serialized through one ordered queue per draft
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listings::prelude::*;
//! use std::sync::Arc;
//!
//! // Serve the API over an in-memory store
//! let app = build_router(Arc::new(InMemoryListingStore::new()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//! axum::serve(listener, app).await?;
//!
//! // Edit a draft with autosave from the client side
//! let client = ListingsClient::new("http://127.0.0.1:4000");
//! let mut form = ListingFormController::new(client);
//! form.edit(|draft| draft.title = "Luxury 2BR Apartment".to_string());
//! ```

pub mod client;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ErrorResponse, ListingError},
        filter::{ListingFilter, ListingQuery},
        listing::{
            Agent, CompletionStatus, Coordinates, Listing, ListingStatus, Location, Ownership,
            PaymentPlan, PropertyType, Purpose,
        },
        service::ListingsService,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryListingStore, ListingStore, MongoListingStore};

    // === Server ===
    pub use crate::server::build_router;

    // === Client ===
    pub use crate::client::{
        ClientError, FormPhase, FormSession, ListingBrowser, ListingFormController,
        ListingViewer, ListingsClient,
    };

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
