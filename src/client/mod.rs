//! Client toolkit for the listings API
//!
//! The Rust counterpart of the browser frontend: a typed API client plus
//! the three stateful components built on it — the autosaving form
//! controller, the filterable browser, and the read-only viewer.

pub mod api;
pub mod browser;
pub mod error;
pub mod form;
pub mod viewer;

pub use api::ListingsClient;
pub use browser::ListingBrowser;
pub use error::ClientError;
pub use form::{AUTOSAVE_QUIET_PERIOD, FormPhase, FormSession, ListingFormController};
pub use viewer::ListingViewer;
