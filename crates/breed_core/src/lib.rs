//! Session-scoped cat breed catalog: record store, detail dialog, and the
//! breeds API client that seeds them.

pub mod client;
pub mod dialog;
pub mod error;
pub mod session;
pub mod store;

pub use client::{
    load_or_empty, BreedApiClient, BreedSource, SeedOutcome, DEFAULT_BREEDS_URL,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use dialog::{CloseOutcome, DetailDialog, DialogMode, DialogTransition};
pub use error::FetchError;
pub use session::CatalogSession;
pub use store::{RecordStore, StoredBreed, TableRow};
