//! Reference-data catalog: clients, products and copywriter profiles.
//!
//! Kept in memory and snapshotted to `~/.mailcraft/catalog.json`.

pub mod store;
pub mod types;

pub use store::{CatalogError, CatalogStore};
pub use types::{
    Client, ClientPatch, Copywriter, CopywriterPatch, NewClient, NewCopywriter, NewProduct,
    Product, ProductPatch,
};
