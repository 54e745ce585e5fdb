pub mod asset_store;
pub mod index;
pub mod redirects;
