mod gcs_store;
mod local_store;
mod store_factory;
mod transfer;

pub use gcs_store::{AccessUrlMode, GcsContentStore};
pub use local_store::LocalContentStore;
pub use store_factory::ContentStoreFactory;
