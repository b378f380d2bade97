//! Contract definitions for object storage.

mod object_store;

pub use object_store::ObjectStore;
