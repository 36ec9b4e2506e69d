pub mod markup;
pub mod page_store;

pub use markup::filter;
pub use page_store::{PageStore, StoreError};
