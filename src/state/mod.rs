mod builder;
mod persistence;
mod store;

pub use builder::{DishToggle, OrderBuilder};
pub use persistence::{decode_draft, encode_draft, load_menu};
pub use store::{DraftStore, FileDraftStore, MemoryDraftStore};
