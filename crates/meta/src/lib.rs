//! Photo metadata: the record type shared by every ranking stage, loaders
//! for the dataset exports, the extracted-query model, and the metadata
//! filter that narrows the photo list before relevance ranking.

mod filter;
mod loader;
mod query;
mod types;

pub use filter::filter_photos;
pub use loader::{load_metadata_dir, load_metadata_jsonl, MetaError};
pub use query::{merge_metadata, Query};
pub use types::PhotoMetadata;
