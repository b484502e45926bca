pub mod metadata;
pub mod playback;
pub mod store;

pub use metadata::{MetadataError, MetadataExtractor};
pub use playback::{Playback, PlaybackError};
pub use store::{SongStore, StoreError};
