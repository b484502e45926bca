pub mod id_allocator;
pub mod library;

pub use id_allocator::IdAllocator;
pub use library::SongLibrary;
