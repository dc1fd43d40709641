pub mod dataset;
pub mod in_memory;
pub mod traits;

pub use dataset::Dataset;
pub use in_memory::InMemoryRepository;
pub use traits::SiteRepository;
