mod disk_cache;
mod reader;

pub use disk_cache::DiskCache;
pub use reader::ObjectReader;
