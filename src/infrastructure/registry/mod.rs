mod inmemory;

pub use inmemory::InMemorySessionRegistry;
