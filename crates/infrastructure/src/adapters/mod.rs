//! Adapters connecting application ports to integrations

mod archive_adapter;

pub use archive_adapter::ArchiveAdapter;
