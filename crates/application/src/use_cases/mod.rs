pub mod classify_domains;
pub mod provider_table;

// Re-export use cases
pub use classify_domains::ClassifyDomainsUseCase;
pub use provider_table::LoadProviderTableUseCase;
