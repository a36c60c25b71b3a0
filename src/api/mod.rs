// Re-export the API module components
pub use self::{
    client::{ApiClient, DEFAULT_BASE_URL},
    errors::ApiClientError,
    models::{
        Chain, ChainIdStatus, CheckAllStatus, CheckStatus, Compiler, ContractAddresses, Doc, Ens,
        ErrorResponse, Explorer, File, FileTree, Metadata, MetadataSettings, NativeCurrency,
        Optimizer, Output, Settings, Source, Sources,
    },
    types::{MatchType, RawJson},
};

// Module declarations
mod client;
mod errors;
mod models;
mod types;
