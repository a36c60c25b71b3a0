//! # Sourcify API
//!
//! A Rust client for the Sourcify contract verification repository.
//! It queries verified contract metadata, source files, verification
//! status and the chain registry, decoding responses into typed records.
//!
//! ## Features
//!
//! - **Repository Files**: Fetch metadata, file trees and full sources
//! - **Verification Checks**: Look up full and partial matches by address
//! - **Chain Registry**: List the networks known to the repository
//! - **Cancellation**: Every request can be aborted with a [`CancellationToken`]
//! - **Offline Metadata**: Parse `metadata.json` without a network call
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sourcify::api::{ApiClient, MatchType, DEFAULT_BASE_URL};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::parse(DEFAULT_BASE_URL)?;
//! let cancel = CancellationToken::new();
//!
//! println!("{}", client.health(&cancel).await?);
//!
//! let metadata = client
//!     .get_file(
//!         &cancel,
//!         "1",
//!         "0x3A7011e7E2b32C2B52f7De1294Ff35d6ff20310F",
//!         MatchType::Full,
//!         "metadata.json",
//!     )
//!     .await?;
//! println!("Compiled with {}", metadata.compiler.version);
//! # Ok(())
//! # }
//! ```
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

/// API client and types for interacting with the repository
pub mod api;

/// Request failures carrying the server's response
pub mod errors;

/// Metadata parsing without network access
pub mod metadata;
