use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::{future::Future, sync::Arc};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::errors::RequestFailure;

use super::errors::ApiClientError;
use super::models::{
    Chain, CheckAllStatus, CheckStatus, ContractAddresses, File, FileTree, Metadata, Sources,
};
use super::types::MatchType;

/// Public Sourcify instance.
pub const DEFAULT_BASE_URL: &str = "https://sourcify.dev/";

/// Connections to the repository host, in flight or idle.
const MAX_CONNECTIONS_PER_HOST: usize = 10;

/// Every repository endpoint lives under this path.
const SERVER: &str = "server";

#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    client: Client,
    /// Shared by clones, bounds requests in flight.
    permits: Arc<Semaphore>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Fails if provided `Url` cannot be a base. We rely on that
    /// invariant in other methods.
    pub fn new(base: Url) -> Result<Self, ApiClientError> {
        // Test here so that we are sure path_segments_mut succeeds
        if base.cannot_be_a_base() {
            return Err(ApiClientError::CannotBeBase(base));
        }

        let client = Client::builder()
            .pool_max_idle_per_host(MAX_CONNECTIONS_PER_HOST)
            .build()?;

        Ok(Self {
            base,
            client,
            permits: Arc::new(Semaphore::new(MAX_CONNECTIONS_PER_HOST)),
        })
    }

    /// # Errors
    ///
    /// Fails if `base` isn't a valid URL or cannot be a base.
    pub fn parse(base: &str) -> Result<Self, ApiClientError> {
        Self::new(Url::parse(base)?)
    }

    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint<'a, I>(&self, segments: I) -> Result<Url, ApiClientError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiClientError::CannotBeBase(self.base.clone()))?
            .pop_if_empty()
            .push(SERVER)
            .extend(segments);
        Ok(url)
    }

    fn with_filters(mut url: Url, addresses: &[&str], chain_ids: &[&str]) -> Url {
        let filters = [("addresses", addresses), ("chainIds", chain_ids)];
        if filters.iter().any(|(_, values)| !values.is_empty()) {
            let mut query = url.query_pairs_mut();
            for (name, values) in filters {
                if !values.is_empty() {
                    query.append_pair(name, &values.join(","));
                }
            }
        }
        url
    }

    /// Performs the request and reads the body with `read`, giving up
    /// as soon as `cancel` fires. Waits for a free connection slot first.
    async fn fetch<B, F, Fut>(
        &self,
        cancel: &CancellationToken,
        url: &Url,
        read: F,
    ) -> Result<(StatusCode, B), ApiClientError>
    where
        F: FnOnce(Response) -> Fut,
        Fut: Future<Output = reqwest::Result<B>>,
    {
        let request = async {
            // The semaphore is never closed
            let _permit = self
                .permits
                .acquire()
                .await
                .map_err(|_| ApiClientError::Cancelled)?;
            log::debug!("GET {url}");
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            let body = read(response).await?;
            Ok::<_, ApiClientError>((status, body))
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ApiClientError::Cancelled),
            result = request => {
                let (status, body) = result?;
                log::debug!("{url} returned {status}");
                Ok((status, body))
            }
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        url: Url,
    ) -> Result<T, ApiClientError> {
        let (status, body) = self.fetch(cancel, &url, Response::bytes).await?;

        match status {
            StatusCode::OK | StatusCode::NOT_MODIFIED => serde_json::from_slice(&body)
                .map_err(|source| ApiClientError::Decode { url, source }),
            StatusCode::NOT_FOUND => Err(ApiClientError::NotFound(url)),
            status_code => Err(ApiClientError::from(RequestFailure::new(
                url,
                status_code,
                String::from_utf8_lossy(&body),
            ))),
        }
    }

    async fn get_text(
        &self,
        cancel: &CancellationToken,
        url: Url,
    ) -> Result<String, ApiClientError> {
        let (status, body) = self.fetch(cancel, &url, Response::text).await?;

        match status {
            StatusCode::OK | StatusCode::NOT_MODIFIED => Ok(body),
            status_code => Err(ApiClientError::from(RequestFailure::new(
                url,
                status_code,
                body,
            ))),
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn get_file_url(
        &self,
        chain_id: &str,
        address: &str,
        match_type: MatchType,
        filename: &str,
    ) -> Result<Url, ApiClientError> {
        // Files below the contract directory keep their nesting
        let file_segments = filename.split('/').filter(|segment| !segment.is_empty());
        self.endpoint(
            ["repository", "contracts", match_type.as_str(), chain_id, address]
                .into_iter()
                .chain(file_segments),
        )
    }

    /// Gets a file of a verified contract from the repository and
    /// decodes it as metadata.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file is not found, the response isn't
    /// metadata or on network failure.
    pub async fn get_file(
        &self,
        cancel: &CancellationToken,
        chain_id: &str,
        address: &str,
        match_type: MatchType,
        filename: &str,
    ) -> Result<Metadata, ApiClientError> {
        let url = self.get_file_url(chain_id, address, match_type, filename)?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn get_file_tree_full_matches_url(
        &self,
        chain_id: &str,
        address: &str,
    ) -> Result<Url, ApiClientError> {
        self.endpoint(["files", "tree", chain_id, address])
    }

    /// Repository URLs of every file in the source tree. Searches only
    /// full matches.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the contract is not found or on network failure.
    pub async fn get_file_tree_full_matches(
        &self,
        cancel: &CancellationToken,
        chain_id: &str,
        address: &str,
    ) -> Result<Vec<String>, ApiClientError> {
        let url = self.get_file_tree_full_matches_url(chain_id, address)?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn get_file_tree_url(&self, chain_id: &str, address: &str) -> Result<Url, ApiClientError> {
        self.endpoint(["files", "tree", "any", chain_id, address])
    }

    /// Repository URLs of every file in the source tree. Searches full
    /// and partial matches.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the contract is not found or on network failure.
    pub async fn get_file_tree(
        &self,
        cancel: &CancellationToken,
        chain_id: &str,
        address: &str,
    ) -> Result<FileTree, ApiClientError> {
        let url = self.get_file_tree_url(chain_id, address)?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn get_contract_addresses_url(&self, chain_id: &str) -> Result<Url, ApiClientError> {
        self.endpoint(["files", "contracts", chain_id])
    }

    /// All verified contracts on the chain, full and partial matches.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the chain is not found or on network failure.
    pub async fn get_contract_addresses(
        &self,
        cancel: &CancellationToken,
        chain_id: &str,
    ) -> Result<ContractAddresses, ApiClientError> {
        let url = self.get_contract_addresses_url(chain_id)?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn check_by_addresses_url(
        &self,
        addresses: &[&str],
        chain_ids: &[&str],
    ) -> Result<Url, ApiClientError> {
        let url = self.endpoint(["check-by-addresses"])?;
        Ok(Self::with_filters(url, addresses, chain_ids))
    }

    /// Checks whether the contracts are verified. Searches only full
    /// matches.
    ///
    /// # Errors
    ///
    /// Will return `Err` on network failure or a rejected request.
    pub async fn check_by_addresses(
        &self,
        cancel: &CancellationToken,
        addresses: &[&str],
        chain_ids: &[&str],
    ) -> Result<Vec<CheckStatus>, ApiClientError> {
        let url = self.check_by_addresses_url(addresses, chain_ids)?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn check_all_by_addresses_url(
        &self,
        addresses: &[&str],
        chain_ids: &[&str],
    ) -> Result<Url, ApiClientError> {
        let url = self.endpoint(["check-all-by-addresses"])?;
        Ok(Self::with_filters(url, addresses, chain_ids))
    }

    /// Checks whether the contracts are verified. Searches full and
    /// partial matches.
    ///
    /// # Errors
    ///
    /// Will return `Err` on network failure or a rejected request.
    pub async fn check_all_by_addresses(
        &self,
        cancel: &CancellationToken,
        addresses: &[&str],
        chain_ids: &[&str],
    ) -> Result<Vec<CheckAllStatus>, ApiClientError> {
        let url = self.check_all_by_addresses_url(addresses, chain_ids)?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn get_files_url(&self, chain_id: &str, address: &str) -> Result<Url, ApiClientError> {
        self.endpoint(["files", "any", chain_id, address])
    }

    /// All verified sources of the contract, `metadata.json` included.
    /// Searches full and partial matches.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the contract is not found or on network failure.
    pub async fn get_files(
        &self,
        cancel: &CancellationToken,
        chain_id: &str,
        address: &str,
    ) -> Result<Sources, ApiClientError> {
        let url = self.get_files_url(chain_id, address)?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn get_files_full_match_url(
        &self,
        chain_id: &str,
        address: &str,
    ) -> Result<Url, ApiClientError> {
        self.endpoint(["files", chain_id, address])
    }

    /// All verified sources of the contract, `metadata.json` included.
    /// Searches only full matches.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the contract is not found or on network failure.
    pub async fn get_files_full_match(
        &self,
        cancel: &CancellationToken,
        chain_id: &str,
        address: &str,
    ) -> Result<Vec<File>, ApiClientError> {
        let url = self.get_files_full_match_url(chain_id, address)?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn chains_url(&self) -> Result<Url, ApiClientError> {
        self.endpoint(["chains"])
    }

    /// Every chain added to the repository, supported or not.
    ///
    /// # Errors
    ///
    /// Will return `Err` on network failure.
    pub async fn chains(&self, cancel: &CancellationToken) -> Result<Vec<Chain>, ApiClientError> {
        let url = self.chains_url()?;
        self.get(cancel, url).await
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn health_url(&self) -> Result<Url, ApiClientError> {
        self.endpoint(["health"])
    }

    /// Pings the server. Returns the raw body on success, any other
    /// status fails with the body attached.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the server isn't healthy or on network
    /// failure.
    pub async fn health(&self, cancel: &CancellationToken) -> Result<String, ApiClientError> {
        let url = self.health_url()?;
        self.get_text(cancel, url).await
    }
}
