mod args;
use crate::args::{Args, CheckArgs, Commands};

use clap::Parser;
use serde::Serialize;
use sourcify::{
    api::{ApiClient, ApiClientError},
    metadata::{self, MetadataError},
};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Couldn't print the response: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Args {
        command: cmd,
        network_url: network,
        network: _,
        timeout,
    } = Args::parse();

    let cancel = CancellationToken::new();
    watch_cancellation(cancel.clone(), timeout.map(Duration::from_secs));

    let api = ApiClient::new(network.url)?;
    let output = run(&api, &cancel, cmd).await?;
    println!("{output}");
    Ok(())
}

/// Cancels the token on Ctrl-C or once `timeout` runs out.
fn watch_cancellation(cancel: CancellationToken, timeout: Option<Duration>) {
    tokio::spawn(async move {
        let deadline = async {
            match timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::warn!("Interrupted, cancelling request"),
            () = deadline => log::warn!("Timed out, cancelling request"),
            () = cancel.cancelled() => return,
        }
        cancel.cancel();
    });
}

async fn run(
    api: &ApiClient,
    cancel: &CancellationToken,
    cmd: Commands,
) -> Result<String, CliError> {
    match cmd {
        Commands::Health => Ok(api.health(cancel).await?),
        Commands::Chains { supported } => {
            let mut chains = api.chains(cancel).await?;
            if supported {
                chains.retain(sourcify::api::Chain::is_supported);
            }
            to_json(&chains)
        }
        Commands::File {
            contract,
            match_type,
            filename,
        } => {
            let metadata = api
                .get_file(
                    cancel,
                    &contract.chain,
                    &contract.address,
                    match_type,
                    &filename,
                )
                .await?;
            to_json(&metadata)
        }
        Commands::Tree {
            contract,
            full_only: true,
        } => to_json(
            &api.get_file_tree_full_matches(cancel, &contract.chain, &contract.address)
                .await?,
        ),
        Commands::Tree {
            contract,
            full_only: false,
        } => to_json(
            &api.get_file_tree(cancel, &contract.chain, &contract.address)
                .await?,
        ),
        Commands::Contracts { chain } => to_json(&api.get_contract_addresses(cancel, &chain).await?),
        Commands::Check(CheckArgs {
            addresses,
            chain_ids,
        }) => {
            let (addresses, chain_ids) = (as_strs(&addresses), as_strs(&chain_ids));
            to_json(&api.check_by_addresses(cancel, &addresses, &chain_ids).await?)
        }
        Commands::CheckAll(CheckArgs {
            addresses,
            chain_ids,
        }) => {
            let (addresses, chain_ids) = (as_strs(&addresses), as_strs(&chain_ids));
            to_json(
                &api.check_all_by_addresses(cancel, &addresses, &chain_ids)
                    .await?,
            )
        }
        Commands::Files {
            contract,
            full_only: true,
        } => to_json(
            &api.get_files_full_match(cancel, &contract.chain, &contract.address)
                .await?,
        ),
        Commands::Files {
            contract,
            full_only: false,
        } => to_json(&api.get_files(cancel, &contract.chain, &contract.address).await?),
        Commands::ParseMetadata { path } => to_json(&metadata::read_metadata(path)?),
    }
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

fn to_json(value: &impl Serialize) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}
