use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sourcify::api::{MatchType, DEFAULT_BASE_URL};
use url::Url;

const STAGING_URL: &str = "https://staging.sourcify.dev/";

#[derive(Parser)]
#[command(name = "sourcify")]
#[command(version)]
#[command(about = "Query the Sourcify contract verification repository")]
#[command(long_about = "
A command-line client for the Sourcify contract verification repository.

Fetches verified contract metadata and sources, checks whether addresses are
verified and lists the chains known to the repository. Results are printed as
JSON.

Examples:
  # Check that the server is up
  sourcify health

  # Fetch the metadata of a verified contract on mainnet
  sourcify file --chain 1 --address 0x3A7011e7E2b32C2B52f7De1294Ff35d6ff20310F

  # Check several addresses on two chains
  sourcify check --addresses 0x1,0x2 --chain-ids 1,5

  # Use a self-hosted server
  sourcify --url http://localhost:5555/ chains
")]
pub struct Args {
    /// Predefined Sourcify instance. If not specified, --url is used
    #[arg(long, value_enum, global = true)]
    pub network: Option<NetworkKind>,

    #[command(flatten)]
    pub network_url: Network,

    /// Cancel the request after this many seconds
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ping the server and see if it is ready for requests
    Health,

    /// List the chains added to the repository
    Chains {
        /// Only print chains the repository supports
        #[arg(long, default_value_t = false)]
        supported: bool,
    },

    /// Fetch a repository file of a verified contract, decoded as metadata
    File {
        #[command(flatten)]
        contract: ContractArgs,

        /// Repository subtree to look in
        #[arg(long = "match", value_enum, default_value_t = MatchType::Full)]
        match_type: MatchType,

        /// File path below the contract directory
        #[arg(long, default_value = "metadata.json")]
        filename: String,
    },

    /// List repository URLs of every file of a contract
    Tree {
        #[command(flatten)]
        contract: ContractArgs,

        /// Only search full matches
        #[arg(long, default_value_t = false)]
        full_only: bool,
    },

    /// List the verified contract addresses of a chain
    Contracts {
        /// Chain ID, e.g. 1 for Ethereum mainnet
        #[arg(long, value_name = "CHAIN_ID")]
        chain: String,
    },

    /// Check whether addresses are verified, full matches only
    Check(CheckArgs),

    /// Check whether addresses are verified, full and partial matches
    CheckAll(CheckArgs),

    /// Fetch all verified sources of a contract
    Files {
        #[command(flatten)]
        contract: ContractArgs,

        /// Only search full matches
        #[arg(long, default_value_t = false)]
        full_only: bool,
    },

    /// Parse a local metadata.json without contacting the server
    ParseMetadata {
        /// Path to the metadata document
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,
    },
}

#[derive(clap::Args)]
pub struct ContractArgs {
    /// Chain ID, e.g. 1 for Ethereum mainnet
    #[arg(long, value_name = "CHAIN_ID")]
    pub chain: String,

    /// Contract address
    #[arg(long)]
    pub address: String,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Comma separated contract addresses
    #[arg(long, value_delimiter = ',')]
    pub addresses: Vec<String>,

    /// Comma separated chain IDs
    #[arg(long, value_delimiter = ',')]
    pub chain_ids: Vec<String>,
}

#[derive(clap::ValueEnum, Clone)]
pub enum NetworkKind {
    /// Target the public instance
    Mainnet,

    /// Target the staging instance
    Staging,
}

#[derive(Clone)]
pub struct Network {
    /// API endpoint URL
    pub url: Url,
}

impl clap::FromArgMatches for Network {
    fn from_arg_matches(matches: &clap::ArgMatches) -> Result<Self, clap::Error> {
        let url = matches
            .get_one::<Url>("url")
            .ok_or_else(|| {
                clap::Error::raw(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "API URL is required when not using predefined networks",
                )
            })?
            .clone();

        Ok(Self { url })
    }

    fn update_from_arg_matches(&mut self, matches: &clap::ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

fn url_arg() -> clap::Arg {
    clap::Arg::new("url")
        .long("url")
        .help("Sourcify server URL")
        .env("SOURCIFY_URL")
        .global(true)
        .value_hint(clap::ValueHint::Url)
        .value_parser(Url::parse)
        .default_value_ifs([
            ("network", "mainnet", DEFAULT_BASE_URL),
            ("network", "staging", STAGING_URL),
        ])
        .default_value(DEFAULT_BASE_URL)
}

// Can't derive the default value logic, hence hand rolled instance
impl clap::Args for Network {
    fn augment_args(cmd: clap::Command) -> clap::Command {
        cmd.arg(url_arg())
    }

    fn augment_args_for_update(cmd: clap::Command) -> clap::Command {
        cmd.arg(url_arg())
    }
}
