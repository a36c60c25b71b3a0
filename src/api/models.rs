use super::types::{nullable, RawJson};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body the repository sends along with failing statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Compiler-emitted `metadata.json` of a verified contract.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "nullable")]
    pub compiler: Compiler,
    #[serde(deserialize_with = "nullable")]
    pub language: String,
    #[serde(deserialize_with = "nullable")]
    pub output: Output,
    #[serde(deserialize_with = "nullable")]
    pub settings: Settings,
    #[serde(deserialize_with = "nullable")]
    pub sources: BTreeMap<String, Source>,
    #[serde(deserialize_with = "nullable")]
    pub version: i64,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Compiler {
    #[serde(deserialize_with = "nullable")]
    pub version: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Output {
    pub abi: Option<RawJson>,
    #[serde(rename = "devdoc", deserialize_with = "nullable")]
    pub dev_doc: Doc,
    #[serde(rename = "userdoc", deserialize_with = "nullable")]
    pub user_doc: Doc,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Doc {
    #[serde(deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub methods: BTreeMap<String, RawJson>,
    #[serde(deserialize_with = "nullable")]
    pub version: i64,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(deserialize_with = "nullable")]
    pub compilation_target: BTreeMap<String, String>,
    #[serde(deserialize_with = "nullable")]
    pub evm_version: String,
    pub libraries: Option<RawJson>,
    #[serde(deserialize_with = "nullable")]
    pub metadata: MetadataSettings,
    #[serde(deserialize_with = "nullable")]
    pub optimizer: Optimizer,
    #[serde(deserialize_with = "nullable")]
    pub remappings: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataSettings {
    #[serde(deserialize_with = "nullable")]
    pub bytecode_hash: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Optimizer {
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,
    #[serde(deserialize_with = "nullable")]
    pub runs: i64,
}

/// Provenance of one source file listed in the metadata.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Source {
    #[serde(deserialize_with = "nullable")]
    pub keccak256: String,
    #[serde(deserialize_with = "nullable")]
    pub license: String,
    #[serde(deserialize_with = "nullable")]
    pub urls: Vec<String>,
    /// Literal source, present when compiled with `useLiteralContent`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ContractAddresses {
    #[serde(deserialize_with = "nullable")]
    pub full: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub partial: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct FileTree {
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub files: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Sources {
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub files: Vec<File>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct File {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub path: String,
    #[serde(deserialize_with = "nullable")]
    pub content: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckStatus {
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub chain_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckAllStatus {
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub chain_ids: Vec<ChainIdStatus>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChainIdStatus {
    #[serde(deserialize_with = "nullable")]
    pub chain_id: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
}

/// Registry entry of a network known to the repository.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Chain {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub chain: String,
    #[serde(deserialize_with = "nullable")]
    pub network: String,
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(deserialize_with = "nullable")]
    pub rpc: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub faucets: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub native_currency: NativeCurrency,
    #[serde(rename = "infoURL", deserialize_with = "nullable")]
    pub info_url: String,
    #[serde(deserialize_with = "nullable")]
    pub short_name: String,
    #[serde(deserialize_with = "nullable")]
    pub chain_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub network_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub slip44: i64,
    #[serde(deserialize_with = "nullable")]
    pub ens: Ens,
    #[serde(deserialize_with = "nullable")]
    pub explorers: Vec<Explorer>,
    #[serde(deserialize_with = "nullable")]
    pub supported: bool,
    #[serde(deserialize_with = "nullable")]
    pub monitored: bool,
    #[serde(deserialize_with = "nullable")]
    pub contract_fetch_address: String,
    #[serde(deserialize_with = "nullable")]
    pub tx_regex: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Ens {
    #[serde(deserialize_with = "nullable")]
    pub registry: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Explorer {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub standard: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct NativeCurrency {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub symbol: String,
    #[serde(deserialize_with = "nullable")]
    pub decimals: i64,
}

impl Chain {
    pub const fn is_supported(&self) -> bool {
        self.supported
    }

    pub const fn is_monitored(&self) -> bool {
        self.monitored
    }
}

impl Metadata {
    /// Contract name keyed by its source path, from
    /// `settings.compilationTarget`.
    pub fn compilation_target(&self) -> Option<(&str, &str)> {
        self.settings
            .compilation_target
            .iter()
            .next()
            .map(|(path, name)| (path.as_str(), name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_default() {
        let status: CheckStatus = serde_json::from_str(r#"{"address":"0xabc"}"#).unwrap();
        assert_eq!(
            status,
            CheckStatus {
                address: "0xabc".to_owned(),
                ..CheckStatus::default()
            }
        );
    }

    #[test]
    fn test_null_fields_default() {
        let chain: Chain = serde_json::from_str(
            r#"{"name":"Ethereum Mainnet","chainId":1,"rpc":null,"ens":null,"infoURL":null}"#,
        )
        .unwrap();
        assert_eq!(chain.name, "Ethereum Mainnet");
        assert_eq!(chain.chain_id, 1);
        assert!(chain.rpc.is_empty());
        assert_eq!(chain.ens, Ens::default());
        assert_eq!(chain.info_url, "");
    }

    #[test]
    fn test_null_metadata_fields_default() {
        let metadata: Metadata = serde_json::from_str(
            r#"{"compiler":null,"language":null,"output":null,"settings":null,"sources":null,"version":null}"#,
        )
        .unwrap();
        assert_eq!(metadata, Metadata::default());

        let metadata: Metadata = serde_json::from_str(
            r#"{
                "compiler": {"version": null},
                "output": {"abi": null, "devdoc": {"kind": null, "methods": null, "version": null}, "userdoc": null},
                "settings": {
                    "compilationTarget": null,
                    "evmVersion": null,
                    "libraries": null,
                    "metadata": {"bytecodeHash": null},
                    "optimizer": {"enabled": null, "runs": null},
                    "remappings": null
                },
                "sources": {"contracts/Token.sol": {"keccak256": null, "license": null, "urls": null, "content": null}}
            }"#,
        )
        .unwrap();
        assert_eq!(metadata.compiler, Compiler::default());
        assert_eq!(metadata.output, Output::default());
        assert_eq!(metadata.settings, Settings::default());
        assert_eq!(
            metadata.sources["contracts/Token.sol"],
            Source::default()
        );
    }

    #[test]
    fn test_null_repository_fields_default() {
        let addresses: ContractAddresses =
            serde_json::from_str(r#"{"full":["0x1"],"partial":null}"#).unwrap();
        assert_eq!(addresses.full, vec!["0x1"]);
        assert!(addresses.partial.is_empty());

        let tree: FileTree = serde_json::from_str(r#"{"status":null,"files":null}"#).unwrap();
        assert_eq!(tree, FileTree::default());

        let sources: Sources = serde_json::from_str(r#"{"status":"full","files":null}"#).unwrap();
        assert_eq!(sources.status, "full");
        assert!(sources.files.is_empty());

        let file: File =
            serde_json::from_str(r#"{"name":null,"path":null,"content":null}"#).unwrap();
        assert_eq!(file, File::default());
    }

    #[test]
    fn test_null_check_fields_default() {
        let status: CheckStatus =
            serde_json::from_str(r#"{"address":null,"status":null,"chainIds":null}"#).unwrap();
        assert_eq!(status, CheckStatus::default());

        let status: CheckAllStatus = serde_json::from_str(
            r#"{"address":"0x1","chainIds":[{"chainId":null,"status":null}]}"#,
        )
        .unwrap();
        assert_eq!(status.chain_ids, vec![ChainIdStatus::default()]);

        let status: CheckAllStatus =
            serde_json::from_str(r#"{"address":null,"chainIds":null}"#).unwrap();
        assert_eq!(status, CheckAllStatus::default());
    }

    #[test]
    fn test_null_chain_fields_default() {
        let chain: Chain = serde_json::from_str(
            r#"{
                "name": null, "chain": null, "network": null, "icon": null,
                "rpc": null, "faucets": null, "nativeCurrency": null, "infoURL": null,
                "shortName": null, "chainId": null, "networkId": null, "slip44": null,
                "ens": null, "explorers": null, "supported": null, "monitored": null,
                "contractFetchAddress": null, "txRegex": null
            }"#,
        )
        .unwrap();
        assert_eq!(chain, Chain::default());

        let chain: Chain = serde_json::from_str(
            r#"{
                "nativeCurrency": {"name": null, "symbol": null, "decimals": null},
                "ens": {"registry": null},
                "explorers": [{"name": null, "url": null, "standard": null}]
            }"#,
        )
        .unwrap();
        assert_eq!(chain.native_currency, NativeCurrency::default());
        assert_eq!(chain.ens, Ens::default());
        assert_eq!(chain.explorers, vec![Explorer::default()]);
    }

    #[test]
    fn test_chain_field_names() {
        let chain: Chain = serde_json::from_str(
            r#"{
                "name": "Goerli",
                "chain": "ETH",
                "shortName": "gor",
                "chainId": 5,
                "networkId": 5,
                "infoURL": "https://goerli.net",
                "nativeCurrency": {"name": "Goerli Ether", "symbol": "ETH", "decimals": 18},
                "ens": {"registry": "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e"},
                "explorers": [{"name": "etherscan", "url": "https://goerli.etherscan.io", "standard": "EIP3091"}],
                "supported": true,
                "monitored": false,
                "contractFetchAddress": "https://goerli.etherscan.io/address/${ADDRESS}",
                "txRegex": "getCreationData"
            }"#,
        )
        .unwrap();

        assert_eq!(chain.short_name, "gor");
        assert_eq!(chain.network_id, 5);
        assert_eq!(chain.info_url, "https://goerli.net");
        assert_eq!(chain.native_currency.decimals, 18);
        assert_eq!(chain.explorers[0].standard, "EIP3091");
        assert!(chain.is_supported());
        assert!(!chain.is_monitored());
        assert_eq!(chain.tx_regex, "getCreationData");
    }

    #[test]
    fn test_check_all_status() {
        let statuses: Vec<CheckAllStatus> = serde_json::from_str(
            r#"[{"address":"0x1","chainIds":[{"chainId":"1","status":"perfect"},{"chainId":"5","status":"partial"}]},
                {"address":"0x2","status":"false"}]"#,
        )
        .unwrap();

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].chain_ids[1].chain_id, "5");
        assert_eq!(statuses[0].chain_ids[1].status, "partial");
        assert!(statuses[1].chain_ids.is_empty());
    }

    #[test]
    fn test_metadata_keeps_abi_verbatim() {
        let metadata: Metadata = serde_json::from_str(
            r#"{"compiler":{"version":"0.8.7+commit.e28d00a7"},"output":{"abi":[{"type":"fallback"}],"devdoc":{"kind":"dev","methods":{"owner()":{"details":"Returns owner."}},"version":1}}}"#,
        )
        .unwrap();

        assert_eq!(
            metadata.output.abi.as_ref().map(RawJson::get),
            Some(r#"[{"type":"fallback"}]"#)
        );
        assert_eq!(
            metadata.output.dev_doc.methods["owner()"].get(),
            r#"{"details":"Returns owner."}"#
        );
        assert_eq!(metadata.output.user_doc, Doc::default());
    }

    #[test]
    fn test_compilation_target() {
        let metadata: Metadata = serde_json::from_str(
            r#"{"settings":{"compilationTarget":{"contracts/Token.sol":"Token"}}}"#,
        )
        .unwrap();
        assert_eq!(
            metadata.compilation_target(),
            Some(("contracts/Token.sol", "Token"))
        );
        assert_eq!(Metadata::default().compilation_target(), None);
    }
}
