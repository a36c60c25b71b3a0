use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use std::fmt::{self, Display};

/// Repository subtree a contract's files are stored under.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MatchType {
    #[serde(rename = "full_match")]
    Full,
    #[serde(rename = "partial_match")]
    Partial,
}

impl MatchType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full_match",
            Self::Partial => "partial_match",
        }
    }
}

impl Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full_match" | "full" => Ok(Self::Full),
            "partial_match" | "partial" => Ok(Self::Partial),
            _ => Err(format!(
                "Invalid match type: {s}. Valid options: full_match, partial_match"
            )),
        }
    }
}

impl clap::ValueEnum for MatchType {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Full, Self::Partial]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Full => clap::builder::PossibleValue::new("full_match")
                .alias("full")
                .help("Bytecode and metadata hash match"),
            Self::Partial => clap::builder::PossibleValue::new("partial_match")
                .alias("partial")
                .help("Bytecode matches except for the metadata hash"),
        })
    }
}

/// JSON kept exactly as the server sent it.
///
/// Used for payloads like the ABI whose structure the client never
/// looks into. Decode it on demand with [`RawJson::decode`].
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawJson(Box<RawValue>);

impl RawJson {
    /// # Errors
    ///
    /// Fails if `json` isn't valid JSON.
    pub fn new(json: impl Into<String>) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json.into()).map(Self)
    }

    pub fn get(&self) -> &str {
        self.0.get()
    }

    /// # Errors
    ///
    /// Fails if the stored JSON doesn't match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.get())
    }
}

impl PartialEq for RawJson {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for RawJson {}

impl Display for RawJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

/// Treats an explicit `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_type_display() {
        assert_eq!(MatchType::Full.to_string(), "full_match");
        assert_eq!(MatchType::Partial.to_string(), "partial_match");
    }

    #[test]
    fn test_match_type_from_str() {
        assert_eq!("full_match".parse::<MatchType>(), Ok(MatchType::Full));
        assert_eq!("Partial".parse::<MatchType>(), Ok(MatchType::Partial));
        assert!("any".parse::<MatchType>().is_err());
    }

    #[test]
    fn test_raw_json_is_preserved() {
        let raw = RawJson::new(r#"[{"type":"constructor","inputs":[]}]"#).unwrap();
        assert_eq!(raw.get(), r#"[{"type":"constructor","inputs":[]}]"#);

        let decoded: serde_json::Value = raw.decode().unwrap();
        assert_eq!(decoded[0]["type"], "constructor");
    }

    #[test]
    fn test_raw_json_rejects_invalid() {
        assert!(RawJson::new("{not json").is_err());
    }
}
