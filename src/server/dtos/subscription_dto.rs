use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ParseSubscriptionRequest {
    // missing and null both end up here as "" so every case gives the same error
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "empty url"))]
    pub url: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSite {
    pub name: String,
    pub key: String,
    pub api: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLive {
    pub name: String,
    pub url: String,
    pub epg: String,
    pub ua: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedSubscription {
    pub sites: Vec<ParsedSite>,
    pub lives: Vec<ParsedLive>,
}
