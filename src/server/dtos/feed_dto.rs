use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    #[default]
    Json,
    Base64,
}

impl std::str::FromStr for FeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "base64" => Ok(Self::Base64),
            other => Err(format!("unsupported format: {}", other)),
        }
    }
}

impl FeedFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Base64 => "base64",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedUrlQuery {
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedUrlResponse {
    pub url: String,
    pub base_url: String,
    pub format: FeedFormat,
    pub token_protected: bool,
    pub is_local_network: bool,
}
