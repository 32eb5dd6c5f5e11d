use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Unavailable,
}

#[derive(Debug, Serialize)]
pub struct SuggestedUrls {
    /// lan address + port, None when no interface was found
    pub local: Option<String>,
    /// public address + port, None when every lookup service failed
    pub public: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NetworkInfoResponse {
    pub local_ip: Option<String>,
    pub public_ip: Option<String>,
    pub public_ip_status: ProbeStatus,
    pub port: u16,
    /// the address we'd hand out to clients right now
    pub base_url: String,
    pub is_local_network: bool,
    pub suggested_urls: SuggestedUrls,
    pub hint: Option<String>,
}
