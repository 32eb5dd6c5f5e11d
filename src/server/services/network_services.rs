use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info, warn};

/// plain text "what's my ip" services, asked one at a time in this order
pub const PUBLIC_IP_SERVICES: &[&str] = &[
    "https://api.ipify.org",
    "https://ipv4.icanhazip.com",
    "https://ifconfig.me/ip",
    "https://api.ip.sb/ip",
];

pub type DynNetworkService = Arc<dyn NetworkServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait NetworkServiceTrait {
    /// best guess at the lan address of this machine
    async fn local_ip(&self) -> Option<IpAddr>;

    /// address the internet sees us as, None when every lookup service failed
    async fn public_ip(&self) -> Option<IpAddr>;
}

pub struct NetworkService {
    http: reqwest::Client,
    endpoints: Vec<String>,
    probe_timeout: Duration,
}

impl NetworkService {
    pub fn new(http: reqwest::Client, probe_timeout: Duration) -> Self {
        Self::with_endpoints(
            http,
            PUBLIC_IP_SERVICES.iter().map(|s| s.to_string()).collect(),
            probe_timeout,
        )
    }

    pub fn with_endpoints(
        http: reqwest::Client,
        endpoints: Vec<String>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            http,
            endpoints,
            probe_timeout,
        }
    }

    /// one lookup service. anything that isn't a 2xx with an ip shaped body is a miss
    async fn probe(&self, endpoint: &str) -> Option<IpAddr> {
        let response = match self
            .http
            .get(endpoint)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("public ip lookup {} failed: {}", endpoint, e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(
                "public ip lookup {} returned status {}",
                endpoint,
                response.status()
            );
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("public ip lookup {} body unreadable: {}", endpoint, e);
                return None;
            }
        };

        match body.trim().parse::<IpAddr>() {
            Ok(ip) => Some(ip),
            Err(_) => {
                debug!(
                    "public ip lookup {} returned a non ip body ({} bytes)",
                    endpoint,
                    body.len()
                );
                None
            }
        }
    }
}

/// ranks an ipv4 interface address, lower is better. None means never advertise it
fn local_ip_rank(ip: &Ipv4Addr) -> Option<u8> {
    if ip.is_loopback() || ip.is_link_local() || ip.is_unspecified() {
        return None;
    }

    Some(match ip.octets() {
        [192, 168, _, _] => 0,
        [10, _, _, _] => 1,
        [172, second, _, _] if (16..=31).contains(&second) => 2,
        _ => 3,
    })
}

/// picks the most likely lan address: 192.168.x.x, then 10.x.x.x, then 172.16-31.x.x, then any
/// other non loopback ipv4. the first one wins on a tie
pub fn best_local_ip(candidates: impl IntoIterator<Item = IpAddr>) -> Option<IpAddr> {
    candidates
        .into_iter()
        .filter_map(|ip| match ip {
            IpAddr::V4(v4) => local_ip_rank(&v4).map(|rank| (rank, v4)),
            IpAddr::V6(_) => None,
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, v4)| IpAddr::V4(v4))
}

#[async_trait]
impl NetworkServiceTrait for NetworkService {
    async fn local_ip(&self) -> Option<IpAddr> {
        match local_ip_address::list_afinet_netifas() {
            Ok(interfaces) => {
                if let Some(ip) = best_local_ip(interfaces.into_iter().map(|(_, ip)| ip)) {
                    return Some(ip);
                }
            }
            Err(e) => warn!("failed to list network interfaces: {}", e),
        }

        // whatever the default route goes out of
        local_ip_address::local_ip()
            .ok()
            .filter(|ip| !ip.is_loopback())
    }

    async fn public_ip(&self) -> Option<IpAddr> {
        for endpoint in &self.endpoints {
            if let Some(ip) = self.probe(endpoint).await {
                info!("public ip {} from {}", ip, endpoint);
                metrics::counter!("public_ip_probe_total", "outcome" => "ok").increment(1);
                return Some(ip);
            }
        }

        warn!(
            "all {} public ip lookup services failed",
            self.endpoints.len()
        );
        metrics::counter!("public_ip_probe_total", "outcome" => "unavailable").increment(1);
        None
    }
}
