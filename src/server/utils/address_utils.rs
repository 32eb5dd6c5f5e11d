use tracing::debug;

/// last resort when nothing else gave us an address
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// where the resolution is being evaluated. the server gets to see env and persisted config, a
/// client only knows the origin of the page it's on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    Server,
    Client { page_origin: Option<String> },
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// picks the base url to advertise to clients, first match wins:
///
/// 1. env configured base (server only)
/// 2. persisted base from the admin config (server only)
/// 3. the origin the caller sent
/// 4. the current page origin (client only)
/// 5. [`DEFAULT_BASE_URL`]
///
/// values are returned verbatim, nothing beyond emptiness is checked
pub fn resolve_base_url(
    caller_origin: Option<&str>,
    persisted_base: Option<&str>,
    env_base: Option<&str>,
    context: &ExecutionContext,
) -> String {
    if *context == ExecutionContext::Server {
        if let Some(env_base) = non_empty(env_base) {
            debug!("base url from env: {}", env_base);
            return env_base.to_string();
        }

        if let Some(persisted) = non_empty(persisted_base) {
            debug!("base url from persisted config: {}", persisted);
            return persisted.to_string();
        }
    }

    if let Some(origin) = non_empty(caller_origin) {
        debug!("base url from caller origin: {}", origin);
        return origin.to_string();
    }

    if let ExecutionContext::Client { page_origin } = context {
        if let Some(page_origin) = non_empty(page_origin.as_deref()) {
            debug!("base url from page origin: {}", page_origin);
            return page_origin.to_string();
        }
    }

    debug!("no base url candidates, using {}", DEFAULT_BASE_URL);
    DEFAULT_BASE_URL.to_string()
}

/// localhost, loopback and the private ipv4 ranges. advisory only, never use this for access
/// control
pub fn is_local_network(hostname: &str) -> bool {
    if hostname == "localhost" || hostname == "127.0.0.1" {
        return true;
    }

    if hostname.starts_with("192.168.") || hostname.starts_with("10.") {
        return true;
    }

    // 172.16.0.0/12, the octet after 172 has to be 16..=31
    hostname
        .strip_prefix("172.")
        .and_then(|rest| rest.split_once('.'))
        .and_then(|(octet, _)| octet.parse::<u8>().ok())
        .is_some_and(|octet| (16..=31).contains(&octet))
}

/// hostname part of a resolved base url, ipv6 brackets are stripped
pub fn host_of(base_url: &str) -> Option<String> {
    let parsed = url::Url::parse(base_url).ok()?;
    let host = parsed.host_str()?;
    Some(host.trim_start_matches('[').trim_end_matches(']').to_string())
}
