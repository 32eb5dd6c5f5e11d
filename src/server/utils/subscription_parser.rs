use serde_json::Value;
use tracing::{debug, warn};

use crate::server::{
    dtos::subscription_dto::{ParsedLive, ParsedSite, ParsedSubscription},
    error::{AppResult, Error},
};

/// sites saved through our own proxy look like
/// `http://host/api/cms-proxy?api=<encoded upstream api>`
const CMS_PROXY_MARKER: &str = "/api/cms-proxy?api=";

/// only this site type is a playable video source, everything else gets dropped
const PLAYABLE_SITE_TYPE: i64 = 1;

/// turns an untyped subscription document into the sites and lives we can use.
///
/// bad entries are dropped, never fatal. only a document that isn't a JSON object at all is an
/// error
pub fn parse_subscription(document: &Value) -> AppResult<ParsedSubscription> {
    if !document.is_object() {
        return Err(Error::InvalidContent(
            "subscription content is not a JSON object".to_string(),
        ));
    }

    let sites: Vec<ParsedSite> = records(document, "sites")
        .filter(|record| is_playable(record))
        .map(parse_site)
        .filter(|site| !site.name.is_empty() && !site.api.is_empty())
        .collect();

    let lives: Vec<ParsedLive> = records(document, "lives")
        .map(parse_live)
        .filter(|live| !live.name.is_empty() && !live.url.is_empty())
        .collect();

    debug!(
        "parsed subscription: {} sites, {} lives",
        sites.len(),
        lives.len()
    );

    Ok(ParsedSubscription { sites, lives })
}

/// object entries of a top level array, anything else counts as empty
fn records<'a>(document: &'a Value, field: &str) -> impl Iterator<Item = &'a Value> {
    let entries: &[Value] = match document.get(field) {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(Value::Null) | None => &[],
        Some(other) => {
            warn!("subscription field '{}' is not an array, found {:?}", field, other);
            &[]
        }
    };

    entries.iter().filter(|entry| entry.is_object())
}

fn is_playable(record: &Value) -> bool {
    match record.get("type") {
        Some(Value::Number(n)) => {
            n.as_i64() == Some(PLAYABLE_SITE_TYPE) || n.as_f64() == Some(PLAYABLE_SITE_TYPE as f64)
        }
        _ => false,
    }
}

/// loose field read. null/missing is "", strings pass through and anything else (numbers,
/// objects for `ext`) is kept as its JSON text
fn text_field(record: &Value, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn parse_site(record: &Value) -> ParsedSite {
    let raw_api = text_field(record, "api");

    ParsedSite {
        name: text_field(record, "name"),
        key: text_field(record, "key"),
        api: unwrap_cms_proxy(&raw_api),
        detail: text_field(record, "ext"),
    }
}

fn parse_live(record: &Value) -> ParsedLive {
    ParsedLive {
        name: text_field(record, "name"),
        url: text_field(record, "url"),
        epg: text_field(record, "epg"),
        ua: text_field(record, "ua"),
    }
}

/// reverses the cms proxy wrapping. the query value is decoded by the url parser and then
/// decoded once more, any failure along the way keeps the raw value
pub fn unwrap_cms_proxy(raw_api: &str) -> String {
    if !raw_api.contains(CMS_PROXY_MARKER) {
        return raw_api.to_string();
    }

    let Ok(parsed) = url::Url::parse(raw_api) else {
        debug!("cms proxy api is not an absolute url, keeping it: {}", raw_api);
        return raw_api.to_string();
    };

    let Some((_, inner)) = parsed.query_pairs().find(|(key, _)| key == "api") else {
        return raw_api.to_string();
    };

    if inner.is_empty() {
        return raw_api.to_string();
    }

    if has_malformed_escape(&inner) {
        debug!("proxied api has a broken percent escape, keeping it: {}", raw_api);
        return raw_api.to_string();
    }

    match urlencoding::decode(&inner) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            debug!("failed to decode proxied api {}: {}", inner, e);
            raw_api.to_string()
        }
    }
}

// urlencoding passes a stray % through untouched, we want it to count as a failure
fn has_malformed_escape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}
