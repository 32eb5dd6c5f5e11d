use feedhub_api::server::utils::address_utils::{
    DEFAULT_BASE_URL, ExecutionContext, host_of, is_local_network, resolve_base_url,
};

const ENV: &str = "https://env.example.com";
const PERSISTED: &str = "https://persisted.example.com";
const CALLER: &str = "http://192.168.1.20:3000";

#[test]
fn test_env_base_wins_on_the_server() {
    let combos = [
        (None, None),
        (Some(PERSISTED), None),
        (None, Some(CALLER)),
        (Some(PERSISTED), Some(CALLER)),
        (Some(""), Some("")),
    ];

    for (persisted, caller) in combos {
        assert_eq!(
            resolve_base_url(caller, persisted, Some(ENV), &ExecutionContext::Server),
            ENV
        );
    }
}

#[test]
fn test_persisted_base_when_env_missing() {
    for env in [None, Some("")] {
        assert_eq!(
            resolve_base_url(Some(CALLER), Some(PERSISTED), env, &ExecutionContext::Server),
            PERSISTED
        );
    }
}

#[test]
fn test_caller_origin_when_nothing_configured() {
    assert_eq!(
        resolve_base_url(Some(CALLER), None, None, &ExecutionContext::Server),
        CALLER
    );
    assert_eq!(
        resolve_base_url(Some(CALLER), Some(""), Some(""), &ExecutionContext::Server),
        CALLER
    );
}

#[test]
fn test_default_on_the_server() {
    assert_eq!(
        resolve_base_url(None, None, None, &ExecutionContext::Server),
        DEFAULT_BASE_URL
    );
    assert_eq!(
        resolve_base_url(Some(""), Some(""), Some(""), &ExecutionContext::Server),
        "http://localhost:3000"
    );
}

#[test]
fn test_values_are_returned_verbatim() {
    // no validation beyond emptiness, trailing slashes and odd values pass straight through
    assert_eq!(
        resolve_base_url(None, None, Some("not a url/"), &ExecutionContext::Server),
        "not a url/"
    );
}

#[test]
fn test_client_ignores_env_and_persisted() {
    let client = ExecutionContext::Client {
        page_origin: Some("https://page.example.com".to_string()),
    };

    assert_eq!(
        resolve_base_url(Some(CALLER), Some(PERSISTED), Some(ENV), &client),
        CALLER
    );
    assert_eq!(
        resolve_base_url(None, Some(PERSISTED), Some(ENV), &client),
        "https://page.example.com"
    );
}

#[test]
fn test_client_falls_back_to_default() {
    let no_page = ExecutionContext::Client { page_origin: None };
    let empty_page = ExecutionContext::Client {
        page_origin: Some(String::new()),
    };

    assert_eq!(resolve_base_url(None, None, None, &no_page), DEFAULT_BASE_URL);
    assert_eq!(
        resolve_base_url(None, None, None, &empty_page),
        DEFAULT_BASE_URL
    );
}

#[test]
fn test_local_network_hosts() {
    for host in [
        "192.168.1.5",
        "10.0.0.1",
        "172.20.3.4",
        "172.16.0.1",
        "172.31.255.255",
        "localhost",
        "127.0.0.1",
    ] {
        assert!(is_local_network(host), "{} should be local", host);
    }
}

#[test]
fn test_public_hosts() {
    for host in [
        "8.8.8.8",
        "172.32.0.1",
        "172.15.0.1",
        "172.2.0.1",
        "example.com",
        "192.169.0.1",
        "",
    ] {
        assert!(!is_local_network(host), "{} should not be local", host);
    }
}

#[test]
fn test_host_of_base_url() {
    assert_eq!(
        host_of("http://192.168.1.5:3000").as_deref(),
        Some("192.168.1.5")
    );
    assert_eq!(
        host_of("https://tv.example.com").as_deref(),
        Some("tv.example.com")
    );
    assert_eq!(host_of("http://[::1]:3000").as_deref(), Some("::1"));
    assert_eq!(host_of("nonsense"), None);
}
