//! End-to-end redirect flow tests against a live server.

use std::net::SocketAddr;
use std::path::Path;

use reqwest::header::{HOST, LOCATION};
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_redirect_locations() {
    let addr: SocketAddr = "127.0.0.1:28481".parse().unwrap();
    let shutdown = common::start_server(addr, Path::new("configs/examples.csv")).await;
    let client = common::no_redirect_client();

    // (request host, path and query, expected Location)
    let expected = [
        ("before", "/hoge", "https://after/yo"),
        ("before", "/hoge?a=1", "https://after/yo?z=1"),
        ("before", "/hoge?a=2", "https://after/yo?z=2"),
        ("before", "/hoge?b=2", "https://after/yo?z=2"),
        // no scored match falls back to the default
        ("before", "/hoge?c=3", "https://after/yo"),
        ("before", "/hoge?a=1&b=2", "https://after/yo?z=3"),
        // order of query parameters does not matter
        ("before", "/hoge?b=2&a=1", "https://after/yo?z=3"),
        // unknown parameters are ignored
        ("before", "/hoge?c=3&b=2&a=1", "https://after/yo?z=3"),
        ("before", "/hoge?a=3&b=4", "https://after/yo?z=7"),
        // partially covered rule loses to the default
        ("before", "/hoge?a=3", "https://after/yo"),
        ("before", "/fuga", "https://after/dir/hey"),
        ("before", "/fuga?a=1", "https://after/dir/hey"),
        ("anotherdomain", "/hoge", "https://another/yo"),
    ];

    for (host, path_and_query, expected_location) in expected {
        let res = client
            .get(format!("http://{addr}{path_and_query}"))
            .header(HOST, host)
            .send()
            .await
            .expect("server unreachable");

        assert_eq!(
            res.status(),
            StatusCode::MOVED_PERMANENTLY,
            "{host}{path_and_query}: unexpected status"
        );
        let location = res.headers().get(LOCATION).and_then(|v| v.to_str().ok());
        assert_eq!(
            location,
            Some(expected_location),
            "{host}{path_and_query}: unexpected location"
        );
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_unmatched_requests_are_not_found() {
    let addr: SocketAddr = "127.0.0.1:28482".parse().unwrap();
    let shutdown = common::start_server(addr, Path::new("configs/examples.csv")).await;
    let client = common::no_redirect_client();

    let unmatched = [
        ("before", "/notdefined"),
        ("notdefined", "/hoge"),
        // no default rule exists for this path
        ("before", "/piyo"),
        ("before", "/piyo?z=1"),
    ];

    for (host, path_and_query) in unmatched {
        let res = client
            .get(format!("http://{addr}{path_and_query}"))
            .header(HOST, host)
            .send()
            .await
            .expect("server unreachable");

        assert_eq!(
            res.status(),
            StatusCode::NOT_FOUND,
            "{host}{path_and_query}: unexpected status"
        );
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_is_always_ok() {
    let addr: SocketAddr = "127.0.0.1:28483".parse().unwrap();
    let shutdown = common::start_server(addr, Path::new("configs/examples.csv")).await;
    let client = common::no_redirect_client();

    for host in ["before", "notdefined"] {
        let res = client
            .get(format!("http://{addr}/health"))
            .header(HOST, host)
            .send()
            .await
            .expect("server unreachable");

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["status"], "ok");
    }

    shutdown.trigger();
}
