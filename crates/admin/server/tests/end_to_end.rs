//! End-to-end tests over a real listener with the real client.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fcr_admin_client::{AdminClient, ClientError, request};
use fcr_admin_codec::AdminKey;
use fcr_admin_server::{AdminServer, AdminServerConfig, HandlerError, HandlerResult, ServerError};

fn test_server(key: &str) -> AdminServer {
    let server = AdminServer::new(AdminServerConfig::new("127.0.0.1:0", key));
    server.add_handler(10, |payload: &[u8]| -> HandlerResult {
        assert_eq!(payload, [1, 2, 3]);
        Ok((11, vec![4, 5, 6]))
    });
    server.add_handler(13, |_: &[u8]| -> HandlerResult {
        Err(HandlerError::new("peer not found: abc"))
    });
    server
}

#[tokio::test]
async fn test_request_round_trip() {
    let key = AdminKey::generate().to_hex();
    let server = test_server(&key);
    let addr = server.start().await.unwrap().to_string();

    let (resp_type, resp) = request(&addr, &key, 10, &[1, 2, 3]).await.unwrap();
    assert_eq!(resp_type, 11);
    assert_eq!(resp, vec![4, 5, 6]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_unregistered_type_is_rejected() {
    let key = AdminKey::generate().to_hex();
    let server = test_server(&key);
    let addr = server.start().await.unwrap().to_string();

    let err = request(&addr, &key, 12, &[1, 2, 3]).await.unwrap_err();
    match err {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "unsupported message type: 12");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_key_fails_authentication() {
    let key = AdminKey::generate().to_hex();
    let server = test_server(&key);
    let addr = server.start().await.unwrap().to_string();

    let other_key = AdminKey::generate().to_hex();
    let err = request(&addr, &other_key, 10, &[1, 2, 3]).await.unwrap_err();
    assert!(err.is_authentication(), "unexpected error: {err:?}");
    assert!(matches!(err, ClientError::Unauthenticated { .. }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_handler_error_reaches_client() {
    let key = AdminKey::generate().to_hex();
    let server = test_server(&key);
    let addr = server.start().await.unwrap().to_string();

    let err = request(&addr, &key, 13, b"{}").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Rejected { status: 400, ref message } if message == "peer not found: abc"
    ));

    server.shutdown().await;
}

#[tokio::test]
async fn test_restart() {
    let key = AdminKey::generate().to_hex();
    let server = test_server(&key);

    server.start().await.unwrap();
    assert!(matches!(
        server.start().await.unwrap_err(),
        ServerError::AlreadyStarted
    ));
    server.shutdown().await;
    server.shutdown().await;

    let addr = server.start().await.unwrap();
    let (resp_type, _) = request(&addr.to_string(), &key, 10, &[1, 2, 3])
        .await
        .unwrap();
    assert_eq!(resp_type, 11);
    assert!(server.has_handler(10));

    server.shutdown().await;
}

#[tokio::test]
async fn test_raw_bodies_rejected_with_json() {
    let key = AdminKey::generate().to_hex();
    let server = test_server(&key);
    let addr = server.start().await.unwrap();
    let url = format!("http://{addr}/");
    let http = reqwest::Client::new();

    for body in [Vec::new(), vec![0u8], vec![0xab; 40]] {
        let response = http.post(&url).body(body).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let text = response.text().await.unwrap();
        assert_eq!(text, r#"{"Error":"request fails to verify"}"#);
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_requests() {
    let key = AdminKey::generate().to_hex();
    let calls = Arc::new(AtomicUsize::new(0));

    let server = AdminServer::new(AdminServerConfig::new("127.0.0.1:0", key.as_str()));
    let counter = calls.clone();
    server.add_handler(14, move |payload: &[u8]| -> HandlerResult {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok((15, payload.to_vec()))
    });
    let addr = server.start().await.unwrap().to_string();

    let client = AdminClient::new(&addr, &key).unwrap();
    let mut tasks = Vec::new();
    for i in 0..16u8 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move { client.request(14, &[i]).await }));
    }
    for (i, task) in tasks.into_iter().enumerate() {
        let (resp_type, resp) = task.await.unwrap().unwrap();
        assert_eq!(resp_type, 15);
        assert_eq!(resp, vec![i as u8]);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 16);

    server.shutdown().await;
}
