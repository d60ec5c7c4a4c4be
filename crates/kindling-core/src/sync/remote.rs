//! Remote snapshot store.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::SyncError;

/// Destination for mirrored snapshots.
///
/// `push` is blocking; the mirror always calls it from a blocking task on
/// its own runtime.
pub trait RemoteStore: Send + Sync + 'static {
    fn push(&self, snapshot: &str) -> Result<(), SyncError>;
}

/// `PUT`s the JSON snapshot to `{endpoint}/snapshots/{device_id}`.
pub struct HttpRemoteStore {
    client: Client,
    url: Url,
}

impl HttpRemoteStore {
    pub fn new(endpoint: &Url, device_id: &str, timeout: Duration) -> Result<Self, SyncError> {
        let url = snapshot_url(endpoint, device_id)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Snapshot location below `endpoint`, keeping any base path.
pub fn snapshot_url(endpoint: &Url, device_id: &str) -> Result<Url, SyncError> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("snapshots/{device_id}"))
        .map_err(|e| SyncError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
}

impl RemoteStore for HttpRemoteStore {
    /// Blocks on the calling thread's runtime; call it from inside
    /// `spawn_blocking` as the mirror does.
    fn push(&self, snapshot: &str) -> Result<(), SyncError> {
        let handle = tokio::runtime::Handle::try_current()?;
        let resp = handle.block_on(
            self.client
                .put(self.url.clone())
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(snapshot.to_string())
                .send(),
        )?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status().as_u16();
            let body = handle.block_on(resp.text()).unwrap_or_default();
            Err(SyncError::Rejected { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn snapshot_url_keeps_base_path() {
        let endpoint = Url::parse("https://sync.example.com/kindling").unwrap();
        let url = snapshot_url(&endpoint, "kindling-abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sync.example.com/kindling/snapshots/kindling-abc"
        );

        let endpoint = Url::parse("https://sync.example.com/").unwrap();
        let url = snapshot_url(&endpoint, "kindling-abc").unwrap();
        assert_eq!(url.as_str(), "https://sync.example.com/snapshots/kindling-abc");
    }

    #[test]
    fn push_outside_a_runtime_is_an_error() {
        let endpoint = Url::parse("http://127.0.0.1:9/").unwrap();
        let store =
            HttpRemoteStore::new(&endpoint, "kindling-test", Duration::from_secs(1)).unwrap();
        let err = store.push(r#"{"streak":3}"#).unwrap_err();
        assert!(matches!(err, SyncError::NoRuntime(_)));
    }

    #[test]
    fn push_puts_snapshot() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/snapshots/kindling-test")
            .match_header("content-type", "application/json")
            .match_body(r#"{"streak":3}"#)
            .with_status(204)
            .create();

        let endpoint = Url::parse(&server.url()).unwrap();
        let store = Arc::new(
            HttpRemoteStore::new(&endpoint, "kindling-test", Duration::from_secs(5)).unwrap(),
        );

        let rt = runtime();
        let pushing = Arc::clone(&store);
        let result = rt
            .block_on(rt.spawn_blocking(move || pushing.push(r#"{"streak":3}"#)))
            .unwrap();

        assert!(result.is_ok(), "push failed: {result:?}");
        mock.assert();
    }

    #[test]
    fn push_reports_rejection() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("PUT", "/snapshots/kindling-test")
            .with_status(503)
            .with_body("maintenance")
            .create();

        let endpoint = Url::parse(&server.url()).unwrap();
        let store = HttpRemoteStore::new(&endpoint, "kindling-test", Duration::from_secs(5)).unwrap();

        let rt = runtime();
        let result = rt
            .block_on(rt.spawn_blocking(move || store.push("{}")))
            .unwrap();

        match result {
            Err(SyncError::Rejected { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
