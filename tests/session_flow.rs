//! End-to-end flow over a scripted registration endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use yq_session::config::GSN_SALT;
use yq_session::signing::{canonical_string, CachePolicy, GSN_PARAM};
use yq_session::{
    ClientConfig, CredentialStore, DeviceIdentity, Error, HttpTransport, Method, RequestBuilder,
    Result, SignedRequest, Signer, TransportResponse,
};

/// Answers registration calls with a fresh user and everything else with 200.
#[derive(Default)]
struct FakeApi {
    registrations: AtomicUsize,
    requests: Mutex<Vec<SignedRequest>>,
}

#[async_trait]
impl HttpTransport for FakeApi {
    async fn execute(&self, request: &SignedRequest) -> Result<TransportResponse> {
        self.requests.lock().push(request.clone());

        // The server recomputes the signature from what it received.
        let received: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected = yq_session::crypto::md5_hex(
            canonical_string(
                GSN_SALT,
                request.method(),
                received.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                request.body(),
            )
            .as_bytes(),
        );
        let gsn = received
            .iter()
            .find(|(k, _)| k == GSN_PARAM)
            .map(|(_, v)| v.as_str());
        if gsn != Some(expected.as_str()) {
            return Ok(TransportResponse::new(400, "bad gsn"));
        }

        if request.url().path().ends_with("/createAnonyUser2") {
            let n = self.registrations.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(10)).await;
            let body = format!(
                r#"{{"response":{{"initDeviceKey":"","nickName":"guest","tokenResult":{{"parameter":"tok{}","scheme":"YQ_TOKEN"}},"userId":{},"userName":""}}}}"#,
                n,
                9000 + n
            );
            return Ok(TransportResponse::new(200, body));
        }

        match request.header("Authorization") {
            Some(auth) if auth.starts_with("YQ_TOKEN ") => {
                Ok(TransportResponse::new(200, r#"{"response":{"mangas":[]}}"#))
            }
            Some(_) if request.method() == Method::Get => Ok(TransportResponse::new(401, "")),
            _ => Ok(TransportResponse::new(200, r#"{"response":{}}"#)),
        }
    }
}

fn builder_with(store: CredentialStore, api: Arc<FakeApi>) -> RequestBuilder {
    RequestBuilder::new(ClientConfig::default(), DeviceIdentity::generate(), store, api).unwrap()
}

#[tokio::test]
async fn signed_get_round_trip() {
    let api = Arc::new(FakeApi::default());
    let builder = builder_with(CredentialStore::in_memory(), api.clone());

    let request = builder.build_get("/v1/manga/getDetail?mangaId=7").await.unwrap();
    let response = builder.execute(&request).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(api.registrations.load(Ordering::SeqCst), 1);
    assert_eq!(api.requests.lock().len(), 2);
    assert_eq!(request.param("gaui"), Some("9001"));
}

#[tokio::test]
async fn signed_post_round_trip() {
    let api = Arc::new(FakeApi::default());
    let builder = builder_with(CredentialStore::in_memory(), api.clone());

    let request = builder
        .build_post("/v1/bookself/add", r#"{"mangaId": 7, "note": "a b*~"}"#)
        .unwrap();
    let response = builder.execute(&request).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(request.cache_policy(), Some(CachePolicy::NoStore));
    assert_eq!(api.registrations.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_requests_share_one_session() {
    let api = Arc::new(FakeApi::default());
    let builder = Arc::new(builder_with(CredentialStore::in_memory(), api.clone()));

    let mut tasks = Vec::new();
    for i in 0..12 {
        let builder = Arc::clone(&builder);
        tasks.push(tokio::spawn(async move {
            builder
                .build_get(&format!("/v1/manga/getDetail?mangaId={}", i))
                .await
        }));
    }

    let mut authorizations = Vec::new();
    for task in tasks {
        let request = task.await.unwrap().unwrap();
        authorizations.push(request.header("Authorization").unwrap().to_string());
    }

    assert_eq!(api.registrations.load(Ordering::SeqCst), 1);
    assert!(authorizations.iter().all(|a| a == "YQ_TOKEN tok1"));
}

#[tokio::test]
async fn persisted_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let api = Arc::new(FakeApi::default());

    let first = builder_with(CredentialStore::open_file(&path).unwrap(), api.clone());
    let before = first.session().credential().await.unwrap();
    drop(first);

    let second = builder_with(CredentialStore::open_file(&path).unwrap(), api.clone());
    let after = second.session().credential().await.unwrap();

    assert_eq!(before, after);
    assert_eq!(api.registrations.load(Ordering::SeqCst), 1);
    assert_eq!(second.session().bootstrap_count(), 0);
}

#[tokio::test]
async fn rejected_token_triggers_new_registration() {
    let api = Arc::new(FakeApi::default());
    let store = CredentialStore::in_memory();
    store
        .save(&yq_session::Credential::new("EXPIRED", "old", "1"))
        .unwrap();
    let builder = builder_with(store, api.clone());

    let stale = builder.build_get("/v1/list").await.unwrap();
    assert!(matches!(builder.execute(&stale).await, Err(Error::Unauthorized)));

    let fresh = builder.build_get("/v1/list").await.unwrap();
    assert_eq!(fresh.header("Authorization"), Some("YQ_TOKEN tok1"));
    assert_eq!(builder.execute(&fresh).await.unwrap().status, 200);
}

#[test]
fn worked_signature_example() {
    let signer = Signer::new("S");

    let mut forward = yq_session::CanonicalRequest::get("http://api.test/x").unwrap();
    forward.set_param("b", "2").set_param("a", "1");
    let mut backward = yq_session::CanonicalRequest::get("http://api.test/x").unwrap();
    backward.set_param("a", "1").set_param("b", "2");

    assert_eq!(forward.canonical_string("S"), "SGETa1b2S");
    assert_eq!(forward.canonical_string("S"), backward.canonical_string("S"));
    assert_eq!(signer.signature(&forward), "7be5d905990c1b534c3a2d208ad8899e");
    assert_eq!(signer.signature(&backward), signer.signature(&forward));
}

#[tokio::test]
async fn many_stale_rejections_cause_one_registration() {
    let api = Arc::new(FakeApi::default());
    let store = CredentialStore::in_memory();
    store
        .save(&yq_session::Credential::new("EXPIRED", "old", "1"))
        .unwrap();
    let builder = builder_with(store, api.clone());

    let mut stale = Vec::new();
    for i in 0..4 {
        stale.push(builder.build_get(&format!("/v1/list?page={}", i)).await.unwrap());
    }

    assert!(matches!(builder.execute(&stale[0]).await, Err(Error::Unauthorized)));
    let fresh = builder.build_get("/v1/list").await.unwrap();

    for request in &stale[1..] {
        assert!(matches!(builder.execute(request).await, Err(Error::Unauthorized)));
    }

    let again = builder.build_get("/v1/list").await.unwrap();
    assert_eq!(again.header("Authorization"), fresh.header("Authorization"));
    assert_eq!(api.registrations.load(Ordering::SeqCst), 1);
}
