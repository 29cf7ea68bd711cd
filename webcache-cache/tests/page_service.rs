//! End-to-end behaviour of the counting + caching stack over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use webcache_cache::{CacheConfig, KeyValueStore, PageService};
use webcache_fetch::HttpFetcher;
use webcache_store::MemoryStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, route: &str, body: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(hits)
        .mount(server)
        .await;
}

fn service(store: Arc<MemoryStore>) -> PageService<HttpFetcher, Arc<MemoryStore>> {
    PageService::new(store, HttpFetcher::new().unwrap())
}

#[tokio::test]
async fn repeated_calls_fetch_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/a", "hello", 1).await;
    let url = format!("{}/a", server.uri());

    let store = Arc::new(MemoryStore::new());
    let service = service(store.clone());

    assert_eq!(service.get_page(&url).await.unwrap(), "hello");
    assert_eq!(service.get_page(&url).await.unwrap(), "hello");

    assert_eq!(service.access_count(&url).await.unwrap(), 2);
    let ttl = store.ttl(&format!("cached:{}", url)).unwrap();
    assert!(ttl <= Duration::from_secs(10));
}

#[tokio::test]
async fn expired_page_is_fetched_again() {
    let server = MockServer::start().await;
    mount_page(&server, "/a", "hello", 2).await;
    let url = format!("{}/a", server.uri());

    let store = Arc::new(MemoryStore::new());
    let config = CacheConfig {
        ttl_seconds: 1,
        ..Default::default()
    };
    let service = PageService::with_config(store, HttpFetcher::new().unwrap(), config);

    service.get_page(&url).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    service.get_page(&url).await.unwrap();

    assert_eq!(service.access_count(&url).await.unwrap(), 2);
}

#[tokio::test]
async fn empty_pages_are_refetched() {
    let server = MockServer::start().await;
    mount_page(&server, "/empty", "", 3).await;
    let url = format!("{}/empty", server.uri());

    let service = service(Arc::new(MemoryStore::new()));
    for _ in 0..3 {
        assert_eq!(service.get_page(&url).await.unwrap(), "");
    }
    assert_eq!(service.access_count(&url).await.unwrap(), 3);
}

#[tokio::test]
async fn distinct_urls_do_not_share_entries() {
    let server = MockServer::start().await;
    mount_page(&server, "/a", "A", 1).await;
    mount_page(&server, "/b", "B", 1).await;
    let (a, b) = (format!("{}/a", server.uri()), format!("{}/b", server.uri()));

    let store = Arc::new(MemoryStore::new());
    let service = service(store.clone());

    assert_eq!(service.get_page(&a).await.unwrap(), "A");
    assert_eq!(service.get_page(&b).await.unwrap(), "B");
    assert_eq!(service.get_page(&a).await.unwrap(), "A");

    assert_eq!(service.access_count(&a).await.unwrap(), 2);
    assert_eq!(service.access_count(&b).await.unwrap(), 1);
    assert_eq!(store.get(&format!("cached:{}", b)).await.unwrap().unwrap(), b"B");
}

#[tokio::test]
async fn transport_failure_counts_but_caches_nothing() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let store = Arc::new(MemoryStore::new());
    let service = service(store.clone());

    let err = service.get_page(&url).await.unwrap_err();
    assert!(err.is_fetch_error());
    assert_eq!(service.access_count(&url).await.unwrap(), 1);
    assert!(store.get(&format!("cached:{}", url)).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_never_lose_counts() {
    let server = MockServer::start().await;
    // Racing misses may each fetch; the count must still be exact.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hot"))
        .mount(&server)
        .await;
    let url = server.uri();

    let service = Arc::new(service(Arc::new(MemoryStore::new())));
    let calls = (0..20).map(|_| {
        let service = service.clone();
        let url = url.clone();
        tokio::spawn(async move { service.get_page(&url).await })
    });

    for result in futures::future::join_all(calls).await {
        assert_eq!(result.unwrap().unwrap(), "hot");
    }
    assert_eq!(service.access_count(&url).await.unwrap(), 20);
}
