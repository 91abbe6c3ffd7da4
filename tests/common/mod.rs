#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use axum_test::TestServer;
use shortli::application::services::{CodeAllocator, LinkService};
use shortli::domain::admission_gate::AdmissionGate;
use shortli::domain::entities::{ClickSource, NewShortLink, ShortLink};
use shortli::domain::repositories::{LinkRepository, RepositoryError};
use shortli::infrastructure::persistence::InMemoryLinkRepository;
use shortli::routes::router;
use shortli::state::AppState;
use shortli::utils::code_generator::{CodeGenerator, HashCodeGenerator};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;

pub const BASE_URL: &str = "http://sho.rt";

/// Generator with a fixed code table; other inputs fall back to [`HashCodeGenerator`].
///
/// Keyed by `(url, salt)`, which lets tests force collisions.
pub struct TableGenerator {
    table: HashMap<(String, u32), String>,
}

impl TableGenerator {
    pub fn new(entries: &[(&str, u32, &str)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(url, salt, code)| ((url.to_string(), *salt), code.to_string()))
                .collect(),
        }
    }
}

impl CodeGenerator for TableGenerator {
    fn generate(&self, original_url: &str, salt: u32) -> String {
        self.table
            .get(&(original_url.to_string(), salt))
            .cloned()
            .unwrap_or_else(|| HashCodeGenerator.generate(original_url, salt))
    }
}

pub struct TestApp {
    pub state: AppState,
    pub repository: Arc<dyn LinkRepository>,
}

pub fn create_test_state() -> TestApp {
    create_test_state_with(None, 1000)
}

pub fn create_test_state_with(generator: Option<Arc<dyn CodeGenerator>>, limit: usize) -> TestApp {
    create_test_state_from(Arc::new(InMemoryLinkRepository::new()), generator, limit)
}

pub fn create_test_state_from(
    repository: Arc<dyn LinkRepository>,
    generator: Option<Arc<dyn CodeGenerator>>,
    limit: usize,
) -> TestApp {
    let mut allocator = CodeAllocator::new(repository.clone());
    if let Some(generator) = generator {
        allocator = allocator.with_generator(generator);
    }

    let link_service = Arc::new(LinkService::new(repository.clone(), allocator));
    let admission = Arc::new(AdmissionGate::new(limit, Duration::from_secs(60)).unwrap());

    TestApp {
        state: AppState::new(link_service, admission, BASE_URL),
        repository,
    }
}

/// Repository whose every call fails as if the database were down.
pub struct UnavailableRepository;

fn unavailable() -> RepositoryError {
    RepositoryError::Storage(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl LinkRepository for UnavailableRepository {
    async fn insert(&self, _new_link: NewShortLink) -> Result<ShortLink, RepositoryError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<ShortLink>, RepositoryError> {
        Err(unavailable())
    }

    async fn find_by_original_url(
        &self,
        _original_url: &str,
    ) -> Result<Option<ShortLink>, RepositoryError> {
        Err(unavailable())
    }

    async fn record_click(
        &self,
        _code: &str,
        _source: ClickSource,
    ) -> Result<Option<ShortLink>, RepositoryError> {
        Err(unavailable())
    }

    async fn list(&self, _limit: i64, _offset: i64) -> Result<Vec<ShortLink>, RepositoryError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Err(unavailable())
    }

    async fn delete(&self, _code: &str) -> Result<bool, RepositoryError> {
        Err(unavailable())
    }

    async fn delete_created_before(&self, _cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        Err(unavailable())
    }
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Server whose requests all appear to come from `peer`.
pub fn test_server_from_peer(state: AppState, peer: &str) -> TestServer {
    let addr: SocketAddr = peer.parse().unwrap();
    let app = router(state).layer(MockConnectInfoLayer(addr));
    TestServer::new(app).unwrap()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer(pub SocketAddr);

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.0,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
