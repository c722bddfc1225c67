#![allow(dead_code)]

use async_trait::async_trait;
use cloudmap_application::ports::{NameResolver, ProviderFeedSource, ProviderTableStore};
use cloudmap_domain::{
    DomainError, NameLookupRequest, NameLookupResult, ProviderRange, ProviderTable,
    ResolutionFailure,
};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Mock NameResolver
// ============================================================================

#[derive(Clone)]
enum Behavior {
    Answer(Vec<IpAddr>),
    Fail(ResolutionFailure),
    Hang,
}

/// Resolver with canned answers per domain. Unknown domains answer NXDOMAIN.
#[derive(Clone, Default)]
pub struct MockNameResolver {
    behaviors: Arc<Mutex<HashMap<String, (Behavior, Duration)>>>,
    seen: Arc<Mutex<Vec<NameLookupRequest>>>,
}

impl MockNameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, domain: &str, addresses: &[&str]) -> Self {
        let addresses = addresses.iter().map(|a| a.parse().unwrap()).collect();
        self.set(domain, Behavior::Answer(addresses), Duration::ZERO)
    }

    pub fn answer_after(self, domain: &str, addresses: &[&str], delay: Duration) -> Self {
        let addresses = addresses.iter().map(|a| a.parse().unwrap()).collect();
        self.set(domain, Behavior::Answer(addresses), delay)
    }

    pub fn fail(self, domain: &str, failure: ResolutionFailure) -> Self {
        self.set(domain, Behavior::Fail(failure), Duration::ZERO)
    }

    pub fn fail_after(self, domain: &str, failure: ResolutionFailure, delay: Duration) -> Self {
        self.set(domain, Behavior::Fail(failure), delay)
    }

    /// Never answers; only cancellation ends the lookup.
    pub fn hang(self, domain: &str) -> Self {
        self.set(domain, Behavior::Hang, Duration::ZERO)
    }

    fn set(self, domain: &str, behavior: Behavior, delay: Duration) -> Self {
        self.behaviors
            .lock()
            .unwrap()
            .insert(domain.to_string(), (behavior, delay));
        self
    }

    pub fn requests(&self) -> Vec<NameLookupRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameResolver for MockNameResolver {
    async fn resolve(&self, request: &NameLookupRequest) -> NameLookupResult {
        self.seen.lock().unwrap().push(request.clone());

        let entry = self
            .behaviors
            .lock()
            .unwrap()
            .get(request.domain.as_ref())
            .cloned();

        let (behavior, delay) =
            entry.unwrap_or((Behavior::Fail(ResolutionFailure::NxDomain), Duration::ZERO));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match behavior {
            Behavior::Answer(addresses) => NameLookupResult::resolved(request, addresses, 1),
            Behavior::Fail(failure) => NameLookupResult::failed(request, failure, 1),
            Behavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

// ============================================================================
// Mock feed source and store
// ============================================================================

pub struct StaticFeed {
    provider: String,
    cidrs: Vec<String>,
    delay: Duration,
    fail: bool,
}

impl StaticFeed {
    pub fn new(provider: &str, cidrs: &[&str]) -> Self {
        Self {
            provider: provider.to_string(),
            cidrs: cidrs.iter().map(|c| c.to_string()).collect(),
            delay: Duration::ZERO,
            fail: false,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl ProviderFeedSource for StaticFeed {
    fn provider(&self) -> &str {
        &self.provider
    }

    async fn fetch(&self) -> Result<Vec<ProviderRange>, DomainError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(DomainError::ConfigurationError(format!(
                "{}: HTTP 503",
                self.provider
            )));
        }
        Ok(vec![ProviderRange::parse(&self.provider, &self.cidrs)?])
    }
}

#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Option<ProviderTable>>,
}

impl MemoryStore {
    pub fn with_table(table: ProviderTable) -> Self {
        Self {
            saved: Mutex::new(Some(table)),
        }
    }

    pub fn saved(&self) -> Option<ProviderTable> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderTableStore for MemoryStore {
    async fn load(&self) -> Result<ProviderTable, DomainError> {
        self.saved
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::ConfigurationError("no stored provider table".into()))
    }

    async fn save(&self, table: &ProviderTable) -> Result<(), DomainError> {
        *self.saved.lock().unwrap() = Some(table.clone());
        Ok(())
    }
}

pub fn aws_table() -> Arc<ProviderTable> {
    Arc::new(ProviderTable::from_mapping(vec![("AWS", vec!["3.0.0.0/8"])]).unwrap())
}
