use crate::ports::NameResolver;
use crate::services::{CloudClassifier, NameserverPool};
use cloudmap_domain::validators::validate_domain_name;
use cloudmap_domain::{
    BatchSummary, DomainError, DomainReport, NameLookupRequest, NameLookupResult,
    ResolutionFailure,
};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Use case: resolve a batch of domains through randomly picked nameservers
/// and classify every returned address.
///
/// One task per domain. Reports are emitted as lookups complete; `execute`
/// returns only once every dispatched lookup has finished.
pub struct ClassifyDomainsUseCase {
    resolver: Arc<dyn NameResolver>,
    classifier: Arc<CloudClassifier>,
    max_in_flight: usize,
    cancellation: CancellationToken,
}

impl ClassifyDomainsUseCase {
    pub fn new(resolver: Arc<dyn NameResolver>, classifier: Arc<CloudClassifier>) -> Self {
        Self {
            resolver,
            classifier,
            max_in_flight: 0,
            cancellation: CancellationToken::new(),
        }
    }

    /// Cap lookups in flight at once. `0` keeps one unbounded task per domain.
    pub fn with_concurrency_limit(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    #[instrument(skip_all, fields(domains = domains.len(), nameservers = nameservers.len()))]
    pub async fn execute<S: AsRef<str>>(
        &self,
        domains: Vec<String>,
        nameservers: &[S],
        reports: mpsc::Sender<DomainReport>,
    ) -> Result<BatchSummary, DomainError> {
        let pool = NameserverPool::new(nameservers)?;
        let start = Instant::now();

        let limiter =
            (self.max_in_flight > 0).then(|| Arc::new(Semaphore::new(self.max_in_flight)));

        info!(
            domains = domains.len(),
            nameservers = pool.len(),
            max_in_flight = self.max_in_flight,
            "Dispatching lookups"
        );

        let mut in_flight = FuturesUnordered::new();
        for domain in domains {
            let request = NameLookupRequest::new(domain.trim(), pool.pick());
            let task = LookupTask {
                request: request.clone(),
                resolver: Arc::clone(&self.resolver),
                classifier: Arc::clone(&self.classifier),
                limiter: limiter.clone(),
                cancellation: self.cancellation.clone(),
            };
            let handle = tokio::spawn(task.run());
            in_flight.push(async move { (request, handle.await) });
        }

        let mut summary = BatchSummary::default();
        let mut sink_open = true;

        while let Some((request, joined)) = in_flight.next().await {
            let report = match joined {
                Ok(report) => report,
                Err(e) => {
                    warn!(domain = %request.domain, error = %e, "Lookup task panicked");
                    DomainReport {
                        lookup: NameLookupResult::failed(
                            &request,
                            ResolutionFailure::Unreachable {
                                reason: format!("lookup task failed: {e}"),
                            },
                            0,
                        ),
                        classifications: Vec::new(),
                    }
                }
            };

            summary.record(&report);

            if sink_open && reports.send(report).await.is_err() {
                warn!("Report receiver dropped, continuing without emitting");
                sink_open = false;
            }
        }

        summary.elapsed_ms = start.elapsed().as_millis() as u64;

        info!(
            domains = summary.domains,
            resolved = summary.resolved,
            failed = summary.failed,
            addresses = summary.addresses,
            cloud = summary.cloud_addresses,
            elapsed_ms = summary.elapsed_ms,
            "Batch completed"
        );

        Ok(summary)
    }

    /// Run a batch and gather every report in completion order.
    pub async fn collect<S: AsRef<str>>(
        &self,
        domains: Vec<String>,
        nameservers: &[S],
    ) -> Result<(Vec<DomainReport>, BatchSummary), DomainError> {
        let (tx, mut rx) = mpsc::channel(domains.len().max(1));
        let summary = self.execute(domains, nameservers, tx).await?;

        let mut reports = Vec::with_capacity(summary.domains);
        while let Some(report) = rx.recv().await {
            reports.push(report);
        }

        Ok((reports, summary))
    }
}

struct LookupTask {
    request: NameLookupRequest,
    resolver: Arc<dyn NameResolver>,
    classifier: Arc<CloudClassifier>,
    limiter: Option<Arc<Semaphore>>,
    cancellation: CancellationToken,
}

impl LookupTask {
    async fn run(self) -> DomainReport {
        let start = Instant::now();

        if let Err(reason) = validate_domain_name(&self.request.domain) {
            debug!(domain = %self.request.domain, %reason, "Skipping invalid domain");
            return self.failed(ResolutionFailure::InvalidDomain { reason }, start);
        }

        let _permit = match self.acquire_slot().await {
            Ok(permit) => permit,
            Err(failure) => return self.failed(failure, start),
        };

        debug!(
            domain = %self.request.domain,
            nameserver = %self.request.nameserver,
            "Resolving"
        );

        let lookup = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                NameLookupResult::failed(
                    &self.request,
                    ResolutionFailure::Cancelled,
                    start.elapsed().as_millis() as u64,
                )
            }
            result = self.resolver.resolve(&self.request) => result,
        };

        match &lookup.error {
            None => debug!(
                domain = %lookup.domain,
                addresses = lookup.addresses.len(),
                elapsed_ms = lookup.elapsed_ms,
                "Resolved"
            ),
            Some(failure) => debug!(
                domain = %lookup.domain,
                nameserver = %lookup.nameserver,
                failure = %failure,
                "Lookup failed"
            ),
        }

        let classifications = self.classifier.classify_all(&lookup.addresses);
        DomainReport {
            lookup,
            classifications,
        }
    }

    async fn acquire_slot(&self) -> Result<Option<OwnedSemaphorePermit>, ResolutionFailure> {
        let Some(limiter) = &self.limiter else {
            return Ok(None);
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(ResolutionFailure::Cancelled),
            permit = Arc::clone(limiter).acquire_owned() => permit
                .map(Some)
                .map_err(|_| ResolutionFailure::Cancelled),
        }
    }

    fn failed(&self, failure: ResolutionFailure, start: Instant) -> DomainReport {
        DomainReport {
            lookup: NameLookupResult::failed(
                &self.request,
                failure,
                start.elapsed().as_millis() as u64,
            ),
            classifications: Vec::new(),
        }
    }
}
