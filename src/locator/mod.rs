//! Locating a realm's KDCs.

use crate::{
    endpoint::{Address, Endpoint},
    record::{DiscoveryRecord, RecordKind, Service},
    select::select,
    source::RecordSource,
};
use futures_util::future::join_all;
use rand::Rng;
use std::{fmt::Debug, future::Future};

/// Errors encountered by a [`Locator`].
#[derive(Debug, thiserror::Error)]
pub enum Error<Source: Debug> {
    /// The record source failed.
    #[error("KDC record source error")]
    Source(Source),
}

/// Errors encountered by [`Locator::execute`].
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError<Source: Debug, Attempt> {
    /// Discovery failed and no fallback endpoints were configured.
    #[error(transparent)]
    Discovery(#[from] Error<Source>),
    /// There was no endpoint to try.
    #[error("no KDC endpoints to use")]
    NoEndpoints,
    /// Every endpoint was tried and failed; holds the last failure.
    #[error("every KDC endpoint failed")]
    Exhausted(#[source] Attempt),
}

/// Which transports a [`Locator`] keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportFilter {
    /// Keep every endpoint.
    #[default]
    Any,
    /// Drop KKDCP proxies.
    DirectOnly,
    /// Keep only KKDCP proxies.
    ProxyOnly,
    /// Drop UDP endpoints.
    NoUdp,
}

impl TransportFilter {
    fn allows(self, address: &Address) -> bool {
        use crate::record::Protocol;

        match (self, address) {
            (TransportFilter::Any, _) => true,
            (TransportFilter::DirectOnly, address) => !address.is_proxy(),
            (TransportFilter::ProxyOnly, address) => address.is_proxy(),
            (TransportFilter::NoUdp, Address::Direct { protocol, .. }) => {
                *protocol != Protocol::Udp
            }
            (TransportFilter::NoUdp, Address::Proxy { .. }) => true,
        }
    }
}

/// Discovers the endpoints of a Kerberos service from DNS records.
///
/// # Usage
///
/// A [`Locator`] wraps a [`RecordSource`] and is configured with builder
/// methods:
///
/// ```ignore
/// let locator = Locator::new(HostsFile::from_env()?)
///     .service(Service::Kdc)
///     .master_only(true);
/// let endpoints = locator.discover("EXAMPLE.COM").await?;
/// ```
///
/// Each discovery queries the source afresh; nothing is cached between calls.
/// An empty result is not an error, leaving the caller free to consult static
/// configuration, or to set [`Locator::fallback`] endpoints.
#[derive(Debug)]
pub struct Locator<Source> {
    source: Source,
    service: Service,
    master_only: bool,
    transports: TransportFilter,
    record_kinds: Vec<RecordKind>,
    fallback: Vec<Address>,
}

impl<Source: Default> Default for Locator<Source> {
    fn default() -> Self {
        Self::new(Source::default())
    }
}

impl<Source> Locator<Source> {
    /// Creates a locator for KDCs advertised through `source`.
    pub fn new(source: Source) -> Self {
        Self {
            source,
            service: Service::Kdc,
            master_only: false,
            transports: TransportFilter::Any,
            record_kinds: RecordKind::ALL.to_vec(),
            fallback: Vec::new(),
        }
    }

    /// Sets the record source of the locator.
    pub fn source<S>(self, source: S) -> Locator<S> {
        Locator {
            source,
            service: self.service,
            master_only: self.master_only,
            transports: self.transports,
            record_kinds: self.record_kinds,
            fallback: self.fallback,
        }
    }

    /// Sets the service to locate.
    pub fn service(self, service: Service) -> Self {
        Self { service, ..self }
    }

    /// Keeps only endpoints advertised as master KDCs.
    pub fn master_only(self, master_only: bool) -> Self {
        Self {
            master_only,
            ..self
        }
    }

    /// Sets which transports to keep.
    pub fn transports(self, transports: TransportFilter) -> Self {
        Self { transports, ..self }
    }

    /// Sets which record families to query.
    pub fn record_kinds(self, record_kinds: &[RecordKind]) -> Self {
        Self {
            record_kinds: record_kinds.to_vec(),
            ..self
        }
    }

    /// Sets endpoints to use when discovery yields none.
    pub fn fallback(self, fallback: impl IntoIterator<Item = Address>) -> Self {
        Self {
            fallback: fallback.into_iter().collect(),
            ..self
        }
    }

    fn fallback_endpoints(&self) -> Vec<Endpoint> {
        self.fallback
            .iter()
            .enumerate()
            .map(|(order_rank, address)| Endpoint {
                address: address.clone(),
                is_master: false,
                order_rank,
            })
            .collect()
    }

    /// Whether a parsed record is for the service and realm being located and
    /// passes the locator's filters.
    fn wants(&self, record: &DiscoveryRecord, realm: &str) -> bool {
        if record.realm != realm {
            #[cfg(feature = "log")]
            tracing::trace!(record_realm = %record.realm, realm, "Skipping a record for another realm");
            return false;
        }
        if record.service != self.service {
            #[cfg(feature = "log")]
            tracing::trace!(service = ?record.service, "Skipping a record for another service");
            return false;
        }
        if self.master_only && !record.master {
            return false;
        }
        self.transports.allows(&Address::from(record))
    }
}

impl<Source: RecordSource> Locator<Source> {
    /// Queries the source for every configured record family, returning the
    /// merged answers.
    async fn get_raw_records(&self, realm: &str) -> Result<Vec<String>, Error<Source::Error>> {
        let queries = self.record_kinds.iter().map(|&kind| async move {
            let answer = self.source.get_records(kind, self.service, realm).await;
            #[cfg(feature = "log")]
            if let Err(e) = &answer {
                tracing::debug!(error = %e, ?kind, realm, "Record source failed");
            }
            answer
        });

        let mut lines = Vec::new();
        for answer in join_all(queries).await {
            lines.extend(answer.map_err(Error::Source)?);
        }
        Ok(lines)
    }

    /// Gets the parsed records for `realm` that this locator is interested in.
    pub async fn get_records(
        &self,
        realm: &str,
    ) -> Result<Vec<DiscoveryRecord>, Error<Source::Error>> {
        let lines = self.get_raw_records(realm).await?;

        let records = lines
            .iter()
            .filter_map(|line| match DiscoveryRecord::parse(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    if e.is_unrelated() {
                        #[cfg(feature = "log")]
                        tracing::trace!(%e, %line, "Skipping an unrelated record");
                    } else {
                        #[cfg(feature = "log")]
                        tracing::debug!(%e, %line, "Failed to parse a discovery record");
                    }
                    None
                }
            })
            .filter(|record| self.wants(record, realm))
            .collect();
        Ok(records)
    }

    /// Discovers the endpoints for `realm`, in the order they should be tried.
    pub async fn discover(&self, realm: &str) -> Result<Vec<Endpoint>, Error<Source::Error>> {
        let records = self.get_records(realm).await?;
        let endpoints = select(records, rand::rng());
        #[cfg(feature = "log")]
        self.log_endpoints(realm, &endpoints);
        Ok(endpoints)
    }

    /// Like [`Locator::discover`], drawing every random choice from `rng`.
    pub async fn discover_with_rng(
        &self,
        realm: &str,
        rng: impl Rng,
    ) -> Result<Vec<Endpoint>, Error<Source::Error>> {
        let records = self.get_records(realm).await?;
        let endpoints = select(records, rng);
        #[cfg(feature = "log")]
        self.log_endpoints(realm, &endpoints);
        Ok(endpoints)
    }

    /// Discovers the endpoints for `realm`, substituting the fallback
    /// endpoints when none are found or the source fails.
    pub async fn discover_or_fallback(
        &self,
        realm: &str,
    ) -> Result<Vec<Endpoint>, Error<Source::Error>> {
        match self.discover(realm).await {
            Ok(endpoints) if endpoints.is_empty() => Ok(self.fallback_endpoints()),
            Ok(endpoints) => Ok(endpoints),
            Err(e) => {
                if self.fallback.is_empty() {
                    return Err(e);
                }
                #[cfg(feature = "log")]
                tracing::debug!(%e, realm, "Discovery failed, using fallback endpoints");
                Ok(self.fallback_endpoints())
            }
        }
    }

    /// Performs an operation on the endpoints of `realm` in order, producing
    /// the first successful result or the last error encountered if every
    /// execution of the operation was unsuccessful.
    pub async fn execute<T, E, Fut>(
        &self,
        realm: &str,
        func: impl FnMut(Endpoint) -> Fut,
    ) -> Result<T, ExecuteError<Source::Error, E>>
    where
        E: std::error::Error + 'static,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut func = func;
        let endpoints = self.discover_or_fallback(realm).await?;

        let mut last_error = None;
        for endpoint in endpoints {
            #[cfg(feature = "log")]
            let address = endpoint.address.clone();
            match func(endpoint).await {
                Ok(res) => {
                    #[cfg(feature = "log")]
                    tracing::info!(%address, "execution attempt succeeded");
                    return Ok(res);
                }
                Err(err) => {
                    #[cfg(feature = "log")]
                    tracing::info!(%address, error = %err, "execution attempt failed");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.map_or(ExecuteError::NoEndpoints, ExecuteError::Exhausted))
    }

    #[cfg(feature = "log")]
    fn log_endpoints(&self, realm: &str, endpoints: &[Endpoint]) {
        tracing::debug!(
            realm,
            service = ?self.service,
            endpoints = ?endpoints.iter().map(|e| e.address.to_string()).collect::<Vec<_>>(),
            "Discovered endpoints"
        );
    }
}
