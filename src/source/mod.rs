//! Sources of raw discovery records.

use crate::record::{RecordKind, Service};
use async_trait::async_trait;
use std::{convert::Infallible, fmt::Debug};

#[cfg(feature = "hickory")]
pub mod hickory;

mod hosts;
pub use hosts::{HostsFile, HostsFileError, RESOLV_WRAPPER_HOSTS};

/// Represents the ability to answer discovery queries with raw record lines.
///
/// Each returned line is one record in the textual form understood by
/// [`DiscoveryRecord::parse`](crate::DiscoveryRecord::parse). A query with no
/// answer should produce an empty list; an `Err` is reserved for failures of
/// the source itself.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Errors encountered while querying the source.
    type Error: std::error::Error + 'static;

    /// Gets the raw records of family `kind` advertising `service` for `realm`.
    async fn get_records(
        &self,
        kind: RecordKind,
        service: Service,
        realm: &str,
    ) -> Result<Vec<String>, Self::Error>;
}

/// A fixed set of record lines, as found in a fixture file.
///
/// Queries return the lines whose record-type tag matches the queried family,
/// leaving owner and realm filtering to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fixture {
    lines: Vec<String>,
}

impl Fixture {
    /// Creates a fixture from record lines.
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses fixture file contents, skipping blank lines and `#` comments.
    pub fn parse(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// The fixture's lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn answer(&self, kind: RecordKind) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| {
                line.split_whitespace()
                    .next()
                    .and_then(RecordKind::from_tag)
                    == Some(kind)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecordSource for Fixture {
    type Error = Infallible;

    async fn get_records(
        &self,
        kind: RecordKind,
        _service: Service,
        _realm: &str,
    ) -> Result<Vec<String>, Self::Error> {
        Ok(self.answer(kind))
    }
}

/// A [`RecordSource`] backed by a synchronous closure.
///
/// Created by [`from_fn`].
#[derive(Clone)]
pub struct FnSource<F> {
    func: F,
}

impl<F> Debug for FnSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

/// Creates a [`RecordSource`] that answers every query by calling `func` with
/// the queried record family and realm.
pub fn from_fn<F, E>(func: F) -> FnSource<F>
where
    F: Fn(RecordKind, &str) -> Result<Vec<String>, E> + Send + Sync,
    E: std::error::Error + 'static,
{
    FnSource { func }
}

#[async_trait]
impl<F, E> RecordSource for FnSource<F>
where
    F: Fn(RecordKind, &str) -> Result<Vec<String>, E> + Send + Sync,
    E: std::error::Error + 'static,
{
    type Error = E;

    async fn get_records(
        &self,
        kind: RecordKind,
        _service: Service,
        realm: &str,
    ) -> Result<Vec<String>, Self::Error> {
        (self.func)(kind, realm)
    }
}
