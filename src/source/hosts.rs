//! Record source reading a resolv_wrapper style hosts file.

use super::{Fixture, RecordSource};
use crate::record::{RecordKind, Service};
use async_trait::async_trait;
use std::{
    env, io,
    path::{Path, PathBuf},
};

/// Environment variable naming the hosts file used by resolv_wrapper.
pub const RESOLV_WRAPPER_HOSTS: &str = "RESOLV_WRAPPER_HOSTS";

/// Errors encountered by a [`HostsFile`].
#[derive(Debug, thiserror::Error)]
pub enum HostsFileError {
    /// The environment variable naming the file is unset or not unicode.
    #[error("RESOLV_WRAPPER_HOSTS is not usable")]
    Env(#[source] env::VarError),
    /// The file could not be read.
    #[error("reading hosts file {}", path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A file of record lines such as
///
/// ```text
/// URI _kerberos.TEST krb5srv:m:kkdcp:https://kdc/path 10 1
/// SRV _kerberos._udp.TEST kdc.test 88 0 1
/// ```
///
/// The file is read again on every query, so it may be rewritten between
/// discoveries.
#[derive(Clone, Debug)]
pub struct HostsFile {
    path: PathBuf,
}

impl HostsFile {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a source reading the file named by `RESOLV_WRAPPER_HOSTS`.
    pub fn from_env() -> Result<Self, HostsFileError> {
        env::var(RESOLV_WRAPPER_HOSTS)
            .map(Self::new)
            .map_err(HostsFileError::Env)
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file's current contents.
    pub fn load(&self) -> Result<Fixture, HostsFileError> {
        std::fs::read_to_string(&self.path)
            .map(|contents| Fixture::parse(&contents))
            .map_err(|source| HostsFileError::Read {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl RecordSource for HostsFile {
    type Error = HostsFileError;

    async fn get_records(
        &self,
        kind: RecordKind,
        _service: Service,
        _realm: &str,
    ) -> Result<Vec<String>, Self::Error> {
        Ok(self.load()?.answer(kind))
    }
}
