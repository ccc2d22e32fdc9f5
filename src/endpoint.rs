//! Resolved endpoints handed to callers.

use std::fmt;

use crate::record::{fmt_host, DiscoveryRecord, Protocol, Transport};

/// Where to send KDC requests.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    /// A server contacted directly.
    Direct {
        /// Host name or IP address.
        host: String,
        /// Port, defaulted from the service when the record had none.
        port: u16,
        /// Transport protocol.
        protocol: Protocol,
    },
    /// A KKDCP proxy URL.
    Proxy {
        /// The proxy URL.
        url: String,
    },
}

impl Address {
    /// Resolves a record's transport, filling in `default_port` for direct
    /// records without one.
    pub fn from_transport(transport: Transport, default_port: u16) -> Self {
        match transport {
            Transport::Direct {
                host,
                port,
                protocol,
            } => Address::Direct {
                host,
                port: port.unwrap_or(default_port),
                protocol,
            },
            Transport::Proxy { url } => Address::Proxy { url },
        }
    }

    /// Whether this address is a KKDCP proxy.
    pub fn is_proxy(&self) -> bool {
        matches!(self, Address::Proxy { .. })
    }
}

impl From<&DiscoveryRecord> for Address {
    fn from(record: &DiscoveryRecord) -> Self {
        Address::from_transport(record.transport.clone(), record.service.default_port())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Direct {
                host,
                port,
                protocol,
            } => {
                write!(f, "{protocol}/")?;
                fmt_host(f, host)?;
                write!(f, ":{port}")
            }
            Address::Proxy { url } => f.write_str(url),
        }
    }
}

/// A discovered endpoint, in the order it should be tried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// Where to reach the server.
    pub address: Address,
    /// Whether a record advertised this endpoint as a master KDC.
    pub is_master: bool,
    /// Zero-based position of the endpoint in the sequence it was returned in.
    pub order_rank: usize,
}
