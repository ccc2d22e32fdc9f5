#![deny(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

/*!
Locate Kerberos KDCs, including KKDCP proxies, from DNS records.

# Introduction

A Kerberos realm advertises its KDCs in DNS in two ways. URI records, as
described in [RFC 7553](https://tools.ietf.org/html/rfc7553), carry a
`krb5srv:` target naming a master flag, a transport and a server:

```text
_kerberos.EXAMPLE.COM. 60 IN URI 10 1 "krb5srv:m:kkdcp:https://proxy.example.com/KdcProxy"
_kerberos.EXAMPLE.COM. 60 IN URI 20 1 "krb5srv::tcp:kdc1.example.com:88"
```

Legacy SRV records, as defined in [RFC 2782](https://tools.ietf.org/html/rfc2782),
carry a host and port per protocol:

```text
_kerberos._udp.EXAMPLE.COM. 60 IN SRV 30 1 88 kdc2.example.com.
```

A client for this realm would first try the KKDCP proxy (the record with the
lowest priority), then `kdc1.example.com` over TCP, then `kdc2.example.com`
over UDP. Records sharing a priority are tried in a random order weighted by
their weight.

`kdc-locate` turns raw DNS answers into that ordered, deduplicated list of
[`Endpoint`]s. Answers come from a [`RecordSource`] as lines of text such as

```text
URI _kerberos.EXAMPLE.COM krb5srv:m:kkdcp:https://proxy.example.com/KdcProxy 10 1
SRV _kerberos._udp.EXAMPLE.COM kdc2.example.com 88 30 1
```

[`Locator::discover`] queries the source for both record families, parses
each line into a [`DiscoveryRecord`], keeps the records for the requested
realm and service, and orders them with [`select`].

# Record Sources

The provided sources are:

- [`Fixture`](source::Fixture), a fixed list of lines
- [`HostsFile`](source::HostsFile), a resolv_wrapper style hosts file
- [`from_fn`](source::from_fn), any synchronous closure
- `hickory` (via [`hickory_resolver::Resolver`]), enabled by the `hickory`
  feature

[`RecordSource`]: source::RecordSource
*/

mod endpoint;
pub use endpoint::{Address, Endpoint};

mod locator;
pub use locator::{Error, ExecuteError, Locator, TransportFilter};

mod record;
pub use record::{DiscoveryRecord, ParseError, Protocol, RecordKind, Service, Transport};

mod select;
pub use select::select;

pub mod source;
