//! Discovery records and their textual form.

use std::{fmt, str::FromStr};

use http::uri::Scheme;

/// Application tag carried by every Kerberos URI record target.
const APP_TAG: &str = "krb5srv";

/// Transport keyword designating a KKDCP (KDC over HTTPS) proxy.
const KKDCP: &str = "kkdcp";

/// DNS record family a raw discovery line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// URI records (`_kerberos.REALM`) carrying a `krb5srv:` target.
    Uri,
    /// Legacy SRV records (`_kerberos._udp.REALM`).
    Srv,
}

impl RecordKind {
    /// Every record family, in the order they are queried by default.
    pub const ALL: [RecordKind; 2] = [RecordKind::Uri, RecordKind::Srv];

    /// The record-type tag that starts a raw line of this family.
    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Uri => "URI",
            RecordKind::Srv => "SRV",
        }
    }

    /// Looks up a record family by its tag, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
    }
}

/// Kerberos services that can be located through DNS.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Service {
    /// Key Distribution Center.
    #[default]
    Kdc,
    /// Password changing service.
    Kpasswd,
    /// Administration service.
    Kadmin,
}

impl Service {
    /// Port to use when a direct record does not carry one.
    pub fn default_port(self) -> u16 {
        match self {
            Service::Kdc => 88,
            Service::Kpasswd => 464,
            Service::Kadmin => 749,
        }
    }

    /// Owner name of the URI records advertising this service for `realm`.
    pub fn uri_owner(self, realm: &str) -> String {
        format!("{}.{realm}", self.label())
    }

    /// Owner names of the SRV records advertising this service for `realm`.
    pub fn srv_owners(self, realm: &str) -> Vec<String> {
        let labels: &[(&str, Protocol)] = match self {
            Service::Kdc => &[
                ("_kerberos", Protocol::Udp),
                ("_kerberos", Protocol::Tcp),
                ("_kerberos-master", Protocol::Udp),
                ("_kerberos-master", Protocol::Tcp),
            ],
            Service::Kpasswd => &[("_kpasswd", Protocol::Udp), ("_kpasswd", Protocol::Tcp)],
            Service::Kadmin => &[("_kerberos-adm", Protocol::Tcp)],
        };
        labels
            .iter()
            .map(|(label, protocol)| format!("{label}._{protocol}.{realm}"))
            .collect()
    }

    fn label(self) -> &'static str {
        match self {
            Service::Kdc => "_kerberos",
            Service::Kpasswd => "_kpasswd",
            Service::Kadmin => "_kerberos-adm",
        }
    }

    fn from_uri_label(label: &str) -> Option<Self> {
        match label {
            "_kerberos" | "_krb5kdc" => Some(Service::Kdc),
            "_kpasswd" => Some(Service::Kpasswd),
            "_kerberos-adm" => Some(Service::Kadmin),
            _ => None,
        }
    }

    /// Returns the service and whether the label marks master records.
    fn from_srv_label(label: &str) -> Option<(Self, bool)> {
        match label {
            "_kerberos" => Some((Service::Kdc, false)),
            "_kerberos-master" => Some((Service::Kdc, true)),
            "_kpasswd" => Some((Service::Kpasswd, false)),
            "_kerberos-adm" => Some((Service::Kadmin, false)),
            _ => None,
        }
    }
}

/// Transport protocol of a directly contacted server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Protocol {
    /// UDP
    Udp,
    /// TCP
    Tcp,
}

impl Protocol {
    fn from_label(label: &str) -> Option<Self> {
        [Protocol::Udp, Protocol::Tcp]
            .into_iter()
            .find(|protocol| protocol.to_string().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Udp => "udp",
            Protocol::Tcp => "tcp",
        })
    }
}

/// How a discovered server is reached.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transport {
    /// Direct contact over UDP or TCP.
    Direct {
        /// Host name or IP address.
        host: String,
        /// Port, if the record carried one.
        port: Option<u16>,
        /// Transport protocol.
        protocol: Protocol,
    },
    /// A KKDCP proxy reached over HTTPS.
    Proxy {
        /// The proxy URL, exactly as it appeared in the record.
        url: String,
    },
}

/// Formats the transport part of a `krb5srv:` target (everything after the
/// master flag).
impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Proxy { url } => write!(f, "{KKDCP}:{url}"),
            Transport::Direct {
                host,
                port,
                protocol,
            } => {
                write!(f, "{protocol}:")?;
                fmt_host(f, host)?;
                match port {
                    Some(port) => write!(f, ":{port}"),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Writes a host, bracketing IPv6 literals.
pub(crate) fn fmt_host(f: &mut fmt::Formatter<'_>, host: &str) -> fmt::Result {
    if host.contains(':') {
        write!(f, "[{host}]")
    } else {
        f.write_str(host)
    }
}

/// Errors produced while parsing a single raw record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line is not a URI or SRV record.
    #[error("record type `{0}` is not used for KDC discovery")]
    UnknownRecordType(String),
    /// The owner name advertises a service other than Kerberos.
    #[error("owner `{0}` does not advertise a Kerberos service")]
    UnrelatedService(String),
    /// The URI target belongs to another application.
    #[error("URI target `{0}` is not a krb5srv target")]
    UnrelatedApplication(String),
    /// The record designates a transport this crate does not know.
    #[error("unknown transport `{0}`")]
    UnknownTransport(String),
    /// The SRV target is `.`, meaning the service is not available.
    #[error("SRV target `.` marks the service as unavailable")]
    Unavailable,
    /// A required field is absent.
    #[error("missing {0}")]
    MissingField(&'static str),
    /// The record has more fields than its grammar allows.
    #[error("unexpected trailing field `{0}`")]
    TrailingField(String),
    /// A numeric field did not parse.
    #[error("invalid {field} `{value}`")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// The text found in its place.
        value: String,
    },
    /// The owner name has no realm after the service labels.
    #[error("owner `{0}` names no realm")]
    MissingRealm(String),
    /// A direct target has no host.
    #[error("no host in `{0}`")]
    EmptyHost(String),
    /// A KKDCP target is not a URL.
    #[error("invalid KKDCP proxy URL `{url}`")]
    InvalidProxyUrl {
        /// The offending target.
        url: String,
        /// Why it did not parse.
        #[source]
        source: url::ParseError,
    },
    /// A KKDCP target uses a scheme other than `https`.
    #[error("KKDCP proxy URL `{0}` does not use https")]
    ProxyScheme(String),
}

impl ParseError {
    /// Whether the record simply belongs to something else and should be
    /// skipped without being reported.
    pub fn is_unrelated(&self) -> bool {
        matches!(
            self,
            ParseError::UnknownRecordType(_)
                | ParseError::UnrelatedService(_)
                | ParseError::UnrelatedApplication(_)
                | ParseError::UnknownTransport(_)
                | ParseError::Unavailable
        )
    }
}

/// A parsed discovery record.
///
/// Records are built from raw answer lines of the form
///
/// ```text
/// URI _kerberos.EXAMPLE.COM krb5srv:m:kkdcp:https://proxy.example.com/KdcProxy 10 1
/// URI _kerberos.EXAMPLE.COM krb5srv::tcp:kdc1.example.com:88 20 1
/// SRV _kerberos._udp.EXAMPLE.COM kdc2.example.com 88 30 1
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryRecord {
    /// Record family the line came from.
    pub kind: RecordKind,
    /// Realm the record advertises service for.
    pub realm: String,
    /// Service named by the record's owner.
    pub service: Service,
    /// Lower values are preferred.
    pub priority: u16,
    /// Relative selection weight among records of equal priority.
    pub weight: u16,
    /// Whether the record designates a master KDC.
    pub master: bool,
    /// How to reach the server.
    pub transport: Transport,
}

impl DiscoveryRecord {
    /// Parses one raw record line.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let mut fields = raw.split_whitespace();
        let tag = fields.next().ok_or(ParseError::MissingField("record type"))?;
        let record = match RecordKind::from_tag(tag) {
            Some(RecordKind::Uri) => parse_uri(&mut fields)?,
            Some(RecordKind::Srv) => parse_srv(&mut fields)?,
            None => return Err(ParseError::UnknownRecordType(tag.to_string())),
        };
        match fields.next() {
            Some(extra) => Err(ParseError::TrailingField(extra.to_string())),
            None => Ok(record),
        }
    }

    /// Renders the `krb5srv:` target a URI record for this record would carry.
    pub fn uri_target(&self) -> String {
        let flag = if self.master { "m" } else { "" };
        format!("{APP_TAG}:{flag}:{}", self.transport)
    }
}

impl FromStr for DiscoveryRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_uri<'a>(fields: &mut impl Iterator<Item = &'a str>) -> Result<DiscoveryRecord, ParseError> {
    let owner = trim_root(fields.next().ok_or(ParseError::MissingField("owner"))?);
    let (label, realm) = owner.split_once('.').unwrap_or((owner, ""));
    let service = Service::from_uri_label(label)
        .ok_or_else(|| ParseError::UnrelatedService(owner.to_string()))?;
    if realm.is_empty() {
        return Err(ParseError::MissingRealm(owner.to_string()));
    }

    let target = fields.next().ok_or(ParseError::MissingField("target"))?;
    let (master, transport) = parse_uri_target(target)?;
    let (priority, weight) = parse_priority_weight(fields)?;

    Ok(DiscoveryRecord {
        kind: RecordKind::Uri,
        realm: realm.to_string(),
        service,
        priority,
        weight,
        master,
        transport,
    })
}

fn parse_srv<'a>(fields: &mut impl Iterator<Item = &'a str>) -> Result<DiscoveryRecord, ParseError> {
    let owner = trim_root(fields.next().ok_or(ParseError::MissingField("owner"))?);
    let mut labels = owner.splitn(3, '.');
    let label = labels.next().unwrap_or_default();
    let (service, master) = Service::from_srv_label(label)
        .ok_or_else(|| ParseError::UnrelatedService(owner.to_string()))?;
    let protocol = labels.next().unwrap_or_default();
    let protocol = protocol
        .strip_prefix('_')
        .and_then(Protocol::from_label)
        .ok_or_else(|| ParseError::UnknownTransport(protocol.to_string()))?;
    let realm = labels.next().unwrap_or_default();
    if realm.is_empty() {
        return Err(ParseError::MissingRealm(owner.to_string()));
    }

    let target = fields.next().ok_or(ParseError::MissingField("target"))?;
    let port = parse_number("port", fields.next())?;
    let (priority, weight) = parse_priority_weight(fields)?;

    let host = trim_root(target);
    if host.is_empty() || host == "." {
        return Err(ParseError::Unavailable);
    }

    Ok(DiscoveryRecord {
        kind: RecordKind::Srv,
        realm: realm.to_string(),
        service,
        priority,
        weight,
        master,
        transport: Transport::Direct {
            host: host.to_string(),
            port: Some(port),
            protocol,
        },
    })
}

/// Splits a `krb5srv:<flag>:<transport>` target into its master flag and
/// transport.
fn parse_uri_target(target: &str) -> Result<(bool, Transport), ParseError> {
    let rest = match target.split_once(':') {
        Some((APP_TAG, rest)) => rest,
        _ => return Err(ParseError::UnrelatedApplication(target.to_string())),
    };

    // A target may leave out the flag segment altogether, in which case the
    // first segment is already the transport.
    let (flag, transport) = match rest.split_once(':') {
        Some((segment, _)) if is_transport_keyword(segment) => ("", rest),
        Some((flag, transport)) => (flag, transport),
        None if is_transport_keyword(rest) => ("", rest),
        None => return Err(ParseError::MissingField("transport")),
    };

    let master = flag.contains(['m', 'M']);
    Ok((master, parse_transport(transport)?))
}

fn is_transport_keyword(segment: &str) -> bool {
    is_kkdcp(segment) || Protocol::from_label(segment).is_some()
}

fn is_kkdcp(segment: &str) -> bool {
    segment.eq_ignore_ascii_case(KKDCP)
}

fn parse_transport(transport: &str) -> Result<Transport, ParseError> {
    if transport.starts_with('[') {
        return parse_direct(transport, Protocol::Udp);
    }
    match transport.split_once(':') {
        Some((keyword, url)) if is_kkdcp(keyword) => parse_proxy(url),
        Some(("", host_port)) => parse_direct(host_port, Protocol::Udp),
        Some((keyword, host_port)) => match Protocol::from_label(keyword) {
            Some(protocol) => parse_direct(host_port, protocol),
            // `host:port` without a transport keyword
            None if is_port(host_port) => parse_direct(transport, Protocol::Udp),
            None => Err(ParseError::UnknownTransport(keyword.to_string())),
        },
        None if is_kkdcp(transport) => Err(ParseError::MissingField("proxy URL")),
        None if transport.is_empty() || is_transport_keyword(transport) => {
            Err(ParseError::EmptyHost(transport.to_string()))
        }
        None => parse_direct(transport, Protocol::Udp),
    }
}

fn is_port(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_proxy(url: &str) -> Result<Transport, ParseError> {
    let parsed = url::Url::parse(url).map_err(|source| ParseError::InvalidProxyUrl {
        url: url.to_string(),
        source,
    })?;
    if parsed.scheme() != Scheme::HTTPS.as_str() {
        return Err(ParseError::ProxyScheme(url.to_string()));
    }
    Ok(Transport::Proxy {
        url: url.to_string(),
    })
}

/// Parses `host`, `host:port`, `[v6]` or `[v6]:port`.
fn parse_direct(host_port: &str, protocol: Protocol) -> Result<Transport, ParseError> {
    let (host, port) = match host_port.strip_prefix('[') {
        Some(bracketed) => {
            let (host, after) = bracketed
                .split_once(']')
                .ok_or_else(|| ParseError::EmptyHost(host_port.to_string()))?;
            match after {
                "" => (host, None),
                _ => match after.strip_prefix(':') {
                    Some(port) => (host, Some(port)),
                    None => return Err(ParseError::TrailingField(after.to_string())),
                },
            }
        }
        None => match host_port.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        },
    };

    if host.is_empty() {
        return Err(ParseError::EmptyHost(host_port.to_string()));
    }
    let port = port.map(|p| parse_number("port", Some(p))).transpose()?;

    Ok(Transport::Direct {
        host: host.to_string(),
        port,
        protocol,
    })
}

fn parse_priority_weight<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
) -> Result<(u16, u16), ParseError> {
    let priority = parse_number("priority", fields.next())?;
    let weight = parse_number("weight", fields.next())?;
    Ok((priority, weight))
}

fn parse_number(field: &'static str, value: Option<&str>) -> Result<u16, ParseError> {
    let value = value.ok_or(ParseError::MissingField(field))?;
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Strips a single trailing root label dot.
fn trim_root(name: &str) -> &str {
    match name {
        "." => name,
        _ => name.strip_suffix('.').unwrap_or(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(url: &str) -> Transport {
        Transport::Proxy {
            url: url.to_string(),
        }
    }

    #[test]
    fn master_proxy_record() {
        let record: DiscoveryRecord = "URI _krb5kdc.TEST krb5srv:m:kkdcp:https://kdc/path 10 1"
            .parse()
            .unwrap();
        assert_eq!(
            record,
            DiscoveryRecord {
                kind: RecordKind::Uri,
                realm: "TEST".into(),
                service: Service::Kdc,
                priority: 10,
                weight: 1,
                master: true,
                transport: proxy("https://kdc/path"),
            }
        );
    }

    #[test]
    fn non_master_proxy_record() {
        let record = DiscoveryRecord::parse("URI _krb5kdc.TEST krb5srv::kkdcp:https://kdc 20 1\n")
            .unwrap();
        assert!(!record.master);
        assert_eq!(record.priority, 20);
        assert_eq!(record.weight, 1);
        assert_eq!(record.transport, proxy("https://kdc"));
    }

    #[test]
    fn absent_flag_segment_is_not_master() {
        let record =
            DiscoveryRecord::parse("URI _kerberos.TEST krb5srv:kkdcp:https://kdc 20 1").unwrap();
        assert!(!record.master);
        assert_eq!(record.transport, proxy("https://kdc"));

        let record =
            DiscoveryRecord::parse("URI _kerberos.TEST krb5srv:tcp:kdc.test:88 1 1").unwrap();
        assert!(!record.master);
        assert_eq!(
            record.transport,
            Transport::Direct {
                host: "kdc.test".into(),
                port: Some(88),
                protocol: Protocol::Tcp,
            }
        );
    }

    #[test]
    fn proxy_url_round_trips() {
        for url in [
            "https://kdc/path",
            "https://kdc",
            "https://proxy.example.com:8443/KdcProxy?realm=TEST",
        ] {
            let line = format!("URI _kerberos.TEST krb5srv:m:kkdcp:{url} 0 0");
            let record = DiscoveryRecord::parse(&line).unwrap();
            assert_eq!(record.uri_target(), format!("krb5srv:m:kkdcp:{url}"));
            match record.transport {
                Transport::Proxy { url: parsed } => assert_eq!(parsed, url),
                other => panic!("expected a proxy, got {other:?}"),
            }
        }
    }

    #[test]
    fn direct_uri_targets() {
        let cases = [
            ("krb5srv::udp:kdc.test:88", "kdc.test", Some(88), Protocol::Udp),
            ("krb5srv:m:tcp:kdc.test", "kdc.test", None, Protocol::Tcp),
            ("krb5srv:::kdc.test:750", "kdc.test", Some(750), Protocol::Udp),
            ("krb5srv::kdc.test:88", "kdc.test", Some(88), Protocol::Udp),
            ("krb5srv::tcp:[2001:db8::1]:88", "2001:db8::1", Some(88), Protocol::Tcp),
            ("krb5srv::[::1]", "::1", None, Protocol::Udp),
        ];
        for (target, host, port, protocol) in cases {
            let record = DiscoveryRecord::parse(&format!("URI _kerberos.TEST {target} 1 1"))
                .unwrap_or_else(|e| panic!("{target}: {e}"));
            assert_eq!(
                record.transport,
                Transport::Direct {
                    host: host.into(),
                    port,
                    protocol,
                },
                "{target}"
            );
        }
    }

    #[test]
    fn keywords_and_flag_ignore_case() {
        let record =
            DiscoveryRecord::parse("URI _kerberos.TEST krb5srv:M:KKDCP:https://kdc 1 1").unwrap();
        assert!(record.master);
        assert_eq!(record.transport, proxy("https://kdc"));
        assert_eq!(record.uri_target(), "krb5srv:m:kkdcp:https://kdc");

        let record =
            DiscoveryRecord::parse("URI _kerberos.TEST krb5srv::TCP:kdc.test:88 1 1").unwrap();
        assert!(!record.master);
        assert_eq!(
            record.transport,
            Transport::Direct {
                host: "kdc.test".into(),
                port: Some(88),
                protocol: Protocol::Tcp,
            }
        );

        let record = DiscoveryRecord::parse("URI _kerberos.TEST krb5srv:Udp:kdc.test 1 1").unwrap();
        assert!(!record.master);
        assert!(matches!(
            record.transport,
            Transport::Direct {
                protocol: Protocol::Udp,
                ..
            }
        ));
    }

    #[test]
    fn direct_transport_display() {
        let transport = Transport::Direct {
            host: "2001:db8::1".into(),
            port: Some(88),
            protocol: Protocol::Tcp,
        };
        assert_eq!(transport.to_string(), "tcp:[2001:db8::1]:88");
    }

    #[test]
    fn legacy_srv_records() {
        let record = DiscoveryRecord::parse("SRV _kerberos._tcp.EXAMPLE.COM. kdc1.example.com. 88 0 5")
            .unwrap();
        assert_eq!(
            record,
            DiscoveryRecord {
                kind: RecordKind::Srv,
                realm: "EXAMPLE.COM".into(),
                service: Service::Kdc,
                priority: 0,
                weight: 5,
                master: false,
                transport: Transport::Direct {
                    host: "kdc1.example.com".into(),
                    port: Some(88),
                    protocol: Protocol::Tcp,
                },
            }
        );

        let record =
            DiscoveryRecord::parse("srv _kerberos-master._udp.TEST kdc 88 1 1").unwrap();
        assert!(record.master);
        assert_eq!(record.kind, RecordKind::Srv);
    }

    #[test]
    fn other_services() {
        let record = DiscoveryRecord::parse("SRV _kpasswd._udp.TEST kdc 464 1 1").unwrap();
        assert_eq!(record.service, Service::Kpasswd);
        let record =
            DiscoveryRecord::parse("URI _kerberos-adm.TEST krb5srv::tcp:kdc 1 1").unwrap();
        assert_eq!(record.service, Service::Kadmin);
    }

    #[test]
    fn unrelated_records() {
        for line in [
            "TXT _kerberos.TEST EXAMPLE.COM",
            "URI _ldap.TEST ldap://ldap.test 1 1",
            "URI _kerberos.TEST http://www.test 1 1",
            "URI _kerberos.TEST krb5srv::quic:kdc.test 1 1",
            "SRV _kerberos._sctp.TEST kdc 88 1 1",
            "SRV _kerberos._udp.TEST . 0 0 0",
            "SRV _http._tcp.TEST www 80 1 1",
        ] {
            let err = DiscoveryRecord::parse(line).unwrap_err();
            assert!(err.is_unrelated(), "{line}: {err:?}");
        }
    }

    #[test]
    fn malformed_records() {
        let cases = [
            ("", ParseError::MissingField("record type")),
            ("URI", ParseError::MissingField("owner")),
            ("URI _kerberos.TEST", ParseError::MissingField("target")),
            (
                "URI _kerberos.TEST krb5srv:m:kkdcp:https://kdc",
                ParseError::MissingField("priority"),
            ),
            (
                "URI _kerberos.TEST krb5srv:m:kkdcp:https://kdc 10",
                ParseError::MissingField("weight"),
            ),
            (
                "URI _kerberos.TEST krb5srv:m:kkdcp:https://kdc ten 1",
                ParseError::InvalidNumber {
                    field: "priority",
                    value: "ten".into(),
                },
            ),
            (
                "URI _kerberos.TEST krb5srv:m:kkdcp:https://kdc 10 -1",
                ParseError::InvalidNumber {
                    field: "weight",
                    value: "-1".into(),
                },
            ),
            (
                "URI _kerberos.TEST krb5srv:m:kkdcp:https://kdc 10 1 extra",
                ParseError::TrailingField("extra".into()),
            ),
            (
                "URI _kerberos krb5srv:m:kkdcp:https://kdc 10 1",
                ParseError::MissingRealm("_kerberos".into()),
            ),
            (
                "URI _kerberos.TEST krb5srv:m:kkdcp:http://kdc 10 1",
                ParseError::ProxyScheme("http://kdc".into()),
            ),
            (
                "URI _kerberos.TEST krb5srv:m:kkdcp 10 1",
                ParseError::MissingField("proxy URL"),
            ),
            (
                "URI _kerberos.TEST krb5srv:m:udp: 10 1",
                ParseError::EmptyHost("".into()),
            ),
            (
                "SRV _kerberos._udp.TEST kdc eighty-eight 1 1",
                ParseError::InvalidNumber {
                    field: "port",
                    value: "eighty-eight".into(),
                },
            ),
            (
                "SRV _kerberos._udp kdc 88 1 1",
                ParseError::MissingRealm("_kerberos._udp".into()),
            ),
        ];
        for (line, expected) in cases {
            let err = DiscoveryRecord::parse(line).unwrap_err();
            assert!(!err.is_unrelated(), "{line}: {err:?}");
            assert_eq!(err, expected, "{line}");
        }
    }

    #[test]
    fn proxy_url_without_scheme() {
        let err = DiscoveryRecord::parse("URI _kerberos.TEST krb5srv:m:kkdcp:kdc/path 10 1")
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidProxyUrl { .. }), "{err:?}");
        assert!(!err.is_unrelated());
    }

    #[test]
    fn realm_is_case_sensitive() {
        let record = DiscoveryRecord::parse("URI _kerberos.Test krb5srv::kdc 1 1").unwrap();
        assert_eq!(record.realm, "Test");
    }

    #[test]
    fn srv_owner_names() {
        assert_eq!(Service::Kdc.uri_owner("TEST"), "_kerberos.TEST");
        assert_eq!(
            Service::Kpasswd.srv_owners("TEST"),
            vec!["_kpasswd._udp.TEST", "_kpasswd._tcp.TEST"]
        );
        for owner in Service::Kdc.srv_owners("TEST") {
            let record = DiscoveryRecord::parse(&format!("SRV {owner} kdc 88 0 0")).unwrap();
            assert_eq!(record.realm, "TEST");
            assert_eq!(record.service, Service::Kdc);
        }
    }
}
