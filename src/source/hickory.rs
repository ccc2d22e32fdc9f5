//! Record source backed by [`hickory_resolver`].

use super::RecordSource;
use crate::record::{RecordKind, Service};
use async_trait::async_trait;
use hickory_resolver::{
    name_server::ConnectionProvider,
    proto::rr::{rdata::SRV, RData, RecordType},
    ResolveError, Resolver,
};

/// IANA record type number of URI records (RFC 7553).
const URI_RECORD_TYPE: u16 = 256;

#[async_trait]
impl<P> RecordSource for Resolver<P>
where
    P: ConnectionProvider,
{
    type Error = ResolveError;

    async fn get_records(
        &self,
        kind: RecordKind,
        service: Service,
        realm: &str,
    ) -> Result<Vec<String>, Self::Error> {
        match kind {
            RecordKind::Uri => {
                let owner = service.uri_owner(realm);
                let lookup =
                    match self.lookup(owner.as_str(), RecordType::from(URI_RECORD_TYPE)).await {
                        Ok(lookup) => lookup,
                        Err(e) if e.is_no_records_found() => return Ok(Vec::new()),
                        Err(e) => return Err(e),
                    };
                Ok(lookup
                    .iter()
                    .filter_map(|rdata| match rdata {
                        RData::Unknown { rdata, .. } => uri_line(&owner, rdata.anything()),
                        _ => None,
                    })
                    .collect())
            }
            RecordKind::Srv => {
                let mut lines = Vec::new();
                for owner in service.srv_owners(realm) {
                    match self.srv_lookup(owner.as_str()).await {
                        Ok(lookup) => lines.extend(lookup.iter().map(|srv| srv_line(&owner, srv))),
                        Err(e) if e.is_no_records_found() => {}
                        Err(e) => return Err(e),
                    }
                }
                Ok(lines)
            }
        }
    }
}

/// Renders URI RDATA (priority, weight, target) as a record line.
fn uri_line(owner: &str, rdata: &[u8]) -> Option<String> {
    let [p0, p1, w0, w1, target @ ..] = rdata else {
        return None;
    };
    let priority = u16::from_be_bytes([*p0, *p1]);
    let weight = u16::from_be_bytes([*w0, *w1]);
    let target = std::str::from_utf8(target).ok()?;
    if target.is_empty() || target.contains(char::is_whitespace) {
        #[cfg(feature = "log")]
        tracing::trace!(owner, "Ignoring URI record with an unusable target");
        return None;
    }
    Some(format!("URI {owner} {target} {priority} {weight}"))
}

fn srv_line(owner: &str, srv: &SRV) -> String {
    format!(
        "SRV {owner} {} {} {} {}",
        srv.target(),
        srv.port(),
        srv.priority(),
        srv.weight()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiscoveryRecord;
    use hickory_resolver::Name;
    use std::str::FromStr;

    #[test]
    fn uri_rdata_to_line() {
        let mut rdata = vec![0, 10, 0, 1];
        rdata.extend_from_slice(b"krb5srv:m:kkdcp:https://kdc/path");
        let line = uri_line("_kerberos.TEST", &rdata).unwrap();
        assert_eq!(line, "URI _kerberos.TEST krb5srv:m:kkdcp:https://kdc/path 10 1");
        let record = DiscoveryRecord::parse(&line).unwrap();
        assert!(record.master);
    }

    #[test]
    fn short_uri_rdata() {
        assert_eq!(uri_line("_kerberos.TEST", &[0, 1, 0]), None);
        assert_eq!(uri_line("_kerberos.TEST", &[0, 1, 0, 1]), None);
        assert_eq!(uri_line("_kerberos.TEST", b"\0\x01\0\x01a b"), None);
    }

    #[test]
    fn srv_rdata_to_line() {
        let srv = SRV::new(0, 5, 88, Name::from_str("kdc.example.com.").unwrap());
        let line = srv_line("_kerberos._tcp.EXAMPLE.COM", &srv);
        assert_eq!(line, "SRV _kerberos._tcp.EXAMPLE.COM kdc.example.com. 88 0 5");
        let record = DiscoveryRecord::parse(&line).unwrap();
        assert_eq!(record.realm, "EXAMPLE.COM");
        assert_eq!(record.weight, 5);
    }

    #[tokio::test]
    #[ignore = "performs a live DNS query"]
    async fn live_lookup() -> Result<(), ResolveError> {
        let resolver = Resolver::builder_tokio()?.build();
        resolver
            .get_records(RecordKind::Srv, Service::Kdc, "ATHENA.MIT.EDU")
            .await?;
        Ok(())
    }
}
