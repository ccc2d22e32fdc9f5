//! Ordering of discovered records into endpoints.

use std::collections::HashMap;

use rand::{seq::SliceRandom, Rng};

use crate::{
    endpoint::{Address, Endpoint},
    record::DiscoveryRecord,
};

/// Orders records per RFC 2782 and resolves them into endpoints.
///
/// Records are grouped by ascending priority. Within a priority tier, records
/// are drawn without replacement with probability proportional to their
/// weight; records of weight zero follow every weighted record of their tier
/// in random order. Duplicate addresses keep only their first position, but
/// an endpoint is marked master if any of its records was.
///
/// `rng` drives every random choice, so a seeded generator yields a
/// reproducible order.
pub fn select(records: Vec<DiscoveryRecord>, mut rng: impl Rng) -> Vec<Endpoint> {
    let ordered = order_records(records, &mut rng);

    let mut endpoints = Vec::<Endpoint>::with_capacity(ordered.len());
    let mut positions = HashMap::<Address, usize>::new();
    for record in ordered {
        let address = Address::from(&record);
        let key = dedup_key(&address);
        match positions.get(&key) {
            Some(&rank) => endpoints[rank].is_master |= record.master,
            None => {
                let rank = endpoints.len();
                positions.insert(key, rank);
                endpoints.push(Endpoint {
                    address,
                    is_master: record.master,
                    order_rank: rank,
                });
            }
        }
    }
    endpoints
}

/// Host names compare case-insensitively.
fn dedup_key(address: &Address) -> Address {
    match address {
        Address::Direct {
            host,
            port,
            protocol,
        } => Address::Direct {
            host: host.to_ascii_lowercase(),
            port: *port,
            protocol: *protocol,
        },
        Address::Proxy { .. } => address.clone(),
    }
}

/// Sorts records by priority and shuffles each tier by weight.
pub(crate) fn order_records(
    mut records: Vec<DiscoveryRecord>,
    mut rng: impl Rng,
) -> Vec<DiscoveryRecord> {
    records.sort_by_key(|record| record.priority);

    let mut ordered = Vec::with_capacity(records.len());
    let mut records = records.into_iter().peekable();
    while let Some(first) = records.next() {
        let priority = first.priority;
        let mut tier = vec![first];
        while let Some(record) = records.next_if(|record| record.priority == priority) {
            tier.push(record);
        }
        order_tier(tier, &mut rng, &mut ordered);
    }
    ordered
}

fn order_tier(tier: Vec<DiscoveryRecord>, mut rng: impl Rng, out: &mut Vec<DiscoveryRecord>) {
    let (mut weighted, mut unweighted): (Vec<_>, Vec<_>) =
        tier.into_iter().partition(|record| record.weight > 0);

    while !weighted.is_empty() {
        let total: u64 = weighted.iter().map(|record| u64::from(record.weight)).sum();
        let mut pick = rng.random_range(0..total);
        let mut idx = 0;
        while pick >= u64::from(weighted[idx].weight) {
            pick -= u64::from(weighted[idx].weight);
            idx += 1;
        }
        out.push(weighted.remove(idx));
    }

    unweighted.shuffle(&mut rng);
    out.extend(unweighted);
}
