use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::core::client::kube_resources::{Node, Pod};
use crate::domain::aggregation::model::{OwnerIndex, OwnerKey, OwnerRecord};
use crate::domain::aggregation::node_aggregator::{pod_resources, running_node_name};
use crate::domain::aggregation::owner_resolver::resolve_owner;

/// Ranked owner breakdown for a single node.
///
/// `pod_count` always equals the pods of the listed owners plus
/// `truncated_pod_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeOwners {
    pub node_name: String,
    pub pod_count: usize,
    pub owners: Vec<OwnerRecord>,
    pub truncated_owners: usize,
    pub truncated_pod_count: usize,
}

impl NodeOwners {
    /// Keep only the `top` highest-ranked owners, folding the dropped ones
    /// into the truncation counters. `pod_count` is unaffected.
    pub fn truncate(&mut self, top: usize) {
        if self.owners.len() <= top {
            return;
        }
        let dropped = self.owners.split_off(top);
        self.truncated_owners += dropped.len();
        self.truncated_pod_count += dropped.iter().map(|o| o.pod_count).sum::<usize>();
    }

    /// Pods of listed owners plus pods of truncated ones.
    pub fn accounted_pods(&self) -> usize {
        self.owners.iter().map(|o| o.pod_count).sum::<usize>() + self.truncated_pod_count
    }
}

#[derive(Default)]
struct NodeAccumulator {
    slots: HashMap<OwnerKey, usize>,
    owners: Vec<OwnerRecord>,
    pod_count: usize,
}

/// Group running pods by `(node, namespace, owner kind, owner name)`.
///
/// Each node's owners are ranked by descending pod count. The sort is
/// stable, so owners with equal counts keep the order in which their first
/// pod was seen. Nodes without running pods are still returned, with an
/// empty owner list.
pub fn aggregate_owners(nodes: &[Node], pods: &[Pod], index: &OwnerIndex) -> Vec<NodeOwners> {
    let mut by_node: HashMap<String, NodeAccumulator> = nodes
        .iter()
        .filter_map(|n| n.metadata.name.clone())
        .map(|name| (name, NodeAccumulator::default()))
        .collect();

    for pod in pods {
        let Some(acc) = running_node_name(pod).and_then(|node| by_node.get_mut(node)) else {
            continue;
        };

        let (owner_name, owner_type) = resolve_owner(pod, index);
        let key = OwnerKey {
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
            owner_type,
            owner_name,
        };

        let slot = match acc.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                acc.owners.push(OwnerRecord::new(key.clone()));
                acc.slots.insert(key, acc.owners.len() - 1);
                acc.owners.len() - 1
            }
        };

        let (requests, limits) = pod_resources(pod);
        let record = &mut acc.owners[slot];
        record.pod_count += 1;
        record.requests.add(requests);
        record.limits.add(limits);
        acc.pod_count += 1;
    }

    let result: Vec<NodeOwners> = by_node
        .into_iter()
        .map(|(node_name, mut acc)| {
            acc.owners.sort_by(|a, b| b.pod_count.cmp(&a.pod_count));
            NodeOwners {
                node_name,
                pod_count: acc.pod_count,
                owners: acc.owners,
                truncated_owners: 0,
                truncated_pod_count: 0,
            }
        })
        .collect();

    debug!(
        nodes = result.len(),
        owners = result.iter().map(|n| n.owners.len()).sum::<usize>(),
        "Aggregated owners per node"
    );

    result
}
