use std::collections::HashMap;

use tracing::debug;

use crate::core::client::kube_resources::{Node, Pod};
use crate::core::fetcher::MetricsAvailability;
use crate::core::util::quantity;
use crate::domain::aggregation::model::{NodeRecord, ResourceAmounts};

pub const INSTANCE_TYPE_LABEL: &str = "node.kubernetes.io/instance-type";
pub const LEGACY_INSTANCE_TYPE_LABEL: &str = "beta.kubernetes.io/instance-type";

/// Node a pod counts against, if it is running and scheduled.
///
/// Pending, completed and unscheduled pods return `None`.
pub fn running_node_name(pod: &Pod) -> Option<&str> {
    let phase = pod.status.as_ref().and_then(|s| s.phase.as_deref());
    if phase != Some("Running") {
        return None;
    }
    pod.spec
        .as_ref()
        .and_then(|s| s.node_name.as_deref())
        .filter(|name| !name.is_empty())
}

/// Sum of container requests and limits for one pod, as `(requests, limits)`.
pub fn pod_resources(pod: &Pod) -> (ResourceAmounts, ResourceAmounts) {
    let mut requests = ResourceAmounts::default();
    let mut limits = ResourceAmounts::default();

    let containers = pod.spec.iter().flat_map(|spec| spec.containers.iter());
    for container in containers {
        let Some(resources) = container.resources.as_ref() else {
            continue;
        };
        let req = resources.requests.as_ref();
        let lim = resources.limits.as_ref();

        requests.add(ResourceAmounts::new(
            quantity::cpu_from_map(req),
            quantity::bytes_from_map(req, "memory"),
        ));
        limits.add(ResourceAmounts::new(
            quantity::cpu_from_map(lim),
            quantity::bytes_from_map(lim, "memory"),
        ));
    }

    (requests, limits)
}

pub fn instance_type(node: &Node) -> Option<String> {
    let labels = node.metadata.labels.as_ref()?;
    labels
        .get(INSTANCE_TYPE_LABEL)
        .or_else(|| labels.get(LEGACY_INSTANCE_TYPE_LABEL))
        .filter(|t| !t.is_empty())
        .cloned()
}

fn empty_record(node: &Node) -> Option<NodeRecord> {
    let name = node.metadata.name.clone()?;
    let capacity = node.status.as_ref().and_then(|s| s.capacity.as_ref());

    Some(NodeRecord {
        name,
        instance_type: instance_type(node),
        capacity: ResourceAmounts::new(
            quantity::cpu_from_map(capacity),
            quantity::bytes_from_map(capacity, "memory"),
        ),
        requests: ResourceAmounts::default(),
        limits: ResourceAmounts::default(),
        usage: None,
        pod_count: 0,
    })
}

/// Fold running pods and live metrics into one record per node.
///
/// The returned order is unspecified; sort before display.
pub fn aggregate_nodes(
    nodes: &[Node],
    pods: &[Pod],
    metrics: &MetricsAvailability,
) -> Vec<NodeRecord> {
    let mut records: HashMap<String, NodeRecord> = nodes
        .iter()
        .filter_map(empty_record)
        .map(|rec| (rec.name.clone(), rec))
        .collect();

    let mut skipped = 0usize;
    for pod in pods {
        let Some(record) = running_node_name(pod).and_then(|node| records.get_mut(node)) else {
            skipped += 1;
            continue;
        };

        let (requests, limits) = pod_resources(pod);
        record.requests.add(requests);
        record.limits.add(limits);
        record.pod_count += 1;
    }

    if let MetricsAvailability::Available(samples) = metrics {
        for sample in samples {
            let Some(name) = sample.metadata.name.as_deref() else {
                continue;
            };
            if let Some(record) = records.get_mut(name) {
                record.usage = Some(ResourceAmounts::new(
                    sample.cpu_millicores(),
                    sample.memory_bytes(),
                ));
            }
        }
    }

    debug!(
        nodes = records.len(),
        skipped_pods = skipped,
        "Aggregated node resource totals"
    );

    records.into_values().collect()
}
