use std::collections::HashMap;

use tracing::debug;

use crate::core::client::kube_resources::{
    Node, PersistentVolume, PersistentVolumeClaim, Service, StorageClass,
};
use crate::core::util::cost_util::CostUtil;
use crate::core::util::quantity;
use crate::domain::aggregation::node_aggregator::instance_type;
use crate::domain::cost::model::{CostInventory, VolumeTotals};

pub const REGION_LABEL: &str = "topology.kubernetes.io/region";
pub const LEGACY_REGION_LABEL: &str = "failure-domain.beta.kubernetes.io/region";
pub const DEFAULT_CLASS_ANNOTATION: &str = "storageclass.kubernetes.io/is-default-class";
pub const LB_TYPE_ANNOTATION: &str = "service.beta.kubernetes.io/aws-load-balancer-type";

const EBS_PROVISIONERS: [&str; 2] = ["ebs.csi.aws.com", "kubernetes.io/aws-ebs"];
const DEFAULT_VOLUME_TYPE: &str = "gp3";

/// Everything the cost inventory is built from.
pub struct InventorySources<'a> {
    pub nodes: &'a [Node],
    pub persistent_volumes: &'a [PersistentVolume],
    pub persistent_volume_claims: &'a [PersistentVolumeClaim],
    pub storage_classes: &'a [StorageClass],
    pub services: &'a [Service],
}

pub fn build_inventory(src: &InventorySources<'_>) -> CostInventory {
    let mut inventory = CostInventory {
        region: region(src.nodes),
        ..Default::default()
    };

    for node in src.nodes {
        if let Some(instance_type) = instance_type(node) {
            *inventory.instances.entry(instance_type).or_default() += 1;
        }
    }

    let classes = VolumeClasses::new(src.storage_classes);

    for pv in src.persistent_volumes {
        let Some(spec) = pv.spec.as_ref() else {
            continue;
        };
        let Some(volume_type) = spec.storage_class_name.as_deref().and_then(|sc| classes.volume_type(sc)) else {
            continue;
        };
        let bytes = quantity::bytes_from_map(spec.capacity.as_ref(), "storage");
        add_volume(&mut inventory, volume_type, bytes);
    }

    for pvc in src.persistent_volume_claims.iter().filter(|c| !is_bound(c)) {
        let Some(spec) = pvc.spec.as_ref() else {
            continue;
        };
        let class_name = spec.storage_class_name.as_deref().or(classes.default_class.as_deref());
        let Some(volume_type) = class_name.and_then(|sc| classes.volume_type(sc)) else {
            continue;
        };
        let requests = spec.resources.as_ref().and_then(|r| r.requests.as_ref());
        add_volume(&mut inventory, volume_type, quantity::bytes_from_map(requests, "storage"));
    }

    for svc in src.services {
        if let Some(lb_type) = load_balancer_type(svc) {
            *inventory.load_balancers.entry(lb_type.to_string()).or_default() += 1;
        }
    }

    debug!(
        region = %inventory.region,
        instance_types = inventory.instances.len(),
        volume_types = inventory.volumes.len(),
        load_balancer_types = inventory.load_balancers.len(),
        "Built cost inventory"
    );

    inventory
}

fn add_volume(inventory: &mut CostInventory, volume_type: &str, bytes: u64) {
    let totals: &mut VolumeTotals = inventory.volumes.entry(volume_type.to_string()).or_default();
    totals.count += 1;
    totals.size_gb = totals.size_gb.saturating_add(CostUtil::bytes_to_whole_gib(bytes));
}

/// Region label of the first node that carries one; empty when none do.
pub fn region(nodes: &[Node]) -> String {
    nodes
        .iter()
        .filter_map(|n| n.metadata.labels.as_ref())
        .find_map(|labels| labels.get(REGION_LABEL).or_else(|| labels.get(LEGACY_REGION_LABEL)))
        .cloned()
        .unwrap_or_default()
}

/// A claim that already has a volume is counted through that volume.
fn is_bound(pvc: &PersistentVolumeClaim) -> bool {
    let phase_bound = pvc
        .status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .is_some_and(|phase| phase == "Bound");
    let has_volume = pvc
        .spec
        .as_ref()
        .and_then(|s| s.volume_name.as_deref())
        .is_some_and(|v| !v.is_empty());
    phase_bound || has_volume
}

/// `classic` unless the AWS type annotation names an NLB or ALB.
pub fn load_balancer_type(svc: &Service) -> Option<&'static str> {
    let is_lb = svc
        .spec
        .as_ref()
        .and_then(|s| s.type_.as_deref())
        .is_some_and(|t| t == "LoadBalancer");
    if !is_lb {
        return None;
    }

    let annotation = svc
        .metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(LB_TYPE_ANNOTATION))
        .map(String::as_str)
        .unwrap_or_default();

    Some(if annotation.contains("nlb") {
        "network"
    } else if annotation.contains("alb") {
        "application"
    } else {
        "classic"
    })
}

/// Whether the class carries the cluster-default annotation.
pub fn is_default_class(sc: &StorageClass) -> bool {
    sc.metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(DEFAULT_CLASS_ANNOTATION))
        .is_some_and(|v| v == "true")
}

struct VolumeClasses {
    volume_types: HashMap<String, String>,
    default_class: Option<String>,
}

impl VolumeClasses {
    fn new(storage_classes: &[StorageClass]) -> Self {
        let mut volume_types = HashMap::new();
        let mut default_class = None;

        for sc in storage_classes {
            let Some(name) = sc.metadata.name.clone() else {
                continue;
            };

            if is_default_class(sc) && default_class.is_none() {
                default_class = Some(name.clone());
            }

            if EBS_PROVISIONERS.contains(&sc.provisioner.as_str()) {
                let volume_type = sc
                    .parameters
                    .as_ref()
                    .and_then(|p| p.get("type"))
                    .filter(|t| !t.is_empty())
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_VOLUME_TYPE.to_string());
                volume_types.insert(name, volume_type);
            }
        }

        Self {
            volume_types,
            default_class,
        }
    }

    fn volume_type(&self, class_name: &str) -> Option<&str> {
        self.volume_types.get(class_name).map(String::as_str)
    }
}
