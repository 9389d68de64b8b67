//! Re-export the Kubernetes resource types the aggregation engine reads
//! from k8s-openapi, so the rest of the crate has one import point.

pub use k8s_openapi::api::core::v1::{
    Node,
    PersistentVolume,
    PersistentVolumeClaim,
    Pod,
    Service,
};

pub use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};

pub use k8s_openapi::api::storage::v1::StorageClass;

pub use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    ObjectMeta,
    OwnerReference,
};

pub use crate::core::client::metrics::NodeMetrics;
