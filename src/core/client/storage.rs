use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::kube_resources::{PersistentVolume, PersistentVolumeClaim, StorageClass};

// ==================== Persistent Volumes ====================

/// Fetch all persistent volumes in the cluster
pub async fn fetch_persistent_volumes(client: &Client) -> kube::Result<Vec<PersistentVolume>> {
    let pvs: Api<PersistentVolume> = Api::all(client.clone());
    let pv_list = pvs.list(&ListParams::default()).await?;

    debug!("Discovered {} persistent volume(s)", pv_list.items.len());
    Ok(pv_list.items)
}

// ==================== Persistent Volume Claims ====================

/// Fetch all persistent volume claims in the cluster
pub async fn fetch_persistent_volume_claims(
    client: &Client,
) -> kube::Result<Vec<PersistentVolumeClaim>> {
    let pvcs: Api<PersistentVolumeClaim> = Api::all(client.clone());
    let pvc_list = pvcs.list(&ListParams::default()).await?;

    debug!("Discovered {} persistent volume claim(s)", pvc_list.items.len());
    Ok(pvc_list.items)
}

// ==================== Storage Classes ====================

/// Fetch all storage classes in the cluster
pub async fn fetch_storage_classes(client: &Client) -> kube::Result<Vec<StorageClass>> {
    let classes: Api<StorageClass> = Api::all(client.clone());
    let sc_list = classes.list(&ListParams::default()).await?;

    debug!("Discovered {} storage class(es)", sc_list.items.len());
    Ok(sc_list.items)
}
