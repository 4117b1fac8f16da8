//! Resolves a list title to its remote identifier, creating the list when the
//! user has none with that title.
//!
//! Two clients racing to create the same title can end up with duplicate
//! lists; nothing here locks across processes.

use rand::Rng;

use super::error::SyncError;
use super::ica::{AuthTicket, IcaClient};
use super::protocol::CreateListRequest;

/// Find the list titled `list_name`, or create it.
///
/// The common path is a single index fetch. After a creation the index is
/// fetched again and the identifier is taken from the service's answer rather
/// than from the id that was submitted.
pub async fn resolve_list(
    client: &IcaClient,
    ticket: &AuthTicket,
    list_name: &str,
    sorting_store: i64,
) -> Result<String, SyncError> {
    let lists = client.shopping_lists(ticket).await?;
    if let Some(id) = lists.find(list_name) {
        log::debug!("Resolved list '{}' to {}", list_name, id);
        return Ok(id.to_string());
    }

    log::info!("Shopping list not found: {}", list_name);
    let request = CreateListRequest {
        offline_id: generate_offline_id(),
        title: list_name.to_string(),
        sorting_store,
    };

    log::debug!("List does not exist. Creating {} as {}", list_name, request.offline_id);
    let status = client.create_list(ticket, &request).await?;
    if !status.is_success() {
        log::error!("Creating list '{}' returned HTTP {}", list_name, status.as_u16());
        return Err(SyncError::ListResolution(list_name.to_string()));
    }

    let lists = client.shopping_lists(ticket).await?;
    match lists.find(list_name) {
        Some(id) => {
            log::info!("{} created with offline id {}", list_name, id);
            Ok(id.to_string())
        }
        None => {
            log::error!("List '{}' missing from the index after creation", list_name);
            Err(SyncError::ListResolution(list_name.to_string()))
        }
    }
}

/// Generate a locally chosen list id: five lowercase hex groups of 8-4-4-4-12
/// characters drawn from raw random bytes
pub fn generate_offline_id() -> String {
    let mut rng = rand::thread_rng();
    [4, 2, 2, 2, 6]
        .iter()
        .map(|&bytes| hex_group(&mut rng, bytes))
        .collect::<Vec<_>>()
        .join("-")
}

fn hex_group(rng: &mut impl Rng, bytes: usize) -> String {
    (0..bytes).map(|_| format!("{:02x}", rng.gen::<u8>())).collect()
}
