//! Todo Commands
//!
//! Thin async wrappers over the gateway's read and write paths.

use todo_gateway::TodoItem;

use super::wallet::gateway;

// ========================
// Reads
// ========================

pub async fn list_todos(address: &str) -> Result<Vec<TodoItem>, String> {
    let gateway = gateway().map_err(|e| e.to_string())?;
    gateway.get_list(address).await.map_err(|e| e.to_string())
}

/// Log whether the contract is reachable for `address`. Never fails.
pub async fn verify_configuration(address: &str) {
    match gateway() {
        Ok(gateway) => gateway.verify_configuration(Some(address)).await,
        Err(e) => log::error!("Cannot verify configuration: {}", e),
    }
}

// ========================
// Writes
// ========================

pub async fn create_todo(task: String) -> Result<(), String> {
    let gateway = gateway().map_err(|e| e.to_string())?;
    let hash = gateway.create(&task).await.map_err(|e| e.to_string())?;
    log::info!("Created todo in {}", hash);
    Ok(())
}

pub async fn toggle_todo(id: u64) -> Result<(), String> {
    let gateway = gateway().map_err(|e| e.to_string())?;
    let hash = gateway.toggle(to_wire_id(id)).await.map_err(|e| e.to_string())?;
    log::info!("Toggled todo {} in {}", id, hash);
    Ok(())
}

pub async fn update_todo(id: u64, task: String) -> Result<(), String> {
    let gateway = gateway().map_err(|e| e.to_string())?;
    let hash = gateway.update(to_wire_id(id), &task).await.map_err(|e| e.to_string())?;
    log::info!("Updated todo {} in {}", id, hash);
    Ok(())
}

pub async fn delete_todo(id: u64) -> Result<(), String> {
    let gateway = gateway().map_err(|e| e.to_string())?;
    let hash = gateway.delete(to_wire_id(id)).await.map_err(|e| e.to_string())?;
    log::info!("Deleted todo {} in {}", id, hash);
    Ok(())
}

/// Ids past `i64::MAX` map to an invalid id so the gateway rejects them.
fn to_wire_id(id: u64) -> i64 {
    i64::try_from(id).unwrap_or(-1)
}
