use keyring::Entry;

const SERVICE: &str = "zuzu-admin";
const KEY_URL: &str = "backend-url";
const KEY_MEMORY_PASSWORD: &str = "memory-password";

/// Store the backend URL (and optionally the memory access password) in the
/// OS keyring.
pub fn store_connection(url: &str, memory_password: Option<&str>) -> Result<(), String> {
    Entry::new(SERVICE, KEY_URL)
        .map_err(|e| format!("keyring entry error: {e}"))?
        .set_password(url)
        .map_err(|e| format!("Failed to store backend URL: {e}"))?;

    match memory_password {
        Some(password) if !password.is_empty() => {
            Entry::new(SERVICE, KEY_MEMORY_PASSWORD)
                .map_err(|e| format!("keyring entry error: {e}"))?
                .set_password(password)
                .map_err(|e| format!("Failed to store memory password: {e}"))?;
        }
        _ => {
            if let Ok(entry) = Entry::new(SERVICE, KEY_MEMORY_PASSWORD) {
                let _ = entry.delete_credential();
            }
        }
    }

    Ok(())
}

/// Load the stored connection from the OS keyring. Returns None when no
/// backend has been configured yet.
pub fn load_connection() -> Option<(String, Option<String>)> {
    let url = Entry::new(SERVICE, KEY_URL).ok()?.get_password().ok()?;
    if url.is_empty() {
        return None;
    }
    let password = Entry::new(SERVICE, KEY_MEMORY_PASSWORD)
        .ok()
        .and_then(|e| e.get_password().ok())
        .filter(|p| !p.is_empty());
    Some((url, password))
}

/// Clear the stored connection from the OS keyring.
pub fn clear_connection() {
    if let Ok(entry) = Entry::new(SERVICE, KEY_URL) {
        let _ = entry.delete_credential();
    }
    if let Ok(entry) = Entry::new(SERVICE, KEY_MEMORY_PASSWORD) {
        let _ = entry.delete_credential();
    }
}
