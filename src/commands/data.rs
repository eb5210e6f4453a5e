use std::sync::Arc;

use tauri::State;

use crate::api::client::DocumentKind;
use crate::api::types::FunTables;
use crate::commands::get_client;
use crate::error::AppError;
use crate::AppState;

#[tauri::command]
pub async fn load_document(
    state: State<'_, Arc<AppState>>,
    kind: DocumentKind,
) -> Result<String, AppError> {
    let client = get_client(&state).await?;
    client.document(kind).await
}

#[tauri::command]
pub async fn save_document(
    state: State<'_, Arc<AppState>>,
    kind: DocumentKind,
    content: String,
) -> Result<(), AppError> {
    let client = get_client(&state).await?;
    client.save_document(kind, &content).await?;
    tracing::info!(kind = ?kind, bytes = content.len(), "Document saved");
    Ok(())
}

#[tauri::command]
pub async fn load_fun_tables(state: State<'_, Arc<AppState>>) -> Result<FunTables, AppError> {
    let client = get_client(&state).await?;
    client.fun_tables().await
}

/// Save the fun tables from the raw editor text. Both fields must parse as
/// JSON arrays of strings; malformed input is reported and nothing is sent.
#[tauri::command]
pub async fn save_fun_tables(
    state: State<'_, Arc<AppState>>,
    roasts: String,
    motivations: String,
) -> Result<(), AppError> {
    let tables = parse_fun_tables(&roasts, &motivations)?;

    let client = get_client(&state).await?;
    client.save_fun_tables(&tables).await?;
    tracing::info!(
        roasts = tables.roasts.len(),
        motivations = tables.motivations.len(),
        "Fun tables saved"
    );
    Ok(())
}

fn parse_fun_tables(roasts: &str, motivations: &str) -> Result<FunTables, AppError> {
    let roasts: Vec<String> = serde_json::from_str(roasts)
        .map_err(|_| AppError::Validation("Roasts must be a JSON array of strings".into()))?;
    let motivations: Vec<String> = serde_json::from_str(motivations).map_err(|_| {
        AppError::Validation("Motivations must be a JSON array of strings".into())
    })?;
    Ok(FunTables { roasts, motivations })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_arrays_parse() {
        let tables = parse_fun_tables(r#"["burn"]"#, r#"["go on", "you got this"]"#).unwrap();
        assert_eq!(tables.roasts, vec!["burn"]);
        assert_eq!(tables.motivations.len(), 2);
    }

    #[test]
    fn empty_arrays_are_fine() {
        let tables = parse_fun_tables("[]", "[]").unwrap();
        assert!(tables.roasts.is_empty());
        assert!(tables.motivations.is_empty());
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert!(matches!(
            parse_fun_tables("not json", "[]"),
            Err(AppError::Validation(_))
        ));
        // An array of the wrong element type is rejected too.
        assert!(matches!(
            parse_fun_tables(r#"[1, 2]"#, "[]"),
            Err(AppError::Validation(_))
        ));
    }
}
