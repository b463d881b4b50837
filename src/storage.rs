use crate::errors::AppError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(
                    medications = data.medications.len(),
                    glucose_readings = data.glucose_readings.len(),
                    "loaded data from {}",
                    path.display()
                );
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

/// Applies `change` to a copy of `data` and swaps it in only after the copy was written.
pub async fn commit<F>(path: &Path, data: &mut AppData, change: F) -> Result<(), AppError>
where
    F: FnOnce(&mut AppData),
{
    let mut next = data.clone();
    change(&mut next);
    persist_data(path, &next).await?;
    *data = next;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicationRecord;
    use chrono::NaiveDate;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("adherence_storage_{}_{}.json", std::process::id(), name));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.medications.is_empty());
        assert!(data.glucose_readings.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{ not json").await.unwrap();
        let data = load_data(&path).await;
        assert!(data.medications.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn failed_write_leaves_data_untouched() {
        // a directory cannot be written as a file
        let path = std::env::temp_dir();
        let mut data = AppData::default();

        let result = commit(&path, &mut data, |next| {
            next.medications.push(MedicationRecord {
                user_id: "alice".into(),
                med_name: "Insulin".into(),
                dosage: None,
                time_taken: None,
                date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            });
        })
        .await;

        assert!(result.is_err());
        assert!(data.medications.is_empty());
    }

    #[tokio::test]
    async fn commit_applies_change_after_write() {
        let path = temp_path("commit");
        let mut data = AppData::default();

        commit(&path, &mut data, |next| {
            next.medications.push(MedicationRecord {
                user_id: "alice".into(),
                med_name: "Insulin".into(),
                dosage: Some(4.0),
                time_taken: None,
                date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            });
        })
        .await
        .unwrap();

        assert_eq!(data.medications.len(), 1);
        assert_eq!(load_data(&path).await.medications, data.medications);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_records_reload() {
        let path = temp_path("reload");
        let mut data = AppData::default();
        data.medications.push(MedicationRecord {
            user_id: "alice".into(),
            med_name: "Metformin".into(),
            dosage: Some(500.0),
            time_taken: None,
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        });

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        assert_eq!(loaded.medications, data.medications);
        let _ = fs::remove_file(&path).await;
    }
}
