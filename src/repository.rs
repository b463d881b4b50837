use crate::models::AppData;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Source of the distinct days on which a user logged at least one medication.
pub trait AdherenceRepository {
    fn adherence_dates(&self, user_id: &str) -> BTreeSet<NaiveDate>;
}

impl AdherenceRepository for AppData {
    fn adherence_dates(&self, user_id: &str) -> BTreeSet<NaiveDate> {
        self.medications_for(user_id).map(|record| record.date).collect()
    }
}
