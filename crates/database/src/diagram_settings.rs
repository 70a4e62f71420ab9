//! Diagram settings storage.
//!
//! Each customer has at most one settings row, enforced by the
//! `unique_customer_settings` constraint.

use nile_client::{query, Executor};

use crate::models::DiagramSettings;
use crate::patch::SetClause;
use crate::Result;

/// Feature toggles to change. `None` leaves a toggle untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagramSettingsPatch {
    pub pv_analyse: Option<bool>,
    pub ppa_cost_analysis: Option<bool>,
    pub lastgang_dashboard: Option<bool>,
    pub energy_heatmap: Option<bool>,
}

impl DiagramSettingsPatch {
    fn set_clause(&self) -> SetClause {
        let mut clause = SetClause::new(1);
        clause.set_some("pv_analyse", self.pv_analyse);
        clause.set_some("ppa_cost_analysis", self.ppa_cost_analysis);
        clause.set_some("lastgang_dashboard", self.lastgang_dashboard);
        clause.set_some("energy_heatmap", self.energy_heatmap);
        clause
    }
}

/// Get a customer's settings, if any have been stored.
pub async fn get_diagram_settings(
    db: &dyn Executor,
    customer_id: i64,
) -> Result<Option<DiagramSettings>> {
    let settings = query("SELECT * FROM diagram_settings WHERE customer_id = $1")
        .bind(customer_id)
        .fetch_optional(db)
        .await?;

    Ok(settings)
}

/// Create or update a customer's settings in one statement.
///
/// Toggles missing from the patch keep their column default on insert and
/// their stored value on update.
pub async fn update_diagram_settings(
    db: &dyn Executor,
    customer_id: i64,
    patch: &DiagramSettingsPatch,
) -> Result<DiagramSettings> {
    let clause = patch.set_clause();
    let sql = format!(
        r#"
        INSERT INTO diagram_settings (customer_id{columns})
        VALUES ($1{placeholders})
        ON CONFLICT (customer_id) DO UPDATE SET
            {updates}
        RETURNING *
        "#,
        columns = clause.insert_columns(),
        placeholders = clause.insert_placeholders(),
        updates = clause.excluded_assignments(),
    );

    let settings = clause
        .bind_to(query(sql).bind(customer_id))
        .fetch_one(db)
        .await?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nile_client::mock::MockExecutor;
    use serde_json::{json, Value};

    fn settings_row(pv_analyse: bool) -> Value {
        json!({
            "id": 1,
            "customer_id": 7,
            "pv_analyse": pv_analyse,
            "ppa_cost_analysis": true,
            "lastgang_dashboard": true,
            "energy_heatmap": true,
            "created_at": "2026-03-01T00:00:00Z",
            "updated_at": "2026-03-02T00:00:00Z"
        })
    }

    fn normalized(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[tokio::test]
    async fn test_get_missing_settings() {
        let db = MockExecutor::new();
        assert!(get_diagram_settings(&db, 7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_is_single_upsert() {
        let db = MockExecutor::new();
        db.push_rows(vec![settings_row(false)]);

        let patch = DiagramSettingsPatch {
            pv_analyse: Some(false),
            ..Default::default()
        };
        let settings = update_diagram_settings(&db, 7, &patch).await.unwrap();
        assert!(!settings.pv_analyse);

        let executed = db.executed();
        assert_eq!(executed.len(), 1);
        assert_eq!(
            normalized(executed[0].sql()),
            "INSERT INTO diagram_settings (customer_id, pv_analyse) VALUES ($1, $2) \
             ON CONFLICT (customer_id) DO UPDATE SET pv_analyse = EXCLUDED.pv_analyse, \
             updated_at = CURRENT_TIMESTAMP RETURNING *"
        );
        assert_eq!(executed[0].params(), &[json!(7), json!(false)]);
    }

    #[tokio::test]
    async fn test_repeated_updates_use_same_statement_shape() {
        let db = MockExecutor::new();
        db.push_rows(vec![settings_row(false)]);
        db.push_rows(vec![settings_row(true)]);

        let off = DiagramSettingsPatch {
            pv_analyse: Some(false),
            ..Default::default()
        };
        let on = DiagramSettingsPatch {
            pv_analyse: Some(true),
            ..Default::default()
        };
        let first = update_diagram_settings(&db, 7, &off).await.unwrap();
        let second = update_diagram_settings(&db, 7, &on).await.unwrap();

        assert_eq!(first.id, second.id);
        let executed = db.executed();
        assert_eq!(executed[0].sql(), executed[1].sql());
        assert!(executed.iter().all(|s| s.sql().contains("ON CONFLICT (customer_id)")));
    }

    #[tokio::test]
    async fn test_empty_patch_inserts_defaults() {
        let db = MockExecutor::new();
        db.push_rows(vec![settings_row(true)]);

        update_diagram_settings(&db, 7, &DiagramSettingsPatch::default())
            .await
            .unwrap();

        let stmt = db.last().unwrap();
        assert_eq!(
            normalized(stmt.sql()),
            "INSERT INTO diagram_settings (customer_id) VALUES ($1) \
             ON CONFLICT (customer_id) DO UPDATE SET updated_at = CURRENT_TIMESTAMP RETURNING *"
        );
        assert_eq!(stmt.params(), &[json!(7)]);
    }
}
