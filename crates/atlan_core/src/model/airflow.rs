//! Airflow DAGs and tasks.

use std::collections::BTreeSet;

use atlan_macros::{AtlanAsset, AttributeSet};
use serde::{Deserialize, Serialize};

use super::new_child_asset;
use crate::asset::{AssetAttributes, AssetHeader, AssetType, CatalogAttributes};
use crate::error::Result;
use crate::qualified_name::last_segment;
use crate::reference::Reference;

/// Attributes shared by DAGs and tasks, describing their latest run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirflowAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_tags: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_run_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_run_open_lineage_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_run_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_run_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_run_start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_run_end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_run_open_lineage_state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirflowDagAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub airflow: AirflowAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_dag_schedule: Option<String>,
    /// Seconds between scheduled runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_dag_schedule_delta: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_tasks: Option<BTreeSet<Reference>>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "AirflowDag", super_types("Airflow", "Catalog", "Asset", "Referenceable"))]
pub struct AirflowDag {
    pub header: AssetHeader,
    pub attributes: AirflowDagAttributes,
}

impl AirflowDag {
    /// `<connection>/<name>`.
    pub fn creator(name: &str, connection_qualified_name: &str) -> Result<Self> {
        new_child_asset(name, "connectionQualifiedName", connection_qualified_name, 3)
    }
}

#[derive(Debug, Clone, Default, PartialEq, AttributeSet, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirflowTaskAttributes {
    #[serde(flatten)]
    #[asset(base)]
    pub asset: AssetAttributes,
    #[serde(flatten)]
    pub catalog: CatalogAttributes,
    #[serde(flatten)]
    pub airflow: AirflowAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_task_operator_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_dag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_dag_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_task_connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_task_sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_task_retry_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_task_pool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_task_priority_weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_task_queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_task_trigger_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_dag: Option<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, AtlanAsset)]
#[asset(type_name = "AirflowTask", super_types("Airflow", "Catalog", "Asset", "Referenceable"))]
pub struct AirflowTask {
    pub header: AssetHeader,
    pub attributes: AirflowTaskAttributes,
}

impl AirflowTask {
    /// `<dag>/<name>`.
    pub fn creator(name: &str, dag_qualified_name: &str) -> Result<Self> {
        let mut task: Self =
            new_child_asset(name, "airflowDagQualifiedName", dag_qualified_name, 4)?;
        let attrs = &mut task.attributes;
        attrs.airflow_dag_name = Some(last_segment(dag_qualified_name).to_string());
        attrs.airflow_dag_qualified_name = Some(dag_qualified_name.to_string());
        attrs.airflow_dag = Some(AirflowDag::ref_by_qualified_name(dag_qualified_name)?);
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::SaveSemantic;
    use crate::error::ErrorCode;

    const CONN: &str = "default/airflow/1700000000";

    #[test]
    fn dag_creator() {
        let dag = AirflowDag::creator("daily_load", CONN).unwrap();
        assert_eq!(dag.qualified_name(), Some("default/airflow/1700000000/daily_load"));
        assert_eq!(dag.asset().connector_name.as_deref(), Some("airflow"));
    }

    #[test]
    fn dag_creator_rejects_unknown_connector() {
        let err = AirflowDag::creator("daily_load", "default/nosuch/1").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidQualifiedName));
    }

    #[test]
    fn task_creator_links_dag() {
        let dag_qn = format!("{}/daily_load", CONN);
        let task = AirflowTask::creator("extract", &dag_qn).unwrap();
        assert_eq!(task.attributes.airflow_dag_name.as_deref(), Some("daily_load"));
        let dag_ref = task.attributes.airflow_dag.as_ref().unwrap();
        assert_eq!(dag_ref.type_name, "AirflowDag");
        assert_eq!(dag_ref.qualified_name(), Some(dag_qn.as_str()));
    }

    #[test]
    fn removing_tasks_from_dag() {
        let mut dag = AirflowDag::updater(format!("{}/daily_load", CONN), "daily_load").unwrap();
        dag.attributes.airflow_tasks = Some(
            [AirflowTask::ref_by_guid_with("t-9", SaveSemantic::Remove).unwrap()]
                .into_iter()
                .collect(),
        );
        let entity = dag.to_entity().unwrap();
        assert!(entity.attribute("airflowTasks").is_none());
        assert_eq!(entity.remove_relationship_attributes["airflowTasks"][0]["guid"], "t-9");
    }
}
