//! Typed structured-output payloads and their validation boundary.
//!
//! The model returns untyped JSON; nothing downstream touches it until it has
//! been mapped field-by-field into one of the payload types here. Any missing
//! required field or wrong primitive type rejects the whole payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StudioError;

/// Which schema a structured response must conform to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    CostReport,
    TaskPlan,
}

/// A validated structured payload, ready for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredPayload {
    CostReport(CostReport),
    TaskPlan(TaskPlan),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub currency: String,
    pub summary: CostSummary,
    pub breakdown: Vec<CostLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_area: f64,
    /// The model's own estimate. Deliberately never recomputed from the
    /// breakdown; the two are allowed to disagree.
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub item: String,
    pub cost: f64,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    pub project_name: String,
    pub worker_breakdown: Vec<WorkerGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerGroup {
    pub worker_type: String,
    pub estimated_workers: u32,
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub task_name: String,
    pub priority: String,
    pub timeframe: String,
}

/// Check a parsed JSON document against the declared schema kind and convert
/// it into a typed payload. All-or-nothing: there is no partial acceptance.
pub fn validate(json: &Value, kind: SchemaKind) -> Result<StructuredPayload, StudioError> {
    match kind {
        SchemaKind::CostReport => map_cost_report(json).map(StructuredPayload::CostReport),
        SchemaKind::TaskPlan => map_task_plan(json).map(StructuredPayload::TaskPlan),
    }
}

fn map_cost_report(json: &Value) -> Result<CostReport, StudioError> {
    let currency = require_str(json, "currency")?;

    let summary = &json["summary"];
    if !summary.is_object() {
        return Err(missing("summary"));
    }
    let total_area = require_number(summary, "total_area")?;
    let total_cost = require_number(summary, "total_cost")?;

    let breakdown = json["breakdown"]
        .as_array()
        .ok_or_else(|| missing("breakdown"))?
        .iter()
        .map(|row| {
            Ok(CostLineItem {
                item: require_str(row, "item")?,
                cost: require_number(row, "cost")?,
                details: require_str(row, "details")?,
            })
        })
        .collect::<Result<Vec<_>, StudioError>>()?;

    Ok(CostReport {
        currency,
        summary: CostSummary {
            total_area,
            total_cost,
        },
        breakdown,
    })
}

fn map_task_plan(json: &Value) -> Result<TaskPlan, StudioError> {
    let project_name = require_str(json, "projectName")?;

    let worker_breakdown = json["workerBreakdown"]
        .as_array()
        .ok_or_else(|| missing("workerBreakdown"))?
        .iter()
        .map(map_worker_group)
        .collect::<Result<Vec<_>, StudioError>>()?;

    Ok(TaskPlan {
        project_name,
        worker_breakdown,
    })
}

fn map_worker_group(group: &Value) -> Result<WorkerGroup, StudioError> {
    let worker_type = require_str(group, "workerType")?;

    let estimated_workers = group["estimatedWorkers"].as_u64().ok_or_else(|| {
        StudioError::MalformedResponse(
            "'estimatedWorkers' must be a non-negative integer".to_string(),
        )
    })?;
    let estimated_workers = u32::try_from(estimated_workers).map_err(|_| {
        StudioError::MalformedResponse("'estimatedWorkers' out of range".to_string())
    })?;

    let tasks = group["tasks"]
        .as_array()
        .ok_or_else(|| missing("tasks"))?
        .iter()
        .map(|task| {
            Ok(TaskItem {
                task_name: require_str(task, "taskName")?,
                priority: require_str(task, "priority")?,
                timeframe: require_str(task, "timeframe")?,
            })
        })
        .collect::<Result<Vec<_>, StudioError>>()?;

    if tasks.is_empty() {
        return Err(StudioError::MalformedResponse(format!(
            "worker group '{}' has no tasks",
            worker_type
        )));
    }

    Ok(WorkerGroup {
        worker_type,
        estimated_workers,
        tasks,
    })
}

fn require_str(value: &Value, field: &str) -> Result<String, StudioError> {
    value[field]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| missing(field))
}

fn require_number(value: &Value, field: &str) -> Result<f64, StudioError> {
    let number = value[field].as_f64().ok_or_else(|| missing(field))?;
    if !number.is_finite() {
        return Err(StudioError::MalformedResponse(format!(
            "'{}' is not a finite number",
            field
        )));
    }
    Ok(number)
}

fn missing(field: &str) -> StudioError {
    StudioError::MalformedResponse(format!("missing or mistyped field '{}'", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cost_json() -> Value {
        json!({
            "currency": "USD",
            "summary": { "total_area": 220.0, "total_cost": 185000.0 },
            "breakdown": [
                { "item": "Foundation", "cost": 32000.0, "details": "Reinforced concrete slab" },
                { "item": "Structure", "cost": 90000.0, "details": "Three floors, concrete frame" }
            ]
        })
    }

    #[test]
    fn test_cost_report_maps_all_fields() {
        let payload = validate(&cost_json(), SchemaKind::CostReport).unwrap();
        let StructuredPayload::CostReport(report) = payload else {
            panic!("expected a cost report");
        };
        assert_eq!(report.currency, "USD");
        assert_eq!(report.summary.total_area, 220.0);
        assert_eq!(report.breakdown.len(), 2);
        assert_eq!(report.breakdown[0].item, "Foundation");
    }

    #[test]
    fn test_cost_report_total_is_not_reconciled() {
        // breakdown sums to 122000 but the stated total is 185000; the
        // model's figure is authoritative and must survive untouched.
        let payload = validate(&cost_json(), SchemaKind::CostReport).unwrap();
        let StructuredPayload::CostReport(report) = payload else {
            panic!("expected a cost report");
        };
        assert_eq!(report.summary.total_cost, 185000.0);
    }

    #[test]
    fn test_cost_report_missing_total_cost_rejected() {
        let mut json = cost_json();
        json["summary"].as_object_mut().unwrap().remove("total_cost");
        let result = validate(&json, SchemaKind::CostReport);
        assert!(matches!(result, Err(StudioError::MalformedResponse(_))));
        assert!(result.unwrap_err().to_string().contains("total_cost"));
    }

    #[test]
    fn test_cost_report_empty_breakdown_accepted() {
        let mut json = cost_json();
        json["breakdown"] = json!([]);
        let payload = validate(&json, SchemaKind::CostReport).unwrap();
        let StructuredPayload::CostReport(report) = payload else {
            panic!("expected a cost report");
        };
        assert!(report.breakdown.is_empty());
    }

    #[test]
    fn test_cost_report_string_cost_rejected() {
        let mut json = cost_json();
        json["breakdown"][0]["cost"] = json!("32000");
        assert!(validate(&json, SchemaKind::CostReport).is_err());
    }

    fn task_json() -> Value {
        json!({
            "projectName": "Two-bedroom apartment fit-out",
            "workerBreakdown": [
                {
                    "workerType": "Electrician",
                    "estimatedWorkers": 2,
                    "tasks": [
                        { "taskName": "Rough-in wiring", "priority": "High", "timeframe": "Week 1" },
                        { "taskName": "Fixture installation", "priority": "Medium", "timeframe": "Week 3" }
                    ]
                },
                {
                    "workerType": "Painter",
                    "estimatedWorkers": 3,
                    "tasks": [
                        { "taskName": "Prime and paint walls", "priority": "Low", "timeframe": "Week 4" }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_task_plan_maps_groups_in_order() {
        let payload = validate(&task_json(), SchemaKind::TaskPlan).unwrap();
        let StructuredPayload::TaskPlan(plan) = payload else {
            panic!("expected a task plan");
        };
        assert_eq!(plan.project_name, "Two-bedroom apartment fit-out");
        assert_eq!(plan.worker_breakdown.len(), 2);
        assert_eq!(plan.worker_breakdown[0].worker_type, "Electrician");
        assert_eq!(plan.worker_breakdown[0].estimated_workers, 2);
        assert_eq!(plan.worker_breakdown[1].tasks[0].priority, "Low");
    }

    #[test]
    fn test_task_plan_missing_worker_breakdown_rejected() {
        let json = json!({ "projectName": "A project" });
        let result = validate(&json, SchemaKind::TaskPlan);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("workerBreakdown"));
    }

    #[test]
    fn test_task_plan_empty_tasks_rejected() {
        let mut json = task_json();
        json["workerBreakdown"][1]["tasks"] = json!([]);
        let result = validate(&json, SchemaKind::TaskPlan);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Painter"));
    }

    #[test]
    fn test_task_plan_negative_workers_rejected() {
        let mut json = task_json();
        json["workerBreakdown"][0]["estimatedWorkers"] = json!(-1);
        assert!(validate(&json, SchemaKind::TaskPlan).is_err());
    }

    #[test]
    fn test_no_partial_acceptance() {
        // One bad row anywhere fails the whole payload.
        let mut json = task_json();
        json["workerBreakdown"][1]["tasks"][0]
            .as_object_mut()
            .unwrap()
            .remove("timeframe");
        assert!(validate(&json, SchemaKind::TaskPlan).is_err());
    }
}
