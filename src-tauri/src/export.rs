//! CSV export of validated structured reports.
//!
//! The spreadsheet sink is outside the generation contract; this module only
//! flattens an already-validated payload into tabular text with localized
//! headers. The frontend turns the text into a file download.

use crate::prompts::Language;
use crate::validation::{CostReport, StructuredPayload, TaskPlan};

/// Render a payload as CSV with headers in the given language.
pub fn to_csv(payload: &StructuredPayload, language: Language) -> String {
    match payload {
        StructuredPayload::CostReport(report) => cost_report_csv(report, language),
        StructuredPayload::TaskPlan(plan) => task_plan_csv(plan, language),
    }
}

/// Suggested file name for the exported report.
pub fn file_name(payload: &StructuredPayload) -> &'static str {
    match payload {
        StructuredPayload::CostReport(_) => "cost-analysis.csv",
        StructuredPayload::TaskPlan(_) => "project-tasks.csv",
    }
}

fn cost_report_csv(report: &CostReport, language: Language) -> String {
    let (currency, total_area, total_cost, item, cost, details) = match language {
        Language::En => (
            "Currency",
            "Total Area (m2)",
            "Total Cost",
            "Item",
            "Cost",
            "Details",
        ),
        Language::Vi => (
            "Tiền tệ",
            "Tổng diện tích (m2)",
            "Tổng chi phí",
            "Hạng mục",
            "Chi phí",
            "Chi tiết",
        ),
    };

    let mut out = String::new();
    push_row(&mut out, &[currency, &report.currency]);
    push_row(&mut out, &[total_area, &report.summary.total_area.to_string()]);
    push_row(&mut out, &[total_cost, &report.summary.total_cost.to_string()]);
    out.push('\n');

    push_row(&mut out, &[item, cost, details]);
    for line in &report.breakdown {
        push_row(&mut out, &[&line.item, &line.cost.to_string(), &line.details]);
    }
    out
}

fn task_plan_csv(plan: &TaskPlan, language: Language) -> String {
    let (project, worker_type, workers, task, priority, timeframe) = match language {
        Language::En => (
            "Project",
            "Worker Type",
            "Est. Workers",
            "Task",
            "Priority",
            "Timeline / Duration",
        ),
        Language::Vi => (
            "Dự án",
            "Loại thợ",
            "Số lượng (ước tính)",
            "Công việc",
            "Độ ưu tiên",
            "Thời gian / Hạn chót",
        ),
    };

    let mut out = String::new();
    push_row(&mut out, &[project, &plan.project_name]);
    out.push('\n');

    push_row(&mut out, &[worker_type, workers, task, priority, timeframe]);
    for group in &plan.worker_breakdown {
        for item in &group.tasks {
            push_row(
                &mut out,
                &[
                    &group.worker_type,
                    &group.estimated_workers.to_string(),
                    &item.task_name,
                    &item.priority,
                    &item.timeframe,
                ],
            );
        }
    }
    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Quote a field when it contains a separator, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{CostLineItem, CostSummary, TaskItem, WorkerGroup};

    fn cost_payload() -> StructuredPayload {
        StructuredPayload::CostReport(CostReport {
            currency: "USD".to_string(),
            summary: CostSummary {
                total_area: 220.0,
                total_cost: 185000.0,
            },
            breakdown: vec![CostLineItem {
                item: "Foundation".to_string(),
                cost: 32000.0,
                details: "Reinforced slab, \"class B\" concrete".to_string(),
            }],
        })
    }

    #[test]
    fn test_cost_csv_has_summary_and_rows() {
        let csv = to_csv(&cost_payload(), Language::En);
        assert!(csv.starts_with("Currency,USD\n"));
        assert!(csv.contains("Total Cost,185000\n"));
        assert!(csv.contains("Item,Cost,Details\n"));
        assert!(csv.contains("Foundation,32000,"));
    }

    #[test]
    fn test_csv_escapes_quotes_and_commas() {
        let csv = to_csv(&cost_payload(), Language::En);
        assert!(csv.contains("\"Reinforced slab, \"\"class B\"\" concrete\""));
    }

    #[test]
    fn test_task_csv_one_row_per_task() {
        let plan = StructuredPayload::TaskPlan(TaskPlan {
            project_name: "Fit-out".to_string(),
            worker_breakdown: vec![WorkerGroup {
                worker_type: "Electrician".to_string(),
                estimated_workers: 2,
                tasks: vec![
                    TaskItem {
                        task_name: "Rough-in wiring".to_string(),
                        priority: "High".to_string(),
                        timeframe: "Week 1".to_string(),
                    },
                    TaskItem {
                        task_name: "Fixtures".to_string(),
                        priority: "Medium".to_string(),
                        timeframe: "Week 3".to_string(),
                    },
                ],
            }],
        });

        let csv = to_csv(&plan, Language::En);
        let task_rows: Vec<&str> = csv
            .lines()
            .filter(|l| l.starts_with("Electrician,"))
            .collect();
        assert_eq!(task_rows.len(), 2);
        assert_eq!(task_rows[0], "Electrician,2,Rough-in wiring,High,Week 1");
    }

    #[test]
    fn test_localized_headers() {
        let csv = to_csv(&cost_payload(), Language::Vi);
        assert!(csv.contains("Hạng mục,Chi phí,Chi tiết"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(file_name(&cost_payload()), "cost-analysis.csv");
    }
}
