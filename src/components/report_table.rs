//! Table rendering for structured outputs, with CSV export.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, StructuredPayload};

#[component]
pub fn ReportTable(payload: StructuredPayload, language: String) -> impl IntoView {
    let export_payload = payload.clone();
    let export_language = language.clone();

    let on_export = move |_| {
        let payload = export_payload.clone();
        let language = export_language.clone();
        spawn_local(async move {
            match commands::export_report(payload, &language).await {
                Ok(report) => trigger_download(&report.file_name, &report.content),
                Err(e) => {
                    web_sys::console::error_1(&format!("Export failed: {}", e).into());
                }
            }
        });
    };

    let export_label = if language == "en" {
        "Export to Excel"
    } else {
        "Xuất ra file Excel"
    };

    view! {
        <div class="report">
            <style>{include_str!("report_table.css")}</style>
            {match payload {
                StructuredPayload::CostReport(report) => {
                    let lang = language.clone();
                    let (title, area, cost, h_item, h_cost, h_details) = if lang == "en" {
                        ("Preliminary Cost Analysis", "Total Area", "Total Cost", "Item", "Cost", "Details")
                    } else {
                        ("Phân tích Chi phí Sơ bộ", "Tổng diện tích", "Tổng chi phí", "Hạng mục", "Chi phí", "Chi tiết")
                    };
                    view! {
                        <h3 class="report-title">{title}</h3>
                        <div class="report-summary">
                            <div>
                                <strong>{area}": "</strong>
                                {format!("{} m²", report.summary.total_area)}
                            </div>
                            <div>
                                <strong>{cost}": "</strong>
                                {format!("{} {}", report.summary.total_cost, report.currency)}
                            </div>
                        </div>
                        <table class="report-table">
                            <thead>
                                <tr>
                                    <th>{h_item}</th>
                                    <th>{h_cost}</th>
                                    <th>{h_details}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {report.breakdown.iter().map(|row| view! {
                                    <tr>
                                        <td>{row.item.clone()}</td>
                                        <td class="num">{format!("{} {}", row.cost, report.currency)}</td>
                                        <td>{row.details.clone()}</td>
                                    </tr>
                                }).collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }.into_any()
                }
                StructuredPayload::TaskPlan(plan) => {
                    let lang = language.clone();
                    let (title, h_worker, h_count, h_task, h_priority, h_timeframe) = if lang == "en" {
                        ("Project Task List", "Worker Type", "Est. Workers", "Task", "Priority", "Timeline / Duration")
                    } else {
                        ("Danh sách Công việc Dự án", "Loại thợ", "Số lượng (ước tính)", "Công việc", "Độ ưu tiên", "Thời gian / Hạn chót")
                    };
                    view! {
                        <h3 class="report-title">{format!("{}: {}", title, plan.project_name)}</h3>
                        <table class="report-table">
                            <thead>
                                <tr>
                                    <th>{h_worker}</th>
                                    <th>{h_count}</th>
                                    <th>{h_task}</th>
                                    <th>{h_priority}</th>
                                    <th>{h_timeframe}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {plan.worker_breakdown.iter().flat_map(|group| {
                                    let worker_type = group.worker_type.clone();
                                    let workers = group.estimated_workers;
                                    group.tasks.iter().map(move |task| view! {
                                        <tr>
                                            <td>{worker_type.clone()}</td>
                                            <td class="num">{workers}</td>
                                            <td>{task.task_name.clone()}</td>
                                            <td>{task.priority.clone()}</td>
                                            <td>{task.timeframe.clone()}</td>
                                        </tr>
                                    }).collect::<Vec<_>>()
                                }).collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }.into_any()
                }
            }}
            <button class="btn btn-secondary export-btn" on:click=on_export>
                {export_label}
            </button>
        </div>
    }
}

/// Offer a text file as a browser download.
fn trigger_download(file_name: &str, content: &str) {
    let encoded: String = js_sys::encode_uri_component(content).into();
    let href = format!("data:text/csv;charset=utf-8,{}", encoded);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(element) = document.create_element("a") else {
        return;
    };
    let anchor: web_sys::HtmlAnchorElement = element.dyn_into().expect("anchor element");
    anchor.set_href(&href);
    anchor.set_download(file_name);
    anchor.click();
}
