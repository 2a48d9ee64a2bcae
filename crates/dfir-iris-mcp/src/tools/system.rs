//! Server health and reference-data listings

use super::{StaticGetTool, Tool};
use dfir_iris_core::IrisClient;

const STATIC_GETS: &[(&str, &str, &str)] = &[
    (
        "dfir_iris_system_ping",
        "Ping the DFIR-IRIS server to check connectivity",
        "/api/ping",
    ),
    (
        "dfir_iris_system_versions",
        "Get DFIR-IRIS server version information",
        "/api/versions",
    ),
    (
        "dfir_iris_settings_asset_types",
        "List available asset types for use when creating assets",
        "/manage/asset-type/list",
    ),
    (
        "dfir_iris_settings_ioc_types",
        "List available IOC types for use when creating IOCs",
        "/manage/ioc-types/list",
    ),
    (
        "dfir_iris_settings_task_status",
        "List available task statuses",
        "/manage/task-status/list",
    ),
    (
        "dfir_iris_settings_analysis_status",
        "List available analysis statuses",
        "/manage/analysis-status/list",
    ),
    (
        "dfir_iris_settings_case_states",
        "List available case states",
        "/manage/case-states/list",
    ),
    (
        "dfir_iris_settings_case_templates",
        "List available case templates",
        "/manage/case-templates/list",
    ),
    (
        "dfir_iris_settings_classifications",
        "List available case classifications",
        "/manage/case-classifications/list",
    ),
    (
        "dfir_iris_settings_evidence_types",
        "List available evidence types",
        "/manage/evidence-types/list",
    ),
    (
        "dfir_iris_settings_event_categories",
        "List available event categories for timeline events",
        "/manage/event-categories/list",
    ),
];

pub(super) fn tools(client: &IrisClient) -> Vec<Box<dyn Tool>> {
    STATIC_GETS
        .iter()
        .map(|&(name, description, path)| StaticGetTool::boxed(client, name, description, path))
        .collect()
}
