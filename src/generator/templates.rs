use anyhow::Context;
use askama::Template;

use super::artifacts::Artifacts;

/// One line of the route table
#[derive(Debug, Clone)]
pub struct RouteRow {
    pub verb: String,
    pub pattern: String,
    pub service: String,
    pub handler: String,
    pub operation_id: String,
}

/// One line of the error table
#[derive(Debug, Clone)]
pub struct ErrorRow {
    pub enum_name: String,
    pub name: String,
    pub code: i32,
    pub status: u16,
    pub reason: String,
}

/// Template data for the human-readable route report
#[derive(Template)]
#[template(path = "routes.txt", escape = "none")]
pub struct RouteReportTemplate {
    pub package: String,
    pub operation_count: usize,
    pub error_count: usize,
    /// HTTP-mapped operations
    pub routes: Vec<RouteRow>,
    /// Operations reachable only through generic options
    pub commands: Vec<RouteRow>,
    pub errors: Vec<ErrorRow>,
}

impl RouteReportTemplate {
    pub fn from_artifacts(artifacts: &Artifacts) -> Self {
        let (routes, commands): (Vec<_>, Vec<_>) = artifacts
            .registrations
            .iter()
            .map(|r| RouteRow {
                verb: r.verb.clone().unwrap_or_default(),
                pattern: r.pattern.clone().unwrap_or_default(),
                service: r.service.clone(),
                handler: r.handler_name.clone(),
                operation_id: r.operation_id.clone(),
            })
            .partition(|row| !row.verb.is_empty());

        let errors = artifacts
            .errors
            .iter()
            .flat_map(|c| &c.values)
            .map(|v| ErrorRow {
                enum_name: v.enum_name.clone(),
                name: v.name.clone(),
                code: v.code,
                status: v.status,
                reason: v.reason.clone(),
            })
            .collect::<Vec<_>>();

        RouteReportTemplate {
            package: artifacts.package.clone(),
            operation_count: artifacts.operations.len(),
            error_count: artifacts.errors.len(),
            routes,
            commands,
            errors,
        }
    }
}

/// Render the route report for a set of artifacts
pub fn render_report(artifacts: &Artifacts) -> anyhow::Result<String> {
    RouteReportTemplate::from_artifacts(artifacts)
        .render()
        .context("Failed to render route report")
}
