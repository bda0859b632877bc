//! Vendors command handler.
//!
//! Implements the `vendors` subcommand: list the vendor catalog with the
//! active vendors marked.

use crate::config::AppConfig;
use crate::pipeline::{exit_codes, ReportDestination};
use crate::reports::ReportFormat;
use anyhow::Result;
use serde_json::json;

/// Run the vendors command
pub fn run_vendors(config: &AppConfig) -> Result<i32> {
    let output = match config.output.format {
        ReportFormat::Json => format_vendors_json(config)?,
        _ => format_vendors_table(config),
    };

    ReportDestination::resolve(&config.output).write(&output, true)?;
    Ok(exit_codes::SUCCESS)
}

fn format_vendors_table(config: &AppConfig) -> String {
    let catalog = config.catalog();
    let width = catalog
        .iter()
        .map(|(name, _)| name.len())
        .chain(config.vendors.active.iter().map(String::len))
        .max()
        .unwrap_or(6)
        .max(6);

    let mut lines = vec![format!(
        "  {:<width$}  {:>5}  {:<9}  {:>13}",
        "VENDOR", "TRUST", "SHIPPING", "RETURNABILITY"
    )];
    for (name, profile) in catalog.iter() {
        let marker = if config.vendors.active.contains(name) { '*' } else { ' ' };
        lines.push(format!(
            "{marker} {name:<width$}  {:>5}  {:<9}  {:>13}",
            profile.trust,
            profile.tier().label(),
            profile.returnability
        ));
    }
    for name in &config.vendors.active {
        if !catalog.contains(name) {
            lines.push(format!("* {name:<width$}  {:>5}  {:<9}  {:>13}", "-", "-", "-"));
        }
    }
    lines.push(String::new());
    lines.push("* active vendor".to_string());
    lines.join("\n") + "\n"
}

fn format_vendors_json(config: &AppConfig) -> Result<String> {
    let catalog = config.catalog();
    let vendors: Vec<_> = catalog
        .iter()
        .map(|(name, profile)| {
            json!({
                "name": name,
                "active": config.vendors.active.contains(name),
                "trust": profile.trust,
                "shipping_tier": profile.shipping_tier,
                "shipping": profile.tier().label(),
                "returnability": profile.returnability,
            })
        })
        .collect();
    let uncatalogued: Vec<&String> = config
        .vendors
        .active
        .iter()
        .filter(|name| !catalog.contains(name))
        .collect();

    Ok(serde_json::to_string_pretty(&json!({
        "vendors": vendors,
        "active": config.vendors.active,
        "uncatalogued": uncatalogued,
    }))?)
}
