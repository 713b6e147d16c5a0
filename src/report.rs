//! Rendering of a discovery result: a grouped, human-readable table or the
//! whole artifact as JSON.

use crate::discovery::{Discovery, ServiceMap};
use crate::Result;
use std::fmt::Write;

/// Render the service map as the grouped endpoint report, one block per
/// service, groups sorted by name for stable output.
pub fn render(services: &ServiceMap) -> String {
    let mut names: Vec<&String> = services.keys().collect();
    names.sort();

    let mut out = String::new();
    for name in names {
        let _ = writeln!(out, "Service: {}", name);

        for resolved in &services[name] {
            let task = &resolved.task;
            let endpoint = &resolved.endpoint;

            let _ = writeln!(out, "  Task ID: {}", task.task_id);
            let _ = writeln!(out, "  Container ID: {}", task.container_id);
            let _ = writeln!(
                out,
                "  Public endpoint: {}:{}",
                endpoint.public_ip, task.host_port
            );
            let _ = writeln!(
                out,
                "  Public DNS endpoint: {}:{}",
                endpoint.public_dns_name, task.host_port
            );
            let _ = writeln!(
                out,
                "  Private endpoint: {}:{}",
                endpoint.private_ip, task.host_port
            );
            let _ = writeln!(
                out,
                "  Private DNS endpoint: {}:{}",
                endpoint.private_dns_name, task.host_port
            );
            let _ = writeln!(out);
        }
    }

    out
}

/// Serialize the whole discovery (services plus skipped-task diagnostics)
/// as pretty JSON.
pub fn render_json(discovery: &Discovery) -> Result<String> {
    Ok(serde_json::to_string_pretty(discovery)?)
}
