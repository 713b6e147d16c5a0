use serde::Serialize;
use std::collections::HashMap;

/// One matched, running container, built from a task description.
///
/// The `service_name` is the lowercased name of the task's primary
/// container and doubles as the grouping key of the final map. Only the
/// primary container and its first network binding are represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub service_name: String,
    pub container_id: String,
    pub container_instance_id: String,
    pub task_id: String,
    pub host_port: u16,
}

/// Network identity of the EC2 instance hosting a task. Fields the API has
/// no value for are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MachineEndpoint {
    pub private_ip: String,
    pub public_ip: String,
    pub private_dns_name: String,
    pub public_dns_name: String,
}

/// A fully resolved container: the task plus its host machine's addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedService {
    pub task: Task,
    pub endpoint: MachineEndpoint,
}

/// Final artifact of a discovery run, keyed by service name. Every record
/// under key K has `task.service_name == K`.
pub type ServiceMap = HashMap<String, Vec<ResolvedService>>;

/// A task dropped during filtering, kept as a diagnostic instead of being
/// silently discarded.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTask {
    pub task_id: String,
    pub reason: String,
}

/// Everything one discovery run produces.
#[derive(Debug, Default, Serialize)]
pub struct Discovery {
    pub services: ServiceMap,
    pub skipped: Vec<SkippedTask>,
}
