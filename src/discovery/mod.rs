//! Concurrent endpoint discovery pipeline.
//!
//! Enumerates the tasks of a cluster, keeps those whose primary container
//! name matches a glob filter, then resolves each surviving task to the EC2
//! instance hosting it. The resolution stage fans out one worker per task
//! and joins the completions into a map grouped by service name.

pub mod types;

pub use types::{Discovery, MachineEndpoint, ResolvedService, ServiceMap, SkippedTask, Task};

use crate::aws::{AwsClient, ClusterClient, ContainerDescription};
use crate::{ElblessError, Result};
use glob::Pattern;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Discover the endpoints of every running task in `cluster` whose primary
/// container name matches `filter`, against the real control plane in
/// `region`.
pub async fn discover(cluster: &str, region: &str, filter: &str) -> Result<Discovery> {
    let client = AwsClient::new(region).await;
    EndpointDiscoverer::new(client).discover(cluster, filter).await
}

/// The pipeline orchestrator. Holds the injected [`ClusterClient`] and runs
/// enumerate, filter, resolve and aggregate against it.
pub struct EndpointDiscoverer<C> {
    client: Arc<C>,
}

impl<C: ClusterClient> EndpointDiscoverer<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Run the full pipeline.
    ///
    /// All-or-nothing: a failed enumeration or a failed endpoint resolution
    /// fails the whole call and no partial map is returned. Tasks whose
    /// descriptions are unusable are skipped and reported in
    /// [`Discovery::skipped`].
    pub async fn discover(&self, cluster: &str, filter: &str) -> Result<Discovery> {
        let task_ids = self.list_task_ids(cluster).await?;
        info!("Found {} task(s) in cluster {}", task_ids.len(), cluster);

        let (tasks, skipped) = self.filter_tasks(cluster, &task_ids, filter).await?;
        debug!(
            "{} task(s) match filter {:?}, {} skipped",
            tasks.len(),
            filter,
            skipped.len()
        );

        let services = self.resolve_all(cluster, tasks).await?;

        Ok(Discovery { services, skipped })
    }

    /// Enumerate the raw task IDs of a cluster.
    async fn list_task_ids(&self, cluster: &str) -> Result<Vec<String>> {
        let arns = self.client.list_tasks(cluster).await.map_err(|e| match e {
            ElblessError::ClusterNotFound(_) => e,
            other => ElblessError::Discovery {
                cluster: cluster.to_string(),
                reason: other.to_string(),
            },
        })?;

        Ok(arns.iter().map(|arn| raw_id(arn).to_string()).collect())
    }

    /// Describe each task and keep those whose primary container name
    /// matches the glob. Unusable descriptions become [`SkippedTask`]
    /// diagnostics rather than failing the batch.
    async fn filter_tasks(
        &self,
        cluster: &str,
        task_ids: &[String],
        filter: &str,
    ) -> Result<(Vec<Task>, Vec<SkippedTask>)> {
        let pattern =
            Pattern::new(&filter.to_lowercase()).map_err(|e| ElblessError::InvalidFilter {
                pattern: filter.to_string(),
                reason: e.to_string(),
            })?;

        let mut tasks = Vec::with_capacity(task_ids.len());
        let mut skipped = Vec::new();
        let mut skip = |task_id: &str, err: ElblessError| {
            warn!("Skipping task {}: {}", task_id, err);
            skipped.push(SkippedTask {
                task_id: task_id.to_string(),
                reason: err.to_string(),
            });
        };

        for task_id in task_ids {
            let description = match self.fetch_task(cluster, task_id).await {
                Ok(description) => description,
                Err(e) => {
                    skip(task_id, e);
                    continue;
                }
            };

            // Only the primary container participates in matching.
            let Some(primary) = description.containers.first() else {
                skip(task_id, malformed(task_id, "task has no containers"));
                continue;
            };

            let service_name = primary.name.to_lowercase();
            if !pattern.matches(&service_name) {
                continue;
            }

            match build_task(
                task_id,
                service_name,
                primary,
                description.container_instance_arn.as_deref(),
            ) {
                Ok(task) => tasks.push(task),
                Err(e) => skip(task_id, e),
            }
        }

        Ok((tasks, skipped))
    }

    async fn fetch_task(&self, cluster: &str, task_id: &str) -> Result<crate::aws::TaskDescription> {
        let mut described = self.client.describe_task(cluster, task_id).await?;
        if described.is_empty() {
            return Err(malformed(task_id, "task description not found"));
        }
        Ok(described.remove(0))
    }

    /// Fan one resolver worker out per task and fold the completions into
    /// the service map. The first worker error aborts the rest; outstanding
    /// workers are drained so none outlive the call.
    async fn resolve_all(&self, cluster: &str, tasks: Vec<Task>) -> Result<ServiceMap> {
        let mut workers = JoinSet::new();
        for task in tasks {
            let client = Arc::clone(&self.client);
            let cluster = cluster.to_string();
            workers.spawn(async move { resolve_endpoint(client.as_ref(), &cluster, task).await });
        }

        let mut services = ServiceMap::new();
        let mut first_err = None;

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(resolved)) => {
                    services
                        .entry(resolved.task.service_name.clone())
                        .or_default()
                        .push(resolved);
                }
                Ok(Err(e)) => {
                    if first_err.is_none() {
                        first_err = Some(e);
                        workers.abort_all();
                    }
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    if first_err.is_none() {
                        first_err = Some(ElblessError::Remote(format!(
                            "resolver worker failed: {}",
                            e
                        )));
                        workers.abort_all();
                    }
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(services),
        }
    }
}

/// Resolve one task to the addresses of its host machine: the container
/// instance first, then the EC2 instance backing it.
async fn resolve_endpoint<C: ClusterClient>(
    client: &C,
    cluster: &str,
    task: Task,
) -> Result<ResolvedService> {
    let instance_id = fetch_machine_id(client, cluster, &task).await?;
    let endpoint = fetch_endpoint(client, &task, &instance_id).await?;

    Ok(ResolvedService { task, endpoint })
}

async fn fetch_machine_id<C: ClusterClient>(
    client: &C,
    cluster: &str,
    task: &Task,
) -> Result<String> {
    let instances = client
        .describe_container_instance(cluster, &task.container_instance_id)
        .await
        .map_err(|e| resolution(&task.task_id, &e.to_string()))?;

    instances
        .first()
        .and_then(|instance| instance.ec2_instance_id.clone())
        .ok_or_else(|| {
            resolution(
                &task.task_id,
                &format!(
                    "container instance {} has no EC2 instance",
                    task.container_instance_id
                ),
            )
        })
}

async fn fetch_endpoint<C: ClusterClient>(
    client: &C,
    task: &Task,
    instance_id: &str,
) -> Result<MachineEndpoint> {
    let described = client
        .describe_instance(instance_id)
        .await
        .map_err(|e| resolution(&task.task_id, &e.to_string()))?;

    let Some(instance) = described.into_iter().next() else {
        return Err(resolution(
            &task.task_id,
            &format!("EC2 instance {} not found", instance_id),
        ));
    };

    Ok(MachineEndpoint {
        private_ip: instance.private_ip.unwrap_or_default(),
        public_ip: instance.public_ip.unwrap_or_default(),
        private_dns_name: instance.private_dns_name.unwrap_or_default(),
        public_dns_name: instance.public_dns_name.unwrap_or_default(),
    })
}

fn build_task(
    task_id: &str,
    service_name: String,
    primary: &ContainerDescription,
    container_instance_arn: Option<&str>,
) -> Result<Task> {
    // A matched container without a host port is an error condition, not a
    // silent zero.
    let host_port = primary
        .network_bindings
        .first()
        .and_then(|binding| binding.host_port)
        .ok_or_else(|| malformed(task_id, "primary container has no host port binding"))?;

    let container_instance_arn =
        container_instance_arn.ok_or_else(|| malformed(task_id, "task has no container instance"))?;

    Ok(Task {
        service_name,
        container_id: raw_id(&primary.container_arn).to_string(),
        container_instance_id: raw_id(container_instance_arn).to_string(),
        task_id: task_id.to_string(),
        host_port,
    })
}

/// Last path segment of a fully qualified ARN:
/// `arn:aws:ecs:…:task/166c6aa6-…` → `166c6aa6-…`.
fn raw_id(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}

fn malformed(task_id: &str, reason: &str) -> ElblessError {
    ElblessError::MalformedTask {
        task_id: task_id.to_string(),
        reason: reason.to_string(),
    }
}

fn resolution(task_id: &str, reason: &str) -> ElblessError {
    ElblessError::Resolution {
        task_id: task_id.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::NetworkBinding;

    #[test]
    fn test_raw_id_strips_arn_prefix() {
        assert_eq!(
            raw_id("arn:aws:ecs:eu-west-1:658452139221:task/166c6aa6-13d2-4f77-b176-3d5a33c1ae3a"),
            "166c6aa6-13d2-4f77-b176-3d5a33c1ae3a"
        );
    }

    #[test]
    fn test_raw_id_passes_plain_ids_through() {
        assert_eq!(raw_id("166c6aa6"), "166c6aa6");
    }

    #[test]
    fn test_build_task_takes_first_binding() {
        let primary = ContainerDescription {
            name: "Web-Api".to_string(),
            container_arn: "arn:aws:ecs:eu-west-1:1:container/c-1".to_string(),
            network_bindings: vec![
                NetworkBinding {
                    container_port: Some(80),
                    host_port: Some(32768),
                },
                NetworkBinding {
                    container_port: Some(443),
                    host_port: Some(32769),
                },
            ],
        };

        let task = build_task(
            "t-1",
            "web-api".to_string(),
            &primary,
            Some("arn:aws:ecs:eu-west-1:1:container-instance/ci-1"),
        )
        .expect("task should build");

        assert_eq!(task.service_name, "web-api");
        assert_eq!(task.container_id, "c-1");
        assert_eq!(task.container_instance_id, "ci-1");
        assert_eq!(task.host_port, 32768);
    }

    #[test]
    fn test_build_task_requires_a_host_port() {
        let primary = ContainerDescription {
            name: "web".to_string(),
            container_arn: "arn:aws:ecs:eu-west-1:1:container/c-1".to_string(),
            network_bindings: vec![],
        };

        let err = build_task(
            "t-1",
            "web".to_string(),
            &primary,
            Some("arn:aws:ecs:eu-west-1:1:container-instance/ci-1"),
        )
        .unwrap_err();

        assert!(matches!(err, ElblessError::MalformedTask { .. }));
    }
}
