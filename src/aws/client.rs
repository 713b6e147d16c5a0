use crate::aws::types::{
    ContainerDescription, ContainerInstanceDescription, InstanceDescription, NetworkBinding,
    TaskDescription,
};
use crate::{ElblessError, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use tracing::{debug, info};

/// Narrow view of the ECS/EC2 control plane consumed by the discovery
/// pipeline. Every method is a single remote call: no paging, no retries.
#[async_trait]
pub trait ClusterClient: Send + Sync + 'static {
    /// List the ARNs of all tasks running in a cluster.
    async fn list_tasks(&self, cluster: &str) -> Result<Vec<String>>;

    /// Describe a single task by its raw (unqualified) ID.
    async fn describe_task(&self, cluster: &str, task_id: &str) -> Result<Vec<TaskDescription>>;

    /// Describe a container instance by its raw ID.
    async fn describe_container_instance(
        &self,
        cluster: &str,
        container_instance_id: &str,
    ) -> Result<Vec<ContainerInstanceDescription>>;

    /// Describe an EC2 instance by its instance ID.
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<InstanceDescription>>;
}

/// ECS/EC2-backed implementation of [`ClusterClient`]. The region is fixed
/// at construction.
pub struct AwsClient {
    ecs: aws_sdk_ecs::Client,
    ec2: aws_sdk_ec2::Client,
}

impl AwsClient {
    pub async fn new(region: &str) -> Self {
        debug!("Initializing AWS clients for region {}", region);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        info!("AWS clients ready ({})", region);

        Self {
            ecs: aws_sdk_ecs::Client::new(&config),
            ec2: aws_sdk_ec2::Client::new(&config),
        }
    }
}

#[async_trait]
impl ClusterClient for AwsClient {
    async fn list_tasks(&self, cluster: &str) -> Result<Vec<String>> {
        let output = self
            .ecs
            .list_tasks()
            .cluster(cluster)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_cluster_not_found_exception() {
                    ElblessError::ClusterNotFound(cluster.to_string())
                } else {
                    ElblessError::Remote(format!("ListTasks failed: {}", err))
                }
            })?;

        Ok(output.task_arns().to_vec())
    }

    async fn describe_task(&self, cluster: &str, task_id: &str) -> Result<Vec<TaskDescription>> {
        let output = self
            .ecs
            .describe_tasks()
            .cluster(cluster)
            .tasks(task_id)
            .send()
            .await
            .map_err(|e| {
                ElblessError::Remote(format!(
                    "DescribeTasks failed for {}: {}",
                    task_id,
                    e.into_service_error()
                ))
            })?;

        Ok(output
            .tasks()
            .iter()
            .map(|task| TaskDescription {
                containers: task
                    .containers()
                    .iter()
                    .map(|container| ContainerDescription {
                        name: container.name().unwrap_or_default().to_string(),
                        container_arn: container.container_arn().unwrap_or_default().to_string(),
                        network_bindings: container
                            .network_bindings()
                            .iter()
                            .map(|binding| NetworkBinding {
                                container_port: binding
                                    .container_port()
                                    .and_then(|port| u16::try_from(port).ok()),
                                host_port: binding
                                    .host_port()
                                    .and_then(|port| u16::try_from(port).ok()),
                            })
                            .collect(),
                    })
                    .collect(),
                container_instance_arn: task.container_instance_arn().map(str::to_string),
            })
            .collect())
    }

    async fn describe_container_instance(
        &self,
        cluster: &str,
        container_instance_id: &str,
    ) -> Result<Vec<ContainerInstanceDescription>> {
        let output = self
            .ecs
            .describe_container_instances()
            .cluster(cluster)
            .container_instances(container_instance_id)
            .send()
            .await
            .map_err(|e| {
                ElblessError::Remote(format!(
                    "DescribeContainerInstances failed for {}: {}",
                    container_instance_id,
                    e.into_service_error()
                ))
            })?;

        Ok(output
            .container_instances()
            .iter()
            .map(|instance| ContainerInstanceDescription {
                ec2_instance_id: instance.ec2_instance_id().map(str::to_string),
            })
            .collect())
    }

    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<InstanceDescription>> {
        let output = self
            .ec2
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| {
                ElblessError::Remote(format!(
                    "DescribeInstances failed for {}: {}",
                    instance_id,
                    e.into_service_error()
                ))
            })?;

        Ok(output
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .map(|instance| InstanceDescription {
                private_ip: instance.private_ip_address().map(str::to_string),
                public_ip: instance.public_ip_address().map(str::to_string),
                private_dns_name: instance.private_dns_name().map(str::to_string),
                public_dns_name: instance.public_dns_name().map(str::to_string),
            })
            .collect())
    }
}
