use serde::{Deserialize, Serialize};

/// One task as returned by DescribeTasks, reduced to the fields the
/// pipeline reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescription {
    pub containers: Vec<ContainerDescription>,
    pub container_instance_arn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerDescription {
    pub name: String,
    pub container_arn: String,
    pub network_bindings: Vec<NetworkBinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkBinding {
    pub container_port: Option<u16>,
    pub host_port: Option<u16>,
}

/// One container instance as returned by DescribeContainerInstances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInstanceDescription {
    pub ec2_instance_id: Option<String>,
}

/// Network identity of an EC2 instance from DescribeInstances. Fields the
/// API omits (an instance without a public IP, say) stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceDescription {
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub private_dns_name: Option<String>,
    pub public_dns_name: Option<String>,
}
