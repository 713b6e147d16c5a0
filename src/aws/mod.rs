pub mod client;
pub mod types;

pub use client::{AwsClient, ClusterClient};
pub use types::{
    ContainerDescription, ContainerInstanceDescription, InstanceDescription, NetworkBinding,
    TaskDescription,
};
