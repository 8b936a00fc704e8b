//! Response models for the search backend's REST API.

use serde::{Deserialize, Serialize};

/// Root endpoint (`GET /`) response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClusterInfo {
    /// Name of the node that answered.
    #[serde(default)]
    pub name: Option<String>,
    pub cluster_name: String,
    #[serde(default)]
    pub cluster_uuid: Option<String>,
    #[serde(default)]
    pub version: Option<VersionInfo>,
}

/// Version block of [`ClusterInfo`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub number: String,
    #[serde(default)]
    pub distribution: Option<String>,
}
