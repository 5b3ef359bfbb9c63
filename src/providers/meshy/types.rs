//! Meshy wire types

use serde::Deserialize;

/// Job creation response; `result` is the vendor's task identifier
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskResponse {
    pub result: String,
}

/// Task status response
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatusResponse {
    pub status: String,
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub model_urls: Option<TaskModelUrls>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskModelUrls {
    #[serde(default)]
    pub glb: Option<String>,
    #[serde(default)]
    pub fbx: Option<String>,
}
