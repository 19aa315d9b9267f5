use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_free: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub id: u32,
    pub title: String,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub resources: Vec<RoadmapResource>,
    pub milestone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub title: String,
    pub summary: String,
    pub total_duration: String,
    pub phases: Vec<RoadmapPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_resources: Option<Vec<FreeResource>>,
}
