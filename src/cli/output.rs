use indexmap::IndexMap;
use serde::Serialize;

use crate::model::route::RouteState;
use crate::ops::nav::Step;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct IdListJson {
    pub key: String,
    pub count: usize,
    pub ids: Vec<String>,
}

#[derive(Serialize)]
pub struct StepJson {
    pub id: Option<String>,
    pub outcome: &'static str,
}

#[derive(Serialize)]
pub struct RouteJson {
    pub url: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub task_id: String,
    pub is_audit: bool,
    pub is_preview: bool,
    pub query: IndexMap<String, String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn step_to_json(step: &Step) -> StepJson {
    StepJson {
        id: step.id().map(|s| s.to_string()),
        outcome: match step {
            Step::To(_) => "moved",
            Step::Boundary => "boundary",
            Step::Empty => "empty",
        },
    }
}

pub fn route_to_json(route: &RouteState) -> RouteJson {
    RouteJson {
        url: route.to_url(),
        task_type: route.task_type.as_str().to_string(),
        task_id: route.task_id.clone(),
        is_audit: route.is_audit(),
        is_preview: route.is_preview(),
        query: route
            .query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Plain-text rendering of a route, one field per line
pub fn print_route(route: &RouteState) {
    println!("url:        {}", route.to_url());
    println!("type:       {}", route.task_type.as_str());
    println!("task id:    {}", route.task_id);
    println!("audit:      {}", route.is_audit());
    println!("preview:    {}", route.is_preview());
    for (key, value) in route.query.iter() {
        println!("  {} = {}", key, value);
    }
}
