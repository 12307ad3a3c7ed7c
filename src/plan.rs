use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::dish::Dish;

/// Interchange/plan document marker.
pub const PLAN_KIND: &str = "hotdish-plan";
pub const PLAN_VERSION: u32 = 1;

/// A named, saved snapshot of serve time + dish list. Saved dishes carry no
/// id and no derived fields; name uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub data: PlanData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanData {
    pub serve_time: String,
    pub dishes: Vec<PlanDish>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDish {
    pub name: String,
    pub prep_minutes: u32,
    pub cook_minutes: u32,
}

impl Plan {
    pub fn new(name: impl Into<String>, data: PlanData, created_at: DateTime<Local>) -> Self {
        Self {
            id: format!("plan-{}", created_at.timestamp_millis()),
            name: name.into(),
            data,
        }
    }
}

impl PlanData {
    /// Snapshot the current inputs: minimal reconstructable fields only,
    /// dropping dishes with a blank name or no durations at all.
    pub fn from_dishes(serve_time: &str, dishes: &[Dish]) -> Self {
        Self {
            serve_time: serve_time.to_string(),
            dishes: dishes
                .iter()
                .map(|d| PlanDish {
                    name: d.name.clone(),
                    prep_minutes: d.prep_minutes,
                    cook_minutes: d.cook_minutes,
                })
                .filter(usable_dish)
                .collect(),
        }
    }

    /// Reconstruct a working dish list, assigning fresh ids.
    pub fn to_dishes(&self) -> Vec<Dish> {
        self.dishes
            .iter()
            .enumerate()
            .map(|(i, d)| {
                Dish::new(
                    format!("d{}", i + 1),
                    d.name.clone(),
                    d.prep_minutes,
                    d.cook_minutes,
                )
            })
            .collect()
    }
}

fn usable_dish(d: &PlanDish) -> bool {
    !d.name.trim().is_empty() && (d.prep_minutes > 0 || d.cook_minutes > 0)
}

/// Build the portable, read-only interchange payload.
pub fn build_payload(data: &PlanData) -> Value {
    json!({
        "kind": PLAN_KIND,
        "version": PLAN_VERSION,
        "explain": "Read-only HotDish plan JSON. (Paste via `hotdish import`.)",
        "data": {
            "serveTime": data.serve_time,
            "dishes": data.dishes.iter().map(|d| json!({
                "name": d.name,
                "prepMinutes": d.prep_minutes,
                "cookMinutes": d.cook_minutes,
            })).collect::<Vec<Value>>(),
        },
    })
}

/// The shareable message: a short how-to framing around the payload, meant
/// to survive being pasted through chat apps and back into `import`.
pub fn build_share_message(data: &PlanData) -> String {
    [
        "HotDish — Plan (read-only)".to_string(),
        "To import: run `hotdish import` and paste this whole message.".to_string(),
        String::new(),
        build_payload(data).to_string(),
    ]
    .join("\n")
}

/// Extract and validate a plan from arbitrary text (a bare payload, or one
/// embedded in prose/code fences). Returns `None` on anything that is not a
/// valid plan document; never fails.
pub fn parse_plan_from_text(text: &str) -> Option<PlanData> {
    let span = brace_span(text)?;
    let parsed: Value = serde_json::from_str(span).ok()?;

    if parsed.get("kind").and_then(Value::as_str) != Some(PLAN_KIND) {
        return None;
    }
    let data = parsed.get("data")?.as_object()?;

    let serve_time = data
        .get("serveTime")
        .and_then(Value::as_str)
        .unwrap_or("18:00")
        .to_string();

    let dishes = data
        .get("dishes")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| PlanDish {
                    name: item
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    prep_minutes: coerce_minutes(item.get("prepMinutes")),
                    cook_minutes: coerce_minutes(item.get("cookMinutes")),
                })
                .filter(usable_dish)
                .collect()
        })
        .unwrap_or_default();

    Some(PlanData { serve_time, dishes })
}

/// First-`{` to last-`}` span, the way share messages embed the payload.
fn brace_span(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    (last > first).then(|| &text[first..=last])
}

/// Minutes fields arrive as numbers or numeric strings; anything else is 0,
/// and values beyond `u32` saturate rather than wrap.
fn coerce_minutes(value: Option<&Value>) -> u32 {
    let wide = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    wide.map(|minutes| u32::try_from(minutes).unwrap_or(u32::MAX))
        .unwrap_or(0)
}
