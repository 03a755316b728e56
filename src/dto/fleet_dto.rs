use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Filtros del listado de flotas; `gps` acepta `yes`/`no` o `true`/`false`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetListQuery {
    pub q: Option<String>,
    pub depot_cd: Option<String>,
    #[serde(default, deserialize_with = "yes_no")]
    pub gps: Option<bool>,
}

fn yes_no<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("yes") | Some("true") | Some("1") => Some(true),
        Some("no") | Some("false") | Some("0") => Some(false),
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignDriverRequest {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDriverRequest {
    pub vehicle_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetOrderRequest {
    pub order_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncFleetsResponse {
    pub ok: bool,
    pub vehicles: u64,
    pub created: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gps_filter_accepts_yes_no() {
        let q: FleetListQuery = serde_json::from_str(r#"{"gps":"yes"}"#).unwrap();
        assert_eq!(q.gps, Some(true));
        let q: FleetListQuery = serde_json::from_str(r#"{"gps":"no"}"#).unwrap();
        assert_eq!(q.gps, Some(false));
        let q: FleetListQuery = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(q.gps, None);
    }
}
