use serde::{Deserialize, Serialize};

/// A catalog set record as returned by the upstream catalog API.
///
/// Fetched fresh for every request and owned by the call that fetched it;
/// nothing in the system caches or mutates these snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub set_num: String,
    pub name: String,
    pub year: i32,
    pub num_parts: u32,
    #[serde(default)]
    pub theme_id: Option<u32>,
    #[serde(default)]
    pub set_img_url: Option<String>,
}

/// One part entry of a set's inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartListing {
    pub quantity: u32,
    pub part: PartRef,
    pub color: ColorRef,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartRef {
    pub part_num: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorRef {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: u32,
    #[serde(default)]
    pub parent_id: Option<u32>,
    pub name: String,
}

/// Structured summary attached to a chat response when a set was resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSummary {
    pub set_num: String,
    pub name: String,
    pub num_parts: u32,
    pub year: i32,
}

impl From<&CatalogItem> for SetSummary {
    fn from(item: &CatalogItem) -> Self {
        Self {
            set_num: item.set_num.clone(),
            name: item.name.clone(),
            num_parts: item.num_parts,
            year: item.year,
        }
    }
}

/// The single response produced for a chat query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_info: Option<SetSummary>,
}

impl ChatResult {
    pub fn message(response: impl Into<String>) -> Self {
        Self { response: response.into(), context: None, set_info: None }
    }
}

/// The attribute subset needed to price a set. Derived from a
/// [`CatalogItem`] and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimationContext {
    pub num_parts: u32,
    pub year: i32,
    pub theme_id: Option<u32>,
}

impl From<&CatalogItem> for EstimationContext {
    fn from(item: &CatalogItem) -> Self {
        Self { num_parts: item.num_parts, year: item.year, theme_id: item.theme_id }
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogItem, ChatResult, EstimationContext, SetSummary};

    fn falcon() -> CatalogItem {
        CatalogItem {
            set_num: "75192-1".to_string(),
            name: "Millennium Falcon".to_string(),
            year: 2017,
            num_parts: 7541,
            theme_id: Some(158),
            set_img_url: None,
        }
    }

    #[test]
    fn estimation_context_carries_pricing_attributes() {
        let context = EstimationContext::from(&falcon());
        assert_eq!(context.num_parts, 7541);
        assert_eq!(context.year, 2017);
        assert_eq!(context.theme_id, Some(158));
    }

    #[test]
    fn set_summary_mirrors_catalog_item() {
        let summary = SetSummary::from(&falcon());
        assert_eq!(summary.set_num, "75192-1");
        assert_eq!(summary.name, "Millennium Falcon");
    }

    #[test]
    fn chat_result_omits_absent_optional_fields() {
        let encoded = serde_json::to_string(&ChatResult::message("hello")).expect("serialize");
        assert!(!encoded.contains("context"));
        assert!(!encoded.contains("set_info"));
    }

    #[test]
    fn catalog_item_decodes_upstream_payload() {
        let item: CatalogItem = serde_json::from_str(
            r#"{
                "set_num": "10179-1",
                "name": "Ultimate Collector's Millennium Falcon",
                "year": 2007,
                "num_parts": 5195,
                "theme_id": 171,
                "set_img_url": "https://cdn.rebrickable.com/media/sets/10179-1.jpg",
                "last_modified_dt": "2022-01-01T00:00:00Z"
            }"#,
        )
        .expect("decode");
        assert_eq!(item.set_num, "10179-1");
        assert_eq!(item.num_parts, 5195);
    }
}
