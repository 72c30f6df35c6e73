use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

// ---------------------------------------------------------------------------
// Category: one entry of the upstream categories response
// ---------------------------------------------------------------------------

/// A coin category as returned by the categories endpoint.
///
/// Only the fields the tracker stores are kept; everything else in the
/// response (`id`, `content`, `top_3_coins`, ...) is ignored. The numeric
/// fields must be present but may be `null`, which the API reports for
/// categories it does not track closely. Figures keep the exact number text
/// they were received with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(deserialize_with = "present_nullable")]
    pub market_cap: Option<Number>,
    #[serde(deserialize_with = "present_nullable")]
    pub market_cap_change_24h: Option<Number>,
}

/// Deserialize an `Option<Number>` without serde's missing-field-means-`None`
/// leniency: the key has to be there, only its value may be `null`.
fn present_nullable<'de, D>(deserializer: D) -> std::result::Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)
}
