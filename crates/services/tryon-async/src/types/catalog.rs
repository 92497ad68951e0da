use serde::{Deserialize, Serialize};

/// One selectable clothing item from `GET /api/clothing`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    /// Identifier sent back as `clothingId`
    pub id: String,
    /// Display name
    pub name: String,
    /// Preview image, usually server-relative (`/clothing_images/...`)
    pub image_url: String,
    /// Garment category (`full`, `upper`), when the server reports one
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
