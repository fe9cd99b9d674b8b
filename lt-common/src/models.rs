//! Data models for the Living Tags store
//!
//! Texts and tags are owned by the remote store: ids and timestamps are
//! assigned there, and TextTag rows are written by the external tagging
//! process. This codebase only ever creates Text rows and reads the
//! denormalized texts-with-tags projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A semantic tag. Immutable once created (no update path exists).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A short text snippet (joke/anecdote)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Association row linking one Text to one Tag, weighted by confidence
///
/// Confidence is expected in [0,1] but is not validated here; the external
/// tagging process owns that data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextTag {
    pub id: Uuid,
    pub text_id: Uuid,
    pub tag_id: Uuid,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

/// A tag as it appears on a specific text, carrying that edge's confidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagWithConfidence {
    pub id: Uuid,
    pub name: String,
    pub confidence: f64,
}

/// Read-side projection: a text together with its tags
///
/// Each entry in `tags` corresponds to exactly one TextTag row joining this
/// text to that tag; duplicate tags per text are not expected. Entry order is
/// whatever the store returned and is preserved through display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextWithTags {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<TagWithConfidence>,
}

/// Insert payload for a new text; the store assigns id and timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewText {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_with_tags_deserializes_store_shape() {
        let json = r#"{
            "id": "11111111-2222-3333-4444-555555555555",
            "content": "Колобок повесился.",
            "created_at": "2025-11-03T10:00:00Z",
            "updated_at": "2025-11-03T10:00:00Z",
            "tags": [
                {"id": "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee", "name": "юмор", "confidence": 0.92}
            ]
        }"#;

        let text: TextWithTags = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(text.content, "Колобок повесился.");
        assert_eq!(text.tags.len(), 1);
        assert_eq!(text.tags[0].name, "юмор");
        assert_eq!(text.tags[0].confidence, 0.92);
    }

    #[test]
    fn test_text_with_tags_missing_tags_defaults_empty() {
        // The projection may omit the tags array when nothing is tagged yet
        let json = r#"{
            "id": "11111111-2222-3333-4444-555555555555",
            "content": "untagged",
            "created_at": "2025-11-03T10:00:00Z",
            "updated_at": "2025-11-03T10:00:00Z"
        }"#;

        let text: TextWithTags = serde_json::from_str(json).expect("should deserialize");
        assert!(text.tags.is_empty());
    }

    #[test]
    fn test_new_text_serializes_content_only() {
        let payload = NewText {
            content: "hello".to_string(),
        };
        let json = serde_json::to_value(&payload).expect("should serialize");
        assert_eq!(json, serde_json::json!({"content": "hello"}));
    }
}
