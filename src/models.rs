// src/models.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An embedded image resolved to an absolute URL, with its caption if one was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub image_url: String,
    pub caption: Option<String>,
}

/// One unit of content harvested from a single sibling of a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub images: Option<Vec<ImageRef>>,
    pub text: String,
}

impl ContentBlock {
    pub fn is_empty(&self) -> bool {
        self.images.is_none() && self.text.is_empty()
    }
}

/// A label paired with the run of content blocks that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledContent {
    pub label: String,
    pub content: Option<Vec<ContentBlock>>,
}

/// Image entry recorded by the accumulation walk. Serializes as
/// `{"type": "image", "src": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "image")]
pub struct ImageMarker {
    pub src: Option<String>,
}

/// Value stored under a label by the accumulation walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    Text(String),
    Images(Vec<ImageMarker>),
}

impl LabelValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LabelValue::Text(text) => Some(text),
            LabelValue::Images(_) => None,
        }
    }

    pub fn as_images(&self) -> Option<&[ImageMarker]> {
        match self {
            LabelValue::Images(images) => Some(images),
            LabelValue::Text(_) => None,
        }
    }
}

/// Keyed output of the accumulation walk, in first-seen label order.
///
/// Labels live under `entries` so page text can never collide with the
/// record's own keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccumulatedContent {
    pub entries: IndexMap<String, LabelValue>,
    /// Images met before any label was seen; never keyed under a placeholder label.
    pub unlabeled_images: Vec<ImageMarker>,
    /// Outer HTML of every label element in the walked sections, at any depth.
    pub labels: Vec<String>,
    /// Outer HTML of every image element in the walked sections, at any depth.
    pub images: Vec<String>,
}

impl AccumulatedContent {
    pub fn get(&self, label: &str) -> Option<&LabelValue> {
        self.entries.get(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.unlabeled_images.is_empty()
    }
}

/// Result of extracting one page, in the shape produced by the chosen strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractionRecord {
    Sequence(Vec<LabeledContent>),
    Map(AccumulatedContent),
}

impl ExtractionRecord {
    pub fn label_count(&self) -> usize {
        match self {
            ExtractionRecord::Sequence(items) => items.len(),
            ExtractionRecord::Map(map) => map.len(),
        }
    }

    pub fn image_count(&self) -> usize {
        match self {
            ExtractionRecord::Sequence(items) => items
                .iter()
                .filter_map(|item| item.content.as_ref())
                .flatten()
                .filter_map(|block| block.images.as_ref())
                .map(Vec::len)
                .sum(),
            ExtractionRecord::Map(map) => {
                let keyed: usize = map
                    .entries
                    .values()
                    .filter_map(LabelValue::as_images)
                    .map(<[ImageMarker]>::len)
                    .sum();
                keyed + map.unlabeled_images.len()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ExtractionRecord::Sequence(items) => items.is_empty(),
            ExtractionRecord::Map(map) => map.is_empty(),
        }
    }
}

/// A page's extraction plus the provenance the output sink records with it.
#[derive(Debug, Clone, Serialize)]
pub struct PageExtraction {
    pub source: String,
    pub url: String,
    pub extracted_at: String,
    pub record: ExtractionRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_form_serializes_label_values_by_shape() {
        let mut content = AccumulatedContent::default();
        content
            .entries
            .insert("Nitrogen".to_string(), LabelValue::Text("Yellow leaves".to_string()));
        content.entries.insert(
            "Iron".to_string(),
            LabelValue::Images(vec![ImageMarker { src: Some("/iron.jpg".to_string()) }]),
        );
        content.labels.push("<h2>Nitrogen</h2>".to_string());

        let json = serde_json::to_value(ExtractionRecord::Map(content)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "entries": {
                    "Nitrogen": "Yellow leaves",
                    "Iron": [{"type": "image", "src": "/iron.jpg"}],
                },
                "unlabeled_images": [],
                "labels": ["<h2>Nitrogen</h2>"],
                "images": [],
            })
        );
    }

    #[test]
    fn test_label_named_like_a_record_field_keeps_its_text() {
        let mut content = AccumulatedContent::default();
        content.entries.insert(
            "unlabeled_images".to_string(),
            LabelValue::Text("real label text".to_string()),
        );
        content.unlabeled_images.push(ImageMarker { src: Some("/hero.jpg".to_string()) });

        let raw = serde_json::to_string(&ExtractionRecord::Map(content)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["entries"]["unlabeled_images"], "real label text");
        assert_eq!(
            json["unlabeled_images"],
            serde_json::json!([{"type": "image", "src": "/hero.jpg"}])
        );
    }

    #[test]
    fn test_sequence_form_keeps_absent_fields_as_null() {
        let record = ExtractionRecord::Sequence(vec![LabeledContent {
            label: "Calcium".to_string(),
            content: None,
        }]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!([{"label": "Calcium", "content": null}]));
    }

    #[test]
    fn test_image_count_covers_both_forms() {
        let image = ImageRef {
            image_url: "https://example.com/a.png".to_string(),
            caption: None,
        };
        let sequence = ExtractionRecord::Sequence(vec![LabeledContent {
            label: "A".to_string(),
            content: Some(vec![
                ContentBlock { images: Some(vec![image.clone(), image]), text: String::new() },
                ContentBlock { images: None, text: "text".to_string() },
            ]),
        }]);
        assert_eq!(sequence.image_count(), 2);
        assert_eq!(sequence.label_count(), 1);

        let map = ExtractionRecord::Map(AccumulatedContent {
            entries: IndexMap::from([(
                "B".to_string(),
                LabelValue::Images(vec![ImageMarker { src: None }]),
            )]),
            unlabeled_images: vec![ImageMarker { src: Some("x.png".to_string()) }],
            ..AccumulatedContent::default()
        });
        assert_eq!(map.image_count(), 2);
        assert_eq!(map.label_count(), 1);
    }
}
