use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use wordwise_types::{Example, LookupResult};

/// Body of `POST {base}/translate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupRequest {
    #[serde(rename = "english_word")]
    pub word: String,
    /// Display name, not the language code
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupResponse {
    pub english_word: String,
    pub translation: String,
    pub target_language: String,
    pub meaning: String,
    #[serde(deserialize_with = "ordered_examples")]
    pub examples: Vec<Example>,
}

impl From<LookupResponse> for LookupResult {
    fn from(response: LookupResponse) -> Self {
        LookupResult {
            source_word: response.english_word,
            translation: response.translation,
            target_language_name: response.target_language,
            meaning: response.meaning,
            examples: response.examples,
        }
    }
}

/// Accepts `{ "<id>": "<text>", ... }` in document order, or an explicit
/// list of `{ "id", "text" }` objects / bare strings.
fn ordered_examples<'de, D>(deserializer: D) -> Result<Vec<Example>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ExamplesVisitor;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListItem {
        Pair { id: String, text: String },
        Text(String),
    }

    impl<'de> Visitor<'de> for ExamplesVisitor {
        type Value = Vec<Example>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of example id to text, or a list of examples")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut examples = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, text)) = map.next_entry::<String, String>()? {
                examples.push(Example { id, text });
            }
            Ok(examples)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut examples = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element::<ListItem>()? {
                let example = match item {
                    ListItem::Pair { id, text } => Example { id, text },
                    ListItem::Text(text) => Example {
                        id: (examples.len() + 1).to_string(),
                        text,
                    },
                };
                examples.push(example);
            }
            Ok(examples)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(ExamplesVisitor)
}
