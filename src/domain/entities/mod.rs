use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

pub mod dates;
pub mod education;
pub mod experience;
pub mod skill;

/// How an edit view sends a modified record back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMethod {
    /// `PUT {path}/{id}`
    Put,
    /// `POST {path}`, the backend upserts by content.
    Post,
}

/// A resume section the backend exposes as a REST collection.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection path below the backend base URL, e.g. `/resume/skill`.
    const PATH: &'static str;
    /// Singular, lowercase name used in messages.
    const NAME: &'static str;
    /// Plural name used in headings and placeholders.
    const PLURAL: &'static str;
    const EDIT_METHOD: EditMethod = EditMethod::Put;
}

/// A record as the backend returns it: its fields plus the id it assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<R> {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: R,
}

/// Backend ids may be strings or integers; both are carried as text.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
