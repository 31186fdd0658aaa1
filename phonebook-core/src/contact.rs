//! Contact records shared by the server and the CLI client.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A persisted phone-book entry.
///
/// `id` is assigned by the storage layer on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Payload for creating a contact.
///
/// Both fields are required strings; neither is checked for emptiness or format.
/// Only a JSON object is accepted, never a positional array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

impl<'de> Deserialize<'de> for NewContact {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NewContactVisitor)
    }
}

struct NewContactVisitor;

impl<'de> Visitor<'de> for NewContactVisitor {
    type Value = NewContact;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with string fields `name` and `phone`")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut name: Option<String> = None;
        let mut phone: Option<String> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(de::Error::duplicate_field("name"));
                    }
                    name = Some(map.next_value()?);
                }
                "phone" => {
                    if phone.is_some() {
                        return Err(de::Error::duplicate_field("phone"));
                    }
                    phone = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(NewContact {
            name: name.ok_or_else(|| de::Error::missing_field("name"))?,
            phone: phone.ok_or_else(|| de::Error::missing_field("phone"))?,
        })
    }
}
