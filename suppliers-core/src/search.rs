use serde::{de, Deserialize, Deserializer, Serialize};

use crate::supplier::Supplier;

/// Filters accepted by `GET /suppliers`. Every field is optional and an
/// empty string counts as absent; present filters are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_or_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SupplierQuery {
    /// Drops empty text filters.
    pub fn normalized(self) -> Self {
        Self {
            name: non_empty(self.name),
            category: non_empty(self.category),
            available: self.available,
            status: non_empty(self.status),
        }
    }

    pub fn is_empty(&self) -> bool {
        let q = self.clone().normalized();
        q.name.is_none() && q.category.is_none() && q.available.is_none() && q.status.is_none()
    }

    pub fn matches(&self, supplier: &Supplier) -> bool {
        let text = |filter: &Option<String>, value: &str| {
            filter.as_deref().map_or(true, |f| f.is_empty() || f == value)
        };

        text(&self.name, &supplier.name)
            && text(&self.category, &supplier.category)
            && self.available.map_or(true, |a| a == supplier.available)
            && text(&self.status, &supplier.status)
    }

    /// Query pairs in wire order: name, category, available, status.
    /// Only non-empty filters are emitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let q = self.clone().normalized();
        let mut pairs = Vec::new();
        if let Some(name) = q.name {
            pairs.push(("name", name));
        }
        if let Some(category) = q.category {
            pairs.push(("category", category));
        }
        if let Some(available) = q.available {
            pairs.push(("available", available.to_string()));
        }
        if let Some(status) = q.status {
            pairs.push(("status", status));
        }
        pairs
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Flag(bool),
    Text(String),
}

/// Query strings carry `available=` for a blank field; that means no filter.
fn blank_or_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawFlag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawFlag::Flag(flag)) => Ok(Some(flag)),
        Some(RawFlag::Text(text)) => match text.as_str() {
            "" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(de::Error::custom(format!(
                "available: '{}' is not 'true' or 'false'",
                other
            ))),
        },
    }
}
