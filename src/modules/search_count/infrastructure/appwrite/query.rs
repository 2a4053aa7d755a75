use serde_json::{json, Value};

/// Appwrite list query, sent as a JSON encoded `queries[]` parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, values: Vec<Value> },
    OrderDesc(String),
    OrderAsc(String),
    Limit(usize),
}

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Query::Equal {
            attribute: attribute.to_string(),
            values: vec![value.into()],
        }
    }

    pub fn order_desc(attribute: &str) -> Self {
        Query::OrderDesc(attribute.to_string())
    }

    pub fn order_asc(attribute: &str) -> Self {
        Query::OrderAsc(attribute.to_string())
    }

    pub fn limit(limit: usize) -> Self {
        Query::Limit(limit)
    }

    pub fn to_value(&self) -> Value {
        match self {
            Query::Equal { attribute, values } => {
                json!({"method": "equal", "attribute": attribute, "values": values})
            }
            Query::OrderDesc(attribute) => json!({"method": "orderDesc", "attribute": attribute}),
            Query::OrderAsc(attribute) => json!({"method": "orderAsc", "attribute": attribute}),
            Query::Limit(limit) => json!({"method": "limit", "values": [limit]}),
        }
    }

    /// Request parameters for a list call
    pub fn to_params(queries: &[Query]) -> Vec<(&'static str, String)> {
        queries
            .iter()
            .map(|q| ("queries[]", q.to_value().to_string()))
            .collect()
    }
}
