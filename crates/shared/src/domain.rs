use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

macro_rules! descriptor {
    ($name:literal, $kind:ident) => {
        FieldDescriptor {
            name: $name,
            kind: FieldKind::$kind,
        }
    };
}

/// Prediction request schema, in the order the form presents it.
pub static FIELDS: [FieldDescriptor; 11] = [
    descriptor!("channel_name", Text),
    descriptor!("category", Text),
    descriptor!("Sub-category", Text),
    descriptor!("Item_price", Numeric),
    descriptor!("connected_handling_time", Numeric),
    descriptor!("response_delay", Numeric),
    descriptor!("survey_delay", Numeric),
    descriptor!("sentiment_score", Numeric),
    descriptor!("Agent_name", Text),
    descriptor!("Agent Shift", Text),
    descriptor!("Tenure Bucket", Text),
];

pub fn field_index(name: &str) -> Option<usize> {
    FIELDS.iter().position(|field| field.name == name)
}
