use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Format of [`ClassificationRecord::timestamp`]
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The six labeled lines requested from the model, in reply order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Category,
    Bin,
    Recyclable,
    Instruction,
    Tip,
    Confidence,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Category,
        Field::Bin,
        Field::Recyclable,
        Field::Instruction,
        Field::Tip,
        Field::Confidence,
    ];

    /// Label as it appears before the colon in a reply line
    pub fn label(self) -> &'static str {
        match self {
            Field::Category => "Category",
            Field::Bin => "Bin",
            Field::Recyclable => "Recyclable",
            Field::Instruction => "Instruction",
            Field::Tip => "Tip",
            Field::Confidence => "Confidence",
        }
    }
}

/// Values extracted from a reply; absent labels stay empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyFields {
    pub category: String,
    pub bin: String,
    pub recyclable: String,
    pub instruction: String,
    pub tip: String,
    pub confidence: String,
}

impl ReplyFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Category => &self.category,
            Field::Bin => &self.bin,
            Field::Recyclable => &self.recyclable,
            Field::Instruction => &self.instruction,
            Field::Tip => &self.tip,
            Field::Confidence => &self.confidence,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Category => &mut self.category,
            Field::Bin => &mut self.bin,
            Field::Recyclable => &mut self.recyclable,
            Field::Instruction => &mut self.instruction,
            Field::Tip => &mut self.tip,
            Field::Confidence => &mut self.confidence,
        };
        *slot = value;
    }

    /// Labels that produced no value
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| self.get(*f).is_empty()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub item: String,
    #[serde(flatten)]
    pub fields: ReplyFields,
    pub timestamp: String,
    pub raw_output: String,
}

impl ClassificationRecord {
    pub fn new(
        item: impl Into<String>,
        fields: ReplyFields,
        captured_at: DateTime<Local>,
        raw_output: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            fields,
            timestamp: captured_at.format(TIMESTAMP_FORMAT).to_string(),
            raw_output: raw_output.into(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn category(&self) -> &str {
        &self.fields.category
    }
}
