use crate::classifier::ClassifyError;
use crate::models::ClassificationRecord;

/// Result of running one item through the classify-and-extract path
#[derive(Debug)]
pub enum ItemOutcome {
    Classified(ClassificationRecord),
    Failed { item: String, error: ClassifyError },
}

impl ItemOutcome {
    pub fn item(&self) -> &str {
        match self {
            ItemOutcome::Classified(record) => &record.item,
            ItemOutcome::Failed { item, .. } => item,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, ItemOutcome::Classified(_))
    }

    pub fn record(&self) -> Option<&ClassificationRecord> {
        match self {
            ItemOutcome::Classified(record) => Some(record),
            ItemOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ClassifyError> {
        match self {
            ItemOutcome::Classified(_) => None,
            ItemOutcome::Failed { error, .. } => Some(error),
        }
    }
}

/// Outcomes of a batch, in submission order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: ItemOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_classified()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ClassifyError)> {
        self.outcomes.iter().filter_map(|o| match o {
            ItemOutcome::Failed { item, error } => Some((item.as_str(), error)),
            ItemOutcome::Classified(_) => None,
        })
    }
}
