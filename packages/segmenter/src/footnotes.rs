//! Separation of footnote records from body records.

use crate::types::Record;

/// Records split by their footnote flag, each side in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Records outside any footnote.
    pub body: Vec<Record>,

    /// Records labelled with a footnote.
    pub footnotes: Vec<Record>,
}

impl Partition {
    /// Split records by [`Record::footnote_flag`].
    #[must_use]
    pub fn split(records: Vec<Record>) -> Self {
        let (footnotes, body) = records.into_iter().partition(|r| r.footnote_flag);
        Self { body, footnotes }
    }

    /// Replace the body side, keeping the footnotes.
    #[must_use]
    pub fn map_body(self, f: impl FnOnce(Vec<Record>) -> Vec<Record>) -> Self {
        Self {
            body: f(self.body),
            ..self
        }
    }

    /// Body records followed by the footnote records.
    #[must_use]
    pub fn reattach(self) -> Vec<Record> {
        let mut records = self.body;
        records.extend(self.footnotes);
        records
    }
}
