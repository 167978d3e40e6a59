//! Line rules, one per line role.

mod body;
mod footnote;
mod heading;
mod marker;

pub use body::BodyRule;
pub use footnote::{FootnoteRule, OrphanFootnoteRule};
pub use heading::{SectionRule, SubHeadingRule, SubSubHeadingRule, TitleRule};
pub use marker::PlainMarkerRule;
