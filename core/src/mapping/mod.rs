//! Keyed label output
//!
//! Builds aggregation keys for the three scopes and collects resolved labels
//! into an insertion-ordered [`LabelMapping`].

mod key;
mod labels;

pub use key::aggregation_key;
pub use labels::{LabelEntry, LabelMapping};
