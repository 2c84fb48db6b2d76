pub mod classifier;

pub use classifier::{ClassificationRule, LineClassifier};
