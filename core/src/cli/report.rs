use crate::mapping::LabelMapping;
use crate::types::{AggregationOptions, Label};
use std::fmt;

/// Text summary of a label mapping
pub struct TextReport<'a> {
    mapping: &'a LabelMapping,
    options: &'a AggregationOptions,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(mapping: &'a LabelMapping, options: &'a AggregationOptions) -> Self {
        Self { mapping, options }
    }

    fn count(&self, label: Label) -> usize {
        self.mapping
            .iter()
            .flat_map(|(_, entry)| entry.truth.iter())
            .filter(|&&l| l == label)
            .count()
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ground Truth Labels")?;
        writeln!(f, "===================")?;
        writeln!(f)?;
        writeln!(f, "Ground truth:   {}", self.options.policy)?;
        writeln!(f, "Scope:          {}", self.options.scope)?;
        writeln!(f, "DBT only:       {}", self.options.dbt_only)?;
        writeln!(f, "MRI excluded:   {}", self.options.mri_excluded)?;
        writeln!(f)?;
        writeln!(f, "Keys:           {}", self.mapping.len())?;
        writeln!(f, "Volumes:        {}", self.mapping.volume_count())?;
        writeln!(f, "Benign:         {}", self.count(Label::Benign))?;
        writeln!(f, "Malignant:      {}", self.count(Label::Malignant))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroundTruthPolicy, Scope};

    #[test]
    fn test_text_report_format() {
        let mut mapping = LabelMapping::new();
        mapping.push("1001_20190101", "1.1", Label::Malignant);
        mapping.push("1001_20190101", "1.2", Label::Benign);
        mapping.push("1002_20190101", "2.1", Label::Benign);

        let options = AggregationOptions::default()
            .with_policy(GroundTruthPolicy::Acr4Plus)
            .with_scope(Scope::PatientWise);
        let output = format!("{}", TextReport::new(&mapping, &options));

        assert!(output.contains("Ground truth:   acr4+"));
        assert!(output.contains("Scope:          patient-wise"));
        assert!(output.contains("Keys:           2"));
        assert!(output.contains("Volumes:        3"));
        assert!(output.contains("Benign:         2"));
        assert!(output.contains("Malignant:      1"));
    }
}
