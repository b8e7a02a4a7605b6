use crate::convert::ConversionReport;
use std::fmt;

/// Text summary formatter for a conversion run
pub struct ConversionSummary<'a> {
    report: &'a ConversionReport,
}

impl<'a> ConversionSummary<'a> {
    /// Creates a new summary
    pub fn new(report: &'a ConversionReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for ConversionSummary<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion Summary")?;
        writeln!(f, "==================")?;
        writeln!(f)?;
        writeln!(f, "Converted: {}", self.report.converted.len())?;
        writeln!(f, "Failed:    {}", self.report.failed.len())?;

        if !self.report.failed.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed patients")?;
            writeln!(f, "---------------")?;
            for (id, error) in &self.report.failed {
                writeln!(f, "{}: {}", id, error)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BratsError;

    #[test]
    fn summary_lists_counts_and_failed_ids() {
        let report = ConversionReport {
            converted: vec!["patient_00".to_string(), "patient_01".to_string()],
            failed: vec![(
                "patient_02".to_string(),
                BratsError::Nifti("unreadable volume".to_string()),
            )],
        };

        let output = format!("{}", ConversionSummary::new(&report));

        assert!(output.contains("Converted: 2"));
        assert!(output.contains("Failed:    1"));
        assert!(output.contains("patient_02: NIfTI error: unreadable volume"));
    }

    #[test]
    fn summary_omits_the_failure_section_when_complete() {
        let report = ConversionReport {
            converted: vec!["patient_00".to_string()],
            failed: Vec::new(),
        };

        let output = format!("{}", ConversionSummary::new(&report));
        assert!(!output.contains("Failed patients"));
    }
}
