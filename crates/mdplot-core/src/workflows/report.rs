use std::path::PathBuf;

/// Why a panel was drawn as a placeholder instead of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// The input file does not exist.
    MissingInput,
    /// The input file exists but could not be parsed.
    UnreadableInput,
    /// The matrix held no positive probability to transform.
    DegenerateLandscape,
}

impl PlaceholderReason {
    /// The text drawn in the placeholder panel.
    pub fn message(&self) -> &'static str {
        match self {
            PlaceholderReason::MissingInput => "File not found",
            PlaceholderReason::UnreadableInput => "Error parsing data",
            PlaceholderReason::DegenerateLandscape => "FEL calculation failed",
        }
    }
}

/// What ended up in one panel of a rendered figure.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelOutcome {
    Series {
        traces: usize,
        points: usize,
        missing_inputs: Vec<PathBuf>,
    },
    Heatmap {
        rows: usize,
        cols: usize,
        skipped_rows: usize,
        value_range: (f64, f64),
    },
    Placeholder { reason: PlaceholderReason },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelReport {
    pub label: String,
    pub outcome: PanelOutcome,
}

/// Summary of one figure workflow run: the files written and what each
/// panel ended up showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FigureReport {
    pub outputs: Vec<PathBuf>,
    pub panels: Vec<PanelReport>,
}

impl FigureReport {
    pub fn placeholder_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|panel| matches!(panel.outcome, PanelOutcome::Placeholder { .. }))
            .count()
    }

    /// True when every panel carries complete data: no placeholders, no
    /// missing series inputs, no skipped matrix rows.
    pub fn is_clean(&self) -> bool {
        self.panels.iter().all(|panel| match &panel.outcome {
            PanelOutcome::Series { missing_inputs, .. } => missing_inputs.is_empty(),
            PanelOutcome::Heatmap { skipped_rows, .. } => *skipped_rows == 0,
            PanelOutcome::Placeholder { .. } => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_report_has_no_losses() {
        let report = FigureReport {
            outputs: vec![PathBuf::from("out.png")],
            panels: vec![
                PanelReport {
                    label: "A".to_string(),
                    outcome: PanelOutcome::Series {
                        traces: 2,
                        points: 100,
                        missing_inputs: Vec::new(),
                    },
                },
                PanelReport {
                    label: "B".to_string(),
                    outcome: PanelOutcome::Heatmap {
                        rows: 32,
                        cols: 32,
                        skipped_rows: 0,
                        value_range: (0.0, 16.0),
                    },
                },
            ],
        };
        assert!(report.is_clean());
        assert_eq!(report.placeholder_count(), 0);
    }

    #[test]
    fn placeholders_and_losses_mark_the_report_dirty() {
        let report = FigureReport {
            outputs: Vec::new(),
            panels: vec![
                PanelReport {
                    label: "A".to_string(),
                    outcome: PanelOutcome::Placeholder {
                        reason: PlaceholderReason::MissingInput,
                    },
                },
                PanelReport {
                    label: "B".to_string(),
                    outcome: PanelOutcome::Heatmap {
                        rows: 30,
                        cols: 32,
                        skipped_rows: 2,
                        value_range: (0.0, 1.0),
                    },
                },
            ],
        };
        assert!(!report.is_clean());
        assert_eq!(report.placeholder_count(), 1);
    }

    #[test]
    fn placeholder_messages_match_reasons() {
        assert_eq!(PlaceholderReason::MissingInput.message(), "File not found");
        assert_eq!(
            PlaceholderReason::UnreadableInput.message(),
            "Error parsing data"
        );
        assert_eq!(
            PlaceholderReason::DegenerateLandscape.message(),
            "FEL calculation failed"
        );
    }
}
