//! Output formatters for detection reports

use crate::config::OutputFormat;
use crate::detection::DetectionResult;
use crate::error::Result;
use crate::pipeline::DocumentReport;
use colored::{Color, Colorize};

/// Trait for formatting detection reports
pub trait OutputFormatter {
    fn format_report(&self, report: &DocumentReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for pipelines consuming structured output
pub struct JsonFormatter {
    pretty: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("{}\n", title.color(Color::Blue).bold())
        } else {
            format!("{}\n", title)
        }
    }

    fn confidence_color(confidence: f32) -> Color {
        match confidence {
            c if c >= 0.8 => Color::Green,
            c if c >= 0.5 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_detection(&self, detection: &DetectionResult) -> String {
        let mut output = String::new();

        match detection {
            DetectionResult::Failed(failure) => {
                output.push_str(&format!(
                    "  {} {}\n",
                    self.colorize("Error:", Color::Red),
                    failure
                ));
            }
            DetectionResult::Unknown => {
                output.push_str(&format!(
                    "  Language:   {} (no usable text)\n",
                    self.colorize("unknown", Color::Yellow)
                ));
            }
            DetectionResult::Detected(d) => {
                output.push_str(&format!(
                    "  Language:   {}\n",
                    self.colorize(&d.primary_language, Color::Cyan)
                ));
                output.push_str(&format!(
                    "  Confidence: {}\n",
                    self.colorize(
                        &format!("{:.4}", d.confidence),
                        Self::confidence_color(d.confidence)
                    )
                ));

                if let Some(warning) = &d.reliability_warning {
                    output.push_str(&format!(
                        "  {} {}\n",
                        self.colorize("Warning:", Color::Yellow),
                        warning
                    ));
                }

                if !d.alternatives.is_empty() {
                    output.push_str("  Alternatives:\n");
                    for alt in &d.alternatives {
                        output.push_str(&format!("    {}: {:.4}\n", alt.language, alt.confidence));
                    }
                }
            }
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &DocumentReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&report.source));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        if let Some(error) = &report.extraction_error {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Extraction failed:", Color::Red),
                error
            ));
        } else {
            output.push_str(&format!("  Extracted:  {} characters\n", report.extracted_chars));
        }

        output.push_str(&self.format_detection(&report.detection));

        if self.detailed && !report.preview.is_empty() {
            output.push_str("  Preview:\n");
            for line in report.preview.lines() {
                output.push_str(&format!("    {}\n", line));
            }
            output.push_str(&format!(
                "  Analyzed:   {}\n",
                report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &DocumentReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &DocumentReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }

    /// Render several reports; JSON output is a single array.
    pub fn generate_batch(&self, reports: &[DocumentReport], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => {
                let mut output = String::new();
                for report in reports {
                    output.push_str(&self.console_formatter.format_report(report)?);
                    output.push('\n');
                }
                Ok(output)
            }
            OutputFormat::Json if self.json_formatter.pretty => {
                Ok(serde_json::to_string_pretty(reports)?)
            }
            OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{Detection, DetectionFailure, LanguageScore};
    use chrono::Utc;
    use std::path::PathBuf;

    fn report(detection: DetectionResult) -> DocumentReport {
        DocumentReport {
            source: "en.docx".to_string(),
            extracted_chars: 120,
            extraction_error: None,
            preview: "The quick brown fox".to_string(),
            detection,
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_console_lists_alternatives_and_warning() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter
            .format_report(&report(DetectionResult::Detected(Detection {
                primary_language: "en".to_string(),
                confidence: 0.91234,
                alternatives: vec![LanguageScore {
                    language: "de".to_string(),
                    confidence: 0.03,
                }],
                reliability_warning: Some("Text too short, result may be unreliable".to_string()),
            })))
            .unwrap();

        assert!(output.contains("Language:   en"));
        assert!(output.contains("Confidence: 0.9123"));
        assert!(output.contains("de: 0.0300"));
        assert!(output.contains("Warning: Text too short"));
        assert!(!output.contains("Preview:"));
    }

    #[test]
    fn test_console_reports_failure() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter
            .format_report(&report(DetectionResult::Failed(
                DetectionFailure::ModelNotFound(PathBuf::from("/models/lid.176.bin")),
            )))
            .unwrap();

        assert!(output.contains("Error: Model file not found: /models/lid.176.bin"));
        assert!(output.contains("Preview:"));
    }

    #[test]
    fn test_json_report_shape() {
        let generator = ReportGenerator::new(false, false);
        let output = generator
            .generate_report(&report(DetectionResult::Unknown), OutputFormat::Json)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["source"], "en.docx");
        assert_eq!(json["detection"]["primary_language"], "unknown");
        assert_eq!(json["detection"]["confidence"], 0.0);
        assert!(json["detection"].get("failure").is_none());
        assert!(json.get("extraction_error").is_none());
    }

    #[test]
    fn test_json_batch_is_array() {
        let generator = ReportGenerator::default();
        let reports = vec![
            report(DetectionResult::Unknown),
            report(DetectionResult::Failed(DetectionFailure::InferenceError(
                "boom".to_string(),
            ))),
        ];
        let output = generator.generate_batch(&reports, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["detection"]["failure"]["kind"], "InferenceError");
        assert_eq!(json[1]["detection"]["failure"]["detail"], "boom");
    }
}
