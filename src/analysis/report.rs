//! Ranked summary report.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Final output of an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Inputs of the run
    pub metadata: ReportMetadata,

    /// Top sections, best first
    pub extracted_sections: Vec<RankedSection>,

    /// Persona-tailored summaries of the top sections
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Run inputs recorded in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// File names listed in the manifest
    pub input_documents: Vec<String>,

    /// Persona role
    pub persona: String,

    /// Job task
    pub job_to_be_done: String,

    /// When the report was produced
    pub processing_timestamp: DateTime<Local>,
}

/// A section with its rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source file name
    pub document: String,

    /// Heading text
    pub section_title: String,

    /// 1 for the most relevant section
    pub importance_rank: usize,

    /// Page the section starts on
    pub page_number: u32,
}

/// A refined summary of one top section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source file name
    pub document: String,

    /// Model-written summary
    pub refined_text: String,

    /// Page the section starts on
    pub page_number: u32,
}

impl Report {
    /// Serialize with four-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the report, creating parent directories as needed.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
