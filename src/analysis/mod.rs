//! Persona-driven relevance ranking.
//!
//! The [`Analyzer`] extracts sections from every document of a
//! [`Manifest`], asks a [`TextGenerator`] to score each one against the
//! persona and job, and summarizes the best ones into a [`Report`].

mod prompts;
mod report;

pub use prompts::{
    insight_prompt, parse_relevance_score, relevance_prompt, DEFAULT_SCORE, INSIGHT_MAX_TOKENS,
    SCORE_MAX_TOKENS,
};
pub use report::{RankedSection, Report, ReportMetadata, SubsectionAnalysis};

use std::path::Path;

use chrono::Local;

use crate::collection::{extract_collection, Job, Manifest, Persona};
use crate::error::{Error, Result};
use crate::llm::TextGenerator;
use crate::model::Section;
use crate::parser::ParseOptions;

/// Sections summarized in the report by default.
pub const DEFAULT_TOP_N: usize = 5;

/// Options for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// How many top sections make it into the report
    pub top_n: usize,

    /// How documents are loaded
    pub parse: ParseOptions,
}

impl AnalyzerOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of reported sections.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            parse: ParseOptions::default(),
        }
    }
}

/// A section with its relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSection {
    /// The section
    pub section: Section,
    /// Relevance from 1.0 to 10.0
    pub score: f64,
}

/// Progress notifications emitted during [`Analyzer::analyze_with_progress`].
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// Sections were extracted from the collection
    Extracted { sections: usize },
    /// One section was scored
    Scored {
        done: usize,
        total: usize,
        section: &'a ScoredSection,
    },
    /// One top section was summarized
    Summarized { done: usize, total: usize },
}

/// Scores and summarizes sections with a text generator.
pub struct Analyzer<G: TextGenerator> {
    generator: G,
    options: AnalyzerOptions,
}

impl<G: TextGenerator> Analyzer<G> {
    /// Create an analyzer with default options.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            options: AnalyzerOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    /// The underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    fn complete(&self, prompt: &str, max_tokens: u32) -> String {
        self.generator
            .generate(prompt, max_tokens)
            .unwrap_or_else(|e| {
                log::error!("Model request failed: {}", e);
                String::new()
            })
    }

    /// Relevance of one section; failed requests score [`DEFAULT_SCORE`].
    pub fn score_section(&self, section: &Section, persona: &Persona, job: &Job) -> f64 {
        let response = self.complete(&relevance_prompt(section, persona, job), SCORE_MAX_TOKENS);
        parse_relevance_score(&response)
    }

    /// Persona-tailored summary of one section; empty if the request failed.
    pub fn summarize(&self, section: &Section, persona: &Persona, job: &Job) -> String {
        self.complete(&insight_prompt(section, persona, job), INSIGHT_MAX_TOKENS)
    }

    /// Score every section and sort best first.
    ///
    /// Sections with equal scores keep their input order.
    pub fn rank(
        &self,
        sections: Vec<Section>,
        persona: &Persona,
        job: &Job,
        progress: &dyn Fn(Progress<'_>),
    ) -> Vec<ScoredSection> {
        let total = sections.len();
        let mut scored = Vec::with_capacity(total);

        for (i, section) in sections.into_iter().enumerate() {
            let score = self.score_section(&section, persona, job);
            let entry = ScoredSection { section, score };
            log::info!(
                "Scored '{}' from {} with relevance: {:.1}",
                entry.section.text.chars().take(50).collect::<String>(),
                entry.section.document.as_deref().unwrap_or("?"),
                score
            );
            progress(Progress::Scored {
                done: i + 1,
                total,
                section: &entry,
            });
            scored.push(entry);
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// Run the whole analysis for a manifest.
    pub fn analyze(&self, manifest: &Manifest, pdf_dir: &Path) -> Result<Report> {
        self.analyze_with_progress(manifest, pdf_dir, &|_| {})
    }

    /// Run the whole analysis, reporting progress as it goes.
    ///
    /// Fails with [`Error::NoSections`] when no document yielded a section.
    pub fn analyze_with_progress(
        &self,
        manifest: &Manifest,
        pdf_dir: &Path,
        progress: &dyn Fn(Progress<'_>),
    ) -> Result<Report> {
        let sections = extract_collection(&manifest.documents, pdf_dir, &self.options.parse);
        if sections.is_empty() {
            log::error!("No sections were extracted from any PDF, aborting analysis");
            return Err(Error::NoSections);
        }
        progress(Progress::Extracted {
            sections: sections.len(),
        });

        let persona = &manifest.persona;
        let job = &manifest.job_to_be_done;

        log::info!("Analyzing relevance of {} sections", sections.len());
        let mut ranked = self.rank(sections, persona, job, progress);
        ranked.truncate(self.options.top_n);

        log::info!(
            "Generating detailed subsection analysis for top {} sections",
            ranked.len()
        );
        let total = ranked.len();
        let mut subsection_analysis = Vec::with_capacity(total);
        for (i, entry) in ranked.iter().enumerate() {
            subsection_analysis.push(SubsectionAnalysis {
                document: entry.section.document.clone().unwrap_or_default(),
                refined_text: self.summarize(&entry.section, persona, job),
                page_number: entry.section.page,
            });
            progress(Progress::Summarized { done: i + 1, total });
        }

        let extracted_sections = ranked
            .iter()
            .enumerate()
            .map(|(i, entry)| RankedSection {
                document: entry.section.document.clone().unwrap_or_default(),
                section_title: entry.section.text.clone(),
                importance_rank: i + 1,
                page_number: entry.section.page,
            })
            .collect();

        Ok(Report {
            metadata: ReportMetadata {
                input_documents: manifest.filenames(),
                persona: persona.role.clone(),
                job_to_be_done: job.task.clone(),
                processing_timestamp: Local::now(),
            },
            extracted_sections,
            subsection_analysis,
        })
    }
}
