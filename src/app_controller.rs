use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use crate::app_config::Config;
use crate::caption_cleaner;
use crate::file_utils::FileManager;
use crate::sentence_aligner::{self, SentenceProposal};
use crate::subtitle_cues;
use crate::variant_collapse;

// @module: Application controller for caption cleaning and alignment

/// Wire shape of a grouping-service response file. The service wraps its
/// sentence list in an object; a bare array is accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProposalFile {
    Wrapped { sentences: Vec<SentenceProposal> },
    Bare(Vec<SentenceProposal>),
}

impl ProposalFile {
    fn into_proposals(self) -> Vec<SentenceProposal> {
        match self {
            ProposalFile::Wrapped { sentences } => sentences,
            ProposalFile::Bare(sentences) => sentences,
        }
    }
}

/// Main application controller for caption processing
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.language.is_empty()
    }

    /// Clean a single caption file in place: rolling-caption dedup with
    /// dense renumbering. The variant collapse step only applies in folder
    /// mode, where sibling files are visible.
    pub fn run_clean(&self, input_file: &Path) -> Result<()> {
        if !self.is_initialized() {
            return Err(anyhow::anyhow!("Controller not properly initialized"));
        }
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        if !FileManager::is_caption_file(input_file) {
            return Err(anyhow::anyhow!("Not a caption file: {:?}", input_file));
        }

        self.clean_file(input_file)
    }

    /// Clean every caption file in a directory: collapse redundant language
    /// variants first, then dedupe each surviving file in place.
    pub fn run_clean_folder(&self, input_dir: &Path) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !self.is_initialized() {
            return Err(anyhow::anyhow!("Controller not properly initialized"));
        }
        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let mut caption_files = FileManager::find_files(input_dir, "srt")?;
        if caption_files.is_empty() {
            return Err(anyhow::anyhow!("No caption files found in directory: {:?}", input_dir));
        }

        if self.config.cleaning.collapse_variants {
            let plan = variant_collapse::collapse_variants(&caption_files, &self.config.language);
            for path in &plan.delete {
                match FileManager::delete_file(path) {
                    Ok(()) => info!("Removed redundant variant: {}", path.display()),
                    Err(e) => warn!("Could not remove {}: {}", path.display(), e),
                }
            }
            caption_files = plan.keep;
        }

        if !self.config.cleaning.dedupe_rolling {
            info!("Rolling-caption dedup disabled, nothing left to do");
            return Ok(());
        }

        // Progress bar for batch cleaning
        let folder_pb = ProgressBar::new(caption_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Cleaning captions");

        let mut success_count = 0;
        let mut error_count = 0;

        for caption_file in &caption_files {
            let file_name = caption_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Cleaning: {}", file_name));

            match self.clean_file(caption_file) {
                Ok(()) => success_count += 1,
                Err(e) => {
                    error!("Error cleaning {}: {}", file_name, e);
                    error_count += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder cleaning complete");

        info!(
            "Folder cleaning completed: {} cleaned, {} errors - Duration: {}",
            success_count,
            error_count,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Align grouping-service proposals against a caption file and write the
    /// resulting per-sentence SRT.
    pub fn run_align(
        &self,
        cues_file: &Path,
        proposals_file: &Path,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<PathBuf> {
        if !self.is_initialized() {
            return Err(anyhow::anyhow!("Controller not properly initialized"));
        }
        if !cues_file.exists() {
            return Err(anyhow::anyhow!("Caption file does not exist: {:?}", cues_file));
        }

        let output_path = output_file.unwrap_or_else(|| {
            let output_dir = cues_file.parent().unwrap_or(Path::new("."));
            FileManager::generate_output_path(cues_file, output_dir, "aligned", "srt")
        });
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite)");
            return Ok(output_path);
        }

        let content = FileManager::read_to_string(cues_file)?;
        let cues = subtitle_cues::parse_srt_cues(&content);
        if cues.is_empty() {
            warn!("No usable cues found in {:?}; sentences will get synthetic timing", cues_file);
        } else {
            debug!("Parsed {} cues from {:?}", cues.len(), cues_file);
        }

        let proposals = Self::load_proposals(proposals_file)?;
        info!("Aligning {} proposed sentences against {} cues", proposals.len(), cues.len());

        let opts = self.config.alignment.to_align_options();
        let sentences = sentence_aligner::align_with(&cues, &proposals, opts);
        let untimed = sentences.iter().filter(|s| s.start_ms.is_none()).count();
        if untimed > 0 {
            warn!("{} sentence(s) had no timing source; synthesizing at serialization", untimed);
        }

        let srt = sentence_aligner::serialize_with(&sentences, opts);
        FileManager::write_to_file(&output_path, &srt)?;

        info!("Success: {}", output_path.display());
        Ok(output_path)
    }

    /// Extract the plain prose a grouping service expects from a caption file
    pub fn extract_plain_text(&self, input_file: &Path) -> Result<String> {
        let content = FileManager::read_to_string(input_file)?;
        Ok(caption_cleaner::strip_to_plain_text(&content))
    }

    /// Dedupe one caption file in place
    fn clean_file(&self, caption_file: &Path) -> Result<()> {
        let content = FileManager::read_to_string(caption_file)?;
        let (cleaned, stats) = caption_cleaner::dedupe_cue_text_with_stats(&content);

        FileManager::write_to_file(caption_file, &cleaned)
            .with_context(|| format!("Failed to write cleaned captions: {:?}", caption_file))?;

        info!(
            "Cleaned {}: {} cues kept, {} repeats dropped, {} empty dropped",
            caption_file.display(),
            stats.kept,
            stats.dropped_repeats,
            stats.dropped_empty
        );
        Ok(())
    }

    /// Parse a grouping-service response file into proposals
    fn load_proposals(proposals_file: &Path) -> Result<Vec<SentenceProposal>> {
        let raw = FileManager::read_to_string(proposals_file)?;
        let parsed: ProposalFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse proposals file: {:?}", proposals_file))?;
        Ok(parsed.into_proposals())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
