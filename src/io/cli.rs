//! Command-line interface for inpainting one image or a directory of images

use crate::geometry::{MissingRegion, ObservationMask};
use crate::inference::{BeliefPropagation, InferenceConfig, MessageInit};
use crate::io::configuration::{
    ALPHABET_SIZE, DEFAULT_EPOCHS, DEFAULT_LOG_LEVEL, DEFAULT_MISSING_REGION,
    DEFAULT_TRUNCATION_CAP, OUTPUT_SUFFIX, SNAPSHOT_FRAME_DELAY_MS, SNAPSHOT_GIF_SUFFIX,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{InpaintError, Result, invalid_parameter};
use crate::io::image::{export_grayscale, load_grayscale};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "mrf-inpaint")]
#[command(
    version,
    about = "Fill a missing rectangle of a grayscale image with loopy belief propagation"
)]
/// Command-line arguments for the inpainting tool
pub struct Cli {
    /// Input image or directory of images to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output path (single input only); defaults to `<stem>_inpainted.png`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Missing rectangle as `row_min,row_max,col_min,col_max` (inclusive)
    #[arg(short, long, default_value = DEFAULT_MISSING_REGION)]
    pub region: MissingRegion,

    /// Number of message-passing epochs
    #[arg(short, long, default_value_t = DEFAULT_EPOCHS)]
    pub epochs: usize,

    /// Truncation constant of the smoothness potential
    #[arg(short, long, default_value_t = DEFAULT_TRUNCATION_CAP)]
    pub cap: usize,

    /// Save the belief image after every epoch, plus an animated GIF
    #[arg(short, long)]
    pub snapshots: bool,

    /// Seed message buffers randomly with the given seed instead of uniformly
    #[arg(long, value_name = "SEED")]
    pub random_init: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log specification, e.g. `info` or `warn,mrf_inpaint=debug`
    #[arg(short, long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Inference configuration described by the arguments
    pub const fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            alphabet_size: ALPHABET_SIZE,
            truncation_cap: self.cap,
            epoch_count: self.epochs,
            emit_snapshots: self.snapshots,
            message_init: match self.random_init {
                Some(seed) => MessageInit::Random { seed },
                None => MessageInit::Uniform,
            },
        }
    }
}

/// Orchestrates inpainting of every target file with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, inference or export fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            log::info!("Nothing to process");
            return Ok(());
        }

        if self.cli.output.is_some() && files.len() > 1 {
            return Err(invalid_parameter(
                "output",
                &self.cli.target.display(),
                &"an explicit output path requires a single input file",
            ));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.should_process_file(&self.cli.target) {
                Ok(vec![self.cli.target.clone()])
            } else {
                Ok(vec![])
            }
        } else if self.cli.target.is_dir() {
            let entries =
                std::fs::read_dir(&self.cli.target).map_err(|e| InpaintError::FileSystem {
                    path: self.cli.target.clone(),
                    operation: "read directory",
                    source: e,
                })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_supported_input(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be an image file or a directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);

        let intensities = load_grayscale(input_path)?;
        let (rows, cols) = intensities.dim();
        let mask = ObservationMask::from_region(rows, cols, &self.cli.region);
        if mask.unobserved_count() == 0 {
            log::warn!(
                "Region {} lies outside the {rows}x{cols} image {}",
                self.cli.region,
                input_path.display()
            );
        }

        let config = self.cli.inference_config();
        let mut inference = BeliefPropagation::from_intensities(&intensities, &mask, config)?;
        log::info!(
            "Inpainting {} ({rows}x{cols}): {} missing pixels, {} segment nodes, {} epochs",
            input_path.display(),
            mask.unobserved_count(),
            inference.segment().len(),
            config.epoch_count
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, config.epoch_count);
        }

        let progress = self.progress_manager.as_ref();
        while inference.run_epoch_with(|position, total| {
            if let Some(pm) = progress {
                pm.update_sweep(position, total);
            }
        })? {
            if let Some(pm) = progress {
                pm.complete_epoch();
            }
        }

        let beliefs = inference.extract_beliefs()?;
        export_grayscale(&beliefs, &output_path)?;
        log::info!("Wrote {}", output_path.display());

        if let Some(snapshots) = inference.snapshots().filter(|s| !s.is_empty()) {
            let directory = output_path.parent().unwrap_or_else(|| Path::new(""));
            let prefix = output_path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();

            let frames = snapshots.export_frames(directory, &prefix)?;
            let gif_path = directory.join(format!("{prefix}{SNAPSHOT_GIF_SUFFIX}.gif"));
            snapshots.export_gif(&gif_path, SNAPSHOT_FRAME_DELAY_MS)?;
            log::info!(
                "Wrote {} epoch snapshots and {}",
                frames.len(),
                gif_path.display()
            );
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(start_time.elapsed());
        }

        Ok(())
    }

    /// Where the result for `input_path` is written
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        if let Some(output) = &self.cli.output {
            return output.clone();
        }

        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

        input_path.parent().map_or_else(
            || PathBuf::from(&output_name),
            |parent| parent.join(&output_name),
        )
    }
}

/// Whether a directory entry is an input image rather than a previous result
fn is_supported_input(path: &Path) -> bool {
    let has_supported_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        });
    let is_previous_output = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(is_output_stem);

    has_supported_extension && !is_previous_output
}

/// Whether a file stem names a result or one of its epoch frames
///
/// Results end with the output suffix; frames append the epoch number to it.
fn is_output_stem(stem: &str) -> bool {
    stem.rfind(OUTPUT_SUFFIX).is_some_and(|start| {
        stem.get(start + OUTPUT_SUFFIX.len()..)
            .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
    })
}
