use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

use crate::app_config::Config;
use crate::backend::aws::{region_from_env, AmazonTranslate, AwsCredentials};
use crate::backend::{ImportTerminologyRequest, MergeStrategy, TranslateBackend};
use crate::document::PptxDocument;
use crate::file_utils::FileManager;
use crate::language_id::{self, LanguageId};
use crate::skip_text::{SkipText, SkipTextStore};
use crate::translation::{PresentationTranslator, RunReflowEngine, TranslationGateway};

// @module: Application controller for batch deck translation

/// Outcome of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Decks translated and saved
    pub translated: usize,

    /// Decks that failed with a fatal error
    pub failed: usize,
}

/// Main application controller for presentation translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the batch against the real translation service
    ///
    /// Credentials and region come from the environment (or the config file
    /// for the region); there are no baked-in defaults.
    pub fn run(&self) -> Result<RunSummary> {
        let credentials = AwsCredentials::from_env()
            .map_err(|e| anyhow!("Cannot build backend client: {}", e))?;
        let region = self
            .config
            .backend
            .region
            .clone()
            .or_else(region_from_env)
            .ok_or_else(|| anyhow!("No region configured; set backend.region or AWS_REGION"))?;
        let backend = match &self.config.backend.endpoint {
            Some(endpoint) => AmazonTranslate::with_endpoint(region, endpoint.clone(), credentials),
            None => AmazonTranslate::new(region, credentials),
        }
        .map_err(|e| anyhow!("Cannot build backend client: {}", e))?;

        let skip = SkipTextStore::load(self.config.skip_path());
        self.run_with_backend(Box::new(backend), skip)
    }

    /// Run the batch against an already-built backend
    ///
    /// Split out from `run` so tests can drive the whole pipeline through a
    /// mock backend.
    pub fn run_with_backend(
        &self,
        backend: Box<dyn TranslateBackend>,
        skip: SkipText,
    ) -> Result<RunSummary> {
        let config = &self.config;

        // Fail on an unsupported pair before any document is opened
        LanguageId::resolve(&config.dest_language)
            .map_err(|e| anyhow!("Destination language is not usable: {}", e))?;

        let terminology_names = self.import_terminology(backend.as_ref())?;

        let files = FileManager::find_pptx_files(&config.input_dir)?;
        if files.is_empty() {
            warn!("No .pptx files found in {:?}", config.input_dir);
            return Ok(RunSummary::default());
        }

        let output_dir = config.output_dir();
        FileManager::ensure_dir(&output_dir)?;

        let gateway = TranslationGateway::new(
            backend,
            skip,
            config.source_language.clone(),
            config.dest_language.clone(),
            terminology_names,
        );
        let engine = RunReflowEngine::new(config.dest_language.clone(), config.reflow.into());
        let translator = PresentationTranslator::new(gateway, engine);

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut summary = RunSummary::default();
        for file in &files {
            progress.set_message(
                file.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
            info!(
                "Translating {:?} from {} to {}...",
                file,
                language_id::display_name(&config.source_language),
                language_id::display_name(&config.dest_language)
            );
            match self.translate_file(&translator, file, &output_dir) {
                Ok(output_path) => {
                    info!("Saved {:?}", output_path);
                    summary.translated += 1;
                }
                Err(e) => {
                    error!("Failed to translate {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }
            progress.inc(1);
        }
        progress.finish_with_message("done");

        info!(
            "Batch finished: {} translated, {} failed",
            summary.translated, summary.failed
        );
        Ok(summary)
    }

    /// Upload the terminology CSV, when one is configured
    fn import_terminology(&self, backend: &dyn TranslateBackend) -> Result<Vec<String>> {
        let Some(path) = &self.config.terminology_file else {
            return Ok(Vec::new());
        };
        info!("Importing terminology data from {:?}...", path);
        let data = FileManager::read_to_bytes(path)?;
        backend
            .import_terminology(&ImportTerminologyRequest {
                name: self.config.terminology_name.clone(),
                merge_strategy: MergeStrategy::Overwrite,
                data,
            })
            .map_err(|e| anyhow!("Terminology import failed: {}", e))?;
        Ok(vec![self.config.terminology_name.clone()])
    }

    fn translate_file(
        &self,
        translator: &PresentationTranslator,
        file: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let mut document =
            PptxDocument::open(file).with_context(|| format!("Failed to open {:?}", file))?;
        translator
            .translate(&mut document.presentation)
            .with_context(|| format!("Failed to translate {:?}", file))?;

        let output_path = FileManager::generate_output_path(
            file,
            output_dir,
            &self.config.source_language,
            &self.config.dest_language,
        );
        info!("Saving {:?}...", output_path);
        document
            .save(&output_path)
            .with_context(|| format!("Failed to save {:?}", output_path))?;
        Ok(output_path)
    }
}
