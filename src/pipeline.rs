//! The full outline-to-project pipeline: flatten, classify, build.

use crate::build::{BuildReport, DocumentBuilder, HeadingStack};
use crate::classify::{BandConfig, ClassifiedEntry, Classifier};
use crate::error::{Error, Result};
use crate::model::{OutlineNode, Project};
use crate::options::CompileOptions;
use crate::outline::{flatten_with, Flattened};
use crate::render::preview::{preview_lines, PreviewLine};

/// Everything produced by one compilation.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Flattened outline
    pub flat: Flattened,

    /// Depth configuration after validation
    pub config: BandConfig,

    pub classifier: Classifier,

    /// Build output; its project is `None` unless the band was ready
    pub report: BuildReport,
}

impl Compilation {
    /// Classified entries in traversal order.
    pub fn classified(&self) -> impl Iterator<Item = ClassifiedEntry<'_>> {
        self.classifier.classify(&self.flat)
    }

    /// Lines for an on-screen preview.
    pub fn preview(&self) -> Vec<PreviewLine> {
        preview_lines(self.classified())
    }

    pub fn project(&self) -> Option<&Project> {
        self.report.project.as_ref()
    }

    pub fn into_project(self) -> Option<Project> {
        self.report.project
    }
}

/// Compile an outline with the given options.
///
/// An absent or empty outline compiles to an empty result. A to-do range
/// deeper than the outline is an error.
pub fn compile(root: Option<&OutlineNode>, options: &CompileOptions) -> Result<Compilation> {
    compile_with(root, options, || true)?
        .ok_or_else(|| Error::Other("compilation cancelled".to_string()))
}

/// Compile, polling `keep_going` between entries.
///
/// Returns `Ok(None)` when `keep_going` asked to stop.
pub fn compile_with<F: FnMut() -> bool>(
    root: Option<&OutlineNode>,
    options: &CompileOptions,
    mut keep_going: F,
) -> Result<Option<Compilation>> {
    let flat = match root {
        Some(root) => match flatten_with(root, &mut keep_going) {
            Some(flat) => flat,
            None => return Ok(None),
        },
        None => Flattened::default(),
    };

    let inclusion = options.inclusion_set();
    if flat.is_empty() {
        return Ok(Some(Compilation {
            flat,
            config: BandConfig::Unconfigured,
            classifier: Classifier::new(None, inclusion),
            report: BuildReport::unconfigured(),
        }));
    }

    let config = options.band_config().validate(flat.max_depth())?;
    let classifier = Classifier::for_config(&config, inclusion);

    let report = match config.ready() {
        Some(band) => {
            let headings = HeadingStack::with_separator(options.heading_separator.as_str());
            let mut builder =
                DocumentBuilder::with_heading_stack(options.resolved_title(), band, headings);
            for classified in classifier.classify(&flat) {
                if !keep_going() {
                    return Ok(None);
                }
                builder.push(&classified);
            }
            builder.finish()
        }
        None => BuildReport::unconfigured(),
    };

    Ok(Some(Compilation {
        flat,
        config,
        classifier,
        report,
    }))
}
