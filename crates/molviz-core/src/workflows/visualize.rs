use super::lookup::{CompoundDirectory, Translator, is_hebrew, translate_with_fallback};
use crate::core::io::sdf::{ParseReport, parse_structure};
use crate::core::models::structure::StructureModel;
use crate::core::validation::validate_value;
use crate::engine::error::VisualizeError;
use crate::engine::progress::{Phase, ProgressReporter};
use crate::engine::scene::SceneDriver;
use crate::engine::viewer::{LiveMolecule, Viewer};
use tracing::{info, instrument};

/// Result of resolving a name to a parsed structure.
#[derive(Debug, Clone)]
pub struct LookupOutcome {
    /// The name actually sent to the directory, after any translation.
    pub search_name: String,
    pub identifier: u64,
    pub model: StructureModel,
    pub report: ParseReport,
}

/// Resolves a molecule name to a parsed structure without touching any scene.
///
/// Hebrew names are translated first when a translator is given. Translation
/// problems never fail the lookup; directory and parse errors do.
#[instrument(skip_all, name = "lookup_structure", fields(query = %name))]
pub async fn lookup_structure<D, T>(
    name: &str,
    directory: &D,
    translator: Option<&T>,
    reporter: &ProgressReporter<'_>,
) -> Result<LookupOutcome, VisualizeError>
where
    D: CompoundDirectory,
    T: Translator,
{
    let query = name.trim();
    if query.is_empty() {
        return Err(VisualizeError::EmptyQuery);
    }

    let search_name = match translator {
        Some(translator) if is_hebrew(query) => {
            reporter.start(Phase::Translating);
            let translated = translate_with_fallback(translator, query).await;
            reporter.finish(Phase::Translating);
            translated
        }
        _ => query.to_string(),
    };

    reporter.start(Phase::ResolvingCompound);
    let identifier = directory.resolve_identifier(&search_name).await?;
    reporter.finish(Phase::ResolvingCompound);
    info!(name = %search_name, identifier, "Resolved compound.");

    reporter.start(Phase::FetchingStructure);
    let fetched = directory.fetch_structure(identifier).await?;
    reporter.finish(Phase::FetchingStructure);

    reporter.start(Phase::ParsingStructure);
    let (model, report) = parse_structure(&fetched.text, &fetched.formula, Some(identifier))?;
    reporter.finish(Phase::ParsingStructure);

    Ok(LookupOutcome {
        search_name,
        identifier,
        model,
        report,
    })
}

/// Looks up `name` and renders it into the viewer.
///
/// The submission ticket is taken before the lookup starts, so if a newer
/// submission commits first this one is discarded. On any error the
/// previously rendered molecule stays in place.
pub async fn show_compound<S, D, T>(
    viewer: &mut Viewer<S>,
    name: &str,
    directory: &D,
    translator: Option<&T>,
    reporter: &ProgressReporter<'_>,
) -> Result<LookupOutcome, VisualizeError>
where
    S: SceneDriver,
    D: CompoundDirectory,
    T: Translator,
{
    let ticket = viewer.begin_submission();
    let outcome = lookup_structure(name, directory, translator, reporter).await?;

    reporter.start(Phase::BuildingGeometry);
    viewer.commit(ticket, outcome.model.clone())?;
    reporter.finish(Phase::BuildingGeometry);
    Ok(outcome)
}

/// Renders structure-file text supplied directly, bypassing the directory.
pub fn show_structure_text<'v, S: SceneDriver>(
    viewer: &'v mut Viewer<S>,
    text: &str,
    formula: &str,
    identifier: Option<u64>,
) -> Result<(&'v LiveMolecule, ParseReport), VisualizeError> {
    let ticket = viewer.begin_submission();
    let (model, report) = parse_structure(text, formula, identifier)?;
    Ok((viewer.commit(ticket, model)?, report))
}

/// Validates debug JSON text and renders it, bypassing the directory.
#[instrument(skip_all, name = "submit_debug_json")]
pub fn submit_debug_json<'v, S: SceneDriver>(
    viewer: &'v mut Viewer<S>,
    text: &str,
) -> Result<&'v LiveMolecule, VisualizeError> {
    let ticket = viewer.begin_submission();
    let value: serde_json::Value = serde_json::from_str(text)?;
    let model = validate_value(&value)?;
    viewer.commit(ticket, model)
}
