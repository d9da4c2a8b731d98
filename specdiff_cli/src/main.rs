use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use specdiff_common::load_config;
use specdiff_core::{load_spec, DiffConfig, DiffResult, OperationDiff, SpecDiffEngine};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "specdiff")]
#[command(author = "SpecDiff Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Structural diff for OpenAPI descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two API descriptions
    Diff {
        /// Base API description (JSON or YAML)
        base: PathBuf,

        /// Revised API description (JSON or YAML)
        revision: PathBuf,

        /// Keep only endpoints matching this regular expression
        #[arg(short, long)]
        filter: Option<String>,

        /// Output the full diff as JSON
        #[arg(long)]
        json: bool,

        /// Output summary counts as JSON
        #[arg(long, conflicts_with = "json")]
        summary: bool,

        /// Ignore summary, description and title changes
        #[arg(long)]
        exclude_descriptions: bool,

        /// Ignore example changes
        #[arg(long)]
        exclude_examples: bool,

        /// Exit with status 1 when the documents differ
        #[arg(long)]
        fail_on_diff: bool,
    },
}

fn main() {
    // Log to stderr so report output can go cleanly to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diff {
            base,
            revision,
            filter,
            json,
            summary,
            exclude_descriptions,
            exclude_examples,
            fail_on_diff,
        } => {
            match run_diff(
                base,
                revision,
                filter,
                json,
                summary,
                exclude_descriptions,
                exclude_examples,
            ) {
                Ok(result) => {
                    if fail_on_diff && !result.is_empty() {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    error!("Diff failed: {}", e);
                    std::process::exit(2);
                }
            }
        }
    }
}

fn run_diff(
    base: PathBuf,
    revision: PathBuf,
    filter: Option<String>,
    json: bool,
    summary: bool,
    exclude_descriptions: bool,
    exclude_examples: bool,
) -> Result<DiffResult> {
    // Validate paths
    if !base.exists() {
        bail!("Base document does not exist: {}", base.display());
    }
    if !revision.exists() {
        bail!("Revision document does not exist: {}", revision.display());
    }

    info!("Comparing:");
    info!("  Base:     {}", base.display());
    info!("  Revision: {}", revision.display());

    let loaded = load_config()?;
    let config = loaded.config;

    // Explicit flags win over persisted configuration
    let exclude_descriptions = exclude_descriptions || config.exclude_descriptions;
    let exclude_examples = exclude_examples || config.exclude_examples;
    let filter = filter.or(config.endpoint_filter);

    let diff_config = DiffConfig::new()
        .with_descriptions(!exclude_descriptions)
        .with_examples(!exclude_examples);

    let base_spec = load_spec(&base)?;
    let revision_spec = load_spec(&revision)?;

    let engine = SpecDiffEngine::new().with_config(diff_config);
    let mut result = engine.diff(&base_spec, &revision_spec);

    if let Some(pattern) = filter {
        result = result.filter_by_regex(&pattern);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if summary {
        println!("{}", serde_json::to_string_pretty(&result.summary())?);
    } else {
        print!("{}", text_report(&result));
    }

    Ok(result)
}

/// Render the diff as an indented text report
fn text_report(result: &DiffResult) -> String {
    let mut out = String::new();

    if result.is_empty() {
        out.push_str("No changes\n");
        return out;
    }

    out.push_str("### New Endpoints\n");
    out.push_str("-----------------\n");
    for endpoint in &result.added_endpoints {
        out.push_str(endpoint);
        out.push('\n');
    }
    out.push('\n');

    out.push_str("### Deleted Endpoints\n");
    out.push_str("---------------------\n");
    for endpoint in &result.deleted_endpoints {
        out.push_str(endpoint);
        out.push('\n');
    }
    out.push('\n');

    out.push_str("### Modified Endpoints\n");
    out.push_str("----------------------\n");
    for (endpoint, operation) in &result.modified_endpoints {
        out.push_str(endpoint);
        out.push('\n');
        write_operation(&mut out, operation);
        out.push('\n');
    }

    out
}

fn write_operation(out: &mut String, operation: &OperationDiff) {
    if let Some(summary) = &operation.summary_diff {
        out.push_str(&format!(
            "* Summary changed from {} to {}\n",
            summary.from, summary.to
        ));
    }

    if let Some(description) = &operation.description_diff {
        out.push_str(&format!(
            "* Description changed from {} to {}\n",
            description.from, description.to
        ));
    }

    if let Some(parameters) = &operation.parameters_diff {
        for key in &parameters.added {
            out.push_str(&param_line("New", key));
        }
        for key in &parameters.deleted {
            out.push_str(&param_line("Deleted", key));
        }
        for (key, parameter) in &parameters.modified {
            out.push_str(&param_line("Modified", key));
            if parameter.schema_diff.is_some() {
                out.push_str("  - Schema changed\n");
            }
            if parameter.content_diff.is_some() {
                out.push_str("  - Content changed\n");
            }
        }
    }

    if operation.request_body_diff.is_some() {
        out.push_str("* Request body changed\n");
    }

    if let Some(responses) = &operation.responses_diff {
        out.push_str("* Response changed\n");
        for status in &responses.added {
            out.push_str(&format!("  - New response: {}\n", status));
        }
        for status in &responses.deleted {
            out.push_str(&format!("  - Deleted response: {}\n", status));
        }
        for status in responses.modified.keys() {
            out.push_str(&format!("  - Modified response: {}\n", status));
        }
    }

    if operation.callbacks_diff.is_some() {
        out.push_str("* Callbacks changed\n");
    }
}

/// Parameter keys carry "location name"; render them the way they read
fn param_line(action: &str, key: &str) -> String {
    match key.split_once(' ') {
        Some((location, name)) => format!("* {} {} param: {}\n", action, location, name),
        None => format!("* {} param: {}\n", action, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specdiff_common::{Operation, PathItem, Spec};
    use std::collections::BTreeMap;

    fn spec_with_get(path: &str, summary: &str) -> Spec {
        Spec {
            paths: BTreeMap::from([(
                path.to_string(),
                PathItem {
                    get: Some(Operation {
                        summary: Some(summary.to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        }
    }

    #[test]
    fn test_text_report_no_changes() {
        assert_eq!(text_report(&DiffResult::default()), "No changes\n");
    }

    #[test]
    fn test_text_report_added_section() {
        let result = SpecDiffEngine::new().diff(
            &Spec::default(),
            &spec_with_get("/pets", "All pets"),
        );

        let report = text_report(&result);
        assert!(report.contains("### New Endpoints\n-----------------\nGET /pets\n"));
        assert!(report.contains("### Deleted Endpoints"));
        assert!(report.contains("### Modified Endpoints"));
    }

    #[test]
    fn test_text_report_modified_section() {
        let result = SpecDiffEngine::new().diff(
            &spec_with_get("/pets", "All pets"),
            &spec_with_get("/pets", "Every pet"),
        );

        let report = text_report(&result);
        assert!(report.contains("GET /pets\n"));
        assert!(report.contains("* Summary changed from \"All pets\" to \"Every pet\"\n"));
    }

    #[test]
    fn test_param_line_splits_location_and_name() {
        assert_eq!(param_line("New", "query limit"), "* New query param: limit\n");
        assert_eq!(param_line("Deleted", "body"), "* Deleted param: body\n");
    }
}
