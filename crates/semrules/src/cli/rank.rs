use super::render::rule_table;
use console::style;
use semrules_lib::coherence::CoherenceCache;
use semrules_lib::util::{create_progress_bar, format_percent, format_rule_line};
use semrules_lib::{
    CoherenceContext, Config, EmbeddingModel, FilterOutcome, MiningParams, RankedRuleSet, Result,
    RuleExport, RuleMiner, SemrulesError,
};
use serde_json::json;
use std::path::PathBuf;

pub struct RankOptions {
    pub export: PathBuf,
    pub support: f64,
    pub confidence: f64,
    pub max_length: usize,
    pub alpha: Option<f64>,
    pub filter: Option<String>,
    pub format: String,
}

enum OutputFormat {
    Table,
    Plain,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(SemrulesError::InvalidParameter(format!(
                "Unsupported output format '{}'. Use 'table', 'plain' or 'json'",
                other
            ))),
        }
    }
}

pub fn handle_rank_command(
    model: &EmbeddingModel,
    config: &Config,
    options: RankOptions,
    verbose: bool,
) -> Result<()> {
    let format = OutputFormat::parse(&options.format)?;
    let params = MiningParams::new(options.support, options.confidence, options.max_length)?;
    if let Some(alpha) = options.alpha {
        semrules_lib::rules::validate_unit("alpha", alpha)?;
    }

    let export = RuleExport::new(&options.export);
    let mined = export.mine(&params)?;

    let mut ctx = CoherenceContext::new(model, config.language);
    let pb = match format {
        OutputFormat::Json => None,
        _ => Some(create_progress_bar(
            CoherenceCache::pair_count(mined.header.len()) as u64,
            "Precomputing attribute coherence",
        )),
    };
    let ranked = RankedRuleSet::from_mined(&mut ctx, &mined, pb.as_ref());
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let mut ranked = ranked?;

    if let Some(alpha) = options.alpha {
        ranked = ranked.reorder(alpha)?;
    }

    if let Some(target) = options.filter.as_deref() {
        match ranked.filter_consequent(target) {
            FilterOutcome::Matched(filtered) => ranked = filtered,
            FilterOutcome::NoMatch => {
                if let OutputFormat::Json = format {
                    ranked = RankedRuleSet::default();
                } else {
                    println!("{}", style("No such rules found!").yellow());
                    return Ok(());
                }
            }
        }
    }

    match format {
        OutputFormat::Table => {
            println!("{}", rule_table(&ranked));
            if let Some(accuracy) = mined.accuracy {
                println!("Model accuracy: {}", format_percent(accuracy));
            }
            println!("Model support: {}", params.support);
        }
        OutputFormat::Plain => {
            for rule in &ranked {
                println!("{}", format_rule_line(rule));
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "dataset": mined.dataset,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "accuracy": mined.accuracy,
                "support": params.support,
                "confidence": params.confidence,
                "max_rule_length": params.max_rule_length,
                "alpha": options.alpha,
                "summary": ranked.summary(),
                "rules": ranked.rules(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if verbose {
        let summary = ranked.summary();
        eprintln!(
            "{} {} rules ranked, {} without coherence",
            style(">>>").cyan(),
            summary.scored + summary.failed,
            summary.failed
        );
    }

    Ok(())
}
