//! Interactive session: pick a rule export, mine it with chosen thresholds,
//! then filter and reorder the result by semantic coherence.

use super::render::rule_table;
use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use semrules_lib::coherence::CoherenceCache;
use semrules_lib::util::{create_progress_bar, format_percent};
use semrules_lib::{
    CoherenceContext, Config, EmbeddingModel, FilterOutcome, MiningParams, RankedRuleSet, Result,
    RuleExport, RuleMiner, SemrulesError,
};

pub fn handle_browse_command(model: &EmbeddingModel, config: &Config, verbose: bool) -> Result<()> {
    let mut session = BrowseSession::new(model, config, verbose);
    session.run()
}

struct BrowseSession<'m> {
    ctx: CoherenceContext<'m, EmbeddingModel>,
    config: &'m Config,
    verbose: bool,
    term: Term,
    theme: ColorfulTheme,
}

impl<'m> BrowseSession<'m> {
    fn new(model: &'m EmbeddingModel, config: &'m Config, verbose: bool) -> Self {
        Self {
            ctx: CoherenceContext::new(model, config.language),
            config,
            verbose,
            term: Term::stdout(),
            theme: ColorfulTheme::default(),
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            let export = self.select_export()?;
            let params = self.prompt_params()?;
            let ranked = self.mine_and_rank(&export, &params)?;

            if !ranked.is_empty() {
                let working = self.prompt_filter(&ranked)?;
                self.prompt_reorder(working)?;
            }

            let again = Confirm::with_theme(&self.theme)
                .with_prompt("Browse another rule set?")
                .default(true)
                .interact_on(&self.term)?;
            if !again {
                self.term.write_line("Bye!")?;
                return Ok(());
            }
        }
    }

    fn select_export(&self) -> Result<RuleExport> {
        let mut exports = RuleExport::discover(&self.config.rules_dir)?;
        if exports.is_empty() {
            return Err(SemrulesError::Config(format!(
                "No rule exports (*.json) found in {}",
                self.config.rules_dir.display()
            )));
        }

        let names: Vec<&str> = exports.iter().map(|e| e.name()).collect();
        let idx = Select::with_theme(&self.theme)
            .with_prompt("Please select dataset")
            .items(&names)
            .default(0)
            .interact_on(&self.term)?;

        Ok(exports.swap_remove(idx))
    }

    fn prompt_params(&self) -> Result<MiningParams> {
        let support = self.prompt_unit("Please select desired model support [0.0, 1.0]")?;
        let confidence = self.prompt_unit("Please select desired model confidence [0.0, 1.0]")?;
        let max_rule_length: usize = Input::with_theme(&self.theme)
            .with_prompt("Select the maximum rule length")
            .validate_with(|n: &usize| -> std::result::Result<(), String> {
                if *n < 2 {
                    Err("The rule length must be at least 2!".to_string())
                } else {
                    Ok(())
                }
            })
            .interact_text_on(&self.term)?;

        MiningParams::new(support, confidence, max_rule_length)
    }

    fn prompt_unit(&self, prompt: &str) -> Result<f64> {
        let value: f64 = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|v: &f64| -> std::result::Result<(), String> {
                if (0.0..=1.0).contains(v) {
                    Ok(())
                } else {
                    Err("The number must be in the [0.0, 1.0] interval!".to_string())
                }
            })
            .interact_text_on(&self.term)?;
        Ok(value)
    }

    fn mine_and_rank(&mut self, export: &RuleExport, params: &MiningParams) -> Result<RankedRuleSet> {
        self.term.write_line(&format!("{} Mining rules...", style(">>>").cyan()))?;
        let mined = export.mine(params)?;

        self.term.write_line(&format!(
            "{} Determining semantic coherence...",
            style(">>>").cyan()
        ))?;
        let pairs = CoherenceCache::pair_count(mined.header.len()) as u64;
        let pb = create_progress_bar(pairs, "Precomputing attribute coherence");
        let ranked = RankedRuleSet::from_mined(&mut self.ctx, &mined, Some(&pb));
        pb.finish_and_clear();
        let ranked = ranked?;

        self.print_model(&ranked)?;

        if let Some(accuracy) = mined.accuracy {
            self.term
                .write_line(&format!("Model accuracy: {}", format_percent(accuracy)))?;
        }
        self.term
            .write_line(&format!("Model support: {}", params.support))?;

        if self.verbose {
            let summary = ranked.summary();
            self.term.write_line(&format!(
                "  Scored: {}  Without coherence: {}",
                style(summary.scored).green(),
                style(summary.failed).yellow()
            ))?;
        }

        Ok(ranked)
    }

    /// Returns the set to keep working with: the filtered rules, or the full
    /// set when nothing matched or no filter was asked for.
    fn prompt_filter(&self, ranked: &RankedRuleSet) -> Result<RankedRuleSet> {
        let wants_filter = Confirm::with_theme(&self.theme)
            .with_prompt("Filter the result based on consequent?")
            .default(false)
            .interact_on(&self.term)?;
        if !wants_filter {
            return Ok(ranked.clone());
        }

        let target: String = Input::with_theme(&self.theme)
            .with_prompt("Enter the desired consequent value")
            .interact_text_on(&self.term)?;

        match ranked.filter_consequent(&target) {
            FilterOutcome::Matched(filtered) => {
                self.print_model(&filtered)?;
                Ok(filtered)
            }
            FilterOutcome::NoMatch => {
                self.term
                    .write_line(&format!("{}", style("No such rules found!").yellow()))?;
                Ok(ranked.clone())
            }
        }
    }

    fn prompt_reorder(&self, mut working: RankedRuleSet) -> Result<()> {
        loop {
            let reorder = Confirm::with_theme(&self.theme)
                .with_prompt("Reorder the result?")
                .default(false)
                .interact_on(&self.term)?;
            if !reorder {
                return Ok(());
            }

            let alpha: f64 = Input::with_theme(&self.theme)
                .with_prompt("Select alpha value [0.0, 1.0]")
                .default(self.config.default_alpha)
                .validate_with(|v: &f64| -> std::result::Result<(), String> {
                    if (0.0..=1.0).contains(v) {
                        Ok(())
                    } else {
                        Err("The number must be in the [0.0, 1.0] interval!".to_string())
                    }
                })
                .interact_text_on(&self.term)?;

            working = working.reorder(alpha)?;
            self.print_model(&working)?;
        }
    }

    fn print_model(&self, set: &RankedRuleSet) -> Result<()> {
        self.term.write_line("")?;
        self.term.write_line(&rule_table(set).to_string())?;
        self.term.write_line("")?;
        Ok(())
    }
}
