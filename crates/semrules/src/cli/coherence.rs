use console::style;
use semrules_lib::{CoherenceContext, Config, EmbeddingModel, Result, SemrulesError, SenseResolver};

/// Split arguments on commas, trimming whitespace and stray quotes.
fn parse_attributes(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(|att| att.trim().replace('"', ""))
        .filter(|att| !att.is_empty())
        .collect()
}

pub fn handle_coherence_command(model: &EmbeddingModel, config: &Config, args: &[String]) -> Result<()> {
    let attributes = parse_attributes(args);
    if attributes.is_empty() {
        return Err(SemrulesError::EmptyRule);
    }

    let mut ctx = CoherenceContext::new(model, config.language);
    let summary = ctx.precompute(&attributes)?;
    if summary.unresolved > 0 {
        for (pair, word) in ctx.cache().unresolved() {
            println!(
                "  {} ({}, {}): '{}' not in vocabulary",
                style("·").dim(),
                pair.first(),
                pair.second(),
                word
            );
        }
    }

    let coherence = ctx.rule_coherence(&attributes)?;
    println!(
        "{} Semantic coherence of [{}]: {}",
        style("✓").green(),
        attributes.join(", "),
        style(format!("{:.4}", coherence)).bold()
    );
    Ok(())
}

pub fn handle_similarity_command(
    model: &EmbeddingModel,
    config: &Config,
    word1: &str,
    word2: &str,
) -> Result<()> {
    let resolver = SenseResolver::new(model, config.language);

    for word in [word1, word2] {
        let variants = resolver.variants(word);
        if variants.is_empty() {
            println!("  {}: {}", word, style("no senses in vocabulary").yellow());
        } else {
            println!("  {}: {}", word, variants.join(", "));
        }
    }

    let similarity = resolver.word_similarity(word1, word2)?;
    println!(
        "{} similarity({}, {}) = {}",
        style("✓").green(),
        word1,
        word2,
        style(format!("{:.4}", similarity)).bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes() {
        let args = vec![
            "cat, dog".to_string(),
            "\"cat shelter\"".to_string(),
            " ,".to_string(),
        ];
        assert_eq!(parse_attributes(&args), vec!["cat", "dog", "cat shelter"]);
    }
}
