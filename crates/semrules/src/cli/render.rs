use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use semrules_lib::util::format::format_score;
use semrules_lib::RankedRuleSet;

pub fn rule_table(set: &RankedRuleSet) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("Antecedent").fg(Color::Cyan),
        Cell::new("Consequent").fg(Color::Cyan),
        Cell::new("Conf").fg(Color::Cyan),
        Cell::new("Supp").fg(Color::Cyan),
        Cell::new("SC").fg(Color::Cyan),
    ]);

    for (idx, ranked) in set.iter().enumerate() {
        let antecedent: Vec<String> = ranked.rule.antecedent.iter().map(|c| c.to_string()).collect();
        let coherence = match ranked.coherence {
            Some(_) => Cell::new(format_score(ranked.coherence)),
            None => Cell::new(format_score(None)).fg(Color::Yellow),
        };

        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(antecedent.join(" & ")),
            Cell::new(ranked.rule.consequent.to_string()),
            Cell::new(format!("{:.2}", ranked.rule.confidence)),
            Cell::new(format!("{:.2}", ranked.rule.support)),
            coherence,
        ]);
    }

    table
}
