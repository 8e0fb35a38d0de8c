use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rw_dice::{AggregateResult, DieGroupResult};

use super::CliSource;

pub fn run(notation: &[String], seed: Option<u64>, json: bool) -> Result<(), String> {
    let mut source = CliSource::new(seed);
    let result = rw_dice::roll_notation(notation.iter().map(String::as_str), &mut source)
        .map_err(super::report)?;

    if json {
        let out = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    print_result(&result);
    Ok(())
}

fn print_result(result: &AggregateResult) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Group", "Rolls", "Total", "Description"]);

    for group in &result.rolls {
        let key = group.parameters.key.clone().unwrap_or_default();
        table.add_row(vec![
            key,
            rolls_cell(group),
            group.applied_total.to_string(),
            group.description.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} {}",
        "Result:".bold(),
        result.result.join(", ").cyan()
    );
    println!(
        "  {} {}",
        "Total:".bold(),
        result.total.to_string().green().bold()
    );
}

/// `[initial] → [final]` when modifiers changed anything.
fn rolls_cell(group: &DieGroupResult) -> String {
    let list = |values: &[String]| format!("[{}]", values.join(", "));
    let current = list(&group.display_values());
    if group.initial_rolls == group.rolls {
        return current;
    }
    let initial: Vec<String> = group.initial_rolls.iter().map(i64::to_string).collect();
    format!("{} → {current}", list(&initial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rw_dice::{ScriptedSource, roll_notation};

    #[test]
    fn rolls_cell_shows_changes() {
        let mut source = ScriptedSource::new([2, 4, 6, 1]);
        let result = roll_notation(["4d6H"], &mut source).unwrap();
        assert_eq!(rolls_cell(&result.rolls[0]), "[2, 4, 6, 1] → [2, 4, 1]");
    }

    #[test]
    fn rolls_cell_plain() {
        let mut source = ScriptedSource::new([3, 5]);
        let result = roll_notation(["2d6"], &mut source).unwrap();
        assert_eq!(rolls_cell(&result.rolls[0]), "[3, 5]");
    }
}
