use colored::Colorize;
use rw_dice::notation::tokenize;

pub fn run(notation: &str, json: bool) -> Result<(), String> {
    let validation = rw_dice::validate(notation);

    if json {
        let out = serde_json::to_string_pretty(&validation).map_err(|e| e.to_string())?;
        println!("{out}");
    } else if validation.valid {
        for (canonical, clauses) in validation.notation.iter().zip(&validation.description) {
            println!("  {} {}", "✓".green(), canonical.bold());
            for clause in clauses {
                println!("    {clause}");
            }
        }
    } else if let Err(e) = tokenize(notation) {
        eprint!("{}", crate::diagnostics::render_dice_error(&e));
    }

    if validation.valid {
        Ok(())
    } else {
        Err(format!("invalid dice notation: {notation:?}"))
    }
}
