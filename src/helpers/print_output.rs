use crate::types::output::Output;
use colored::*;

/// Print an issued token. Stdout carries only the token (or its JSON
/// envelope); status lines go to stderr.
pub fn print_output(format: &str, output: &Output) -> Result<(), serde_json::Error> {
    println!("{}", render(format, output)?);
    if format != "json" {
        eprintln!(
            "{} {} token for topic {}",
            "[+]".green(),
            output.role.to_string().bold(),
            output.topic.cyan()
        );
        if let Some(exp) = output.exp {
            eprintln!("{} expires at {}", "[+]".green(), exp);
        }
    }
    Ok(())
}

pub fn render(format: &str, output: &Output) -> Result<String, serde_json::Error> {
    match format {
        "json" => serde_json::to_string(output),
        _ => Ok(output.token.clone()),
    }
}

pub fn print_error(err: &dyn std::error::Error) {
    eprintln!("{} {}", "[!]".red(), err.to_string().red());
}
