// reset; cargo run -- parse --excel-file ./data/candidate.xlsx --name Ada --surname Lovelace
// reset; cargo run -- normalize --excel-file ./data/candidate.xlsx --output ./data/candidate.normalized.xlsx --profile client

use candidate_intake::{Args, Outcome, RunError, run};
use clap::Parser;
use intake_lib::ERRORS_LOG_FILE;
use intake_lib::utils::write_error_to_log;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let arguments = Args::parse();

    match run(&arguments.command) {
        Ok(Outcome::Record(record)) => {
            eprintln!("✅ Validation completed!");
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Ok(Outcome::Normalized { output }) => {
            eprintln!("✅ Normalized file created: {}", output.display());
        }
        Err(RunError::Candidate(e)) => {
            write_error_to_log(&format!("Candidate Upload Error [{}]", e.kind()), &e.to_string());
            eprintln!("❌ Validation failed with error: {e}");
            eprintln!("❌ Check {} for details.", ERRORS_LOG_FILE);
            std::process::exit(1);
        }
        Err(RunError::Other(e)) => {
            write_error_to_log("Candidate Intake Error", &format!("{e:#}"));
            eprintln!("❌ Failed with error: {e:#}");
            eprintln!("❌ Check {} for details.", ERRORS_LOG_FILE);
            std::process::exit(2);
        }
    }

    Ok(())
}
