use clap::Parser;
use colored::*;

use s3unzip::cli::Cli;
use s3unzip::pipeline::{self, DecompressError};
use s3unzip::s3::S3Client;
use s3unzip::ui::create_spinner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.to_command();

    let client = match S3Client::new(command.region.clone()).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "{} Failed to initialize S3 client: {:#}",
                "Error:".red().bold(),
                e
            );
            eprintln!("Make sure you have valid AWS credentials configured.");
            std::process::exit(1);
        }
    };

    // In verbose mode the pipeline narrates its own progress
    let spinner = (!command.verbose).then(|| {
        create_spinner(&format!(
            "Decompressing s3://{}/{}...",
            command.source_bucket, command.source_key
        ))
    });

    let result = pipeline::run(&client, &command).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(summary) => {
            if let Some(delete_error) = &summary.delete_error {
                eprintln!("{} {}", "Delete Error:".red().bold(), delete_error);
            }
            println!(
                "{} {} entries decompressed to s3://{}/{}",
                "Success!".green().bold(),
                summary.uploaded.len(),
                command.upload_bucket(),
                command.target_prefix
            );
        }
        Err(error) => {
            report_error(&error);
            std::process::exit(1);
        }
    }
}

/// Print a pipeline error, expanding per-entry upload failures
fn report_error(error: &DecompressError) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    if let DecompressError::Upload { failures, uploaded } = error {
        for failure in failures {
            eprintln!("  {} '{}': {:#}", "failed".red(), failure.entry, failure.error);
        }
        if !uploaded.is_empty() {
            eprintln!(
                "  {} entries uploaded before the failure; the source archive was kept",
                uploaded.len()
            );
        }
    }
}
