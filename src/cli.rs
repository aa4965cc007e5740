use clap::Parser;

use crate::pipeline::DecompressCommand;

#[derive(Parser, Debug)]
#[command(name = "s3unzip")]
#[command(version)]
#[command(about = "Decompress a zip archive stored in S3 into individual objects", long_about = None)]
#[command(after_help = "Examples:\n  \
  s3unzip my-bucket path/to/archive.zip\n  \
  s3unzip my-bucket a.zip -t other-bucket -p extracted --delete\n  \
  s3unzip my-bucket a.zip --copy-metadata -v")]
pub struct Cli {
    /// Bucket holding the zip archive
    #[arg(value_name = "BUCKET")]
    pub bucket: String,

    /// Key of the zip archive
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Upload entries to this bucket instead of the source bucket
    #[arg(short = 't', long = "target-bucket", value_name = "BUCKET")]
    pub target_bucket: Option<String>,

    /// Key prefix for uploaded entries
    #[arg(short = 'p', long = "target-prefix", value_name = "PREFIX")]
    pub target_prefix: Option<String>,

    /// Delete the source archive once every entry has uploaded
    #[arg(short = 'd', long = "delete")]
    pub delete: bool,

    /// Copy the source object's metadata onto every uploaded entry
    #[arg(short = 'm', long = "copy-metadata")]
    pub copy_metadata: bool,

    /// Narrate pipeline progress
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Override the AWS region
    #[arg(short = 'r', long = "region", value_name = "REGION")]
    pub region: Option<String>,
}

impl Cli {
    /// Build the pipeline command these arguments describe
    pub fn to_command(&self) -> DecompressCommand {
        let mut command = DecompressCommand::new(&self.bucket, &self.key);
        command.target_bucket = self.target_bucket.clone();
        command.target_prefix = self.target_prefix.clone().unwrap_or_default();
        command.delete_source_on_success = self.delete;
        command.copy_metadata = self.copy_metadata;
        command.verbose = self.verbose;
        command.region = self.region.clone();
        command
    }
}
