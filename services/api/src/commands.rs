use clap::Args;
use listing_moderation::config::get_settings;
use listing_moderation::error::AppError;
use listing_moderation::moderation::{
    ModerationDecision, ModerationEngine, ModerationService, ModerationSubmission, NoopRecorder,
};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ModerateArgs {
    /// Path to a JSON moderation request, or `-` to read from stdin
    #[arg(long)]
    pub(crate) input: PathBuf,
}

pub(crate) fn run_moderate(args: ModerateArgs) -> Result<(), AppError> {
    let submission = read_submission(&args.input)?;
    let decision = moderate_offline(submission)?;
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

pub(crate) fn run_settings() -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(get_settings())?);
    Ok(())
}

pub(crate) fn moderate_offline(
    submission: ModerationSubmission,
) -> Result<ModerationDecision, AppError> {
    let service = ModerationService::new(
        ModerationEngine::new(get_settings().clone()),
        Arc::new(NoopRecorder),
    );
    Ok(service.moderate(submission)?)
}

fn read_submission(path: &Path) -> Result<ModerationSubmission, AppError> {
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        return Ok(serde_json::from_str(&raw)?);
    }

    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
