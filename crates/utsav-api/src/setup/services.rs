//! Service construction: storage, remote capabilities, summaries.

use std::path::Path;
use std::sync::Arc;

use utsav_archive::{
    acquire_credentials, HttpObjectStore, HttpWorksheet, RecordLedger, RemoteArchiver,
    ServiceCredentials,
};
use utsav_core::models::SummaryStrategy;
use utsav_core::validation::StoryValidator;
use utsav_core::Config;
use utsav_storage::create_storage;
use utsav_summary::{HttpSummarizer, HttpTranscriber, SummaryService};

use crate::services::{DraftStore, RemoteServices, SubmissionWorkflow};
use crate::state::AppState;

/// Build the full application state from configuration.
///
/// Missing or unusable archive credentials are not fatal: the service
/// starts with remote archival and record append disabled, and the save
/// endpoint reports the credential error per request.
pub async fn build_state(config: Config) -> Result<Arc<AppState>, anyhow::Error> {
    config.validate()?;

    let storage = create_storage(&config).await?;

    let validator = StoryValidator::new(
        config.max_upload_bytes(),
        config.allowed_extensions().to_vec(),
        config.allowed_content_types().to_vec(),
    );

    let remote = match acquire_credentials(
        Path::new(config.credentials_file()),
        config.credentials_json(),
    ) {
        Ok(credentials) => match build_remote(&config, &credentials).await {
            Ok(remote) => Some(remote),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Failed to reach the remote archive; starting without remote archival and record append"
                );
                None
            }
        },
        Err(err) => {
            tracing::warn!(
                error = %err,
                "Archive credentials unavailable; starting without remote archival and record append"
            );
            None
        }
    };

    let summaries = build_summaries(&config)?;

    let drafts = DraftStore::new(config.draft_ttl());

    let workflow = SubmissionWorkflow::new(storage, validator, remote, summaries, drafts);

    Ok(AppState::new(config, workflow))
}

async fn build_remote(
    config: &Config,
    credentials: &ServiceCredentials,
) -> Result<RemoteServices, anyhow::Error> {
    let spreadsheet_id = config
        .spreadsheet_id()
        .ok_or_else(|| anyhow::anyhow!("UTSAV_SPREADSHEET_ID is not configured"))?;

    let object_store = HttpObjectStore::new(
        config.drive_api_url().to_string(),
        config.drive_upload_url().to_string(),
        credentials.access_token.clone(),
    )?;
    let archiver = RemoteArchiver::new(
        Arc::new(object_store),
        config.drive_root_folder().to_string(),
        config.retry_policy(),
    );

    let worksheet = HttpWorksheet::connect(
        config.sheets_api_url().to_string(),
        spreadsheet_id.to_string(),
        config.worksheet_title().to_string(),
        credentials.access_token.clone(),
    )
    .await?;
    let ledger = RecordLedger::new(Arc::new(worksheet), config.retry_policy());

    Ok(RemoteServices { archiver, ledger })
}

fn build_summaries(config: &Config) -> Result<SummaryService, anyhow::Error> {
    match config.summary_strategy() {
        SummaryStrategy::Template => {
            tracing::info!("Summary generation uses language templates");
            Ok(SummaryService::template_only(config.retry_policy()))
        }
        SummaryStrategy::Model => {
            let api_key = config.summary_api_key().map(String::from);
            let summarizer = HttpSummarizer::new(
                config.summary_api_url().to_string(),
                config.summary_model().to_string(),
                api_key.clone(),
            )?;
            let transcriber = HttpTranscriber::new(
                config.summary_api_url().to_string(),
                config.transcribe_model().to_string(),
                api_key,
            )?;
            tracing::info!(
                summary_model = config.summary_model(),
                transcribe_model = config.transcribe_model(),
                "Summary generation uses the external model"
            );
            Ok(SummaryService::new(
                SummaryStrategy::Model,
                Some(Arc::new(summarizer)),
                Some(Arc::new(transcriber)),
                config.retry_policy(),
            ))
        }
    }
}
