use super::export::EXPORT_FILE_NAME;
use super::state::{Command, FetchOutcome};
use crate::api::DashboardApi;
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Runs queued commands against the scoring API.
///
/// Every command settles on its own task and is sent back over the channel;
/// nothing here touches `App`.
pub struct AppActions {
    api: Arc<dyn DashboardApi>,
    export_dir: PathBuf,
    results: UnboundedSender<FetchOutcome>,
}

impl AppActions {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        export_dir: impl Into<PathBuf>,
        results: UnboundedSender<FetchOutcome>,
    ) -> Self {
        Self {
            api,
            export_dir: export_dir.into(),
            results,
        }
    }

    pub fn dispatch(&self, command: Command) {
        let api = Arc::clone(&self.api);
        let export_dir = self.export_dir.clone();
        let results = self.results.clone();

        tokio::spawn(async move {
            let outcome = execute(api.as_ref(), &export_dir, command).await;
            if results.send(outcome).is_err() {
                debug!("event loop gone; dropping settled fetch");
            }
        });
    }
}

/// Runs one command to completion.
pub async fn execute(
    api: &dyn DashboardApi,
    export_dir: &Path,
    command: Command,
) -> FetchOutcome {
    match command {
        Command::FetchScatter(request) => {
            debug!(seq = request.seq, "fetching scatter data");
            let result = api.scatter(&request.weights).await;
            FetchOutcome::Scatter(request.settle(result))
        }
        Command::FetchRadar => {
            debug!("fetching radar scores");
            FetchOutcome::Radar(api.raw_scores().await)
        }
        Command::ExportRaw => FetchOutcome::Export(export_raw(api, export_dir).await),
    }
}

pub async fn export_raw(api: &dyn DashboardApi, export_dir: &Path) -> Result<PathBuf> {
    let bytes = api.raw_data().await?;
    tokio::fs::create_dir_all(export_dir).await?;

    let path = export_dir.join(EXPORT_FILE_NAME);
    tokio::fs::write(&path, &bytes).await?;
    info!(path = %path.display(), bytes = bytes.len(), "raw data exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RadarScores, ScatterDataset};
    use crate::domain::WeightVector;
    use crate::error::{DashboardError, RAW_DATA_ENDPOINT};
    use async_trait::async_trait;

    struct RawOnly(Option<&'static [u8]>);

    #[async_trait]
    impl DashboardApi for RawOnly {
        async fn scatter(&self, _weights: &WeightVector) -> Result<Vec<ScatterDataset>> {
            Ok(Vec::new())
        }

        async fn raw_scores(&self) -> Result<RadarScores> {
            Ok(RadarScores {
                labels: Vec::new(),
                datasets: Vec::new(),
            })
        }

        async fn raw_data(&self) -> Result<Vec<u8>> {
            self.0.map(<[u8]>::to_vec).ok_or(DashboardError::Http {
                endpoint: RAW_DATA_ENDPOINT,
                status: 404,
            })
        }
    }

    #[tokio::test]
    async fn export_writes_raw_bytes_under_export_dir() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("exports");

        let path = export_raw(&RawOnly(Some(b"[{\"vendor\":1}]")), &target).await?;

        assert_eq!(path, target.join(EXPORT_FILE_NAME));
        assert_eq!(std::fs::read(&path)?, b"[{\"vendor\":1}]".to_vec());
        Ok(())
    }

    #[tokio::test]
    async fn failed_download_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;

        let outcome = execute(&RawOnly(None), dir.path(), Command::ExportRaw).await;

        assert!(matches!(outcome, FetchOutcome::Export(Err(DashboardError::Http { .. }))));
        assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
        Ok(())
    }
}
