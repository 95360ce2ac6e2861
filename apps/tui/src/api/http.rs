use super::types::{RadarScores, ScatterDataset};
use super::DashboardApi;
use crate::domain::WeightVector;
use crate::error::{DashboardError, Result, RADAR_ENDPOINT, RAW_DATA_ENDPOINT, SCATTER_ENDPOINT};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Client for a remote scoring service.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("vendor_landscape/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::transport("client", &e))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn get(
        &self,
        endpoint: &'static str,
        query: &[(String, String)],
    ) -> Result<reqwest::Response> {
        debug!(endpoint, params = query.len(), "issuing request");
        let response = self
            .client
            .get(self.url(endpoint))
            .query(query)
            .send()
            .await
            .map_err(|e| DashboardError::transport(endpoint, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Http {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn get_json(
        &self,
        endpoint: &'static str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value> {
        self.get(endpoint, query)
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DashboardError::malformed(endpoint, format!("body is not JSON: {e}")))
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn scatter(&self, weights: &WeightVector) -> Result<Vec<ScatterDataset>> {
        let body = self.get_json(SCATTER_ENDPOINT, &weights.to_query()).await?;
        if !body.is_array() {
            return Err(DashboardError::malformed(
                SCATTER_ENDPOINT,
                "expected a JSON array of datasets",
            ));
        }

        serde_json::from_value(body)
            .map_err(|e| DashboardError::malformed(SCATTER_ENDPOINT, e.to_string()))
    }

    async fn raw_scores(&self) -> Result<RadarScores> {
        let body = self.get_json(RADAR_ENDPOINT, &[]).await?;
        let scores: RadarScores = serde_json::from_value(body)
            .map_err(|e| DashboardError::malformed(RADAR_ENDPOINT, e.to_string()))?;
        scores.validate()?;
        Ok(scores)
    }

    async fn raw_data(&self) -> Result<Vec<u8>> {
        let bytes = self
            .get(RAW_DATA_ENDPOINT, &[])
            .await?
            .bytes()
            .await
            .map_err(|e| DashboardError::transport(RAW_DATA_ENDPOINT, &e))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::KpiKey;
    use mockito::Matcher;

    fn weights() -> WeightVector {
        let mut weights =
            WeightVector::uniform([KpiKey::from("kpiA"), KpiKey::from("kpiB")], 5);
        weights.set(&KpiKey::from("kpiB"), 9);
        weights
    }

    #[tokio::test]
    async fn scatter_sends_every_weight_as_a_parameter() -> Result<(), Box<dyn std::error::Error>>
    {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/data")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("kpiA".into(), "5".into()),
                Matcher::UrlEncoded("kpiB".into(), "9".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{ "label": "Acme", "data": [{ "x": 40, "y": 60, "vendor": "Acme" }] }]"#)
            .create_async()
            .await;

        let api = HttpApi::new(server.url())?;
        let datasets = api.scatter(&weights()).await?;

        mock.assert_async().await;
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].data[0].vendor.as_deref(), Some("Acme"));
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/data")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{ "error": "No vendor data available" }"#)
            .create_async()
            .await;

        let api = HttpApi::new(server.url())?;
        let result = api.scatter(&weights()).await;

        assert!(matches!(
            result,
            Err(DashboardError::Http { status: 500, .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() -> Result<(), Box<dyn std::error::Error>> {
        let api = HttpApi::new("http://127.0.0.1:1")?;
        let result = api.scatter(&weights()).await;

        let Err(error) = result else {
            return Err("request to a closed port succeeded".into());
        };
        assert!(matches!(
            error,
            DashboardError::Transport {
                endpoint: SCATTER_ENDPOINT,
                ..
            }
        ));
        assert_eq!(error.kind(), "HttpError");
        Ok(())
    }

    #[tokio::test]
    async fn non_array_scatter_body_is_malformed() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/data")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "datasets": [] }"#)
            .create_async()
            .await;

        let api = HttpApi::new(server.url())?;
        let result = api.scatter(&weights()).await;

        assert!(matches!(
            result,
            Err(DashboardError::MalformedResponse { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn radar_length_mismatch_is_rejected_at_the_boundary(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/rawscores")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "labels": ["A", "B", "C"], "datasets": [{ "label": "Acme", "data": [1, 2] }] }"#)
            .create_async()
            .await;

        let api = HttpApi::new(format!("{}/", server.url()))?;
        let result = api.raw_scores().await;

        assert!(matches!(
            result,
            Err(DashboardError::MalformedResponse { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn raw_data_returns_body_bytes() -> Result<(), Box<dyn std::error::Error>> {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/rawdata")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let api = HttpApi::new(server.url())?;
        assert_eq!(api.raw_data().await?, b"[]".to_vec());
        Ok(())
    }
}
