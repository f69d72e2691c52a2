//! # Hospital directory client
//!
//! Queries the bedav GraphQL api. Queries are parameterized through
//! GraphQL variables, nothing typed by users is spliced into the query.

use crate::{config, errors::DirectoryError, models::hospital};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

const HOSPITAL_FIELDS: &str = "
    id
    name
    icuAvailable
    hduAvailable
    oxygenAvailable
    generalAvailable
    ventilatorsAvailable
    icuOccupied
    hduOccupied
    oxygenOccupied
    generalOccupied
    ventilatorsOccupied
    icuTotal
    hduTotal
    oxygenTotal
    generalTotal
    ventilatorsTotal
    address
    latitude
    longitude
    phone
    website
    city
    state
";

pub fn search_hospitals_query() -> String {
    format!(
        "query SearchHospitals($locality: String!, $searchQuery: String, $first: Int) {{
  locality(name: $locality) {{
    hospitals(first: $first, searchQuery: $searchQuery) {{
      edges {{ node {{ {HOSPITAL_FIELDS} }} }}
    }}
  }}
}}"
    )
}

pub fn get_hospital_query() -> String {
    format!(
        "query GetHospital($id: ID!) {{
  hospital(id: $id) {{ {HOSPITAL_FIELDS} }}
}}"
    )
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    locality: Option<LocalityNode>,
}

#[derive(Debug, Deserialize)]
struct LocalityNode {
    hospitals: HospitalConnection,
}

#[derive(Debug, Deserialize)]
struct HospitalConnection {
    edges: Vec<HospitalEdge>,
}

#[derive(Debug, Deserialize)]
struct HospitalEdge {
    node: hospital::Hospital,
}

#[derive(Debug, Deserialize)]
struct HospitalData {
    hospital: Option<hospital::Hospital>,
}

/// Client of the bedav GraphQL endpoint
#[derive(Clone)]
pub struct BedavDirectory {
    client: reqwest::Client,
    endpoint: String,
    result_limit: u32,
}

impl BedavDirectory {
    pub fn new(endpoint: String, result_limit: u32, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint,
            result_limit,
        }
    }

    /// Creates a client from [`config::APP_CONFIG`]
    pub fn from_config() -> anyhow::Result<Self> {
        let app_config = config::APP_CONFIG
            .get()
            .context("failed to get app config")?;

        let client = reqwest::Client::builder()
            .timeout(app_config.http_timeout())
            .build()
            .context("failed to build directory http client")?;

        Ok(Self::new(
            app_config.directory_endpoint.clone(),
            app_config.search_result_limit,
            client,
        ))
    }

    async fn run_query<T: DeserializeOwned>(
        &self,
        query: String,
        variables: serde_json::Value,
    ) -> Result<T, DirectoryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            return Err(DirectoryError::Transport(format!(
                "directory returned status {status}: {body}"
            )));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| DirectoryError::Schema(e.to_string()))?;

        if !body.errors.is_empty() {
            let messages = body
                .errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DirectoryError::Schema(messages));
        }

        body.data
            .ok_or_else(|| DirectoryError::Schema("response has no data".to_string()))
    }
}

#[async_trait]
impl super::DirectoryService for BedavDirectory {
    async fn search_hospitals(
        &self,
        locality_key: &str,
        search_query: &str,
    ) -> Result<Vec<hospital::Hospital>, DirectoryError> {
        let data: SearchData = self
            .run_query(
                search_hospitals_query(),
                json!({
                    "locality": locality_key,
                    "searchQuery": search_query,
                    "first": self.result_limit,
                }),
            )
            .await?;

        // a locality the directory does not know has no hospitals
        Ok(data
            .locality
            .map(|locality| {
                locality
                    .hospitals
                    .edges
                    .into_iter()
                    .map(|edge| edge.node)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_hospital(
        &self,
        hospital_id: u64,
    ) -> Result<Option<hospital::Hospital>, DirectoryError> {
        let data: HospitalData = self
            .run_query(
                get_hospital_query(),
                json!({ "id": hospital::encode_hospital_id(hospital_id) }),
            )
            .await?;

        Ok(data.hospital)
    }
}
