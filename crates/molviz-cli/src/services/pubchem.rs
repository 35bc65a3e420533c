use molviz::engine::error::LookupError;
use molviz::workflows::lookup::{CompoundDirectory, FetchedStructure};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Deserialize)]
struct CidResponse {
    #[serde(rename = "IdentifierList")]
    identifier_list: IdentifierList,
}

#[derive(Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID", default)]
    cid: Vec<u64>,
}

#[derive(Deserialize)]
struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties", default)]
    properties: Vec<CompoundProperties>,
}

#[derive(Deserialize)]
struct CompoundProperties {
    #[serde(rename = "MolecularFormula")]
    molecular_formula: Option<String>,
}

/// PubChem PUG REST client.
#[derive(Debug, Clone)]
pub struct PubChemClient {
    client: Client,
    base_url: Url,
}

impl PubChemClient {
    pub fn new(client: Client, base_url: &str) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url).map_err(|e| unavailable(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(unavailable(format!("{base_url} cannot be used as a base URL")));
        }
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_text(
        &self,
        url: Url,
        missing: impl FnOnce() -> LookupError,
    ) -> Result<String, LookupError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        check_status(response.status(), missing)?;
        response.text().await.map_err(|e| unavailable(e.to_string()))
    }
}

impl CompoundDirectory for PubChemClient {
    #[instrument(skip_all, name = "pubchem_resolve", fields(name = %name))]
    async fn resolve_identifier(&self, name: &str) -> Result<u64, LookupError> {
        let url = self.endpoint(&["name", name, "cids", "JSON"]);
        let body = self.get_text(url, || not_found(name)).await?;
        parse_cid_response(&body, name)
    }

    #[instrument(skip_all, name = "pubchem_fetch", fields(identifier = identifier))]
    async fn fetch_structure(&self, identifier: u64) -> Result<FetchedStructure, LookupError> {
        let cid = identifier.to_string();
        let label = format!("CID {cid}");

        let url = self.endpoint(&["cid", &cid, "property", "MolecularFormula", "JSON"]);
        let body = self.get_text(url, || not_found(&label)).await?;
        let formula = parse_formula_response(&body)?;

        let mut url = self.endpoint(&["cid", &cid, "record", "SDF", ""]);
        url.query_pairs_mut()
            .append_pair("record_type", "3d")
            .append_pair("response_type", "display");
        let text = self
            .get_text(url, || not_found(&format!("{label} (no 3D structure)")))
            .await?;

        debug!(%formula, bytes = text.len(), "Fetched 3D structure.");
        Ok(FetchedStructure { formula, text })
    }
}

fn not_found(name: &str) -> LookupError {
    LookupError::NotFound {
        name: name.to_string(),
    }
}

fn unavailable(reason: impl Into<String>) -> LookupError {
    LookupError::ServiceUnreachable {
        reason: reason.into(),
    }
}

/// 404 means the service answered and knows nothing; every other failure
/// status is treated as the service being unavailable.
fn check_status(
    status: StatusCode,
    missing: impl FnOnce() -> LookupError,
) -> Result<(), LookupError> {
    if status == StatusCode::NOT_FOUND {
        Err(missing())
    } else if !status.is_success() {
        Err(unavailable(format!("HTTP {status}")))
    } else {
        Ok(())
    }
}

fn parse_cid_response(body: &str, name: &str) -> Result<u64, LookupError> {
    let response: CidResponse = serde_json::from_str(body)
        .map_err(|e| unavailable(format!("unexpected identifier response: {e}")))?;
    response
        .identifier_list
        .cid
        .first()
        .copied()
        .ok_or_else(|| not_found(name))
}

fn parse_formula_response(body: &str) -> Result<String, LookupError> {
    let response: PropertyResponse = serde_json::from_str(body)
        .map_err(|e| unavailable(format!("unexpected property response: {e}")))?;
    response
        .property_table
        .properties
        .into_iter()
        .next()
        .and_then(|p| p.molecular_formula)
        .ok_or_else(|| unavailable("property response has no MolecularFormula"))
}
