use molviz::engine::error::TranslationError;
use molviz::workflows::lookup::Translator;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

/// Client for the public Google Translate endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    url: Url,
}

impl GoogleTranslator {
    pub fn new(client: Client, url: &str) -> Result<Self, TranslationError> {
        let url = Url::parse(url).map_err(|e| TranslationError(format!("{url}: {e}")))?;
        Ok(Self { client, url })
    }

    fn request_url(&self, text: &str, source: &str, target: &str) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", source)
            .append_pair("tl", target)
            .append_pair("dt", "t")
            .append_pair("q", text);
        url
    }
}

impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let url = self.request_url(text, source, target);
        debug!(source, target, "Requesting translation.");
        let body: Value = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| TranslationError(e.to_string()))?
            .json()
            .await
            .map_err(|e| TranslationError(e.to_string()))?;
        first_segment(&body)
    }
}

/// The response is nested arrays; the translation of the first sentence
/// sits at `[0][0][0]`.
fn first_segment(body: &Value) -> Result<String, TranslationError> {
    body.get(0)
        .and_then(|sentences| sentences.get(0))
        .and_then(|sentence| sentence.get(0))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| TranslationError("unexpected translation response".to_string()))
}
