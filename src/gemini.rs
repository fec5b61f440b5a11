use anyhow::{anyhow, bail};
use biolumen_core::{generation_url, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// `fetch`-backed transport for the generation service.
///
/// The key comes from the page URL (`?key=...`) or, failing that, from
/// `GEMINI_API_KEY` at build time. Without one every request fails and the
/// caller falls back.
pub struct GeminiTransport {
    api_key: Option<String>,
}

impl GeminiTransport {
    pub fn from_page() -> Self {
        let api_key = page_api_key().or_else(|| option_env!("GEMINI_API_KEY").map(str::to_string));
        Self { api_key }
    }
}

fn page_api_key() -> Option<String> {
    let search = web::window()?.location().search().ok()?;
    let params = web::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("key").filter(|k| !k.trim().is_empty())
}

impl Transport for GeminiTransport {
    async fn post_json(&self, body: String) -> anyhow::Result<String> {
        let Some(key) = self.api_key.as_deref() else {
            bail!("no generation API key configured");
        };
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;

        let opts = web::RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(web::RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));
        let request = web::Request::new_with_str_and_init(&generation_url(key), &opts)
            .map_err(js_err)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_err)?;

        let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        if !response.ok() {
            bail!(
                "generation request failed: HTTP {} {}",
                response.status(),
                response.status_text()
            );
        }
        let text = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        text.as_string()
            .ok_or_else(|| anyhow!("generation response body is not text"))
    }
}
