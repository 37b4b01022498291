use log::info;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};

use crate::error::AppError;

// Image generation is by far the slowest collaborator.
const PORTRAIT_TIMEOUT: Duration = Duration::from_secs(120);

const NEGATIVE_PROMPT: &str = "ugly, deformed, disfigured, blurry, grainy, low resolution, \
    bad anatomy, dismembered, extra limbs, poorly drawn face, poorly drawn hands, missing limbs, \
    malformed limbs, tiling, poorly rendered, out of frame";

#[derive(Debug, Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    steps: u32,
    cfg_scale: f32,
    width: u32,
    height: u32,
    sampler_name: &'a str,
    n_iter: u32,
    batch_size: u32,
    seed: i64,
}

#[derive(Debug, Deserialize)]
struct Txt2ImgResponse {
    #[serde(default)]
    images: Vec<String>,
}

// Client for the local Stable Diffusion WebUI txt2img endpoint.
#[derive(Debug, Clone)]
pub struct PortraitClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortraitClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(PORTRAIT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Generates a portrait and returns it as base64-encoded PNG data.
    pub async fn generate(
        &self,
        race: &str,
        class: &str,
        name: &str,
        gender: &str,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "Fantasy RPG character portrait, {race} {class} named {name}, {gender}, \
             intricate details, fantasy art, volumetric lighting, epic, highly detailed, \
             sharp focus, artstation, concept art, digital painting"
        );
        let request = Txt2ImgRequest {
            prompt: &prompt,
            negative_prompt: NEGATIVE_PROMPT,
            steps: 25,
            cfg_scale: 7.0,
            width: 512,
            height: 768, // Portrait aspect ratio.
            sampler_name: "Euler a",
            n_iter: 1,
            batch_size: 1,
            seed: -1,
        };

        info!("[portrait] requesting txt2img for {name} ({race} {class})");
        let url = format!("{}/sdapi/v1/txt2img", self.base_url);
        let response = match timeout(PORTRAIT_TIMEOUT, self.http.post(&url).json(&request).send())
            .await
        {
            Ok(response) => response?,
            Err(_) => return Err(AppError::Timeout),
        };
        let response = response.error_for_status()?;
        let data: Txt2ImgResponse = response.json().await?;

        data.images
            .into_iter()
            .next()
            .filter(|image| !image.is_empty())
            .ok_or_else(|| AppError::Portrait("no image data returned".to_string()))
    }
}
