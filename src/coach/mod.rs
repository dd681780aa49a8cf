//! The coaching collaborator: free text in, a mode recommendation out.
//!
//! One blocking HTTP call to a Gemini-style JSON endpoint turns the
//! user's raw intention ("je dois finir ce rapport mais je n'arrive pas à
//! commencer") into an empathetic reformulation, a micro-strategy, a
//! mantra and a sound mode. The call either succeeds or it doesn't - and
//! when it doesn't, for ANY reason, the caller still gets a
//! `Recommendation`: the internal two-arm result is collapsed against a
//! fixed fallback payload, so the absence of a network, a key or a
//! well-formed response can never propagate as an error.
//!
//! Callers who must not block (the TUI) run `recommend` on a worker
//! thread; playback control stays live while the request is outstanding.

use serde::Deserialize;
use thiserror::Error;

use crate::modes::Mode;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// What the coach hands back. Immutable once produced; the presentation
/// layer holds it until the user resets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    /// Empathetic reformulation of the user's need.
    pub understanding: String,
    /// Actionable micro-advice.
    pub strategy: String,
    /// Short motivational phrase.
    pub mantra: String,
    /// Recommended sound mode.
    pub mode: Mode,
}

impl Recommendation {
    /// The fixed payload delivered on any service failure.
    pub fn fallback() -> Self {
        Self {
            understanding:
                "Je perçois votre besoin de clarté. Nous allons structurer cet instant ensemble."
                    .to_string(),
            strategy: "Commencez par 2 minutes d'action, juste pour amorcer la pompe.".to_string(),
            mantra: "Le mouvement crée la motivation.".to_string(),
            mode: Mode::Focus,
        }
    }
}

/// Where and how to reach the service. All values come from the
/// environment with compiled defaults; nothing is persisted.
pub struct CoachConfig {
    /// API base, overridable for tests via `DRIFT_COACH_URL`.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl CoachConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("DRIFT_COACH_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            model: std::env::var("DRIFT_COACH_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key: std::env::var("GEMINI_API_KEY").ok(),
        }
    }
}

/// Internal failure taxonomy. Logged, never returned to callers.
#[derive(Debug, Error)]
enum CoachError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response carried no generated text")]
    MissingContent,
}

/// Ask the coach, using configuration from the environment.
pub fn recommend(input: &str) -> Recommendation {
    recommend_with(&CoachConfig::from_env(), input)
}

/// Ask the coach with explicit configuration.
///
/// Guaranteed to return: any failure collapses into the fixed fallback
/// payload with mode FOCUS.
pub fn recommend_with(config: &CoachConfig, input: &str) -> Recommendation {
    match fetch(config, input) {
        Ok(recommendation) => recommendation,
        Err(err) => {
            tracing::warn!(error = %err, "coach unavailable, using fallback");
            Recommendation::fallback()
        }
    }
}

fn fetch(config: &CoachConfig, input: &str) -> Result<Recommendation, CoachError> {
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        config.endpoint,
        config.model,
        config.api_key.as_deref().unwrap_or_default()
    );

    let response = ureq::post(&url)
        .timeout(std::time::Duration::from_secs(15))
        .set("Content-Type", "application/json")
        .send_string(&request_body(input).to_string())
        .map_err(|err| CoachError::Http(err.to_string()))?;

    let body = response.into_string()?;
    parse_recommendation(&body)
}

/// The generation request: French coaching prompt plus a response schema
/// that pins the mode to the four known values.
fn request_body(input: &str) -> serde_json::Value {
    let prompt = format!(
        "L'utilisateur exprime son état actuel ou sa tâche de manière brute \
         (peut être mal écrit, confus ou fragmenté) : \"{input}\".\n\n\
         En tant que coach de concentration, vous devez :\n\
         1. Reformuler avec une empathie profonde ce que l'utilisateur traverse \
         pour prouver que vous avez compris son intention réelle (max 25 mots).\n\
         2. Fournir une micro-stratégie spécifique pour réussir (max 15 mots).\n\
         3. Un mantra court et puissant.\n\
         4. Choisir le mode sonore : FOCUS (travail intense), RELAX (anxiété/pause), \
         MOVE (énergie/tâches ménagères), SLEEP (repos).\n\n\
         Répondez strictement en JSON en français."
    );

    serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "understanding": { "type": "STRING" },
                    "strategy": { "type": "STRING" },
                    "mantra": { "type": "STRING" },
                    "mode": { "type": "STRING", "enum": ["FOCUS", "RELAX", "MOVE", "SLEEP"] }
                },
                "required": ["understanding", "strategy", "mantra", "mode"]
            }
        }
    })
}

/// Dig the generated JSON document out of the service envelope and parse
/// it into a `Recommendation`.
fn parse_recommendation(body: &str) -> Result<Recommendation, CoachError> {
    let envelope: serde_json::Value = serde_json::from_str(body)?;
    let text = envelope["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or(CoachError::MissingContent)?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(inner: &str) -> String {
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": inner }] } }]
        })
        .to_string()
    }

    #[test]
    fn parses_well_formed_response() {
        let inner = r#"{
            "understanding": "Vous êtes submergé par la tâche.",
            "strategy": "Découpez en étapes de 5 minutes.",
            "mantra": "Un pas après l'autre.",
            "mode": "RELAX"
        }"#;
        let recommendation = parse_recommendation(&envelope(inner)).unwrap();
        assert_eq!(recommendation.mode, Mode::Relax);
        assert_eq!(recommendation.mantra, "Un pas après l'autre.");
    }

    #[test]
    fn malformed_envelope_is_an_error() {
        assert!(parse_recommendation("not json at all").is_err());
        assert!(parse_recommendation("{}").is_err());
        assert!(parse_recommendation(&envelope("{\"mode\": \"FOCUS\"}")).is_err());
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let inner = r#"{
            "understanding": "u", "strategy": "s", "mantra": "m", "mode": "PANIC"
        }"#;
        assert!(parse_recommendation(&envelope(inner)).is_err());
    }

    #[test]
    fn fallback_payload_is_fixed() {
        let fallback = Recommendation::fallback();
        assert_eq!(
            fallback.understanding,
            "Je perçois votre besoin de clarté. Nous allons structurer cet instant ensemble."
        );
        assert_eq!(
            fallback.strategy,
            "Commencez par 2 minutes d'action, juste pour amorcer la pompe."
        );
        assert_eq!(fallback.mantra, "Le mouvement crée la motivation.");
        assert_eq!(fallback.mode, Mode::Focus);
    }

    #[test]
    fn unreachable_service_collapses_to_fallback() {
        // Port 0 is never connectable; the request fails immediately and
        // the caller still gets the full fallback payload.
        let config = CoachConfig {
            endpoint: "http://127.0.0.1:0".to_string(),
            model: "test".to_string(),
            api_key: None,
        };
        let recommendation = recommend_with(&config, "je n'arrive pas à commencer");
        assert_eq!(recommendation, Recommendation::fallback());
    }

    #[test]
    fn request_body_carries_input_and_schema() {
        let body = request_body("ranger la maison");
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("ranger la maison"));
        let modes = &body["generationConfig"]["responseSchema"]["properties"]["mode"]["enum"];
        assert_eq!(modes.as_array().unwrap().len(), 4);
    }
}
