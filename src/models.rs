use serde::{Serialize, Deserialize};
use serde_with::{serde_as, DefaultOnError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Body of `POST /generate`. Built from the form fields at submit time and never mutated after.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub business_name: String,
    #[serde(default)]
    pub description: String,
}

impl GenerationRequest {
    pub fn new(business_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { business_name: business_name.into(), description: description.into() }
    }
}

/// Marketing kit document returned by the generation service.
///
/// Every field is optional. A field that is missing, `null`, or of the wrong JSON type
/// decodes as `None`, so one bad field never sinks the whole kit.
#[serde_as]
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub business_type: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub industry: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub target_audience: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub brand_tone: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub facebook_posts: Option<Vec<String>>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub instagram_captions: Option<Vec<String>>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub hashtags: Option<Vec<String>>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub google_ads: Option<GoogleAds>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub seo_keywords: Option<Vec<String>>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub product_or_service_description: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub services_or_products: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub tone_guidelines: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub needs_clarification: Option<bool>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub clarification_question: Option<String>,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GoogleAds {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub headlines: Option<Vec<String>>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub descriptions: Option<Vec<String>>,
}

impl GenerationResult {
    /// The question the service wants answered, if it flagged the business as too vague.
    pub fn clarification(&self) -> Option<&str> {
        if self.needs_clarification != Some(true) { return None; }
        self.clarification_question.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Data handed from the submission screen to the results screen, by value, exactly once.
#[derive(Debug, Clone)]
pub struct ResultsHandoff {
    pub run_id: Uuid,
    pub business_name: String,
    pub data: GenerationResult,
    pub generated_at: DateTime<Utc>,
}

impl ResultsHandoff {
    pub fn new(business_name: impl Into<String>, data: GenerationResult) -> Self {
        Self { run_id: Uuid::new_v4(), business_name: business_name.into(), data, generated_at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_document_decodes_with_missing_fields_as_none() {
        let raw = r##"{"business_type":"Cafe","facebook_posts":["Post A"],"hashtags":["#coffee"]}"##;
        let parsed: GenerationResult = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.business_type.as_deref(), Some("Cafe"));
        assert_eq!(parsed.facebook_posts, Some(vec!["Post A".to_string()]));
        assert_eq!(parsed.instagram_captions, None);
        assert_eq!(parsed.google_ads, None);
    }

    #[test]
    fn wrongly_typed_fields_degrade_to_none() {
        let raw = r#"{"industry":42,"seo_keywords":"coffee, tea","google_ads":{"headlines":["Fresh"],"descriptions":null},"brand_tone":"Warm"}"#;
        let parsed: GenerationResult = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.industry, None);
        assert_eq!(parsed.seo_keywords, None);
        assert_eq!(parsed.brand_tone.as_deref(), Some("Warm"));
        let ads = parsed.google_ads.unwrap();
        assert_eq!(ads.headlines, Some(vec!["Fresh".to_string()]));
        assert_eq!(ads.descriptions, None);
    }

    #[test]
    fn clarification_requires_flag_and_question() {
        let mut result = GenerationResult {
            clarification_question: Some("Is Bella's Place a salon or a restaurant?".into()),
            ..Default::default()
        };
        assert_eq!(result.clarification(), None);
        result.needs_clarification = Some(true);
        assert_eq!(result.clarification(), Some("Is Bella's Place a salon or a restaurant?"));
        result.clarification_question = Some("   ".into());
        assert_eq!(result.clarification(), None);
    }

    #[test]
    fn request_serializes_both_fields() {
        let body = serde_json::to_value(GenerationRequest::new("Sam's Coffee Shop", "")).unwrap();
        assert_eq!(body, serde_json::json!({"business_name": "Sam's Coffee Shop", "description": ""}));
    }
}
