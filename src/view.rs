//! Read-only view models derived from a [`GenerationResult`], plus the copy-key scheme.
//!
//! Field fallbacks live here and nowhere else: labelled values fall back to
//! [`NOT_AVAILABLE`], prose falls back to an empty paragraph and sequences to no items.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::copy_state::CopyState;
use crate::models::GenerationResult;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Social,
    Ads,
    Seo,
    Brand,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Social, Tab::Ads, Tab::Seo, Tab::Brand];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Social => "social",
            Tab::Ads => "ads",
            Tab::Seo => "seo",
            Tab::Brand => "brand",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Social => "Social Media",
            Tab::Ads => "Google Ads",
            Tab::Seo => "SEO & Keywords",
            Tab::Brand => "Brand Info",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.id()) }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown tab '{0}' (expected social, ads, seo or brand)")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL.into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// Every copyable block of content in the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    FacebookPosts,
    InstagramCaptions,
    Hashtags,
    AdHeadlines,
    AdDescriptions,
    SeoKeywords,
    ProductDescription,
    ServicesOrProducts,
    TargetAudience,
    BrandTone,
    ToneGuidelines,
}

/// What "copy all" puts on the clipboard for a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionText {
    Items(Vec<String>),
    Scalar(String),
}

impl SectionText {
    /// Items are separated by a blank line; a scalar passes through untouched.
    pub fn into_clipboard_text(self) -> String {
        match self {
            SectionText::Items(items) => items.join("\n\n"),
            SectionText::Scalar(text) => text,
        }
    }
}

impl Section {
    /// Prefix of per-item keys (`fb-0`, `fb-1`, ...) for list sections.
    pub fn item_prefix(self) -> Option<&'static str> {
        match self {
            Section::FacebookPosts => Some("fb"),
            Section::InstagramCaptions => Some("ig"),
            Section::Hashtags => Some("hash"),
            Section::AdHeadlines => Some("headline"),
            Section::AdDescriptions => Some("desc"),
            Section::SeoKeywords => Some("kw"),
            _ => None,
        }
    }

    /// Key of the section-level copy control, if the section has one.
    pub fn section_key(self) -> Option<&'static str> {
        match self {
            Section::FacebookPosts => Some("fb-all"),
            Section::InstagramCaptions => Some("ig-all"),
            Section::Hashtags => Some("hashtags-all"),
            Section::SeoKeywords => Some("seo-all"),
            Section::ProductDescription => Some("prod-desc"),
            Section::ServicesOrProducts => Some("services"),
            Section::TargetAudience => Some("audience"),
            Section::BrandTone => Some("tone"),
            Section::ToneGuidelines => Some("guidelines"),
            Section::AdHeadlines | Section::AdDescriptions => None,
        }
    }

    pub fn item_key(self, index: usize) -> Option<String> {
        self.item_prefix().map(|prefix| format!("{prefix}-{index}"))
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::FacebookPosts => "Facebook Posts",
            Section::InstagramCaptions => "Instagram Captions",
            Section::Hashtags => "Recommended Hashtags",
            Section::AdHeadlines => "Google Ads Headlines",
            Section::AdDescriptions => "Google Ads Descriptions",
            Section::SeoKeywords => "SEO Keywords",
            Section::ProductDescription => "Product/Service Description",
            Section::ServicesOrProducts => "Services & Products",
            Section::TargetAudience => "Target Audience",
            Section::BrandTone => "Brand Tone",
            Section::ToneGuidelines => "Tone Guidelines",
        }
    }

    pub fn tab(self) -> Tab {
        match self {
            Section::FacebookPosts | Section::InstagramCaptions | Section::Hashtags => Tab::Social,
            Section::AdHeadlines | Section::AdDescriptions => Tab::Ads,
            Section::SeoKeywords | Section::ProductDescription => Tab::Seo,
            Section::ServicesOrProducts | Section::TargetAudience | Section::BrandTone | Section::ToneGuidelines => Tab::Brand,
        }
    }

    /// Items of a list section; empty when the field is absent or the section is scalar.
    pub fn items(self, data: &GenerationResult) -> &[String] {
        let ads = data.google_ads.as_ref();
        let list = match self {
            Section::FacebookPosts => data.facebook_posts.as_ref(),
            Section::InstagramCaptions => data.instagram_captions.as_ref(),
            Section::Hashtags => data.hashtags.as_ref(),
            Section::AdHeadlines => ads.and_then(|a| a.headlines.as_ref()),
            Section::AdDescriptions => ads.and_then(|a| a.descriptions.as_ref()),
            Section::SeoKeywords => data.seo_keywords.as_ref(),
            _ => None,
        };
        list.map(Vec::as_slice).unwrap_or(&[])
    }

    /// Raw prose of a scalar section; empty when absent.
    pub fn prose(self, data: &GenerationResult) -> &str {
        let text = match self {
            Section::ProductDescription => data.product_or_service_description.as_deref(),
            Section::ServicesOrProducts => data.services_or_products.as_deref(),
            Section::TargetAudience => data.target_audience.as_deref(),
            Section::BrandTone => data.brand_tone.as_deref(),
            Section::ToneGuidelines => data.tone_guidelines.as_deref(),
            _ => None,
        };
        text.unwrap_or("")
    }

    /// Content of the section-level copy control. Hashtags join with a space and SEO
    /// keywords with `", "`, both handed over as a single scalar.
    pub fn copy_all_text(self, data: &GenerationResult) -> SectionText {
        match self {
            Section::Hashtags => SectionText::Scalar(self.items(data).join(" ")),
            Section::SeoKeywords => SectionText::Scalar(self.items(data).join(", ")),
            s if s.item_prefix().is_some() => SectionText::Items(s.items(data).to_vec()),
            s => SectionText::Scalar(s.prose(data).to_string()),
        }
    }
}

fn labelled(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub business_type: String,
    pub industry: String,
    pub target_audience: String,
    pub brand_tone: String,
}

impl Overview {
    pub fn from_result(data: &GenerationResult) -> Self {
        Self {
            business_type: labelled(data.business_type.as_deref()),
            industry: labelled(data.industry.as_deref()),
            target_audience: labelled(data.target_audience.as_deref()),
            brand_tone: labelled(data.brand_tone.as_deref()),
        }
    }

    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Business Type", self.business_type.as_str()),
            ("Industry", self.industry.as_str()),
            ("Target Audience", self.target_audience.as_str()),
            ("Brand Tone", self.brand_tone.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyControl {
    pub key: String,
    pub copied: bool,
}

impl CopyControl {
    fn new(key: impl Into<String>, copy: &CopyState) -> Self {
        let key = key.into();
        let copied = copy.is_copied(&key);
        Self { key, copied }
    }

    pub fn label(&self, idle: &'static str) -> &'static str {
        if self.copied { "Copied!" } else { idle }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// 1-based, as displayed.
    pub number: usize,
    pub text: String,
    pub copy: CopyControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Cards,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub section: Section,
    pub layout: Layout,
    pub items: Vec<ItemView>,
    pub copy_all: Option<CopyControl>,
}

impl ListView {
    fn build(section: Section, layout: Layout, data: &GenerationResult, copy: &CopyState) -> Self {
        let items = section.items(data).iter().enumerate()
            .filter_map(|(index, text)| {
                let key = section.item_key(index)?;
                Some(ItemView { number: index + 1, text: text.clone(), copy: CopyControl::new(key, copy) })
            })
            .collect();
        let copy_all = section.section_key().map(|key| CopyControl::new(key, copy));
        Self { section, layout, items, copy_all }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProseView {
    pub section: Section,
    pub text: String,
    pub copy: CopyControl,
}

impl ProseView {
    fn build(section: Section, data: &GenerationResult, copy: &CopyState) -> Option<Self> {
        let key = section.section_key()?;
        Some(Self { section, text: section.prose(data).to_string(), copy: CopyControl::new(key, copy) })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabView {
    Social { facebook_posts: ListView, instagram_captions: ListView, hashtags: ListView },
    Ads { headlines: ListView, descriptions: ListView },
    Seo { keywords: ListView, product_description: Option<ProseView> },
    Brand { cards: Vec<ProseView> },
}

impl TabView {
    pub fn build(tab: Tab, data: &GenerationResult, copy: &CopyState) -> Self {
        match tab {
            Tab::Social => TabView::Social {
                facebook_posts: ListView::build(Section::FacebookPosts, Layout::Cards, data, copy),
                instagram_captions: ListView::build(Section::InstagramCaptions, Layout::Cards, data, copy),
                hashtags: ListView::build(Section::Hashtags, Layout::Tags, data, copy),
            },
            Tab::Ads => TabView::Ads {
                headlines: ListView::build(Section::AdHeadlines, Layout::Cards, data, copy),
                descriptions: ListView::build(Section::AdDescriptions, Layout::Cards, data, copy),
            },
            Tab::Seo => TabView::Seo {
                keywords: ListView::build(Section::SeoKeywords, Layout::Tags, data, copy),
                product_description: ProseView::build(Section::ProductDescription, data, copy),
            },
            Tab::Brand => TabView::Brand {
                cards: [Section::ServicesOrProducts, Section::TargetAudience, Section::BrandTone, Section::ToneGuidelines]
                    .into_iter()
                    .filter_map(|s| ProseView::build(s, data, copy))
                    .collect(),
            },
        }
    }
}

/// Everything the loaded results screen shows for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub business_name: String,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub clarification: Option<String>,
    pub overview: Overview,
    pub active_tab: Tab,
    pub content: TabView,
}
