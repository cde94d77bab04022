//! Results Presenter: active tab plus copy feedback over one generated kit.

use std::sync::Arc;

use tracing::{debug, info};

use crate::clipboard::{Clipboard, ClipboardError};
use crate::copy_state::CopyState;
use crate::models::ResultsHandoff;
use crate::view::{Overview, ResultsView, Section, SectionText, Tab, TabView};

/// The results screen as entered: either a kit to present or the "no data" dead end.
pub enum ResultsPage {
    NoData,
    Ready(ResultsPresenter),
}

impl ResultsPage {
    pub fn open(handoff: Option<ResultsHandoff>, clipboard: Arc<dyn Clipboard>) -> Self {
        match handoff {
            Some(handoff) => ResultsPage::Ready(ResultsPresenter::new(handoff, clipboard)),
            None => {
                info!("⚠️ Results opened without a generated kit");
                ResultsPage::NoData
            }
        }
    }

    pub fn presenter(&self) -> Option<&ResultsPresenter> {
        match self {
            ResultsPage::Ready(p) => Some(p),
            ResultsPage::NoData => None,
        }
    }

    pub fn presenter_mut(&mut self) -> Option<&mut ResultsPresenter> {
        match self {
            ResultsPage::Ready(p) => Some(p),
            ResultsPage::NoData => None,
        }
    }
}

pub struct ResultsPresenter {
    handoff: ResultsHandoff,
    active_tab: Tab,
    copy_state: CopyState,
    clipboard: Arc<dyn Clipboard>,
}

impl ResultsPresenter {
    pub fn new(handoff: ResultsHandoff, clipboard: Arc<dyn Clipboard>) -> Self {
        info!("📋 Presenting kit for '{}' (run {})", handoff.business_name, handoff.run_id);
        Self { handoff, active_tab: Tab::default(), copy_state: CopyState::new(), clipboard }
    }

    pub fn active_tab(&self) -> Tab { self.active_tab }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            debug!(from = %self.active_tab, to = %tab, "tab selected");
        }
        self.active_tab = tab;
    }

    pub fn is_copied(&self, key: &str) -> bool { self.copy_state.is_copied(key) }

    /// Writes `text` to the clipboard, then flags `key` as copied for the feedback window.
    /// On a clipboard failure the flag is left alone.
    pub fn copy_item(&mut self, text: &str, key: &str) -> Result<(), ClipboardError> {
        self.clipboard.write_text(text)?;
        self.copy_state.mark(key);
        debug!(key, chars = text.chars().count(), "copied to clipboard");
        Ok(())
    }

    pub fn copy_section(&mut self, content: SectionText, section_key: &str) -> Result<(), ClipboardError> {
        let text = content.into_clipboard_text();
        self.copy_item(&text, section_key)
    }

    /// Copies item `index` (0-based) of a list section. Returns `Ok(false)` when there is no
    /// such item.
    pub fn copy_entry(&mut self, section: Section, index: usize) -> Result<bool, ClipboardError> {
        let Some(key) = section.item_key(index) else { return Ok(false) };
        let Some(text) = section.items(&self.handoff.data).get(index).cloned() else { return Ok(false) };
        self.copy_item(&text, &key)?;
        Ok(true)
    }

    /// Triggers the section-level copy control. Returns `Ok(false)` when the section has none.
    pub fn copy_all(&mut self, section: Section) -> Result<bool, ClipboardError> {
        let Some(key) = section.section_key() else { return Ok(false) };
        let content = section.copy_all_text(&self.handoff.data);
        self.copy_section(content, key)?;
        Ok(true)
    }

    pub fn view(&self) -> ResultsView {
        let data = &self.handoff.data;
        ResultsView {
            business_name: self.handoff.business_name.clone(),
            run_id: self.handoff.run_id,
            generated_at: self.handoff.generated_at,
            clarification: data.clarification().map(str::to_string),
            overview: Overview::from_result(data),
            active_tab: self.active_tab,
            content: TabView::build(self.active_tab, data, &self.copy_state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::models::GenerationResult;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".into()))
        }
    }

    fn presenter(data: GenerationResult) -> (ResultsPresenter, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let p = ResultsPresenter::new(ResultsHandoff::new("Sam's Coffee Shop", data), clipboard.clone());
        (p, clipboard)
    }

    #[test]
    fn opening_without_data_yields_empty_state() {
        let page = ResultsPage::open(None, Arc::new(MemoryClipboard::new()));
        assert!(matches!(page, ResultsPage::NoData));
        assert!(page.presenter().is_none());
    }

    #[test]
    fn defaults_to_social_and_select_tab_is_idempotent() {
        let (mut p, _) = presenter(GenerationResult::default());
        assert_eq!(p.active_tab(), Tab::Social);
        p.select_tab(Tab::Seo);
        let first = p.view();
        p.select_tab(Tab::Seo);
        assert_eq!(p.active_tab(), Tab::Seo);
        assert_eq!(p.view(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn copy_item_flags_even_empty_text() {
        let (mut p, clipboard) = presenter(GenerationResult::default());
        p.copy_item("", "prod-desc").unwrap();
        assert!(p.is_copied("prod-desc"));
        assert_eq!(clipboard.last().as_deref(), Some(""));

        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert!(!p.is_copied("prod-desc"));
    }

    #[tokio::test(start_paused = true)]
    async fn copy_section_joins_sequences_and_passes_scalars() {
        let (mut p, clipboard) = presenter(GenerationResult::default());
        p.copy_section(SectionText::Items(vec!["a".into(), "b".into()]), "fb-all").unwrap();
        p.copy_section(SectionText::Scalar("c".into()), "services").unwrap();
        assert_eq!(clipboard.writes(), vec!["a\n\nb".to_string(), "c".to_string()]);
        assert!(p.is_copied("fb-all"));
        assert!(p.is_copied("services"));
    }

    #[tokio::test(start_paused = true)]
    async fn absent_facebook_posts_render_nothing_and_copy_all_copies_empty() {
        let (mut p, clipboard) = presenter(GenerationResult { hashtags: Some(vec!["#coffee".into()]), ..Default::default() });
        let TabView::Social { facebook_posts, hashtags, .. } = p.view().content else { panic!("expected social tab") };
        assert!(facebook_posts.items.is_empty());
        assert_eq!(hashtags.items.len(), 1);

        assert!(p.copy_all(Section::FacebookPosts).unwrap());
        assert_eq!(clipboard.last().as_deref(), Some(""));
        assert!(p.is_copied("fb-all"));
    }

    #[tokio::test(start_paused = true)]
    async fn copied_flag_shows_up_in_view_until_expiry() {
        let (mut p, clipboard) = presenter(GenerationResult {
            facebook_posts: Some(vec!["Post A".into(), "Post B".into()]),
            ..Default::default()
        });
        assert!(p.copy_entry(Section::FacebookPosts, 1).unwrap());
        assert!(!p.copy_entry(Section::FacebookPosts, 5).unwrap());
        assert_eq!(clipboard.writes(), vec!["Post B".to_string()]);

        let TabView::Social { facebook_posts, .. } = p.view().content else { panic!("expected social tab") };
        let flags: Vec<_> = facebook_posts.items.iter().map(|i| i.copy.copied).collect();
        assert_eq!(flags, vec![false, true]);

        tokio::time::sleep(Duration::from_millis(2001)).await;
        let TabView::Social { facebook_posts, .. } = p.view().content else { panic!("expected social tab") };
        assert!(facebook_posts.items.iter().all(|i| !i.copy.copied));
    }

    #[test]
    fn ads_sections_have_no_copy_all() {
        let (mut p, clipboard) = presenter(GenerationResult::default());
        assert!(!p.copy_all(Section::AdHeadlines).unwrap());
        assert!(clipboard.writes().is_empty());
    }

    #[test]
    fn clipboard_failure_leaves_flag_unset() {
        let handoff = ResultsHandoff::new("Sam's Coffee Shop", GenerationResult::default());
        let mut p = ResultsPresenter::new(handoff, Arc::new(BrokenClipboard));
        assert!(p.copy_item("text", "tone").is_err());
        assert!(!p.is_copied("tone"));
    }

    #[test]
    fn view_surfaces_clarification_question() {
        let (p, _) = presenter(GenerationResult {
            needs_clarification: Some(true),
            clarification_question: Some("What does Bella's Place sell?".into()),
            ..Default::default()
        });
        assert_eq!(p.view().clarification.as_deref(), Some("What does Bella's Place sell?"));
        assert_eq!(p.view().overview.business_type, "N/A");
    }
}
