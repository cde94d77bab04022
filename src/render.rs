//! Plain-text rendering of both screens for the terminal front end.

use std::fmt::Write;

use crate::results::ResultsPage;
use crate::submission::{Phase, SubmissionController};
use crate::view::{CopyControl, Layout, ListView, ProseView, ResultsView, Tab, TabView};

const RULE: &str = "────────────────────────────────────────────────────────";

pub fn render_home(controller: &SubmissionController) -> String {
    let mut out = String::new();
    writeln!(out, "🚀 MarketingGenius").ok();
    writeln!(out, "{RULE}").ok();
    writeln!(out, "Business Name : {}", controller.business_name()).ok();
    writeln!(out, "Description   : {}", controller.description()).ok();
    match controller.phase() {
        Phase::Pending => { writeln!(out, "⏳ Generating your marketing kit...").ok(); }
        Phase::Failed(msg) => { writeln!(out, "⚠️  {msg}").ok(); }
        Phase::Idle => {}
    }
    let hint = if controller.can_submit() { "type `submit` to generate" } else { "set a business name with `name <text>`" };
    writeln!(out, "[{hint}]").ok();
    out
}

pub fn render_results(page: &ResultsPage) -> String {
    match page {
        ResultsPage::NoData => {
            let mut out = String::new();
            writeln!(out, "No Results Found").ok();
            writeln!(out, "Please generate a marketing kit first.").ok();
            writeln!(out, "[`home` Go to Home]").ok();
            out
        }
        ResultsPage::Ready(presenter) => render_view(&presenter.view()),
    }
}

pub fn render_view(view: &ResultsView) -> String {
    let mut out = String::new();
    writeln!(out, "✔ Marketing Kit Ready!   [`new` New Kit]").ok();
    writeln!(out, "Marketing Kit for {}", view.business_name).ok();
    writeln!(out, "run {} · {}", view.run_id, view.generated_at.format("%Y-%m-%d %H:%M:%S UTC")).ok();
    if let Some(question) = &view.clarification {
        writeln!(out, "❓ {question}").ok();
    }
    writeln!(out, "{RULE}").ok();
    for (label, value) in view.overview.rows() {
        writeln!(out, "{label:<16}: {value}").ok();
    }
    writeln!(out, "{RULE}").ok();

    let tabs: Vec<String> = Tab::ALL.iter()
        .map(|t| if *t == view.active_tab { format!("[{}]", t.label()) } else { format!(" {} ", t.label()) })
        .collect();
    writeln!(out, "{}", tabs.join(" ")).ok();
    writeln!(out, "{RULE}").ok();

    match &view.content {
        TabView::Social { facebook_posts, instagram_captions, hashtags } => {
            write_list(&mut out, facebook_posts);
            write_list(&mut out, instagram_captions);
            write_list(&mut out, hashtags);
        }
        TabView::Ads { headlines, descriptions } => {
            write_list(&mut out, headlines);
            write_list(&mut out, descriptions);
        }
        TabView::Seo { keywords, product_description } => {
            write_list(&mut out, keywords);
            if let Some(prose) = product_description { write_prose(&mut out, prose); }
        }
        TabView::Brand { cards } => {
            for card in cards { write_prose(&mut out, card); }
        }
    }
    out
}

fn mark(copy: &CopyControl) -> &'static str { if copy.copied { " ✓" } else { "" } }

fn write_list(out: &mut String, list: &ListView) {
    let action = list.copy_all.as_ref().map(|c| format!("   [{}]", c.label("Copy All"))).unwrap_or_default();
    writeln!(out, "{}{}", list.section.title(), action).ok();
    match list.layout {
        Layout::Cards => {
            for item in &list.items {
                writeln!(out, "  #{} {}{}", item.number, item.text, mark(&item.copy)).ok();
            }
        }
        Layout::Tags => {
            let tags: Vec<String> = list.items.iter().map(|i| format!("{}{}", i.text, mark(&i.copy))).collect();
            if !tags.is_empty() { writeln!(out, "  {}", tags.join("  ")).ok(); }
        }
    }
    writeln!(out).ok();
}

fn write_prose(out: &mut String, prose: &ProseView) {
    writeln!(out, "{}   [{}]", prose.section.title(), prose.copy.label("Copy")).ok();
    writeln!(out, "  {}", prose.text).ok();
    writeln!(out).ok();
}
