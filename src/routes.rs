//! Two-screen navigation (home and results) and the command grammar that drives it.

use std::{str::FromStr, sync::Arc};

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};

use crate::clipboard::{Clipboard, ClipboardError};
use crate::models::{GenerationResult, ResultsHandoff};
use crate::render::{render_home, render_results};
use crate::results::ResultsPage;
use crate::service::{GenerationService, ServiceError};
use crate::submission::{Field, SubmissionController, SubmitRejected};
use crate::view::{Section, Tab, UnknownTab};

pub enum Route {
    Home(SubmissionController),
    Results(ResultsPage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetName(String),
    SetDescription(String),
    Submit,
    SelectTab(Tab),
    /// 1-based item number within a list section.
    CopyItem(Section, usize),
    CopyAll(Section),
    Home,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try `help`)")] Unknown(String),
    #[error("missing argument for `{0}`")] MissingArgument(&'static str),
    #[error("unknown section '{0}'")] UnknownSection(String),
    #[error("item numbers start at 1, got '{0}'")] BadIndex(String),
    #[error(transparent)] Tab(#[from] UnknownTab),
    #[error("`{0}` is not available on this screen")] WrongScreen(&'static str),
    #[error("nothing to copy there")] NothingToCopy,
    #[error(transparent)] Submit(#[from] SubmitRejected),
    #[error(transparent)] Clipboard(#[from] ClipboardError),
}

pub const HELP: &str = "\
commands:
  name <text>            set the business name
  desc <text>            set the description
  submit                 generate the marketing kit
  tab <social|ads|seo|brand>
  copy <section> <n>     copy item n of fb, ig, hashtags, headlines, descriptions, seo
  copy <section>         copy product, services, audience, tone or guidelines
  copy-all <section>     copy all of fb, ig, hashtags or seo
  home | new             back to the form
  show | help | quit";

fn parse_section(raw: &str) -> Result<Section, CommandError> {
    let section = match raw.to_ascii_lowercase().as_str() {
        "fb" | "facebook" => Section::FacebookPosts,
        "ig" | "instagram" => Section::InstagramCaptions,
        "hashtags" | "hash" => Section::Hashtags,
        "headlines" | "headline" => Section::AdHeadlines,
        "descriptions" | "desc" => Section::AdDescriptions,
        "seo" | "keywords" | "kw" => Section::SeoKeywords,
        "product" | "prod-desc" => Section::ProductDescription,
        "services" => Section::ServicesOrProducts,
        "audience" => Section::TargetAudience,
        "tone" => Section::BrandTone,
        "guidelines" => Section::ToneGuidelines,
        _ => return Err(CommandError::UnknownSection(raw.to_string())),
    };
    Ok(section)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match verb.to_ascii_lowercase().as_str() {
            // Empty text is allowed: it clears the field.
            "name" => Command::SetName(rest.to_string()),
            "desc" | "description" => Command::SetDescription(rest.to_string()),
            "submit" | "generate" => Command::Submit,
            "tab" => {
                if rest.is_empty() { return Err(CommandError::MissingArgument("tab")); }
                Command::SelectTab(rest.parse()?)
            }
            "copy" => {
                let mut args = rest.split_whitespace();
                let section = parse_section(args.next().ok_or(CommandError::MissingArgument("copy"))?)?;
                match args.next() {
                    Some(n) => {
                        let number = n.parse::<usize>().ok().filter(|n| *n > 0)
                            .ok_or_else(|| CommandError::BadIndex(n.to_string()))?;
                        Command::CopyItem(section, number)
                    }
                    None => Command::CopyAll(section),
                }
            }
            "copy-all" => {
                if rest.is_empty() { return Err(CommandError::MissingArgument("copy-all")); }
                Command::CopyAll(parse_section(rest)?)
            }
            "home" | "new" => Command::Home,
            "show" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// The in-flight generation request.
pub type PendingGeneration = JoinHandle<Result<GenerationResult, ServiceError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App {
    route: Route,
    service: Arc<dyn GenerationService>,
    clipboard: Arc<dyn Clipboard>,
}

impl App {
    pub fn new(service: Arc<dyn GenerationService>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self { route: Route::Home(SubmissionController::new()), service, clipboard }
    }

    pub fn route(&self) -> &Route { &self.route }

    pub fn home(&self) -> Option<&SubmissionController> {
        match &self.route { Route::Home(c) => Some(c), Route::Results(_) => None }
    }

    pub fn results(&self) -> Option<&ResultsPage> {
        match &self.route { Route::Results(p) => Some(p), Route::Home(_) => None }
    }

    /// Navigates straight to the results screen, with or without a kit.
    pub fn open_results(&mut self, handoff: Option<ResultsHandoff>) {
        self.route = Route::Results(ResultsPage::open(handoff, self.clipboard.clone()));
    }

    /// Back to a fresh form. The results screen, its copy timers included, is dropped.
    pub fn go_home(&mut self) {
        if matches!(self.route, Route::Results(_)) { info!("🏠 Returning to the form"); }
        self.route = Route::Home(SubmissionController::new());
    }

    pub fn render(&self) -> String {
        match &self.route {
            Route::Home(controller) => render_home(controller),
            Route::Results(page) => render_results(page),
        }
    }

    fn controller_mut(&mut self, cmd: &'static str) -> Result<&mut SubmissionController, CommandError> {
        match &mut self.route {
            Route::Home(c) => Ok(c),
            Route::Results(_) => Err(CommandError::WrongScreen(cmd)),
        }
    }

    fn page_mut(&mut self, cmd: &'static str) -> Result<&mut ResultsPage, CommandError> {
        match &mut self.route {
            Route::Results(p) => Ok(p),
            Route::Home(_) => Err(CommandError::WrongScreen(cmd)),
        }
    }

    /// Puts the form into pending and runs the request on its own task, leaving the caller
    /// free to keep handling input. Feed the joined result to
    /// [`complete_submit`](Self::complete_submit).
    pub fn spawn_submit(&mut self) -> Result<PendingGeneration, CommandError> {
        let request = self.controller_mut("submit")?.begin()?;
        let service = self.service.clone();
        info!("🚀 Submitting '{}' for generation", request.business_name);
        Ok(tokio::spawn(async move { service.generate(&request).await }))
    }

    /// Applies a finished request: results on success, back to an editable form on failure.
    pub fn complete_submit(&mut self, joined: Result<Result<GenerationResult, ServiceError>, JoinError>) {
        let outcome = joined.unwrap_or_else(|e| Err(ServiceError::Transport(e.to_string())));
        let Route::Home(controller) = &mut self.route else {
            warn!("generation finished after leaving the form; dropping it");
            return;
        };
        if !controller.is_pending() {
            warn!("generation finished with no submission pending; dropping it");
            return;
        }
        if let Some(handoff) = controller.resolve(outcome) {
            self.open_results(Some(handoff));
        }
    }

    pub async fn submit(&mut self) -> Result<(), CommandError> {
        let pending = self.spawn_submit()?;
        let joined = pending.await;
        self.complete_submit(joined);
        Ok(())
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<Flow, CommandError> {
        match command {
            Command::SetName(v) => self.controller_mut("name")?.update_field(Field::BusinessName, v),
            Command::SetDescription(v) => self.controller_mut("desc")?.update_field(Field::Description, v),
            Command::Submit => self.submit().await?,
            Command::SelectTab(tab) => {
                let presenter = self.page_mut("tab")?.presenter_mut().ok_or(CommandError::WrongScreen("tab"))?;
                presenter.select_tab(tab);
            }
            Command::CopyItem(section, number) => {
                let presenter = self.page_mut("copy")?.presenter_mut().ok_or(CommandError::WrongScreen("copy"))?;
                let index = number.checked_sub(1).ok_or(CommandError::NothingToCopy)?;
                presenter.select_tab(section.tab());
                if !presenter.copy_entry(section, index)? { return Err(CommandError::NothingToCopy); }
            }
            Command::CopyAll(section) => {
                let presenter = self.page_mut("copy-all")?.presenter_mut().ok_or(CommandError::WrongScreen("copy-all"))?;
                presenter.select_tab(section.tab());
                if !presenter.copy_all(section)? { return Err(CommandError::NothingToCopy); }
            }
            Command::Home => self.go_home(),
            Command::Show | Command::Help => {}
            Command::Quit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}
