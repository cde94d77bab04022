//! Marketing kit client: submits a business to the generation service and presents the
//! generated content as tabs with copy-to-clipboard controls.

pub mod clipboard;
pub mod config;
pub mod copy_state;
pub mod models;
pub mod render;
pub mod results;
pub mod routes;
pub mod service;
pub mod submission;
pub mod view;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use config::{load_settings, Settings};
pub use models::{GenerationRequest, GenerationResult, GoogleAds, ResultsHandoff};
pub use results::{ResultsPage, ResultsPresenter};
pub use routes::{App, Command, Flow, Route};
pub use service::{GenerationService, HttpGenerationService, ServiceError};
pub use submission::{Field, Phase, SubmissionController};
pub use view::{Section, Tab};
