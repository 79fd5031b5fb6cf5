pub mod anniversary;
pub mod calendar;
pub mod config;
pub mod dates;
pub mod entry;
pub mod error;
pub mod gallery;
pub mod keywords;
pub mod numbering;
pub mod paths;
pub mod render;
pub mod resolve;
pub mod season;
pub mod storage;
pub mod tone;
pub mod tone_worker;
pub mod view;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use entry::Entry;
pub use error::{GalleryError, GalleryResult};
pub use gallery::{DataSource, Gallery, LoadIssue, LoadReport};
pub use resolve::{InitialDate, resolve_initial_date};
pub use tone_worker::{ToneOutcome, ToneWorker};
pub use view::{GalleryView, ToneAction, ViewContent, ViewSettings, ViewUpdate};
