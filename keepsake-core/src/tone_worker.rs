//! Decodes photos for tone extraction off the caller's thread.
//!
//! Results come back in completion order, which need not be request order;
//! pass each one to [`GalleryView::complete_tone`](crate::view::GalleryView::complete_tone),
//! which discards the ones whose ticket is no longer current.

use crate::paths::image_path;
use crate::tone::{Rgb, extract_tone_from_path};
use crate::view::{ToneRequest, ToneTicket};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ToneOutcome {
    pub ticket: ToneTicket,
    pub filename: String,
    /// `None` when the image failed to load or had no usable pixels.
    pub tone: Option<Rgb>,
}

pub struct ToneWorker {
    gallery_dir: PathBuf,
    sender: Sender<ToneOutcome>,
    receiver: Receiver<ToneOutcome>,
}

impl ToneWorker {
    pub fn new(gallery_dir: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            gallery_dir,
            sender,
            receiver,
        }
    }

    /// Starts decoding `request`'s image in the background.
    pub fn submit(&self, request: ToneRequest) {
        let path = image_path(&self.gallery_dir, &request.filename);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let tone = match extract_tone_from_path(&path) {
                Ok(tone) => tone,
                Err(error) => {
                    log::warn!("{error}; using base tint");
                    None
                }
            };
            // The receiver only goes away with the worker; nothing is waiting then.
            let _ = sender.send(ToneOutcome {
                ticket: request.ticket,
                filename: request.filename,
                tone,
            });
        });
    }

    /// Waits up to `timeout` for the next finished extraction.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ToneOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drains whatever has finished without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = ToneOutcome> + '_ {
        self.receiver.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Entry, RawEntry};
    use crate::gallery::Gallery;
    use crate::tests::mk_settings;
    use crate::view::{GalleryView, ToneAction};
    use chrono::NaiveDate;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    fn entry(date: NaiveDate, filename: &str) -> Entry {
        RawEntry {
            filename: filename.to_string(),
            ..Default::default()
        }
        .into_entry(date)
    }

    #[test]
    fn worker_extracts_tone_and_view_applies_it() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("images")).unwrap();
        RgbaImage::from_pixel(16, 16, Rgba([200, 40, 90, 255]))
            .save(tmp.path().join("images").join("a.png"))
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let gallery = Gallery::from_entries([entry(date, "a.png")]);
        let mut view = GalleryView::new(gallery, mk_settings(date));
        let ToneAction::Load(request) = view.open().tone else {
            panic!("expected a tone load");
        };

        let worker = ToneWorker::new(tmp.path().to_path_buf());
        worker.submit(request.clone());
        let outcome = worker.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(outcome.ticket, request.ticket);
        let tone = outcome.tone.unwrap();
        assert!(tone.r.abs_diff(200) <= 1 && tone.g.abs_diff(40) <= 1 && tone.b.abs_diff(90) <= 1);
        assert!(
            view.complete_tone(outcome.ticket, &outcome.filename, outcome.tone)
                .is_some()
        );
    }

    #[test]
    fn missing_image_reports_no_tone() {
        let tmp = tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let gallery = Gallery::from_entries([entry(date, "missing.webp")]);
        let mut view = GalleryView::new(gallery, mk_settings(date));
        let ToneAction::Load(request) = view.open().tone else {
            panic!("expected a tone load");
        };

        let worker = ToneWorker::new(tmp.path().to_path_buf());
        worker.submit(request);
        let outcome = worker.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(outcome.tone, None);
        assert_eq!(worker.try_iter().count(), 0);
    }
}
