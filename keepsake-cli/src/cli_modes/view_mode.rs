use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Context, Result, anyhow};
use keepsake_core::dates::YearMonth;
use keepsake_core::keywords::parse_date_input;
use keepsake_core::tone::Overlay;
use keepsake_core::{GalleryView, ToneAction, ToneWorker, ViewContent, ViewUpdate};
use std::time::Duration;

/// How long to wait for a photo's tone before falling back to the base tint.
const TONE_WAIT: Duration = Duration::from_secs(5);

/// Opens the gallery, applies `--month`, `--on` and `--step` in that order,
/// then prints the resulting calendar and selection.
pub fn view_mode(
    cli: &Cli,
    renderer: &Renderer,
    view: &mut GalleryView,
    worker: &ToneWorker,
) -> Result<CliModeResult> {
    let mut update = view.open();

    if let Some(month) = &cli.month {
        let month: YearMonth = month
            .parse()
            .with_context(|| format!("invalid --month '{month}'"))?;
        update = view.jump_to_month(month);
    }
    if let Some(on) = &cli.on {
        let date = parse_date_input(on, view.settings().today)
            .ok_or_else(|| anyhow!("could not understand date '{on}'"))?;
        update = view.select_date(date);
    }
    if let Some(step) = cli.step {
        update = view
            .navigate_day(step)
            .ok_or_else(|| anyhow!("--step {step} leaves the calendar"))?;
    }

    let overlay = settle_tone(view, worker, &update);
    print_update(renderer, view, &update);
    renderer.print_overlay(&overlay);
    Ok(CliModeResult::Finish)
}

/// Resolves the update's tone action to the overlay that ends up on screen.
fn settle_tone(view: &mut GalleryView, worker: &ToneWorker, update: &ViewUpdate) -> Overlay {
    let request = match &update.tone {
        ToneAction::Apply(overlay) => return *overlay,
        ToneAction::Load(request) => request.clone(),
    };
    worker.submit(request);
    while let Some(outcome) = worker.recv_timeout(TONE_WAIT) {
        if let Some(overlay) = view.complete_tone(outcome.ticket, &outcome.filename, outcome.tone)
        {
            return overlay;
        }
    }
    log::warn!("tone extraction timed out; keeping current tint");
    view.overlay()
}

fn print_update(renderer: &Renderer, view: &GalleryView, update: &ViewUpdate) {
    let grid = view.grid();
    renderer.print_month_header(&grid);
    renderer.print_grid(&grid);
    println!();
    match &update.content {
        ViewContent::Entries { month, selected } => {
            renderer.print_month_cards(view, month, selected);
            println!();
            renderer.print_entry_detail(view, selected);
        }
        ViewContent::Empty(empty) => renderer.print_empty(empty),
    }
}
