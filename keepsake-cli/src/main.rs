mod cli_modes;
mod logging;
mod render;

use anyhow::{Result, anyhow};
use clap::Parser;
use cli_modes::{CliModeResult, timeline_mode, tone_mode, use_color, view_mode};
use keepsake_core::anniversary::due_anniversary;
use keepsake_core::keywords::parse_date_input;
use keepsake_core::paths::state_path;
use keepsake_core::season::{Season, active_theme, choose_theme};
use keepsake_core::storage::{FileStore, has_seen_welcome, mark_welcome_seen};
use keepsake_core::{Config, Gallery, GalleryView, ToneWorker, ViewSettings};
use render::{ColorMode, RenderOptions, Renderer};
use std::path::PathBuf;
use std::process::ExitCode;

/// keepsake: a calendar of daily photos and letters
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Prints the gallery directory
    #[arg(long, short, conflicts_with_all = ["on", "month", "step", "timeline", "tone"])]
    path: bool,
    /// Gallery directory holding `data.json` and `images/`. Overrides the config file.
    #[arg(long, env = "KEEPSAKE_GALLERY")]
    gallery: Option<PathBuf>,
    /// Select a date (e.g. `keepsake --on yesterday`, `keepsake --on 2026-02-14`)
    #[arg(long, conflicts_with = "month")]
    on: Option<String>,
    /// Show a month (e.g. `keepsake --month 2026-01`)
    #[arg(long)]
    month: Option<String>,
    /// Move the selection by this many days, like the arrow keys (e.g. `--step -1`)
    #[arg(long, allow_hyphen_values = true)]
    step: Option<i64>,
    /// List every entry oldest first, followed by the days still to come
    #[arg(long, short)]
    timeline: bool,
    /// Print the ambient tone of an image file
    #[arg(long, conflicts_with_all = ["on", "month", "step", "timeline"])]
    tone: Option<PathBuf>,
    /// Pick the colour theme: winter, spring, summer or autumn. Remembered.
    #[arg(long)]
    theme: Option<String>,
    /// Treat this date as today (e.g. `2026-09-22`)
    #[arg(long, env = "KEEPSAKE_TODAY")]
    today: Option<String>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
    /// More log output on stderr (`-v` info, `-vv` debug). `RUST_LOG` overrides.
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("keepsake: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("keepsake: {e:#}");
    }

    let mut config = Config::load()?;
    if let Some(dir) = &cli.gallery {
        config.gallery_dir = dir.clone();
    }
    if let Some(today) = &cli.today {
        config.reference_date = parse_date_input(today, config.reference_date)
            .ok_or_else(|| anyhow!("could not understand --today '{today}'"))?;
    }

    let mut store = FileStore::open(state_path(&config.state_dir));
    if let Some(theme) = &cli.theme {
        let season: Season = theme
            .parse()
            .map_err(|_| anyhow!("unknown theme '{theme}'"))?;
        choose_theme(&mut store, season)?;
    }

    let renderer = Renderer::new(Some(RenderOptions {
        use_color: use_color(&cli),
        season: active_theme(&store, config.reference_date),
    }));

    if cli.path {
        renderer.print_info(&format!("{}", config.gallery_dir.display()));
        return Ok(());
    }

    if let CliModeResult::Finish = tone_mode(&cli, &renderer, &config)? {
        return Ok(());
    }

    let report = Gallery::load(&config.gallery_dir, config.project_start);
    let mut view = GalleryView::new(report.gallery, ViewSettings::from(&config));

    if !has_seen_welcome(&store) {
        renderer.print_welcome();
        mark_welcome_seen(&mut store)?;
    }
    if let Some(anniversary) = due_anniversary(config.reference_date, &mut store)? {
        renderer.print_anniversary(anniversary);
    }

    if let CliModeResult::NothingToDo = timeline_mode(&cli, &renderer, &view)? {
        let worker = ToneWorker::new(config.gallery_dir.clone());
        view_mode(&cli, &renderer, &mut view, &worker)?;
    }

    renderer.print_load_issues(&report.issues);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn step_accepts_negative_days() {
        let cli = Cli::try_parse_from(["keepsake", "--on", "2026-01-03", "--step", "-3"]).unwrap();
        assert_eq!(cli.step, Some(-3));
        assert_eq!(cli.on.as_deref(), Some("2026-01-03"));
    }

    #[test]
    fn on_and_month_conflict() {
        assert!(Cli::try_parse_from(["keepsake", "--on", "today", "--month", "2026-01"]).is_err());
    }
}
