use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use keepsake_core::GalleryView;

pub fn timeline_mode(cli: &Cli, renderer: &Renderer, view: &GalleryView) -> Result<CliModeResult> {
    if !cli.timeline {
        return Ok(CliModeResult::NothingToDo);
    }
    let items = view.timeline();
    renderer.print_info(&format!("{} moments so far.", view.gallery().len()));
    renderer.print_timeline(view, &items);
    Ok(CliModeResult::Finish)
}
