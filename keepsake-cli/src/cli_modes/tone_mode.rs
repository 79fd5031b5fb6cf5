use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use keepsake_core::Config;
use keepsake_core::tone::{Overlay, extract_tone_from_path};

/// Prints the ambient tone of an arbitrary image file.
pub fn tone_mode(cli: &Cli, renderer: &Renderer, config: &Config) -> Result<CliModeResult> {
    let Some(path) = &cli.tone else {
        return Ok(CliModeResult::NothingToDo);
    };
    match extract_tone_from_path(path)? {
        Some(tone) => {
            renderer.print_info(&format!("Ambient tone of {}: {tone}", path.display()));
            renderer.print_overlay(&Overlay::new(tone, config.base_tint, config.tone_mix));
        }
        None => {
            renderer.print_info(&format!(
                "{} has no opaque pixels; the base tint is used.",
                path.display()
            ));
            renderer.print_overlay(&Overlay::neutral(config.base_tint, config.tone_mix));
        }
    }
    Ok(CliModeResult::Finish)
}
