use anyhow::{anyhow, Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use fieldline::cli::CliArgs;
use fieldline::view::FontFace;
use fieldline::FieldConfig;

mod runtime;

use runtime::{App, Page};

fn main() -> Result<()> {
    fieldline::tracing::init();

    let args = CliArgs::parse();
    args.validate().map_err(|e| anyhow!(e))?;

    let config = match &args.config {
        Some(path) => FieldConfig::load_from(path),
        None => FieldConfig::load(),
    };

    let font = FontFace::load(&args.font, args.font_size)?;
    let page = Page::demo(&config, &font, &args);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(page, font);
    event_loop.run_app(&mut app)?;

    Ok(())
}
