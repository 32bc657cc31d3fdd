use anyhow::Context;
use clap::Args;
use gitpaint_core::palette::ACTIVITY_PALETTE;
use gitpaint_core::render::{preview_text, to_palette_image};

use crate::io::image_file;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Path to the source image
    #[arg(long)]
    pub img: String,

    /// Also write the image recolored with the activity palette (PNG)
    #[arg(long)]
    pub out: Option<String>,

    /// Number of activity levels to quantize to (2..=5)
    #[arg(long, default_value_t = ACTIVITY_PALETTE.len())]
    pub palette_size: usize,
}

pub fn run(args: PreviewArgs) -> anyhow::Result<()> {
    let q = image_file::load_quantized(&args.img, args.palette_size)?;

    println!();
    print!("{}", preview_text(&q)?);

    if let Some(path) = args.out.as_deref() {
        let img = to_palette_image(&q)?;
        img.save(path).with_context(|| format!("write preview {path}"))?;
        eprintln!("preview written: {} ({}x{})", path, img.width(), img.height());
    }

    Ok(())
}
