use std::path::PathBuf;

use argh::FromArgs;

use denoise::{run_pipeline, synthetic_image, write_outputs, PipelineConfig};
use ndfilter::image::Image;
use ndfilter::io::functional as F;

#[derive(FromArgs, Debug)]
/// Add gaussian noise to an image and restore it with gaussian, median and wiener filters.
struct Args {
    /// path to the input image, a synthetic scene is used when omitted
    #[argh(option, short = 'i')]
    image_path: Option<PathBuf>,

    /// directory where the output images are written
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// noise standard deviation relative to the image standard deviation
    #[argh(option, default = "0.5")]
    noise_scale: f32,

    /// sigma of the gaussian filter
    #[argh(option, default = "3.0")]
    sigma: f32,

    /// window size of the median filter
    #[argh(option, default = "5")]
    median_size: usize,

    /// window size of the wiener filter
    #[argh(option, default = "5")]
    wiener_size: usize,

    /// seed of the noise generator
    #[argh(option, default = "42")]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let clean: Image<f32, 1> = match &args.image_path {
        Some(path) => {
            log::info!("reading {}", path.display());
            F::read_image_gray8(path)?.cast()?
        }
        None => {
            log::info!("no input image given, using a synthetic scene");
            synthetic_image([256, 256].into())?
        }
    };

    let config = PipelineConfig {
        noise_scale: args.noise_scale,
        sigma: args.sigma,
        median_size: args.median_size,
        wiener_size: args.wiener_size,
        seed: args.seed,
    };

    let output = run_pipeline(&clean, &config)?;

    for (name, value) in output.psnr_report(&clean)? {
        log::info!("{name:>8}: PSNR {value:.2} dB");
    }

    let written = write_outputs(&args.output_dir, &output)?;
    println!(
        "Wrote {} images to {}",
        written.len(),
        args.output_dir.display()
    );

    Ok(())
}
