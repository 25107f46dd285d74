//! Denoising pipeline: corrupt an image with gaussian noise and restore it with
//! a gaussian, a median and a wiener filter.

use std::path::{Path, PathBuf};

use ndfilter::image::{Image, ImageError, ImageSize};
use ndfilter::imgproc::{
    filter::{gaussian_filter, median_filter, wiener, FloatConversion},
    metrics::psnr,
    noise::add_gaussian_noise_relative,
    padding::PaddingMode,
};
use ndfilter::io::{functional as F, IoError};
use rand::{rngs::StdRng, SeedableRng};

/// Parameters of the denoising pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Noise standard deviation relative to the image standard deviation.
    pub noise_scale: f32,
    /// Sigma of the gaussian filter.
    pub sigma: f32,
    /// Window size of the median filter.
    pub median_size: usize,
    /// Window size of the wiener filter.
    pub wiener_size: usize,
    /// Seed of the noise generator.
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            noise_scale: 0.5,
            sigma: 3.0,
            median_size: 5,
            wiener_size: 5,
            seed: 42,
        }
    }
}

/// The images produced by [`run_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The clean image plus noise.
    pub noisy: Image<f32, 1>,
    /// The noisy image smoothed with the gaussian filter.
    pub gaussian: Image<f32, 1>,
    /// The noisy image smoothed with the median filter.
    pub median: Image<f32, 1>,
    /// The noisy image restored with the wiener filter.
    pub wiener: Image<f32, 1>,
    /// Standard deviation of the noise that was added.
    pub noise_std: f32,
    /// Noise power estimated by the wiener filter.
    pub noise_power: f32,
}

impl PipelineOutput {
    /// Named images, in the order they are produced.
    pub fn images(&self) -> [(&'static str, &Image<f32, 1>); 4] {
        [
            ("noisy", &self.noisy),
            ("gaussian", &self.gaussian),
            ("median", &self.median),
            ("wiener", &self.wiener),
        ]
    }

    /// PSNR in dB of every produced image against the clean one, for 8-bit data.
    pub fn psnr_report(&self, clean: &Image<f32, 1>) -> Result<Vec<(&'static str, f32)>, ImageError> {
        self.images()
            .into_iter()
            .map(|(name, img)| Ok((name, psnr(clean, img, 255.0)?)))
            .collect()
    }
}

/// Run the denoising pipeline on a grayscale image with values in `[0, 255]`.
///
/// All three filters are applied to the same noisy image.
pub fn run_pipeline(
    clean: &Image<f32, 1>,
    config: &PipelineConfig,
) -> Result<PipelineOutput, ImageError> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut noisy = Image::from_size_val(clean.size(), 0.0)?;
    let noise_std = add_gaussian_noise_relative(clean, &mut noisy, config.noise_scale, &mut rng)?;
    log::info!("added gaussian noise with std {:.2}", noise_std);

    let mut gaussian = Image::from_size_val(clean.size(), 0.0)?;
    gaussian_filter(
        &noisy,
        &mut gaussian,
        (config.sigma, config.sigma),
        PaddingMode::Reflect,
    )?;
    log::info!("applied gaussian filter with sigma {}", config.sigma);

    let mut median = Image::from_size_val(clean.size(), 0.0)?;
    median_filter(
        &noisy,
        &mut median,
        (config.median_size, config.median_size),
        PaddingMode::Reflect,
    )?;
    log::info!("applied {0}x{0} median filter", config.median_size);

    let mut restored = Image::from_size_val(clean.size(), 0.0)?;
    let [noise_power] = wiener(
        &noisy,
        &mut restored,
        (config.wiener_size, config.wiener_size),
        None,
    )?;
    log::info!(
        "applied {0}x{0} wiener filter, estimated noise power {1:.2}",
        config.wiener_size,
        noise_power
    );

    Ok(PipelineOutput {
        noisy,
        gaussian,
        median,
        wiener: restored,
        noise_std,
        noise_power,
    })
}

/// A deterministic grayscale test scene: a diagonal gradient with a bright disk and a dark bar.
pub fn synthetic_image(size: ImageSize) -> Result<Image<f32, 1>, ImageError> {
    let (w, h) = (size.width as f32, size.height as f32);
    let (cx, cy, radius) = (w * 0.35, h * 0.4, w.min(h) * 0.2);

    let mut data = Vec::with_capacity(size.width * size.height);
    for y in 0..size.height {
        for x in 0..size.width {
            let (xf, yf) = (x as f32, y as f32);
            let mut v = 50.0 + 100.0 * (xf + yf) / (w + h).max(1.0);
            if (xf - cx).powi(2) + (yf - cy).powi(2) < radius * radius {
                v += 90.0;
            }
            if xf > w * 0.6 && xf < w * 0.8 && yf > h * 0.2 && yf < h * 0.85 {
                v -= 40.0;
            }
            data.push(v);
        }
    }

    Image::new(size, data)
}

/// Convert a float image to 8-bit, rounding and clamping to `[0, 255]`.
pub fn to_gray8(image: &Image<f32, 1>) -> Result<Image<u8, 1>, ImageError> {
    let data = image.as_slice().iter().map(|&v| u8::from_f32(v)).collect();
    Image::new(image.size(), data)
}

/// Write the pipeline images as `<name>.png` into `output_dir`, creating it if needed.
pub fn write_outputs(
    output_dir: impl AsRef<Path>,
    output: &PipelineOutput,
) -> Result<Vec<PathBuf>, IoError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(4);
    for (name, img) in output.images() {
        let path = output_dir.join(format!("{name}.png"));
        F::write_image_png_gray8(&path, &to_gray8(img)?)?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
