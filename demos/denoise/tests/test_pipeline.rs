use approx::assert_relative_eq;
use denoise::{run_pipeline, synthetic_image, to_gray8, write_outputs, PipelineConfig};
use ndfilter::image::{ops::mean_std, Image, ImageError};
use ndfilter::io::{functional as F, IoError};

#[test]
fn test_pipeline_improves_psnr() -> Result<(), ImageError> {
    let clean = synthetic_image([128, 128].into())?;
    let output = run_pipeline(&clean, &PipelineConfig::default())?;

    // the noise spread follows the configured fraction of the image spread
    let (_, clean_std) = mean_std(&clean);
    assert_relative_eq!(output.noise_std, 0.5 * clean_std, max_relative = 1e-5);
    assert!(output.noise_power > 0.0);

    let mut residual = output.noisy.clone();
    residual
        .as_slice_mut()
        .iter_mut()
        .zip(clean.as_slice())
        .for_each(|(r, &c)| *r -= c);
    let (residual_mean, residual_std) = mean_std(&residual);
    assert_relative_eq!(residual_mean, 0.0, epsilon = 0.5);
    assert_relative_eq!(residual_std, output.noise_std, max_relative = 0.05);

    let report = output.psnr_report(&clean)?;
    let names = report.iter().map(|(name, _)| *name).collect::<Vec<_>>();
    assert_eq!(names, ["noisy", "gaussian", "median", "wiener"]);

    let noisy_psnr = report[0].1;
    for (name, value) in &report[1..] {
        assert!(value > &noisy_psnr, "{name}: {value} <= {noisy_psnr}");
    }

    Ok(())
}

#[test]
fn test_pipeline_is_deterministic() -> Result<(), ImageError> {
    let clean = synthetic_image([32, 24].into())?;
    let config = PipelineConfig {
        seed: 3,
        ..Default::default()
    };

    let a = run_pipeline(&clean, &config)?;
    let b = run_pipeline(&clean, &config)?;
    assert_eq!(a.noisy, b.noisy);
    assert_eq!(a.wiener, b.wiener);

    let c = run_pipeline(&clean, &PipelineConfig { seed: 4, ..config })?;
    assert_ne!(a.noisy, c.noisy);

    Ok(())
}

#[test]
fn test_pipeline_rejects_invalid_sizes() -> Result<(), ImageError> {
    let clean = synthetic_image([16, 16].into())?;
    let config = PipelineConfig {
        median_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        run_pipeline(&clean, &config),
        Err(ImageError::InvalidFilterSize(0, 0, 0))
    ));
    Ok(())
}

#[test]
fn test_to_gray8_clamps() -> Result<(), ImageError> {
    let img = Image::<f32, 1>::new([4, 1].into(), vec![-12.0, 0.4, 127.6, 300.0])?;
    assert_eq!(to_gray8(&img)?.as_slice(), &[0, 0, 128, 255]);
    Ok(())
}

#[test]
fn test_write_outputs() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let output_dir = tmp_dir.path().join("nested").join("out");

    let clean = synthetic_image([20, 10].into())?;
    let output = run_pipeline(&clean, &PipelineConfig::default())?;
    let written = write_outputs(&output_dir, &output)?;

    assert_eq!(written.len(), 4);
    for path in &written {
        let img = F::read_image_gray8(path)?;
        assert_eq!(img.size(), clean.size());
    }
    assert!(output_dir.join("wiener.png").exists());

    Ok(())
}
