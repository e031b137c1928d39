use argh::FromArgs;
use tonejitter::{
    augment::{
        domain::IntensityDomain, interpolation::CurveInterpolation, CurveJitter,
        CurveJitterConfig,
    },
    image::{Image, ImageSize},
};

#[derive(FromArgs)]
/// Apply a random tone curve to a synthetic gradient and report the effect
struct Args {
    /// width of the gradient image
    #[argh(option, default = "256")]
    width: usize,

    /// height of the gradient image
    #[argh(option, default = "64")]
    height: usize,

    /// fix the random seed
    #[argh(option, short = 's')]
    seed: Option<u64>,

    /// jitter strength for black point, white point and slope
    #[argh(option, default = "0.2")]
    strength: f32,

    /// interpolation: linear, monotone-cubic or natural-cubic
    #[argh(option, short = 'i', default = "CurveInterpolation::MonotoneCubic")]
    interpolation: CurveInterpolation,

    /// number of augmented samples to draw
    #[argh(option, short = 'n', default = "3")]
    num_samples: usize,
}

/// Horizontal RGB ramp, each channel offset by a third of the range.
fn gradient(size: ImageSize) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for _ in 0..size.height {
        for x in 0..size.width {
            let v = x * 255 / size.width.saturating_sub(1).max(1);
            for c in 0..3 {
                data.push(((v + c * 85) % 256) as u8);
            }
        }
    }
    Ok(Image::new(size, data)?)
}

fn channel_means(image: &Image<u8, 3>) -> [f32; 3] {
    let mut sums = [0u64; 3];
    for pixel in image.as_slice().chunks_exact(3) {
        for (s, &v) in sums.iter_mut().zip(pixel) {
            *s += v as u64;
        }
    }
    let n = (image.width() * image.height()).max(1) as f32;
    sums.map(|s| s as f32 / n)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let image = gradient(ImageSize {
        width: args.width,
        height: args.height,
    })?;

    let mut config = CurveJitterConfig::from_strength(args.strength)
        .with_domain(IntensityDomain::U8)
        .with_interpolation(args.interpolation);
    if let Some(seed) = args.seed {
        config = config.with_random_seed(seed);
    }

    let mut jitter = CurveJitter::new(config)?;
    log::info!("{jitter}");
    log::info!("input channel means: {:?}", channel_means(&image));

    for i in 0..args.num_samples {
        let augmented = jitter.apply(&image)?;
        log::info!(
            "sample {i}: channel means {:?}",
            channel_means(&augmented)
        );
    }

    let tables = jitter.sample_lookup_tables(3, 256)?;
    for (c, table) in tables.iter().enumerate() {
        let probes: Vec<String> = [0usize, 64, 128, 192, 255]
            .iter()
            .map(|&v| format!("{v}->{:.3}", table[v]))
            .collect();
        println!("channel {c}: {}", probes.join(" "));
    }

    Ok(())
}
