use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tonejitter_augment::curve_jitter::{CurveJitter, CurveJitterConfig};
use tonejitter_augment::domain::IntensityDomain;
use tonejitter_augment::interpolation::CurveInterpolation;
use tonejitter_image::{Image, ImageSize};

fn bench_curve_jitter(c: &mut Criterion) {
    let mut group = c.benchmark_group("CurveJitter");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let size = ImageSize {
            width: *width,
            height: *height,
        };

        let image_u8 = Image::<u8, 3>::new(size, vec![128u8; width * height * 3]).unwrap();
        let image_f32 = Image::<f32, 3>::new(size, vec![0.5f32; width * height * 3]).unwrap();

        let mut jitter_u8 = CurveJitter::new(
            CurveJitterConfig::default()
                .with_domain(IntensityDomain::U8)
                .with_random_seed(0),
        )
        .unwrap();

        group.bench_with_input(
            BenchmarkId::new("lut_u8", &parameter_string),
            &image_u8,
            |b, i| b.iter(|| black_box(jitter_u8.apply(i).unwrap())),
        );

        for mode in [
            CurveInterpolation::Linear,
            CurveInterpolation::MonotoneCubic,
            CurveInterpolation::NaturalCubic,
        ] {
            let mut jitter_f32 = CurveJitter::new(
                CurveJitterConfig::default()
                    .with_interpolation(mode)
                    .with_random_seed(0),
            )
            .unwrap();

            group.bench_with_input(
                BenchmarkId::new(format!("eval_f32_{mode}"), &parameter_string),
                &image_f32,
                |b, i| b.iter(|| black_box(jitter_f32.apply(i).unwrap())),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_curve_jitter);
criterion_main!(benches);
