use std::path::PathBuf;
use std::time::Instant;

use argh::FromArgs;
use rand::rngs::StdRng;
use rand::SeedableRng;

use blurlab_filter::{
    convolve_accelerated, convolve_direct, convolve_fft, convolve_separable, Kernel1d, Kernel2d,
    SimdDot,
};
use blurlab_image::{metrics, ops};
use blurlab_io::functional::{read_image, write_image};
use blurlab_io::pattern::synthetic_rgb;

/// Extent of the synthetic test card used when no input file is given.
const CARD_SIZE: usize = 512;

#[derive(FromArgs)]
/// Denoise an image with four Gaussian blur engines and compare their runtimes
struct Args {
    /// input image path (png/jpg); a synthetic test card is used when omitted
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// prefix for the output files
    #[argh(option, short = 'o', default = "String::from(\"output\")")]
    output: String,

    /// gaussian kernel size
    #[argh(option, short = 'k', default = "7")]
    kernel_size: usize,

    /// sigma of the gaussian kernel
    #[argh(option, short = 's', default = "2.0")]
    sigma: f32,

    /// standard deviation of the injected noise
    #[argh(option, short = 'n', default = "20.0")]
    noise_sigma: f32,

    /// worker threads for the parallel image ops, 0 keeps the default pool
    #[argh(option, short = 't', default = "0")]
    threads: usize,

    /// engine to run: direct, accelerated, separable, fft or all
    #[argh(option, short = 'm', default = "String::from(\"all\")")]
    method: String,

    /// seed for the noise generator; drawn from the OS when omitted
    #[argh(option)]
    seed: Option<u64>,
}

struct EngineRun {
    name: &'static str,
    time_ms: f64,
    psnr_db: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();
    env_logger::init();

    if args.kernel_size == 0 {
        return Err("Kernel size must be positive".into());
    }
    if args.sigma <= 0.0 {
        return Err(format!("Invalid kernel sigma: {}", args.sigma).into());
    }

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()?;
    }

    let original = match &args.input {
        Some(path) => {
            log::info!("loading {}", path.display());
            read_image(path)?
        }
        None => {
            log::info!("no input file, using a {CARD_SIZE}x{CARD_SIZE} synthetic card");
            synthetic_rgb(CARD_SIZE, CARD_SIZE)?
        }
    };
    log::info!(
        "input: {}x{} with {} channels",
        original.width(),
        original.height(),
        original.num_channels()
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut noisy = original.clone();
    ops::add_gaussian_noise(&mut noisy, args.noise_sigma, &mut rng)?;
    ops::normalize(&mut noisy);

    let noisy_path = format!("{}_noisy.png", args.output);
    write_image(&noisy_path, &noisy)?;
    log::info!(
        "wrote {noisy_path} (psnr {:.2} dB)",
        metrics::psnr(&original, &noisy, 255.0)?
    );

    let methods: Vec<&'static str> = match args.method.to_ascii_lowercase().as_str() {
        "all" => vec!["direct", "accelerated", "separable", "fft"],
        "direct" => vec!["direct"],
        "accelerated" => vec!["accelerated"],
        "separable" => vec!["separable"],
        "fft" => vec!["fft"],
        _ => return Err(format!("Invalid method: {}", args.method).into()),
    };

    let kernel_2d = Kernel2d::gaussian(args.kernel_size, args.sigma);
    let kernel_1d = Kernel1d::gaussian(args.kernel_size, args.sigma);
    log::debug!("{kernel_2d}");

    let mut runs: Vec<EngineRun> = Vec::with_capacity(methods.len());
    for name in methods {
        let started = Instant::now();
        let result = match name {
            "direct" => convolve_direct(&noisy, &kernel_2d),
            "accelerated" => convolve_accelerated(&noisy, &kernel_2d, &SimdDot),
            "separable" => convolve_separable(&noisy, &kernel_1d),
            "fft" => convolve_fft(&noisy, &kernel_2d),
            _ => return Err(format!("Invalid method: {name}").into()),
        };
        let time_ms = started.elapsed().as_secs_f64() * 1e3;

        match result {
            Ok(mut filtered) => {
                ops::normalize(&mut filtered);
                let path = format!("{}_{}.png", args.output, name);
                write_image(&path, &filtered)?;

                let psnr_db = metrics::psnr(&original, &filtered, 255.0)?;
                log::info!("{name}: {time_ms:.2} ms, psnr {psnr_db:.2} dB, wrote {path}");
                runs.push(EngineRun {
                    name,
                    time_ms,
                    psnr_db,
                });
            }
            Err(e) => log::error!("{name} failed: {e}"),
        }
    }

    print_comparison(&runs);
    Ok(())
}

/// Prints the runtime table, with the first engine that ran as the baseline.
fn print_comparison(runs: &[EngineRun]) {
    let Some(baseline) = runs.first() else {
        return;
    };

    println!();
    println!(
        "{:<14} {:>12} {:>10} {:>12}",
        "engine", "time (ms)", "speedup", "psnr (dB)"
    );
    for run in runs {
        println!(
            "{:<14} {:>12.2} {:>9.2}x {:>12.2}",
            run.name,
            run.time_ms,
            baseline.time_ms / run.time_ms,
            run.psnr_db
        );
    }
}
