use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rotcorr::io::{load_gray_image, save_heatmap};
use rotcorr::{
    cross_correlate_with_peak, generate_sample, max_surface, mean_surface, random_pair, Aggregate,
    BilinearRotator, OwnedImage, Peak, RotationalSweep, SampleConfig, ScalarCorrelator,
    SweepConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str = r#"{
  "source": "sample",
  "seed": 42,
  "normalize": true,
  "add_noise": true,
  "noise_std": 50.0,
  "angle_step_deg": 10.0,
  "parallel": false,
  "output_path": "report.json",
  "heatmap_dir": "heatmaps"
}"#;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rotational cross-correlation demo (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file. Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Source {
    /// Uniform random background and filter.
    Random,
    /// Built-in scene with a filter cut from it.
    Sample,
    /// Background and filter loaded from image files.
    Files,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    source: Source,
    background_size: [usize; 2],
    filter_size: [usize; 2],
    background_path: String,
    filter_path: String,
    seed: Option<u64>,
    normalize: bool,
    add_noise: bool,
    noise_std: f64,
    angle_step_deg: f64,
    parallel: bool,
    output_path: Option<String>,
    heatmap_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let sample = SampleConfig::default();
        let sweep = SweepConfig::default();
        Self {
            source: Source::Sample,
            background_size: [100, 100],
            filter_size: [20, 20],
            background_path: String::new(),
            filter_path: String::new(),
            seed: None,
            normalize: sample.normalize,
            add_noise: sample.add_noise,
            noise_std: sample.noise_std,
            angle_step_deg: sweep.angle_step_deg,
            parallel: sweep.parallel,
            output_path: None,
            heatmap_dir: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct PeakRecord {
    x: usize,
    y: usize,
    score: f64,
}

impl From<Peak> for PeakRecord {
    fn from(value: Peak) -> Self {
        Self {
            x: value.x,
            y: value.y,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct SurfaceSummary {
    width: usize,
    height: usize,
    min: f64,
    max: f64,
    mean: f64,
    peak: PeakRecord,
}

impl SurfaceSummary {
    fn new(surface: &OwnedImage) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            min: surface.min_value(),
            max: surface.max_value(),
            mean: surface.mean(),
            peak: rotcorr::find_peak(surface.view()).into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BestOrientation {
    angle_deg: f64,
    peak: PeakRecord,
}

#[derive(Debug, Serialize)]
struct Output {
    background: [usize; 2],
    filter: [usize; 2],
    filter_origin: Option<[usize; 2]>,
    angles: usize,
    correlation: SurfaceSummary,
    mean: SurfaceSummary,
    max: SurfaceSummary,
    best: Option<BestOrientation>,
}

struct Pair {
    background: OwnedImage,
    filter: OwnedImage,
    origin: Option<[usize; 2]>,
}

fn build_pair(config: &Config, rng: &mut StdRng) -> Result<Pair, Box<dyn std::error::Error>> {
    match config.source {
        Source::Random => {
            let [bw, bh] = config.background_size;
            let [fw, fh] = config.filter_size;
            let (background, filter) = random_pair((bw, bh), (fw, fh), rng)?;
            Ok(Pair {
                background,
                filter,
                origin: None,
            })
        }
        Source::Sample => {
            let cfg = SampleConfig {
                normalize: config.normalize,
                add_noise: config.add_noise,
                noise_std: config.noise_std,
                ..SampleConfig::default()
            };
            let sample = generate_sample(&cfg, rng)?;
            let (x, y) = sample.filter_origin;
            Ok(Pair {
                background: sample.background,
                filter: sample.filter,
                origin: Some([x, y]),
            })
        }
        Source::Files => {
            if config.background_path.is_empty() || config.filter_path.is_empty() {
                return Err("background_path and filter_path must be set for the files source".into());
            }
            let mut background = load_gray_image(&config.background_path)?;
            let mut filter = load_gray_image(&config.filter_path)?;
            if config.normalize {
                background = background.zero_mean();
                filter = filter.zero_mean();
            }
            Ok(Pair {
                background,
                filter,
                origin: None,
            })
        }
    }
}

fn write_heatmaps(
    dir: &Path,
    surfaces: &[(&str, &OwnedImage)],
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    for (name, surface) in surfaces {
        save_heatmap(surface, dir.join(format!("{name}.png")))?;
    }
    Ok(())
}

/// Report plus the surfaces rendered as heat maps.
struct Run {
    output: Output,
    correlation: OwnedImage,
    mean: OwnedImage,
    max: OwnedImage,
}

/// Correlates once, then sweeps once and reduces the per-angle surfaces.
fn run(config: &Config, rng: &mut StdRng) -> Result<Run, Box<dyn std::error::Error>> {
    let pair = build_pair(config, rng)?;

    let (correlation, _) = cross_correlate_with_peak(&pair.background, &pair.filter)?;

    let full = RotationalSweep::new(ScalarCorrelator, BilinearRotator::default())
        .with_config(SweepConfig {
            angle_step_deg: config.angle_step_deg,
            aggregate: Aggregate::Full,
            parallel: config.parallel,
        })
        .run(pair.background.view(), pair.filter.view())?
        .into_full()
        .ok_or("sweep did not return per-angle results")?;
    let mean = mean_surface(&full.surfaces)?;
    let max = max_surface(&full.surfaces)?;
    let best = full
        .best_orientation()
        .map(|(angle_deg, peak)| BestOrientation {
            angle_deg,
            peak: peak.into(),
        });

    let output = Output {
        background: [pair.background.width(), pair.background.height()],
        filter: [pair.filter.width(), pair.filter.height()],
        filter_origin: pair.origin,
        angles: full.len(),
        correlation: SurfaceSummary::new(&correlation),
        mean: SurfaceSummary::new(&mean),
        max: SurfaceSummary::new(&max),
        best,
    };
    Ok(Run {
        output,
        correlation,
        mean,
        max,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("rotcorr=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config: Config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let result = run(&config, &mut rng)?;

    if let Some(dir) = &config.heatmap_dir {
        write_heatmaps(
            Path::new(dir),
            &[
                ("correlation", &result.correlation),
                ("mean", &result.mean),
                ("max", &result.max),
            ],
        )?;
    }

    let json = serde_json::to_string_pretty(&result.output)?;
    match &config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, Config, Source, EXAMPLE_JSON};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rotcorr::{rotational_sweep, OwnedImage};

    #[test]
    fn random_source_defaults_to_small_demo_pair() {
        let config: Config = serde_json::from_str(r#"{ "source": "random" }"#).unwrap();
        assert_eq!(config.source, Source::Random);
        assert_eq!(config.background_size, [100, 100]);
        assert_eq!(config.filter_size, [20, 20]);
    }

    #[test]
    fn example_config_parses() {
        let config: Config = serde_json::from_str(EXAMPLE_JSON).unwrap();
        assert_eq!(config.source, Source::Sample);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn single_sweep_reduces_to_both_surfaces() {
        let config = Config {
            source: Source::Random,
            background_size: [24, 18],
            filter_size: [5, 4],
            angle_step_deg: 45.0,
            ..Config::default()
        };
        let result = run(&config, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(result.output.angles, 8);
        assert_eq!(result.output.background, [24, 18]);
        assert!(result.output.best.is_some());

        // Same seed, same pair: the reduced surfaces match the aggregate sweep.
        let mut rng = StdRng::seed_from_u64(3);
        let (background, filter) = rotcorr::random_pair((24, 18), (5, 4), &mut rng).unwrap();
        let both = rotational_sweep(&background, &filter, 45.0, true, true).unwrap();
        let mean: &OwnedImage = both.mean().unwrap();
        let max: &OwnedImage = both.max().unwrap();
        assert_eq!(&result.mean, mean);
        assert_eq!(&result.max, max);
    }
}
