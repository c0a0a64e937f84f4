use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use npyz::WriterBuilder;

/// Write synthetic OCT volumes to try the viewer with.
#[derive(Parser, Debug)]
struct Args {
    /// Output directory, created if missing.
    #[arg(default_value = "sample_data")]
    out_dir: PathBuf,
}

const DEPTH: usize = 32;
const HEIGHT: usize = 64;
const WIDTH: usize = 64;
const CHANNELS: usize = 3;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Tissue layers as (row offset, thickness, brightness), following a curved surface.
struct Layers {
    bands: Vec<(f64, f64, f64)>,
    curvature: f64,
    /// Bright lesion: (depth, row, column, radius).
    lesion: (f64, f64, f64, f64),
}

fn voxels(layers: &Layers, noise: f64, rng: &mut SimpleRng) -> Vec<u8> {
    let mut out = Vec::with_capacity(DEPTH * HEIGHT * WIDTH * CHANNELS);
    let (lz, lx, ly, radius) = layers.lesion;
    for z in 0..DEPTH {
        for x in 0..HEIGHT {
            for y in 0..WIDTH {
                let lateral = (y as f64 - WIDTH as f64 / 2.0) / WIDTH as f64;
                let surface = 12.0 + layers.curvature * lateral.powi(2) + 0.1 * z as f64;
                let tissue: f64 = layers
                    .bands
                    .iter()
                    .map(|&(offset, thickness, brightness)| {
                        gaussian(x as f64, surface + offset, thickness, brightness)
                    })
                    .sum();
                let distance = ((z as f64 - lz).powi(2) + (x as f64 - lx).powi(2) + (y as f64 - ly).powi(2)).sqrt();
                let lesion = if distance < radius { 230.0 } else { 0.0 };

                let speckle = rng.gauss(0.0, noise);
                let base = (tissue + speckle).clamp(0.0, 255.0);
                out.push((base * 0.6) as u8);
                out.push(base as u8);
                out.push(base.max(lesion).clamp(0.0, 255.0) as u8);
            }
        }
    }
    out
}

fn write_volume(path: &Path, values: &[u8]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = npyz::WriteOptions::<u8>::new()
        .default_dtype()
        .shape(&[DEPTH as u64, HEIGHT as u64, WIDTH as u64, CHANNELS as u64])
        .writer(BufWriter::new(file))
        .begin_nd()
        .context("writing npy header")?;
    for value in values {
        writer.push(value)?;
    }
    writer.finish().context("finishing npy file")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let scans = [
        ("scan_healthy", Layers {
            bands: vec![(0.0, 1.5, 180.0), (6.0, 3.0, 90.0), (18.0, 2.0, 200.0)],
            curvature: 20.0,
            lesion: (0.0, 0.0, 0.0, 0.0),
        }, 12.0),
        ("scan_drusen", Layers {
            bands: vec![(0.0, 1.5, 170.0), (7.0, 3.0, 80.0), (20.0, 2.5, 210.0)],
            curvature: 28.0,
            lesion: (16.0, 34.0, 40.0, 5.0),
        }, 18.0),
        ("scan_noisy", Layers {
            bands: vec![(0.0, 2.0, 150.0), (8.0, 4.0, 70.0), (22.0, 3.0, 160.0)],
            curvature: 12.0,
            lesion: (8.0, 30.0, 20.0, 3.0),
        }, 35.0),
    ];

    for (name, layers, noise) in &scans {
        let path = args.out_dir.join(format!("{name}.npy"));
        write_volume(&path, &voxels(layers, *noise, &mut rng))?;
        println!("Wrote {} ({DEPTH}x{HEIGHT}x{WIDTH}x{CHANNELS})", path.display());
    }
    Ok(())
}
