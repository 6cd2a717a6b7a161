//! A command line interface to the region layout facilities in `regionview`.
//!
//! ```shell
//! cargo run --release --bin=regionview --features=binaries -- merge exons.tsv
//! ```
//!
//! Every input file is tab-delimited with one region per line
//! (`start\tstop[\tvalue...]`, 1-based and fully-closed). Files ending in
//! `.gz` are decompressed on the fly. Blank lines and lines starting with `#`
//! are skipped.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::Verbosity;
use flate2::read::GzDecoder;
use regionview::histogram::Histogram2D;
use regionview::interval::Fields;
use regionview::interval::Interval;
use regionview::interval::Position;
use regionview::interval::Value;
use regionview::interval::intersect;
use regionview::interval::merge_overlapping;
use regionview::scale;
use regionview::signal;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Input
////////////////////////////////////////////////////////////////////////////////////////

/// Opens a (possibly gzipped) file for reading line by line.
fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// Reads the tab-delimited records of a file.
///
/// Each record is returned alongside its (1-based) line number.
fn records(path: &Path) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();

    for (i, line) in open(path)?.lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let line = line.trim_end();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        records.push((i + 1, line.split('\t').map(String::from).collect()));
    }

    info!("{}: read {} records", path.display(), records.len());
    Ok(records)
}

/// Parses the field at `index` of a record.
fn field<T>(path: &Path, line: usize, fields: &[String], index: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match fields.get(index) {
        Some(value) => value,
        None => bail!(
            "{}:{line}: expected at least {} columns, found {}",
            path.display(),
            index + 1,
            fields.len()
        ),
    };

    value
        .parse()
        .with_context(|| format!("{}:{line}: parsing column {}", path.display(), index + 1))
}

/// Reads the regions of a file, keeping any columns past the stop position
/// as fields named `{file}:{column}`.
fn regions(path: &Path) -> Result<Vec<Interval<Fields>>> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    records(path)?
        .into_iter()
        .map(|(line, fields)| {
            let start = field::<Position>(path, line, &fields, 0)?;
            let stop = field::<Position>(path, line, &fields, 1)?;

            let payload = fields
                .iter()
                .enumerate()
                .skip(2)
                .map(|(i, value)| {
                    let value = match value.parse::<f64>() {
                        Ok(number) => Value::from(number),
                        Err(_) => Value::from(value.as_str()),
                    };

                    (format!("{name}:{}", i + 1), value)
                })
                .collect::<Fields>();

            Interval::try_with_payload(start, stop, payload)
                .with_context(|| format!("{}:{line}: invalid region", path.display()))
        })
        .collect()
}

/// Reads the `start\tstop\tvalue` regions of a file.
fn valued_regions(path: &Path) -> Result<Vec<Interval<f64>>> {
    records(path)?
        .into_iter()
        .map(|(line, fields)| {
            let start = field::<Position>(path, line, &fields, 0)?;
            let stop = field::<Position>(path, line, &fields, 1)?;
            let value = field::<f64>(path, line, &fields, 2)?;

            Interval::try_with_payload(start, stop, value)
                .with_context(|| format!("{}:{line}: invalid region", path.display()))
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////
// Output
////////////////////////////////////////////////////////////////////////////////////////

/// Writes regions and their fields as tab-delimited lines.
fn write_regions(regions: &[Interval<Fields>]) -> Result<()> {
    let mut out = std::io::stdout().lock();

    for region in regions {
        write!(out, "{}\t{}", region.start(), region.stop())?;

        for (key, value) in region.payload() {
            write!(out, "\t{key}={value}")?;
        }

        writeln!(out)?;
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////
// Arguments
////////////////////////////////////////////////////////////////////////////////////////

/// The subcommands.
#[derive(Subcommand)]
enum Command {
    /// Merges the adjacent or overlapping regions of a file.
    Merge {
        /// The regions to merge.
        src: PathBuf,
    },

    /// Intersects the regions of two or more files.
    ///
    /// The fields of regions in later files take precedence over the fields
    /// of regions in earlier files.
    Intersect {
        /// The files to intersect.
        #[arg(required = true, num_args = 2..)]
        srcs: Vec<PathBuf>,
    },

    /// Maps positions onto the pixel range of the regions of a file.
    Scale {
        /// The regions making up the domain.
        domain: PathBuf,

        /// The positions to map.
        #[arg(required = true)]
        positions: Vec<Position>,

        /// The width of the pixel range.
        #[arg(short, long)]
        width: f64,

        /// The number of bases added on either side of each region.
        #[arg(short, long, default_value_t = 0)]
        padding: Position,
    },

    /// Bins `x\ty\tcount` rows into a two-dimensional histogram.
    Bin {
        /// The rows to bin.
        src: PathBuf,

        /// The pixel width of the histogram.
        #[arg(long)]
        width: u32,

        /// The pixel height of the histogram.
        #[arg(long)]
        height: u32,

        /// The maximum x value (defaults to the largest one observed).
        #[arg(long)]
        max_x: Option<u64>,

        /// The maximum y value (defaults to the largest one observed).
        #[arg(long)]
        max_y: Option<u64>,
    },

    /// Merges `start\tstop\tvalue` regions whose rounded values match.
    Pext {
        /// The regions to merge.
        src: PathBuf,

        /// The number of decimal places values are rounded to.
        #[arg(long, default_value_t = signal::DEFAULT_PRECISION)]
        precision: u8,
    },
}

/// Lays out genomic regions for display.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// The subcommand to run.
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity,
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    match args.command {
        Command::Merge { src } => {
            let regions = regions(&src)?;
            let merged = merge_overlapping(&regions)
                .into_iter()
                .map(|interval| interval.map_payload(|_| Fields::new()))
                .collect::<Vec<_>>();

            info!("merged {} regions into {}", regions.len(), merged.len());
            write_regions(&merged)?;
        }
        Command::Intersect { srcs } => {
            let lists = srcs
                .iter()
                .map(|src| regions(src))
                .collect::<Result<Vec<_>>>()?;

            let intersection = intersect(&lists).context("intersecting regions")?;
            write_regions(&intersection)?;
        }
        Command::Scale {
            domain,
            positions,
            width,
            padding,
        } => {
            let regions = regions(&domain)?;
            let scale = scale::Builder::default()
                .padding(padding)
                .width(width)
                .try_build_from(&regions)
                .context("building scale")?;

            info!(
                "domain spans {} bases over {} regions",
                scale.size(),
                scale.domain().intervals().len()
            );

            let mut out = std::io::stdout().lock();

            for position in positions {
                writeln!(
                    out,
                    "{position}\t{}\t{}",
                    scale.base_start(position),
                    scale.position(position)
                )?;
            }
        }
        Command::Bin {
            src,
            width,
            height,
            max_x,
            max_y,
        } => {
            let data = records(&src)?
                .into_iter()
                .map(|(line, fields)| -> Result<(u64, u64, u64)> {
                    Ok((
                        field::<u64>(&src, line, &fields, 0)?,
                        field::<u64>(&src, line, &fields, 1)?,
                        field::<u64>(&src, line, &fields, 2)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;

            let max_x = max_x.unwrap_or_else(|| data.iter().map(|(x, _, _)| *x).max().unwrap_or(0));
            let max_y = max_y.unwrap_or_else(|| data.iter().map(|(_, y, _)| *y).max().unwrap_or(0));

            let histogram = Histogram2D::try_new(&data, max_x, max_y, width, height)
                .context("binning histogram")?;

            let mut out = std::io::stdout().lock();

            for bin in histogram.bins().iter().filter(|bin| bin.count() > 0) {
                writeln!(out, "{}\t{}\t{}", bin.x_label(), bin.y_label(), bin.count())?;
            }
        }
        Command::Pext { src, precision } => {
            let regions = valued_regions(&src)?;
            let merged = signal::merge_by_similar_value_with_precision(&regions, precision)
                .context("merging regions")?;

            let mut out = std::io::stdout().lock();

            for region in merged {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    region.start(),
                    region.stop(),
                    region.payload()
                )?;
            }
        }
    }

    Ok(())
}
