use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sat_o_map::astro::{nfd_to_mjd, now_mjd};
use sat_o_map::config::{Config, Overrides};
use sat_o_map::data::{GlobeOutline, SiteTable};
use sat_o_map::map::{draw_frame, Command, CommandError, MapState};
use sat_o_map::predict::{build_tracks, GroundTrack, TleReader, TRACK_STEPS};
use sat_o_map::render::{Recorder, RenderError, SvgSurface};

#[derive(Parser)]
#[command(name = "sat-o-map")]
#[command(about = "Orthographic Earth map with satellite ground tracks")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// TLE file (default: $ST_TLEDIR/classfd.tle)
    #[arg(short = 'c', long, global = true)]
    tle: Option<PathBuf>,
    /// Observing site id (default: $ST_COSPAR)
    #[arg(short, long, global = true)]
    site: Option<u32>,
    /// Only draw this NORAD catalog number (0 for all)
    #[arg(short = 'i', long, global = true)]
    satno: Option<u64>,
    /// Integration length, seconds or a duration such as `2m`
    #[arg(short, long, global = true)]
    length: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw one frame
    Render {
        /// Epoch as YYYY-MM-DDTHH:MM:SS[.sss] (default: now)
        #[arg(short, long)]
        time: Option<String>,
        #[arg(short, long, default_value = "map.svg")]
        output: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Format::Svg)]
        format: Format,
    },
    /// Read map commands from stdin, redrawing after each
    Interactive {
        /// Epoch as YYYY-MM-DDTHH:MM:SS[.sss] (default: now)
        #[arg(short, long)]
        time: Option<String>,
        #[arg(short, long, default_value = "map.svg")]
        output: PathBuf,
    },
    /// List the observing sites
    Sites,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Json,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let overrides = Overrides {
        tle_file: cli.tle,
        site_id: cli.site,
        satno: cli.satno,
        length: cli.length,
    };
    let config = match Config::load(cli.config.as_deref(), &overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Render {
            time,
            output,
            format,
        } => render(&config, time.as_deref(), &output, format),
        Commands::Interactive { time, output } => interactive(&config, time.as_deref(), &output),
        Commands::Sites => list_sites(&config),
    }
}

fn render(config: &Config, time: Option<&str>, output: &Path, format: Format) -> ExitCode {
    let Some(mut state) = initial_state(config, time) else {
        return ExitCode::FAILURE;
    };
    let globe = load_globe(config);

    state.pin(now_mjd());
    match write_frame(config, &state, globe.as_ref(), output, format) {
        Ok(()) => {
            println!("Frame written to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Render error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn interactive(config: &Config, time: Option<&str>, output: &Path) -> ExitCode {
    let Some(mut state) = initial_state(config, time) else {
        return ExitCode::FAILURE;
    };
    let globe = load_globe(config);
    let mut redraw = true;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if redraw {
            state.pin(now_mjd());
            if let Err(e) = write_frame(config, &state, globe.as_ref(), output, Format::Svg) {
                eprintln!("Render error: {}", e);
                return ExitCode::FAILURE;
            }
            log::info!("Frame written to {}", output.display());
            redraw = false;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error reading input: {}", e);
                return ExitCode::FAILURE;
            }
            None => return ExitCode::SUCCESS,
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                log::warn!("Ignoring input: {}", e);
                continue;
            }
        };

        match state.apply(&command, now_mjd()) {
            Some(next) => {
                state = next;
                redraw = true;
            }
            None => return ExitCode::SUCCESS,
        }
    }
}

fn list_sites(config: &Config) -> ExitCode {
    let Some(path) = config.sites_path() else {
        eprintln!("No data directory configured");
        return ExitCode::FAILURE;
    };
    let table = match SiteTable::load(&path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading sites: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for site in table.iter() {
        println!(
            "{:4} {:2} {:9.4} {:9.4} {:6.3} km  {}",
            site.id, site.abbrev, site.latitude, site.longitude, site.altitude_km, site.name
        );
    }
    ExitCode::SUCCESS
}

/// Map state from the configuration, or `None` after reporting a bad
/// start time
fn initial_state(config: &Config, time: Option<&str>) -> Option<MapState> {
    let mut state = MapState {
        orientation: config.orientation,
        length_s: config.length_s,
        zoom: config.zoom,
        ..MapState::default()
    };

    if let Some(time) = time {
        match nfd_to_mjd(time) {
            Ok(mjd) => state.epoch = Some(mjd),
            Err(e) => {
                eprintln!("Invalid time: {}", e);
                return None;
            }
        }
    }

    if let Some(site_id) = config.site_id {
        match load_sites(config).as_ref().and_then(|t| t.find(site_id)) {
            Some(site) => {
                log::info!("Observer {} ({})", site.name, site.id);
                state.observer = site.location();
                state.observer_name = site.name.clone();
            }
            None => log::warn!("Site {} not found, centring on 0°, 0°", site_id),
        }
    }

    Some(state)
}

fn load_globe(config: &Config) -> Option<GlobeOutline> {
    let path = config.globe_path()?;
    GlobeOutline::load(&path)
        .map_err(|e| log::warn!("Coastlines unavailable: {}", e))
        .ok()
}

fn load_sites(config: &Config) -> Option<SiteTable> {
    let path = config.sites_path()?;
    SiteTable::load(&path)
        .map_err(|e| log::warn!("Site table unavailable: {}", e))
        .ok()
}

/// Tracks for every selected satellite, re-read from disk for each frame
fn load_tracks(config: &Config, mjd: f64) -> Vec<GroundTrack> {
    let Some(path) = &config.tle_file else {
        return Vec::new();
    };
    match TleReader::open(path) {
        Ok(reader) => build_tracks(reader.with_satno(config.satno), mjd, TRACK_STEPS),
        Err(e) => {
            log::warn!("Failed to read TLE file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn write_frame(
    config: &Config,
    state: &MapState,
    globe: Option<&GlobeOutline>,
    output: &Path,
    format: Format,
) -> Result<(), RenderError> {
    let ctx = state.context(now_mjd());
    let tracks = load_tracks(config, ctx.epoch_mjd);

    let content = match format {
        Format::Svg => {
            let mut svg = SvgSurface::new();
            draw_frame(&mut svg, &ctx, globe, &tracks);
            svg.finish()
        }
        Format::Json => {
            let mut recorder = Recorder::new();
            draw_frame(&mut recorder, &ctx, globe, &tracks);
            recorder.to_json()?
        }
    };

    fs::write(output, content).map_err(|source| RenderError::Io {
        path: output.to_path_buf(),
        source,
    })
}
