use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use floppyviz::driver::AnimationDriver;
use floppyviz::formats;
use floppyviz::registers::parse_byte;
use floppyviz::settings::Settings;
use log::{debug, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Floppy Disk Drive Visualizer", version)]
struct Cli {
    /// JSON settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a single frame to an .svg or .json file
    Render {
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        drive: DriveArgs,
        #[command(flatten)]
        registers: RegisterArgs,
    },
    /// Press play and run the animation for a number of master ticks
    Animate {
        #[arg(long, default_value_t = 60)]
        ticks: u64,
        #[arg(long, conflicts_with = "speed_preset")]
        speed: Option<f64>,
        /// 0..=6 for 0.01x, 0.05x, 0.1x, 0.25x, 0.5x, 1x, 2x
        #[arg(long)]
        speed_preset: Option<usize>,
        /// Directory receiving the rendered frames
        #[arg(long)]
        frames: Option<PathBuf>,
        /// Keep every Nth frame
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,
        #[arg(long, default_value = "svg")]
        format: String,
        #[command(flatten)]
        drive: DriveArgs,
        #[command(flatten)]
        registers: RegisterArgs,
    },
    /// Print the status line and the register panel
    Display {
        #[command(flatten)]
        drive: DriveArgs,
        #[command(flatten)]
        registers: RegisterArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct DriveArgs {
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    track: i32,
    #[arg(long, default_value_t = 0)]
    side: i32,
    /// Platter rotation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    angle: f64,
    /// Sectors per track (values below 1 become 1)
    #[arg(long, allow_negative_numbers = true)]
    sectors: Option<i32>,
    #[arg(long)]
    write: bool,
    #[arg(long)]
    single_density: bool,
    #[arg(long)]
    single_sided: bool,
    #[arg(long, allow_negative_numbers = true)]
    transparency: Option<f64>,
    #[arg(long)]
    index_pulse: bool,
    #[arg(long)]
    no_track_highlight: bool,
    #[arg(long)]
    no_sector_highlight: bool,
}

impl DriveArgs {
    fn apply(&self, driver: &mut AnimationDriver) {
        let disk = driver.disk_mut();
        disk.set_double_density(!self.single_density);
        disk.set_double_sided(!self.single_sided);
        if let Some(count) = self.sectors {
            disk.set_sector_count(count);
        }
        if let Some(alpha) = self.transparency {
            disk.set_envelope_transparency(alpha);
        }
        if self.no_track_highlight {
            disk.set_highlight_track(false);
        }
        if self.no_sector_highlight {
            disk.set_highlight_sector(false);
        }
        disk.set_track(self.track);
        disk.set_side(self.side);
        disk.set_operation(self.write);
        disk.set_index_pulse(self.index_pulse);
        driver.set_rotation(self.angle);
    }
}

#[derive(Args, Debug, Clone)]
struct RegisterArgs {
    #[arg(long, value_parser = parse_byte, default_value = "0")]
    status_reg: u8,
    #[arg(long, value_parser = parse_byte, default_value = "0")]
    command_reg: u8,
    #[arg(long, value_parser = parse_byte, default_value = "0")]
    track_reg: u8,
    #[arg(long, value_parser = parse_byte, default_value = "0")]
    sector_reg: u8,
    #[arg(long, value_parser = parse_byte, default_value = "0")]
    data_reg: u8,
    /// Light the INT lamp
    #[arg(long)]
    intrq: bool,
    /// Light the DRQ lamp
    #[arg(long)]
    drq: bool,
}

impl RegisterArgs {
    fn apply(&self, driver: &mut AnimationDriver) {
        let panel = driver.panel_mut();
        panel.set_status_register(self.status_reg);
        panel.set_command_register(self.command_reg);
        panel.set_track_register(self.track_reg);
        panel.set_sector_register(self.sector_reg);
        panel.set_data_register(self.data_reg);
        panel.set_interrupt_status(self.intrq);
        panel.set_data_request(self.drq);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_state(driver: &AnimationDriver) {
    let scene = driver.scene();
    println!("{}", scene.disk.status_line());
    println!("{}", scene.panel.display());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut driver = settings.build_driver()?;

    match cli.command {
        Commands::Render { output, drive, registers } => {
            drive.apply(&mut driver);
            registers.apply(&mut driver);
            let writer = formats::writer_for_path(&output)?;
            writer.write(&driver.scene(), &output)?;
            println!("Rendered {}", output.display());
        }
        Commands::Display { drive, registers } => {
            drive.apply(&mut driver);
            registers.apply(&mut driver);
            print_state(&driver);
        }
        Commands::Animate { ticks, speed, speed_preset, frames, every, format, drive, registers } => {
            drive.apply(&mut driver);
            registers.apply(&mut driver);
            if let Some(speed) = speed {
                driver.set_speed(speed)?;
            } else if let Some(index) = speed_preset {
                driver.set_speed_preset(index)?;
            }
            let writer = formats::writer_for_format(&format)?;
            if let Some(dir) = &frames {
                std::fs::create_dir_all(dir)
                    .map_err(|e| anyhow!("Cannot create frame directory {}: {}", dir.display(), e))?;
            }

            driver.play();
            debug!("animating {} ticks at {}x", ticks, driver.speed());
            let mut written = 0;
            let mut redraws = 0;
            let mut revision = driver.revision();
            for tick in 1..=ticks {
                driver.tick();
                if driver.revision() != revision {
                    revision = driver.revision();
                    redraws += 1;
                }
                if let Some(dir) = &frames {
                    if tick % every == 0 {
                        let path = dir.join(format!("frame_{:05}.{}", tick, writer.extension()));
                        writer.write(&driver.scene(), &path)?;
                        written += 1;
                    }
                }
            }
            driver.pause();
            debug!("{} of {} ticks changed the picture", redraws, ticks);

            print_state(&driver);
            println!(
                "Elapsed: {} ms, revolutions: {}, seek step: {}",
                driver.now(),
                driver.revolutions(),
                driver.disk().animator().step()
            );
            if let Some(dir) = &frames {
                info!("{} frames in {}", written, dir.display());
                println!("Wrote {} frames to {}", written, dir.display());
            }
        }
    }
    Ok(())
}
