//! # Tirada CLI
//!
//! ## Usage
//!
//! ```bash
//! # Run the appliance daemon
//! tirada run \
//!     --database cards.db \
//!     --knob /dev/input/event0 \
//!     --button /dev/input/event1 \
//!     --display-address 0x70 \
//!     --printer /dev/ttyAMA0
//!
//! # Print one card's illustration by id (no daemon state)
//! tirada print-id 42 --database cards.db --printer /dev/ttyAMA0
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tirada::TiradaError;
use tirada::display::Ht16k33Display;
use tirada::input::EvdevSource;
use tirada::printer::{Printer, SerialPrinter, serial::DEFAULT_BAUD_RATE};
use tirada::store::{CardStore, SqliteStore};
use tirada::daemon;

/// Tirada - random card printer appliance
#[derive(Parser, Debug)]
#[command(name = "tirada")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the appliance daemon
    Run {
        /// Path to the card database
        #[arg(short, long)]
        database: PathBuf,

        /// Input event device for the knob
        #[arg(short, long)]
        knob: PathBuf,

        /// Input event device for the button
        #[arg(short, long)]
        button: PathBuf,

        /// I2C bus device for the seven-segment display
        #[arg(long, default_value = "/dev/i2c-1")]
        display_bus: PathBuf,

        /// I2C address of the display (hex, e.g. 0x70)
        #[arg(short = 'a', long, value_parser = parse_hex_address, default_value = "0x70")]
        display_address: u16,

        /// Printer serial device
        #[arg(short, long)]
        printer: PathBuf,

        /// Printer baud rate
        #[arg(short = 'r', long, default_value_t = DEFAULT_BAUD_RATE)]
        baud_rate: u32,
    },

    /// Print one card's illustration by id
    PrintId {
        /// Card id to print
        id: i64,

        /// Path to the card database
        #[arg(short, long)]
        database: PathBuf,

        /// Printer serial device
        #[arg(short, long)]
        printer: PathBuf,

        /// Printer baud rate
        #[arg(short = 'r', long, default_value_t = DEFAULT_BAUD_RATE)]
        baud_rate: u32,
    },
}

/// Parse an I2C address given as hex (`0x70`) or decimal.
fn parse_hex_address(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("invalid I2C address: {s}"))
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), TiradaError> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("tirada={default_level}"))),
        )
        .init();

    match cli.command {
        Commands::Run {
            database,
            knob,
            button,
            display_bus,
            display_address,
            printer,
            baud_rate,
        } => {
            // Resolve every capability before entering the loop; any
            // acquisition failure aborts startup.
            let store = SqliteStore::open(&database)?;
            let knob = EvdevSource::open(&knob)?;
            let button = EvdevSource::open(&button)?;
            let display = Ht16k33Display::open(&display_bus, display_address)?;
            let mut serial = SerialPrinter::open(&printer, baud_rate)?;

            serial.reset()?;
            daemon::run(knob, button, store, display, serial).await
        }

        Commands::PrintId {
            id,
            database,
            printer: device,
            baud_rate,
        } => {
            let mut store = SqliteStore::open(&database)?;
            let card = store.by_id(id)?.ok_or(TiradaError::UnknownCard(id))?;

            let mut serial = SerialPrinter::open(&device, baud_rate)?;
            serial.reset()?;
            serial.print_image(&card.illustration)
        }
    }
}
