//! Command-line entry point
//!
//! ```bash
//! btc-hash-converter '[18,52]'          # -> 3412
//! btc-hash-converter --decode 3412      # -> [18,52]
//! btc-hash-converter --out-of-range mask '[-1,256]'
//! ```
//!
//! Everything user-facing goes to the supplied writer (stdout in the
//! binary); diagnostics go through tracing to stderr.

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::convert::{from_display_hash, ByteSequence, RangePolicy};
use crate::error::ConvertError;

#[derive(Parser, Debug)]
#[clap(name = "btc-hash-converter", version)]
#[clap(about = "Convert a JSON byte array into a byte-reversed (display order) hex hash", long_about = None)]
pub struct Args {
    /// JSON byte array in internal order, e.g. '[56,50,19,157]'
    #[clap(allow_negative_numbers = true)]
    pub inputs: Vec<String>,

    /// Policy for integers outside 0..=255 (overrides HASHCONV_OUT_OF_RANGE)
    #[clap(long, value_enum)]
    pub out_of_range: Option<RangePolicy>,

    /// Decode a display hash back into a JSON byte array
    #[clap(long, default_value_t = false)]
    pub decode: bool,
}

/// Parse argv and run; returns the process exit status
pub fn run<I, T, W>(argv: I, settings: &Settings, out: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            if let Err(e) = write!(out, "{}", e) {
                warn!(error = %e, "Failed to write help");
                return 1;
            }
            return 0;
        }
        Err(e) => {
            debug!(error = %e, "Argument parsing failed");
            return report(&ConvertError::Usage, out);
        }
    };

    match execute(&args, settings) {
        Ok(line) => {
            if let Err(e) = writeln!(out, "{}", line) {
                warn!(error = %e, "Failed to write output");
                return 1;
            }
            0
        }
        Err(e) => report(&e, out),
    }
}

/// Produce the output line for already-parsed arguments
pub fn execute(args: &Args, settings: &Settings) -> Result<String, ConvertError> {
    let input = match args.inputs.as_slice() {
        [single] => single,
        other => {
            debug!(count = other.len(), "Wrong argument count");
            return Err(ConvertError::Usage);
        }
    };

    if args.decode {
        return from_display_hash(input)?.to_json();
    }

    let policy = args.out_of_range.unwrap_or(settings.out_of_range);
    debug!(%policy, input_len = input.len(), "Converting byte array");

    let bytes = ByteSequence::parse(input, policy)?;
    Ok(bytes.to_display_hash().into_string())
}

fn report<W: Write>(err: &ConvertError, out: &mut W) -> i32 {
    warn!(error = %err, "Conversion failed");
    if let Err(e) = writeln!(out, "{}", err.user_message()) {
        warn!(error = %e, "Failed to write error message");
    }
    err.exit_code()
}
