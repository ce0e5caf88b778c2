use clap::Parser;
use jiff::civil::Date;
use std::io::{BufRead, Write};

pub mod api;
pub mod date;
pub mod error;

pub use api::{CurrencyRate, DailyRates, Transport, UreqTransport, fetch_daily_rates};
pub use error::Error;

/// Print the Banca d'Italia daily exchange rate for each date read from standard input.
///
/// Dates are read one per line in DD/MM/YYYY format. When a day yields a single rate only the
/// value is printed, otherwise each line is prefixed with the currency ISO code.
#[derive(Parser)]
pub struct Cli {
    /// Currency ISO code (e.g. EUR)
    #[arg(short = 'c', long = "currency", value_name = "CODE", default_value = "")]
    pub currency: String,

    /// Base currency ISO code (optional, e.g. USD)
    #[arg(short = 'b', long = "base-currency", value_name = "CODE", default_value = "")]
    pub base_currency: String,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Process every date in `input` in order, stopping at the first failure.
///
/// A line that is not valid UTF-8 fails as [`Error::Io`] rather than [`Error::Parse`], so it
/// exits with the I/O code.
pub fn run<R, W, T>(args: &Cli, input: R, output: &mut W, transport: &T) -> Result<(), Error>
where
    R: BufRead,
    W: Write,
    T: Transport + ?Sized,
{
    for line in input.lines() {
        let requested = date::parse_input_date(line?.trim())?;
        let daily = fetch_daily_rates(transport, requested, &args.currency, &args.base_currency)?;
        print_rates(requested, &daily.rates, output)?;
    }
    Ok(())
}

/// Check each entry belongs to `requested` and write it out.
///
/// Entries before a mismatching one have already been written when the error is returned.
pub fn print_rates<W: Write>(
    requested: Date,
    rates: &[CurrencyRate],
    output: &mut W,
) -> Result<(), Error> {
    let multiple_currencies = rates.len() > 1;

    for rate in rates {
        if rate.reference_date != requested {
            return Err(Error::Consistency {
                requested,
                returned: rate.reference_date,
            });
        }

        if multiple_currencies {
            writeln!(output, "{} {}", rate.iso_code, rate.avg_rate)?;
        } else {
            writeln!(output, "{}", rate.avg_rate)?;
        }
    }
    Ok(())
}
