use std::io;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use referral_input::claims::{self, MAX_CLAIMS};
use referral_input::record::{
    self, ClaimTemplate, DEFAULT_BLOCK_NUMBER, DEFAULT_LOG_IDX, DEFAULT_NUM_CLAIMS,
    DEFAULT_REFERRER_ID, DEFAULT_REPETITION_COUNT, DEFAULT_TX_IDX,
};
use referral_input::Result;

//==================== CLI ====================//

/// Prints an ENS renewal referral claim input as indented JSON.
///
/// Without flags the output is the stock input: ten copies of the same
/// renewal log, referrer 1, one live claim.
#[derive(Parser, Debug)]
#[command(name = "referral-input", version, about)]
struct Cli {
    /// Slots per array
    #[arg(short = 'n', long, default_value_t = DEFAULT_REPETITION_COUNT)]
    count: usize,

    /// Block number repeated into every slot
    #[arg(long, default_value_t = DEFAULT_BLOCK_NUMBER)]
    block_number: u64,

    /// Transaction index repeated into every slot
    #[arg(long, default_value_t = DEFAULT_TX_IDX)]
    tx_idx: u64,

    /// Log index repeated into every slot
    #[arg(long, default_value_t = DEFAULT_LOG_IDX)]
    log_idx: u64,

    /// Referrer id written to the record
    #[arg(long, default_value_t = DEFAULT_REFERRER_ID)]
    referrer_id: u64,

    /// Number of live slots
    #[arg(long, default_value_t = DEFAULT_NUM_CLAIMS)]
    num_claims: u64,

    /// Validate against the circuit input rules before printing
    #[arg(long)]
    check: bool,

    /// Slot count assumed by --check
    #[arg(long, default_value_t = MAX_CLAIMS, requires = "check")]
    max_claims: usize,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn template(&self) -> ClaimTemplate {
        ClaimTemplate {
            block_number: self.block_number,
            tx_idx: self.tx_idx,
            log_idx: self.log_idx,
            referrer_id: self.referrer_id,
            num_claims: self.num_claims,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // stdout carries the record; logs stay on stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

//==================== main ====================//

fn run(cli: &Cli) -> Result<()> {
    let claim_record = cli.template().build(cli.count);
    if cli.check {
        claims::validate(&claim_record, cli.max_claims)?;
    }
    record::write_record(&claim_record, io::stdout().lock())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_flag_has_help_text() {
        let cmd = Cli::command();
        for arg in cmd.get_arguments() {
            let id = arg.get_id().as_str();
            if id == "help" || id == "version" {
                continue;
            }
            assert!(arg.get_help().is_some(), "--{id} has no help text");
        }
    }

    #[test]
    fn no_flags_means_stock_record() {
        let cli = Cli::parse_from(["referral-input"]);
        assert_eq!(cli.count, 10);
        assert_eq!(cli.template(), ClaimTemplate::default());
        assert!(!cli.check);
        assert_eq!(
            cli.template().build(cli.count),
            record::ReferralClaimRecord::repeated(10)
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let cli = Cli::parse_from([
            "referral-input",
            "-n",
            "9",
            "--block-number=5203518",
            "--tx-idx",
            "112",
            "--log-idx=1",
            "--referrer-id=4",
            "--num-claims=2",
            "--check",
            "--max-claims=9",
            "-vv",
        ]);
        assert_eq!(cli.count, 9);
        assert_eq!(
            cli.template(),
            ClaimTemplate {
                block_number: 5_203_518,
                tx_idx: 112,
                log_idx: 1,
                referrer_id: 4,
                num_claims: 2,
            }
        );
        assert!(cli.check);
        assert_eq!(cli.max_claims, 9);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn max_claims_needs_check() {
        assert!(Cli::try_parse_from(["referral-input", "--max-claims=9"]).is_err());
        assert!(Cli::try_parse_from(["referral-input", "-n", "-1"]).is_err());
    }

    #[test]
    fn run_rejects_invalid_record_when_checking() {
        let cli = Cli::parse_from(["referral-input", "--check", "--num-claims=2"]);
        assert!(matches!(
            run(&cli),
            Err(referral_input::InputError::Unordered { index: 1 })
        ));
    }
}
