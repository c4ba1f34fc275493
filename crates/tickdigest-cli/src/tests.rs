use super::*;

#[test]
fn parses_digest_with_defaults() {
    let cli = Cli::try_parse_from(["tickdigest", "digest", "aapl"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Digest {
            ref ticker,
            period: Period::LastWeek,
            mode: SummaryMode::PerArticle,
            translate: false,
            json: false,
        } if ticker.as_str() == "AAPL"
    ));
}

#[test]
fn parses_digest_with_all_flags() {
    let cli = Cli::try_parse_from([
        "tickdigest",
        "digest",
        "MSFT",
        "--period",
        "day",
        "--mode",
        "combined",
        "--translate",
        "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Digest {
            period: Period::LastDay,
            mode: SummaryMode::Combined,
            translate: true,
            json: true,
            ..
        }
    ));
}

#[test]
fn month_period_is_accepted() {
    let cli = Cli::try_parse_from(["tickdigest", "window", "--period", "month"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Window {
            period: Period::LastMonth
        }
    ));
}

#[test]
fn invalid_ticker_is_rejected() {
    assert!(Cli::try_parse_from(["tickdigest", "digest", "AA PL"]).is_err());
}

#[test]
fn unknown_period_is_rejected() {
    assert!(Cli::try_parse_from(["tickdigest", "digest", "AAPL", "--period", "year"]).is_err());
}

#[test]
fn unknown_mode_is_rejected() {
    assert!(Cli::try_parse_from(["tickdigest", "digest", "AAPL", "--mode", "both"]).is_err());
}

#[test]
fn digest_requires_ticker() {
    assert!(Cli::try_parse_from(["tickdigest", "digest"]).is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["tickdigest"]).is_err());
}
