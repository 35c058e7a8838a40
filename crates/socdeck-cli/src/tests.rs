use super::*;

#[test]
fn parses_generate_with_repeated_platforms() {
    let cli = Cli::try_parse_from([
        "socdeck",
        "generate",
        "--customer",
        "nordlicht-bakery",
        "--month",
        "2026-09",
        "--platform",
        "facebook",
        "--platform",
        "ads",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Generate {
            customer,
            month,
            platforms,
            notes,
            output,
            json,
        } => {
            assert_eq!(customer, "nordlicht-bakery");
            assert_eq!(month, "2026-09");
            assert_eq!(platforms, vec!["facebook", "ads"]);
            assert!(notes.is_none());
            assert!(output.is_none());
            assert!(!json);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn generate_requires_customer_and_month() {
    assert!(Cli::try_parse_from(["socdeck", "generate", "--month", "2026-09"]).is_err());
    assert!(Cli::try_parse_from(["socdeck", "generate", "--customer", "x"]).is_err());
}

#[test]
fn parses_modules_without_filter() {
    let cli = Cli::try_parse_from(["socdeck", "modules"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Modules { ref platforms } if platforms.is_empty()));
}

#[test]
fn parses_check_assets_for_one_customer() {
    let cli = Cli::try_parse_from(["socdeck", "check-assets", "--customer", "harbor-fitness"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::CheckAssets { customer: Some(ref c) } if c == "harbor-fitness"
    ));
}

#[test]
fn a_subcommand_is_required() {
    assert!(Cli::try_parse_from(["socdeck"]).is_err());
}
