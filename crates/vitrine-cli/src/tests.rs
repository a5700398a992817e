use clap::Parser;
use vitrine_core::RunArgs;

use crate::catalog::{CatalogCli, CatalogCommands};
use crate::import::ImportCli;

const TENANT: &str = "930e7a07-a759-4490-8775-f4e8130d3b6e";

#[test]
fn import_parses_flag_forms() {
    let cli = ImportCli::try_parse_from([
        "vitrine-import",
        "--tenant",
        TENANT,
        "--file=data/produtos.csv",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.tenant.as_deref(), Some(TENANT));
    assert_eq!(
        cli.file.as_deref(),
        Some(std::path::Path::new("data/produtos.csv"))
    );
    assert!(!cli.allow_publishable);
    assert!(!cli.dry_run);
    assert!(cli.positionals.is_empty());
}

#[test]
fn import_collects_positionals_in_any_order() {
    let cli = ImportCli::try_parse_from(["vitrine-import", "data/produtos.csv", TENANT]).unwrap();
    assert_eq!(cli.positionals, ["data/produtos.csv", TENANT]);
    assert!(cli.tenant.is_none());
}

#[test]
fn import_parses_boolean_flags() {
    let cli = ImportCli::try_parse_from([
        "vitrine-import",
        TENANT,
        "--allow-publishable",
        "--dry-run",
    ])
    .unwrap();
    assert!(cli.allow_publishable);
    assert!(cli.dry_run);
}

#[test]
fn import_rejects_unknown_flag() {
    let result = ImportCli::try_parse_from(["vitrine-import", "--tenent", TENANT]);
    assert!(result.is_err());
}

#[test]
fn import_help_is_not_an_error_exit() {
    let err = ImportCli::try_parse_from(["vitrine-import", "--help"]).unwrap_err();
    assert!(!err.use_stderr(), "--help should print to stdout and exit 0");
}

#[test]
fn import_cli_converts_into_run_args() {
    let cli = ImportCli::try_parse_from(["vitrine-import", "--dry-run", TENANT]).unwrap();
    let args = RunArgs::from(cli);
    assert!(args.tenant.is_none());
    assert!(args.file.is_none());
    assert_eq!(args.positionals, [TENANT]);
    assert!(args.dry_run);
    assert!(!args.allow_publishable);
}

#[test]
fn catalog_products_defaults_to_first_page() {
    let cli = CatalogCli::try_parse_from(["vitrine-catalog", "products", "--slug", "pet-centro"])
        .unwrap();
    assert!(matches!(
        cli.command,
        CatalogCommands::Products {
            ref slug,
            query: None,
            brand: None,
            category: None,
            limit: 60,
            offset: 0,
        } if slug == "pet-centro"
    ));
}

#[test]
fn catalog_products_with_filters() {
    let cli = CatalogCli::try_parse_from([
        "vitrine-catalog",
        "products",
        "--slug",
        "pet-centro",
        "--brand",
        "Golden",
        "--limit",
        "10",
        "--offset",
        "20",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        CatalogCommands::Products {
            brand: Some(ref b),
            limit: 10,
            offset: 20,
            ..
        } if b == "Golden"
    ));
}

#[test]
fn catalog_brands_requires_slug() {
    assert!(CatalogCli::try_parse_from(["vitrine-catalog", "brands"]).is_err());

    let cli = CatalogCli::try_parse_from(["vitrine-catalog", "brands", "--slug", "pet-centro"])
        .unwrap();
    assert!(matches!(
        cli.command,
        CatalogCommands::Brands { ref slug } if slug == "pet-centro"
    ));
}

#[test]
fn catalog_requires_subcommand() {
    assert!(CatalogCli::try_parse_from(["vitrine-catalog"]).is_err());
}
