//! End-to-end tests for report parsing and row transformation.

use vitrine_core::{TenantId, FALLBACK_BRAND};
use vitrine_ingest::{generate_code, parse_table, transform_rows};

const TENANT: &str = "930e7a07-a759-4490-8775-f4e8130d3b6e";

fn tenant() -> TenantId {
    TENANT.parse().expect("valid tenant")
}

#[test]
fn three_row_report_yields_two_products_and_one_skip() {
    let report = "\u{feff}CODIGO;DESCRICAO PRODUTO;P_CUSTO;P_VENDA;%MG_VD\n\
                  ;;;;\n\
                  ;Racao Golden Special Dog 15kg;;;\n\
                  X1;Tapete Higienico 30un;6,00;10,50;75%\n";

    let rows = parse_table(report).expect("report should parse");
    assert_eq!(rows.len(), 3);

    let outcome = transform_rows(&rows, &tenant());
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.products.len(), 2);

    let golden = &outcome.products[0];
    assert_eq!(golden.brand, "Golden");
    assert_eq!(golden.name, "Racao Special Dog 15kg");
    assert_eq!(golden.code, generate_code("Racao Special Dog 15kg", 2));
    assert_eq!(golden.sale_price, None);
    assert!(golden.is_active);

    let tapete = &outcome.products[1];
    assert_eq!(tapete.code, "X1");
    assert_eq!(tapete.brand, FALLBACK_BRAND);
    assert_eq!(tapete.cost_price, Some(6.0));
    assert_eq!(tapete.sale_price, Some(10.5));
    assert_eq!(tapete.margin, Some(75.0));

    assert!(outcome.products.iter().all(|p| p.tenant_id == TENANT));
}

#[test]
fn canonical_header_export_is_accepted() {
    let report = "code;name;brand;cost_price;sale_price;margin;is_active\n\
                  P-1;Shampoo Pet Clean 500ml;Pet Clean;8;14,90;;nao\n";

    let rows = parse_table(report).expect("report should parse");
    let outcome = transform_rows(&rows, &tenant());

    assert_eq!(outcome.skipped, 0);
    let product = &outcome.products[0];
    assert_eq!(product.code, "P-1");
    assert_eq!(product.brand, "Pet Clean");
    assert_eq!(product.name, "Shampoo 500ml");
    assert_eq!(product.sale_price, Some(14.9));
    assert_eq!(product.margin, None);
    assert!(!product.is_active);
}

#[test]
fn reimporting_the_same_report_produces_identical_records() {
    let report = "CODIGO;DESCRICAO PRODUTO\n;Petisco Premier Cookies\n;Petisco Premier Cookies\n";

    let first = transform_rows(&parse_table(report).unwrap(), &tenant());
    let second = transform_rows(&parse_table(report).unwrap(), &tenant());

    assert_eq!(first, second);
    assert_ne!(
        first.products[0].code, first.products[1].code,
        "duplicate names at different positions get distinct codes"
    );
}
