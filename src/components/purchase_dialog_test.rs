use super::*;

#[test]
fn parse_quantity_clamps_to_stock() {
    assert_eq!(parse_quantity("3", 5), 3);
    assert_eq!(parse_quantity(" 9 ", 5), 5);
    assert_eq!(parse_quantity("0", 5), 1);
}

#[test]
fn parse_quantity_defaults_to_one() {
    assert_eq!(parse_quantity("", 5), 1);
    assert_eq!(parse_quantity("abc", 5), 1);
    assert_eq!(parse_quantity("-2", 5), 1);
    assert_eq!(parse_quantity("4", 0), 1);
}

#[test]
fn total_multiplies_price() {
    assert!((purchase_total(12.5, 3) - 37.5).abs() < f64::EPSILON);
}

#[test]
fn validate_purchase_checks_stock_and_balance() {
    assert_eq!(validate_purchase(10.0, 2, 5, Some(50.0)), Ok(20.0));
    assert_eq!(validate_purchase(10.0, 2, 5, None), Ok(20.0));
    assert_eq!(validate_purchase(10.0, 1, 0, Some(50.0)), Err("Out of stock"));
    assert_eq!(validate_purchase(10.0, 6, 5, Some(500.0)), Err("Invalid quantity"));
    assert_eq!(validate_purchase(10.0, 3, 5, Some(25.0)), Err("Insufficient balance"));
}

#[test]
fn exact_balance_is_enough() {
    assert_eq!(validate_purchase(10.0, 2, 5, Some(20.0)), Ok(20.0));
}
