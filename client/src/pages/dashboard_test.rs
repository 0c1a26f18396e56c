use super::*;

#[test]
fn absent_vendor_shows_no_sales() {
    let absent = VENDORS.iter().find(|row| row.status == VendorStatus::Absent).unwrap();
    assert_eq!(sales_cell(absent), "-");
    assert_eq!(absent.status.label(), "Absent");
}

#[test]
fn present_vendors_report_sales() {
    for row in VENDORS.iter().filter(|row| row.status == VendorStatus::Present) {
        assert!(sales_cell(row).starts_with('$'), "{} has no sales figure", row.name);
    }
}

#[test]
fn status_pill_classes_differ() {
    assert_ne!(VendorStatus::Present.pill_class(), VendorStatus::Absent.pill_class());
    assert!(VendorStatus::Present.pill_class().starts_with("status-pill "));
}

#[test]
fn category_shares_match_gross_revenue() {
    let shares: Vec<u32> = CATEGORY_REVENUE.iter().map(|c| revenue_share(c.revenue, GROSS_REVENUE)).collect();
    assert_eq!(shares, vec![45, 28, 17]);
}

#[test]
fn revenue_share_handles_edges() {
    assert_eq!(revenue_share(0, GROSS_REVENUE), 0);
    assert_eq!(revenue_share(GROSS_REVENUE, GROSS_REVENUE), 100);
    assert_eq!(revenue_share(5, 0), 0);
    assert_eq!(revenue_share(1, 200), 1);
}

#[test]
fn dollars_are_grouped_by_thousands() {
    assert_eq!(format_dollars(8_240), "$8,240");
    assert_eq!(format_dollars(12_403_000), "$12,403,000");
    assert_eq!(format_dollars(950), "$950");
    assert_eq!(format_dollars(0), "$0");
}

#[test]
fn alerts_cover_every_level_with_distinct_dots() {
    let levels: Vec<AlertLevel> = MARKET_ALERTS.iter().map(|a| a.level).collect();
    assert_eq!(levels, vec![AlertLevel::Critical, AlertLevel::Warning, AlertLevel::Resolved]);
    assert_ne!(AlertLevel::Critical.dot_class(), AlertLevel::Warning.dot_class());
    assert!(MARKET_ALERTS[0].title.contains("Ary Land & Cattle"));
}
