//! Financial overview dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders static market figures. The header menu and stat cards are theme
//! consumers; the floating toggle in the corner is a second, independent
//! control alongside any other toggle on the page.

use leptos::prelude::*;

use crate::components::dark_mode_toggle::DarkModeToggle;
use crate::components::header_menu::HeaderMenu;
use crate::components::sidebar_nav::SidebarNav;
use crate::components::stat_card::{Accent, StatCard};

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

/// Attendance of a vendor on market day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VendorStatus {
    Present,
    Absent,
}

/// One row of the vendor tracking table.
#[derive(Clone, Copy, Debug)]
pub struct VendorRow {
    pub name: &'static str,
    pub status: VendorStatus,
    pub category: &'static str,
    pub fee_due: &'static str,
    pub reported_sales: Option<&'static str>,
}

pub const VENDORS: &[VendorRow] = &[
    VendorRow {
        name: "Alba's Pupusas",
        status: VendorStatus::Absent,
        category: "Ready-to-Eat",
        fee_due: "$45.00",
        reported_sales: None,
    },
    VendorRow {
        name: "Around the World Bakery",
        status: VendorStatus::Present,
        category: "Bakery Goods",
        fee_due: "$35.00",
        reported_sales: Some("$470.00"),
    },
    VendorRow {
        name: "Ary Land & Cattle",
        status: VendorStatus::Present,
        category: "Fresh Meat",
        fee_due: "$35.00",
        reported_sales: Some("$390.00"),
    },
    VendorRow {
        name: "Bonnet Farm",
        status: VendorStatus::Present,
        category: "Produce",
        fee_due: "$40.00",
        reported_sales: Some("$615.00"),
    },
];

impl VendorStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }

    pub fn pill_class(self) -> &'static str {
        match self {
            Self::Present => "status-pill status-pill--present",
            Self::Absent => "status-pill status-pill--absent",
        }
    }
}

/// Sales cell text; absent vendors report nothing.
pub fn sales_cell(row: &VendorRow) -> &'static str {
    row.reported_sales.unwrap_or("-")
}

/// Gross market revenue in whole dollars.
pub const GROSS_REVENUE: u32 = 18_432;

#[derive(Clone, Copy, Debug)]
pub struct CategoryRevenue {
    pub category: &'static str,
    pub revenue: u32,
    pub bar_class: &'static str,
}

pub const CATEGORY_REVENUE: &[CategoryRevenue] = &[
    CategoryRevenue { category: "Fresh Produce", revenue: 8_240, bar_class: "category-bar__fill--emerald" },
    CategoryRevenue { category: "Ready-to-Eat", revenue: 5_120, bar_class: "category-bar__fill--blue" },
    CategoryRevenue { category: "Artisan Crafts", revenue: 3_072, bar_class: "category-bar__fill--amber" },
];

/// Whole-percent share of `gross`, rounded half up. Zero when `gross` is zero.
pub fn revenue_share(revenue: u32, gross: u32) -> u32 {
    if gross == 0 {
        return 0;
    }
    let scaled = u64::from(revenue) * 200 / u64::from(gross);
    u32::try_from(scaled.div_ceil(2)).unwrap_or(u32::MAX)
}

/// `$8,240` style dollar amount.
pub fn format_dollars(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Severity of a financial alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertLevel {
    Critical,
    Warning,
    Resolved,
}

impl AlertLevel {
    pub fn dot_class(self) -> &'static str {
        match self {
            Self::Critical => "alert-dot alert-dot--critical",
            Self::Warning => "alert-dot alert-dot--warning",
            Self::Resolved => "alert-dot alert-dot--resolved",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MarketAlert {
    pub level: AlertLevel,
    pub title: &'static str,
    pub detail: &'static str,
}

pub const MARKET_ALERTS: &[MarketAlert] = &[
    MarketAlert {
        level: AlertLevel::Critical,
        title: "Unreported Sales: Ary Land & Cattle",
        detail: "Market day 06/23 sales data not yet submitted for commission.",
    },
    MarketAlert {
        level: AlertLevel::Warning,
        title: "Partial Payment: Alba's Pupusas",
        detail: "Booth fee balance of $45.00 overdue from morning check-in.",
    },
    MarketAlert {
        level: AlertLevel::Resolved,
        title: "Deposit Successful",
        detail: "Electronic deposit for 06/21 batch confirmed by bank ($12,403.00).",
    },
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="dashboard">
            <DarkModeToggle class="dark-mode-toggle--bottom-right"/>
            <SidebarNav active="Financial Overview"/>
            <main class="dashboard__main">
                <header class="dashboard__header">
                    <div>
                        <h2>"Financial Overview"</h2>
                        <p class="dashboard__subtitle">"Market Performance"</p>
                    </div>
                    <div class="dashboard__actions">
                        <button type="button" class="button button--outline">
                            <span class="material-icons">"download"</span>
                            "Financial Report"
                        </button>
                        <button type="button" class="button button--primary">
                            <span class="material-icons">"description"</span>
                            "Log Collection"
                        </button>
                        <HeaderMenu user_name="Admin User" user_email="admin@markethub.com"/>
                    </div>
                </header>

                <div class="dashboard__stats">
                    <StatCard
                        icon="credit_card"
                        label="Gross Market Revenue"
                        value="$18,432.50"
                        badge="+12%"
                        accent=Accent::Blue
                    />
                    <StatCard
                        icon="attach_money"
                        label="Total Fees Collected"
                        value="$2,840.00"
                        badge="87% Collected"
                        accent=Accent::Emerald
                    />
                    <StatCard
                        icon="folder"
                        label="Unpaid Vendor Fees"
                        value="$420.00"
                        badge="4 Outstanding"
                        accent=Accent::Amber
                    />
                </div>

                <section class="vendor-table">
                    <h3>"Vendor Tracking"</h3>
                    <table>
                        <thead>
                            <tr>
                                <th>"Vendor Name"</th>
                                <th>"Status"</th>
                                <th>"Category"</th>
                                <th>"Reimbursement (reimb.) due"</th>
                                <th>"Reported Sales"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {VENDORS
                                .iter()
                                .map(|row| {
                                    view! {
                                        <tr>
                                            <td class="vendor-table__name">{row.name}</td>
                                            <td>
                                                <span class=row.status.pill_class()>{row.status.label()}</span>
                                            </td>
                                            <td>{row.category}</td>
                                            <td class="vendor-table__money">{row.fee_due}</td>
                                            <td class="vendor-table__money">{sales_cell(row)}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </section>

                <div class="dashboard__panels">
                    <section class="panel category-revenue">
                        <h4>"Revenue by Category"</h4>
                        {CATEGORY_REVENUE
                            .iter()
                            .map(|entry| {
                                let share = revenue_share(entry.revenue, GROSS_REVENUE);
                                view! {
                                    <div class="category-bar">
                                        <div class="category-bar__label">
                                            <span>{entry.category}</span>
                                            <span class="category-bar__amount">
                                                {format!("{} ({share}%)", format_dollars(entry.revenue))}
                                            </span>
                                        </div>
                                        <div class="category-bar__track">
                                            <div
                                                class=format!("category-bar__fill {}", entry.bar_class)
                                                style=format!("width: {share}%")
                                            ></div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </section>

                    <section class="panel market-alerts">
                        <div class="market-alerts__header">
                            <h4>"Financial Alerts"</h4>
                            <span class="market-alerts__link">"Auditor View"</span>
                        </div>
                        {MARKET_ALERTS
                            .iter()
                            .map(|alert| {
                                view! {
                                    <div class="market-alert">
                                        <div class=alert.level.dot_class()></div>
                                        <div>
                                            <p class="market-alert__title">{alert.title}</p>
                                            <p class="market-alert__detail">{alert.detail}</p>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </section>
                </div>
            </main>
        </div>
    }
}
