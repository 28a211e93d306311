use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Submission;

/// A stored deal: the full valuation form plus system columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Deal {
    pub id: Uuid,
    pub user_id: Uuid,

    pub business_name: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,

    pub asking_price: Option<Decimal>,
    pub annual_revenue: Option<Decimal>,
    pub cash_flow: Option<Decimal>,
    pub ebitda: Option<Decimal>,
    pub inventory_value: Option<Decimal>,
    pub ffe_value: Option<Decimal>,
    pub real_estate_value: Option<Decimal>,

    pub down_payment: Option<Decimal>,
    pub loan_amount: Option<Decimal>,
    pub interest_rate: Option<f64>,
    pub loan_term_years: Option<i32>,
    pub seller_financing_amount: Option<Decimal>,
    pub seller_interest_rate: Option<f64>,
    pub seller_term_years: Option<i32>,
    pub sba_eligible: Option<bool>,

    pub owner_salary: Option<Decimal>,
    pub buyer_salary: Option<Decimal>,
    pub payroll_expense: Option<Decimal>,
    pub rent_expense: Option<Decimal>,
    pub cogs: Option<Decimal>,
    pub working_capital: Option<Decimal>,
    pub capex_reserve: Option<Decimal>,

    pub gross_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub revenue_growth_rate: Option<f64>,
    pub expense_growth_rate: Option<f64>,
    pub tax_rate: Option<f64>,
    pub discount_rate: Option<f64>,

    pub multiple_paid: Option<f64>,
    pub projection_years: Option<i32>,
    pub years_in_business: Option<i32>,
    pub employee_count: Option<i32>,
    pub customer_concentration: Option<f64>,
    pub includes_inventory: Option<bool>,
    pub includes_real_estate: Option<bool>,
    pub absentee_owner: Option<bool>,

    pub created_at: DateTime<Utc>,
}

/// Projection returned by the deal listing: just enough to render a list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DealSummary {
    pub id: Uuid,
    pub business_name: Option<String>,
}

/// A deal as submitted by a caller, before the store assigns an id.
///
/// Every business field reads the body key of the same name; the owner is
/// excluded from deserialization and stamped from the authenticated
/// principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeal {
    #[serde(skip_deserializing)]
    pub user_id: Uuid,

    pub business_name: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,

    pub asking_price: Option<Decimal>,
    pub annual_revenue: Option<Decimal>,
    pub cash_flow: Option<Decimal>,
    pub ebitda: Option<Decimal>,
    pub inventory_value: Option<Decimal>,
    pub ffe_value: Option<Decimal>,
    pub real_estate_value: Option<Decimal>,

    pub down_payment: Option<Decimal>,
    pub loan_amount: Option<Decimal>,
    pub interest_rate: Option<f64>,
    pub loan_term_years: Option<i32>,
    pub seller_financing_amount: Option<Decimal>,
    pub seller_interest_rate: Option<f64>,
    pub seller_term_years: Option<i32>,
    pub sba_eligible: Option<bool>,

    pub owner_salary: Option<Decimal>,
    pub buyer_salary: Option<Decimal>,
    pub payroll_expense: Option<Decimal>,
    pub rent_expense: Option<Decimal>,
    pub cogs: Option<Decimal>,
    pub working_capital: Option<Decimal>,
    pub capex_reserve: Option<Decimal>,

    pub gross_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub revenue_growth_rate: Option<f64>,
    pub expense_growth_rate: Option<f64>,
    pub tax_rate: Option<f64>,
    pub discount_rate: Option<f64>,

    pub multiple_paid: Option<f64>,
    pub projection_years: Option<i32>,
    pub years_in_business: Option<i32>,
    pub employee_count: Option<i32>,
    pub customer_concentration: Option<f64>,
    pub includes_inventory: Option<bool>,
    pub includes_real_estate: Option<bool>,
    pub absentee_owner: Option<bool>,
}

impl Submission for NewDeal {
    const KIND: &'static str = "deal";

    fn assign_owner(&mut self, owner: Uuid) {
        self.user_id = owner;
    }
}
