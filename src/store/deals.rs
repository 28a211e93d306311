use uuid::Uuid;

use super::{pool, StoreError};
use crate::records::{Deal, DealSummary, NewDeal};

/// Column list for the insert, in `NewDeal` field order. The store assigns
/// `id` and `created_at`.
const INSERT_DEAL_SQL: &str = r#"
    INSERT INTO deals (
        user_id,
        business_name, industry, location,
        asking_price, annual_revenue, cash_flow, ebitda,
        inventory_value, ffe_value, real_estate_value,
        down_payment, loan_amount, interest_rate, loan_term_years,
        seller_financing_amount, seller_interest_rate, seller_term_years, sba_eligible,
        owner_salary, buyer_salary, payroll_expense, rent_expense,
        cogs, working_capital, capex_reserve,
        gross_margin, net_margin, revenue_growth_rate, expense_growth_rate,
        tax_rate, discount_rate,
        multiple_paid, projection_years, years_in_business, employee_count,
        customer_concentration, includes_inventory, includes_real_estate, absentee_owner
    ) VALUES (
        $1,
        $2, $3, $4,
        $5, $6, $7, $8,
        $9, $10, $11,
        $12, $13, $14, $15,
        $16, $17, $18, $19,
        $20, $21, $22, $23,
        $24, $25, $26,
        $27, $28, $29, $30,
        $31, $32,
        $33, $34, $35, $36,
        $37, $38, $39, $40
    )
    RETURNING *
"#;

/// Persist a mapped deal and return the committed row (with the
/// store-assigned id).
pub async fn insert(deal: NewDeal) -> Result<Deal, StoreError> {
    let pool = pool().await?;

    let stored = sqlx::query_as::<_, Deal>(INSERT_DEAL_SQL)
        .bind(deal.user_id)
        .bind(deal.business_name)
        .bind(deal.industry)
        .bind(deal.location)
        .bind(deal.asking_price)
        .bind(deal.annual_revenue)
        .bind(deal.cash_flow)
        .bind(deal.ebitda)
        .bind(deal.inventory_value)
        .bind(deal.ffe_value)
        .bind(deal.real_estate_value)
        .bind(deal.down_payment)
        .bind(deal.loan_amount)
        .bind(deal.interest_rate)
        .bind(deal.loan_term_years)
        .bind(deal.seller_financing_amount)
        .bind(deal.seller_interest_rate)
        .bind(deal.seller_term_years)
        .bind(deal.sba_eligible)
        .bind(deal.owner_salary)
        .bind(deal.buyer_salary)
        .bind(deal.payroll_expense)
        .bind(deal.rent_expense)
        .bind(deal.cogs)
        .bind(deal.working_capital)
        .bind(deal.capex_reserve)
        .bind(deal.gross_margin)
        .bind(deal.net_margin)
        .bind(deal.revenue_growth_rate)
        .bind(deal.expense_growth_rate)
        .bind(deal.tax_rate)
        .bind(deal.discount_rate)
        .bind(deal.multiple_paid)
        .bind(deal.projection_years)
        .bind(deal.years_in_business)
        .bind(deal.employee_count)
        .bind(deal.customer_concentration)
        .bind(deal.includes_inventory)
        .bind(deal.includes_real_estate)
        .bind(deal.absentee_owner)
        .fetch_one(pool)
        .await?;

    Ok(stored)
}

/// List a principal's deals as the id + business name projection, newest
/// first. The owner predicate is the isolation boundary between principals.
pub async fn list_by_owner(owner: Uuid) -> Result<Vec<DealSummary>, StoreError> {
    let pool = pool().await?;

    let deals = sqlx::query_as::<_, DealSummary>(
        "SELECT id, business_name FROM deals WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(deals)
}

/// Fetch a deal by id regardless of owner; the router performs the ownership
/// check before releasing the row.
pub async fn fetch_by_id(id: Uuid) -> Result<Option<Deal>, StoreError> {
    let pool = pool().await?;

    let deal = sqlx::query_as::<_, Deal>("SELECT * FROM deals WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(deal)
}
