//! Balance-sheet model and the pure money math derived from it. Passive
//! income, cash flow and loan payments are never stored anywhere; they are
//! recomputed from the statement on every read.

use serde::{Deserialize, Serialize};

use crate::enums::LOAN_STEP;
use crate::Money;

pub const HOME_MORTGAGE: &str = "Home Mortgage";
pub const SCHOOL_LOANS: &str = "School Loans";
pub const CAR_LOANS: &str = "Car Loans";
pub const CREDIT_CARD: &str = "Credit Card";

/// A named fixed debt with a monthly payment. The bank loan is not a
/// `Liability`; it lives on the player and its payment is always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub name: String,
    pub balance: Money,
    pub payment: Money,
}

/// An owned investment. The `kind` tag is part of the wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Asset {
    Stock {
        id: u64,
        symbol: String,
        shares: u64,
        cost_per_share: Money,
        dividend_per_share: Money,
    },
    RealEstate {
        id: u64,
        subtype: String,
        name: String,
        cost: Money,
        mortgage: Money,
        down_payment: Money,
        cash_flow: Money,
    },
    Business {
        id: u64,
        name: String,
        cost: Money,
        mortgage: Money,
        down_payment: Money,
        cash_flow: Money,
    },
}

impl Asset {
    pub fn id(&self) -> u64 {
        match self {
            Asset::Stock { id, .. } | Asset::RealEstate { id, .. } | Asset::Business { id, .. } => {
                *id
            }
        }
    }

    /// Monthly passive income generated by this asset.
    pub fn monthly_income(&self) -> Money {
        match self {
            Asset::Stock {
                shares,
                dividend_per_share,
                ..
            } => *shares as Money * dividend_per_share,
            Asset::RealEstate { cash_flow, .. } | Asset::Business { cash_flow, .. } => *cash_flow,
        }
    }

    /// Real estate and businesses carry a mortgage and can be liquidated;
    /// stocks cannot.
    pub fn is_property(&self) -> bool {
        matches!(self, Asset::RealEstate { .. } | Asset::Business { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatement {
    pub salary: Money,
    pub taxes: Money,
    pub home_mortgage_payment: Money,
    pub school_loan_payment: Money,
    pub car_loan_payment: Money,
    pub credit_card_payment: Money,
    pub other_expenses: Money,
    pub per_child_expense: Money,
    pub children: u8,
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
}

impl FinancialStatement {
    pub fn passive_income(&self) -> Money {
        self.assets.iter().map(Asset::monthly_income).sum()
    }

    pub fn total_income(&self) -> Money {
        self.salary + self.passive_income()
    }

    /// All monthly expenses except the bank-loan payment, which depends on
    /// the player's loan balance.
    pub fn fixed_expenses(&self) -> Money {
        self.taxes
            + self.home_mortgage_payment
            + self.school_loan_payment
            + self.car_loan_payment
            + self.credit_card_payment
            + self.other_expenses
            + self.per_child_expense * self.children as Money
    }

    pub fn asset(&self, asset_id: u64) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id() == asset_id)
    }

    pub fn remove_asset(&mut self, asset_id: u64) -> Option<Asset> {
        let index = self.assets.iter().position(|a| a.id() == asset_id)?;
        Some(self.assets.remove(index))
    }

    pub fn liability(&self, name: &str) -> Option<&Liability> {
        self.liabilities.iter().find(|l| l.name == name)
    }

    /// Removes a liability and zeroes the expense line it was paying.
    pub fn drop_liability(&mut self, name: &str) {
        self.liabilities.retain(|l| l.name != name);
        match name {
            HOME_MORTGAGE => self.home_mortgage_payment = 0,
            SCHOOL_LOANS => self.school_loan_payment = 0,
            CAR_LOANS => self.car_loan_payment = 0,
            CREDIT_CARD => self.credit_card_payment = 0,
            _ => {}
        }
    }
}

/// Monthly payment on a bank loan: 10% yearly interest, paid monthly,
/// rounded up.
pub fn bank_loan_payment(loan_amount: Money) -> Money {
    if loan_amount <= 0 {
        return 0;
    }
    (loan_amount + 119) / 120
}

/// Largest multiple of $1,000 the bank will lend while the projected
/// monthly cash flow stays strictly positive after the new interest
/// payment. `cash_flow_before_bank` excludes the current bank payment.
pub fn max_affordable_loan(cash_flow_before_bank: Money, current_bank_loan: Money) -> Money {
    let headroom = (cash_flow_before_bank - 1) * 120 - current_bank_loan;
    if headroom < LOAN_STEP {
        0
    } else {
        headroom / LOAN_STEP * LOAN_STEP
    }
}

/// Smallest multiple of $1,000 that brings `cash` back to zero or above.
pub fn forced_loan_amount(cash: Money) -> Money {
    if cash >= 0 {
        return 0;
    }
    (-cash + LOAN_STEP - 1) / LOAN_STEP * LOAN_STEP
}
