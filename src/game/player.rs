//! Per-player state and the money procedures that only touch one player:
//! forced borrowing and bankruptcy liquidation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::ProfessionCard;
use crate::enums::BANKRUPTCY_SKIP_TURNS;
use crate::finance::{
    bank_loan_payment, forced_loan_amount, Asset, FinancialStatement, CAR_LOANS, CREDIT_CARD,
};
use crate::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub profession: String,
    pub financials: FinancialStatement,
    pub cash: Money,
    pub position: usize,
    pub on_fast_track: bool,
    pub fast_track_position: usize,
    pub fast_track_cash_flow: Money,
    pub escaped: bool,
    pub has_won: bool,
    pub dream: Option<String>,
    pub skip_turns: u8,
    pub charity_rolls: u8,
    pub bank_loan: Money,
    pub is_bankrupt: bool,
    pub bankrupt_turns_left: u8,
}

impl Player {
    pub fn new(id: Uuid, name: String, profession: &ProfessionCard) -> Self {
        Player {
            id,
            name,
            profession: profession.name.clone(),
            financials: FinancialStatement {
                salary: profession.salary,
                taxes: profession.taxes,
                home_mortgage_payment: profession.home_mortgage_payment,
                school_loan_payment: profession.school_loan_payment,
                car_loan_payment: profession.car_loan_payment,
                credit_card_payment: profession.credit_card_payment,
                other_expenses: profession.other_expenses,
                per_child_expense: profession.per_child_expense,
                children: 0,
                assets: Vec::new(),
                liabilities: profession.liabilities.clone(),
            },
            cash: profession.savings,
            position: 0,
            on_fast_track: false,
            fast_track_position: 0,
            fast_track_cash_flow: 0,
            escaped: false,
            has_won: false,
            dream: None,
            skip_turns: 0,
            charity_rolls: 0,
            bank_loan: 0,
            is_bankrupt: false,
            bankrupt_turns_left: 0,
        }
    }

    pub fn passive_income(&self) -> Money {
        self.financials.passive_income()
    }

    pub fn total_income(&self) -> Money {
        self.financials.total_income()
    }

    pub fn total_expenses(&self) -> Money {
        self.financials.fixed_expenses() + bank_loan_payment(self.bank_loan)
    }

    pub fn cash_flow(&self) -> Money {
        self.total_income() - self.total_expenses()
    }

    /// Monthly cash flow ignoring the bank-loan payment; the input to loan
    /// affordability.
    pub fn cash_flow_before_bank(&self) -> Money {
        self.total_income() - self.financials.fixed_expenses()
    }

    /// A player escapes the rat race once passive income alone covers every
    /// expense.
    pub fn can_escape(&self) -> bool {
        self.passive_income() > self.total_expenses()
    }

    /// Borrows the smallest $1,000 multiple that restores non-negative
    /// cash. Returns the loan taken, 0 if none was needed.
    pub fn take_forced_loan(&mut self) -> Money {
        let loan = forced_loan_amount(self.cash);
        if loan > 0 {
            self.cash += loan;
            self.bank_loan += loan;
        }
        loan
    }

    /// Liquidation when expenses cannot be covered even after forced
    /// borrowing: properties sell for half their down payment with the
    /// mortgage forgiven, stocks are a write-off, and the car loan and
    /// credit card are restructured to half balance and half payment.
    /// Home mortgage and school loans survive intact. A player whose cash
    /// flow is still negative afterwards is permanently out; otherwise
    /// they sit out two turns.
    pub fn execute_bankruptcy(&mut self) {
        let mut proceeds = 0;
        for asset in std::mem::take(&mut self.financials.assets) {
            match asset {
                Asset::RealEstate { down_payment, .. } | Asset::Business { down_payment, .. } => {
                    proceeds += down_payment / 2;
                }
                Asset::Stock { .. } => {}
            }
        }
        self.cash += proceeds;

        for name in [CAR_LOANS, CREDIT_CARD] {
            if let Some(liability) = self
                .financials
                .liabilities
                .iter_mut()
                .find(|l| l.name == name)
            {
                liability.balance /= 2;
                liability.payment /= 2;
                let payment = liability.payment;
                match name {
                    CAR_LOANS => self.financials.car_loan_payment = payment,
                    _ => self.financials.credit_card_payment = payment,
                }
            }
        }

        let zeroed: Vec<String> = self
            .financials
            .liabilities
            .iter()
            .filter(|l| l.balance == 0)
            .map(|l| l.name.clone())
            .collect();
        for name in zeroed {
            self.financials.drop_liability(&name);
        }

        if self.cash_flow() < 0 {
            self.is_bankrupt = true;
        } else {
            self.bankrupt_turns_left = BANKRUPTCY_SKIP_TURNS;
        }
    }
}
