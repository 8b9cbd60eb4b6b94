//! Card effects: purchases, market shocks, splits, doodads and the pieces
//! of player-to-player transfers. Everything here assumes the action
//! already passed the validator.

use crate::card::{ActiveCard, Deal, DoodadCost, MarketCard, MarketEffect};
use crate::enums::TurnPhase;
use crate::finance::Asset;
use crate::game::state::GameState;
use crate::Money;

/// Mints an asset from a deal payload. Splits never reach this point.
pub(crate) fn mint_asset(state: &mut GameState, deal: &Deal, shares: Option<u64>) -> Asset {
    let id = state.mint_asset_id();
    match deal {
        Deal::Stock {
            symbol,
            price,
            dividend_per_share,
            min_shares,
            ..
        } => Asset::Stock {
            id,
            symbol: symbol.clone(),
            shares: shares.unwrap_or(*min_shares),
            cost_per_share: *price,
            dividend_per_share: *dividend_per_share,
        },
        Deal::RealEstate {
            subtype,
            name,
            cost,
            mortgage,
            down_payment,
            cash_flow,
        } => Asset::RealEstate {
            id,
            subtype: subtype.clone(),
            name: name.clone(),
            cost: *cost,
            mortgage: *mortgage,
            down_payment: *down_payment,
            cash_flow: *cash_flow,
        },
        Deal::Business {
            name,
            cost,
            mortgage,
            down_payment,
            cash_flow,
        } => Asset::Business {
            id,
            name: name.clone(),
            cost: *cost,
            mortgage: *mortgage,
            down_payment: *down_payment,
            cash_flow: *cash_flow,
        },
        Deal::StockSplit { .. } => unreachable!("splits are applied, never owned"),
    }
}

/// Adds a deal's asset to a player's holdings without moving cash.
/// Additional shares of an already-held symbol merge into the existing
/// holding at a floored weighted-average cost; everything else mints a
/// fresh asset. Both the active-deal purchase and player-to-player
/// transfers acquire through here, so a player never ends up with two
/// holdings of the same symbol.
pub(crate) fn acquire_asset(state: &mut GameState, idx: usize, deal: &Deal, shares: Option<u64>) {
    if let Deal::Stock {
        symbol,
        price,
        dividend_per_share,
        min_shares,
        ..
    } = deal
    {
        let bought = shares.unwrap_or(*min_shares);
        for asset in state.players[idx].financials.assets.iter_mut() {
            if let Asset::Stock {
                symbol: held,
                shares: held_shares,
                cost_per_share,
                dividend_per_share: held_dividend,
                ..
            } = asset
            {
                if held == symbol {
                    let total = *held_shares + bought;
                    *cost_per_share = (*cost_per_share * *held_shares as Money
                        + price * bought as Money)
                        / total as Money;
                    *held_shares = total;
                    *held_dividend = *dividend_per_share;
                    return;
                }
            }
        }
    }
    let asset = mint_asset(state, deal, shares);
    state.players[idx].financials.assets.push(asset);
}

/// Executes the active deal purchase for the player at `idx`, debiting the
/// purchase price.
pub(crate) fn buy_active_deal(state: &mut GameState, idx: usize, shares: Option<u64>) {
    let Some(card) = state.active_card.deal().cloned() else {
        return;
    };
    let buyer = state.players[idx].name.clone();

    match &card.deal {
        Deal::Stock {
            symbol,
            price,
            min_shares,
            ..
        } => {
            let bought = shares.unwrap_or(*min_shares);
            let cost = price * bought as Money;
            state.players[idx].cash -= cost;
            acquire_asset(state, idx, &card.deal, Some(bought));
            state.log(format!(
                "{buyer} bought {bought} shares of {symbol} for ${cost}"
            ));
        }
        Deal::RealEstate {
            name: property,
            down_payment,
            ..
        } => {
            let property = property.clone();
            let down = *down_payment;
            state.players[idx].cash -= down;
            acquire_asset(state, idx, &card.deal, None);
            state.log(format!("{buyer} bought {property} with ${down} down"));
        }
        Deal::Business {
            name: business,
            down_payment,
            ..
        } => {
            let business = business.clone();
            let down = *down_payment;
            state.players[idx].cash -= down;
            acquire_asset(state, idx, &card.deal, None);
            state.log(format!("{buyer} bought into {business} with ${down} down"));
        }
        Deal::StockSplit { .. } => {}
    }
}

/// Applies a freshly drawn market card: decision effects become the active
/// card, immediate effects hit every affected player at once.
pub(crate) fn apply_market_card(state: &mut GameState, card: MarketCard) {
    state.log(format!("Market: {}", card.title));
    if card.effect.needs_decision() {
        state.active_card = ActiveCard::Market(card);
        state.phase = TurnPhase::MakeDecision;
        return;
    }

    match &card.effect {
        MarketEffect::PropertyDamage { amount } => {
            let affected: Vec<usize> = state
                .players
                .iter()
                .enumerate()
                .filter(|(_, p)| {
                    !p.is_bankrupt
                        && p.financials
                            .assets
                            .iter()
                            .any(|a| matches!(a, Asset::RealEstate { .. }))
                })
                .map(|(i, _)| i)
                .collect();
            for idx in affected {
                charge_and_settle(state, idx, *amount, &card.title);
            }
        }
        MarketEffect::AllPlayersExpense { amount } => {
            let affected: Vec<usize> = state
                .players
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.is_bankrupt)
                .map(|(i, _)| i)
                .collect();
            for idx in affected {
                charge_and_settle(state, idx, *amount, &card.title);
            }
        }
        _ => {}
    }
    state.decks.market.discard(card);
    if state.phase != TurnPhase::BankruptcyDecision {
        state.phase = TurnPhase::EndOfTurn;
    }
}

/// Debits a player and runs the forced-loan procedure; a player who stays
/// cash-flow negative afterwards either enters the bankruptcy decision
/// (current player) or is liquidated on the spot (everyone else).
pub(crate) fn charge_and_settle(state: &mut GameState, idx: usize, amount: Money, reason: &str) {
    let name = state.players[idx].name.clone();
    state.players[idx].cash -= amount;
    state.log(format!("{name} paid ${amount} ({reason})"));
    settle(state, idx);
}

/// Forced-loan and insolvency check after any debit or negative credit.
pub(crate) fn settle(state: &mut GameState, idx: usize) {
    let name = state.players[idx].name.clone();
    let loan = state.players[idx].take_forced_loan();
    if loan > 0 {
        state.log(format!("{name} was forced to borrow ${loan} from the bank"));
    }
    let player = &state.players[idx];
    if player.is_bankrupt || player.cash_flow() >= 0 {
        return;
    }
    if idx == state.current_player {
        state.phase = TurnPhase::BankruptcyDecision;
        state.log(format!("{name} cannot cover their expenses"));
    } else {
        state.players[idx].execute_bankruptcy();
        if state.players[idx].is_bankrupt {
            state.log(format!("{name} went bankrupt and is out of the game"));
        } else {
            state.log(format!(
                "{name} went through bankruptcy and sits out 2 turns"
            ));
        }
    }
}

/// Applies a stock split to every holder of the symbol in one transition.
/// Shares multiply by the ratio (floored), per-share cost and dividend
/// divide by it; a holding floored to zero shares disappears.
pub(crate) fn apply_stock_split(state: &mut GameState, symbol: &str, ratio: f64) {
    state.log(format!("{symbol} split at a ratio of {ratio}"));
    for idx in 0..state.players.len() {
        let name = state.players[idx].name.clone();
        let mut wiped_out = Vec::new();
        for asset in state.players[idx].financials.assets.iter_mut() {
            if let Asset::Stock {
                id,
                symbol: held,
                shares,
                cost_per_share,
                dividend_per_share,
            } = asset
            {
                if held != symbol {
                    continue;
                }
                let new_shares = (*shares as f64 * ratio).floor() as u64;
                if new_shares == 0 {
                    wiped_out.push(*id);
                    continue;
                }
                *shares = new_shares;
                *cost_per_share = (*cost_per_share as f64 / ratio).floor() as Money;
                *dividend_per_share = (*dividend_per_share as f64 / ratio).floor() as Money;
            }
        }
        for id in wiped_out {
            state.players[idx].financials.remove_asset(id);
            state.log(format!(
                "{name}'s {symbol} holding was wiped out by the reverse split"
            ));
        }
    }
}

/// Sells shares of the holder's stock at the active card's price. A new
/// price of zero is a legitimate total loss, not an error.
pub(crate) fn sell_stock(state: &mut GameState, idx: usize, asset_id: u64, shares: Option<u64>) {
    let Some(MarketEffect::StockPrice { new_price, .. }) =
        state.active_card.market().map(|c| c.effect.clone())
    else {
        return;
    };

    let name = state.players[idx].name.clone();
    let mut sold = 0;
    let mut symbol = String::new();
    let mut emptied = false;
    if let Some(Asset::Stock {
        symbol: held,
        shares: held_shares,
        ..
    }) = state.players[idx]
        .financials
        .assets
        .iter_mut()
        .find(|a| a.id() == asset_id)
    {
        sold = shares.unwrap_or(*held_shares).min(*held_shares);
        symbol = held.clone();
        *held_shares -= sold;
        emptied = *held_shares == 0;
    }
    if emptied {
        state.players[idx].financials.remove_asset(asset_id);
    }
    if sold > 0 {
        let proceeds = new_price * sold as Money;
        state.players[idx].cash += proceeds;
        state.log(format!(
            "{name} sold {sold} shares of {symbol} for ${proceeds}"
        ));
    }
}

/// Sells a property to the active real-estate offer. The mortgage is
/// forgiven, never paid: proceeds are the sale price minus the mortgage.
pub(crate) fn sell_property(state: &mut GameState, idx: usize, asset_id: u64) {
    let Some(MarketEffect::RealEstateOffer {
        multiplier, flat, ..
    }) = state.active_card.market().map(|c| c.effect.clone())
    else {
        return;
    };

    let Some(Asset::RealEstate {
        name: property,
        cost,
        mortgage,
        ..
    }) = state.players[idx].financials.remove_asset(asset_id)
    else {
        return;
    };

    let sale_price = match (multiplier, flat) {
        (_, Some(flat)) => flat,
        (Some(multiplier), None) => (cost as f64 * multiplier).floor() as Money,
        (None, None) => cost,
    };
    let proceeds = sale_price - mortgage;
    let name = state.players[idx].name.clone();
    state.players[idx].cash += proceeds;
    state.log(format!(
        "{name} sold {property} for ${sale_price} (${proceeds} after the mortgage)"
    ));
    if proceeds < 0 {
        settle(state, idx);
    }
}

/// Debits the active doodad's cost, flat or percent of total income, and
/// retires the card.
pub(crate) fn pay_doodad(state: &mut GameState, idx: usize) {
    let Some(card) = state.active_card.doodad().cloned() else {
        return;
    };
    let amount = match card.cost {
        DoodadCost::Flat { amount } => amount,
        DoodadCost::PercentOfIncome { percent } => {
            state.players[idx].total_income() * percent as Money / 100
        }
    };
    charge_and_settle(state, idx, amount, &card.title);
    state.decks.doodads.discard(card);
    state.active_card = ActiveCard::None;
}
