//! Pure legality checks. Nothing in here mutates state; the engine turns
//! an `Err` into an `"Invalid action: ..."` log entry.

use crate::board::{self, SpaceType};
use crate::card::{Deal, MarketEffect};
use crate::enums::{TurnPhase, LOAN_STEP};
use crate::finance::{max_affordable_loan, Asset};
use crate::game::action::{GameAction, LoanType};
use crate::game::state::GameState;

pub fn validate(state: &GameState, action: &GameAction) -> Result<(), String> {
    if state.phase.is_game_over() {
        return Err("the game is over".into());
    }

    let actor_id = action.player_id();
    let actor = state
        .player(actor_id)
        .ok_or_else(|| format!("unknown player {actor_id}"))?;
    if actor.is_bankrupt {
        return Err(format!("{} is bankrupt and out of the game", actor.name));
    }

    let is_current = state.current().id == actor_id;
    if !is_current && !action.allowed_out_of_turn() {
        return Err(format!("it is not {}'s turn", actor.name));
    }

    match action {
        GameAction::RollDice {
            dice_values,
            use_both_dice,
            ..
        } => {
            require_phase(state, TurnPhase::RollDice)?;
            if actor.skip_turns > 0 {
                return Err(format!(
                    "{} is downsized and must pass this turn",
                    actor.name
                ));
            }
            if dice_values.iter().any(|d| !(1..=6).contains(d)) {
                return Err(format!("dice values {dice_values:?} are out of range"));
            }
            if *use_both_dice && actor.charity_rolls == 0 {
                return Err("two dice require an active charity donation".into());
            }
            Ok(())
        }

        GameAction::CollectPayDay { .. } => {
            require_phase(state, TurnPhase::PayDayCollection)?;
            if state.pay_days_remaining == 0 {
                return Err("no PayDay left to collect".into());
            }
            Ok(())
        }

        GameAction::ChooseDealType { .. } => {
            require_phase(state, TurnPhase::ResolveSpace)?;
            if actor.on_fast_track || board::rat_race_space(actor.position) != SpaceType::Deal {
                return Err("not on a Deal space".into());
            }
            Ok(())
        }

        GameAction::BuyAsset { shares, .. } => {
            require_phase(state, TurnPhase::MakeDecision)?;
            let card = state
                .active_card
                .deal()
                .ok_or("no deal card to buy")?;
            match &card.deal {
                Deal::Stock {
                    price,
                    min_shares,
                    max_shares,
                    ..
                } => {
                    let shares = shares.unwrap_or(*min_shares);
                    if shares < *min_shares || shares > *max_shares {
                        return Err(format!(
                            "share count must be between {min_shares} and {max_shares}"
                        ));
                    }
                    let cost = price * shares as crate::Money;
                    if actor.cash < cost {
                        return Err(format!("cannot afford ${cost} of stock"));
                    }
                }
                Deal::RealEstate { down_payment, .. } | Deal::Business { down_payment, .. } => {
                    if actor.cash < *down_payment {
                        return Err(format!("cannot afford the ${down_payment} down payment"));
                    }
                }
                Deal::StockSplit { .. } => return Err("a stock split cannot be bought".into()),
            }
            Ok(())
        }

        GameAction::SellAsset {
            asset_id, shares, ..
        } => {
            require_phase(state, TurnPhase::MakeDecision)?;
            let symbol = match state.active_card.market().map(|c| &c.effect) {
                Some(MarketEffect::StockPrice { symbol, .. }) => symbol,
                _ => return Err("no stock price event is active".into()),
            };
            match actor.financials.asset(*asset_id) {
                Some(Asset::Stock {
                    symbol: held,
                    shares: held_shares,
                    ..
                }) if held == symbol => {
                    let to_sell = shares.unwrap_or(*held_shares);
                    if to_sell == 0 || to_sell > *held_shares {
                        return Err(format!(
                            "cannot sell {to_sell} of {held_shares} held shares"
                        ));
                    }
                    Ok(())
                }
                Some(_) => Err(format!("asset {asset_id} is not {symbol} stock")),
                None => Err(format!("{} does not own asset {asset_id}", actor.name)),
            }
        }

        GameAction::SkipDeal { .. } => {
            require_phase(state, TurnPhase::MakeDecision)?;
            if state.active_card.deal().is_none() {
                return Err("no deal card to skip".into());
            }
            Ok(())
        }

        GameAction::PayExpense { .. } => {
            require_phase(state, TurnPhase::MakeDecision)?;
            if state.active_card.doodad().is_none() {
                return Err("no expense card to pay".into());
            }
            Ok(())
        }

        GameAction::AcceptCharity { .. } => {
            require_charity_space(state)?;
            let donation = actor.total_income() / 10;
            if actor.cash < donation {
                return Err(format!("cannot afford the ${donation} donation"));
            }
            Ok(())
        }

        GameAction::DeclineCharity { .. } => require_charity_space(state),

        GameAction::TakeLoan { amount, .. } => {
            if !state.phase.allows_loan_management() {
                return Err(format!("cannot take a loan during {}", state.phase));
            }
            require_loan_step(*amount)?;
            let max = max_affordable_loan(actor.cash_flow_before_bank(), actor.bank_loan);
            if *amount > max {
                return Err(format!("the bank will lend at most ${max}"));
            }
            Ok(())
        }

        GameAction::PayOffLoan {
            loan_type, amount, ..
        } => {
            if !state.phase.allows_loan_management()
                && state.phase != TurnPhase::BankruptcyDecision
            {
                return Err(format!("cannot repay a loan during {}", state.phase));
            }
            if actor.cash < *amount {
                return Err(format!("not enough cash to repay ${amount}"));
            }
            match loan_type {
                LoanType::Bank => {
                    require_loan_step(*amount)?;
                    if *amount > actor.bank_loan {
                        return Err(format!(
                            "bank loan balance is only ${}",
                            actor.bank_loan
                        ));
                    }
                }
                other => {
                    let name = other.liability_name().expect("fixed loan has a name");
                    let liability = actor
                        .financials
                        .liability(name)
                        .ok_or_else(|| format!("{} has no {name}", actor.name))?;
                    if *amount != liability.balance {
                        return Err(format!(
                            "{name} must be paid off in full (${})",
                            liability.balance
                        ));
                    }
                    if *amount <= 0 {
                        return Err("nothing to repay".into());
                    }
                }
            }
            Ok(())
        }

        GameAction::EndTurn { .. } => {
            let passing_while_downsized =
                state.phase == TurnPhase::RollDice && actor.skip_turns > 0;
            if state.phase != TurnPhase::EndOfTurn && !passing_while_downsized {
                return Err(format!("cannot end the turn during {}", state.phase));
            }
            Ok(())
        }

        GameAction::ChooseDream { dream, .. } => {
            if !matches!(state.phase, TurnPhase::RollDice | TurnPhase::EndOfTurn) {
                return Err(format!("cannot choose a dream during {}", state.phase));
            }
            if actor.dream.is_some() {
                return Err(format!("{} already chose a dream", actor.name));
            }
            if !board::dream_names().contains(&dream.as_str()) {
                return Err(format!("\"{dream}\" is not a dream space"));
            }
            Ok(())
        }

        GameAction::SellToMarket { asset_id, .. } => {
            require_phase(state, TurnPhase::MakeDecision)?;
            let offer_subtype = match state.active_card.market().map(|c| &c.effect) {
                Some(MarketEffect::RealEstateOffer { subtype, .. }) => subtype,
                _ => return Err("no real-estate offer is active".into()),
            };
            let asset_id = asset_id.ok_or("an asset id is required to sell")?;
            match actor.financials.asset(asset_id) {
                Some(Asset::RealEstate { subtype, .. }) if subtype == offer_subtype => Ok(()),
                Some(_) => Err(format!("asset {asset_id} does not match the offer")),
                None => Err(format!("{} does not own asset {asset_id}", actor.name)),
            }
        }

        GameAction::DeclineMarket { .. } => {
            require_phase(state, TurnPhase::MakeDecision)?;
            match state.active_card.market() {
                Some(card) if card.effect.needs_decision() => Ok(()),
                _ => Err("no market offer to decline".into()),
            }
        }

        GameAction::DeclareBankruptcy { .. } => {
            require_phase(state, TurnPhase::BankruptcyDecision)
        }

        GameAction::OfferDealToPlayer {
            target_player_id,
            asking_price,
            ..
        } => {
            require_phase(state, TurnPhase::MakeDecision)?;
            if state.active_card.deal().is_none() {
                return Err("no deal card to offer".into());
            }
            if *asking_price <= 0 {
                return Err("the asking price must be positive".into());
            }
            if *target_player_id == actor_id {
                return Err("cannot offer a deal to yourself".into());
            }
            let target = state
                .player(*target_player_id)
                .ok_or_else(|| format!("unknown player {target_player_id}"))?;
            if target.is_bankrupt {
                return Err(format!("{} is bankrupt", target.name));
            }
            Ok(())
        }

        GameAction::AcceptPlayerDeal { .. } => {
            let pending = require_pending_deal(state, actor_id)?;
            let cost = pending.asking_price
                + pending
                    .card
                    .deal()
                    .map(|c| c.deal.down_payment_cost())
                    .unwrap_or(0);
            if actor.cash < cost {
                return Err(format!("cannot afford the ${cost} purchase"));
            }
            Ok(())
        }

        GameAction::DeclinePlayerDeal { .. } => {
            require_pending_deal(state, actor_id).map(|_| ())
        }
    }
}

fn require_phase(state: &GameState, phase: TurnPhase) -> Result<(), String> {
    if state.phase == phase {
        Ok(())
    } else {
        Err(format!("expected phase {phase}, currently {}", state.phase))
    }
}

fn require_charity_space(state: &GameState) -> Result<(), String> {
    require_phase(state, TurnPhase::ResolveSpace)?;
    let current = state.current();
    if current.on_fast_track || board::rat_race_space(current.position) != SpaceType::Charity {
        return Err("not on the Charity space".into());
    }
    Ok(())
}

fn require_loan_step(amount: crate::Money) -> Result<(), String> {
    if amount <= 0 || amount % LOAN_STEP != 0 {
        return Err(format!(
            "loan amounts must be positive multiples of ${LOAN_STEP}, got ${amount}"
        ));
    }
    Ok(())
}

fn require_pending_deal(
    state: &GameState,
    actor_id: uuid::Uuid,
) -> Result<&crate::game::state::PendingPlayerDeal, String> {
    let pending = state
        .pending_deal
        .as_ref()
        .ok_or("no deal offer is pending")?;
    if state.phase != TurnPhase::WaitingForDealResponse {
        return Err(format!("expected a pending deal, currently {}", state.phase));
    }
    if pending.buyer_id != actor_id {
        return Err("this deal was not offered to you".into());
    }
    Ok(pending)
}
