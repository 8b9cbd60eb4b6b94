//! The turn state machine. `process_action` is the single entry point
//! through which all game progress flows: it validates, dispatches to the
//! resolvers, advances the phase and hands back the replacement snapshot.

use crate::board::{self, FastTrackSpace, SpaceType};
use crate::card::{ActiveCard, DealCard};
use crate::enums::{
    TurnPhase, CHARITY_ROLLS, DOWNSIZED_SKIP_TURNS, FAST_TRACK_INCOME_MULTIPLIER,
    FAST_TRACK_SIZE, FAST_TRACK_VENTURE_CASH_FLOW, MAX_CHILDREN, RAT_RACE_SIZE,
};
use crate::exception::INVALID_ACTION_PREFIX;
use crate::game::action::{ActionKind, DealType, GameAction, LoanType};
use crate::game::state::{GameState, PendingPlayerDeal};
use crate::game::{resolve, validator};

/// Runs one action against a snapshot and returns the replacement. A
/// rejected action returns the state unchanged except for a single log
/// entry prefixed with `"Invalid action: "`; callers detect failure by
/// comparing log length and checking that prefix on the last entry.
pub fn process_action(mut state: GameState, action: &GameAction) -> GameState {
    if let Err(reason) = validator::validate(&state, action) {
        state.log(format!("{INVALID_ACTION_PREFIX}{reason}"));
        return state;
    }
    apply(&mut state, action);
    state
}

/// True when `after` is the rejected form of `before`: one fresh log entry
/// carrying the invalid-action prefix.
pub fn was_rejected(before_log_len: usize, after: &GameState) -> bool {
    after.log.len() > before_log_len
        && after
            .log
            .last()
            .is_some_and(|entry| entry.starts_with(INVALID_ACTION_PREFIX))
}

fn apply(state: &mut GameState, action: &GameAction) {
    match action {
        GameAction::RollDice {
            dice_values,
            use_both_dice,
            ..
        } => roll_dice(state, *dice_values, *use_both_dice),
        GameAction::CollectPayDay { .. } => collect_pay_day(state),
        GameAction::ChooseDealType { deal_type, .. } => choose_deal_type(state, *deal_type),
        GameAction::BuyAsset { shares, .. } => {
            let idx = state.current_player;
            resolve::buy_active_deal(state, idx, *shares);
            retire_active_deal(state);
            if state.phase != TurnPhase::BankruptcyDecision {
                state.phase = TurnPhase::EndOfTurn;
            }
        }
        GameAction::SellAsset {
            player_id,
            asset_id,
            shares,
            ..
        } => {
            // Price always comes from the card, never the client payload.
            if let Some(idx) = state.player_index(*player_id) {
                resolve::sell_stock(state, idx, *asset_id, *shares);
            }
        }
        GameAction::SkipDeal { .. } => {
            retire_active_deal(state);
            state.phase = TurnPhase::EndOfTurn;
        }
        GameAction::PayExpense { .. } => {
            let idx = state.current_player;
            resolve::pay_doodad(state, idx);
            if state.phase != TurnPhase::BankruptcyDecision {
                state.phase = TurnPhase::EndOfTurn;
            }
        }
        GameAction::AcceptCharity { .. } => {
            let donation = state.current().total_income() / 10;
            let name = state.current().name.clone();
            let player = state.current_mut();
            player.cash -= donation;
            player.charity_rolls = CHARITY_ROLLS;
            state.log(format!(
                "{name} donated ${donation} to charity and may roll two dice for {CHARITY_ROLLS} turns"
            ));
            state.phase = TurnPhase::EndOfTurn;
        }
        GameAction::DeclineCharity { .. } => {
            state.phase = TurnPhase::EndOfTurn;
        }
        GameAction::TakeLoan { amount, .. } => {
            let name = state.current().name.clone();
            let player = state.current_mut();
            player.cash += amount;
            player.bank_loan += amount;
            state.log(format!("{name} took a ${amount} bank loan"));
        }
        GameAction::PayOffLoan {
            loan_type, amount, ..
        } => pay_off_loan(state, *loan_type, *amount),
        GameAction::EndTurn { .. } => {
            if state.phase == TurnPhase::RollDice && state.current().skip_turns > 0 {
                let name = state.current().name.clone();
                state.current_mut().skip_turns -= 1;
                state.log(format!("{name} sits out the turn"));
            }
            advance_turn(state);
        }
        GameAction::ChooseDream { dream, .. } => {
            let name = state.current().name.clone();
            state.current_mut().dream = Some(dream.clone());
            state.log(format!("{name} dreams of the {dream}"));
        }
        GameAction::SellToMarket {
            player_id,
            asset_id,
            ..
        } => {
            if let (Some(idx), Some(asset_id)) = (state.player_index(*player_id), *asset_id) {
                resolve::sell_property(state, idx, asset_id);
            }
        }
        GameAction::DeclineMarket { player_id, .. } => {
            let name = state
                .player(*player_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            state.log(format!("{name} declines the market offer"));
            if state.current().id == *player_id {
                if let ActiveCard::Market(card) = std::mem::take(&mut state.active_card) {
                    state.decks.market.discard(card);
                }
                state.phase = TurnPhase::EndOfTurn;
            }
        }
        GameAction::DeclareBankruptcy { .. } => {
            let name = state.current().name.clone();
            state.current_mut().execute_bankruptcy();
            if state.current().is_bankrupt {
                state.log(format!("{name} went bankrupt and is out of the game"));
            } else {
                state.log(format!(
                    "{name} went through bankruptcy and sits out 2 turns"
                ));
            }
            state.phase = TurnPhase::EndOfTurn;
            advance_turn(state);
        }
        GameAction::OfferDealToPlayer {
            player_id,
            target_player_id,
            asking_price,
        } => {
            let seller = state.current().name.clone();
            let target = state
                .player(*target_player_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            state.pending_deal = Some(PendingPlayerDeal {
                seller_id: *player_id,
                buyer_id: *target_player_id,
                card: std::mem::take(&mut state.active_card),
                asking_price: *asking_price,
            });
            state.phase = TurnPhase::WaitingForDealResponse;
            state.log(format!(
                "{seller} offers the deal to {target} for ${asking_price}"
            ));
        }
        GameAction::AcceptPlayerDeal { .. } => accept_player_deal(state),
        GameAction::DeclinePlayerDeal { .. } => {
            let Some(pending) = state.pending_deal.take() else {
                return;
            };
            let buyer = state
                .player(pending.buyer_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            state.active_card = pending.card;
            state.phase = TurnPhase::MakeDecision;
            state.log(format!("{buyer} declined the deal offer"));
        }
    }
}

fn roll_dice(state: &mut GameState, dice: [u8; 2], use_both: bool) {
    let name = state.current().name.clone();
    state.last_dice = Some(dice);
    let both = use_both && state.current().charity_rolls > 0;
    if state.current().charity_rolls > 0 {
        state.current_mut().charity_rolls -= 1;
    }
    let roll = if both {
        (dice[0] + dice[1]) as usize
    } else {
        dice[0] as usize
    };
    state.log(format!("{name} rolled {roll}"));

    if state.current().on_fast_track {
        fast_track_move(state, roll);
    } else {
        let start = state.current().position;
        state.current_mut().position = board::advance(start, roll, RAT_RACE_SIZE);
        let crossings = board::pay_days_crossed(start, roll);
        if crossings > 0 {
            state.pay_days_remaining = crossings;
            state.phase = TurnPhase::PayDayCollection;
        } else {
            resolve_space(state);
        }
    }
}

fn collect_pay_day(state: &mut GameState) {
    let name = state.current().name.clone();
    let on_fast_track = state.current().on_fast_track;
    let amount = if on_fast_track {
        state.current().fast_track_cash_flow
    } else {
        state.current().cash_flow()
    };
    state.current_mut().cash += amount;
    if on_fast_track {
        state.log(format!("{name} collected a ${amount} CashFlow Day"));
    } else {
        state.log(format!("{name} collected a ${amount} PayDay"));
    }
    state.pay_days_remaining -= 1;
    let idx = state.current_player;
    resolve::settle(state, idx);
    if state.pay_days_remaining == 0 && state.phase == TurnPhase::PayDayCollection {
        if on_fast_track {
            resolve_fast_track_space(state);
        } else {
            resolve_space(state);
        }
    }
}

/// Resolves the rat-race space the current player landed on.
fn resolve_space(state: &mut GameState) {
    let position = state.current().position;
    match board::rat_race_space(position) {
        SpaceType::Deal | SpaceType::Charity => {
            state.phase = TurnPhase::ResolveSpace;
        }
        SpaceType::Market => {
            let mut rng = state.take_rng();
            match state.decks.market.draw(&mut rng) {
                Some(card) => resolve::apply_market_card(state, card),
                None => deck_exhausted(state, "market"),
            }
        }
        SpaceType::Doodad => {
            let mut rng = state.take_rng();
            match state.decks.doodads.draw(&mut rng) {
                Some(card) => {
                    state.log(format!("Doodad: {}", card.title));
                    state.active_card = ActiveCard::Doodad(card);
                    state.phase = TurnPhase::MakeDecision;
                }
                None => deck_exhausted(state, "doodad"),
            }
        }
        SpaceType::Baby => {
            let name = state.current().name.clone();
            let player = state.current_mut();
            if player.financials.children < MAX_CHILDREN {
                player.financials.children += 1;
                let children = player.financials.children;
                state.log(format!("{name} had a baby ({children} children)"));
            } else {
                state.log(format!("{name} already has {MAX_CHILDREN} children"));
            }
            state.phase = TurnPhase::EndOfTurn;
        }
        SpaceType::Downsized => {
            let name = state.current().name.clone();
            let expenses = state.current().total_expenses();
            state.current_mut().skip_turns = DOWNSIZED_SKIP_TURNS;
            state.log(format!("{name} was downsized"));
            let idx = state.current_player;
            resolve::charge_and_settle(state, idx, expenses, "downsized");
            if state.phase != TurnPhase::BankruptcyDecision {
                state.phase = TurnPhase::EndOfTurn;
            }
        }
        SpaceType::PayDay => {
            state.phase = TurnPhase::EndOfTurn;
        }
    }
}

/// Empty deck and empty discard pile: note it and move on, never fault.
fn deck_exhausted(state: &mut GameState, deck: &str) {
    state.log(format!("The {deck} deck is exhausted; nothing happens"));
    state.phase = TurnPhase::EndOfTurn;
}

fn choose_deal_type(state: &mut GameState, deal_type: DealType) {
    let mut rng = state.take_rng();
    let drawn = match deal_type {
        DealType::Small => state.decks.small_deals.draw(&mut rng),
        DealType::Big => state.decks.big_deals.draw(&mut rng),
    };
    let Some(card) = drawn else {
        let deck = match deal_type {
            DealType::Small => "small deal",
            DealType::Big => "big deal",
        };
        deck_exhausted(state, deck);
        return;
    };

    state.log(format!("Deal: {}", card.title));
    if let crate::card::Deal::StockSplit { symbol, ratio } = &card.deal {
        let (symbol, ratio) = (symbol.clone(), *ratio);
        discard_deal(state, deal_type, card);
        resolve::apply_stock_split(state, &symbol, ratio);
        state.phase = TurnPhase::EndOfTurn;
        return;
    }
    state.active_card = match deal_type {
        DealType::Small => ActiveCard::SmallDeal(card),
        DealType::Big => ActiveCard::BigDeal(card),
    };
    state.phase = TurnPhase::MakeDecision;
}

fn discard_deal(state: &mut GameState, deal_type: DealType, card: DealCard) {
    match deal_type {
        DealType::Small => state.decks.small_deals.discard(card),
        DealType::Big => state.decks.big_deals.discard(card),
    }
}

/// Moves the active deal card to its deck's discard pile.
fn retire_active_deal(state: &mut GameState) {
    match std::mem::take(&mut state.active_card) {
        ActiveCard::SmallDeal(card) => state.decks.small_deals.discard(card),
        ActiveCard::BigDeal(card) => state.decks.big_deals.discard(card),
        other => state.active_card = other,
    }
}

fn pay_off_loan(state: &mut GameState, loan_type: LoanType, amount: crate::Money) {
    let name = state.current().name.clone();
    match loan_type.liability_name() {
        None => {
            let player = state.current_mut();
            player.cash -= amount;
            player.bank_loan -= amount;
            state.log(format!("{name} repaid ${amount} of the bank loan"));
        }
        Some(liability_name) => {
            let player = state.current_mut();
            player.cash -= amount;
            player.financials.drop_liability(liability_name);
            state.log(format!("{name} paid off the {liability_name} (${amount})"));
        }
    }
    // Repayment can restore solvency mid bankruptcy decision; any PayDay
    // collections interrupted by the insolvency resume where they left off.
    if state.phase == TurnPhase::BankruptcyDecision && state.current().cash_flow() >= 0 {
        let name = state.current().name.clone();
        state.log(format!("{name} restored a positive cash flow"));
        state.phase = if state.pay_days_remaining > 0 {
            TurnPhase::PayDayCollection
        } else {
            TurnPhase::EndOfTurn
        };
    }
}

fn accept_player_deal(state: &mut GameState) {
    let Some(pending) = state.pending_deal.take() else {
        return;
    };
    let (Some(buyer_idx), Some(seller_idx)) = (
        state.player_index(pending.buyer_id),
        state.player_index(pending.seller_id),
    ) else {
        return;
    };
    let Some(card) = pending.card.deal().cloned() else {
        return;
    };

    let buyer = state.players[buyer_idx].name.clone();
    let seller = state.players[seller_idx].name.clone();
    let down = card.deal.down_payment_cost();
    let price = pending.asking_price;

    state.players[buyer_idx].cash -= price + down;
    state.players[seller_idx].cash += price;
    resolve::acquire_asset(state, buyer_idx, &card.deal, None);

    match pending.card {
        ActiveCard::BigDeal(card) => state.decks.big_deals.discard(card),
        ActiveCard::SmallDeal(card) => state.decks.small_deals.discard(card),
        _ => {}
    }
    state.log(format!(
        "{buyer} bought the deal from {seller} for ${price} plus ${down} down"
    ));
    state.phase = TurnPhase::EndOfTurn;
}

fn fast_track_move(state: &mut GameState, roll: usize) {
    let start = state.current().fast_track_position;
    let landing = board::advance(start, roll, FAST_TRACK_SIZE);
    state.current_mut().fast_track_position = landing;

    // CashFlowDay crossings collect one at a time, like rat-race PayDays;
    // the landed space resolves once the last collection is in.
    let crossings = board::cash_flow_days_crossed(start, roll);
    if crossings > 0 {
        state.pay_days_remaining = crossings;
        state.phase = TurnPhase::PayDayCollection;
        return;
    }
    resolve_fast_track_space(state);
}

fn resolve_fast_track_space(state: &mut GameState) {
    let name = state.current().name.clone();
    let landing = state.current().fast_track_position;
    match board::fast_track_space(landing) {
        FastTrackSpace::Dream(dream) => {
            if state.current().dream.as_deref() == Some(dream) {
                let winner = state.current().id;
                state.current_mut().has_won = true;
                state.winner = Some(winner);
                state.phase = TurnPhase::GameOver;
                state.log(format!("{name} reached the {dream} and wins the game!"));
                return;
            }
            state.log(format!("{name} passes through the {dream}"));
        }
        FastTrackSpace::CashFlowDay => {}
        FastTrackSpace::BusinessDeal => {
            state.current_mut().fast_track_cash_flow += FAST_TRACK_VENTURE_CASH_FLOW;
            state.log(format!(
                "{name} invested in a venture: +${FAST_TRACK_VENTURE_CASH_FLOW} cash flow"
            ));
        }
        FastTrackSpace::Tax | FastTrackSpace::Lawsuit => {
            let loss = state.current().cash / 2;
            state.current_mut().cash -= loss;
            state.log(format!("{name} lost ${loss} to a legal setback"));
        }
        FastTrackSpace::Divorce => {
            let loss = state.current().cash;
            state.current_mut().cash = 0;
            state.log(format!("{name} lost everything in a divorce (${loss})"));
        }
    }
    state.phase = TurnPhase::EndOfTurn;
}

/// Hands the turn to the next playable player, skipping and decrementing
/// anyone serving downsize or bankruptcy turns; ends the game when nobody
/// is left standing.
fn advance_turn(state: &mut GameState) {
    state.active_card = ActiveCard::None;
    state.pending_deal = None;
    state.pay_days_remaining = 0;

    // Escape check for the departing player.
    let current = state.current();
    if !current.on_fast_track && !current.is_bankrupt && current.can_escape() {
        let name = current.name.clone();
        let cash_flow = current.passive_income() * FAST_TRACK_INCOME_MULTIPLIER;
        let player = state.current_mut();
        player.on_fast_track = true;
        player.escaped = true;
        player.fast_track_position = 0;
        player.fast_track_cash_flow = cash_flow;
        state.log(format!(
            "{name} escaped the rat race with a ${cash_flow} fast-track cash flow"
        ));
    }

    if state.players.iter().all(|p| p.is_bankrupt) {
        state.phase = TurnPhase::GameOver;
        state.log("Every player is bankrupt; the game ends with no winner".to_string());
        return;
    }

    loop {
        state.current_player = (state.current_player + 1) % state.players.len();
        state.turn_count += 1;
        let name = state.current().name.clone();
        let player = state.current_mut();
        if player.is_bankrupt {
            continue;
        }
        if player.bankrupt_turns_left > 0 {
            player.bankrupt_turns_left -= 1;
            state.log(format!("{name} skips a turn (bankruptcy)"));
            continue;
        }
        if player.skip_turns > 0 {
            player.skip_turns -= 1;
            state.log(format!("{name} skips a turn (downsized)"));
            continue;
        }
        break;
    }
    state.phase = TurnPhase::RollDice;
    state.last_dice = None;
}

/// Legal action kinds for the current phase, used to drive client UI.
pub fn valid_actions(state: &GameState) -> Vec<ActionKind> {
    let mut actions = Vec::new();
    match state.phase {
        TurnPhase::GameOver => {}
        TurnPhase::RollDice => {
            if state.current().skip_turns > 0 {
                actions.push(ActionKind::EndTurn);
            } else {
                actions.push(ActionKind::RollDice);
            }
            if state.current().dream.is_none() {
                actions.push(ActionKind::ChooseDream);
            }
            actions.extend([ActionKind::TakeLoan, ActionKind::PayOffLoan]);
        }
        TurnPhase::PayDayCollection => {
            actions.extend([
                ActionKind::CollectPayDay,
                ActionKind::TakeLoan,
                ActionKind::PayOffLoan,
            ]);
        }
        TurnPhase::ResolveSpace => {
            match board::rat_race_space(state.current().position) {
                SpaceType::Deal => actions.push(ActionKind::ChooseDealType),
                SpaceType::Charity => {
                    actions.extend([ActionKind::AcceptCharity, ActionKind::DeclineCharity]);
                }
                _ => {}
            }
            actions.extend([ActionKind::TakeLoan, ActionKind::PayOffLoan]);
        }
        TurnPhase::MakeDecision => {
            match &state.active_card {
                ActiveCard::SmallDeal(_) | ActiveCard::BigDeal(_) => {
                    actions.extend([
                        ActionKind::BuyAsset,
                        ActionKind::SkipDeal,
                        ActionKind::OfferDealToPlayer,
                    ]);
                }
                ActiveCard::Market(card) => {
                    match card.effect {
                        crate::card::MarketEffect::StockPrice { .. } => {
                            actions.push(ActionKind::SellAsset)
                        }
                        _ => actions.push(ActionKind::SellToMarket),
                    }
                    actions.push(ActionKind::DeclineMarket);
                }
                ActiveCard::Doodad(_) => actions.push(ActionKind::PayExpense),
                ActiveCard::None => {}
            }
            actions.extend([ActionKind::TakeLoan, ActionKind::PayOffLoan]);
        }
        TurnPhase::EndOfTurn => {
            actions.push(ActionKind::EndTurn);
            if state.current().dream.is_none() {
                actions.push(ActionKind::ChooseDream);
            }
            actions.extend([ActionKind::TakeLoan, ActionKind::PayOffLoan]);
        }
        TurnPhase::BankruptcyDecision => {
            actions.extend([ActionKind::DeclareBankruptcy, ActionKind::PayOffLoan]);
        }
        TurnPhase::WaitingForDealResponse => {
            actions.extend([
                ActionKind::AcceptPlayerDeal,
                ActionKind::DeclinePlayerDeal,
            ]);
        }
    }
    actions
}
