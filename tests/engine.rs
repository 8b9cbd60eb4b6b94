//! End-to-end engine scenarios driven purely through `process_action`.

use cashflow::card::data::PROFESSIONS;
use cashflow::card::{ActiveCard, Deal, DealCard, DoodadCard, DoodadCost, MarketCard, MarketEffect};
use cashflow::deck::Deck;
use cashflow::enums::TurnPhase;
use cashflow::exception::INVALID_ACTION_PREFIX;
use cashflow::finance::{Asset, CREDIT_CARD};
use cashflow::game::{
    process_action, valid_actions, ActionKind, DealType, GameAction, GameState, LoanType,
    PlayerSpec,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn roster(n: usize) -> Vec<PlayerSpec> {
    (0..n)
        .map(|i| PlayerSpec {
            id: Uuid::new_v4(),
            name: format!("player-{i}"),
        })
        .collect()
}

fn game(n: usize) -> GameState {
    GameState::new(&roster(n), &PROFESSIONS, 42)
}

fn rejected(state: &GameState) -> bool {
    state
        .log
        .last()
        .is_some_and(|entry| entry.starts_with(INVALID_ACTION_PREFIX))
}

fn stock_card(symbol: &str, price: i64) -> DealCard {
    DealCard {
        title: format!("{symbol} stock"),
        description: String::new(),
        deal: Deal::Stock {
            symbol: symbol.into(),
            price,
            dividend_per_share: 0,
            min_shares: 10,
            max_shares: 100_000,
        },
    }
}

fn condo_card() -> DealCard {
    DealCard {
        title: "Condo For Sale".into(),
        description: String::new(),
        deal: Deal::RealEstate {
            subtype: "condo".into(),
            name: "2/1 Condo".into(),
            cost: 40_000,
            mortgage: 36_000,
            down_payment: 4_000,
            cash_flow: 140,
        },
    }
}

#[test]
fn invalid_dice_are_logged_and_leave_position_unchanged() {
    let state = game(2);
    let player = state.current().id;
    let position_before = state.current().position;

    let state = process_action(
        state,
        &GameAction::RollDice {
            player_id: player,
            dice_values: [7, 3],
            use_both_dice: false,
        },
    );
    assert!(rejected(&state));
    assert_eq!(state.current().position, position_before);
    assert_eq!(state.phase, TurnPhase::RollDice);
}

#[test]
fn rejection_only_grows_the_log() {
    let mut state = game(2);
    let intruder = state.players[1].id;
    state.phase = TurnPhase::RollDice;

    let before = state.clone();
    let after = process_action(
        state,
        &GameAction::EndTurn {
            player_id: intruder,
        },
    );
    assert!(rejected(&after));
    assert_eq!(after.log.len(), before.log.len() + 1);
    assert_eq!(after.players, before.players);
    assert_eq!(after.phase, before.phase);
    assert_eq!(after.current_player, before.current_player);
}

#[test]
fn rolling_from_22_with_a_5_lands_on_the_deal_space_without_a_pay_day() {
    let mut state = game(2);
    state.players[0].position = 22;
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::RollDice {
            player_id: player,
            dice_values: [5, 2],
            use_both_dice: false,
        },
    );
    assert_eq!(state.current().position, 3);
    assert_eq!(state.pay_days_remaining, 0);
    assert_eq!(state.phase, TurnPhase::ResolveSpace);
    assert!(valid_actions(&state).contains(&ActionKind::ChooseDealType));
}

#[test]
fn crossing_pay_days_requires_one_collection_each() {
    let mut state = game(2);
    state.players[0].position = 3;
    let player = state.current().id;
    let cash_before = state.current().cash;
    let cash_flow = state.current().cash_flow();

    // 3 -> 11 crosses the PayDays at 4 and 10.
    let mut state = process_action(
        state,
        &GameAction::RollDice {
            player_id: player,
            dice_values: [6, 1],
            use_both_dice: false,
        },
    );
    // A single die moves 6 to position 9; use a bigger board walk instead.
    // Position 9 is Charity, crossing only the PayDay at 4.
    assert_eq!(state.current().position, 9);
    assert_eq!(state.pay_days_remaining, 1);
    assert_eq!(state.phase, TurnPhase::PayDayCollection);

    state = process_action(state, &GameAction::CollectPayDay { player_id: player });
    assert_eq!(state.current().cash, cash_before + cash_flow);
    assert_eq!(state.pay_days_remaining, 0);
    assert_eq!(state.phase, TurnPhase::ResolveSpace);
}

#[test]
fn buying_stock_debits_cost_and_mints_one_asset_with_a_fresh_id() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::SmallDeal(stock_card("MYT4U", 10));
    state.players[0].cash = 5_000;
    let player = state.current().id;
    let id_before = state.next_asset_id;

    let state = process_action(
        state,
        &GameAction::BuyAsset {
            player_id: player,
            shares: Some(100),
        },
    );
    assert!(!rejected(&state));
    assert_eq!(state.current().cash, 5_000 - 1_000);
    assert_eq!(state.current().financials.assets.len(), 1);
    match &state.current().financials.assets[0] {
        Asset::Stock {
            id,
            symbol,
            shares,
            cost_per_share,
            ..
        } => {
            assert_eq!(*id, id_before);
            assert_eq!(symbol, "MYT4U");
            assert_eq!(*shares, 100);
            assert_eq!(*cost_per_share, 10);
        }
        other => panic!("expected a stock, got {other:?}"),
    }
    assert_eq!(state.next_asset_id, id_before + 1);
    assert_eq!(state.phase, TurnPhase::EndOfTurn);
}

#[test]
fn buying_more_of_a_held_stock_merges_at_weighted_average_cost() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::SmallDeal(stock_card("OK4U", 40));
    state.players[0].cash = 10_000;
    state.players[0].financials.assets.push(Asset::Stock {
        id: 77,
        symbol: "OK4U".into(),
        shares: 100,
        cost_per_share: 20,
        dividend_per_share: 0,
    });
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::BuyAsset {
            player_id: player,
            shares: Some(100),
        },
    );
    assert_eq!(state.current().financials.assets.len(), 1);
    match &state.current().financials.assets[0] {
        Asset::Stock {
            id,
            shares,
            cost_per_share,
            ..
        } => {
            assert_eq!(*id, 77);
            assert_eq!(*shares, 200);
            // (100*20 + 100*40) / 200
            assert_eq!(*cost_per_share, 30);
        }
        other => panic!("expected a stock, got {other:?}"),
    }
}

#[test]
fn unaffordable_purchase_is_rejected() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::SmallDeal(condo_card());
    state.players[0].cash = 500;
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::BuyAsset {
            player_id: player,
            shares: None,
        },
    );
    assert!(rejected(&state));
    assert!(state.current().financials.assets.is_empty());
    assert_eq!(state.current().cash, 500);
}

#[test]
fn selling_real_estate_credits_price_minus_mortgage() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::Market(MarketCard {
        title: "Condo buyer".into(),
        effect: MarketEffect::RealEstateOffer {
            subtype: "condo".into(),
            multiplier: None,
            flat: Some(55_000),
        },
    });
    state.players[0].cash = 1_000;
    state.players[0].financials.assets.push(Asset::RealEstate {
        id: 5,
        subtype: "condo".into(),
        name: "2/1 Condo".into(),
        cost: 40_000,
        mortgage: 36_000,
        down_payment: 4_000,
        cash_flow: 140,
    });
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::SellToMarket {
            player_id: player,
            asset_id: Some(5),
        },
    );
    assert!(!rejected(&state));
    assert_eq!(state.current().cash, 1_000 + 55_000 - 36_000);
    assert!(state.current().financials.assets.is_empty());
    // The seller keeps the decision open until they decline or end.
    assert_eq!(state.phase, TurnPhase::MakeDecision);
}

#[test]
fn a_price_crash_to_zero_is_a_total_loss_not_an_error() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::Market(MarketCard {
        title: "MYT4U bankrupt!".into(),
        effect: MarketEffect::StockPrice {
            symbol: "MYT4U".into(),
            new_price: 0,
        },
    });
    state.players[0].cash = 0;
    state.players[0].financials.assets.push(Asset::Stock {
        id: 9,
        symbol: "MYT4U".into(),
        shares: 500,
        cost_per_share: 10,
        dividend_per_share: 0,
    });
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::SellAsset {
            player_id: player,
            asset_id: 9,
            shares: None,
            price: Some(999),
        },
    );
    assert!(!rejected(&state));
    // The advisory client price is ignored; the card says zero.
    assert_eq!(state.current().cash, 0);
    assert!(state.current().financials.assets.is_empty());
}

#[test]
fn a_non_current_holder_may_sell_into_a_price_event() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::Market(MarketCard {
        title: "OK4U rallies".into(),
        effect: MarketEffect::StockPrice {
            symbol: "OK4U".into(),
            new_price: 40,
        },
    });
    state.players[1].cash = 0;
    state.players[1].financials.assets.push(Asset::Stock {
        id: 3,
        symbol: "OK4U".into(),
        shares: 50,
        cost_per_share: 20,
        dividend_per_share: 0,
    });
    let bystander = state.players[1].id;

    let state = process_action(
        state,
        &GameAction::SellAsset {
            player_id: bystander,
            asset_id: 3,
            shares: Some(50),
            price: None,
        },
    );
    assert!(!rejected(&state));
    assert_eq!(state.players[1].cash, 2_000);
}

#[test]
fn stock_split_hits_every_holder_in_one_transition() {
    let mut state = game(3);
    // Position 0 is a Deal space; stage a split on top of the small deck.
    state.phase = TurnPhase::ResolveSpace;
    state.players[0].position = 0;
    let mut rng = StdRng::seed_from_u64(1);
    state.decks.small_deals = Deck::new(
        &[DealCard {
            title: "ON2U splits 2:1".into(),
            description: String::new(),
            deal: Deal::StockSplit {
                symbol: "ON2U".into(),
                ratio: 2.0,
            },
        }],
        &mut rng,
    );
    state.players[0].financials.assets.push(Asset::Stock {
        id: 1,
        symbol: "ON2U".into(),
        shares: 100,
        cost_per_share: 30,
        dividend_per_share: 2,
    });
    state.players[2].financials.assets.push(Asset::Stock {
        id: 2,
        symbol: "ON2U".into(),
        shares: 5,
        cost_per_share: 30,
        dividend_per_share: 2,
    });
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::ChooseDealType {
            player_id: player,
            deal_type: DealType::Small,
        },
    );
    assert!(!rejected(&state));
    assert_eq!(state.phase, TurnPhase::EndOfTurn);
    for (idx, shares, cost, dividend) in [(0usize, 200u64, 15i64, 1i64), (2, 10, 15, 1)] {
        match &state.players[idx].financials.assets[0] {
            Asset::Stock {
                shares: s,
                cost_per_share: c,
                dividend_per_share: d,
                ..
            } => {
                assert_eq!(*s, shares);
                assert_eq!(*c, cost);
                assert_eq!(*d, dividend);
            }
            other => panic!("expected a stock, got {other:?}"),
        }
    }
}

#[test]
fn reverse_split_that_floors_to_zero_removes_the_holding() {
    let mut state = game(2);
    state.phase = TurnPhase::ResolveSpace;
    state.players[0].position = 0;
    let mut rng = StdRng::seed_from_u64(1);
    state.decks.small_deals = Deck::new(
        &[DealCard {
            title: "MYT4U reverse split".into(),
            description: String::new(),
            deal: Deal::StockSplit {
                symbol: "MYT4U".into(),
                ratio: 0.5,
            },
        }],
        &mut rng,
    );
    state.players[1].financials.assets.push(Asset::Stock {
        id: 1,
        symbol: "MYT4U".into(),
        shares: 1,
        cost_per_share: 10,
        dividend_per_share: 0,
    });
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::ChooseDealType {
            player_id: player,
            deal_type: DealType::Small,
        },
    );
    assert!(state.players[1].financials.assets.is_empty());
}

#[test]
fn end_turn_is_rejected_while_a_doodad_is_outstanding() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::Doodad(DoodadCard {
        title: "Boat Repairs".into(),
        cost: DoodadCost::Flat { amount: 1_100 },
    });
    let player = state.current().id;

    let state = process_action(state, &GameAction::EndTurn { player_id: player });
    assert!(rejected(&state));
    assert_eq!(state.phase, TurnPhase::MakeDecision);
}

#[test]
fn paying_a_doodad_can_force_a_loan() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::Doodad(DoodadCard {
        title: "Car Needs New Engine".into(),
        cost: DoodadCost::Flat { amount: 1_800 },
    });
    state.players[0].cash = 300;
    let player = state.current().id;

    let state = process_action(state, &GameAction::PayExpense { player_id: player });
    assert!(!rejected(&state));
    // 300 - 1800 = -1500, covered by a forced $2,000 loan.
    assert_eq!(state.current().cash, 500);
    assert_eq!(state.current().bank_loan, 2_000);
    assert_eq!(state.phase, TurnPhase::EndOfTurn);
}

#[test]
fn loans_move_in_thousand_dollar_steps() {
    let mut state = game(2);
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::TakeLoan {
            player_id: player,
            amount: 1_500,
        },
    );
    assert!(rejected(&state));

    let cash_before = state.current().cash;
    let state = process_action(
        state,
        &GameAction::TakeLoan {
            player_id: player,
            amount: 2_000,
        },
    );
    assert!(!rejected(&state));
    assert_eq!(state.current().cash, cash_before + 2_000);
    assert_eq!(state.current().bank_loan, 2_000);

    let state = process_action(
        state,
        &GameAction::PayOffLoan {
            player_id: player,
            loan_type: LoanType::Bank,
            amount: 2_000,
        },
    );
    assert!(!rejected(&state));
    assert_eq!(state.current().bank_loan, 0);
}

#[test]
fn the_bank_refuses_loans_beyond_affordability() {
    let mut state = game(2);
    state.players[0].financials.salary = state.players[0].financials.fixed_expenses() + 100;
    let player = state.current().id;

    // Cash flow of $100 supports at most $11,000 of new debt.
    let state = process_action(
        state,
        &GameAction::TakeLoan {
            player_id: player,
            amount: 12_000,
        },
    );
    assert!(rejected(&state));
}

#[test]
fn charity_grants_three_double_dice_rolls() {
    let mut state = game(2);
    state.players[0].position = 9;
    state.phase = TurnPhase::ResolveSpace;
    state.players[0].cash = 10_000;
    let player = state.current().id;
    let donation = state.current().total_income() / 10;
    let cash_before = state.current().cash;

    let mut state = process_action(state, &GameAction::AcceptCharity { player_id: player });
    assert_eq!(state.current().cash, cash_before - donation);
    assert_eq!(state.current().charity_rolls, 3);
    assert_eq!(state.phase, TurnPhase::EndOfTurn);

    // Next roll may use both dice.
    state.phase = TurnPhase::RollDice;
    state.players[0].position = 4;
    let state = process_action(
        state,
        &GameAction::RollDice {
            player_id: player,
            dice_values: [2, 3],
            use_both_dice: true,
        },
    );
    assert_eq!(state.current().position, 9);
    assert_eq!(state.current().charity_rolls, 2);
}

#[test]
fn downsized_pays_expenses_and_skips_two_turns() {
    let mut state = game(2);
    state.players[0].position = 18;
    state.players[0].cash = 50_000;
    let player = state.current().id;
    let expenses = state.current().total_expenses();
    let cash_before = state.current().cash;

    // 18 + 1 = 19, the Downsized space.
    let state = process_action(
        state,
        &GameAction::RollDice {
            player_id: player,
            dice_values: [1, 1],
            use_both_dice: false,
        },
    );
    assert_eq!(state.current().position, 19);
    assert_eq!(state.current().cash, cash_before - expenses);
    assert_eq!(state.current().skip_turns, 2);
    assert_eq!(state.phase, TurnPhase::EndOfTurn);

    // Ending the turn hands play to player 1; player 0 then sits out the
    // next two rounds automatically.
    let state = process_action(state, &GameAction::EndTurn { player_id: player });
    assert_eq!(state.current_player, 1);
    let other = state.current().id;
    let state = process_action(state, &GameAction::EndTurn { player_id: other });
    assert!(rejected(&state));

    // Walk player 1 through a full no-op turn (lands on PayDay at 4).
    let mut state = state;
    state.players[1].position = 3;
    let state = process_action(
        state,
        &GameAction::RollDice {
            player_id: other,
            dice_values: [1, 1],
            use_both_dice: false,
        },
    );
    let mut state = process_action(state, &GameAction::CollectPayDay { player_id: other });
    assert_eq!(state.phase, TurnPhase::EndOfTurn);
    let state = process_action(state, &GameAction::EndTurn { player_id: other });
    // Player 0 was skipped and one skip turn consumed.
    assert_eq!(state.current_player, 1);
    assert_eq!(state.players[0].skip_turns, 1);
}

#[test]
fn fast_track_cash_flow_days_collect_one_at_a_time() {
    let mut state = game(2);
    state.players[0].on_fast_track = true;
    state.players[0].escaped = true;
    state.players[0].fast_track_position = 5;
    state.players[0].fast_track_cash_flow = 10_000;
    let player = state.current().id;
    let cash_before = state.current().cash;

    // 5 + 1 = 6, a CashFlowDay space.
    let state = process_action(
        state,
        &GameAction::RollDice {
            player_id: player,
            dice_values: [1, 1],
            use_both_dice: false,
        },
    );
    assert_eq!(state.players[0].fast_track_position, 6);
    assert_eq!(state.phase, TurnPhase::PayDayCollection);
    assert_eq!(state.pay_days_remaining, 1);
    // Nothing is credited until the collection action.
    assert_eq!(state.current().cash, cash_before);

    let state = process_action(state, &GameAction::CollectPayDay { player_id: player });
    assert_eq!(state.current().cash, cash_before + 10_000);
    assert_eq!(state.pay_days_remaining, 0);
    assert_eq!(state.phase, TurnPhase::EndOfTurn);
}

#[test]
fn choosing_a_deal_from_an_exhausted_deck_logs_and_moves_on() {
    let mut state = game(2);
    state.phase = TurnPhase::ResolveSpace;
    state.players[0].position = 0;
    let mut rng = StdRng::seed_from_u64(1);
    state.decks.small_deals = Deck::new(&[], &mut rng);
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::ChooseDealType {
            player_id: player,
            deal_type: DealType::Small,
        },
    );
    assert!(!rejected(&state));
    assert_eq!(
        state.log.last().map(String::as_str),
        Some("The small deal deck is exhausted; nothing happens")
    );
    assert_eq!(state.phase, TurnPhase::EndOfTurn);
    assert!(state.active_card.deal().is_none());
}

#[test]
fn repaying_into_solvency_resumes_interrupted_collections() {
    let mut state = game(2);
    state.phase = TurnPhase::PayDayCollection;
    state.pay_days_remaining = 2;
    state.players[0].position = 4;
    state.players[0].cash = 20_000;
    // Run the player $50 short each month.
    state.players[0].financials.salary = state.players[0].financials.fixed_expenses() - 50;
    let player = state.current().id;

    let state = process_action(state, &GameAction::CollectPayDay { player_id: player });
    assert_eq!(state.phase, TurnPhase::BankruptcyDecision);
    assert_eq!(state.pay_days_remaining, 1);

    // Clearing the credit card frees more than the $50 shortfall.
    let balance = state
        .current()
        .financials
        .liability(CREDIT_CARD)
        .expect("starting credit card debt")
        .balance;
    let state = process_action(
        state,
        &GameAction::PayOffLoan {
            player_id: player,
            loan_type: LoanType::CreditCard,
            amount: balance,
        },
    );
    assert!(!rejected(&state));
    assert_eq!(state.phase, TurnPhase::PayDayCollection);
    assert_eq!(state.pay_days_remaining, 1);

    // The last collection still resolves the landed space.
    let state = process_action(state, &GameAction::CollectPayDay { player_id: player });
    assert_eq!(state.pay_days_remaining, 0);
    assert_eq!(state.phase, TurnPhase::EndOfTurn);
}

#[test]
fn player_deal_offer_accept_transfers_money_and_asset() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::SmallDeal(condo_card());
    state.players[0].cash = 0;
    state.players[1].cash = 10_000;
    let seller = state.players[0].id;
    let buyer = state.players[1].id;

    let state = process_action(
        state,
        &GameAction::OfferDealToPlayer {
            player_id: seller,
            target_player_id: buyer,
            asking_price: 2_000,
        },
    );
    assert_eq!(state.phase, TurnPhase::WaitingForDealResponse);
    assert!(state.pending_deal.is_some());

    let state = process_action(state, &GameAction::AcceptPlayerDeal { player_id: buyer });
    assert!(!rejected(&state));
    // Buyer paid the asking price plus the condo down payment.
    assert_eq!(state.players[1].cash, 10_000 - 2_000 - 4_000);
    assert_eq!(state.players[0].cash, 2_000);
    assert_eq!(state.players[1].financials.assets.len(), 1);
    assert!(state.players[0].financials.assets.is_empty());
    assert_eq!(state.phase, TurnPhase::EndOfTurn);
}

#[test]
fn stock_accepted_from_another_player_merges_into_the_holding() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::SmallDeal(stock_card("OK4U", 40));
    state.players[1].cash = 10_000;
    state.players[1].financials.assets.push(Asset::Stock {
        id: 4,
        symbol: "OK4U".into(),
        shares: 50,
        cost_per_share: 20,
        dividend_per_share: 0,
    });
    let seller = state.players[0].id;
    let buyer = state.players[1].id;

    let state = process_action(
        state,
        &GameAction::OfferDealToPlayer {
            player_id: seller,
            target_player_id: buyer,
            asking_price: 1_000,
        },
    );
    let state = process_action(state, &GameAction::AcceptPlayerDeal { player_id: buyer });
    assert!(!rejected(&state));
    // One holding, not a duplicate symbol entry.
    assert_eq!(state.players[1].financials.assets.len(), 1);
    match &state.players[1].financials.assets[0] {
        Asset::Stock {
            id,
            shares,
            cost_per_share,
            ..
        } => {
            assert_eq!(*id, 4);
            // 50 held plus the card's minimum lot of 10.
            assert_eq!(*shares, 60);
            // (50*20 + 10*40) / 60
            assert_eq!(*cost_per_share, 23);
        }
        other => panic!("expected a stock, got {other:?}"),
    }
    // Asking price plus the minimum lot as the down payment.
    assert_eq!(state.players[1].cash, 10_000 - 1_000 - 400);
}

#[test]
fn declined_player_deal_returns_the_card_to_the_seller() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::SmallDeal(condo_card());
    let seller = state.players[0].id;
    let buyer = state.players[1].id;

    let state = process_action(
        state,
        &GameAction::OfferDealToPlayer {
            player_id: seller,
            target_player_id: buyer,
            asking_price: 2_000,
        },
    );
    let state = process_action(state, &GameAction::DeclinePlayerDeal { player_id: buyer });
    assert!(!rejected(&state));
    assert_eq!(state.phase, TurnPhase::MakeDecision);
    assert!(state.pending_deal.is_none());
    assert!(state.active_card.deal().is_some());
}

#[test]
fn escape_happens_at_end_of_turn_once_passive_income_covers_expenses() {
    let mut state = game(2);
    state.phase = TurnPhase::EndOfTurn;
    let income = state.players[0].total_expenses() + 100;
    state.players[0].financials.assets.push(Asset::Business {
        id: 1,
        name: "Mini Storage".into(),
        cost: 350_000,
        mortgage: 300_000,
        down_payment: 50_000,
        cash_flow: income,
    });
    let player = state.current().id;

    let state = process_action(state, &GameAction::EndTurn { player_id: player });
    let escaped = &state.players[0];
    assert!(escaped.escaped);
    assert!(escaped.on_fast_track);
    assert_eq!(escaped.fast_track_position, 0);
    assert_eq!(escaped.fast_track_cash_flow, escaped.passive_income() * 100);
}

#[test]
fn landing_on_the_chosen_dream_wins_the_game() {
    let mut state = game(2);
    let player = state.current().id;
    state.players[0].on_fast_track = true;
    state.players[0].escaped = true;
    state.players[0].fast_track_position = 0;
    state.players[0].fast_track_cash_flow = 10_000;
    state.players[0].dream = Some("Golf Course".into());

    // Position 5 is the Golf Course.
    let state = process_action(
        state,
        &GameAction::RollDice {
            player_id: player,
            dice_values: [5, 1],
            use_both_dice: false,
        },
    );
    assert_eq!(state.winner, Some(player));
    assert!(state.players[0].has_won);
    assert_eq!(state.phase, TurnPhase::GameOver);

    // Nothing is accepted after game over.
    let state = process_action(state, &GameAction::EndTurn { player_id: player });
    assert!(rejected(&state));
}

#[test]
fn bankruptcy_decision_flow_eliminates_or_suspends() {
    let mut state = game(2);
    state.phase = TurnPhase::MakeDecision;
    state.active_card = ActiveCard::Doodad(DoodadCard {
        title: "Ruinous repair".into(),
        cost: DoodadCost::Flat { amount: 500_000 },
    });
    state.players[0].cash = 0;
    let player = state.current().id;

    let state = process_action(state, &GameAction::PayExpense { player_id: player });
    // The forced half-million loan sinks the cash flow.
    assert_eq!(state.phase, TurnPhase::BankruptcyDecision);
    assert!(valid_actions(&state).contains(&ActionKind::DeclareBankruptcy));

    let state = process_action(state, &GameAction::DeclareBankruptcy { player_id: player });
    assert!(!rejected(&state));
    assert!(state.players[0].is_bankrupt);
    // Play moved on to the other player.
    assert_eq!(state.current_player, 1);
    assert_eq!(state.phase, TurnPhase::RollDice);
}

#[test]
fn choosing_a_dream_is_once_and_must_name_a_dream_space() {
    let mut state = game(2);
    let player = state.current().id;

    let state = process_action(
        state,
        &GameAction::ChooseDream {
            player_id: player,
            dream: "Moon Base".into(),
        },
    );
    assert!(rejected(&state));

    let state = process_action(
        state,
        &GameAction::ChooseDream {
            player_id: player,
            dream: "World Cruise".into(),
        },
    );
    assert!(!rejected(&state));
    assert_eq!(state.current().dream.as_deref(), Some("World Cruise"));

    let state = process_action(
        state,
        &GameAction::ChooseDream {
            player_id: player,
            dream: "Golf Course".into(),
        },
    );
    assert!(rejected(&state));
}
