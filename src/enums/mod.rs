pub mod phase;

pub use phase::TurnPhase;

use crate::Money;

/// Number of spaces on the rat-race (starting) track.
pub const RAT_RACE_SIZE: usize = 24;

/// Number of spaces on the post-escape fast track.
pub const FAST_TRACK_SIZE: usize = 18;

/// PayDay positions on the rat-race track, evenly spaced every 6 spaces.
pub const PAY_DAY_SPACES: [usize; 4] = [4, 10, 16, 22];

/// CashFlowDay positions on the fast track.
pub const CASH_FLOW_DAY_SPACES: [usize; 3] = [0, 6, 12];

/// Loans move in fixed increments; every loan amount and payoff must be a
/// positive multiple of this.
pub const LOAN_STEP: Money = 1_000;

/// Maximum number of children a player can have.
pub const MAX_CHILDREN: u8 = 3;

/// Turns skipped after landing on Downsized.
pub const DOWNSIZED_SKIP_TURNS: u8 = 2;

/// Turns skipped after surviving bankruptcy.
pub const BANKRUPTCY_SKIP_TURNS: u8 = 2;

/// Rolls for which a charity donation lets the player use both dice.
pub const CHARITY_ROLLS: u8 = 3;

/// Fast-track cash flow granted by a BusinessDeal space.
pub const FAST_TRACK_VENTURE_CASH_FLOW: Money = 2_500;

/// Escaping the rat race converts passive income into fast-track cash flow
/// at this multiplier.
pub const FAST_TRACK_INCOME_MULTIPLIER: Money = 100;
