//! Board topology: two independent circular tracks and the pure movement
//! math over them. Nothing in here touches player state.

use serde::{Deserialize, Serialize};

use crate::enums::{CASH_FLOW_DAY_SPACES, FAST_TRACK_SIZE, PAY_DAY_SPACES, RAT_RACE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceType {
    Deal,
    Market,
    Doodad,
    Charity,
    Baby,
    Downsized,
    PayDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FastTrackSpace {
    CashFlowDay,
    Dream(&'static str),
    BusinessDeal,
    Tax,
    Lawsuit,
    Divorce,
}

const RAT_RACE_LAYOUT: [SpaceType; RAT_RACE_SIZE] = [
    SpaceType::Deal,      // 0
    SpaceType::Doodad,    // 1
    SpaceType::Deal,      // 2
    SpaceType::Deal,      // 3
    SpaceType::PayDay,    // 4
    SpaceType::Market,    // 5
    SpaceType::Deal,      // 6
    SpaceType::Doodad,    // 7
    SpaceType::Deal,      // 8
    SpaceType::Charity,   // 9
    SpaceType::PayDay,    // 10
    SpaceType::Deal,      // 11
    SpaceType::Doodad,    // 12
    SpaceType::Deal,      // 13
    SpaceType::Market,    // 14
    SpaceType::Deal,      // 15
    SpaceType::PayDay,    // 16
    SpaceType::Doodad,    // 17
    SpaceType::Deal,      // 18
    SpaceType::Downsized, // 19
    SpaceType::Deal,      // 20
    SpaceType::Market,    // 21
    SpaceType::PayDay,    // 22
    SpaceType::Baby,      // 23
];

const FAST_TRACK_LAYOUT: [FastTrackSpace; FAST_TRACK_SIZE] = [
    FastTrackSpace::CashFlowDay,                 // 0
    FastTrackSpace::BusinessDeal,                // 1
    FastTrackSpace::Dream("Ski Resort"),         // 2
    FastTrackSpace::Tax,                         // 3
    FastTrackSpace::BusinessDeal,                // 4
    FastTrackSpace::Dream("Golf Course"),        // 5
    FastTrackSpace::CashFlowDay,                 // 6
    FastTrackSpace::Lawsuit,                     // 7
    FastTrackSpace::Dream("World Cruise"),       // 8
    FastTrackSpace::BusinessDeal,                // 9
    FastTrackSpace::Divorce,                     // 10
    FastTrackSpace::Dream("Private Island"),     // 11
    FastTrackSpace::CashFlowDay,                 // 12
    FastTrackSpace::BusinessDeal,                // 13
    FastTrackSpace::Dream("Research Center"),    // 14
    FastTrackSpace::Tax,                         // 15
    FastTrackSpace::BusinessDeal,                // 16
    FastTrackSpace::Dream("Charity Foundation"), // 17
];

/// Moves `roll` spaces forward on a circular track of `track_size` spaces.
pub fn advance(position: usize, roll: usize, track_size: usize) -> usize {
    (position + roll) % track_size
}

/// Counts how many marker positions are crossed while moving `roll` spaces
/// from `start`, inclusive of the landing space. A roll of exactly
/// `track_size` (a full lap back to the start) counts every marker once.
pub fn crossings(start: usize, roll: usize, markers: &[usize], track_size: usize) -> u8 {
    let mut count = 0;
    for step in 1..=roll {
        let pos = (start + step) % track_size;
        if markers.contains(&pos) {
            count += 1;
        }
    }
    count
}

pub fn rat_race_space(position: usize) -> SpaceType {
    RAT_RACE_LAYOUT[position % RAT_RACE_SIZE]
}

pub fn fast_track_space(position: usize) -> FastTrackSpace {
    FAST_TRACK_LAYOUT[position % FAST_TRACK_SIZE]
}

pub fn pay_days_crossed(start: usize, roll: usize) -> u8 {
    crossings(start, roll, &PAY_DAY_SPACES, RAT_RACE_SIZE)
}

pub fn cash_flow_days_crossed(start: usize, roll: usize) -> u8 {
    crossings(start, roll, &CASH_FLOW_DAY_SPACES, FAST_TRACK_SIZE)
}

/// Names of every Dream space on the fast track, in board order.
pub fn dream_names() -> Vec<&'static str> {
    FAST_TRACK_LAYOUT
        .iter()
        .filter_map(|space| match space {
            FastTrackSpace::Dream(name) => Some(*name),
            _ => None,
        })
        .collect()
}
