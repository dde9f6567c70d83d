//! Bit-packed storage words.
//!
//! Schedule word (MSB to LSB, 165 of 256 bits used):
//! `registration_start(35) | registration_end(35) | game_start(35) |
//! game_end(35) | submission_duration(25)`. A zero `registration_start` means
//! the tournament has no registration period.
//!
//! Meta word (127 of 128 bits used):
//! `created_at(35) | creator_token_id(59) | settings_id(32) | soulbound(1)`.
//!
//! Encoding rejects values wider than their field; it never truncates.

use soroban_sdk::contracttype;

use crate::errors::Error;
use crate::types::{Period, Schedule};

pub const TIMESTAMP_BITS: u32 = 35;
pub const DURATION_BITS: u32 = 25;
pub const TOKEN_ID_BITS: u32 = 59;
pub const SETTINGS_ID_BITS: u32 = 32;

const SUBMISSION_OFFSET: u32 = 0;
const GAME_END_OFFSET: u32 = SUBMISSION_OFFSET + DURATION_BITS;
const GAME_START_OFFSET: u32 = GAME_END_OFFSET + TIMESTAMP_BITS;
const REGISTRATION_END_OFFSET: u32 = GAME_START_OFFSET + TIMESTAMP_BITS;
const REGISTRATION_START_OFFSET: u32 = REGISTRATION_END_OFFSET + TIMESTAMP_BITS;

const SOULBOUND_OFFSET: u32 = 0;
const SETTINGS_ID_OFFSET: u32 = 1;
const TOKEN_ID_OFFSET: u32 = SETTINGS_ID_OFFSET + SETTINGS_ID_BITS;
const CREATED_AT_OFFSET: u32 = TOKEN_ID_OFFSET + TOKEN_ID_BITS;

/// A 256-bit word held as two 128-bit limbs.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PackedSchedule {
    pub high: u128,
    pub low: u128,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TournamentMeta {
    pub created_at: u64,
    pub creator_token_id: u64,
    pub settings_id: u32,
    pub soulbound: bool,
}

fn mask(bits: u32) -> u128 {
    (1u128 << bits) - 1
}

fn checked_field(value: u64, bits: u32) -> Result<u128, Error> {
    let value = value as u128;
    if value > mask(bits) {
        return Err(Error::ValueOutOfRange);
    }
    Ok(value)
}

fn put(word: &mut PackedSchedule, offset: u32, bits: u32, value: u128) {
    if offset >= 128 {
        word.high |= value << (offset - 128);
        return;
    }
    word.low |= value << offset;
    if offset > 0 && offset + bits > 128 {
        word.high |= value >> (128 - offset);
    }
}

fn get(word: &PackedSchedule, offset: u32, bits: u32) -> u64 {
    let value = if offset >= 128 {
        word.high >> (offset - 128)
    } else if offset > 0 && offset + bits > 128 {
        (word.low >> offset) | (word.high << (128 - offset))
    } else {
        word.low >> offset
    };
    (value & mask(bits)) as u64
}

pub fn pack_schedule(schedule: &Schedule) -> Result<PackedSchedule, Error> {
    let (registration_start, registration_end) = match schedule.registration {
        Some(period) => {
            // zero is reserved for "no registration period"
            if period.start == 0 {
                return Err(Error::ValueOutOfRange);
            }
            (period.start, period.end)
        }
        None => (0, 0),
    };

    let mut word = PackedSchedule::default();
    put(
        &mut word,
        SUBMISSION_OFFSET,
        DURATION_BITS,
        checked_field(schedule.submission_duration, DURATION_BITS)?,
    );
    put(
        &mut word,
        GAME_END_OFFSET,
        TIMESTAMP_BITS,
        checked_field(schedule.game.end, TIMESTAMP_BITS)?,
    );
    put(
        &mut word,
        GAME_START_OFFSET,
        TIMESTAMP_BITS,
        checked_field(schedule.game.start, TIMESTAMP_BITS)?,
    );
    put(
        &mut word,
        REGISTRATION_END_OFFSET,
        TIMESTAMP_BITS,
        checked_field(registration_end, TIMESTAMP_BITS)?,
    );
    put(
        &mut word,
        REGISTRATION_START_OFFSET,
        TIMESTAMP_BITS,
        checked_field(registration_start, TIMESTAMP_BITS)?,
    );
    Ok(word)
}

pub fn unpack_schedule(word: &PackedSchedule) -> Schedule {
    let registration_start = get(word, REGISTRATION_START_OFFSET, TIMESTAMP_BITS);
    let registration = if registration_start == 0 {
        None
    } else {
        Some(Period {
            start: registration_start,
            end: get(word, REGISTRATION_END_OFFSET, TIMESTAMP_BITS),
        })
    };

    Schedule {
        registration,
        game: Period {
            start: get(word, GAME_START_OFFSET, TIMESTAMP_BITS),
            end: get(word, GAME_END_OFFSET, TIMESTAMP_BITS),
        },
        submission_duration: get(word, SUBMISSION_OFFSET, DURATION_BITS),
    }
}

pub fn pack_meta(meta: &TournamentMeta) -> Result<u128, Error> {
    let created_at = checked_field(meta.created_at, TIMESTAMP_BITS)?;
    let token_id = checked_field(meta.creator_token_id, TOKEN_ID_BITS)?;

    Ok((created_at << CREATED_AT_OFFSET)
        | (token_id << TOKEN_ID_OFFSET)
        | ((meta.settings_id as u128) << SETTINGS_ID_OFFSET)
        | ((meta.soulbound as u128) << SOULBOUND_OFFSET))
}

pub fn unpack_meta(word: u128) -> TournamentMeta {
    TournamentMeta {
        created_at: ((word >> CREATED_AT_OFFSET) & mask(TIMESTAMP_BITS)) as u64,
        creator_token_id: ((word >> TOKEN_ID_OFFSET) & mask(TOKEN_ID_BITS)) as u64,
        settings_id: ((word >> SETTINGS_ID_OFFSET) & mask(SETTINGS_ID_BITS)) as u32,
        soulbound: (word >> SOULBOUND_OFFSET) & 1 == 1,
    }
}
