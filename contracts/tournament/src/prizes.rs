//! Sponsor prizes held in custody until the tournament is finalized.

use soroban_sdk::{Address, Env};

use crate::distribution::{self, BASIS_POINTS};
use crate::errors::Error;
use crate::interfaces;
use crate::ledger;
use crate::storage;
use crate::types::{Config, Prize, TokenType, Tournament};

fn validate(tournament: &Tournament, token_type: &TokenType, position: Option<u32>) -> Result<(), Error> {
    let single_position = match token_type {
        TokenType::Fungible(prize) => {
            if prize.amount <= 0 {
                return Err(Error::InvalidPrize);
            }
            match &prize.distribution {
                Some(distribution) => {
                    if position.is_some() {
                        return Err(Error::InvalidPrize);
                    }
                    distribution::validate(distribution)?;
                    if let Some(count) = prize.distribution_count {
                        distribution::validate_positions(count)?;
                    }
                    return Ok(());
                }
                None => {
                    if prize.distribution_count.is_some() {
                        return Err(Error::InvalidPrize);
                    }
                    position
                }
            }
        }
        TokenType::NonFungible(_) => position,
    };

    match single_position {
        Some(p) if p >= 1 && p <= tournament.game_config.leaderboard_size => Ok(()),
        _ => Err(Error::InvalidPosition),
    }
}

/// Moves the sponsor's asset into custody and records the prize.
pub fn add_prize(
    env: &Env,
    tournament: &Tournament,
    sponsor: &Address,
    token_address: &Address,
    token_type: &TokenType,
    position: Option<u32>,
) -> Result<Prize, Error> {
    validate(tournament, token_type, position)?;

    let custody = env.current_contract_address();
    match token_type {
        TokenType::Fungible(prize) => {
            interfaces::transfer_fungible(env, token_address, sponsor, &custody, prize.amount)?
        }
        TokenType::NonFungible(prize) => {
            interfaces::transfer_non_fungible(env, token_address, sponsor, &custody, prize.id)?
        }
    }

    let prize = Prize {
        id: storage::next_prize_id(env),
        tournament_id: tournament.id,
        sponsor_address: sponsor.clone(),
        token_address: token_address.clone(),
        token_type: token_type.clone(),
    };
    storage::set_prize(env, &prize);
    if let Some(position) = position {
        storage::set_prize_position(env, prize.id, position);
    }
    Ok(prize)
}

fn prize_of(env: &Env, tournament: &Tournament, prize_id: u64) -> Result<Prize, Error> {
    let prize = storage::get_prize(env, prize_id)?;
    if prize.tournament_id != tournament.id {
        return Err(Error::PrizeNotFound);
    }
    Ok(prize)
}

fn pay(env: &Env, prize: &Prize, recipient: &Address, amount: i128) -> Result<(), Error> {
    match &prize.token_type {
        TokenType::Fungible(_) => ledger::payout(env, &prize.token_address, recipient, amount),
        TokenType::NonFungible(nft) => interfaces::transfer_non_fungible(
            env,
            &prize.token_address,
            &env.current_contract_address(),
            recipient,
            nft.id,
        ),
    }
}

/// Pays a single prize to its position's occupant, or back to the sponsor
/// when nobody holds that position. Returns the recipient and amount paid.
pub fn claim_single(
    env: &Env,
    config: &Config,
    tournament: &Tournament,
    prize_id: u64,
) -> Result<(Address, i128), Error> {
    let prize = prize_of(env, tournament, prize_id)?;
    let amount = match &prize.token_type {
        TokenType::Fungible(fungible) => {
            if fungible.distribution.is_some() {
                return Err(Error::PrizeIsDistributed);
            }
            fungible.amount
        }
        TokenType::NonFungible(_) => 1,
    };

    let position = storage::prize_position(env, prize_id).ok_or(Error::InvalidPrize)?;
    let recipient = ledger::position_occupant(env, config, tournament, position)?
        .unwrap_or_else(|| prize.sponsor_address.clone());

    pay(env, &prize, &recipient, amount)?;
    Ok((recipient, amount))
}

/// Pays payout `index` (1-indexed) of a distributed prize.
pub fn claim_distributed(
    env: &Env,
    config: &Config,
    tournament: &Tournament,
    prize_id: u64,
    index: u32,
) -> Result<(Address, i128), Error> {
    let prize = prize_of(env, tournament, prize_id)?;
    let fungible = match &prize.token_type {
        TokenType::Fungible(fungible) => fungible,
        TokenType::NonFungible(_) => return Err(Error::PrizeNotDistributed),
    };
    let model = fungible
        .distribution
        .as_ref()
        .ok_or(Error::PrizeNotDistributed)?;

    let total = match fungible.distribution_count {
        Some(count) => count,
        None => ledger::default_positions(env, config, tournament.id)?,
    };
    if index == 0 || index > total {
        return Err(Error::InvalidPayoutIndex);
    }

    let bp = distribution::share(model, index, total, BASIS_POINTS)?;
    let amount = distribution::apply_bp(fungible.amount, bp)?;
    let recipient = ledger::position_occupant(env, config, tournament, index)?
        .unwrap_or_else(|| prize.sponsor_address.clone());

    pay(env, &prize, &recipient, amount)?;
    Ok((recipient, amount))
}
