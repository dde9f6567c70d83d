//! Entry counter, entry-fee custody and the claim ledger.
//!
//! Every payout path runs: assert unclaimed, compute, pay, mark claimed. A
//! claim key flips from unclaimed to claimed exactly once.

use soroban_sdk::{Address, Env};

use crate::distribution::{self, BASIS_POINTS};
use crate::errors::Error;
use crate::interfaces;
use crate::storage;
use crate::types::{
    ClaimKey, Config, EntryFee, EntryFeeRewardType, QualificationKey, Registration, Tournament,
};

// ───────────── ENTRIES ─────────────

/// Allocates the next entry number and records the registration.
pub fn register_entry(env: &Env, tournament: &Tournament, game_token_id: u64) -> Result<Registration, Error> {
    let entry_number = storage::entry_count(env, tournament.id)
        .checked_add(1)
        .ok_or(Error::ArithmeticOverflow)?;
    storage::set_entry_count(env, tournament.id, entry_number);

    let registration = Registration {
        game_token_id,
        game_address: tournament.game_config.game_address.clone(),
        tournament_id: tournament.id,
        entry_number,
        has_submitted: false,
        is_banned: false,
    };
    storage::set_registration(env, &registration);
    Ok(registration)
}

/// Registration of `token_id` in this tournament specifically.
pub fn registration_for(env: &Env, tournament: &Tournament, token_id: u64) -> Result<Registration, Error> {
    match storage::get_registration(env, &tournament.game_config.game_address, token_id) {
        Some(registration) if registration.tournament_id == tournament.id => Ok(registration),
        _ => Err(Error::RegistrationNotFound),
    }
}

/// Counts one use of a qualification, rejecting it once `entry_limit` is hit.
pub fn consume_qualification(
    env: &Env,
    tournament_id: u64,
    key: &QualificationKey,
    entry_limit: u32,
) -> Result<(), Error> {
    let used = storage::qualification_entries(env, tournament_id, key);
    if entry_limit != 0 && used >= entry_limit {
        return Err(Error::EntryLimitReached);
    }
    storage::set_qualification_entries(env, tournament_id, key, used + 1);
    Ok(())
}

// ───────────── FEES ─────────────

fn fixed_shares(entry_fee: &EntryFee) -> u32 {
    entry_fee.tournament_creator_share.unwrap_or(0)
        + entry_fee.game_creator_share.unwrap_or(0)
        + entry_fee.refund_share.unwrap_or(0)
}

pub fn validate_entry_fee(entry_fee: &EntryFee) -> Result<(), Error> {
    if entry_fee.amount <= 0 {
        return Err(Error::InvalidEntryFee);
    }
    for share in [
        entry_fee.tournament_creator_share,
        entry_fee.game_creator_share,
        entry_fee.refund_share,
    ] {
        if share.unwrap_or(0) > BASIS_POINTS {
            return Err(Error::SharesExceedTotal);
        }
    }
    if fixed_shares(entry_fee) > BASIS_POINTS {
        return Err(Error::SharesExceedTotal);
    }
    distribution::validate(&entry_fee.distribution)?;
    if let Some(positions) = entry_fee.distribution_positions {
        distribution::validate_positions(positions)?;
    }
    Ok(())
}

pub fn deposit_entry_fee(env: &Env, entry_fee: &EntryFee, payer: &Address) -> Result<(), Error> {
    interfaces::transfer_fungible(
        env,
        &entry_fee.token_address,
        payer,
        &env.current_contract_address(),
        entry_fee.amount,
    )
}

/// Pays `amount` out of custody. Zero amounts move nothing.
pub fn payout(env: &Env, token_address: &Address, recipient: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    interfaces::transfer_fungible(
        env,
        token_address,
        &env.current_contract_address(),
        recipient,
        amount,
    )
}

pub fn pool(env: &Env, tournament_id: u64, entry_fee: &EntryFee) -> Result<i128, Error> {
    entry_fee
        .amount
        .checked_mul(storage::entry_count(env, tournament_id) as i128)
        .ok_or(Error::ArithmeticOverflow)
}

// ───────────── CLAIMS ─────────────

pub fn is_claimed(env: &Env, key: &ClaimKey) -> bool {
    storage::is_claimed(env, key)
}

pub fn assert_unclaimed(env: &Env, key: &ClaimKey) -> Result<(), Error> {
    if storage::is_claimed(env, key) {
        return Err(Error::AlreadyClaimed);
    }
    Ok(())
}

pub fn mark_claimed(env: &Env, key: &ClaimKey) {
    storage::set_claimed(env, key);
}

/// Leaderboard occupant at a 1-indexed rank, if the board reaches that far.
pub fn position_occupant(env: &Env, config: &Config, tournament: &Tournament, position: u32) -> Result<Option<Address>, Error> {
    let entries = interfaces::leaderboard_entries(env, &config.leaderboard, tournament.id)?;
    if position == 0 || position > entries.len() {
        return Ok(None);
    }
    match entries.get(position - 1) {
        Some(token_id) => Ok(Some(interfaces::game_token_owner(
            env,
            &tournament.game_config.game_address,
            token_id,
        )?)),
        None => Ok(None),
    }
}

pub fn creator_token_owner(env: &Env, tournament: &Tournament) -> Result<Address, Error> {
    interfaces::game_token_owner(
        env,
        &tournament.game_config.game_address,
        tournament.creator_token_id,
    )
}

/// Number of paid positions when none is configured: the leaderboard length,
/// and at least one so a single position always exists.
pub fn default_positions(env: &Env, config: &Config, tournament_id: u64) -> Result<u32, Error> {
    let entries = interfaces::leaderboard_entries(env, &config.leaderboard, tournament_id)?;
    Ok(entries.len().max(1))
}

/// Recipient and amount of an entry-fee reward. Only reads storage.
pub fn resolve_entry_fee_claim(
    env: &Env,
    config: &Config,
    tournament: &Tournament,
    reward: &EntryFeeRewardType,
) -> Result<(Address, i128), Error> {
    let entry_fee = tournament.entry_fee.as_ref().ok_or(Error::NoEntryFee)?;
    let pool = pool(env, tournament.id, entry_fee)?;

    match reward {
        EntryFeeRewardType::Position(position) => {
            let total = match entry_fee.distribution_positions {
                Some(positions) => positions,
                None => default_positions(env, config, tournament.id)?,
            };
            if *position == 0 || *position > total {
                return Err(Error::InvalidPosition);
            }
            let available = BASIS_POINTS - fixed_shares(entry_fee);
            let bp = distribution::share(&entry_fee.distribution, *position, total, available)?;
            let amount = distribution::apply_bp(pool, bp)?;
            let recipient = match position_occupant(env, config, tournament, *position)? {
                Some(owner) => owner,
                None => creator_token_owner(env, tournament)?,
            };
            Ok((recipient, amount))
        }
        EntryFeeRewardType::TournamentCreator => {
            let share = entry_fee
                .tournament_creator_share
                .ok_or(Error::NoShareConfigured)?;
            Ok((
                creator_token_owner(env, tournament)?,
                distribution::apply_bp(pool, share)?,
            ))
        }
        EntryFeeRewardType::GameCreator => {
            let share = entry_fee
                .game_creator_share
                .ok_or(Error::NoShareConfigured)?;
            let recipient = interfaces::game_creator(
                env,
                &config.game_registry,
                &tournament.game_config.game_address,
            )?;
            Ok((recipient, distribution::apply_bp(pool, share)?))
        }
        EntryFeeRewardType::Refund(token_id) => {
            let share = entry_fee.refund_share.ok_or(Error::NoShareConfigured)?;
            registration_for(env, tournament, *token_id)?;
            let entries = storage::entry_count(env, tournament.id) as i128;
            let amount = distribution::apply_bp(pool, share)? / entries;
            let recipient =
                interfaces::game_token_owner(env, &tournament.game_config.game_address, *token_id)?;
            Ok((recipient, amount))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Distribution;
    use soroban_sdk::{testutils::Address as _, Env};

    fn fee(env: &Env, amount: i128, shares: (Option<u32>, Option<u32>, Option<u32>)) -> EntryFee {
        EntryFee {
            token_address: Address::generate(env),
            amount,
            distribution: Distribution::Uniform,
            tournament_creator_share: shares.0,
            game_creator_share: shares.1,
            refund_share: shares.2,
            distribution_positions: None,
        }
    }

    #[test]
    fn test_validate_entry_fee() {
        let env = Env::default();
        assert_eq!(validate_entry_fee(&fee(&env, 100, (Some(1_000), Some(500), None))), Ok(()));
        assert_eq!(
            validate_entry_fee(&fee(&env, 0, (None, None, None))),
            Err(Error::InvalidEntryFee)
        );
        assert_eq!(
            validate_entry_fee(&fee(&env, 100, (Some(6_000), Some(3_000), Some(1_001)))),
            Err(Error::SharesExceedTotal)
        );
        assert_eq!(
            validate_entry_fee(&fee(&env, 100, (Some(10_000), None, None))),
            Ok(())
        );

        let mut too_many = fee(&env, 100, (None, None, None));
        too_many.distribution_positions = Some(distribution::MAX_POSITIONS + 1);
        assert_eq!(validate_entry_fee(&too_many), Err(Error::InvalidPosition));

        let mut heavy = fee(&env, 100, (None, None, None));
        heavy.distribution = Distribution::Linear(60);
        assert_eq!(validate_entry_fee(&heavy), Err(Error::InvalidDistribution));
    }

    #[test]
    fn test_fixed_shares() {
        let env = Env::default();
        assert_eq!(fixed_shares(&fee(&env, 1, (Some(100), None, Some(250)))), 350);
        assert_eq!(fixed_shares(&fee(&env, 1, (None, None, None))), 0);
    }
}
