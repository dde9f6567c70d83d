//! Collaborator contracts and the call wrappers the engine uses to reach them.
//!
//! Every wrapper goes through the generated `try_*` entry point so a failing
//! collaborator surfaces as an [`Error`] instead of an opaque host trap.

use soroban_sdk::{contractclient, token, Address, Bytes, Env, String, Vec};

use crate::errors::Error;

#[contractclient(name = "LeaderboardClient")]
pub trait LeaderboardInterface {
    fn configure(env: Env, tournament_id: u64, max_entries: u32);
    fn submit_score(env: Env, tournament_id: u64, token_id: u64, score: u64, position: u32);
    fn get_entries(env: Env, tournament_id: u64) -> Vec<u64>;
}

#[contractclient(name = "GameTokenClient")]
pub trait GameTokenInterface {
    fn mint(
        env: Env,
        minter: Address,
        to: Address,
        player_name: String,
        settings_id: u32,
        soulbound: bool,
    ) -> u64;
    fn owner_of(env: Env, token_id: u64) -> Address;
    fn score(env: Env, token_id: u64) -> u64;
}

#[contractclient(name = "NonFungibleClient")]
pub trait NonFungibleInterface {
    fn owner_of(env: Env, token_id: u64) -> Address;
    fn transfer(env: Env, from: Address, to: Address, token_id: u64);
}

#[contractclient(name = "EntryValidatorClient")]
pub trait EntryValidatorInterface {
    fn add_config(env: Env, tournament_id: u64, entry_limit: u32, config: Bytes);
    fn valid_entry(env: Env, tournament_id: u64, player: Address, proof: Bytes) -> bool;
    fn entries_left(env: Env, tournament_id: u64, player: Address, proof: Bytes) -> Option<u32>;
    fn add_entry(env: Env, tournament_id: u64, game_token_id: u64, player: Address, proof: Bytes);
    fn should_ban(
        env: Env,
        tournament_id: u64,
        game_token_id: u64,
        owner: Address,
        proof: Bytes,
    ) -> bool;
}

#[contractclient(name = "GameRegistryClient")]
pub trait GameRegistryInterface {
    fn game_id(env: Env, game_address: Address) -> Option<u64>;
    fn owner_of(env: Env, game_id: u64) -> Address;
}

// ───────────── TOKENS ─────────────

pub fn transfer_fungible(
    env: &Env,
    token_address: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    let client = token::Client::new(env, token_address);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

pub fn transfer_non_fungible(
    env: &Env,
    token_address: &Address,
    from: &Address,
    to: &Address,
    token_id: u64,
) -> Result<(), Error> {
    let client = NonFungibleClient::new(env, token_address);
    match client.try_transfer(from, to, &token_id) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

pub fn non_fungible_owner(env: &Env, token_address: &Address, token_id: u64) -> Result<Address, Error> {
    match NonFungibleClient::new(env, token_address).try_owner_of(&token_id) {
        Ok(Ok(owner)) => Ok(owner),
        _ => Err(Error::CollaboratorFailure),
    }
}

// ───────────── GAME ─────────────

pub fn mint_game_token(
    env: &Env,
    game_address: &Address,
    to: &Address,
    player_name: &String,
    settings_id: u32,
    soulbound: bool,
) -> Result<u64, Error> {
    let client = GameTokenClient::new(env, game_address);
    match client.try_mint(
        &env.current_contract_address(),
        to,
        player_name,
        &settings_id,
        &soulbound,
    ) {
        Ok(Ok(token_id)) => Ok(token_id),
        _ => Err(Error::CollaboratorFailure),
    }
}

pub fn game_token_owner(env: &Env, game_address: &Address, token_id: u64) -> Result<Address, Error> {
    match GameTokenClient::new(env, game_address).try_owner_of(&token_id) {
        Ok(Ok(owner)) => Ok(owner),
        _ => Err(Error::CollaboratorFailure),
    }
}

pub fn game_token_score(env: &Env, game_address: &Address, token_id: u64) -> Result<u64, Error> {
    match GameTokenClient::new(env, game_address).try_score(&token_id) {
        Ok(Ok(score)) => Ok(score),
        _ => Err(Error::CollaboratorFailure),
    }
}

/// Owner of the game itself: the registry's record when one is configured and
/// knows the game, otherwise whoever holds reserved token 0 of the game contract.
/// A registry that fails to answer fails the call.
pub fn game_creator(
    env: &Env,
    registry: &Option<Address>,
    game_address: &Address,
) -> Result<Address, Error> {
    if let Some(registry) = registry {
        let client = GameRegistryClient::new(env, registry);
        match client.try_game_id(game_address) {
            Ok(Ok(Some(game_id))) => {
                return match client.try_owner_of(&game_id) {
                    Ok(Ok(owner)) => Ok(owner),
                    _ => Err(Error::CollaboratorFailure),
                };
            }
            Ok(Ok(None)) => {}
            _ => return Err(Error::CollaboratorFailure),
        }
    }
    game_token_owner(env, game_address, 0)
}

// ───────────── LEADERBOARD ─────────────

pub fn configure_leaderboard(
    env: &Env,
    leaderboard: &Address,
    tournament_id: u64,
    max_entries: u32,
) -> Result<(), Error> {
    match LeaderboardClient::new(env, leaderboard).try_configure(&tournament_id, &max_entries) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::CollaboratorFailure),
    }
}

pub fn submit_to_leaderboard(
    env: &Env,
    leaderboard: &Address,
    tournament_id: u64,
    token_id: u64,
    score: u64,
    position: u32,
) -> Result<(), Error> {
    let client = LeaderboardClient::new(env, leaderboard);
    match client.try_submit_score(&tournament_id, &token_id, &score, &position) {
        Ok(Ok(())) => Ok(()),
        // a rejected position hint is the caller's mistake, not the board's
        _ => Err(Error::InvalidPosition),
    }
}

pub fn leaderboard_entries(env: &Env, leaderboard: &Address, tournament_id: u64) -> Result<Vec<u64>, Error> {
    match LeaderboardClient::new(env, leaderboard).try_get_entries(&tournament_id) {
        Ok(Ok(entries)) => Ok(entries),
        _ => Err(Error::CollaboratorFailure),
    }
}

// ───────────── EXTENSION ─────────────

pub fn extension_add_config(
    env: &Env,
    extension: &Address,
    tournament_id: u64,
    entry_limit: u32,
    config: &Bytes,
) -> Result<(), Error> {
    let client = EntryValidatorClient::new(env, extension);
    match client.try_add_config(&tournament_id, &entry_limit, config) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::CollaboratorFailure),
    }
}

pub fn extension_valid_entry(
    env: &Env,
    extension: &Address,
    tournament_id: u64,
    player: &Address,
    proof: &Bytes,
) -> Result<bool, Error> {
    match EntryValidatorClient::new(env, extension).try_valid_entry(&tournament_id, player, proof) {
        Ok(Ok(valid)) => Ok(valid),
        _ => Err(Error::CollaboratorFailure),
    }
}

pub fn extension_entries_left(
    env: &Env,
    extension: &Address,
    tournament_id: u64,
    player: &Address,
    proof: &Bytes,
) -> Result<Option<u32>, Error> {
    match EntryValidatorClient::new(env, extension).try_entries_left(&tournament_id, player, proof) {
        Ok(Ok(left)) => Ok(left),
        _ => Err(Error::CollaboratorFailure),
    }
}

pub fn extension_add_entry(
    env: &Env,
    extension: &Address,
    tournament_id: u64,
    game_token_id: u64,
    player: &Address,
    proof: &Bytes,
) -> Result<(), Error> {
    let client = EntryValidatorClient::new(env, extension);
    match client.try_add_entry(&tournament_id, &game_token_id, player, proof) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::CollaboratorFailure),
    }
}

pub fn extension_should_ban(
    env: &Env,
    extension: &Address,
    tournament_id: u64,
    game_token_id: u64,
    owner: &Address,
    proof: &Bytes,
) -> Result<bool, Error> {
    let client = EntryValidatorClient::new(env, extension);
    match client.try_should_ban(&tournament_id, &game_token_id, owner, proof) {
        Ok(Ok(ban)) => Ok(ban),
        _ => Err(Error::CollaboratorFailure),
    }
}
