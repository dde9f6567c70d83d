#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec,
};

//
// ──────────────────────────────────────────────────────────
// DATA KEYS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
pub enum DataKey {
    Config,          // LeaderboardConfig
    MaxEntries(u64), // u32 - capacity of a board
    Board(u64),      // Vec<ScoreEntry> - best first
}

//
// ──────────────────────────────────────────────────────────
// STRUCTS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Debug)]
pub struct LeaderboardConfig {
    pub admin: Address,
    pub owner: Address, // the only account allowed to configure boards and submit
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoreEntry {
    pub token_id: u64,
    pub score: u64,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    BoardNotConfigured = 4,
    AlreadyConfigured = 5,
    InvalidMaxEntries = 6,
    InvalidPosition = 7,
    DuplicateEntry = 8,
}

//
// ──────────────────────────────────────────────────────────
// CONSTANTS
// ──────────────────────────────────────────────────────────
//

const LEDGER_THRESHOLD: u32 = 518_400; // ~30 days @ 5s/ledger
const LEDGER_BUMP: u32 = 1_036_800; // ~60 days @ 5s/ledger

//
// ──────────────────────────────────────────────────────────
// EVENTS
// ──────────────────────────────────────────────────────────
//

const NEW_ENTRY: Symbol = symbol_short!("lb_new");
const RANK_CHANGE: Symbol = symbol_short!("rank_chg");

//
// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────
//

#[contract]
pub struct LeaderboardContract;

#[contractimpl]
impl LeaderboardContract {
    // ───────────── INITIALIZATION ─────────────

    /// Initialize the leaderboard
    ///
    /// # Arguments
    /// * `admin` - Contract administrator
    /// * `owner` - Contract allowed to open boards and submit scores
    pub fn initialize(env: Env, admin: Address, owner: Address) -> Result<(), Error> {
        if env.storage().persistent().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage()
            .persistent()
            .set(&DataKey::Config, &LeaderboardConfig { admin, owner });
        Self::bump(&env, &DataKey::Config);
        Ok(())
    }

    // ───────────── ADMIN FUNCTIONS ─────────────

    /// Hand submission rights to a new owner (admin only)
    pub fn set_owner(env: Env, admin: Address, owner: Address) -> Result<(), Error> {
        admin.require_auth();
        let mut config = Self::get_config(env.clone())?;
        if config.admin != admin {
            return Err(Error::NotAuthorized);
        }

        config.owner = owner;
        env.storage().persistent().set(&DataKey::Config, &config);
        Self::bump(&env, &DataKey::Config);
        Ok(())
    }

    // ───────────── BOARDS ─────────────

    /// Open a board for `tournament_id` holding at most `max_entries` entries (owner only)
    pub fn configure(env: Env, tournament_id: u64, max_entries: u32) -> Result<(), Error> {
        Self::require_owner(&env)?;

        if max_entries == 0 {
            return Err(Error::InvalidMaxEntries);
        }
        let key = DataKey::MaxEntries(tournament_id);
        if env.storage().persistent().has(&key) {
            return Err(Error::AlreadyConfigured);
        }

        env.storage().persistent().set(&key, &max_entries);
        Self::bump(&env, &key);
        Ok(())
    }

    /// Insert a score at the caller-supplied 1-indexed `position` (owner only)
    ///
    /// The board is ordered by score, highest first; an equal score ranks
    /// after the entries already holding it. The position must be exactly
    /// where the score belongs.
    ///
    /// # Errors
    /// - `InvalidPosition`: the position is past the board, past capacity, or
    ///   inconsistent with its neighbours
    /// - `DuplicateEntry`: the token is already on the board
    pub fn submit_score(
        env: Env,
        tournament_id: u64,
        token_id: u64,
        score: u64,
        position: u32,
    ) -> Result<(), Error> {
        Self::require_owner(&env)?;
        let max_entries = Self::max_entries(&env, tournament_id)?;
        let mut board = Self::load_board(&env, tournament_id);

        if board.iter().any(|entry| entry.token_id == token_id) {
            return Err(Error::DuplicateEntry);
        }
        if position == 0 || position > max_entries || position > board.len() + 1 {
            return Err(Error::InvalidPosition);
        }

        let index = position - 1;
        if index > 0 {
            if let Some(above) = board.get(index - 1) {
                if above.score < score {
                    return Err(Error::InvalidPosition);
                }
            }
        }
        if let Some(below) = board.get(index) {
            if below.score >= score {
                return Err(Error::InvalidPosition);
            }
        }

        board.insert(index, ScoreEntry { token_id, score });
        if board.len() > max_entries {
            if let Some(dropped) = board.pop_back() {
                env.events().publish(
                    (RANK_CHANGE, tournament_id),
                    (dropped.token_id, max_entries, 0u32),
                );
            }
        }

        let key = DataKey::Board(tournament_id);
        env.storage().persistent().set(&key, &board);
        Self::bump(&env, &key);

        env.events()
            .publish((NEW_ENTRY, tournament_id), (token_id, score, position));
        Ok(())
    }

    // ───────────── VIEW FUNCTIONS ─────────────

    /// Token ids in rank order
    pub fn get_entries(env: Env, tournament_id: u64) -> Vec<u64> {
        let mut entries = Vec::new(&env);
        for entry in Self::load_board(&env, tournament_id).iter() {
            entries.push_back(entry.token_id);
        }
        entries
    }

    pub fn get_board(env: Env, tournament_id: u64) -> Vec<ScoreEntry> {
        Self::load_board(&env, tournament_id)
    }

    /// 1-indexed rank of a token, 0 if it is not on the board
    pub fn get_position(env: Env, tournament_id: u64, token_id: u64) -> u32 {
        let board = Self::load_board(&env, tournament_id);
        for i in 0..board.len() {
            if let Some(entry) = board.get(i) {
                if entry.token_id == token_id {
                    return i + 1;
                }
            }
        }
        0
    }

    pub fn get_max_entries(env: Env, tournament_id: u64) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::MaxEntries(tournament_id))
            .unwrap_or(0)
    }

    pub fn get_config(env: Env) -> Result<LeaderboardConfig, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn bump(env: &Env, key: &DataKey) {
        env.storage()
            .persistent()
            .extend_ttl(key, LEDGER_THRESHOLD, LEDGER_BUMP);
    }

    fn require_owner(env: &Env) -> Result<(), Error> {
        let config = Self::get_config(env.clone())?;
        config.owner.require_auth();
        Ok(())
    }

    fn max_entries(env: &Env, tournament_id: u64) -> Result<u32, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::MaxEntries(tournament_id))
            .ok_or(Error::BoardNotConfigured)
    }

    fn load_board(env: &Env, tournament_id: u64) -> Vec<ScoreEntry> {
        env.storage()
            .persistent()
            .get(&DataKey::Board(tournament_id))
            .unwrap_or(Vec::new(env))
    }
}
