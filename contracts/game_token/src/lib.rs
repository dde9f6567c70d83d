#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String, Vec,
};

/// Reserved id held by the game's creator.
pub const CREATOR_TOKEN_ID: u64 = 0;

const LEDGER_THRESHOLD: u32 = 100_000;
const LEDGER_BUMP: u32 = 500_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameToken {
    pub owner: Address,
    pub minted_by: Address,
    pub player_name: String,
    pub settings_id: u32,
    pub soulbound: bool,
    pub minted_at: u64,
}

#[contracttype]
pub enum DataKey {
    Token(u64),               // Persistent: individual token data
    Score(u64),               // Persistent: u64 score reported by the game
    OwnerCollection(Address), // Persistent: list of ids owned by an address
    NextTokenId,              // Instance: counter for ids
    TotalSupply,              // Instance: current count of tokens
    Admin,                    // Instance: game administrator
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    TokenNotFound = 4,
    NotOwner = 5,
    Soulbound = 6,
    SelfTransfer = 7,
}

#[contract]
pub struct GameTokenContract;

#[contractimpl]
impl GameTokenContract {
    /// Initialize the game and mint the reserved creator token to `admin`.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::NextTokenId, &CREATOR_TOKEN_ID);
        env.storage().instance().set(&DataKey::TotalSupply, &0u64);

        Self::mint_to(
            &env,
            &admin,
            &admin,
            String::from_str(&env, "creator"),
            0,
            false,
        );
        Ok(())
    }

    /// Mint a new game token. Anyone may mint; `minter` is recorded.
    pub fn mint(
        env: Env,
        minter: Address,
        to: Address,
        player_name: String,
        settings_id: u32,
        soulbound: bool,
    ) -> Result<u64, Error> {
        minter.require_auth();
        if !env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::NotInitialized);
        }

        Ok(Self::mint_to(&env, &minter, &to, player_name, settings_id, soulbound))
    }

    /// Transfers a token. Soulbound tokens never move.
    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) -> Result<(), Error> {
        from.require_auth();

        if from == to {
            return Err(Error::SelfTransfer);
        }

        let mut token = Self::load(&env, token_id)?;
        if token.owner != from {
            return Err(Error::NotOwner);
        }
        if token.soulbound {
            return Err(Error::Soulbound);
        }

        // Remove from 'from' collection
        let mut from_col = Self::get_collection(env.clone(), from.clone());
        if let Some(index) = from_col.first_index_of(token_id) {
            from_col.remove(index);
        }
        Self::save_collection(&env, &from, &from_col);

        // Add to 'to' collection
        let mut to_col = Self::get_collection(env.clone(), to.clone());
        to_col.push_back(token_id);
        Self::save_collection(&env, &to, &to_col);

        token.owner = to.clone();
        let key = DataKey::Token(token_id);
        env.storage().persistent().set(&key, &token);
        env.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD, LEDGER_BUMP);

        env.events()
            .publish((symbol_short!("transfer"), from, to), token_id);
        Ok(())
    }

    /// Record the score a token achieved (admin only).
    pub fn set_score(env: Env, token_id: u64, score: u64) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Self::load(&env, token_id)?;

        let key = DataKey::Score(token_id);
        env.storage().persistent().set(&key, &score);
        env.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD, LEDGER_BUMP);

        env.events().publish((symbol_short!("score"), token_id), score);
        Ok(())
    }

    /// Score of a token, 0 until the game reports one.
    pub fn score(env: Env, token_id: u64) -> Result<u64, Error> {
        Self::load(&env, token_id)?;
        Ok(env
            .storage()
            .persistent()
            .get(&DataKey::Score(token_id))
            .unwrap_or(0))
    }

    /// Get owner of a specific token.
    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        Ok(Self::load(&env, token_id)?.owner)
    }

    /// Returns the list of token ids owned by an address.
    pub fn get_collection(env: Env, owner: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::OwnerCollection(owner))
            .unwrap_or(Vec::new(&env))
    }

    pub fn get_token(env: Env, token_id: u64) -> Option<GameToken> {
        env.storage().persistent().get(&DataKey::Token(token_id))
    }

    /// Returns the total number of tokens minted, the creator token included.
    pub fn total_supply(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::TotalSupply).unwrap_or(0)
    }

    fn load(env: &Env, token_id: u64) -> Result<GameToken, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Token(token_id))
            .ok_or(Error::TokenNotFound)
    }

    fn save_collection(env: &Env, owner: &Address, collection: &Vec<u64>) {
        let key = DataKey::OwnerCollection(owner.clone());
        env.storage().persistent().set(&key, collection);
        env.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD, LEDGER_BUMP);
    }

    fn mint_to(
        env: &Env,
        minter: &Address,
        to: &Address,
        player_name: String,
        settings_id: u32,
        soulbound: bool,
    ) -> u64 {
        let token_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .unwrap_or(CREATOR_TOKEN_ID);

        let token = GameToken {
            owner: to.clone(),
            minted_by: minter.clone(),
            player_name,
            settings_id,
            soulbound,
            minted_at: env.ledger().timestamp(),
        };

        let key = DataKey::Token(token_id);
        env.storage().persistent().set(&key, &token);
        env.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD, LEDGER_BUMP);

        let mut collection = Self::get_collection(env.clone(), to.clone());
        collection.push_back(token_id);
        Self::save_collection(env, to, &collection);

        env.storage()
            .instance()
            .set(&DataKey::NextTokenId, &(token_id + 1));
        let total: u64 = env.storage().instance().get(&DataKey::TotalSupply).unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &(total + 1));

        env.events()
            .publish((symbol_short!("mint"), to.clone()), token_id);

        token_id
    }
}

mod test;
