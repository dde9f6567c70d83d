#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Bytes, Env};

#[contracttype]
pub enum DataKey {
    Admin,
    Tournament,                  // contract allowed to open configs and record entries
    Config(u64),                 // ValidatorConfig
    Allowed(u64, Address),       // bool
    Entries(u64, Address),       // u32 - entries made by a player
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidatorConfig {
    pub entry_limit: u32,
    pub config: Bytes,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotConfigured = 3,
}

#[contract]
pub struct EntryValidator;

#[contractimpl]
impl EntryValidator {
    pub fn initialize(env: Env, admin: Address, tournament_contract: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::Tournament, &tournament_contract);
        Ok(())
    }

    /// Allow a player into a tournament (admin only)
    pub fn allow(env: Env, tournament_id: u64, player: Address) -> Result<(), Error> {
        Self::require_admin(&env)?;
        env.storage()
            .persistent()
            .set(&DataKey::Allowed(tournament_id, player), &true);
        Ok(())
    }

    /// Withdraw a player's allowance; their entries become bannable (admin only)
    pub fn revoke(env: Env, tournament_id: u64, player: Address) -> Result<(), Error> {
        Self::require_admin(&env)?;
        env.storage()
            .persistent()
            .remove(&DataKey::Allowed(tournament_id, player));
        Ok(())
    }

    /// Called by the tournament contract when a gated tournament is created
    pub fn add_config(env: Env, tournament_id: u64, entry_limit: u32, config: Bytes) -> Result<(), Error> {
        Self::require_tournament(&env)?;
        env.storage().persistent().set(
            &DataKey::Config(tournament_id),
            &ValidatorConfig {
                entry_limit,
                config,
            },
        );
        Ok(())
    }

    pub fn valid_entry(env: Env, tournament_id: u64, player: Address, _proof: Bytes) -> bool {
        Self::is_allowed(env, tournament_id, player)
    }

    /// Entries still available to a player; `None` when unlimited
    pub fn entries_left(
        env: Env,
        tournament_id: u64,
        player: Address,
        _proof: Bytes,
    ) -> Result<Option<u32>, Error> {
        let config = Self::get_config(env.clone(), tournament_id)?;
        if config.entry_limit == 0 {
            return Ok(None);
        }
        let used = Self::entries(&env, tournament_id, &player);
        Ok(Some(config.entry_limit.saturating_sub(used)))
    }

    /// Called by the tournament contract after an entry is made
    pub fn add_entry(
        env: Env,
        tournament_id: u64,
        _game_token_id: u64,
        player: Address,
        _proof: Bytes,
    ) -> Result<(), Error> {
        Self::require_tournament(&env)?;
        let used = Self::entries(&env, tournament_id, &player);
        env.storage()
            .persistent()
            .set(&DataKey::Entries(tournament_id, player), &(used + 1));
        Ok(())
    }

    /// An entry is bannable once its owner is no longer allowed
    pub fn should_ban(
        env: Env,
        tournament_id: u64,
        _game_token_id: u64,
        owner: Address,
        _proof: Bytes,
    ) -> bool {
        !Self::is_allowed(env, tournament_id, owner)
    }

    pub fn is_allowed(env: Env, tournament_id: u64, player: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Allowed(tournament_id, player))
            .unwrap_or(false)
    }

    pub fn get_config(env: Env, tournament_id: u64) -> Result<ValidatorConfig, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Config(tournament_id))
            .ok_or(Error::NotConfigured)
    }

    fn entries(env: &Env, tournament_id: u64, player: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Entries(tournament_id, player.clone()))
            .unwrap_or(0)
    }

    fn require_admin(env: &Env) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Ok(())
    }

    fn require_tournament(env: &Env) -> Result<(), Error> {
        let tournament: Address = env
            .storage()
            .instance()
            .get(&DataKey::Tournament)
            .ok_or(Error::NotInitialized)?;
        tournament.require_auth();
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    fn setup(env: &Env) -> (EntryValidatorClient, Address) {
        let admin = Address::generate(env);
        let tournament = Address::generate(env);
        let contract_id = env.register_contract(None, EntryValidator);
        let client = EntryValidatorClient::new(env, &contract_id);
        client.initialize(&admin, &tournament);
        (client, tournament)
    }

    #[test]
    fn test_allowance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _tournament) = setup(&env);

        let player = Address::generate(&env);
        let proof = Bytes::new(&env);

        assert!(!client.valid_entry(&1, &player, &proof));
        client.allow(&1, &player);
        assert!(client.valid_entry(&1, &player, &proof));
        assert!(!client.valid_entry(&2, &player, &proof));
        assert!(!client.should_ban(&1, &5, &player, &proof));

        client.revoke(&1, &player);
        assert!(!client.is_allowed(&1, &player));
        assert!(client.should_ban(&1, &5, &player, &proof));
    }

    #[test]
    fn test_entry_limit() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, _tournament) = setup(&env);

        let player = Address::generate(&env);
        let proof = Bytes::new(&env);

        assert_eq!(client.try_entries_left(&1, &player, &proof), Err(Ok(Error::NotConfigured)));

        client.add_config(&1, &2, &proof);
        client.add_config(&2, &0, &proof);
        assert_eq!(client.entries_left(&1, &player, &proof), Some(2));
        assert_eq!(client.entries_left(&2, &player, &proof), None);

        client.add_entry(&1, &10, &player, &proof);
        client.add_entry(&1, &11, &player, &proof);
        assert_eq!(client.entries_left(&1, &player, &proof), Some(0));
    }

    #[test]
    fn test_double_initialize() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, tournament) = setup(&env);

        let result = client.try_initialize(&tournament, &tournament);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }
}
