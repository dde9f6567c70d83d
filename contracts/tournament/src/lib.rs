#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String, Vec};

mod distribution;
mod errors;
mod events;
mod fixed_point;
mod interfaces;
mod ledger;
mod packing;
mod prizes;
mod qualification;
mod schedule;
mod storage;
mod types;

pub use distribution::{BASIS_POINTS, MAX_DISTRIBUTION_WEIGHT, MAX_POSITIONS};
pub use errors::Error;
pub use types::*;

#[contract]
pub struct TournamentContract;

#[contractimpl]
impl TournamentContract {
    // ───────────── INITIALIZATION & CONFIG ─────────────

    /// Sets the admin, the leaderboard collaborator and an optional game
    /// registry. Schedule bounds start at their defaults.
    pub fn initialize(
        env: Env,
        admin: Address,
        leaderboard: Address,
        game_registry: Option<Address>,
    ) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        storage::set_config(
            &env,
            &Config {
                admin,
                leaderboard,
                game_registry,
                schedule_bounds: ScheduleBounds::default_bounds(),
            },
        );
        Ok(())
    }

    pub fn update_schedule_bounds(env: Env, admin: Address, bounds: ScheduleBounds) -> Result<(), Error> {
        admin.require_auth();
        let mut config = Self::admin_config(&env, &admin)?;
        if !bounds.is_consistent() {
            return Err(Error::InvalidPeriod);
        }
        config.schedule_bounds = bounds;
        storage::set_config(&env, &config);
        Ok(())
    }

    pub fn set_game_registry(env: Env, admin: Address, registry: Option<Address>) -> Result<(), Error> {
        admin.require_auth();
        let mut config = Self::admin_config(&env, &admin)?;
        config.game_registry = registry;
        storage::set_config(&env, &config);
        Ok(())
    }

    // ───────────── TOURNAMENT LIFECYCLE ─────────────

    /// Create a tournament.
    ///
    /// # Arguments
    /// * `creator` - Account authorizing the creation
    /// * `creator_rewards_address` - Receives the creator credential, and with it
    ///   the creator share and unfilled-position fallbacks
    /// * `schedule` - Immutable once created
    ///
    /// # Errors
    /// - Schedule errors when a period is inverted or out of bounds
    /// - `ScheduleInPast`: the first period starts before the current ledger time
    /// - `InvalidLeaderboardSize`, fee and requirement validation errors
    pub fn create_tournament(
        env: Env,
        creator: Address,
        creator_rewards_address: Address,
        metadata: Metadata,
        schedule: Schedule,
        game_config: GameConfig,
        entry_fee: Option<EntryFee>,
        entry_requirement: Option<EntryRequirement>,
    ) -> Result<Tournament, Error> {
        creator.require_auth();
        let config = storage::get_config(&env)?;
        let now = env.ledger().timestamp();

        schedule::validate(&schedule, &config.schedule_bounds)?;
        let first_start = match &schedule.registration {
            Some(registration) => registration.start,
            None => schedule.game.start,
        };
        if first_start < now {
            return Err(Error::ScheduleInPast);
        }
        if game_config.leaderboard_size == 0 || game_config.leaderboard_size > MAX_POSITIONS {
            return Err(Error::InvalidLeaderboardSize);
        }
        if let Some(entry_fee) = &entry_fee {
            ledger::validate_entry_fee(entry_fee)?;
        }

        let id = storage::next_tournament_id(&env);
        if let Some(requirement) = &entry_requirement {
            qualification::validate_requirement(&env, requirement, id)?;
        }

        let creator_token_id = interfaces::mint_game_token(
            &env,
            &game_config.game_address,
            &creator_rewards_address,
            &metadata.name,
            game_config.settings_id,
            false,
        )?;
        interfaces::configure_leaderboard(&env, &config.leaderboard, id, game_config.leaderboard_size)?;
        if let Some(EntryRequirement {
            entry_limit,
            requirement_type: EntryRequirementType::Extension(extension),
        }) = &entry_requirement
        {
            interfaces::extension_add_config(&env, &extension.address, id, *entry_limit, &extension.config)?;
        }

        let tournament = Tournament {
            id,
            created_at: now,
            created_by: creator.clone(),
            creator_token_id,
            metadata,
            schedule,
            game_config,
            entry_fee,
            entry_requirement,
        };
        storage::save_tournament(&env, &tournament)?;

        events::tournament_created(&env, id, &creator, &tournament.schedule);
        Ok(tournament)
    }

    /// Enter a tournament. `payer` authorizes and funds the entry fee; the
    /// credential goes to `player_address` unless the gate names the recipient.
    ///
    /// # Returns
    /// * `(token_id, entry_number)` of the new entry
    pub fn enter_tournament(
        env: Env,
        payer: Address,
        tournament_id: u64,
        player_name: String,
        player_address: Address,
        qualification: Option<QualificationProof>,
    ) -> Result<(u64, u32), Error> {
        payer.require_auth();
        let config = storage::get_config(&env)?;
        let tournament = storage::load_tournament(&env, tournament_id)?;
        schedule::assert_registration_open(&tournament.schedule, env.ledger().timestamp())?;

        let admission = qualification::admit(
            &env,
            &config,
            &tournament,
            &payer,
            &player_address,
            &qualification,
        )?;

        if let Some(entry_fee) = &tournament.entry_fee {
            ledger::deposit_entry_fee(&env, entry_fee, &payer)?;
        }

        let game_config = &tournament.game_config;
        let token_id = interfaces::mint_game_token(
            &env,
            &game_config.game_address,
            &admission.recipient,
            &player_name,
            game_config.settings_id,
            game_config.soulbound,
        )?;
        let registration = ledger::register_entry(&env, &tournament, token_id)?;

        if let Some((extension, proof)) = &admission.extension {
            interfaces::extension_add_entry(
                &env,
                extension,
                tournament_id,
                token_id,
                &player_address,
                proof,
            )?;
        }

        events::tournament_entered(
            &env,
            tournament_id,
            token_id,
            &admission.recipient,
            registration.entry_number,
        );
        Ok((token_id, registration.entry_number))
    }

    /// Ban an entry of an extension-gated tournament before the game starts.
    /// The extension decides; anyone may ask.
    pub fn ban_entry(env: Env, tournament_id: u64, game_token_id: u64, proof: Bytes) -> Result<(), Error> {
        let tournament = storage::load_tournament(&env, tournament_id)?;
        let extension = match &tournament.entry_requirement {
            Some(EntryRequirement {
                requirement_type: EntryRequirementType::Extension(extension),
                ..
            }) => extension.address.clone(),
            _ => return Err(Error::BanNotPermitted),
        };
        schedule::assert_ban_window(&tournament.schedule, env.ledger().timestamp())?;

        let mut registration = ledger::registration_for(&env, &tournament, game_token_id)?;
        if registration.is_banned {
            return Err(Error::AlreadyBanned);
        }

        let owner = interfaces::game_token_owner(&env, &tournament.game_config.game_address, game_token_id)?;
        if !interfaces::extension_should_ban(&env, &extension, tournament_id, game_token_id, &owner, &proof)? {
            return Err(Error::BanRejected);
        }

        registration.is_banned = true;
        storage::set_registration(&env, &registration);
        events::entry_banned(&env, tournament_id, game_token_id);
        Ok(())
    }

    /// Submit the score of `token_id` with its claimed leaderboard `position`.
    /// The score is read from the game contract; the token owner authorizes.
    ///
    /// # Errors
    /// - `SubmissionClosed`: outside the submission phase
    /// - `EntryBanned`, `AlreadySubmitted`
    /// - `InvalidPosition`: the position is outside the board or inconsistent with it
    pub fn submit_score(env: Env, tournament_id: u64, token_id: u64, position: u32) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        let tournament = storage::load_tournament(&env, tournament_id)?;
        schedule::assert_submission_open(&tournament.schedule, env.ledger().timestamp())?;

        let mut registration = ledger::registration_for(&env, &tournament, token_id)?;
        if registration.is_banned {
            return Err(Error::EntryBanned);
        }
        if registration.has_submitted {
            return Err(Error::AlreadySubmitted);
        }

        let game_address = &tournament.game_config.game_address;
        let owner = interfaces::game_token_owner(&env, game_address, token_id)?;
        owner.require_auth();

        if position == 0 || position > tournament.game_config.leaderboard_size {
            return Err(Error::InvalidPosition);
        }
        let score = interfaces::game_token_score(&env, game_address, token_id)?;
        interfaces::submit_to_leaderboard(&env, &config.leaderboard, tournament_id, token_id, score, position)?;

        registration.has_submitted = true;
        storage::set_registration(&env, &registration);
        events::score_submitted(&env, tournament_id, token_id, score, position);
        Ok(())
    }

    /// Pay out one reward of a finalized tournament. Permissionless: funds only
    /// ever go to the resolved recipient.
    pub fn claim_reward(env: Env, tournament_id: u64, reward_type: RewardType) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        let tournament = storage::load_tournament(&env, tournament_id)?;
        schedule::assert_finalized(&tournament.schedule, env.ledger().timestamp())?;

        let key = ClaimKey::for_reward(tournament_id, &reward_type);
        ledger::assert_unclaimed(&env, &key)?;

        let (recipient, amount) = match &reward_type {
            RewardType::Prize(PrizeType::Single(prize_id)) => {
                prizes::claim_single(&env, &config, &tournament, *prize_id)?
            }
            RewardType::Prize(PrizeType::Distributed(prize_id, index)) => {
                prizes::claim_distributed(&env, &config, &tournament, *prize_id, *index)?
            }
            RewardType::EntryFee(reward) => {
                let (recipient, amount) =
                    ledger::resolve_entry_fee_claim(&env, &config, &tournament, reward)?;
                let entry_fee = tournament.entry_fee.as_ref().ok_or(Error::NoEntryFee)?;
                ledger::payout(&env, &entry_fee.token_address, &recipient, amount)?;
                (recipient, amount)
            }
        };

        ledger::mark_claimed(&env, &key);
        events::reward_claimed(&env, tournament_id, &reward_type, &recipient, amount);
        Ok(())
    }

    /// Add a sponsor prize while the game is live. Fungible prizes with a
    /// distribution are split across positions; everything else is bound to
    /// `position`.
    pub fn add_prize(
        env: Env,
        sponsor: Address,
        tournament_id: u64,
        token_address: Address,
        token_type: TokenType,
        position: Option<u32>,
    ) -> Result<Prize, Error> {
        sponsor.require_auth();
        storage::get_config(&env)?;
        let tournament = storage::load_tournament(&env, tournament_id)?;
        schedule::assert_game_active(&tournament.schedule, env.ledger().timestamp())?;

        let prize = prizes::add_prize(&env, &tournament, &sponsor, &token_address, &token_type, position)?;
        events::prize_added(&env, tournament_id, prize.id, &sponsor);
        Ok(prize)
    }

    // ───────────── VIEW FUNCTIONS ─────────────

    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::get_config(&env)
    }

    pub fn get_tournament(env: Env, tournament_id: u64) -> Result<Tournament, Error> {
        storage::load_tournament(&env, tournament_id)
    }

    pub fn current_phase(env: Env, tournament_id: u64) -> Result<Phase, Error> {
        let tournament = storage::load_tournament(&env, tournament_id)?;
        Ok(schedule::current_phase(&tournament.schedule, env.ledger().timestamp()))
    }

    pub fn tournament_count(env: Env) -> u64 {
        storage::tournament_count(&env)
    }

    /// Entries ever made, banned ones included.
    pub fn tournament_entries(env: Env, tournament_id: u64) -> u32 {
        storage::entry_count(&env, tournament_id)
    }

    pub fn get_registration(env: Env, game_address: Address, token_id: u64) -> Option<Registration> {
        storage::get_registration(&env, &game_address, token_id)
    }

    pub fn get_prize(env: Env, prize_id: u64) -> Result<Prize, Error> {
        storage::get_prize(&env, prize_id)
    }

    pub fn prize_count(env: Env) -> u64 {
        storage::prize_count(&env)
    }

    pub fn is_reward_claimed(env: Env, tournament_id: u64, reward_type: RewardType) -> bool {
        ledger::is_claimed(&env, &ClaimKey::for_reward(tournament_id, &reward_type))
    }

    /// Token ids in rank order.
    pub fn get_leaderboard(env: Env, tournament_id: u64) -> Result<Vec<u64>, Error> {
        let config = storage::get_config(&env)?;
        interfaces::leaderboard_entries(&env, &config.leaderboard, tournament_id)
    }

    pub fn qualification_entries(env: Env, tournament_id: u64, key: QualificationKey) -> u32 {
        storage::qualification_entries(&env, tournament_id, &key)
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn admin_config(env: &Env, admin: &Address) -> Result<Config, Error> {
        let config = storage::get_config(env)?;
        if config.admin != *admin {
            return Err(Error::NotAuthorized);
        }
        Ok(config)
    }
}
