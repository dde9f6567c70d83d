use soroban_sdk::{contracttype, Address, Env, IntoVal, String, TryFromVal, Val};

use crate::errors::Error;
use crate::packing::{self, PackedSchedule, TournamentMeta};
use crate::types::{
    ClaimKey, Config, EntryFee, EntryRequirement, GameConfig, Metadata, Prize, QualificationKey,
    Registration, Tournament,
};

const PERSISTENT_TTL_THRESHOLD: u32 = 518_400; // ~30 days @ 5s/ledger
const PERSISTENT_TTL_EXTEND: u32 = 1_036_800; // ~60 days @ 5s/ledger
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND: u32 = 1_036_800;

#[contracttype]
pub enum DataKey {
    Config,                                      // Instance: Config
    TournamentCount,                             // Instance: u64
    PrizeCount,                                  // Instance: u64
    Tournament(u64),                             // StoredTournament
    EntryFee(u64),                               // EntryFee
    EntryRequirement(u64),                       // EntryRequirement
    EntryCount(u64),                             // u32 - entries ever made
    QualificationEntries(u64, QualificationKey), // u32 - entries used per qualification
    Registration(Address, u64),                  // Registration - (game_address, token_id)
    Prize(u64),                                  // Prize
    PrizePosition(u64),                          // u32 - position of a single prize
    Claimed(ClaimKey),                           // bool
}

/// Storage form of a tournament. Timestamps and small scalars live in the two
/// packed words; fee and requirement are kept under their own keys.
#[contracttype]
#[derive(Clone, Debug)]
pub struct StoredTournament {
    pub created_by: Address,
    pub metadata: Metadata,
    pub schedule: PackedSchedule,
    pub meta: u128,
    pub game_address: Address,
    pub leaderboard_size: u32,
    pub play_url: String,
}

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn read<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump(env, key);
    }
    value
}

fn write<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    bump(env, key);
}

// ───────────── CONFIG & COUNTERS ─────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<Config, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn tournament_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TournamentCount)
        .unwrap_or(0)
}

pub fn next_tournament_id(env: &Env) -> u64 {
    let id = tournament_count(env) + 1;
    env.storage().instance().set(&DataKey::TournamentCount, &id);
    bump_instance(env);
    id
}

pub fn prize_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PrizeCount)
        .unwrap_or(0)
}

pub fn next_prize_id(env: &Env) -> u64 {
    let id = prize_count(env) + 1;
    env.storage().instance().set(&DataKey::PrizeCount, &id);
    bump_instance(env);
    id
}

// ───────────── TOURNAMENTS ─────────────

pub fn save_tournament(env: &Env, tournament: &Tournament) -> Result<(), Error> {
    let meta = packing::pack_meta(&TournamentMeta {
        created_at: tournament.created_at,
        creator_token_id: tournament.creator_token_id,
        settings_id: tournament.game_config.settings_id,
        soulbound: tournament.game_config.soulbound,
    })?;
    let stored = StoredTournament {
        created_by: tournament.created_by.clone(),
        metadata: tournament.metadata.clone(),
        schedule: packing::pack_schedule(&tournament.schedule)?,
        meta,
        game_address: tournament.game_config.game_address.clone(),
        leaderboard_size: tournament.game_config.leaderboard_size,
        play_url: tournament.game_config.play_url.clone(),
    };

    write(env, &DataKey::Tournament(tournament.id), &stored);
    if let Some(entry_fee) = &tournament.entry_fee {
        write(env, &DataKey::EntryFee(tournament.id), entry_fee);
    }
    if let Some(requirement) = &tournament.entry_requirement {
        write(env, &DataKey::EntryRequirement(tournament.id), requirement);
    }
    Ok(())
}

pub fn load_tournament(env: &Env, tournament_id: u64) -> Result<Tournament, Error> {
    let stored: StoredTournament =
        read(env, &DataKey::Tournament(tournament_id)).ok_or(Error::TournamentNotFound)?;
    let meta = packing::unpack_meta(stored.meta);
    let entry_fee: Option<EntryFee> = read(env, &DataKey::EntryFee(tournament_id));
    let entry_requirement: Option<EntryRequirement> =
        read(env, &DataKey::EntryRequirement(tournament_id));

    Ok(Tournament {
        id: tournament_id,
        created_at: meta.created_at,
        created_by: stored.created_by,
        creator_token_id: meta.creator_token_id,
        metadata: stored.metadata,
        schedule: packing::unpack_schedule(&stored.schedule),
        game_config: GameConfig {
            game_address: stored.game_address,
            settings_id: meta.settings_id,
            soulbound: meta.soulbound,
            leaderboard_size: stored.leaderboard_size,
            play_url: stored.play_url,
        },
        entry_fee,
        entry_requirement,
    })
}

// ───────────── ENTRIES ─────────────

pub fn entry_count(env: &Env, tournament_id: u64) -> u32 {
    read(env, &DataKey::EntryCount(tournament_id)).unwrap_or(0)
}

pub fn set_entry_count(env: &Env, tournament_id: u64, count: u32) {
    write(env, &DataKey::EntryCount(tournament_id), &count);
}

pub fn get_registration(env: &Env, game_address: &Address, token_id: u64) -> Option<Registration> {
    read(env, &DataKey::Registration(game_address.clone(), token_id))
}

pub fn set_registration(env: &Env, registration: &Registration) {
    write(
        env,
        &DataKey::Registration(registration.game_address.clone(), registration.game_token_id),
        registration,
    );
}

pub fn qualification_entries(env: &Env, tournament_id: u64, key: &QualificationKey) -> u32 {
    read(env, &DataKey::QualificationEntries(tournament_id, key.clone())).unwrap_or(0)
}

pub fn set_qualification_entries(env: &Env, tournament_id: u64, key: &QualificationKey, count: u32) {
    write(
        env,
        &DataKey::QualificationEntries(tournament_id, key.clone()),
        &count,
    );
}

// ───────────── PRIZES ─────────────

pub fn get_prize(env: &Env, prize_id: u64) -> Result<Prize, Error> {
    read(env, &DataKey::Prize(prize_id)).ok_or(Error::PrizeNotFound)
}

pub fn set_prize(env: &Env, prize: &Prize) {
    write(env, &DataKey::Prize(prize.id), prize);
}

pub fn prize_position(env: &Env, prize_id: u64) -> Option<u32> {
    read(env, &DataKey::PrizePosition(prize_id))
}

pub fn set_prize_position(env: &Env, prize_id: u64, position: u32) {
    write(env, &DataKey::PrizePosition(prize_id), &position);
}

// ───────────── CLAIMS ─────────────

pub fn is_claimed(env: &Env, key: &ClaimKey) -> bool {
    read(env, &DataKey::Claimed(key.clone())).unwrap_or(false)
}

pub fn set_claimed(env: &Env, key: &ClaimKey) {
    write(env, &DataKey::Claimed(key.clone()), &true);
}
