use soroban_sdk::{contracttype, Address, Bytes, String, Vec};

//
// ──────────────────────────────────────────────────────────
// SCHEDULE
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Period {
    pub start: u64,
    pub end: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    pub registration: Option<Period>,
    pub game: Period,
    pub submission_duration: u64,
}

/// Time-derived stage of a tournament. Ordered: a later variant is always a
/// later point in time for the same schedule.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Phase {
    Scheduled = 0,
    RegistrationOpen = 1,
    Staging = 2,
    Live = 3,
    Submission = 4,
    Finalized = 5,
}

/// Allowed duration ranges, in seconds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleBounds {
    pub min_registration_period: u64,
    pub max_registration_period: u64,
    pub min_game_period: u64,
    pub max_game_period: u64,
    pub min_submission_period: u64,
    pub max_submission_period: u64,
}

//
// ──────────────────────────────────────────────────────────
// TOURNAMENT
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    pub name: String,
    pub description: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameConfig {
    pub game_address: Address,
    pub settings_id: u32,
    pub soulbound: bool,
    pub leaderboard_size: u32,
    pub play_url: String,
}

/// Weighting model mapping a leaderboard position to a share of a pool.
/// `Linear` and `Exponential` carry an exponent in tenths (15 = 1.5).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Distribution {
    Linear(u32),
    Exponential(u32),
    Uniform,
    Custom(Vec<u32>),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryFee {
    pub token_address: Address,
    pub amount: i128,
    pub distribution: Distribution,
    pub tournament_creator_share: Option<u32>,
    pub game_creator_share: Option<u32>,
    pub refund_share: Option<u32>,
    pub distribution_positions: Option<u32>,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QualifyingMode {
    Winners,
    Participants,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TournamentGate {
    pub tournament_ids: Vec<u64>,
    pub mode: QualifyingMode,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionConfig {
    pub address: Address,
    pub config: Bytes,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryRequirementType {
    Token(Address),
    Tournament(TournamentGate),
    Allowlist(Vec<Address>),
    Extension(ExtensionConfig),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryRequirement {
    /// Maximum entries per qualification; 0 means unlimited.
    pub entry_limit: u32,
    pub requirement_type: EntryRequirementType,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TournamentQualification {
    pub tournament_id: u64,
    pub token_id: u64,
    pub position: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QualificationProof {
    Token(u64),
    Tournament(TournamentQualification),
    Address(Address),
    Extension(Bytes),
}

/// Counter key for `entry_limit` enforcement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QualificationKey {
    Token(u64),
    Tournament(u64, u64),
    Address(Address),
}

/// Decoded view of a tournament.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tournament {
    pub id: u64,
    pub created_at: u64,
    pub created_by: Address,
    pub creator_token_id: u64,
    pub metadata: Metadata,
    pub schedule: Schedule,
    pub game_config: GameConfig,
    pub entry_fee: Option<EntryFee>,
    pub entry_requirement: Option<EntryRequirement>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Registration {
    pub game_token_id: u64,
    pub game_address: Address,
    pub tournament_id: u64,
    pub entry_number: u32,
    pub has_submitted: bool,
    pub is_banned: bool,
}

//
// ──────────────────────────────────────────────────────────
// PRIZES & REWARDS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FungiblePrize {
    pub amount: i128,
    pub distribution: Option<Distribution>,
    pub distribution_count: Option<u32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NonFungiblePrize {
    pub id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenType {
    Fungible(FungiblePrize),
    NonFungible(NonFungiblePrize),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prize {
    pub id: u64,
    pub tournament_id: u64,
    pub sponsor_address: Address,
    pub token_address: Address,
    pub token_type: TokenType,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrizeType {
    Single(u64),
    Distributed(u64, u32),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryFeeRewardType {
    Position(u32),
    TournamentCreator,
    GameCreator,
    Refund(u64),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RewardType {
    Prize(PrizeType),
    EntryFee(EntryFeeRewardType),
}

/// One payout obligation. Each key is paid at most once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClaimKey {
    Position(u64, u32),
    Prize(u64, u64),
    PrizePayout(u64, u64, u32),
    TournamentCreator(u64),
    GameCreator(u64),
    Refund(u64, u64),
}

impl ClaimKey {
    pub fn for_reward(tournament_id: u64, reward: &RewardType) -> ClaimKey {
        match reward {
            RewardType::Prize(PrizeType::Single(prize_id)) => {
                ClaimKey::Prize(tournament_id, *prize_id)
            }
            RewardType::Prize(PrizeType::Distributed(prize_id, index)) => {
                ClaimKey::PrizePayout(tournament_id, *prize_id, *index)
            }
            RewardType::EntryFee(EntryFeeRewardType::Position(position)) => {
                ClaimKey::Position(tournament_id, *position)
            }
            RewardType::EntryFee(EntryFeeRewardType::TournamentCreator) => {
                ClaimKey::TournamentCreator(tournament_id)
            }
            RewardType::EntryFee(EntryFeeRewardType::GameCreator) => {
                ClaimKey::GameCreator(tournament_id)
            }
            RewardType::EntryFee(EntryFeeRewardType::Refund(token_id)) => {
                ClaimKey::Refund(tournament_id, *token_id)
            }
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// CONFIG
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub leaderboard: Address,
    pub game_registry: Option<Address>,
    pub schedule_bounds: ScheduleBounds,
}
