use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,

    // Validation
    InvalidPeriod = 10,
    RegistrationAfterGameStart = 11,
    RegistrationPeriodOutOfBounds = 12,
    GamePeriodOutOfBounds = 13,
    SubmissionPeriodOutOfBounds = 14,
    ScheduleInPast = 15,
    ValueOutOfRange = 16,
    SharesExceedTotal = 17,
    InvalidDistribution = 18,
    InvalidEntryFee = 19,
    InvalidPosition = 20,
    InvalidPayoutIndex = 21,
    InvalidPrize = 22,
    InvalidLeaderboardSize = 23,
    InvalidQualification = 24,
    InvalidEntryRequirement = 25,

    // Phase
    RegistrationClosed = 30,
    GameNotLive = 31,
    SubmissionClosed = 32,
    NotFinalized = 33,
    BanWindowClosed = 34,

    // Not found
    TournamentNotFound = 40,
    RegistrationNotFound = 41,
    PrizeNotFound = 42,

    // Claim and entry state
    AlreadyClaimed = 50,
    AlreadySubmitted = 51,
    EntryBanned = 52,
    EntryLimitReached = 53,
    NotQualified = 54,
    BanNotPermitted = 55,
    BanRejected = 56,
    NoEntryFee = 57,
    NoShareConfigured = 58,
    PrizeNotDistributed = 59,
    PrizeIsDistributed = 60,
    AlreadyBanned = 61,

    // Collaborators
    TransferFailed = 70,
    CollaboratorFailure = 71,
    ArithmeticOverflow = 72,
}
