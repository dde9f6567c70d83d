use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::types::{RewardType, Schedule};

const TOURNAMENT_CREATED: Symbol = symbol_short!("t_create");
const TOURNAMENT_ENTERED: Symbol = symbol_short!("t_enter");
const ENTRY_BANNED: Symbol = symbol_short!("t_ban");
const SCORE_SUBMITTED: Symbol = symbol_short!("t_score");
const PRIZE_ADDED: Symbol = symbol_short!("p_add");
const REWARD_CLAIMED: Symbol = symbol_short!("claim");

pub fn tournament_created(env: &Env, tournament_id: u64, creator: &Address, schedule: &Schedule) {
    env.events().publish(
        (TOURNAMENT_CREATED, tournament_id),
        (creator.clone(), schedule.clone()),
    );
}

pub fn tournament_entered(
    env: &Env,
    tournament_id: u64,
    game_token_id: u64,
    player: &Address,
    entry_number: u32,
) {
    env.events().publish(
        (TOURNAMENT_ENTERED, tournament_id),
        (game_token_id, player.clone(), entry_number),
    );
}

pub fn entry_banned(env: &Env, tournament_id: u64, game_token_id: u64) {
    env.events()
        .publish((ENTRY_BANNED, tournament_id), game_token_id);
}

pub fn score_submitted(env: &Env, tournament_id: u64, game_token_id: u64, score: u64, position: u32) {
    env.events().publish(
        (SCORE_SUBMITTED, tournament_id),
        (game_token_id, score, position),
    );
}

pub fn prize_added(env: &Env, tournament_id: u64, prize_id: u64, sponsor: &Address) {
    env.events()
        .publish((PRIZE_ADDED, tournament_id), (prize_id, sponsor.clone()));
}

pub fn reward_claimed(
    env: &Env,
    tournament_id: u64,
    reward: &RewardType,
    recipient: &Address,
    amount: i128,
) {
    env.events().publish(
        (REWARD_CLAIMED, tournament_id),
        (reward.clone(), recipient.clone(), amount),
    );
}
