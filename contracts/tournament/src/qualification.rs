//! Entry gates.
//!
//! A gate check resolves who receives the entrant credential and charges the
//! entry to its qualification counter. Extension gates keep their own counters
//! inside the validator contract.

use soroban_sdk::{Address, Bytes, Env};

use crate::errors::Error;
use crate::interfaces;
use crate::ledger;
use crate::schedule;
use crate::storage;
use crate::types::{
    Config, EntryRequirement, EntryRequirementType, Phase, QualificationKey, QualificationProof,
    QualifyingMode, Tournament,
};

/// Outcome of a successful gate check.
pub struct Admission {
    pub recipient: Address,
    pub extension: Option<(Address, Bytes)>,
}

/// Checks a requirement when a tournament is created. Tournament gates may
/// only point at tournaments that already exist.
pub fn validate_requirement(
    env: &Env,
    requirement: &EntryRequirement,
    new_tournament_id: u64,
) -> Result<(), Error> {
    match &requirement.requirement_type {
        EntryRequirementType::Token(_) => Ok(()),
        EntryRequirementType::Tournament(gate) => {
            if gate.tournament_ids.is_empty() {
                return Err(Error::InvalidEntryRequirement);
            }
            for id in gate.tournament_ids.iter() {
                if id == 0 || id >= new_tournament_id {
                    return Err(Error::InvalidEntryRequirement);
                }
                storage::load_tournament(env, id)?;
            }
            Ok(())
        }
        EntryRequirementType::Allowlist(addresses) => {
            if addresses.is_empty() {
                return Err(Error::InvalidEntryRequirement);
            }
            Ok(())
        }
        EntryRequirementType::Extension(_) => Ok(()),
    }
}

/// Resolves an entry against the tournament's requirement. `payer` is the
/// authorizing account; `player_address` is the requested recipient.
pub fn admit(
    env: &Env,
    config: &Config,
    tournament: &Tournament,
    payer: &Address,
    player_address: &Address,
    proof: &Option<QualificationProof>,
) -> Result<Admission, Error> {
    let requirement = match &tournament.entry_requirement {
        Some(requirement) => requirement,
        None => {
            return Ok(Admission {
                recipient: player_address.clone(),
                extension: None,
            })
        }
    };
    let proof = proof.as_ref().ok_or(Error::InvalidQualification)?;

    match (&requirement.requirement_type, proof) {
        (EntryRequirementType::Token(nft_address), QualificationProof::Token(token_id)) => {
            let owner = interfaces::non_fungible_owner(env, nft_address, *token_id)?;
            if owner != *payer {
                return Err(Error::NotQualified);
            }
            let key = QualificationKey::Token(*token_id);
            ledger::consume_qualification(env, tournament.id, &key, requirement.entry_limit)?;
            Ok(Admission {
                recipient: player_address.clone(),
                extension: None,
            })
        }
        (EntryRequirementType::Tournament(gate), QualificationProof::Tournament(q)) => {
            if !gate.tournament_ids.contains(q.tournament_id) {
                return Err(Error::NotQualified);
            }
            let qualifying = storage::load_tournament(env, q.tournament_id)?;
            let now = env.ledger().timestamp();
            if schedule::current_phase(&qualifying.schedule, now) != Phase::Finalized {
                return Err(Error::NotQualified);
            }
            let registration = ledger::registration_for(env, &qualifying, q.token_id)
                .map_err(|_| Error::NotQualified)?;
            if gate.mode == QualifyingMode::Winners {
                if q.position == 0 || q.position > qualifying.game_config.leaderboard_size {
                    return Err(Error::NotQualified);
                }
                let entries =
                    interfaces::leaderboard_entries(env, &config.leaderboard, qualifying.id)?;
                if entries.get(q.position - 1) != Some(registration.game_token_id) {
                    return Err(Error::NotQualified);
                }
            }
            let owner =
                interfaces::game_token_owner(env, &qualifying.game_config.game_address, q.token_id)?;
            if owner != *payer {
                return Err(Error::NotQualified);
            }
            let key = QualificationKey::Tournament(q.tournament_id, q.token_id);
            ledger::consume_qualification(env, tournament.id, &key, requirement.entry_limit)?;
            Ok(Admission {
                recipient: player_address.clone(),
                extension: None,
            })
        }
        (EntryRequirementType::Allowlist(addresses), QualificationProof::Address(address)) => {
            if !addresses.contains(address) {
                return Err(Error::NotQualified);
            }
            let key = QualificationKey::Address(address.clone());
            ledger::consume_qualification(env, tournament.id, &key, requirement.entry_limit)?;
            // the credential always lands with the listed address
            Ok(Admission {
                recipient: address.clone(),
                extension: None,
            })
        }
        (EntryRequirementType::Extension(extension), QualificationProof::Extension(data)) => {
            if !interfaces::extension_valid_entry(
                env,
                &extension.address,
                tournament.id,
                player_address,
                data,
            )? {
                return Err(Error::NotQualified);
            }
            let left = interfaces::extension_entries_left(
                env,
                &extension.address,
                tournament.id,
                player_address,
                data,
            )?;
            if left == Some(0) {
                return Err(Error::EntryLimitReached);
            }
            Ok(Admission {
                recipient: player_address.clone(),
                extension: Some((extension.address.clone(), data.clone())),
            })
        }
        _ => Err(Error::InvalidQualification),
    }
}
