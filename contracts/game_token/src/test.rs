#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env, String};

fn setup_contract(env: &Env) -> (GameTokenContractClient, Address) {
    let admin = Address::generate(env);
    let contract_id = env.register_contract(None, GameTokenContract);
    let client = GameTokenContractClient::new(env, &contract_id);
    client.initialize(&admin);
    (client, admin)
}

#[test]
fn test_initialize_mints_creator_token() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, admin) = setup_contract(&env);

    assert_eq!(client.owner_of(&CREATOR_TOKEN_ID), admin);
    assert_eq!(client.total_supply(), 1);
    assert_eq!(client.try_initialize(&admin), Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_mint_and_owner() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = setup_contract(&env);
    let minter = Address::generate(&env);
    let player = Address::generate(&env);

    let name = String::from_str(&env, "alice");
    let first = client.mint(&minter, &player, &name, &7, &false);
    let second = client.mint(&minter, &player, &name, &7, &true);

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(client.owner_of(&first), player);
    assert_eq!(client.get_collection(&player).len(), 2);

    let token = client.get_token(&second).unwrap();
    assert_eq!(token.minted_by, minter);
    assert_eq!(token.settings_id, 7);
    assert!(token.soulbound);
    assert_eq!(client.total_supply(), 3);
}

#[test]
fn test_transfer() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = setup_contract(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    let id = client.mint(&alice, &alice, &String::from_str(&env, "alice"), &0, &false);
    client.transfer(&alice, &bob, &id);

    assert_eq!(client.owner_of(&id), bob);
    assert_eq!(client.get_collection(&alice).len(), 0);
    assert_eq!(client.get_collection(&bob).len(), 1);

    assert_eq!(client.try_transfer(&alice, &bob, &id), Err(Ok(Error::NotOwner)));
    assert_eq!(client.try_transfer(&bob, &bob, &id), Err(Ok(Error::SelfTransfer)));
    assert_eq!(client.try_transfer(&bob, &alice, &99), Err(Ok(Error::TokenNotFound)));
}

#[test]
fn test_soulbound_tokens_do_not_move() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = setup_contract(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    let id = client.mint(&alice, &alice, &String::from_str(&env, "alice"), &0, &true);
    assert_eq!(client.try_transfer(&alice, &bob, &id), Err(Ok(Error::Soulbound)));
    assert_eq!(client.owner_of(&id), alice);
}

#[test]
fn test_scores() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin) = setup_contract(&env);
    let alice = Address::generate(&env);

    let id = client.mint(&alice, &alice, &String::from_str(&env, "alice"), &0, &false);
    assert_eq!(client.score(&id), 0);

    client.set_score(&id, &4_200);
    assert_eq!(client.score(&id), 4_200);

    assert_eq!(client.try_set_score(&77, &1), Err(Ok(Error::TokenNotFound)));
    assert_eq!(client.try_score(&77), Err(Ok(Error::TokenNotFound)));
}
