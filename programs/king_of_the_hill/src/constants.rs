use anchor_lang::prelude::*;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub const GAME_SEED: &[u8] = b"game";

pub const VAULT_SEED: &[u8] = b"vault";

/// Paid into the vault by the deployer when the game is created.
pub const BOOTSTRAP_CONTRIBUTION: u64 = 5 * LAMPORTS_PER_SOL;

/// Receives the protocol fee on every crowning.
pub const PROTOCOL_FEE_RECIPIENT: Pubkey =
    pubkey!("C8JrPZekv7nHPDd1cfsPzDkFDh8v2zZTwCdGYYXQTw5d");

pub const LOW_POOL_THRESHOLD: u64 = 10 * LAMPORTS_PER_SOL;

pub const MID_POOL_THRESHOLD: u64 = 100 * LAMPORTS_PER_SOL;

// Fee tiers, keyed by the pool balance before the payment: (max pool, contribution, fee).
// Rows are ascending; the last row has no upper bound.
pub const FEE_TIERS: &[(u64, u64, u64)] = &[
    (LOW_POOL_THRESHOLD, 450_000_000, 50_000_000),
    (MID_POOL_THRESHOLD, 900_000_000, 100_000_000),
    (u64::MAX, 1_350_000_000, 150_000_000),
];

// Wait windows in slots, keyed by the pool balance at claim time: (max pool, min wait).
pub const WAIT_TIERS: &[(u64, u64)] = &[
    (LOW_POOL_THRESHOLD, 100),
    (MID_POOL_THRESHOLD, 10),
    (u64::MAX, 0),
];
