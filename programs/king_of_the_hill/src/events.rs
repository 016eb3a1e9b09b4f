use anchor_lang::prelude::*;

#[event]
pub struct GameInitialized {
    pub authority: Pubkey,
    pub bootstrap: u64,
    pub fee_recipient: Pubkey,
}

#[event]
pub struct KingCrowned {
    pub king: Pubkey,
    pub height: u64,
    pub contribution: u64,
    pub fee: u64,
    pub prize_pool: u64,
}

#[event]
pub struct PrizeClaimed {
    pub king: Pubkey,
    pub amount: u64,
    pub height: u64,
}

#[event]
pub struct PrizePoolFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub prize_pool: u64,
}
